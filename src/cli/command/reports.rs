//! Report and dashboard commands: the response is printed as JSON, untouched.

use crate::error::AppError as Error;
use crate::fish::model::{AccountId, OrgId, ReportType};
use crate::fish::FishClient;

pub async fn reports(
    client: &FishClient,
    org: OrgId,
    report_type: ReportType,
    fiscal_year: Option<&str>,
    as_of: Option<chrono::NaiveDate>,
    account_id: Option<AccountId>,
) -> Result<(), Error> {
    if report_type == ReportType::Ledger && account_id.is_none() {
        return Err(Error::MissingAccountId);
    }

    let mut params = Vec::new();
    if let Some(fy) = fiscal_year {
        params.push(("fiscalYear", fy.to_string()));
    }
    if let Some(as_of) = as_of {
        params.push(("asOf", as_of.to_string()));
    }
    if let Some(account_id) = account_id {
        params.push(("accountId", account_id.to_string()));
    }

    let report = client.report(org, report_type, &params).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

pub async fn dashboard(client: &FishClient, org: OrgId) -> Result<(), Error> {
    let metrics = client.dashboard(org).await?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}
