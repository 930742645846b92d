//! Create bill + payment + payment application in one step.
//!
//! The three remote calls are not atomic. When a later step fails, the error
//! printed to the operator names the step and the IDs already created so the
//! sequence can be completed or reversed by hand.

use chrono::NaiveDate;

use crate::error::AppError as Error;
use crate::fish::model::{AccountId, LineItem, OrgId, VendorId};
use crate::fish::FishApi;
use crate::payment::linker::{self, PayBill};

#[allow(clippy::too_many_arguments)]
pub async fn pay_bill(
    api: &impl FishApi,
    org: OrgId,
    date: NaiveDate,
    description: &str,
    lines_json: &str,
    vendor: Option<VendorId>,
    reference: Option<String>,
    payment_date: Option<NaiveDate>,
    cash_account: AccountId,
    payable_account: AccountId,
    dry_run: bool,
) -> Result<(), Error> {
    let lines: Vec<LineItem> = serde_json::from_str(lines_json)?;

    let request = PayBill {
        date,
        description: description.to_string(),
        lines,
        vendor_id: vendor,
        reference,
        payment_date,
        cash_account,
        payable_account,
    };

    if dry_run {
        println!("[DRY RUN] Step 1: Bill");
        println!("{}", serde_json::to_string_pretty(&request.bill_payload())?);
        println!(
            "\nStep 2: Payment ({}): DR acct:{} ${}, CR acct:{} ${}",
            request.payment_date(),
            payable_account,
            request.total(),
            cash_account,
            request.total()
        );
        println!("Step 3: Payment application: ${}", request.total());
        return Ok(());
    }

    let outcome = linker::pay_bill(api, org, &request).await?;
    println!("Step 1: Created bill ID {} - {}", outcome.bill_id, description);
    println!("Step 2: Created payment ID {}", outcome.payment_id);
    println!(
        "Step 3: Created payment application ID {} - ${}",
        outcome.application_id,
        request.total()
    );
    println!(
        "\nDone: bill={}, payment={}, application={}",
        outcome.bill_id, outcome.payment_id, outcome.application_id
    );

    Ok(())
}
