//! Check payment status for one or more transactions.

use crate::error::AppError as Error;
use crate::fish::model::{OrgId, TransactionId};
use crate::fish::FishApi;
use crate::payment::status;

pub async fn payment_status(api: &impl FishApi, org: OrgId, ids: &str) -> Result<(), Error> {
    let transaction_ids = parse_ids(ids)?;
    let statuses = status::payment_statuses(api, org, &transaction_ids).await?;

    println!(
        "{:<10} {:>12} {:>12} {:<10}",
        "Txn ID", "Applied", "Total", "Status"
    );
    println!("{}", "-".repeat(50));
    for s in statuses {
        println!(
            "{:<10} {:>12} {:>12} {:<10}",
            s.transaction_id, s.applied, s.total, s.state
        );
    }

    Ok(())
}

fn parse_ids(ids: &str) -> Result<Vec<TransactionId>, Error> {
    ids.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<TransactionId>()
                .map_err(|_| Error::InvalidTransactionId(part.to_string()))
        })
        .collect()
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_ids("5,6, 7").unwrap(), vec![5, 6, 7]);
        assert!(matches!(
            parse_ids("5,x"),
            Err(Error::InvalidTransactionId(_))
        ));
    }
}
