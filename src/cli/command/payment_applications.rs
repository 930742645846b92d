//! List payment applications, optionally filtered by transaction.

use crate::error::AppError as Error;
use crate::fish::model::{OrgId, PaymentApplication, TransactionId};
use crate::fish::FishApi;

pub async fn payment_applications(
    api: &impl FishApi,
    org: OrgId,
    txn_id: Option<TransactionId>,
) -> Result<(), Error> {
    let applications = fetch(api, org, txn_id).await?;
    if applications.is_empty() {
        println!("No payment applications found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<14} {:<14} {:>12} {:<12}",
        "ID", "Payment Txn", "Applied To", "Amount", "Date"
    );
    println!("{}", "-".repeat(60));
    for a in applications {
        println!(
            "{:<6} {:<14} {:<14} {:>12} {:<12}",
            a.id,
            a.payment_transaction_id,
            a.applied_to_transaction_id,
            a.amount,
            a.applied_date.map(|d| d.to_string()).unwrap_or_default()
        );
    }

    Ok(())
}

async fn fetch(
    api: &impl FishApi,
    org: OrgId,
    txn_id: Option<TransactionId>,
) -> Result<Vec<PaymentApplication>, Error> {
    let filter: Vec<TransactionId> = txn_id.into_iter().collect();
    api.payment_applications(org, &filter).await
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::fake::FakeApi;

    #[tokio::test]
    async fn no_filter_lists_every_application() {
        let api = FakeApi::new();
        api.seed_application(900, 100, "50.00".parse().unwrap());
        api.seed_application(901, 101, "30.00".parse().unwrap());

        let applications = fetch(&api, 1, None).await.unwrap();
        assert_eq!(applications.len(), 2);
    }

    #[tokio::test]
    async fn filter_keeps_only_the_named_transaction() {
        let api = FakeApi::new();
        api.seed_application(900, 100, "50.00".parse().unwrap());
        api.seed_application(901, 101, "30.00".parse().unwrap());

        let applications = fetch(&api, 1, Some(101)).await.unwrap();
        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].applied_to_transaction_id, 101);

        assert!(fetch(&api, 1, Some(999)).await.unwrap().is_empty());
    }
}
