//! Payment-status aggregation: how much of each transaction has been settled
//! by payment applications.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::error::AppError as Error;
use crate::fish::model::{OrgId, TransactionId};
use crate::fish::FishApi;

/// How many transaction IDs go into one payment-applications query.
const QUERY_BATCH: usize = 50;

// Tolerance for decimal rounding when deciding "paid".
fn rounding_epsilon() -> Decimal {
    Decimal::new(5, 3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentState {
    Paid,
    Partial,
    Unpaid,
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentStatus {
    pub transaction_id: TransactionId,
    pub total: Decimal,
    pub applied: Decimal,
    pub state: PaymentState,
}

/// Compute the payment status of each transaction. Input order is preserved;
/// duplicate IDs are queried and reported once. Applications are fetched in
/// chunks of [`QUERY_BATCH`] IDs, transaction totals one by one.
pub async fn payment_statuses(
    api: &impl FishApi,
    org: OrgId,
    transaction_ids: &[TransactionId],
) -> Result<Vec<PaymentStatus>, Error> {
    let unique = dedupe(transaction_ids);

    let mut applied: HashMap<TransactionId, Decimal> =
        unique.iter().map(|id| (*id, Decimal::ZERO)).collect();

    for chunk in unique.chunks(QUERY_BATCH) {
        for application in api.payment_applications(org, chunk).await? {
            if let Some(sum) = applied.get_mut(&application.applied_to_transaction_id) {
                *sum += application.amount;
            }
        }
    }

    let mut statuses = Vec::with_capacity(unique.len());
    for id in unique {
        let total = api.transaction(org, id).await?.total();
        let applied = applied[&id];
        statuses.push(PaymentStatus {
            transaction_id: id,
            total,
            applied,
            state: classify(applied, total),
        });
    }

    Ok(statuses)
}

// first occurrence wins
fn dedupe(ids: &[TransactionId]) -> Vec<TransactionId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn classify(applied: Decimal, total: Decimal) -> PaymentState {
    if applied.is_zero() {
        if total.is_zero() {
            PaymentState::Paid
        } else {
            PaymentState::Unpaid
        }
    } else if applied + rounding_epsilon() >= total {
        PaymentState::Paid
    } else {
        PaymentState::Partial
    }
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::fake::FakeApi;

    #[tokio::test]
    async fn statuses_follow_input_order_not_response_order() {
        let api = FakeApi::new();
        api.seed_transaction(100, "50.00".parse().unwrap());
        api.seed_transaction(101, "80.00".parse().unwrap());
        api.seed_transaction(102, "25.00".parse().unwrap());
        api.seed_application(900, 100, "50.00".parse().unwrap());
        api.seed_application(901, 101, "30.00".parse().unwrap());

        let statuses = payment_statuses(&api, 1, &[100, 101, 102]).await.unwrap();

        let ids: Vec<_> = statuses.iter().map(|s| s.transaction_id).collect();
        assert_eq!(ids, vec![100, 101, 102]);

        assert_eq!(statuses[0].state, PaymentState::Paid);
        assert_eq!(statuses[1].state, PaymentState::Partial);
        assert_eq!(statuses[1].applied, "30.00".parse().unwrap());
        assert_eq!(statuses[2].state, PaymentState::Unpaid);
        assert_eq!(statuses[2].applied, Decimal::ZERO);
    }

    #[tokio::test]
    async fn duplicate_ids_are_reported_once() {
        let api = FakeApi::new();
        api.seed_transaction(100, "50.00".parse().unwrap());
        api.seed_transaction(101, "10.00".parse().unwrap());

        let statuses = payment_statuses(&api, 1, &[100, 100, 101]).await.unwrap();

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].transaction_id, 100);
        assert_eq!(statuses[1].transaction_id, 101);
    }

    #[tokio::test]
    async fn applications_accumulate_per_transaction() {
        let api = FakeApi::new();
        api.seed_transaction(200, "100.00".parse().unwrap());
        api.seed_application(900, 200, "60.00".parse().unwrap());
        api.seed_application(901, 200, "40.00".parse().unwrap());

        let statuses = payment_statuses(&api, 1, &[200]).await.unwrap();

        assert_eq!(statuses[0].applied, "100.00".parse().unwrap());
        assert_eq!(statuses[0].state, PaymentState::Paid);
    }

    #[test]
    fn classification_tolerates_rounding() {
        let total: Decimal = "42.99".parse().unwrap();
        assert_eq!(classify("42.987".parse().unwrap(), total), PaymentState::Paid);
        assert_eq!(classify("42.00".parse().unwrap(), total), PaymentState::Partial);
        assert_eq!(classify(Decimal::ZERO, total), PaymentState::Unpaid);
    }
}
