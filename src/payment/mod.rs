//! The posting and reconciliation workflow: single and batch transaction
//! posting, the three-step pay-bill sequence, and payment-status aggregation.
//!
//! Everything here talks to the remote service through the [`FishApi`] trait
//! and runs strictly sequentially; there is no parallel dispatch and no retry.
//!
//! [`FishApi`]: crate::fish::FishApi

pub mod linker;
pub mod poster;
pub mod status;

// -- Test fake --------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use crate::error::AppError;
    use crate::fish::model::{
        LineItem, NewPaymentApplication, OrgId, PaymentApplication, PaymentApplicationId,
        Transaction, TransactionId, TransactionPayload,
    };
    use crate::fish::FishApi;

    /// In-memory stand-in for the remote service. IDs are assigned from a
    /// counter; failure switches simulate remote rejections mid-sequence.
    #[derive(Default)]
    pub struct FakeApi {
        pub next_id: Mutex<u64>,
        pub transactions: Mutex<Vec<(TransactionId, TransactionPayload)>>,
        pub applications: Mutex<Vec<PaymentApplication>>,
        /// Reject `create_transaction` once this many transactions exist.
        pub fail_transactions_after: Option<usize>,
        /// Reject every `create_payment_application` call.
        pub fail_applications: bool,
        /// Transactions visible to `transaction()` without having been created
        /// through the fake, keyed as (id, total).
        pub seeded_totals: Mutex<Vec<(TransactionId, Decimal)>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            FakeApi {
                next_id: Mutex::new(1000),
                ..Default::default()
            }
        }

        fn assign_id(&self) -> u64 {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        }

        fn rejected(message: &str) -> AppError {
            AppError::RemoteRejected {
                status: 422,
                message: message.to_string(),
            }
        }

        pub fn seed_transaction(&self, id: TransactionId, total: Decimal) {
            self.seeded_totals.lock().unwrap().push((id, total));
        }

        pub fn seed_application(
            &self,
            payment_id: TransactionId,
            bill_id: TransactionId,
            amount: Decimal,
        ) {
            let id = self.assign_id();
            self.applications.lock().unwrap().push(PaymentApplication {
                id,
                payment_transaction_id: payment_id,
                applied_to_transaction_id: bill_id,
                amount,
                applied_date: None,
            });
        }
    }

    impl FishApi for FakeApi {
        async fn create_transaction(
            &self,
            _org: OrgId,
            payload: &TransactionPayload,
        ) -> Result<TransactionId, AppError> {
            if let Some(limit) = self.fail_transactions_after {
                if self.transactions.lock().unwrap().len() >= limit {
                    return Err(Self::rejected("transaction rejected"));
                }
            }

            let id = self.assign_id();
            self.transactions.lock().unwrap().push((id, payload.clone()));
            Ok(id)
        }

        async fn create_payment_application(
            &self,
            _org: OrgId,
            application: &NewPaymentApplication,
        ) -> Result<PaymentApplicationId, AppError> {
            if self.fail_applications {
                return Err(Self::rejected("application rejected"));
            }

            let id = self.assign_id();
            self.applications.lock().unwrap().push(PaymentApplication {
                id,
                payment_transaction_id: application.payment_transaction_id,
                applied_to_transaction_id: application.applied_to_transaction_id,
                amount: application.amount,
                applied_date: application.applied_date,
            });
            Ok(id)
        }

        async fn payment_applications(
            &self,
            _org: OrgId,
            transaction_ids: &[TransactionId],
        ) -> Result<Vec<PaymentApplication>, AppError> {
            let mut matching: Vec<PaymentApplication> = self
                .applications
                .lock()
                .unwrap()
                .iter()
                .filter(|app| {
                    transaction_ids.is_empty()
                        || transaction_ids.contains(&app.applied_to_transaction_id)
                })
                .cloned()
                .collect();

            // the remote makes no ordering promise
            matching.reverse();
            Ok(matching)
        }

        async fn transaction(
            &self,
            _org: OrgId,
            id: TransactionId,
        ) -> Result<Transaction, AppError> {
            if let Some((_, total)) = self
                .seeded_totals
                .lock()
                .unwrap()
                .iter()
                .find(|(tid, _)| *tid == id)
            {
                return Ok(Transaction {
                    id,
                    date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    transaction_type: None,
                    description: String::new(),
                    reference: None,
                    is_posted: true,
                    line_items: vec![LineItem::debit(1, *total, None)],
                });
            }

            self.transactions
                .lock()
                .unwrap()
                .iter()
                .find(|(tid, _)| *tid == id)
                .map(|(tid, payload)| Transaction {
                    id: *tid,
                    date: payload.transaction.date,
                    transaction_type: Some(payload.transaction.transaction_type.to_string()),
                    description: payload.transaction.description.clone(),
                    reference: payload.transaction.reference.clone(),
                    is_posted: payload.transaction.is_posted,
                    line_items: payload.line_items.clone(),
                })
                .ok_or_else(|| AppError::RemoteRejected {
                    status: 404,
                    message: format!("transaction {} not found", id),
                })
        }
    }
}
