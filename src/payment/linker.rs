//! The three-step pay-bill sequence: bill, payment, payment application.
//!
//! The remote API has no multi-step transaction primitive, so the sequence is
//! deliberately non-atomic. A failure partway through surfaces the step that
//! failed and every ID already created, for manual completion or reversal; no
//! automatic rollback is attempted.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::AppError;
use crate::fish::model::{
    AccountId, LineItem, NewPaymentApplication, OrgId, PaymentApplicationId, TransactionHeader,
    TransactionId, TransactionPayload, TransactionType, VendorId,
};
use crate::fish::FishApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum PayBillStep {
    Bill,
    Payment,
    Application,
}

/// The IDs created before a pay-bill sequence stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSteps {
    pub bill_id: Option<TransactionId>,
    pub payment_id: Option<TransactionId>,
}

impl fmt::Display for CompletedSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.bill_id, self.payment_id) {
            (None, _) => write!(f, "nothing created"),
            (Some(bill), None) => write!(f, "bill txn {} created", bill),
            (Some(bill), Some(payment)) => {
                write!(f, "bill txn {} and payment txn {} created", bill, payment)
            }
        }
    }
}

/// A pay-bill sequence failed partway. The completed steps remain on the
/// remote side and need manual follow-up.
#[derive(Debug, Error)]
#[error("pay-bill failed at the {step} step ({completed}): {source}")]
pub struct PartialSequenceError {
    pub step: PayBillStep,
    pub completed: CompletedSteps,
    #[source]
    pub source: Box<AppError>,
}

/// Everything needed to create and immediately pay a bill.
#[derive(Debug, Clone)]
pub struct PayBill {
    pub date: NaiveDate,
    pub description: String,
    /// Expense debit lines only; the payable credit line is added here.
    pub lines: Vec<LineItem>,
    pub vendor_id: Option<VendorId>,
    pub reference: Option<String>,
    /// Defaults to the bill date.
    pub payment_date: Option<NaiveDate>,
    pub cash_account: AccountId,
    pub payable_account: AccountId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayBillOutcome {
    pub bill_id: TransactionId,
    pub payment_id: TransactionId,
    pub application_id: PaymentApplicationId,
}

impl PayBill {
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|li| li.debit).sum()
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date.unwrap_or(self.date)
    }

    /// Step 1: the bill, expense debits balanced by a payable credit.
    pub fn bill_payload(&self) -> TransactionPayload {
        let mut header = TransactionHeader::new(TransactionType::Bill, self.date, &self.description);
        header.vendor_id = self.vendor_id;
        header.reference = self.reference.clone();

        let mut line_items = self.lines.clone();
        line_items.push(LineItem::credit(
            self.payable_account,
            self.total(),
            Some("Accounts payable".to_string()),
        ));

        TransactionPayload {
            transaction: header,
            line_items,
        }
    }

    /// Step 2: the payment, clearing the payable from the cash account.
    pub fn payment_payload(&self) -> TransactionPayload {
        let total = self.total();
        let mut header = TransactionHeader::new(
            TransactionType::Payment,
            self.payment_date(),
            format!("Payment: {}", self.description),
        );
        header.vendor_id = self.vendor_id;

        TransactionPayload {
            transaction: header,
            line_items: vec![
                LineItem::debit(
                    self.payable_account,
                    total,
                    Some("Clear accounts payable".to_string()),
                ),
                LineItem::credit(
                    self.cash_account,
                    total,
                    Some("Payment from cash account".to_string()),
                ),
            ],
        }
    }

    /// Step 3: the application linking payment to bill for the full amount.
    pub fn application(
        &self,
        payment_id: TransactionId,
        bill_id: TransactionId,
    ) -> NewPaymentApplication {
        NewPaymentApplication {
            payment_transaction_id: payment_id,
            applied_to_transaction_id: bill_id,
            amount: self.total(),
            applied_date: Some(self.payment_date()),
        }
    }
}

/// Run the three-step sequence. The calls are strictly sequential: each step
/// needs the IDs of the previous one.
pub async fn pay_bill(
    api: &impl FishApi,
    org: OrgId,
    request: &PayBill,
) -> Result<PayBillOutcome, PartialSequenceError> {
    let bill_id = api
        .create_transaction(org, &request.bill_payload())
        .await
        .map_err(|e| PartialSequenceError {
            step: PayBillStep::Bill,
            completed: CompletedSteps::default(),
            source: Box::new(e),
        })?;

    let payment_id = api
        .create_transaction(org, &request.payment_payload())
        .await
        .map_err(|e| PartialSequenceError {
            step: PayBillStep::Payment,
            completed: CompletedSteps {
                bill_id: Some(bill_id),
                payment_id: None,
            },
            source: Box::new(e),
        })?;

    let application_id = api
        .create_payment_application(org, &request.application(payment_id, bill_id))
        .await
        .map_err(|e| PartialSequenceError {
            step: PayBillStep::Application,
            completed: CompletedSteps {
                bill_id: Some(bill_id),
                payment_id: Some(payment_id),
            },
            source: Box::new(e),
        })?;

    Ok(PayBillOutcome {
        bill_id,
        payment_id,
        application_id,
    })
}

// -- Tests ----------------------------------------------------------------------------
