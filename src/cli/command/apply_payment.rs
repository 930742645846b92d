//! Create a payment application linking a payment to a bill/invoice.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::AppError as Error;
use crate::fish::model::{NewPaymentApplication, OrgId, TransactionId};
use crate::fish::FishApi;

pub async fn apply_payment(
    api: &impl FishApi,
    org: OrgId,
    payment_id: TransactionId,
    bill_id: TransactionId,
    amount: Decimal,
    date: Option<NaiveDate>,
) -> Result<(), Error> {
    let application = NewPaymentApplication {
        payment_transaction_id: payment_id,
        applied_to_transaction_id: bill_id,
        amount,
        applied_date: date,
    };

    let id = api.create_payment_application(org, &application).await?;
    println!("Created payment application ID {}", id);
    println!("  Payment txn {} -> Bill/Invoice txn {}", payment_id, bill_id);
    println!("  Amount: ${}", amount);

    Ok(())
}
