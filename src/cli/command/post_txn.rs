//! Post a single transaction from command-line arguments.

use chrono::NaiveDate;

use crate::error::AppError as Error;
use crate::fish::model::{
    CustomerId, LineItem, OrgId, TransactionHeader, TransactionPayload, TransactionType, VendorId,
};
use crate::fish::FishApi;
use crate::payment::poster;

#[allow(clippy::too_many_arguments)]
pub async fn post_txn(
    api: &impl FishApi,
    org: OrgId,
    transaction_type: TransactionType,
    date: NaiveDate,
    description: &str,
    lines_json: &str,
    reference: Option<String>,
    vendor: Option<VendorId>,
    customer: Option<CustomerId>,
) -> Result<(), Error> {
    let line_items: Vec<LineItem> = serde_json::from_str(lines_json)?;

    let mut header = TransactionHeader::new(transaction_type, date, description);
    header.reference = reference;
    header.vendor_id = vendor;
    header.customer_id = customer;

    let payload = TransactionPayload {
        transaction: header,
        line_items,
    };

    let id = poster::post_transaction(api, org, &payload).await?;
    println!("Created transaction ID {} - {}", id, description);

    Ok(())
}
