//! Wire types for the Fi$h accounting API.
//!
//! Request and response bodies are JSON with camelCase field names. Monetary
//! amounts travel as decimal strings (e.g. `"42.99"`), which is what
//! `rust_decimal` serializes to by default.

use chrono::NaiveDate;
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type OrgId = u32;
pub type AccountId = u32;
pub type VendorId = u32;
pub type CustomerId = u32;
pub type TransactionId = u64;
pub type PaymentApplicationId = u64;

/// Default chart-of-account IDs, overridable per command with flags.
pub mod chart {
    use super::AccountId;

    pub const CHECKING: AccountId = 1;
    pub const ACCOUNTS_PAYABLE: AccountId = 12;
    pub const REIMBURSEMENTS_PAYABLE: AccountId = 13;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TransactionType {
    JournalEntry,
    Expense,
    Bill,
    Payment,
    Invoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportType {
    Activities,
    BalanceSheet,
    TrialBalance,
    Ledger,
}

/// One account/amount/description triple within a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub account_id: AccountId,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItem {
    pub fn debit(account_id: AccountId, amount: Decimal, description: Option<String>) -> Self {
        LineItem {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description,
        }
    }

    pub fn credit(account_id: AccountId, amount: Decimal, description: Option<String>) -> Self {
        LineItem {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description,
        }
    }
}

/// Transaction-level fields of a creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHeader {
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<VendorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reimbursement_status: Option<String>,
    pub is_posted: bool,
}

impl TransactionHeader {
    pub fn new(
        transaction_type: TransactionType,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        TransactionHeader {
            transaction_type,
            date,
            description: description.into(),
            reference: None,
            vendor_id: None,
            customer_id: None,
            reimbursement_status: None,
            is_posted: true,
        }
    }
}

/// Request body for `POST /transactions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub transaction: TransactionHeader,
    pub line_items: Vec<LineItem>,
}

impl TransactionPayload {
    /// The transaction total, taken as the sum of debit amounts.
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(|li| li.debit).sum()
    }
}

/// A transaction as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub is_posted: bool,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Transaction {
    /// The transaction total, taken as the sum of debit amounts.
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(|li| li.debit).sum()
    }
}

/// Request body for `POST /payment-applications`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentApplication {
    pub payment_transaction_id: TransactionId,
    pub applied_to_transaction_id: TransactionId,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
}

/// A payment application as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApplication {
    pub id: PaymentApplicationId,
    pub payment_transaction_id: TransactionId,
    pub applied_to_transaction_id: TransactionId,
    pub amount: Decimal,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
}

// -- Listing types -------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYear {
    pub id: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: OrgId,
    pub name: String,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub fiscal_year_start: Option<String>,
}

// -- Response envelope ---------------------------------------------------------------

/// Every API response wraps its payload in `{"data": ..., "count"?: ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub count: Option<u64>,
}

/// The subset of a creation response the client needs.
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: u64,
}

// -- Tests ----------------------------------------------------------------------------
