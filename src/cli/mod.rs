//! The command line interface.

pub mod command;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::fish::model::{
    chart, AccountId, CustomerId, OrgId, ReportType, TransactionId, TransactionType, VendorId,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Org/business ID
    #[arg(long, global = true, default_value_t = 1)]
    pub org: OrgId,

    /// Path to the credentials file
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all businesses
    Businesses {},
    /// List chart of accounts
    Accounts {},
    /// List vendors
    Vendors {},
    /// List customers
    Customers {},
    /// List fiscal years
    FiscalYears {},
    /// List transactions
    Transactions {
        /// Fiscal year (e.g. 2026)
        #[arg(long)]
        fy: Option<String>,
    },
    /// Pull a financial report
    Reports {
        report_type: ReportType,
        #[arg(long)]
        fy: Option<String>,
        /// As-of date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Account ID (required for ledger)
        #[arg(long)]
        account_id: Option<AccountId>,
    },
    /// Dashboard metrics
    Dashboard {},
    /// Post a single transaction
    PostTxn {
        #[arg(long = "type")]
        transaction_type: TransactionType,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Description
        #[arg(long)]
        desc: String,
        /// Line items as a JSON array
        #[arg(long)]
        lines: String,
        /// Reference number
        #[arg(long)]
        reference: Option<String>,
        /// Vendor ID
        #[arg(long)]
        vendor: Option<VendorId>,
        /// Customer ID
        #[arg(long)]
        customer: Option<CustomerId>,
    },
    /// Import transactions from a TSV file, one transaction per row
    ImportTsv {
        /// Account credited to balance each row
        #[arg(long, default_value_t = chart::CHECKING)]
        offset_account: AccountId,
        /// Validate and show what would be posted without posting
        #[arg(long)]
        dry_run: bool,
        /// Path to the TSV file
        file: PathBuf,
    },
    /// Import an expense report TSV as a single transaction
    ImportReport {
        /// Transaction description (e.g. 'Expense report Jan 2026')
        #[arg(long)]
        desc: String,
        /// Account credited with the reimbursement total
        #[arg(long, default_value_t = chart::REIMBURSEMENTS_PAYABLE)]
        payable_account: AccountId,
        /// Validate and show the payload without posting
        #[arg(long)]
        dry_run: bool,
        /// Post the valid lines without asking when some rows failed
        #[arg(long)]
        yes: bool,
        /// Path to the expense report TSV file
        file: PathBuf,
    },
    /// Create bill + payment + payment application in one step
    PayBill {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Description
        #[arg(long)]
        desc: String,
        /// Expense line items as a JSON array (debit lines only)
        #[arg(long)]
        lines: String,
        /// Vendor ID
        #[arg(long)]
        vendor: Option<VendorId>,
        /// Reference number
        #[arg(long)]
        reference: Option<String>,
        /// Payment date if different from the bill date
        #[arg(long)]
        payment_date: Option<NaiveDate>,
        /// Cash account the payment is drawn from
        #[arg(long, default_value_t = chart::CHECKING)]
        cash_account: AccountId,
        /// Accounts payable account
        #[arg(long, default_value_t = chart::ACCOUNTS_PAYABLE)]
        payable_account: AccountId,
        /// Show the three steps without posting
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a payment application linking a payment to a bill/invoice
    ApplyPayment {
        /// Payment transaction ID
        #[arg(long)]
        payment_id: TransactionId,
        /// Bill/invoice transaction ID
        #[arg(long)]
        bill_id: TransactionId,
        /// Amount to apply (e.g. '500.00')
        #[arg(long)]
        amount: Decimal,
        /// Application date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List payment applications
    PaymentApplications {
        /// Filter by the transaction the payment was applied to
        #[arg(long)]
        txn_id: Option<TransactionId>,
    },
    /// Check payment status for transactions
    PaymentStatus {
        /// Comma-separated transaction IDs (e.g. '5,6,7')
        ids: String,
    },
}
