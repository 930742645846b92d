pub mod apply_payment;
pub mod import_report;
pub mod import_tsv;
pub mod list;
pub mod pay_bill;
pub mod payment_applications;
pub mod payment_status;
pub mod post_txn;
pub mod reports;

pub use apply_payment::apply_payment;
pub use import_report::import_report;
pub use import_tsv::import_tsv;
pub use pay_bill::pay_bill;
pub use payment_applications::payment_applications;
pub use payment_status::payment_status;
pub use post_txn::post_txn;
