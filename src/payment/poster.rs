//! Posts transaction payloads, singly or as a batch.

use colored::Colorize;

use crate::error::AppError as Error;
use crate::fish::model::{OrgId, TransactionId, TransactionPayload};
use crate::fish::FishApi;

/// Submit one payload and return the remote-assigned transaction ID.
///
/// Exactly one attempt: a rejection or transport failure propagates to the
/// caller, which decides whether the rest of a batch continues.
pub async fn post_transaction(
    api: &impl FishApi,
    org: OrgId,
    payload: &TransactionPayload,
) -> Result<TransactionId, Error> {
    api.create_transaction(org, payload).await
}

/// The result of driving a batch: posted rows and failed rows, both in input
/// order. Row numbers are the 1-based line numbers of the source file; a
/// failure with no row comes from an error raised outside any single row,
/// such as a read error mid-file.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub posted: Vec<(usize, TransactionId)>,
    pub failures: Vec<(Option<usize>, Error)>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.posted.len() + self.failures.len()
    }

    pub fn print_summary(&self) {
        println!();
        println!(
            "Done: {} posted, {} failed.",
            self.posted.len(),
            self.failures.len()
        );
        for (row, error) in &self.failures {
            match row {
                Some(row) => eprintln!("  {} row {}: {}", "FAILED".red(), row, error),
                None => eprintln!("  {} {}", "FAILED".red(), error),
            }
        }
    }

    /// Non-zero exit when any row failed.
    pub fn into_result(self) -> Result<(), Error> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::BatchFailed {
                failed: self.failures.len(),
                attempted: self.attempted(),
            })
        }
    }
}

/// Drive a batch of parsed rows through the poster, continue-on-error: a bad
/// row never aborts the rest of the batch. Rows are submitted strictly in
/// input order, one at a time.
pub async fn post_batch<I>(api: &impl FishApi, org: OrgId, batch: I) -> BatchReport
where
    I: IntoIterator<Item = Result<(usize, TransactionPayload), Error>>,
{
    let mut report = BatchReport::default();

    for item in batch {
        match item {
            Ok((row, payload)) => match post_transaction(api, org, &payload).await {
                Ok(id) => {
                    println!(
                        "  row {}: posted txn {} - {}",
                        row, id, payload.transaction.description
                    );
                    report.posted.push((row, id));
                }
                Err(e) => report.failures.push((Some(row), e)),
            },
            Err(e) => {
                let row = e.row();
                report.failures.push((row, e));
            }
        }
    }

    report
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::fish::model::{LineItem, TransactionHeader, TransactionType};
    use crate::payment::fake::FakeApi;

    fn payload(description: &str) -> TransactionPayload {
        TransactionPayload {
            transaction: TransactionHeader::new(
                TransactionType::JournalEntry,
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                description,
            ),
            line_items: vec![
                LineItem::debit(49, "5.00".parse().unwrap(), None),
                LineItem::credit(1, "5.00".parse().unwrap(), None),
            ],
        }
    }

    #[tokio::test]
    async fn malformed_row_does_not_abort_the_batch() {
        let api = FakeApi::new();
        let batch = vec![
            Ok((1, payload("first"))),
            Err(Error::InvalidAmount {
                row: 2,
                raw: "oops".to_string(),
            }),
            Ok((3, payload("third"))),
        ];

        let report = post_batch(&api, 1, batch).await;

        assert_eq!(report.posted.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, Some(2));
        assert_eq!(api.transactions.lock().unwrap().len(), 2);
        assert!(report.into_result().is_err());
    }

    #[tokio::test]
    async fn errors_without_a_row_keep_no_row_number() {
        let api = FakeApi::new();
        let batch = vec![
            Ok((1, payload("first"))),
            Err(Error::FileError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stray carriage return",
            ))),
        ];

        let report = post_batch(&api, 1, batch).await;

        assert_eq!(report.posted.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].0.is_none());
        assert!(report.into_result().is_err());
    }

    #[tokio::test]
    async fn remote_rejections_are_collected_per_row() {
        let api = FakeApi {
            fail_transactions_after: Some(1),
            ..FakeApi::new()
        };
        let batch = vec![Ok((1, payload("first"))), Ok((2, payload("second")))];

        let report = post_batch(&api, 1, batch).await;

        assert_eq!(report.posted.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, Some(2));
        assert!(matches!(
            report.failures[0].1,
            Error::RemoteRejected { status: 422, .. }
        ));
    }

    #[tokio::test]
    async fn clean_batch_reports_success() {
        let api = FakeApi::new();
        let batch = vec![Ok((1, payload("only")))];

        let report = post_batch(&api, 1, batch).await;

        assert_eq!(report.posted.len(), 1);
        assert!(report.into_result().is_ok());
    }
}
