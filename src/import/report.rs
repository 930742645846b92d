//! Expense report import: every TSV row is one debit line, accumulated under
//! a single transaction with a balancing credit to a payable account.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::AppError as Error;
use crate::fish::model::{
    AccountId, LineItem, TransactionHeader, TransactionPayload, TransactionType,
};

use super::RowReader;

/// The outcome of parsing an expense report file. Row errors are collected
/// rather than fatal, so the caller can report all of them and decide whether
/// to post the valid lines. `payload` is `None` when no row parsed cleanly.
#[derive(Debug)]
pub struct ParsedReport {
    pub payload: Option<TransactionPayload>,
    pub errors: Vec<Error>,
}

impl ParsedReport {
    pub fn total(&self) -> Decimal {
        self.payload.as_ref().map(TransactionPayload::total).unwrap_or_default()
    }

    /// Debit lines only, without the balancing credit.
    pub fn expense_lines(&self) -> &[LineItem] {
        match &self.payload {
            Some(payload) => &payload.line_items[..payload.line_items.len() - 1],
            None => &[],
        }
    }
}

/// Parse an expense report TSV into one transaction payload.
///
/// The transaction is dated at the latest row date and marked with a pending
/// reimbursement status; the credit line goes to `payable_account`.
pub fn parse_report(
    path: &Path,
    description: &str,
    payable_account: AccountId,
) -> Result<ParsedReport, Error> {
    let mut debit_lines = Vec::new();
    let mut errors = Vec::new();
    let mut latest_date: Option<NaiveDate> = None;

    for row in RowReader::open(path)? {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        if latest_date.map_or(true, |latest| row.date > latest) {
            latest_date = Some(row.date);
        }

        let line_description = match &row.memo {
            Some(memo) => format!("{} ({})", row.description, memo),
            None => row.description.clone(),
        };
        debit_lines.push(LineItem::debit(
            row.account_id,
            row.amount,
            Some(line_description),
        ));
    }

    let date = match latest_date {
        Some(date) => date,
        None if errors.is_empty() => return Err(Error::EmptyImport(path.display().to_string())),
        None => {
            return Ok(ParsedReport {
                payload: None,
                errors,
            })
        }
    };

    let total: Decimal = debit_lines.iter().map(|li| li.debit).sum();
    let mut line_items = debit_lines;
    line_items.push(LineItem::credit(
        payable_account,
        total,
        Some("Reimbursement payable".to_string()),
    ));

    let mut header = TransactionHeader::new(TransactionType::Expense, date, description);
    header.reimbursement_status = Some("pending".to_string());

    Ok(ParsedReport {
        payload: Some(TransactionPayload {
            transaction: header,
            line_items,
        }),
        errors,
    })
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn accumulates_rows_into_one_balanced_transaction() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("report.tsv");
        fs::write(
            &path,
            "1/5/26\tPhone stipend\t51\t$30.00\n1/20/26\tHome office\t47\t55.25\tJan\n",
        )
        .unwrap();

        let report = parse_report(&path, "Expense report Jan 2026", 13).unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(report.total(), "85.25".parse::<Decimal>().unwrap());
        assert_eq!(report.expense_lines().len(), 2);
        assert_eq!(
            report.expense_lines()[1].description.as_deref(),
            Some("Home office (Jan)")
        );

        let payload = report.payload.as_ref().unwrap();
        assert_eq!(
            payload.transaction.date,
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
        );
        assert_eq!(
            payload.transaction.reimbursement_status.as_deref(),
            Some("pending")
        );

        let credit = payload.line_items.last().unwrap();
        assert_eq!(credit.account_id, 13);
        assert_eq!(credit.credit, "85.25".parse::<Decimal>().unwrap());
    }

    #[test]
    fn row_errors_are_collected_and_valid_rows_kept() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("report.tsv");
        fs::write(
            &path,
            "1/5/26\tPhone stipend\t51\t30.00\n1/6/26\tUtilities\t44\tn/a\n1/7/26\tInternet\t51\t60.00\n",
        )
        .unwrap();

        let report = parse_report(&path, "Expense report", 13).unwrap();

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row(), Some(2));
        assert_eq!(report.expense_lines().len(), 2);
        assert_eq!(report.total(), "90.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn all_rows_failing_keeps_the_errors() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("report.tsv");
        // amounts stay numeric so the first row is not mistaken for a header
        fs::write(&path, "1/5/26\t\t51\t30.00\n1/6/26\tUtilities\t44\tbad\n").unwrap();

        let report = parse_report(&path, "Expense report", 13).unwrap();
        assert!(report.payload.is_none());
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("report.tsv");
        fs::write(&path, "\n\n").unwrap();

        assert!(matches!(
            parse_report(&path, "Empty", 13),
            Err(Error::EmptyImport(_))
        ));
    }
}
