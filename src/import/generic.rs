//! Generic transaction import: one TSV row becomes one balanced transaction.

use std::path::Path;

use crate::error::AppError as Error;
use crate::fish::model::{
    AccountId, LineItem, TransactionHeader, TransactionPayload, TransactionType,
};

use super::{RowReader, TransactionRow};

/// Lazily converts TSV rows into transaction payloads. Each row debits its
/// own account and credits the offset account for the same amount, so every
/// payload balances by construction.
pub struct GenericImport {
    rows: RowReader,
    offset_account: AccountId,
}

impl GenericImport {
    pub fn open(path: &Path, offset_account: AccountId) -> Result<Self, Error> {
        Ok(GenericImport {
            rows: RowReader::open(path)?,
            offset_account,
        })
    }
}

impl Iterator for GenericImport {
    type Item = Result<(usize, TransactionPayload), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map(|row| (row.line, payload_from_row(row, self.offset_account))))
    }
}

fn payload_from_row(row: TransactionRow, offset_account: AccountId) -> TransactionPayload {
    let header = TransactionHeader::new(TransactionType::JournalEntry, row.date, &row.description);

    TransactionPayload {
        transaction: header,
        line_items: vec![
            LineItem::debit(row.account_id, row.amount, row.memo),
            LineItem::credit(offset_account, row.amount, None),
        ],
    }
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn each_row_becomes_a_balanced_two_line_payload() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("txns.tsv");
        fs::write(
            &path,
            "2026-02-01\tStamps\t49\t11.20\n2026-02-02\tPhone\t51\t45.00\tFeb\n",
        )
        .unwrap();

        let payloads: Vec<_> = GenericImport::open(&path, 1)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(payloads.len(), 2);

        let (row, payload) = &payloads[0];
        assert_eq!(*row, 1);
        assert_eq!(payload.transaction.description, "Stamps");
        assert_eq!(payload.line_items.len(), 2);
        assert_eq!(payload.line_items[0].account_id, 49);
        assert_eq!(payload.line_items[0].debit, "11.20".parse().unwrap());
        assert_eq!(payload.line_items[1].account_id, 1);
        assert_eq!(payload.line_items[1].credit, "11.20".parse().unwrap());
        assert_eq!(payload.total(), "11.20".parse::<Decimal>().unwrap());

        let (_, second) = &payloads[1];
        assert_eq!(second.line_items[0].description.as_deref(), Some("Feb"));
    }

    #[test]
    fn bad_rows_surface_as_errors_without_stopping_iteration() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("txns.tsv");
        fs::write(
            &path,
            "2026-02-01\tStamps\t49\t11.20\n2026-02-02\tPhone\t51\toops\n2026-02-03\tInk\t47\t8.00\n",
        )
        .unwrap();

        let results: Vec<_> = GenericImport::open(&path, 1).unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::InvalidAmount { row: 2, .. })));
        assert!(results[2].is_ok());
    }
}
