//! TSV import parsing.
//!
//! Both import variants read the same row shape, tab-separated and positional:
//! - date: ISO `YYYY-MM-DD` or the spreadsheet export form `M/D/YY`
//! - description
//! - account: chart-of-accounts ID the amount is debited to
//! - amount: decimal, `$` and thousands separators tolerated
//! - memo (optional)
//!
//! Blank lines are skipped. A leading header row is detected by non-numeric
//! content in the amount column and skipped without error. Row numbers in
//! errors are 1-based physical line numbers.

pub mod generic;
pub mod report;

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::AppError as Error;
use crate::fish::model::AccountId;

const COL_DATE: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_ACCOUNT: usize = 2;
const COL_AMOUNT: usize = 3;
const COL_MEMO: usize = 4;

/// One parsed line from a TSV import file.
#[derive(Debug, Clone)]
pub struct TransactionRow {
    /// 1-based physical line number in the input file.
    pub line: usize,
    pub date: NaiveDate,
    pub description: String,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub memo: Option<String>,
}

/// Lazily yields parsed rows from a TSV file, in file order.
pub struct RowReader {
    records: csv::StringRecordsIntoIter<File>,
    header_checked: bool,
}

impl RowReader {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        Ok(RowReader {
            records: reader.into_records(),
            header_checked: false,
        })
    }
}

impl Iterator for RowReader {
    type Item = Result<TransactionRow, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            if !self.header_checked {
                self.header_checked = true;
                if looks_like_header(&record) {
                    continue;
                }
            }

            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or_default();

            return Some(parse_row(line, &record));
        }
    }
}

// The first non-blank row is a header when its amount column is present but
// non-numeric. A row with no amount column at all is a data row with a
// missing field, reported as such.
fn looks_like_header(record: &StringRecord) -> bool {
    match record.get(COL_AMOUNT) {
        Some(raw) => clean_amount(raw).parse::<Decimal>().is_err(),
        None => false,
    }
}

fn parse_row(line: usize, record: &StringRecord) -> Result<TransactionRow, Error> {
    let date_raw = required(record, COL_DATE, "date", line)?;
    let description = required(record, COL_DESCRIPTION, "description", line)?;
    let account_raw = required(record, COL_ACCOUNT, "account", line)?;
    let amount_raw = required(record, COL_AMOUNT, "amount", line)?;

    let account_id = account_raw.parse::<AccountId>().map_err(|_| Error::MalformedRow {
        row: line,
        field: "account",
    })?;

    let memo = record
        .get(COL_MEMO)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Ok(TransactionRow {
        line,
        date: parse_date(line, date_raw)?,
        description: description.to_string(),
        account_id,
        amount: parse_amount(line, amount_raw)?,
        memo,
    })
}

fn required<'a>(
    record: &'a StringRecord,
    index: usize,
    field: &'static str,
    line: usize,
) -> Result<&'a str, Error> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MalformedRow { row: line, field }),
    }
}

fn clean_amount(raw: &str) -> String {
    raw.trim().replace(['$', ','], "")
}

/// Parse a money field like `$1,234.56`. A non-decimal value is an error,
/// never silently zero.
pub(crate) fn parse_amount(line: usize, raw: &str) -> Result<Decimal, Error> {
    clean_amount(raw).parse::<Decimal>().map_err(|_| Error::InvalidAmount {
        row: line,
        raw: raw.trim().to_string(),
    })
}

/// Parse a date field, accepting ISO `YYYY-MM-DD` and `M/D/YY`.
pub(crate) fn parse_date(line: usize, raw: &str) -> Result<NaiveDate, Error> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_date_mdy(raw).ok_or_else(|| Error::InvalidDate {
        row: line,
        raw: raw.to_string(),
    })
}

// M/D/YY or M/D/YYYY; two-digit years are 2000-based.
fn parse_date_mdy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let month: u32 = parts[0].parse().ok()?;
    let day: u32 = parts[1].parse().ok()?;
    let mut year: i32 = parts[2].parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

// -- Tests ----------------------------------------------------------------------------
