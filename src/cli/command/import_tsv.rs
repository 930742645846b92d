//! Import transactions from a TSV file, one transaction per row.

use std::path::Path;

use colored::Colorize;

use crate::error::AppError as Error;
use crate::fish::model::{AccountId, OrgId};
use crate::fish::FishApi;
use crate::import::generic::GenericImport;
use crate::payment::poster;

pub async fn import_tsv(
    api: &impl FishApi,
    org: OrgId,
    file: &Path,
    offset_account: AccountId,
    dry_run: bool,
) -> Result<(), Error> {
    println!("File: {}", file.display());

    if dry_run {
        return dry_run_listing(file, offset_account);
    }

    let batch = GenericImport::open(file, offset_account)?;
    let report = poster::post_batch(api, org, batch).await;
    report.print_summary();
    report.into_result()
}

fn dry_run_listing(file: &Path, offset_account: AccountId) -> Result<(), Error> {
    println!("[DRY RUN] Would post the following:");

    let mut parsed = 0;
    let mut failed = 0;
    for item in GenericImport::open(file, offset_account)? {
        match item {
            Ok((row, payload)) => {
                parsed += 1;
                let t = &payload.transaction;
                println!("  row {}: {} | {}", row, t.date, t.description);
                for li in &payload.line_items {
                    println!(
                        "       acct:{:<6} DR {:>10}  CR {:>10}",
                        li.account_id, li.debit, li.credit
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("  {} {}", "INVALID".red(), e);
            }
        }
    }

    println!();
    println!("Parsed {} transactions ({} errors)", parsed, failed);

    if failed > 0 {
        return Err(Error::BatchFailed {
            failed,
            attempted: parsed + failed,
        });
    }

    Ok(())
}
