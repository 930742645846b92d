//! Import an expense report TSV as a single transaction with N line items.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use crate::error::AppError as Error;
use crate::fish::model::{AccountId, OrgId};
use crate::fish::FishApi;
use crate::import::report::{parse_report, ParsedReport};
use crate::payment::poster;

pub async fn import_report(
    api: &impl FishApi,
    org: OrgId,
    file: &Path,
    description: &str,
    payable_account: AccountId,
    dry_run: bool,
    assume_yes: bool,
) -> Result<(), Error> {
    let report = parse_report(file, description, payable_account)?;

    if !report.errors.is_empty() {
        eprintln!("{} ({}):", "Errors".red(), report.errors.len());
        for e in &report.errors {
            eprintln!("  {}", e);
        }
    }

    let payload = match &report.payload {
        Some(payload) => payload,
        None => {
            return Err(Error::BatchFailed {
                failed: report.errors.len(),
                attempted: report.errors.len(),
            })
        }
    };

    print_preview(&report, description);

    if dry_run {
        println!("[DRY RUN] Would post the above transaction.");
        println!("{}", serde_json::to_string_pretty(payload)?);
        return exit_status(&report);
    }

    if !report.errors.is_empty() && !assume_yes && !confirm_partial(&report)? {
        return Err(Error::AbortError);
    }

    let id = poster::post_transaction(api, org, payload).await?;
    println!(
        "Created transaction ID {}: {}",
        id, payload.transaction.description
    );

    exit_status(&report)
}

fn print_preview(report: &ParsedReport, description: &str) {
    let lines = report.expense_lines();
    println!("Expense report: {}", description);
    println!(
        "Date: {} | Lines: {} ({} debits + 1 credit)",
        report
            .payload
            .as_ref()
            .map(|p| p.transaction.date.to_string())
            .unwrap_or_default(),
        lines.len() + 1,
        lines.len()
    );
    println!("Total: ${}", report.total());
    println!();

    for li in lines {
        println!(
            "  DR {:>10}  acct:{:<4}  {}",
            li.debit,
            li.account_id,
            li.description.as_deref().unwrap_or_default()
        );
    }
    if let Some(payload) = &report.payload {
        if let Some(credit) = payload.line_items.last() {
            println!(
                "  CR {:>10}  acct:{:<4}  {}",
                credit.credit,
                credit.account_id,
                credit.description.as_deref().unwrap_or_default()
            );
        }
    }
    println!();
}

fn confirm_partial(report: &ParsedReport) -> Result<bool, Error> {
    println!(
        "{} {} row(s) failed to parse and will be left out.",
        "WARNING".red(),
        report.errors.len()
    );
    Confirm::new()
        .with_prompt("Post the valid lines anyway?")
        .interact()
        .map_err(|_| Error::AbortError)
}

// the exit code reflects skipped rows even when the post succeeded
fn exit_status(report: &ParsedReport) -> Result<(), Error> {
    if report.errors.is_empty() {
        Ok(())
    } else {
        Err(Error::BatchFailed {
            failed: report.errors.len(),
            attempted: report.expense_lines().len() + report.errors.len(),
        })
    }
}
