mod cli;
mod error;
mod fish;
mod import;
mod payment;

use clap::Parser;
use colored::Colorize;

use cli::{command, Cli, Commands};
use error::AppError;
use fish::credentials::Credentials;
use fish::FishClient;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let credentials = Credentials::load(cli.credentials.as_deref())?;
    let client = FishClient::new(credentials);
    let org = cli.org;

    match cli.command {
        Commands::Businesses {} => command::list::businesses(&client).await,
        Commands::Accounts {} => command::list::accounts(&client, org).await,
        Commands::Vendors {} => command::list::vendors(&client, org).await,
        Commands::Customers {} => command::list::customers(&client, org).await,
        Commands::FiscalYears {} => command::list::fiscal_years(&client, org).await,
        Commands::Transactions { fy } => {
            command::list::transactions(&client, org, fy.as_deref()).await
        }
        Commands::Reports {
            report_type,
            fy,
            as_of,
            account_id,
        } => command::reports::reports(&client, org, report_type, fy.as_deref(), as_of, account_id)
            .await,
        Commands::Dashboard {} => command::reports::dashboard(&client, org).await,
        Commands::PostTxn {
            transaction_type,
            date,
            desc,
            lines,
            reference,
            vendor,
            customer,
        } => {
            command::post_txn(
                &client,
                org,
                transaction_type,
                date,
                &desc,
                &lines,
                reference,
                vendor,
                customer,
            )
            .await
        }
        Commands::ImportTsv {
            offset_account,
            dry_run,
            file,
        } => command::import_tsv(&client, org, &file, offset_account, dry_run).await,
        Commands::ImportReport {
            desc,
            payable_account,
            dry_run,
            yes,
            file,
        } => {
            command::import_report(&client, org, &file, &desc, payable_account, dry_run, yes).await
        }
        Commands::PayBill {
            date,
            desc,
            lines,
            vendor,
            reference,
            payment_date,
            cash_account,
            payable_account,
            dry_run,
        } => {
            command::pay_bill(
                &client,
                org,
                date,
                &desc,
                &lines,
                vendor,
                reference,
                payment_date,
                cash_account,
                payable_account,
                dry_run,
            )
            .await
        }
        Commands::ApplyPayment {
            payment_id,
            bill_id,
            amount,
            date,
        } => command::apply_payment(&client, org, payment_id, bill_id, amount, date).await,
        Commands::PaymentApplications { txn_id } => {
            command::payment_applications(&client, org, txn_id).await
        }
        Commands::PaymentStatus { ids } => command::payment_status(&client, org, &ids).await,
    }
}
