//! Listing commands: single GET, fixed-width table output.

use crate::error::AppError as Error;
use crate::fish::model::OrgId;
use crate::fish::FishClient;

pub async fn businesses(client: &FishClient) -> Result<(), Error> {
    let businesses = client.businesses().await?;

    println!("{:<6} {:<30} {:<15} {}", "ID", "Name", "Type", "FY Start");
    println!("{}", "-".repeat(70));
    for b in businesses {
        println!(
            "{:<6} {:<30} {:<15} {}",
            b.id,
            b.name,
            b.entity_type.unwrap_or_default(),
            b.fiscal_year_start.unwrap_or_default()
        );
    }

    Ok(())
}

pub async fn accounts(client: &FishClient, org: OrgId) -> Result<(), Error> {
    let accounts = client.accounts(org).await?;

    println!(
        "{:<6} {:<10} {:<35} {:<15} {:>12}",
        "ID", "Number", "Name", "Type", "Balance"
    );
    println!("{}", "-".repeat(80));
    for a in accounts {
        println!(
            "{:<6} {:<10} {:<35} {:<15} {:>12}",
            a.id,
            a.account_number.unwrap_or_default(),
            a.name,
            a.account_type.unwrap_or_default(),
            a.balance.map(|b| b.to_string()).unwrap_or_else(|| "0.00".to_string())
        );
    }

    Ok(())
}

pub async fn vendors(client: &FishClient, org: OrgId) -> Result<(), Error> {
    let vendors = client.vendors(org).await?;
    if vendors.is_empty() {
        println!("No vendors found.");
        return Ok(());
    }

    print_contacts(&vendors);
    Ok(())
}

pub async fn customers(client: &FishClient, org: OrgId) -> Result<(), Error> {
    let customers = client.customers(org).await?;
    if customers.is_empty() {
        println!("No customers found.");
        return Ok(());
    }

    print_contacts(&customers);
    Ok(())
}

fn print_contacts(contacts: &[crate::fish::model::Contact]) {
    println!("{:<6} {:<40} {}", "ID", "Name", "Contact");
    println!("{}", "-".repeat(70));
    for c in contacts {
        let contact = c
            .email
            .clone()
            .or_else(|| c.phone.clone())
            .unwrap_or_default();
        println!("{:<6} {:<40} {}", c.id, c.name, contact);
    }
}

pub async fn fiscal_years(client: &FishClient, org: OrgId) -> Result<(), Error> {
    let years = client.fiscal_years(org).await?;

    println!(
        "{:<6} {:<20} {:<12} {:<12} {}",
        "ID", "Label", "Start", "End", "Closed"
    );
    println!("{}", "-".repeat(60));
    for y in years {
        println!(
            "{:<6} {:<20} {:<12} {:<12} {}",
            y.id,
            y.label,
            y.start_date.map(|d| d.to_string()).unwrap_or_default(),
            y.end_date.map(|d| d.to_string()).unwrap_or_default(),
            if y.is_closed { "Y" } else { "N" }
        );
    }

    Ok(())
}

pub async fn transactions(
    client: &FishClient,
    org: OrgId,
    fiscal_year: Option<&str>,
) -> Result<(), Error> {
    let (transactions, count) = client.transactions(org, fiscal_year).await?;

    println!(
        "Transactions: {}",
        count.unwrap_or(transactions.len() as u64)
    );
    println!(
        "{:<6} {:<12} {:<18} {:<35} {:<15} {}",
        "ID", "Date", "Type", "Description", "Ref", "Posted"
    );
    println!("{}", "-".repeat(100));
    for t in transactions {
        println!(
            "{:<6} {:<12} {:<18} {:<35} {:<15} {}",
            t.id,
            t.date,
            t.transaction_type.unwrap_or_default(),
            t.description,
            t.reference.unwrap_or_default(),
            if t.is_posted { "Y" } else { "N" }
        );
        for li in &t.line_items {
            println!(
                "       acct:{:<15} DR {:>10}  CR {:>10}  {}",
                li.account_id,
                li.debit,
                li.credit,
                li.description.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}
