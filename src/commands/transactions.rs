use anyhow::Result;
use clap::Args;

use sheetbook_db::SheetLedger;
use sheetbook_domain::{self as ledger, NewTransaction, TransactionPatch};

use crate::formatting::PrintFormatted;

/// Parse an amount, rejecting NaN and infinities
pub fn parse_amount(value: &str) -> Result<f64, String> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount `{}`", value))?;
    if !amount.is_finite() {
        return Err(format!("amount must be a finite number, got `{}`", value));
    }
    Ok(amount)
}

#[derive(Args, Debug)]
pub struct ListTransactions {
    /// Only show transactions with this partner
    #[clap(short, long)]
    pub partner: Option<String>,
    /// Only show transactions of this type
    #[clap(short = 't', long = "type")]
    pub kind: Option<String>,
}

impl ListTransactions {
    /// Run the command and list transactions
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let transactions: Vec<_> = ledger::list(db)
            .await
            .into_iter()
            .filter(|tx| self.partner.as_ref().map_or(true, |p| &tx.partner == p))
            .filter(|tx| self.kind.as_ref().map_or(true, |k| &tx.kind == k))
            .collect();

        println!("{} transactions.", transactions.len());
        transactions.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowTransaction {
    #[clap(short, long)]
    pub id: u64,
}

impl ShowTransaction {
    /// Run the command and show a transaction
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let tx = ledger::get(db, self.id).await?;
        println!();
        tx.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTransaction {
    #[clap(short, long, default_value = "")]
    pub date: String,
    #[clap(short = 't', long = "type", default_value = "")]
    pub kind: String,
    #[clap(short, long, default_value = "")]
    pub partner: String,
    #[clap(short = 'c', long, default_value = "")]
    pub description: String,
    #[clap(
        short,
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = parse_amount
    )]
    pub amount: f64,
}

impl AddTransaction {
    /// Run the command and append a transaction to the ledger
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let new = NewTransaction {
            date: self.date,
            kind: self.kind,
            partner: self.partner,
            description: self.description,
            amount: self.amount,
        };
        let tx = ledger::create(db, new).await?;

        println!("Added transaction {}.", tx.id);
        println!();
        tx.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateTransaction {
    #[clap(short, long)]
    pub id: u64,
    #[clap(short, long)]
    pub date: Option<String>,
    #[clap(short = 't', long = "type")]
    pub kind: Option<String>,
    #[clap(short, long)]
    pub partner: Option<String>,
    #[clap(short = 'c', long)]
    pub description: Option<String>,
    #[clap(short, long, allow_negative_numbers = true, value_parser = parse_amount)]
    pub amount: Option<f64>,
}

impl UpdateTransaction {
    /// Run the command and update a transaction
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let old = ledger::get(db, self.id).await?;
        let patch = TransactionPatch {
            date: self.date,
            kind: self.kind,
            partner: self.partner,
            description: self.description,
            amount: self.amount,
        };
        let new = ledger::update(db, self.id, patch).await?;

        println!();
        (old, new).print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTransaction {
    #[clap(short, long)]
    pub id: u64,
}

impl DeleteTransaction {
    /// Run the command and soft delete a transaction
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let tx = ledger::delete(db, self.id).await?;
        println!("Deleted transaction {}.", tx.id);
        Ok(())
    }
}
