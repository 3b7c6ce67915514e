use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use sheetbook_db::{connection, SheetLedger, SheetsClient, SheetsConfig};

use crate::commands::{
    AddTransaction,
    DeleteTransaction,
    InspectSheet,
    ListTransactions,
    ShowTransaction,
    UpdateTransaction,
};
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[clap(name = "sheetbook", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(flatten)]
    pub store: StoreArgs,

    #[clap(long, value_enum, env = "LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List transactions
    #[clap(name = "list")]
    List(ListTransactions),
    /// Show a transaction
    #[clap(name = "show")]
    Show(ShowTransaction),
    /// Add a transaction
    #[clap(name = "add")]
    Add(AddTransaction),
    /// Update a transaction
    #[clap(name = "update")]
    Update(UpdateTransaction),
    /// Soft delete a transaction
    #[clap(name = "delete")]
    Delete(DeleteTransaction),
    /// Dump the raw sheet contents
    #[clap(name = "inspect")]
    Inspect(InspectSheet),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Google Sheets
    Sheets,
    /// A local SQLite file laid out like a sheet
    Sqlite,
}

#[derive(Args, Debug)]
pub struct StoreArgs {
    #[clap(long, value_enum, env = "LEDGER_BACKEND", default_value = "sheets", global = true)]
    pub backend: Backend,

    #[clap(long, env = "LEDGER_SQLITE_FILE", default_value = "ledger.sqlite3", global = true)]
    pub sqlite_file: String,

    #[clap(long, env = "SPREADSHEET_ID", global = true)]
    pub spreadsheet_id: Option<String>,

    #[clap(long, env = "SHEET_NAME", default_value = "Sheet1", global = true)]
    pub sheet_name: String,

    #[clap(long, env = "GOOGLE_SERVICE_ACCOUNT_EMAIL", global = true)]
    pub client_email: Option<String>,

    #[clap(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,

    #[clap(long, env = "GOOGLE_PRIVATE_KEY_ID", global = true)]
    pub private_key_id: Option<String>,

    #[clap(long, env = "GOOGLE_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    #[clap(long, env = "GOOGLE_CLIENT_ID", global = true)]
    pub client_id: Option<String>,
}

impl StoreArgs {
    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: self.spreadsheet_id.clone(),
            client_email: self.client_email.clone(),
            private_key: self.private_key.clone(),
            private_key_id: self.private_key_id.clone(),
            project_id: self.project_id.clone(),
            client_id: self.client_id.clone(),
            sheet_name: self.sheet_name.clone(),
        }
    }

    /// Open the ledger on the selected backend
    pub async fn open(&self) -> Result<SheetLedger> {
        let ledger = match self.backend {
            Backend::Sheets => SheetLedger::new(SheetsClient::new(self.sheets_config())?),
            Backend::Sqlite => SheetLedger::new(connection::open(&self.sqlite_file).await?),
        };
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "sheetbook",
            "--backend",
            "sqlite",
            "add",
            "--date",
            "2024-02-01",
            "--type",
            "income",
            "--partner",
            "Bob",
            "--amount",
            "100",
        ])
        .unwrap();

        assert_eq!(cli.store.backend, Backend::Sqlite);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.kind, "income");
                assert_eq!(cmd.amount, 100.0);
                assert_eq!(cmd.description, "");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_update_with_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sheetbook",
            "update",
            "--id",
            "6",
            "--amount=-3.5",
            "--sheet-name",
            "Ledger",
        ])
        .unwrap();

        assert_eq!(cli.store.sheet_name, "Ledger");
        match cli.command {
            Command::Update(cmd) => {
                assert_eq!(cmd.id, 6);
                assert_eq!(cmd.amount, Some(-3.5));
                assert_eq!(cmd.partner, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        for amount in ["nan", "inf", "-inf"] {
            let add = Cli::try_parse_from(["sheetbook", "add", "--amount", amount]);
            assert!(add.is_err(), "add accepted {}", amount);

            let update =
                Cli::try_parse_from(["sheetbook", "update", "--id", "1", "--amount", amount]);
            assert!(update.is_err(), "update accepted {}", amount);
        }
    }

    #[test]
    fn test_sheets_config_from_args() {
        let cli = Cli::try_parse_from([
            "sheetbook",
            "--spreadsheet-id",
            "abc",
            "--client-email",
            "ledger@example.com",
            "--private-key",
            "key",
            "list",
        ])
        .unwrap();
        let config = cli.store.sheets_config();
        assert_eq!(config.spreadsheet_id.as_deref(), Some("abc"));
        assert!(config.is_available());
    }
}
