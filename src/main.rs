use anyhow::Result;

use sheetbook::cli::{Cli, Command};
use sheetbook::logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::init();
    logging::init(cli.log_format);

    let ledger = cli.store.open().await?;
    match cli.command {
        Command::List(cmd) => cmd.run(&ledger).await,
        Command::Show(cmd) => cmd.run(&ledger).await,
        Command::Add(cmd) => cmd.run(&ledger).await,
        Command::Update(cmd) => cmd.run(&ledger).await,
        Command::Delete(cmd) => cmd.run(&ledger).await,
        Command::Inspect(cmd) => cmd.run(&ledger).await,
    }?;

    Ok(())
}
