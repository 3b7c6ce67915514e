use anyhow::Result;
use clap::Args;

use sheetbook_db::SheetLedger;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct InspectSheet {
    /// Print rows as JSON arrays
    #[clap(long)]
    pub json: bool,
}

impl InspectSheet {
    /// Run the command and dump the raw sheet
    pub async fn run(self, db: &SheetLedger) -> Result<()> {
        let rows = db.inspect().await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!("{} rows.", rows.len());
            rows.print_formatted();
        }
        Ok(())
    }
}
