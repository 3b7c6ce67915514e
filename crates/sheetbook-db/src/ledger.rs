use anyhow::Result;
use async_trait::async_trait;

use sheetbook_domain::{datetime, LedgerSnapshot, Load, Save, LEDGER_VERSION};

use crate::{codec, Row, RowRange, RowStore};

/// The ledger kept in a sheet: one header row, then one row per
/// transaction, soft deleted ones included.
///
/// Every save replaces the whole sheet. Concurrent writers are not
/// coordinated, the last save wins.
pub struct SheetLedger {
    store: Box<dyn RowStore>,
}

impl SheetLedger {
    pub fn new(store: impl RowStore + 'static) -> Self {
        SheetLedger {
            store: Box::new(store),
        }
    }

    async fn fetch(&self) -> Result<LedgerSnapshot> {
        let rows = self.store.read_rows(RowRange::DATA).await?;
        tracing::debug!(rows = rows.len(), "read ledger rows");

        let decoded: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| codec::decode(row, index))
            .collect();

        // Deleted ids count too, they must never be handed out again.
        let next_id = decoded.iter().map(|tx| tx.id).max().unwrap_or(0).saturating_add(1);
        let transactions = decoded.into_iter().filter(|tx| !tx.deleted).collect();

        Ok(LedgerSnapshot {
            transactions,
            next_id,
            last_updated: datetime::now_iso(),
            version: LEDGER_VERSION.to_string(),
        })
    }

    async fn replace(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let rows: Vec<Row> = snapshot.transactions.iter().map(codec::encode).collect();

        self.store.clear_rows(RowRange::ALL).await?;
        self.store
            .write_rows(RowRange::HEADER, vec![codec::header()])
            .await?;
        if !rows.is_empty() {
            self.store.write_rows(RowRange::DATA, rows).await?;
        }
        Ok(())
    }

    /// Read the raw sheet, header included, and log every row.
    /// Nothing is written.
    pub async fn inspect(&self) -> Result<Vec<Row>> {
        if !self.store.is_available() {
            return Ok(Vec::new());
        }
        let rows = self.store.read_rows(RowRange::ALL).await?;
        tracing::info!(rows = rows.len(), "raw sheet contents");
        for (i, row) in rows.iter().enumerate() {
            tracing::info!(row = i + 1, cells = ?row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl Load for SheetLedger {
    async fn load(&self) -> LedgerSnapshot {
        if !self.store.is_available() {
            return LedgerSnapshot::empty();
        }
        match self.fetch().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(error = %err, "could not load ledger");
                LedgerSnapshot::empty()
            }
        }
    }
}

#[async_trait]
impl Save for SheetLedger {
    async fn save(&self, snapshot: &LedgerSnapshot) -> bool {
        if !self.store.is_available() {
            return false;
        }
        match self.replace(snapshot).await {
            Ok(()) => {
                tracing::info!(
                    transactions = snapshot.transactions.len(),
                    "saved ledger"
                );
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "could not save ledger");
                false
            }
        }
    }
}
