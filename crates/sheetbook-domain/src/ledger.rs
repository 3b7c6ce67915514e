use chrono::Utc;
use thiserror::Error as ThisError;

use crate::{datetime, Load, NewTransaction, Save, Transaction, TransactionPatch};

/// Outcome of a failed ledger operation
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum LedgerError {
    #[error("Transaction {0} not found")]
    NotFound(u64),
    #[error("Ledger could not be persisted")]
    NotPersisted,
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// All visible transactions, in store order
pub async fn list<DB>(db: &DB) -> Vec<Transaction>
where
    DB: Load + Sync,
{
    db.load().await.transactions
}

/// Fetch a single visible transaction
pub async fn get<DB>(db: &DB, id: u64) -> LedgerResult<Transaction>
where
    DB: Load + Sync,
{
    db.load()
        .await
        .find(id)
        .cloned()
        .ok_or(LedgerError::NotFound(id))
}

/// Append a new transaction under the next free identifier.
pub async fn create<DB>(db: &DB, new: NewTransaction) -> LedgerResult<Transaction>
where
    DB: Load + Save + Sync,
{
    let now = Utc::now();
    let mut snapshot = db.load().await;

    let tx = Transaction::create(snapshot.next_id, new, now);
    snapshot.next_id = snapshot.next_id.saturating_add(1);
    snapshot.transactions.push(tx.clone());
    snapshot.last_updated = datetime::iso(now);

    if !db.save(&snapshot).await {
        return Err(LedgerError::NotPersisted);
    }
    tracing::debug!(id = tx.id, "transaction created");
    Ok(tx)
}

/// Merge the patch into an existing transaction.
/// Nothing is written when the transaction does not exist.
pub async fn update<DB>(db: &DB, id: u64, patch: TransactionPatch) -> LedgerResult<Transaction>
where
    DB: Load + Save + Sync,
{
    let now = Utc::now();
    let mut snapshot = db.load().await;

    let tx = snapshot.find_mut(id).ok_or(LedgerError::NotFound(id))?;
    tx.apply(patch);
    tx.touch(now);
    let tx = tx.clone();
    snapshot.last_updated = datetime::iso(now);

    if !db.save(&snapshot).await {
        return Err(LedgerError::NotPersisted);
    }
    tracing::debug!(id, "transaction updated");
    Ok(tx)
}

/// Mark a transaction as deleted. The row stays in the store
/// for this save but is hidden from every following load.
pub async fn delete<DB>(db: &DB, id: u64) -> LedgerResult<Transaction>
where
    DB: Load + Save + Sync,
{
    let now = Utc::now();
    let mut snapshot = db.load().await;

    let tx = snapshot.find_mut(id).ok_or(LedgerError::NotFound(id))?;
    tx.deleted = true;
    tx.touch(now);
    let tx = tx.clone();
    snapshot.last_updated = datetime::iso(now);

    if !db.save(&snapshot).await {
        return Err(LedgerError::NotPersisted);
    }
    tracing::debug!(id, "transaction deleted");
    Ok(tx)
}
