use async_trait::async_trait;

use crate::LedgerSnapshot;

/// Fetch a fresh snapshot of the whole ledger.
///
/// Implementations never fail: when the store cannot be reached
/// an empty snapshot is returned instead.
#[async_trait]
pub trait Load {
    async fn load(&self) -> LedgerSnapshot;
}

/// Replace the stored ledger with the given snapshot.
///
/// Returns `true` if the snapshot was persisted.
#[async_trait]
pub trait Save {
    async fn save(&self, snapshot: &LedgerSnapshot) -> bool;
}
