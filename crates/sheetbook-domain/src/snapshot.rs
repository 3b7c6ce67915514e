use serde::{Deserialize, Serialize};

use crate::{datetime, Transaction};

/// Schema marker carried by every snapshot.
pub const LEDGER_VERSION: &str = "1.0";

/// Point-in-time copy of the ledger, used for exactly one
/// load, mutate, save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    pub next_id: u64,
    pub last_updated: String,
    pub version: String,
}

impl LedgerSnapshot {
    /// The snapshot of a store without any rows.
    pub fn empty() -> Self {
        LedgerSnapshot {
            transactions: Vec::new(),
            next_id: 1,
            last_updated: datetime::now_iso(),
            version: LEDGER_VERSION.to_string(),
        }
    }

    /// Find a transaction by identifier.
    pub fn find(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Find a transaction by identifier for mutation.
    pub fn find_mut(&mut self, id: u64) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|tx| tx.id == id)
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LedgerSnapshot::empty();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.next_id, 1);
        assert_eq!(snapshot.version, "1.0");
    }

    #[test]
    fn test_find() {
        let mut snapshot = LedgerSnapshot::empty();
        snapshot.transactions.push(Transaction {
            id: 4,
            ..Default::default()
        });
        assert!(snapshot.find(4).is_some());
        assert!(snapshot.find(5).is_none());

        snapshot.find_mut(4).unwrap().amount = 2.0;
        assert_eq!(snapshot.find(4).unwrap().amount, 2.0);
    }
}
