use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime;

/// A single ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub partner: String,
    pub description: String,
    pub amount: f64,
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
    pub created_timestamp: i64,
    pub updated_timestamp: i64,
}

/// Client supplied fields of a new transaction.
/// The identifier and all timestamps are assigned by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub partner: String,
    pub description: String,
    pub amount: f64,
}

/// Partial update of a transaction. Fields left as `None`
/// keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionPatch {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub partner: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

impl Transaction {
    /// Build a fresh transaction with creation and update stamps set to `at`.
    pub fn create(id: u64, new: NewTransaction, at: DateTime<Utc>) -> Self {
        let iso = datetime::iso(at);
        let millis = at.timestamp_millis();
        Transaction {
            id,
            date: new.date,
            kind: new.kind,
            partner: new.partner,
            description: new.description,
            amount: new.amount,
            deleted: false,
            created_at: iso.clone(),
            updated_at: iso,
            created_timestamp: millis,
            updated_timestamp: millis,
        }
    }

    /// Merge the supplied fields into this transaction.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(partner) = patch.partner {
            self.partner = partner;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }

    /// Refresh the update stamps. Creation stamps are never touched.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = datetime::iso(at);
        self.updated_timestamp = at.timestamp_millis();
    }
}
