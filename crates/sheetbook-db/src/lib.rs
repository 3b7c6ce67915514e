
pub mod connection;
pub use connection::{
    Connection,
    RowRange,
    RowStore,
};

pub mod cells;
pub use cells::{Cell, Row};

pub mod codec;
pub mod config;
pub use config::SheetsConfig;

pub mod errors;
pub use errors::StoreError;

pub mod auth;
pub mod sheets;
pub use sheets::SheetsClient;

pub mod sqlite;

pub mod ledger;
pub use ledger::SheetLedger;
