use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::Mutex;

use crate::{sqlite, Row};

/// Number of columns of a ledger row (A through K).
pub const WIDTH: usize = 11;
const LAST_COLUMN: char = 'K';

/// A block of whole rows, 1-based like sheet row numbers.
/// `last: None` extends to the end of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: u32,
    pub last: Option<u32>,
}

impl RowRange {
    /// The header row
    pub const HEADER: RowRange = RowRange { first: 1, last: Some(1) };
    /// All data rows below the header
    pub const DATA: RowRange = RowRange { first: 2, last: None };
    /// Header and data
    pub const ALL: RowRange = RowRange { first: 1, last: None };

    /// Range in A1 notation, e.g. `'Sheet1'!A2:K`
    pub fn a1(&self, sheet: &str) -> String {
        let sheet = sheet.replace('\'', "''");
        match self.last {
            Some(last) => format!("'{}'!A{}:{}{}", sheet, self.first, LAST_COLUMN, last),
            None => format!("'{}'!A{}:{}", sheet, self.first, LAST_COLUMN),
        }
    }

    pub fn contains(&self, row: u32) -> bool {
        row >= self.first && self.last.map_or(true, |last| row <= last)
    }
}

/// A row oriented store holding the ledger sheet.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Whether the minimal configuration to reach the store is present.
    /// No I/O may be attempted when this returns `false`.
    fn is_available(&self) -> bool {
        true
    }

    /// Read all rows in the range. Blank rows inside the range
    /// are returned empty, trailing blank rows are omitted.
    async fn read_rows(&self, range: RowRange) -> Result<Vec<Row>>;

    /// Remove all values in the range.
    async fn clear_rows(&self, range: RowRange) -> Result<()>;

    /// Write `rows` starting at the first row of the range.
    async fn write_rows(&self, range: RowRange, rows: Vec<Row>) -> Result<()>;
}

/// A thread safe connection to a local sheet database
pub type Connection = Arc<Mutex<SqliteConnection>>;

/// Open a local sheet database, creating it if missing
pub async fn open(filename: &str) -> Result<Connection> {
    let conn = SqliteConnectOptions::from_str(filename)?.create_if_missing(true);
    let conn = SqliteConnection::connect_with(&conn).await?;
    let conn = Arc::new(Mutex::new(conn));

    sqlite::install(&conn).await?;
    tracing::debug!(filename, "opened local sheet");
    Ok(conn)
}

#[cfg(test)]
pub struct TestHandle {
    filename: String,
}

#[cfg(test)]
impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = std::path::Path::new(&self.filename);
        if path.exists() {
            std::fs::remove_file(path).unwrap();
        }
    }
}

/// Open a new test sheet.
/// The database will be created on each open.
#[cfg(test)]
pub async fn open_test() -> (TestHandle, Connection) {
    let filename = format!("/tmp/sheetbook_test_{}.sqlite3", rand::random::<u64>());
    let handle = TestHandle {
        filename: filename.clone(),
    };
    let conn = open(&filename).await.unwrap();
    (handle, conn)
}
