//! Mapping between [`Transaction`]s and untyped sheet rows.
//!
//! Decoding is total: a sheet cannot enforce a schema, so every
//! malformed or missing cell resolves to a fixed default instead
//! of an error. All fallback rules live in this module.

use chrono::{DateTime, Utc};

use sheetbook_domain::{datetime, Transaction};

use crate::{Cell, Row};

/// Column names of the header row, in storage order.
pub const COLUMNS: [&str; 11] = [
    "id",
    "date",
    "type",
    "partner",
    "description",
    "amount",
    "deleted",
    "createdAt",
    "updatedAt",
    "createdTimestamp",
    "updatedTimestamp",
];

/// The header row written above the data rows.
pub fn header() -> Row {
    COLUMNS.iter().map(|name| Cell::text(*name)).collect()
}

/// Decode a row found at `index` (0-based, counted from the first data row).
pub fn decode(row: &[Cell], index: usize) -> Transaction {
    decode_at(row, index, Utc::now())
}

/// Decode a row, using `now` for missing timestamps.
///
/// A row without a usable identifier gets `index + 1`, so such
/// identifiers are only as stable as the row order.
pub fn decode_at(row: &[Cell], index: usize, now: DateTime<Utc>) -> Transaction {
    let cell = |i: usize| row.get(i).unwrap_or(&Cell::Empty);

    Transaction {
        id: parse_id(cell(0)).unwrap_or(index as u64 + 1),
        date: parse_text(cell(1)),
        kind: parse_text(cell(2)),
        partner: parse_text(cell(3)),
        description: parse_text(cell(4)),
        amount: parse_amount(cell(5)),
        deleted: parse_deleted(cell(6)),
        created_at: parse_iso(cell(7)).unwrap_or_else(|| datetime::iso(now)),
        updated_at: parse_iso(cell(8)).unwrap_or_else(|| datetime::iso(now)),
        created_timestamp: parse_millis(cell(9)).unwrap_or_else(|| now.timestamp_millis()),
        updated_timestamp: parse_millis(cell(10)).unwrap_or_else(|| now.timestamp_millis()),
    }
}

/// Encode a transaction into a full row in [`COLUMNS`] order.
pub fn encode(tx: &Transaction) -> Row {
    if tx.id == 0 {
        tracing::warn!(partner = %tx.partner, "writing transaction without a valid id");
    }
    vec![
        Cell::Number(tx.id as f64),
        Cell::text(&tx.date),
        Cell::text(&tx.kind),
        Cell::text(&tx.partner),
        Cell::text(&tx.description),
        Cell::Number(tx.amount),
        Cell::Bool(tx.deleted),
        Cell::text(&tx.created_at),
        Cell::text(&tx.updated_at),
        Cell::Number(tx.created_timestamp as f64),
        Cell::Number(tx.updated_timestamp as f64),
    ]
}

/// Largest identifier a number cell holds exactly (2^53).
pub const MAX_ID: u64 = 1 << 53;

fn whole(n: f64) -> Option<u64> {
    (n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n <= MAX_ID as f64).then_some(n as u64)
}

/// Identifiers must be positive whole numbers up to [`MAX_ID`].
fn parse_id(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Number(n) => whole(*n),
        Cell::Text(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(id) => Some(id).filter(|id| (1..=MAX_ID).contains(id)),
                Err(_) => s.parse::<f64>().ok().and_then(whole),
            }
        }
        _ => None,
    }
}

fn parse_text(cell: &Cell) -> String {
    cell.display()
}

fn parse_amount(cell: &Cell) -> f64 {
    let amount = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

fn parse_deleted(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Text(s) => s == "TRUE",
        _ => false,
    }
}

fn parse_iso(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn parse_millis(cell: &Cell) -> Option<i64> {
    let millis = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(millis) => return Some(millis),
                Err(_) => s.parse::<f64>().ok()?,
            }
        }
        _ => return None,
    };
    millis.is_finite().then_some(millis.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn well_formed() -> Row {
        vec![
            Cell::Number(5.0),
            Cell::text("2024-01-01"),
            Cell::text("expense"),
            Cell::text("Alice"),
            Cell::text("lunch"),
            Cell::Number(12.5),
            Cell::Bool(false),
            Cell::text("2024-01-01T10:00:00.000Z"),
            Cell::text("2024-01-02T10:00:00.000Z"),
            Cell::Number(1704103200000.0),
            Cell::Number(1704189600000.0),
        ]
    }

    #[test]
    fn test_header() {
        let header = header();
        assert_eq!(header.len(), 11);
        assert_eq!(header[0], Cell::text("id"));
        assert_eq!(header[10], Cell::text("updatedTimestamp"));
    }

    #[test]
    fn test_numeric_id_ignores_index() {
        for index in [0, 3, 99] {
            assert_eq!(decode_at(&[Cell::Number(5.0)], index, now()).id, 5);
            assert_eq!(decode_at(&[Cell::text("17")], index, now()).id, 17);
            assert_eq!(decode_at(&[Cell::text(" 8 ")], index, now()).id, 8);
        }
    }

    #[test]
    fn test_missing_id_falls_back_to_position() {
        let rows: Vec<Row> = vec![
            vec![],
            vec![Cell::Empty],
            vec![Cell::text("")],
            vec![Cell::text("abc")],
            vec![Cell::Bool(true)],
            vec![Cell::Number(0.0)],
            vec![Cell::Number(-3.0)],
            vec![Cell::Number(2.5)],
        ];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(decode_at(row, i + 10, now()).id, i as u64 + 11, "row {:?}", row);
        }
    }

    #[test]
    fn test_huge_id_falls_back_to_position() {
        let rows: Vec<Row> = vec![
            vec![Cell::text("18446744073709551615")],
            vec![Cell::text("9007199254740993")],
            vec![Cell::text("1e20")],
            vec![Cell::Number(1e20)],
            vec![Cell::Number(18446744073709551615.0)],
        ];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(decode_at(row, i, now()).id, i as u64 + 1, "row {:?}", row);
        }
        assert_eq!(decode_at(&[Cell::Number(MAX_ID as f64)], 0, now()).id, MAX_ID);
        assert_eq!(decode_at(&[Cell::text("9007199254740992")], 0, now()).id, MAX_ID);
    }

    #[test]
    fn test_scenario_row() {
        let row = vec![
            Cell::Number(5.0),
            Cell::text("2024-01-01"),
            Cell::text("expense"),
            Cell::text("Alice"),
            Cell::text("lunch"),
            Cell::text("12.50"),
            Cell::text("FALSE"),
        ];
        let tx = decode_at(&row, 0, now());
        assert_eq!(tx.id, 5);
        assert_eq!(tx.amount, 12.5);
        assert!(!tx.deleted);
        assert_eq!(tx.kind, "expense");
        assert_eq!(tx.partner, "Alice");
    }

    #[test]
    fn test_defaults_for_empty_row() {
        let tx = decode_at(&[], 0, now());
        assert_eq!(tx.id, 1);
        assert_eq!(tx.date, "");
        assert_eq!(tx.kind, "");
        assert_eq!(tx.partner, "");
        assert_eq!(tx.description, "");
        assert_eq!(tx.amount, 0.0);
        assert!(!tx.deleted);
        assert_eq!(tx.created_at, "2024-03-01T08:00:00.000Z");
        assert_eq!(tx.updated_at, "2024-03-01T08:00:00.000Z");
        assert_eq!(tx.created_timestamp, now().timestamp_millis());
        assert_eq!(tx.updated_timestamp, now().timestamp_millis());
    }

    #[test]
    fn test_amount_defaults() {
        let amount = |cell: Cell| {
            let mut row = vec![Cell::Empty; 5];
            row.push(cell);
            decode_at(&row, 0, now()).amount
        };
        assert_eq!(amount(Cell::text("-3.25")), -3.25);
        assert_eq!(amount(Cell::text("twelve")), 0.0);
        assert_eq!(amount(Cell::text("NaN")), 0.0);
        assert_eq!(amount(Cell::Bool(true)), 0.0);
        assert_eq!(amount(Cell::Empty), 0.0);
    }

    #[test]
    fn test_deleted_flag() {
        let deleted = |cell: Cell| {
            let mut row = vec![Cell::Empty; 6];
            row.push(cell);
            decode_at(&row, 0, now()).deleted
        };
        assert!(deleted(Cell::text("TRUE")));
        assert!(deleted(Cell::Bool(true)));
        assert!(!deleted(Cell::text("true")));
        assert!(!deleted(Cell::text("FALSE")));
        assert!(!deleted(Cell::Bool(false)));
        assert!(!deleted(Cell::text("")));
        assert!(!deleted(Cell::Number(1.0)));
    }

    #[test]
    fn test_timestamp_text_is_parsed() {
        let mut row = vec![Cell::Empty; 9];
        row.push(Cell::text("1704103200000"));
        row.push(Cell::text("garbage"));
        let tx = decode_at(&row, 0, now());
        assert_eq!(tx.created_timestamp, 1704103200000);
        assert_eq!(tx.updated_timestamp, now().timestamp_millis());
    }

    #[test]
    fn test_round_trip_well_formed() {
        let row = well_formed();
        assert_eq!(encode(&decode_at(&row, 7, now())), row);
    }

    #[test]
    fn test_encode_layout() {
        let tx = decode_at(&well_formed(), 0, now());
        let row = encode(&Transaction { deleted: true, ..tx });
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], Cell::Number(5.0));
        assert_eq!(row[6], Cell::Bool(true));
    }
}
