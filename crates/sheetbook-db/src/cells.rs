use serde::{Deserialize, Serialize};

/// A single untyped cell value as exchanged with a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Number(f64),
    Text(String),
    Empty,
}

/// One sheet row. Trailing cells may be missing.
pub type Row = Vec<Cell>;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the cell the way a sheet would display it.
    pub fn display(&self) -> String {
        match self {
            Cell::Bool(true) => "TRUE".to_string(),
            Cell::Bool(false) => "FALSE".to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_from_json() {
        let row: Row = serde_json::from_str(r#"[5, "lunch", 12.5, true, null, ""]"#).unwrap();
        assert_eq!(
            row,
            vec![
                Cell::Number(5.0),
                Cell::text("lunch"),
                Cell::Number(12.5),
                Cell::Bool(true),
                Cell::Empty,
                Cell::text(""),
            ]
        );
    }

    #[test]
    fn test_cells_to_json() {
        let row: Row = vec![Cell::Number(5.0), "x".into(), false.into(), Cell::Empty];
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!([5.0, "x", false, null]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Number(1704067200000.0).display(), "1704067200000");
        assert_eq!(Cell::Number(12.5).display(), "12.5");
        assert_eq!(Cell::Bool(true).display(), "TRUE");
        assert_eq!(Cell::Empty.display(), "");
        assert!(Cell::text("").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }
}
