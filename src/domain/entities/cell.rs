use serde::{Deserialize, Serialize};

/// A single decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

/// One spreadsheet row, positional only.
pub type RawRow = Vec<CellValue>;

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Cells that carry no value: empty, empty text, zero, NaN or `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(v) => v.is_empty(),
            CellValue::Number(v) => *v == 0.0 || v.is_nan(),
            CellValue::Bool(v) => !v,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(v) => v.clone(),
            CellValue::Number(v) => format_number(*v),
            CellValue::Bool(v) => v.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Renders a number the way the spreadsheet shows it: integral values
/// without a fraction, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Converts a row of plain strings into cells, mostly for fixtures.
pub fn text_row<S: AsRef<str>>(values: &[S]) -> RawRow {
    values
        .iter()
        .map(|value| CellValue::from(value.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_follow_spreadsheet_truthiness() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("").is_blank());
        assert!(CellValue::Number(0.0).is_blank());
        assert!(!CellValue::text("0").is_blank());
        assert!(!CellValue::text(" ").is_blank());
        assert!(!CellValue::Number(12.0).is_blank());
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(CellValue::Number(100.0).as_text(), "100");
        assert_eq!(CellValue::Number(1234.5).as_text(), "1234.5");
        assert_eq!(CellValue::Number(-3.0).as_text(), "-3");
    }
}
