use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a cell value read from (or written to) a workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null or the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Whether the value counts as filled in: not null, not `""`, not a
    /// zero or NaN number and not `false`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0 && !f.is_nan(),
            CellValue::String(s) => !s.is_empty(),
        }
    }

    /// Try to get the value as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::String(s) => s.trim().parse().ok(),
            CellValue::Null => None,
        }
    }

    /// Coerce the value to a finite number.
    ///
    /// Numeric-looking strings are parsed as base-10 numbers after trimming;
    /// anything else (including `NaN`/`inf` spellings and the empty string)
    /// becomes `0.0`.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        let n = match self {
            CellValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            other => other.as_float().unwrap_or(0.0),
        };

        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    /// Render the value as text (null becomes the empty string).
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            // f64 Display already drops a trailing ".0"
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}
