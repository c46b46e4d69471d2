use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single cell value in the grid.
///
/// Missing data is represented explicitly by `Scalar::Missing` rather than by
/// omission or a sentinel, so "zero" and "absent" are never confused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Text(String),
    Missing,
}

impl Scalar {
    /// Returns the numeric value for `Int` and `Float` scalars, `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Scalar::Missing)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "boolean",
            Scalar::Timestamp(_) => "timestamp",
            Scalar::Text(_) => "text",
            Scalar::Missing => "missing",
        }
    }

    /// Converts a raw JSON value into a typed scalar. `null` becomes `Missing`;
    /// nested arrays/objects are flattened to their JSON text form since the
    /// grid model is strictly scalar.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Scalar::Missing,
            serde_json::Value::Bool(b) => Scalar::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else {
                    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => Scalar::Timestamp(ts.with_timezone(&Utc)),
                Err(_) => Scalar::Text(s.clone()),
            },
            other => Scalar::Text(other.to_string()),
        }
    }

    /// A hashable identity for duplicate detection. Floats are keyed by their
    /// bit pattern, which makes the key total even in the presence of NaN.
    pub fn key(&self) -> ScalarKey {
        match self {
            Scalar::Int(v) => ScalarKey::Int(*v),
            Scalar::Float(v) => ScalarKey::Float(v.to_bits()),
            Scalar::Bool(v) => ScalarKey::Bool(*v),
            Scalar::Timestamp(v) => ScalarKey::Timestamp(v.timestamp_millis()),
            Scalar::Text(v) => ScalarKey::Text(v.clone()),
            Scalar::Missing => ScalarKey::Missing,
        }
    }

    /// Total ordering used for sorting rows by a column.
    ///
    /// `Missing` compares below every present value, numerics compare by value
    /// across `Int`/`Float`, and distinct variants fall back to a fixed rank so
    /// the ordering never panics on mixed columns.
    pub fn compare(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Missing, Scalar::Missing) => Ordering::Equal,
            (Scalar::Missing, _) => Ordering::Less,
            (_, Scalar::Missing) => Ordering::Greater,
            (a, b) if a.is_numeric() && b.is_numeric() => {
                // as_f64 is Some for both sides here
                let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                x.total_cmp(&y)
            }
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a.cmp(b),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            (a, b) => a.variant_rank().cmp(&b.variant_rank()),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Scalar::Missing => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int(_) | Scalar::Float(_) => 2,
            Scalar::Timestamp(_) => 3,
            Scalar::Text(_) => 4,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            // Equality is value-based across the two numeric representations,
            // so a filter criterion of `Int(5)` matches a stored `Float(5.0)`.
            (a, b) if a.is_numeric() && b.is_numeric() => a.as_f64() == b.as_f64(),
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Missing, Scalar::Missing) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Scalar::Text(v) => write!(f, "{}", v),
            Scalar::Missing => write!(f, ""),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// The hashable counterpart of `Scalar`, used to detect duplicate records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Timestamp(i64),
    Text(String),
    Missing,
}
