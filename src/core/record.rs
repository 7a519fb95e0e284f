//! Flat records: ordered field name → scalar maps, straight from JSON.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One flat row.  Field order is kept so output reads like the input.
pub type Record = IndexMap<String, Scalar>;

/// A single JSON leaf value.  Numbers keep their original representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Numeric view used by the plot.  Text is parsed, never coerced on output.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => lexical_core::parse::<f64>(s.trim().as_bytes()).ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v).map_or(Self::Null, Self::Number)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Build a [`Record`] from `(name, value)` pairs, keeping their order.
pub fn record<K, V, I>(fields: I) -> Record
where
    K: Into<String>,
    V: Into<Scalar>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_scalars_parse_in_field_order() {
        let rec: Record =
            serde_json::from_str(r#"{"b": 1, "a": "x", "c": null, "d": true, "e": 0.25}"#)
                .unwrap();
        let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c", "d", "e"]);
        assert_eq!(rec["b"], Scalar::from(1_i64));
        assert_eq!(rec["a"], Scalar::from("x"));
        assert_eq!(rec["c"], Scalar::Null);
        assert_eq!(rec["d"], Scalar::Bool(true));
        assert_eq!(rec["e"].as_f64(), Some(0.25));
    }

    #[test]
    fn numbers_keep_their_representation() {
        let rec: Record = serde_json::from_str(r#"{"n": 3}"#).unwrap();
        assert_eq!(serde_json::to_string(&rec).unwrap(), r#"{"n":3}"#);
    }

    #[test]
    fn numeric_view_parses_text() {
        assert_eq!(Scalar::from(" 0.5 ").as_f64(), Some(0.5));
        assert_eq!(Scalar::from("up").as_f64(), None);
        assert_eq!(Scalar::Null.as_f64(), None);
        assert_eq!(Scalar::from(f64::NAN), Scalar::Null);
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"a": [1, 2]}"#).is_err());
    }
}
