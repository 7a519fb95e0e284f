//! Wide → long reshaping.
//!
//! A wide record stores one logical variable across several keys of the form
//! `"<variable> <direction>"`.  Reshaping emits one long record per such key:
//! the record's remaining ("shared") fields, a `direction` field holding the
//! suffix token, and a field named exactly `<variable>` holding the value.
//!
//! ```text
//! {id: 1, "v a": 10, "v b": 20}   ──"v"──▶   {id: 1, direction: "a", v: 10}
//!                                            {id: 1, direction: "b", v: 20}
//! ```
//!
//! Classification of keys happens once per schema ([`Pivot::resolve`]); the
//! per-record pass only looks keys up.  Records without any variant key yield
//! nothing and are counted in [`Reshaped::dropped`].

use indexmap::IndexMap;

use crate::core::{
    constants::DIRECTION_FIELD,
    record::{Record, Scalar},
};

/// How a field name is recognised as a variant of the target variable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchMode {
    /// `"<variable> <token>"` exactly: the text before the last space must
    /// equal the variable and the token must be non-empty.
    #[default]
    Prefix,
    /// Any field name containing the variable.  The direction is whatever
    /// follows the last space, which may be the whole name or empty.
    Contains,
}

/// Split a field name on its last space into `(prefix, token)`.
///
/// Returns `None` when there is no space or the token is empty.
#[inline]
#[must_use]
pub fn split_variant_key(key: &str) -> Option<(&str, &str)> {
    match key.rsplit_once(' ') {
        Some((prefix, token)) if !token.is_empty() => Some((prefix, token)),
        _ => None,
    }
}

/// Reshaped rows plus the number of input records that produced none.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reshaped {
    pub records: Vec<Record>,
    pub dropped: usize,
}

/// Pivot-eligible keys for one variable, resolved once per input schema.
#[derive(Clone, Debug)]
pub struct Pivot {
    variable: String,
    mode: MatchMode,
    /// variant key → direction token
    variants: IndexMap<String, String>,
}

impl Pivot {
    /// Scan the distinct field names of `records` and keep those that are
    /// variants of `variable`.
    #[must_use]
    pub fn resolve(records: &[Record], variable: &str, mode: MatchMode) -> Self {
        let mut variants = IndexMap::new();
        for key in records.iter().flat_map(|r| r.keys()) {
            if variants.contains_key(key) {
                continue;
            }
            if let Some(direction) = classify(key, variable, mode) {
                variants.insert(key.clone(), direction.to_owned());
            }
        }
        tracing::debug!(
            variable,
            ?mode,
            variant_keys = variants.len(),
            "resolved pivot schema"
        );
        Self {
            variable: variable.to_owned(),
            mode,
            variants,
        }
    }

    #[inline]
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Direction token for `key`, if it is a variant key of this schema.
    #[inline]
    #[must_use]
    pub fn direction_of(&self, key: &str) -> Option<&str> {
        self.variants.get(key).map(String::as_str)
    }

    /// Distinct directions in first-seen order.
    pub fn directions(&self) -> impl Iterator<Item = &str> {
        let mut seen = Vec::<&str>::new();
        self.variants.values().filter_map(move |d| {
            if seen.contains(&d.as_str()) {
                None
            } else {
                seen.push(d.as_str());
                Some(d.as_str())
            }
        })
    }

    /// Apply the pivot.  Inputs are left untouched.
    #[must_use]
    pub fn apply(&self, records: &[Record]) -> Reshaped {
        let mut out = Reshaped {
            records: Vec::with_capacity(records.len() * self.variants.len().max(1)),
            dropped: 0,
        };

        for (index, rec) in records.iter().enumerate() {
            let mut shared = Record::with_capacity(rec.len() + 2);
            let mut observations = Vec::<(&str, &Scalar)>::new();

            for (key, value) in rec {
                match self.direction_of(key) {
                    Some(direction) => observations.push((direction, value)),
                    None => {
                        shared.insert(key.clone(), value.clone());
                    }
                }
            }

            if observations.is_empty() {
                tracing::trace!(index, "record has no variant keys, dropped");
                out.dropped += 1;
                continue;
            }

            for (direction, value) in observations {
                let mut long = shared.clone();
                long.insert(DIRECTION_FIELD.to_owned(), Scalar::from(direction));
                long.insert(self.variable.clone(), value.clone());
                out.records.push(long);
            }
        }
        out
    }
}

fn classify<'k>(key: &'k str, variable: &str, mode: MatchMode) -> Option<&'k str> {
    match mode {
        MatchMode::Prefix => {
            split_variant_key(key).and_then(|(prefix, token)| (prefix == variable).then_some(token))
        }
        MatchMode::Contains => key
            .contains(variable)
            .then(|| key.rsplit(' ').next().unwrap_or(key)),
    }
}

/// Reshape with exact-prefix matching, discarding the drop count.
#[must_use]
pub fn reshape(records: &[Record], variable: &str) -> Vec<Record> {
    reshape_with(records, variable, MatchMode::Prefix).records
}

/// Reshape with an explicit match mode.
#[must_use]
pub fn reshape_with(records: &[Record], variable: &str, mode: MatchMode) -> Reshaped {
    Pivot::resolve(records, variable, mode).apply(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::record::record;

    fn wide(id: i64, pairs: &[(&str, i64)]) -> Record {
        let mut r = record([("id", id)]);
        for (k, v) in pairs {
            r.insert((*k).to_owned(), Scalar::from(*v));
        }
        r
    }

    #[test]
    fn order_is_preserved() {
        let input = vec![
            wide(1, &[("v a", 10), ("v b", 20)]),
            wide(2, &[("v a", 30)]),
        ];
        let expect = vec![
            record([
                ("id", Scalar::from(1_i64)),
                ("direction", "a".into()),
                ("v", 10_i64.into()),
            ]),
            record([
                ("id", Scalar::from(1_i64)),
                ("direction", "b".into()),
                ("v", 20_i64.into()),
            ]),
            record([
                ("id", Scalar::from(2_i64)),
                ("direction", "a".into()),
                ("v", 30_i64.into()),
            ]),
        ];
        let out = reshape(&input, "v");
        assert_eq!(out, expect);
        // IndexMap equality ignores order; check it explicitly.
        let keys: Vec<&str> = out[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "direction", "v"]);
    }

    #[test]
    fn multi_word_variable() {
        let input = vec![record([
            ("recipient generations direction1", Scalar::from(0.2)),
            ("recipient generations direction2", Scalar::from(0.5)),
            ("region", Scalar::from("X")),
        ])];
        let out = reshape(&input, "recipient generations");
        assert_eq!(
            out,
            vec![
                record([
                    ("region", Scalar::from("X")),
                    ("direction", "direction1".into()),
                    ("recipient generations", 0.2.into()),
                ]),
                record([
                    ("region", Scalar::from("X")),
                    ("direction", "direction2".into()),
                    ("recipient generations", 0.5.into()),
                ]),
            ]
        );
        let keys: Vec<&str> = out[1].keys().map(String::as_str).collect();
        assert_eq!(keys, ["region", "direction", "recipient generations"]);
    }

    #[test]
    fn records_without_variants_are_counted() {
        let input = vec![
            wide(1, &[("v a", 1)]),
            wide(2, &[("w a", 2)]),
            wide(3, &[]),
        ];
        let out = reshape_with(&input, "v", MatchMode::Prefix);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.dropped, 2);
    }

    #[test]
    fn prefix_mode_rejects_substring_hits() {
        let input = vec![record([
            ("average", Scalar::from(3_i64)),
            ("age young", 1_i64.into()),
            ("stage old", 2_i64.into()),
        ])];
        let prefix = reshape_with(&input, "age", MatchMode::Prefix);
        assert_eq!(prefix.records.len(), 1);
        assert_eq!(prefix.records[0]["average"], Scalar::from(3_i64));
        assert_eq!(prefix.records[0]["stage old"], Scalar::from(2_i64));

        let contains = reshape_with(&input, "age", MatchMode::Contains);
        let directions: Vec<String> = contains
            .records
            .iter()
            .map(|r| r[DIRECTION_FIELD].to_string())
            .collect();
        assert_eq!(directions, ["average", "young", "old"]);
    }

    #[test]
    fn tokenizer_uses_last_space() {
        assert_eq!(split_variant_key("a b c"), Some(("a b", "c")));
        assert_eq!(split_variant_key("abc"), None);
        assert_eq!(split_variant_key("abc "), None);
        assert_eq!(split_variant_key(" x"), Some(("", "x")));
    }

    #[test]
    fn existing_direction_field_is_overwritten_in_place() {
        let input = vec![record([
            ("direction", Scalar::from("old")),
            ("id", 1_i64.into()),
            ("v new", 5_i64.into()),
        ])];
        let out = reshape(&input, "v");
        let keys: Vec<&str> = out[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["direction", "id", "v"]);
        assert_eq!(out[0][DIRECTION_FIELD], Scalar::from("new"));
    }

    #[test]
    fn pivot_lists_directions_once() {
        let input = vec![
            wide(1, &[("v up", 1), ("v down", 2)]),
            wide(2, &[("v down", 3), ("v up", 4)]),
        ];
        let pivot = Pivot::resolve(&input, "v", MatchMode::Prefix);
        assert_eq!((pivot.variable(), pivot.mode()), ("v", MatchMode::Prefix));
        assert_eq!(pivot.directions().collect::<Vec<_>>(), ["up", "down"]);
        assert_eq!(pivot.direction_of("v down"), Some("down"));
        assert_eq!(pivot.direction_of("id"), None);
    }

    #[test]
    fn empty_input() {
        assert_eq!(reshape_with(&[], "v", MatchMode::Prefix), Reshaped::default());
    }
}
