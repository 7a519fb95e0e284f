use facet_box::{MatchMode, Record, Scalar, reshape, reshape_with};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// One wide record: shared fields, then variant directions for `v`, then
/// fields of an unrelated variable `w`.
#[derive(Clone, Debug)]
struct Wide {
    shared: Vec<i64>,
    directions: Vec<String>,
    noise: Vec<String>,
}

impl Wide {
    fn record(&self) -> Record {
        let mut r = Record::new();
        for (i, v) in self.shared.iter().enumerate() {
            r.insert(format!("s{i}"), Scalar::from(*v));
        }
        for (i, d) in self.directions.iter().enumerate() {
            r.insert(format!("v {d}"), Scalar::from(i as i64));
        }
        for d in &self.noise {
            r.insert(format!("w {d}"), Scalar::from("noise"));
        }
        r
    }
}

fn wide_strategy() -> impl Strategy<Value = Wide> {
    (
        prop::collection::vec(any::<i64>(), 0..4),
        prop::collection::btree_set("[a-z]{1,6}", 0..5),
        prop::collection::btree_set("[a-z]{1,6}", 0..3),
    )
        .prop_map(|(shared, dirs, noise)| Wide {
            shared,
            directions: dirs.into_iter().collect(),
            noise: noise.into_iter().collect(),
        })
}

proptest! {
    #[test]
    fn output_length_is_sum_of_variants(rows in prop::collection::vec(wide_strategy(), 0..12)) {
        let input: Vec<Record> = rows.iter().map(Wide::record).collect();
        let out = reshape_with(&input, "v", MatchMode::Prefix);

        let expect: usize = rows.iter().map(|w| w.directions.len()).sum();
        prop_assert_eq!(out.records.len(), expect);
        let dropped = rows.iter().filter(|w| w.directions.is_empty()).count();
        prop_assert_eq!(out.dropped, dropped);
    }

    #[test]
    fn shared_fields_repeat_and_variants_vanish(rows in prop::collection::vec(wide_strategy(), 0..12)) {
        let input: Vec<Record> = rows.iter().map(Wide::record).collect();
        let out = reshape(&input, "v");

        let mut cursor = 0;
        for (w, rec) in rows.iter().zip(&input) {
            let k = w.directions.len();
            let group = &out[cursor..cursor + k];
            cursor += k;

            for (long, d) in group.iter().zip(&w.directions) {
                // shared = everything except direction and the variable
                let shared: Vec<(&String, &Scalar)> = long
                    .iter()
                    .filter(|(key, _)| *key != "direction" && *key != "v")
                    .collect();
                let original: Vec<(&String, &Scalar)> = rec
                    .iter()
                    .filter(|(key, _)| !key.starts_with("v "))
                    .collect();
                prop_assert_eq!(shared, original);
                prop_assert_eq!(&long["direction"], &Scalar::from(d.as_str()));
                prop_assert!(long.keys().all(|key| !key.starts_with("v ")));
            }
        }
        prop_assert_eq!(cursor, out.len());
    }

    #[test]
    fn reshaping_long_output_drops_everything(rows in prop::collection::vec(wide_strategy(), 1..8)) {
        let input: Vec<Record> = rows.iter().map(Wide::record).collect();
        let long = reshape(&input, "v");
        let again = reshape_with(&long, "v", MatchMode::Prefix);
        prop_assert!(again.records.is_empty());
        prop_assert_eq!(again.dropped, long.len());
    }

    #[test]
    fn reshape_is_deterministic(rows in prop::collection::vec(wide_strategy(), 0..8)) {
        let input: Vec<Record> = rows.iter().map(Wide::record).collect();
        let snapshot = input.clone();
        let a = reshape(&input, "v");
        let b = reshape(&input, "v");
        prop_assert_eq!(a, b);
        prop_assert_eq!(input, snapshot);
    }
}

fn parse(json: &str) -> Vec<Record> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn documented_order_example() {
    let input = parse(r#"[{"id": 1, "v a": 10, "v b": 20}, {"id": 2, "v a": 30}]"#);
    let out = serde_json::to_string(&reshape(&input, "v")).unwrap();
    assert_eq!(
        out,
        r#"[{"id":1,"direction":"a","v":10},{"id":1,"direction":"b","v":20},{"id":2,"direction":"a","v":30}]"#
    );
}

#[test]
fn recipient_generations_scenario() {
    let input = parse(
        r#"[{"recipient generations direction1": 0.2,
             "recipient generations direction2": 0.5,
             "region": "X"}]"#,
    );
    let out = serde_json::to_string(&reshape(&input, "recipient generations")).unwrap();
    assert_eq!(
        out,
        concat!(
            r#"[{"region":"X","direction":"direction1","recipient generations":0.2},"#,
            r#"{"region":"X","direction":"direction2","recipient generations":0.5}]"#
        )
    );
}

#[test]
fn heterogeneous_schemas_resolve_together() {
    let input = parse(r#"[{"v up": 1}, {"id": 7, "v down": 2}, {"id": 8}]"#);
    let out = reshape_with(&input, "v", MatchMode::Prefix);
    assert_eq!(out.dropped, 1);
    let got = serde_json::to_string(&out.records).unwrap();
    assert_eq!(
        got,
        r#"[{"direction":"up","v":1},{"id":7,"direction":"down","v":2}]"#
    );
}
