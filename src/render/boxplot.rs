//! Long records → faceted box-plot model.
//!
//! Facet, x and fill values are ordinal: distinct values, ascending, numeric
//! order when every value reads as a number.  All panels share one x domain so
//! the same x value lines up across facets.

use std::collections::HashMap;

use crate::core::{
    color::AnsiCode,
    config::FigureSpec,
    error::GraphError,
    record::{Record, Scalar},
    stats::BoxStats,
};

/// One box.
#[derive(Clone, Debug)]
pub struct BoxGroup {
    pub stats: BoxStats,
    pub color: AnsiCode,
}

/// One facet panel; `boxes` is aligned with [`BoxFigure::x_domain`].
#[derive(Clone, Debug)]
pub struct Panel {
    pub label: String,
    /// Set when boxes are filled by the facet value itself.
    pub color: Option<AnsiCode>,
    pub boxes: Vec<Option<BoxGroup>>,
}

#[derive(Clone, Debug)]
pub struct BoxFigure {
    pub panels: Vec<Panel>,
    pub x_domain: Vec<String>,
    /// Records that made it into a box.
    pub used: usize,
    /// Records missing the facet/x field or a numeric y.
    pub skipped: usize,
}

/// Distinct labels, ascending.  Numeric when all of them parse.
#[must_use]
pub fn ordinal_domain<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for l in labels {
        let l = l.as_ref();
        if !out.iter().any(|o| o == l) {
            out.push(l.to_owned());
        }
    }
    let numeric: Option<Vec<f64>> = out
        .iter()
        .map(|l| Scalar::Text(l.clone()).as_f64())
        .collect();
    match numeric {
        Some(keys) => {
            let mut paired: Vec<(f64, String)> = keys.into_iter().zip(out).collect();
            paired.sort_by(|a, b| a.0.total_cmp(&b.0));
            paired.into_iter().map(|(_, l)| l).collect()
        }
        None => {
            out.sort();
            out
        }
    }
}

struct Row {
    facet: String,
    x: String,
    fill: String,
    y: f64,
}

fn index_of(domain: &[String]) -> HashMap<&str, usize> {
    domain
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect()
}

/// Group long records by `(facet, x)` and summarise each group.
pub fn build_figure(records: &[Record], spec: &FigureSpec) -> Result<BoxFigure, GraphError> {
    let mut rows = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for rec in records {
        let facet = rec.get(&spec.facet);
        let x = rec.get(&spec.x);
        let y = rec.get(&spec.y).and_then(Scalar::as_f64);
        match (facet, x, y) {
            (Some(facet), Some(x), Some(y)) => rows.push(Row {
                facet: facet.to_string(),
                x: x.to_string(),
                fill: rec.get(&spec.fill).map(ToString::to_string).unwrap_or_default(),
                y,
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, y = %spec.y, "records without facet, x or numeric y were skipped");
    }
    if rows.is_empty() {
        return Err(GraphError::EmptyData {
            facet: spec.facet.clone(),
            x: spec.x.clone(),
            y: spec.y.clone(),
        });
    }

    let facet_domain = ordinal_domain(rows.iter().map(|r| &r.facet));
    let x_domain = ordinal_domain(rows.iter().map(|r| &r.x));
    let fill_domain = ordinal_domain(rows.iter().map(|r| &r.fill));
    let (facet_ix, x_ix, fill_ix) = (
        index_of(&facet_domain),
        index_of(&x_domain),
        index_of(&fill_domain),
    );

    // [facet][x] → (values, fill index of the first row)
    let mut cells: Vec<Vec<Option<(Vec<f64>, usize)>>> =
        vec![vec![None; x_domain.len()]; facet_domain.len()];
    for r in &rows {
        let (f, x, c) = (facet_ix[r.facet.as_str()], x_ix[r.x.as_str()], fill_ix[r.fill.as_str()]);
        cells[f][x].get_or_insert_with(|| (Vec::new(), c)).0.push(r.y);
    }

    let fill_is_facet = spec.fill == spec.facet;
    let panels = facet_domain
        .into_iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (label, groups))| Panel {
            label,
            color: fill_is_facet.then(|| spec.color_for(i)),
            boxes: groups
                .into_iter()
                .map(|g| {
                    g.and_then(|(values, fill)| {
                        BoxStats::from_values(&values).map(|stats| BoxGroup {
                            stats,
                            color: spec.color_for(fill),
                        })
                    })
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        panels = panels.len(),
        x_values = x_domain.len(),
        used = rows.len(),
        "built box figure"
    );

    Ok(BoxFigure {
        panels,
        x_domain,
        used: rows.len(),
        skipped,
    })
}
