//! Public-facing crate root – re-exports + one-shot helper.
//!
//! Wide JSON records carry one measurement per direction
//! (`"clumpiness forward"`, `"clumpiness backward"`, …).  The crate pivots
//! them to long form around one variable and draws a faceted box plot.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    color::{AnsiCode, ColorError, colorize},
    config::{FigureSpec, FigureSpecBuilder},
    error::{ConfigError, GraphError, LoadError},
    load::{Resource, load_records, resolve_resource},
    record::{Record, Scalar},
    reshape::{MatchMode, Pivot, Reshaped, reshape, reshape_with, split_variant_key},
    stats::BoxStats,
};

pub use crate::render::{BoxFigure, Renderer, build_figure};

/// Convenience: load `resource`, reshape it around `spec.y` and draw it
/// with `renderer` into `sink`.  Returns the reshape outcome so callers can
/// see how many records were dropped.
pub fn plot_resource<W: std::io::Write>(
    resource: &Resource,
    spec: &FigureSpec,
    renderer: &Renderer,
    sink: &mut W,
) -> Result<Reshaped, GraphError> {
    let wide = load_records(resource)?;
    let long = reshape_with(&wide, &spec.y, MatchMode::Prefix);
    let fig = build_figure(&long.records, spec)?;
    renderer.render(&fig, spec, sink)?;
    Ok(long)
}
