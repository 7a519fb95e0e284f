//! Geometry helpers: terminal size, margins, y ticks and label widths.

use terminal_size::{Height, Width, terminal_size};

use crate::core::constants::{
    BRAILLE_VERTICAL_RESOLUTION as VR, CELL_HEIGHT_UNITS, CELL_WIDTH_UNITS, CHROME_ROWS,
    MIN_GRAPH_HEIGHT,
};

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert a margin in nominal pixel units to `(columns, rows)`.
#[inline]
#[must_use]
pub fn margin_cells(units: usize) -> (usize, usize) {
    (units / CELL_WIDTH_UNITS, units / CELL_HEIGHT_UNITS)
}

/// Rows left for the plot area once chrome, margins and optional
/// title/subtitle lines are taken out.  Never below [`MIN_GRAPH_HEIGHT`].
#[inline]
#[must_use]
pub fn plot_rows(term_rows: usize, margin_rows: usize, extra_lines: usize) -> usize {
    let used = CHROME_ROWS + 2 * margin_rows + extra_lines + 1; // +1 for the prompt
    term_rows.saturating_sub(used).max(MIN_GRAPH_HEIGHT)
}

/// How many y ticks to aim for on a plot `rows` characters tall.
#[inline]
#[must_use]
pub fn tick_count(rows: usize) -> usize {
    (rows / 3).clamp(2, 10)
}

/// Upper bound on ticks per axis; wider spans fall back to the domain ends.
const MAX_TICKS: usize = 64;

/// Round tick values spanning `[low, high]`, about `count` of them.
///
/// Steps are 1, 2 or 5 times a power of ten.  Negative powers divide by an
/// integer so `0.6` comes out as `0.6`, not `0.6000000000000001`.
#[must_use]
pub fn nice_ticks(low: f64, high: f64, count: usize) -> (Vec<f64>, f64) {
    if !(low.is_finite() && high.is_finite()) || low >= high || count == 0 {
        return (Vec::new(), 0.0);
    }
    let raw = (high - low) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        match tick_steps((low * inc).ceil(), (high * inc).floor()) {
            Some(steps) => (steps.map(|i| i / inc).collect(), 1.0 / inc),
            None => (vec![low, high], high - low),
        }
    } else {
        let step = 10f64.powf(power) * factor;
        match tick_steps((low / step).ceil(), (high / step).floor()) {
            Some(steps) => (steps.map(|i| i * step).collect(), step),
            None => (vec![low, high], high - low),
        }
    }
}

/// Integer multiples `start ..= stop`, or `None` when f64 can no longer step
/// between them one by one (domains a few ulps wide, or far past 2^53).
fn tick_steps(start: f64, stop: f64) -> Option<impl Iterator<Item = f64>> {
    if !(start.is_finite() && stop.is_finite())
        || start + 1.0 == start
        || stop - start > MAX_TICKS as f64
    {
        return None;
    }
    let n = if stop < start {
        0
    } else {
        (stop - start) as usize + 1
    };
    Some((0..n).map(move |k| start + k as f64))
}

/// Decimal places needed to print ticks spaced `step` apart.
#[inline]
#[must_use]
pub fn tick_decimals(step: f64) -> usize {
    if step <= 0.0 || step >= 1.0 {
        return 0;
    }
    // Tolerance keeps 0.1 at one decimal despite log10 rounding.
    (-step.log10() - 1e-9).ceil() as usize
}

/// How wide will the y-axis labels be for these ticks?
#[inline]
#[must_use]
pub fn y_label_width(ticks: &[f64], decimals: usize) -> usize {
    ticks
        .iter()
        .map(|t| format!("{t:.decimals$}").len())
        .max()
        .unwrap_or(0)
}

/// Map `y` into pixel rows `[0, height_px - 1]`, top row first.
///
/// Values outside the domain are clamped to its edges.
#[inline]
#[must_use]
pub fn map_y(y: f64, domain: (f64, f64), height_px: usize) -> usize {
    let top = height_px.saturating_sub(1);
    let r = ((y - domain.0) / (domain.1 - domain.0)).clamp(0.0, 1.0) * top as f64;
    top - (r.round() as usize).min(top)
}

/// Character row holding pixel row `px`.
#[inline]
#[must_use]
pub const fn cell_row(px: usize) -> usize {
    px / VR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_domain_ticks() {
        let (ticks, step) = nice_ticks(0.0, 1.0, 5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert!((step - 0.2).abs() < 1e-12);
        assert_eq!(tick_decimals(step), 1);
        assert_eq!(y_label_width(&ticks, 1), 3);
    }

    #[test]
    fn integer_ticks() {
        let (ticks, step) = nice_ticks(0.0, 100.0, 4);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(tick_decimals(step), 0);
    }

    #[test]
    fn degenerate_ticks() {
        assert!(nice_ticks(1.0, 1.0, 5).0.is_empty());
        assert!(nice_ticks(0.0, 1.0, 0).0.is_empty());
        assert_eq!(tick_decimals(0.05), 2);
        assert_eq!(tick_decimals(0.1), 1);
    }

    #[test]
    fn extreme_domains_terminate() {
        // two ulps wide: tick indices sit far past 2^53
        let (ticks, step) = nice_ticks(1.0, 1.000_000_000_000_000_4, 6);
        assert!((2..=MAX_TICKS + 1).contains(&ticks.len()));
        assert!(step > 0.0);

        let (ticks, step) = nice_ticks(-1e300, 1e300, 6);
        assert!((2..=MAX_TICKS + 1).contains(&ticks.len()));
        assert!(step.is_finite());

        let (ticks, _) = nice_ticks(0.0, f64::MIN_POSITIVE, 6);
        assert!(ticks.len() <= MAX_TICKS + 1);
    }

    #[test]
    fn mapping_clamps_and_flips() {
        assert_eq!(map_y(1.0, (0.0, 1.0), 41), 0);
        assert_eq!(map_y(0.0, (0.0, 1.0), 41), 40);
        assert_eq!(map_y(0.5, (0.0, 1.0), 41), 20);
        assert_eq!(map_y(7.0, (0.0, 1.0), 41), 0);
        assert_eq!(map_y(-3.0, (0.0, 1.0), 41), 40);
    }

    #[test]
    fn margins_and_rows() {
        assert_eq!(margin_cells(50), (5, 2));
        assert_eq!(plot_rows(30, 2, 0), 20);
        assert_eq!(plot_rows(5, 2, 0), MIN_GRAPH_HEIGHT);
    }
}
