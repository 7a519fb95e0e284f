//! Static frame renderer for faceted box plots.
//!
//! The whole figure is assembled into one byte buffer and written to the sink
//! in a single `write_all`:
//! - margin, optional title, `↑ y` axis label
//! - one framed panel per facet, facet label centred in the top border
//! - braille plot rows with y tick labels on the left
//! - x labels under each slot, `x →` axis label, optional subtitle

use std::io::{Write, stdout};

use crate::{
    core::{
        bounds::{
            cell_row, map_y, margin_cells, nice_ticks, plot_rows, terminal_geometry, tick_count,
            tick_decimals, y_label_width,
        },
        color::AnsiCode,
        config::FigureSpec,
        constants::{
            BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR,
            CHROME_ROWS, FACET_GAP, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_PANEL_WIDTH, SLOT_CHARS,
        },
        error::GraphError,
        stats::BoxStats,
    },
    render::{
        boxplot::{BoxFigure, Panel},
        braille::{Canvas, push_cell},
    },
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;
/// Character columns a box actually covers inside its slot
const BOX_CHARS: usize = SLOT_CHARS - 1;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

const RESET_SEQ: &[u8] = b"\x1b[0m";

// --- Helpers ---

/// Write centred, optionally coloured, text between `fill` runs.
fn push_centered(
    buf: &mut Vec<u8>,
    text: &str,
    width: usize,
    fill: &str,
    color: Option<&AnsiCode>,
) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.extend_from_slice(fill.repeat(width).as_bytes());
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.extend_from_slice(fill.repeat(pad_left).as_bytes());
    buf.extend_from_slice(b"  "); // 2-char left padding
    push_styled(buf, text, color);
    buf.push(b' '); // 1-char right padding
    buf.extend_from_slice(fill.repeat(pad_right).as_bytes());
}

#[inline]
fn push_styled(buf: &mut Vec<u8>, text: &str, color: Option<&AnsiCode>) {
    match color {
        Some(c) => {
            buf.extend_from_slice(c.as_str().as_bytes());
            buf.extend_from_slice(text.as_bytes());
            buf.extend_from_slice(RESET_SEQ);
        }
        None => buf.extend_from_slice(text.as_bytes()),
    }
}

#[inline]
fn push_spaces(buf: &mut Vec<u8>, n: usize) {
    buf.resize(buf.len() + n, b' ');
}

/// Fit `label` into `width` columns, centred; overlong labels end in `…`.
fn push_fitted(buf: &mut Vec<u8>, label: &str, width: usize) {
    let len = label.chars().count();
    if len <= width {
        let left = (width - len) / 2;
        push_spaces(buf, left);
        buf.extend_from_slice(label.as_bytes());
        push_spaces(buf, width - len - left);
    } else if width > 0 {
        let cut: String = label.chars().take(width - 1).collect();
        buf.extend_from_slice(cut.as_bytes());
        buf.extend_from_slice("…".as_bytes());
    }
}

/// Resolved character geometry of one figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub margin_cols: usize,
    pub margin_rows: usize,
    pub y_chars: usize,
    pub label_width: usize,
    pub panel_width: usize,
    pub ticks: Vec<f64>,
    pub decimals: usize,
    /// Columns from the left margin to the end of the last panel.
    pub content_width: usize,
}

impl Layout {
    /// Column of slot `k` inside a panel.
    #[inline]
    fn slot_col(&self, slots: usize, k: usize) -> usize {
        (self.panel_width - slots * SLOT_CHARS) / 2 + k * SLOT_CHARS
    }
}

/// Renders a [`BoxFigure`] for a terminal of a given size.
pub struct Renderer {
    cols: usize,
    rows: usize,
}

impl Renderer {
    #[inline]
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Size taken from the attached terminal (80×30 fallback).
    #[must_use]
    pub fn for_terminal() -> Self {
        let (w, h) = terminal_geometry();
        Self::new(usize::from(w.0), usize::from(h.0))
    }

    pub fn layout(&self, fig: &BoxFigure, spec: &FigureSpec) -> Result<Layout, GraphError> {
        let (margin_cols, margin_rows) = margin_cells(spec.margin);
        let extra = usize::from(spec.title.is_some()) + usize::from(spec.subtitle.is_some());
        let y_chars = plot_rows(self.rows, margin_rows, extra);

        let (ticks, step) = nice_ticks(spec.y_domain.0, spec.y_domain.1, tick_count(y_chars));
        let decimals = tick_decimals(step);
        let label_width = y_label_width(&ticks, decimals);

        let widest_facet = fig
            .panels
            .iter()
            .map(|p| p.label.chars().count() + TITLE_PADDING)
            .max()
            .unwrap_or(0);
        let panel_width = (fig.x_domain.len() * SLOT_CHARS)
            .max(MIN_PANEL_WIDTH)
            .max(widest_facet);

        let n = fig.panels.len();
        let content_width = label_width
            + LABEL_GUTTER
            + n * (panel_width + BORDER_WIDTH)
            + n.saturating_sub(1) * FACET_GAP;

        let want_w = margin_cols + content_width;
        let want_h = MIN_GRAPH_HEIGHT + CHROME_ROWS + 2 * margin_rows + extra + 1;
        if want_w > self.cols || self.rows < want_h {
            return Err(GraphError::GraphTooSmall {
                want_w,
                want_h,
                got_w: self.cols,
                got_h: self.rows,
            });
        }

        Ok(Layout {
            margin_cols,
            margin_rows,
            y_chars,
            label_width,
            panel_width,
            ticks,
            decimals,
            content_width,
        })
    }

    /// Build the complete figure as UTF-8 bytes.
    pub fn draw(&self, fig: &BoxFigure, spec: &FigureSpec) -> Result<Vec<u8>, GraphError> {
        let lay = self.layout(fig, spec)?;
        let mut out = Vec::<u8>::with_capacity(
            (lay.y_chars + CHROME_ROWS) * (lay.margin_cols + lay.content_width * 4),
        );
        let color = |c: Option<AnsiCode>| if spec.color { c } else { None };
        let lead = lay.margin_cols;
        let axis = lay.label_width + LABEL_GUTTER;

        for _ in 0..lay.margin_rows {
            out.push(b'\n');
        }
        if let Some(title) = &spec.title {
            push_spaces(&mut out, lead);
            push_centered(&mut out, title, lay.content_width, " ", None);
            out.push(b'\n');
        }

        // y axis label
        push_spaces(&mut out, lead);
        out.extend_from_slice(format!("↑ {}", spec.y).as_bytes());
        out.push(b'\n');

        // top borders with facet labels
        push_spaces(&mut out, lead + axis);
        for (i, p) in fig.panels.iter().enumerate() {
            if i > 0 {
                push_spaces(&mut out, FACET_GAP);
            }
            let (l, fill, r) = if spec.frame { (TL, H, TR) } else { (" ", " ", " ") };
            out.extend_from_slice(l.as_bytes());
            push_centered(
                &mut out,
                &p.label,
                lay.panel_width,
                fill,
                color(p.color).as_ref(),
            );
            out.extend_from_slice(r.as_bytes());
        }
        out.push(b'\n');

        // plot rows
        let canvases: Vec<PanelCanvas> = fig
            .panels
            .iter()
            .map(|p| PanelCanvas::paint(p, fig.x_domain.len(), &lay, spec))
            .collect();
        let side = if spec.frame { V } else { " " };
        let px_rows = lay.y_chars * VR;

        for row in 0..lay.y_chars {
            push_spaces(&mut out, lead);
            let tick = lay
                .ticks
                .iter()
                .find(|&&t| cell_row(map_y(t, spec.y_domain, px_rows)) == row);
            match tick {
                Some(t) => out.extend_from_slice(
                    format!("{t:>w$.d$}", w = lay.label_width, d = lay.decimals).as_bytes(),
                ),
                None => push_spaces(&mut out, lay.label_width),
            }
            push_spaces(&mut out, LABEL_GUTTER);

            for (i, pc) in canvases.iter().enumerate() {
                if i > 0 {
                    push_spaces(&mut out, FACET_GAP);
                }
                out.extend_from_slice(side.as_bytes());
                pc.push_row(&mut out, row, spec.color);
                out.extend_from_slice(side.as_bytes());
            }
            out.push(b'\n');
        }

        // bottom borders
        push_spaces(&mut out, lead + axis);
        for i in 0..fig.panels.len() {
            if i > 0 {
                push_spaces(&mut out, FACET_GAP);
            }
            if spec.frame {
                out.extend_from_slice(BL.as_bytes());
                out.extend_from_slice(H.repeat(lay.panel_width).as_bytes());
                out.extend_from_slice(BR.as_bytes());
            } else {
                push_spaces(&mut out, lay.panel_width + BORDER_WIDTH);
            }
        }
        out.push(b'\n');

        // x labels
        let slots = fig.x_domain.len();
        push_spaces(&mut out, lead + axis);
        for i in 0..fig.panels.len() {
            if i > 0 {
                push_spaces(&mut out, FACET_GAP);
            }
            push_spaces(&mut out, BORDER_WIDTH / 2);
            let first = lay.slot_col(slots, 0);
            push_spaces(&mut out, first);
            for label in &fig.x_domain {
                push_fitted(&mut out, label, BOX_CHARS);
                push_spaces(&mut out, SLOT_CHARS - BOX_CHARS);
            }
            push_spaces(&mut out, lay.panel_width - first - slots * SLOT_CHARS);
            push_spaces(&mut out, BORDER_WIDTH / 2);
        }
        trim_line_end(&mut out);
        out.push(b'\n');

        // x axis label, right-aligned
        let x_title = format!("{} →", spec.x);
        push_spaces(
            &mut out,
            lead + lay.content_width.saturating_sub(x_title.chars().count()),
        );
        out.extend_from_slice(x_title.as_bytes());
        out.push(b'\n');

        if let Some(sub) = &spec.subtitle {
            push_spaces(&mut out, lead);
            push_centered(&mut out, sub, lay.content_width, " ", None);
            out.push(b'\n');
        }
        for _ in 0..lay.margin_rows {
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Draw and hand the frame to `sink`.
    pub fn render<W: Write>(
        &self,
        fig: &BoxFigure,
        spec: &FigureSpec,
        sink: &mut W,
    ) -> Result<(), GraphError> {
        let frame = self.draw(fig, spec)?;
        sink.write_all(&frame)?;
        sink.flush()?;
        Ok(())
    }

    /// Render to stdout.
    pub fn render_stdout(&self, fig: &BoxFigure, spec: &FigureSpec) -> Result<(), GraphError> {
        self.render(fig, spec, &mut stdout().lock())
    }
}

fn trim_line_end(buf: &mut Vec<u8>) {
    while buf.last() == Some(&b' ') {
        buf.pop();
    }
}

/// Data and grid layers of one panel plus the colour of every column.
struct PanelCanvas {
    data: Canvas,
    grid: Canvas,
    col_color: Vec<Option<AnsiCode>>,
}

impl PanelCanvas {
    fn paint(panel: &Panel, slots: usize, lay: &Layout, spec: &FigureSpec) -> Self {
        let mut data = Canvas::new(lay.panel_width, lay.y_chars);
        let mut grid = Canvas::new(lay.panel_width, lay.y_chars);
        let mut col_color = vec![None; lay.panel_width];
        let h = data.height_px();

        if spec.grid {
            for &t in &lay.ticks {
                let y = map_y(t, spec.y_domain, h);
                for x in (0..grid.width_px()).step_by(2) {
                    grid.set(x, y);
                }
            }
        }

        for (k, group) in panel.boxes.iter().enumerate() {
            let Some(group) = group else { continue };
            let col = lay.slot_col(slots, k);
            draw_box(&mut data, col * HR, &group.stats, spec.y_domain);
            for c in &mut col_color[col..col + BOX_CHARS] {
                *c = Some(group.color);
            }
        }

        Self {
            data,
            grid,
            col_color,
        }
    }

    /// One character row; colour escapes are emitted only on change.
    fn push_row(&self, out: &mut Vec<u8>, row: usize, color: bool) {
        let mut current: Option<AnsiCode> = None;
        for (col, c) in self.col_color.iter().enumerate() {
            let dm = self.data.mask(col, row);
            let gm = self.grid.mask(col, row);
            if color {
                let style = if dm != 0 {
                    *c
                } else if gm != 0 {
                    Some(AnsiCode::dim())
                } else {
                    None
                };
                if style != current {
                    if current.is_some() {
                        out.extend_from_slice(RESET_SEQ);
                    }
                    if let Some(s) = &style {
                        out.extend_from_slice(s.as_str().as_bytes());
                    }
                    current = style;
                }
            }
            push_cell(out, dm | gm);
        }
        if current.is_some() {
            out.extend_from_slice(RESET_SEQ);
        }
    }
}

/// Box in pixels `x0+1 ..= x0+5`, whiskers and outliers on `x0+3`.
fn draw_box(c: &mut Canvas, x0: usize, s: &BoxStats, domain: (f64, f64)) {
    let h = c.height_px();
    let y = |v: f64| map_y(v, domain, h);
    let (left, mid, right) = (x0 + 1, x0 + 3, x0 + 5);
    let (top, bottom) = (y(s.q3), y(s.q1));

    c.vline(mid, y(s.high_whisker), top);
    c.vline(mid, bottom, y(s.low_whisker));
    c.fill_rect(left, right, top, bottom);
    if bottom - top >= 2 {
        c.clear_hline(left + 1, right - 1, y(s.median));
    }
    for &o in &s.outliers {
        c.set(mid, y(o));
    }
}
