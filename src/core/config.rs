//! Declarative figure specification + fluent builder.

use crate::core::{
    color::{AnsiCode, default_palette},
    constants::{DEFAULT_MARGIN, DIRECTION_FIELD},
    error::ConfigError,
};

/// Immutable parameters handed to the figure model and renderer.
///
/// Mirrors a box-mark chart: `x` groups, `y` values, one panel per `facet`
/// value, box colour by `fill` value.
#[derive(Debug, Clone)]
pub struct FigureSpec {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub x: String,
    pub y: String,
    pub facet: String,
    pub fill: String,
    pub y_domain: (f64, f64),
    pub grid: bool,
    pub frame: bool,
    /// In nominal pixel units, see [`crate::core::bounds::margin_cells`].
    pub margin: usize,
    pub palette: Vec<AnsiCode>,
    /// Emit ANSI escapes.
    pub color: bool,
}

impl FigureSpec {
    #[inline]
    pub fn builder(x: impl Into<String>, y: impl Into<String>) -> FigureSpecBuilder {
        FigureSpecBuilder::new(x.into(), y.into())
    }

    /// Palette entry for the `index`-th fill value, cycling.
    #[must_use]
    pub fn color_for(&self, index: usize) -> AnsiCode {
        if self.palette.is_empty() {
            return AnsiCode::reset();
        }
        self.palette[index % self.palette.len()]
    }
}

#[derive(Debug)]
pub struct FigureSpecBuilder {
    x: String,
    y: String,
    facet: Option<String>,
    fill: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    y_domain: Option<(f64, f64)>,
    grid: bool,
    frame: bool,
    margin: usize,
    palette: Option<Vec<AnsiCode>>,
    color: bool,
}

impl FigureSpecBuilder {
    pub(crate) fn new(x: String, y: String) -> Self {
        Self {
            x,
            y,
            facet: None,
            fill: None,
            title: None,
            subtitle: None,
            y_domain: None,
            grid: true,
            frame: true,
            margin: DEFAULT_MARGIN,
            palette: None,
            color: true,
        }
    }

    #[inline]
    pub fn facet(mut self, f: impl Into<String>) -> Self {
        self.facet = Some(f.into());
        self
    }
    #[inline]
    pub fn fill(mut self, f: impl Into<String>) -> Self {
        self.fill = Some(f.into());
        self
    }
    #[inline]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    pub fn title_opt(mut self, t: Option<&str>) -> Self {
        if let Some(t) = t {
            self.title = Some(t.to_owned());
        }
        self
    }
    #[inline]
    pub fn subtitle_opt(mut self, s: Option<&str>) -> Self {
        if let Some(t) = s {
            self.subtitle = Some(t.to_owned());
        }
        self
    }
    #[inline]
    pub fn y_domain(mut self, r: std::ops::RangeInclusive<f64>) -> Self {
        self.y_domain = Some((*r.start(), *r.end()));
        self
    }
    #[inline]
    pub fn grid(mut self, on: bool) -> Self {
        self.grid = on;
        self
    }
    #[inline]
    pub fn frame(mut self, on: bool) -> Self {
        self.frame = on;
        self
    }
    #[inline]
    pub fn margin(mut self, units: usize) -> Self {
        self.margin = units;
        self
    }
    #[inline]
    pub fn palette(mut self, p: Vec<AnsiCode>) -> Self {
        self.palette = Some(p);
        self
    }
    #[inline]
    pub fn color(mut self, on: bool) -> Self {
        self.color = on;
        self
    }

    pub fn build(self) -> Result<FigureSpec, ConfigError> {
        if self.x.is_empty() {
            return Err(ConfigError::MissingField("x"));
        }
        if self.y.is_empty() {
            return Err(ConfigError::MissingField("y"));
        }
        let facet = self.facet.unwrap_or_else(|| DIRECTION_FIELD.to_owned());
        if facet.is_empty() {
            return Err(ConfigError::MissingField("facet"));
        }
        let fill = match self.fill {
            Some(f) if !f.is_empty() => f,
            _ => facet.clone(),
        };

        let (low, high) = self.y_domain.unwrap_or((0.0, 1.0));
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(ConfigError::InvalidRange { low, high });
        }

        Ok(FigureSpec {
            title: self.title,
            subtitle: self.subtitle,
            x: self.x,
            y: self.y,
            facet,
            fill,
            y_domain: (low, high),
            grid: self.grid,
            frame: self.frame,
            margin: self.margin,
            palette: self.palette.unwrap_or_else(default_palette),
            color: self.color,
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<FigureSpecBuilder> for Result<FigureSpec, ConfigError> {
    fn from(b: FigureSpecBuilder) -> Self {
        b.build()
    }
}
