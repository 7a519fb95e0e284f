//! Aggregates the "business logic" layer: records, reshaping, loading and
//! the figure specification.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod load;
pub mod record;
pub mod reshape;
pub mod rng;
pub mod stats;

// re-export frequently-used items for convenience
pub use color::{AnsiCode, ColorError, colorize};
pub use config::{FigureSpec, FigureSpecBuilder};
pub use constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION, DIRECTION_FIELD,
    LABEL_GUTTER, MIN_GRAPH_HEIGHT, SLOT_CHARS,
};
pub use error::{ConfigError, GraphError, LoadError};
pub use load::{Resource, load_records, resolve_resource};
pub use record::{Record, Scalar};
pub use reshape::{MatchMode, Pivot, Reshaped, reshape, reshape_with};
pub use stats::BoxStats;
