pub mod boxplot;
pub mod braille;
pub mod frame;

pub use boxplot::{BoxFigure, BoxGroup, Panel, build_figure, ordinal_domain};
pub use braille::{Canvas, push_cell};
pub use frame::{Layout, Renderer};
