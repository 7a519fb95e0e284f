//! A collection of constants.

/// The left and right border characters of one panel
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;
/// Blank columns between neighbouring facet panels
pub const FACET_GAP: usize = 1;

/// Plot area must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Each panel is at least this wide so its facet label fits in the border
pub const MIN_PANEL_WIDTH: usize = 8;

/// Characters reserved for one box: five dots of box, then spacing
pub const SLOT_CHARS: usize = 4;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Nominal size of one terminal cell in margin units.
///
/// A 50-unit margin is 5 columns by 2 rows.
pub const CELL_WIDTH_UNITS: usize = 10;
pub const CELL_HEIGHT_UNITS: usize = 20;

/// Rows used by everything except the plot area: y title, top border,
/// bottom border, x labels and x title.
pub const CHROME_ROWS: usize = 5;

/// Whiskers reach the last datum within this many IQRs of the box.
pub const WHISKER_IQR: f64 = 1.5;

/// Name of the categorical column produced by the reshaper.
pub const DIRECTION_FIELD: &str = "direction";

/// Resource loaded when none is given: `data/rec-gens.json`.
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RESOURCE: &str = "rec-gens";
pub const DEFAULT_X_FIELD: &str = "recipient generations";
pub const DEFAULT_Y_FIELD: &str = "clumpiness";
pub const DEFAULT_MARGIN: usize = 50;
