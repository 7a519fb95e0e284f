use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{
    constants::{DEFAULT_DATA_DIR, DEFAULT_MARGIN, DEFAULT_RESOURCE, DEFAULT_X_FIELD, DEFAULT_Y_FIELD},
    reshape::MatchMode,
};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "facet-box",
    about = "Reshape wide JSON measurements and draw faceted braille box plots"
)]
pub struct Cli {
    /// Emit debug logs and timing diagnostics on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, reshape and plot a data set
    Plot(PlotArgs),
    /// Load and reshape, print long records as JSON
    Reshape(ReshapeArgs),
    /// Plot a synthetic data set
    Demo(DemoArgs),
    /// Show the palette and colour syntax
    Colors,
    /// Print example invocations
    Examples,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum MatchArg {
    /// `"<variable> <direction>"` exactly
    #[default]
    Prefix,
    /// Any field containing the variable name
    Contains,
}

impl From<MatchArg> for MatchMode {
    fn from(m: MatchArg) -> Self {
        match m {
            MatchArg::Prefix => Self::Prefix,
            MatchArg::Contains => Self::Contains,
        }
    }
}

/// Where the records come from and which variable to pivot.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Resource name under the data dir, a `.json` path, or `-` for stdin
    #[arg(value_name = "RESOURCE", default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// Directory bare resource names resolve against
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Variable spread across `"<variable> <direction>"` fields
    #[arg(short, long, default_value = DEFAULT_Y_FIELD)]
    pub variable: String,

    /// How variant fields are recognised
    #[arg(long = "match", value_enum, default_value_t = MatchArg::Prefix)]
    pub match_mode: MatchArg,
}

/// Figure options shared by `plot` and `demo`.
#[derive(Args, Debug)]
pub struct FigureArgs {
    /// Field on the x axis
    #[arg(short, long, default_value = DEFAULT_X_FIELD)]
    pub x: String,

    /// Field split into facet panels
    #[arg(long, default_value = "direction")]
    pub facet: String,

    /// Field that picks the box colour (defaults to the facet field)
    #[arg(long)]
    pub fill: Option<String>,

    /// Y-axis lower bound
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub y_min: f64,
    /// Y-axis upper bound
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub y_max: f64,

    /// Hide horizontal grid lines
    #[arg(long)]
    pub no_grid: bool,

    /// Hide panel frames
    #[arg(long)]
    pub no_frame: bool,

    /// Margin around the figure (10 units per column, 20 per row)
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    pub margin: usize,

    /// Figure title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Optional subtitle
    #[arg(short, long)]
    pub subtitle: Option<String>,

    /// Comma-separated colours (names or `#RRGGBB`) for fill values
    #[arg(long)]
    pub palette: Option<String>,

    /// Plain output without ANSI escapes (also honours `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,
}

/// `facet-box plot …`
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
}

/// `facet-box reshape …`
#[derive(Args, Debug)]
pub struct ReshapeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// `facet-box demo …`
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Wide records to synthesise
    #[arg(long, default_value_t = 240)]
    pub records: usize,
    /// Distinct x values
    #[arg(long, default_value_t = 4)]
    pub generations: usize,
    /// Comma-separated direction suffixes
    #[arg(long, default_value = "forward,backward")]
    pub directions: String,
    /// Spread of the synthetic values
    #[arg(long, default_value_t = 0.12)]
    pub sigma: f64,
    /// RNG seed (time-based if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Variable name for the synthetic measurement
    #[arg(short, long, default_value = DEFAULT_Y_FIELD)]
    pub variable: String,
    #[command(flatten)]
    pub figure: FigureArgs,
}
