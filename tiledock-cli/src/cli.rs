//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tiledock_core::{DropRegion, Point, Rect};

use crate::util::{parse_point, parse_rect};

/// `TileDock` command-line interface for layout documents
#[derive(Parser)]
#[command(name = "tiledock")]
#[command(author, version, about = "TileDock layout command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "TILEDOCK_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Layout document to operate on (default: <config>/layouts/<layout key>.json)
    #[arg(short, long, global = true)]
    pub layout: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample layout
    #[command(about = "Write a sample two-group layout document")]
    Init {
        /// Overwrite an existing document
        #[arg(short, long)]
        force: bool,
    },

    /// Print the layout
    #[command(about = "Print the current layout")]
    Show {
        /// Output format
        #[arg(short, long, default_value = "tree", value_enum)]
        format: ShowFormat,
    },

    /// Validate the layout document
    #[command(about = "Check schema version and structural invariants")]
    Validate,

    /// List content containers
    #[command(about = "List the content containers a host would mount")]
    Containers,

    /// Count tab instances
    #[command(about = "Count how many tabs show the given content id")]
    Count {
        /// Content id
        id: String,
    },

    /// Move a tab or tile
    #[command(about = "Move a tab or tile onto another node")]
    #[command(group(ArgGroup::new("target").required(true).args(["region", "index"])))]
    Move {
        /// Id of the tab or tile to move
        from: String,

        /// Id of the node to drop onto
        to: String,

        /// Drop region on the target body
        #[arg(short, long, value_enum)]
        region: Option<RegionArg>,

        /// Tab index in the target group (negative appends)
        #[arg(short, long, allow_negative_numbers = true)]
        index: Option<i64>,
    },

    /// Close a tab or tile
    #[command(about = "Remove a tab or tile and prune the layout")]
    Close {
        /// Id of the tab or tile
        id: String,
    },

    /// Append a tab to a tab group
    #[command(about = "Append a new tab to a tab group")]
    Append {
        /// Tab group id
        group: String,

        /// New tab id
        id: String,

        /// Renderer type of the new tab
        #[arg(value_name = "TYPE")]
        renderer_type: String,
    },

    /// Classify a drop region
    #[command(about = "Classify a pointer position over a region into a drop region")]
    Region {
        /// Region bounds as x,y,width,height
        #[arg(short, long, value_parser = parse_rect, allow_hyphen_values = true)]
        bounds: Rect,

        /// Pointer position as x,y
        #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Point,

        /// Edge band width in pixels (default: from settings)
        #[arg(long)]
        band: Option<f64>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Indented tree
    Tree,
    /// Layout document JSON
    Json,
}

/// Drop region argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionArg {
    /// Split above
    Top,
    /// Split to the left
    Left,
    /// Split below
    Bottom,
    /// Split to the right
    Right,
    /// Add as a tab
    Cover,
}

impl From<RegionArg> for DropRegion {
    fn from(region: RegionArg) -> Self {
        match region {
            RegionArg::Top => Self::Top,
            RegionArg::Left => Self::Left,
            RegionArg::Bottom => Self::Bottom,
            RegionArg::Right => Self::Right,
            RegionArg::Cover => Self::Cover,
        }
    }
}
