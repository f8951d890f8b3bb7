use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eve-sde-render")]
#[command(version, about = "Build universe and render databases from the EVE Online SDE")]
pub struct Cli {
    /// Show the full-screen progress dashboard
    #[arg(long, global = true)]
    pub tui: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the latest SDE (if needed) and build both databases
    Sync {
        /// Directory for universe.db and render.db (default: the cached build directory)
        output_dir: Option<PathBuf>,

        /// Additional region ids to leave out of the render database (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude_regions: Option<Vec<i64>>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,
    },

    /// Download and extract the latest SDE
    Download {
        /// Cache directory to download into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Build both databases from an extracted SDE directory
    Process {
        /// Directory containing the map JSONL files
        input_dir: PathBuf,

        /// Universe database path (default: INPUT_DIR/universe.db)
        #[arg(short, long)]
        universe_db: Option<PathBuf>,

        /// Render database path (default: INPUT_DIR/render.db)
        #[arg(short, long)]
        render_db: Option<PathBuf>,

        /// Additional region ids to leave out of the render database (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude_regions: Option<Vec<i64>>,
    },

    /// List the region ids left out of the render database
    ExcludedRegions,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
