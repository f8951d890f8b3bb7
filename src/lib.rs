pub mod cli;
pub mod download;
pub mod error;
pub mod filter;
pub mod links;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod scale;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::Error;
pub use pipeline::{run, PipelineConfig, RenderCounts, RenderSnapshot, RunSummary, UniverseSnapshot};
pub use ui::{ConsoleUi, Phase, RunStat, SilentUi, Ui, UiApp};
