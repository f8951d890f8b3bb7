use anyhow::Result;
use eve_sde_render::{
    cli::{Cli, Commands},
    download::ensure_sde_downloaded,
    filter::RegionFilter,
    pipeline::{self, PipelineConfig},
    ConsoleUi, Ui, UiApp,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.tui);

    if let Commands::ExcludedRegions = cli.command {
        println!("Regions excluded from the render database:\n");
        for id in RegionFilter::default().excluded_ids() {
            println!("  {}", id);
        }
        return Ok(());
    }

    if cli.tui {
        let mut app = UiApp::new()?;
        match execute(cli.command, &mut app) {
            Ok(summary) => app.finish(&summary),
            Err(e) => {
                app.restore()?;
                Err(e)
            }
        }
    } else {
        let mut console = ConsoleUi::new();
        let summary = execute(cli.command, &mut console)?;
        console.log(summary);
        Ok(())
    }
}

/// Log to stderr; the dashboard owns the terminal, so it stays quiet unless
/// RUST_LOG asks otherwise
fn init_tracing(tui: bool) {
    let default_filter = if tui { "off" } else { "eve_sde_render=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run a command and return a one-line summary
fn execute(command: Commands, ui: &mut impl Ui) -> Result<String> {
    let start = Instant::now();

    match command {
        Commands::Sync {
            output_dir,
            exclude_regions,
            force,
            cache_dir,
        } => {
            let (input_dir, build_number) = ensure_sde_downloaded(cache_dir, force, ui)?;
            let output_dir = output_dir.unwrap_or_else(|| input_dir.clone());
            let config = PipelineConfig::new(
                &input_dir,
                &output_dir,
                RegionFilter::with_extra(exclude_regions),
            );

            let summary = pipeline::run(&config, ui)?;
            Ok(format!(
                "Built {:?} ({} records) and {:?} ({} records) from SDE build {} in {:.1}s",
                config.universe_db,
                summary.universe_records,
                config.render_db,
                summary.render_records,
                build_number,
                start.elapsed().as_secs_f64()
            ))
        }

        Commands::Download { output, force } => {
            let (path, build_number) = ensure_sde_downloaded(output, force, ui)?;
            Ok(format!("SDE build {} available at {:?}", build_number, path))
        }

        Commands::Process {
            input_dir,
            universe_db,
            render_db,
            exclude_regions,
        } => {
            let mut config = PipelineConfig::new(
                &input_dir,
                &input_dir,
                RegionFilter::with_extra(exclude_regions),
            );
            if let Some(path) = universe_db {
                config.universe_db = path;
            }
            if let Some(path) = render_db {
                config.render_db = path;
            }

            let summary = pipeline::run(&config, ui)?;
            Ok(format!(
                "Built {:?} ({} records) and {:?} ({} records) in {:.1}s",
                config.universe_db,
                summary.universe_records,
                config.render_db,
                summary.render_records,
                start.elapsed().as_secs_f64()
            ))
        }

        Commands::ExcludedRegions => Ok(String::new()),
    }
}
