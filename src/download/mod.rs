pub mod cache;
pub mod client;
pub mod extract;

pub use cache::*;
pub use client::*;
pub use extract::*;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::ui::{Phase, Ui};

/// Make sure the latest SDE build is extracted in the cache.
///
/// Returns the build directory and build number.
pub fn ensure_sde_downloaded(
    cache_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<(PathBuf, u64)> {
    ui.set_phase(Phase::Checking);
    let cache = CacheManager::new(cache_dir)?;
    let client = SdeClient::new()?;

    let info = client.fetch_latest_info()?;
    let build_number = info.build_number;
    let build_dir = cache.build_dir(build_number);
    ui.set_info(format!("SDE build {} ({})", build_number, info.release_date));
    info!(
        build_number,
        release_date = %info.release_date,
        cache = ?cache.cache_dir(),
        "latest SDE build"
    );

    if !force && cache.is_cached(build_number) {
        ui.log(format!("Build {} already cached at {:?}", build_number, build_dir));
        return Ok((build_dir, build_number));
    }

    ui.set_phase(Phase::Downloading);
    let zip_path = cache.zip_path(build_number);
    client.download_zip(build_number, &zip_path, ui)?;
    ui.clear_progress();

    ui.set_phase(Phase::Extracting);
    if build_dir.exists() {
        std::fs::remove_dir_all(&build_dir)
            .with_context(|| format!("Failed to clear {:?}", build_dir))?;
    }
    let extracted = extract_zip(&zip_path, &build_dir, ui);
    std::fs::remove_file(&zip_path).ok();
    extracted?;
    ui.clear_progress();

    cache.cleanup_old_builds(build_number)?;

    Ok((build_dir, build_number))
}
