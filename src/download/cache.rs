use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::model::SolarSystem;
use crate::parser::SdeRecord;

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "eve-sde-render")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", cache_dir))?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get path to build-specific directory
    pub fn build_dir(&self, build_number: u64) -> PathBuf {
        self.cache_dir.join(build_number.to_string())
    }

    /// A build is cached once its solar system file has been extracted
    pub fn is_cached(&self, build_number: u64) -> bool {
        self.build_dir(build_number)
            .join(SolarSystem::SOURCE_FILE)
            .exists()
    }

    /// Get path to zip file for a build
    pub fn zip_path(&self, build_number: u64) -> PathBuf {
        self.cache_dir.join(format!("{}.zip", build_number))
    }

    /// Clean up old cached builds, keeping only the specified one
    pub fn cleanup_old_builds(&self, keep_build: u64) -> Result<()> {
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();

            if !path.is_dir() {
                continue;
            }
            let Some(build) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.parse::<u64>().ok())
            else {
                continue;
            };

            if build != keep_build {
                debug!(build, "removing cached build");
                fs::remove_dir_all(&path).ok();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_paths_and_cache_check() {
        let dir = TempDir::new().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(cache.build_dir(42), dir.path().join("42"));
        assert_eq!(cache.zip_path(42), dir.path().join("42.zip"));
        assert!(!cache.is_cached(42));

        fs::create_dir_all(cache.build_dir(42)).unwrap();
        assert!(!cache.is_cached(42));

        fs::write(cache.build_dir(42).join("mapSolarSystems.jsonl"), "").unwrap();
        assert!(cache.is_cached(42));
    }

    #[test]
    fn test_cleanup_keeps_current_build() {
        let dir = TempDir::new().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();

        for name in ["100", "200", "notes"] {
            fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        cache.cleanup_old_builds(200).unwrap();

        assert!(!dir.path().join("100").exists());
        assert!(dir.path().join("200").exists());
        assert!(dir.path().join("notes").exists());
    }
}
