pub mod row;
pub mod schema_gen;
pub mod sqlite;

pub use row::{ParsedRow, SqlValue, ToRow};
pub use sqlite::SqliteWriter;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::pipeline::{RenderSnapshot, UniverseSnapshot};
use crate::schema::{
    CONSTELLATIONS, CONSTELLATION_LINKS, REGIONS, RENDER_CONSTELLATIONS, RENDER_REGIONS,
    RENDER_SOLAR_SYSTEMS, RENDER_TABLES, SOLAR_SYSTEMS, STARGATES, STARGATE_LINKS,
    UNIVERSE_TABLES,
};
use crate::ui::Ui;

/// Write the full parsed snapshot. Returns the number of rows written.
pub fn write_universe_db(path: &Path, universe: &UniverseSnapshot, ui: &mut impl Ui) -> Result<u64> {
    let mut writer = SqliteWriter::new(path)?;
    writer.create_tables(UNIVERSE_TABLES)?;

    let mut total = 0;
    total += writer.insert_records(&REGIONS, &universe.regions, ui)?;
    total += writer.insert_records(&CONSTELLATIONS, &universe.constellations, ui)?;
    total += writer.insert_records(&SOLAR_SYSTEMS, &universe.solar_systems, ui)?;
    total += writer.insert_records(&STARGATES, &universe.stargates, ui)?;

    writer.finalize()?;
    Ok(total)
}

/// Write the filtered, rescaled render snapshot. Returns the number of rows written.
pub fn write_render_db(path: &Path, render: &RenderSnapshot, ui: &mut impl Ui) -> Result<u64> {
    let mut writer = SqliteWriter::new(path)?;
    writer.create_tables(RENDER_TABLES)?;

    let mut total = 0;
    total += writer.insert_records(&RENDER_REGIONS, &render.regions, ui)?;
    total += writer.insert_records(&RENDER_CONSTELLATIONS, &render.constellations, ui)?;
    total += writer.insert_records(&RENDER_SOLAR_SYSTEMS, &render.solar_systems, ui)?;
    total += writer.insert_records(&STARGATE_LINKS, &render.stargate_links, ui)?;
    total += writer.insert_records(&CONSTELLATION_LINKS, &render.constellation_links, ui)?;

    writer.finalize()?;
    Ok(total)
}

/// An output database written under a temporary name and moved into place
/// once complete
pub struct StagedDatabase {
    target: PathBuf,
    staging: PathBuf,
    backup: PathBuf,
}

impl StagedDatabase {
    pub fn new(target: &Path) -> Self {
        let name = target
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("output.db"));
        let with_suffix = |suffix: &str| {
            let mut name = name.clone();
            name.push(suffix);
            target.with_file_name(name)
        };

        Self {
            target: target.to_path_buf(),
            staging: with_suffix(".partial"),
            backup: with_suffix(".previous"),
        }
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    pub fn target_path(&self) -> &Path {
        &self.target
    }

    /// Replace the target with the staged file
    pub fn commit(&self) -> Result<()> {
        std::fs::rename(&self.staging, &self.target).with_context(|| {
            format!("Failed to move {:?} to {:?}", self.staging, self.target)
        })
    }

    /// Commit every staged database, or leave all targets as they were.
    ///
    /// Existing targets are moved to `<name>.previous` first and moved back
    /// if any commit fails.
    pub fn commit_all(staged: &[&StagedDatabase]) -> Result<()> {
        let mut backed_up: Vec<&StagedDatabase> = Vec::new();
        for db in staged {
            if !db.target.exists() {
                continue;
            }
            if let Err(e) = std::fs::rename(&db.target, &db.backup) {
                restore_backups(&backed_up);
                return Err(e).with_context(|| format!("Failed to set aside {:?}", db.target));
            }
            backed_up.push(*db);
        }

        let mut committed: Vec<&StagedDatabase> = Vec::new();
        for db in staged {
            if let Err(e) = db.commit() {
                for done in &committed {
                    std::fs::remove_file(&done.target).ok();
                }
                restore_backups(&backed_up);
                return Err(e);
            }
            committed.push(*db);
        }

        for db in backed_up {
            std::fs::remove_file(&db.backup).ok();
        }
        Ok(())
    }

    /// Remove the staged file and any SQLite side files
    pub fn discard(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.staging.clone().into_os_string();
            path.push(suffix);
            std::fs::remove_file(PathBuf::from(path)).ok();
        }
    }
}

fn restore_backups(backed_up: &[&StagedDatabase]) {
    for db in backed_up {
        if let Err(e) = std::fs::rename(&db.backup, &db.target) {
            warn!(
                path = ?db.target,
                backup = ?db.backup,
                "Failed to restore previous database: {}",
                e
            );
        }
    }
}
