//! Orchestrates a full run: parse the four map files, derive the render
//! dataset, then write both databases.
//!
//! Nothing is written until both datasets have been derived, and both
//! databases are staged before either replaces an existing file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::filter::RegionFilter;
use crate::links::{
    calculate_constellation_links, process_stargate_links, system_lookup, ConstellationLink,
    LinkTypeCounts, StargateLink,
};
use crate::model::{Constellation, Region, SolarSystem, Stargate};
use crate::parser::{parse_constellations, parse_regions, parse_solar_systems, parse_stargates};
use crate::scale::{rescale_collection, RenderEntity};
use crate::ui::{Phase, RunStat, Ui};
use crate::writer::{write_render_db, write_universe_db, StagedDatabase};

pub const UNIVERSE_DB_NAME: &str = "universe.db";
pub const RENDER_DB_NAME: &str = "render.db";

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the extracted SDE JSONL files
    pub input_dir: PathBuf,
    pub universe_db: PathBuf,
    pub render_db: PathBuf,
    pub region_filter: RegionFilter,
}

impl PipelineConfig {
    /// Outputs default to `universe.db` and `render.db` inside `output_dir`
    pub fn new(input_dir: &Path, output_dir: &Path, region_filter: RegionFilter) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            universe_db: output_dir.join(UNIVERSE_DB_NAME),
            render_db: output_dir.join(RENDER_DB_NAME),
            region_filter,
        }
    }
}

/// The full parsed snapshot
#[derive(Debug, Clone, Default)]
pub struct UniverseSnapshot {
    pub solar_systems: Vec<SolarSystem>,
    pub stargates: Vec<Stargate>,
    pub regions: Vec<Region>,
    pub constellations: Vec<Constellation>,
}

impl UniverseSnapshot {
    pub fn load(input_dir: &Path, ui: &mut impl Ui) -> Result<Self> {
        Ok(Self {
            solar_systems: parse_solar_systems(input_dir, ui)?,
            stargates: parse_stargates(input_dir, ui)?,
            regions: parse_regions(input_dir, ui)?,
            constellations: parse_constellations(input_dir, ui)?,
        })
    }

    pub fn record_count(&self) -> usize {
        self.solar_systems.len() + self.stargates.len() + self.regions.len() + self.constellations.len()
    }
}

/// The filtered, rescaled dataset consumed by the map viewer
#[derive(Debug, Clone, Default)]
pub struct RenderSnapshot {
    pub solar_systems: Vec<RenderEntity>,
    pub regions: Vec<RenderEntity>,
    pub constellations: Vec<RenderEntity>,
    pub stargate_links: Vec<StargateLink>,
    pub constellation_links: Vec<ConstellationLink>,
}

impl RenderSnapshot {
    /// Filter out excluded regions, rescale each entity type against its own
    /// bounding box and derive the link sets.
    pub fn build(universe: &UniverseSnapshot, filter: &RegionFilter) -> Result<Self> {
        let regions = filter.regions(&universe.regions);
        let solar_systems = filter.solar_systems(&universe.solar_systems);
        let constellations = filter.constellations(&universe.constellations);
        let stargates = filter.stargates(&universe.stargates, &solar_systems);

        info!(
            regions = regions.len(),
            constellations = constellations.len(),
            solar_systems = solar_systems.len(),
            stargates = stargates.len(),
            "applied region filter"
        );

        let systems_by_id = system_lookup(&solar_systems);
        let stargate_links = process_stargate_links(&stargates, &systems_by_id);
        let constellation_links = calculate_constellation_links(&stargate_links, &systems_by_id);

        Ok(Self {
            solar_systems: rescale_collection(&solar_systems, "solar system")?,
            regions: rescale_collection(&regions, "region")?,
            constellations: rescale_collection(&constellations, "constellation")?,
            stargate_links,
            constellation_links,
        })
    }

    pub fn counts(&self) -> RenderCounts {
        RenderCounts {
            solar_systems: self.solar_systems.len(),
            regions: self.regions.len(),
            constellations: self.constellations.len(),
            stargate_links: LinkTypeCounts::tally(&self.stargate_links),
            constellation_links: self.constellation_links.len(),
        }
    }

    pub fn record_count(&self) -> usize {
        self.solar_systems.len()
            + self.regions.len()
            + self.constellations.len()
            + self.stargate_links.len()
            + self.constellation_links.len()
    }
}

/// Size of a render snapshot, with stargate links split by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounts {
    pub solar_systems: usize,
    pub regions: usize,
    pub constellations: usize,
    pub stargate_links: LinkTypeCounts,
    pub constellation_links: usize,
}

/// Row counts written by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub universe_records: u64,
    pub render_records: u64,
    pub stargate_links: usize,
    pub constellation_links: usize,
}

/// Parse, derive and persist both databases
pub fn run(config: &PipelineConfig, ui: &mut impl Ui) -> Result<RunSummary> {
    ui.set_phase(Phase::Parsing);
    ui.set_info(format!("Reading {:?}", config.input_dir));
    let universe = UniverseSnapshot::load(&config.input_dir, ui)?;
    ui.clear_progress();
    info!(records = universe.record_count(), "loaded universe snapshot");

    ui.set_phase(Phase::Deriving);
    let render = RenderSnapshot::build(&universe, &config.region_filter)?;
    info!(records = render.record_count(), "derived render snapshot");
    ui.report(RunStat::Derived(render.counts()));

    ui.set_phase(Phase::Writing);
    let universe_db = StagedDatabase::new(&config.universe_db);
    let render_db = StagedDatabase::new(&config.render_db);

    let written = write_universe_db(universe_db.staging_path(), &universe, ui).and_then(|u| {
        write_render_db(render_db.staging_path(), &render, ui).map(|r| (u, r))
    });

    let (universe_records, render_records) = match written {
        Ok(counts) => counts,
        Err(e) => {
            universe_db.discard();
            render_db.discard();
            return Err(e);
        }
    };

    if let Err(e) = StagedDatabase::commit_all(&[&universe_db, &render_db]) {
        universe_db.discard();
        render_db.discard();
        return Err(e);
    }
    ui.clear_progress();

    ui.log(format!("Universe database: {:?}", universe_db.target_path()));
    ui.log(format!("Render database: {:?}", render_db.target_path()));

    Ok(RunSummary {
        universe_records,
        render_records,
        stargate_links: render.stargate_links.len(),
        constellation_links: render.constellation_links.len(),
    })
}
