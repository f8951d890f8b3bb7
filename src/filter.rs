use std::collections::{BTreeSet, HashSet};

use crate::model::{Constellation, Region, RegionId, SolarSystem, Stargate, SystemId};

/// Regions left out of the render database: the unreachable Jove regions,
/// wormhole space and Abyssal deadspace.
pub const EXCLUDED_REGION_IDS: &[RegionId] = &[
    // Jove
    10000004, 10000017, 10000019,
    // Wormhole space
    11000001, 11000002, 11000003, 11000004, 11000005, 11000006, 11000007, 11000008,
    11000009, 11000010, 11000011, 11000012, 11000013, 11000014, 11000015, 11000016,
    11000017, 11000018, 11000019, 11000020, 11000021, 11000022, 11000023, 11000024,
    11000025, 11000026, 11000027, 11000028, 11000029, 11000030, 11000031, 11000032,
    11000033,
    // Abyssal deadspace
    12000001, 12000002, 12000003, 12000004, 12000005,
];

/// Set of region ids removed from the render dataset, with the cascade onto
/// the entities that live in those regions
#[derive(Debug, Clone)]
pub struct RegionFilter {
    excluded: HashSet<RegionId>,
}

impl RegionFilter {
    pub fn new(excluded: impl IntoIterator<Item = RegionId>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Built-in exclusions plus any extra ids
    pub fn with_extra(extra: Option<Vec<RegionId>>) -> Self {
        Self::new(
            EXCLUDED_REGION_IDS
                .iter()
                .copied()
                .chain(extra.into_iter().flatten()),
        )
    }

    pub fn is_excluded(&self, region_id: RegionId) -> bool {
        self.excluded.contains(&region_id)
    }

    /// Excluded ids in ascending order
    pub fn excluded_ids(&self) -> BTreeSet<RegionId> {
        self.excluded.iter().copied().collect()
    }

    fn keeps(&self, region_id: Option<RegionId>) -> bool {
        region_id.map_or(true, |id| !self.is_excluded(id))
    }

    pub fn regions(&self, regions: &[Region]) -> Vec<Region> {
        regions
            .iter()
            .filter(|r| !self.is_excluded(r.id))
            .cloned()
            .collect()
    }

    /// Systems with no region id are kept
    pub fn solar_systems(&self, systems: &[SolarSystem]) -> Vec<SolarSystem> {
        systems
            .iter()
            .filter(|s| self.keeps(s.region_id))
            .cloned()
            .collect()
    }

    /// Constellations with no region id are kept
    pub fn constellations(&self, constellations: &[Constellation]) -> Vec<Constellation> {
        constellations
            .iter()
            .filter(|c| self.keeps(c.region_id))
            .cloned()
            .collect()
    }

    /// Stargates whose endpoints both survived system filtering
    pub fn stargates(&self, stargates: &[Stargate], systems: &[SolarSystem]) -> Vec<Stargate> {
        let kept: HashSet<SystemId> = systems.iter().map(|s| s.id).collect();
        stargates
            .iter()
            .filter(|g| {
                kept.contains(&g.source_system_id) && kept.contains(&g.destination_system_id)
            })
            .cloned()
            .collect()
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::with_extra(None)
    }
}
