//! Table definitions for the universe and render databases.
//!
//! Table and column names are read by the map viewer and must not change.

use super::types::*;

// =============================================================================
// Universe database
// =============================================================================

pub static REGIONS: TableSchema = TableSchema {
    name: "Regions",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("Name", ColumnType::Text),
        Column::new("FactionId", ColumnType::Integer),
        Column::new("PositionX", ColumnType::Real),
        Column::new("PositionY", ColumnType::Real),
        Column::new("PositionZ", ColumnType::Real),
    ],
    primary_key: &["Id"],
    foreign_keys: &[],
};

pub static CONSTELLATIONS: TableSchema = TableSchema {
    name: "Constellations",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("Name", ColumnType::Text),
        Column::new("RegionId", ColumnType::Integer),
        Column::new("FactionId", ColumnType::Integer),
        Column::new("PositionX", ColumnType::Real),
        Column::new("PositionY", ColumnType::Real),
        Column::new("PositionZ", ColumnType::Real),
    ],
    primary_key: &["Id"],
    foreign_keys: &[ForeignKey::new("RegionId", "Regions")],
};

pub static SOLAR_SYSTEMS: TableSchema = TableSchema {
    name: "SolarSystems",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("Name", ColumnType::Text),
        Column::new("RegionId", ColumnType::Integer),
        Column::new("ConstellationId", ColumnType::Integer),
        Column::new("FactionId", ColumnType::Integer),
        Column::new("PositionX", ColumnType::Real),
        Column::new("PositionY", ColumnType::Real),
        Column::new("PositionZ", ColumnType::Real),
        Column::new("Position2DX", ColumnType::Real),
        Column::new("Position2DY", ColumnType::Real),
        Column::new("SecurityClass", ColumnType::Text),
        Column::new("SecurityStatus", ColumnType::Real),
    ],
    primary_key: &["Id"],
    foreign_keys: &[
        ForeignKey::new("RegionId", "Regions"),
        ForeignKey::new("ConstellationId", "Constellations"),
    ],
};

pub static STARGATES: TableSchema = TableSchema {
    name: "Stargates",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::required("SourceSystemId", ColumnType::Integer),
        Column::required("DestinationSystemId", ColumnType::Integer),
        Column::new("DestinationStargateId", ColumnType::Integer),
    ],
    primary_key: &["Id"],
    foreign_keys: &[
        ForeignKey::new("SourceSystemId", "SolarSystems"),
        ForeignKey::new("DestinationSystemId", "SolarSystems"),
    ],
};

/// Universe tables, parents before children
pub static UNIVERSE_TABLES: &[&TableSchema] = &[&REGIONS, &CONSTELLATIONS, &SOLAR_SYSTEMS, &STARGATES];

// =============================================================================
// Render database
// =============================================================================

const RENDER_ENTITY_COLUMNS: &[Column] = &[
    Column::required("Id", ColumnType::Integer),
    Column::new("Name", ColumnType::Text),
    Column::new("RenderCoords", ColumnType::Json),
];

pub static RENDER_REGIONS: TableSchema = TableSchema {
    name: "RenderRegions",
    columns: RENDER_ENTITY_COLUMNS,
    primary_key: &["Id"],
    foreign_keys: &[],
};

pub static RENDER_CONSTELLATIONS: TableSchema = TableSchema {
    name: "RenderConstellations",
    columns: RENDER_ENTITY_COLUMNS,
    primary_key: &["Id"],
    foreign_keys: &[],
};

pub static RENDER_SOLAR_SYSTEMS: TableSchema = TableSchema {
    name: "RenderSolarSystems",
    columns: RENDER_ENTITY_COLUMNS,
    primary_key: &["Id"],
    foreign_keys: &[],
};

pub static STARGATE_LINKS: TableSchema = TableSchema {
    name: "StargateLinks",
    columns: &[
        Column::required("SourceSystemId", ColumnType::Integer),
        Column::required("DestinationSystemId", ColumnType::Integer),
        Column::required("LinkType", ColumnType::Text),
    ],
    primary_key: &["SourceSystemId", "DestinationSystemId"],
    foreign_keys: &[
        ForeignKey::new("SourceSystemId", "RenderSolarSystems"),
        ForeignKey::new("DestinationSystemId", "RenderSolarSystems"),
    ],
};

pub static CONSTELLATION_LINKS: TableSchema = TableSchema {
    name: "ConstellationLinks",
    columns: &[
        Column::required("SourceConstellationId", ColumnType::Integer),
        Column::required("DestinationConstellationId", ColumnType::Integer),
    ],
    primary_key: &["SourceConstellationId", "DestinationConstellationId"],
    foreign_keys: &[
        ForeignKey::new("SourceConstellationId", "RenderConstellations"),
        ForeignKey::new("DestinationConstellationId", "RenderConstellations"),
    ],
};

pub static RENDER_TABLES: &[&TableSchema] = &[
    &RENDER_REGIONS,
    &RENDER_CONSTELLATIONS,
    &RENDER_SOLAR_SYSTEMS,
    &STARGATE_LINKS,
    &CONSTELLATION_LINKS,
];
