use anyhow::{bail, Context, Result};
use serde_json::Value;

use super::fields::{
    get_decimal, get_i64, get_localized_en, get_position, get_position_2d, get_str,
};
use crate::model::{Constellation, Region, SolarSystem, Stargate};

/// A record type that is read from one SDE JSONL file
pub trait SdeRecord: Sized {
    /// File name inside the snapshot directory
    const SOURCE_FILE: &'static str;
    /// Plural label used in progress and log output
    const LABEL: &'static str;

    /// Build a record from a parsed JSON object; `None` drops the record
    fn from_json(json: &Value) -> Option<Self>;
}

/// Parse a JSON line into a record.
///
/// Errors when the line is not a JSON object. `Ok(None)` means the line
/// was valid JSON but the record failed validation.
pub fn parse_record<T: SdeRecord>(line: &str) -> Result<Option<T>> {
    let json: Value = serde_json::from_str(line).context("Failed to parse JSON")?;
    if !json.is_object() {
        bail!("Expected a JSON object");
    }
    Ok(T::from_json(&json))
}

impl SdeRecord for SolarSystem {
    const SOURCE_FILE: &'static str = "mapSolarSystems.jsonl";
    const LABEL: &'static str = "solar systems";

    fn from_json(json: &Value) -> Option<Self> {
        Some(SolarSystem {
            id: get_i64(json, "_key").unwrap_or_default(),
            name: get_localized_en(json, "name"),
            constellation_id: get_i64(json, "constellationID"),
            region_id: get_i64(json, "regionID"),
            faction_id: get_i64(json, "factionID"),
            position: get_position(json, "position"),
            position_2d: get_position_2d(json, "position2D"),
            security_class: get_str(json, "securityClass"),
            security_status: get_decimal(json, "securityStatus"),
        })
    }
}

impl SdeRecord for Region {
    const SOURCE_FILE: &'static str = "mapRegions.jsonl";
    const LABEL: &'static str = "regions";

    fn from_json(json: &Value) -> Option<Self> {
        Some(Region {
            id: get_i64(json, "_key").unwrap_or_default(),
            name: get_localized_en(json, "name"),
            faction_id: get_i64(json, "factionID"),
            position: get_position(json, "position"),
        })
    }
}

impl SdeRecord for Constellation {
    const SOURCE_FILE: &'static str = "mapConstellations.jsonl";
    const LABEL: &'static str = "constellations";

    fn from_json(json: &Value) -> Option<Self> {
        Some(Constellation {
            id: get_i64(json, "_key").unwrap_or_default(),
            name: get_localized_en(json, "name"),
            region_id: get_i64(json, "regionID"),
            faction_id: get_i64(json, "factionID"),
            position: get_position(json, "position"),
        })
    }
}

impl SdeRecord for Stargate {
    const SOURCE_FILE: &'static str = "mapStargates.jsonl";
    const LABEL: &'static str = "stargates";

    fn from_json(json: &Value) -> Option<Self> {
        let destination = json.get("destination");
        let stargate = Stargate {
            id: get_i64(json, "_key").unwrap_or_default(),
            source_system_id: get_i64(json, "solarSystemID").unwrap_or_default(),
            destination_system_id: destination
                .and_then(|d| get_i64(d, "solarSystemID"))
                .unwrap_or_default(),
            destination_stargate_id: destination.and_then(|d| get_i64(d, "stargateID")),
        };

        stargate.is_valid().then_some(stargate)
    }
}
