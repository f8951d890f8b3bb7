use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::links::{ConstellationLink, StargateLink};
use crate::model::{Constellation, Position3, Region, SolarSystem, Stargate};
use crate::scale::RenderEntity;

/// A row ready for insertion, keyed by column name
#[derive(Debug, Default)]
pub struct ParsedRow {
    pub values: HashMap<&'static str, SqlValue>,
}

impl ParsedRow {
    fn with(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.values.insert(column, value.into());
        self
    }

    fn with_position(self, position: &Position3) -> Self {
        self.with("PositionX", position.x)
            .with("PositionY", position.y)
            .with("PositionZ", position.z)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Conversion of a record into a database row
pub trait ToRow {
    fn to_row(&self) -> ParsedRow;
}

impl ToRow for Region {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("Id", self.id)
            .with("Name", self.name.clone())
            .with("FactionId", self.faction_id)
            .with_position(&self.position)
    }
}

impl ToRow for Constellation {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("Id", self.id)
            .with("Name", self.name.clone())
            .with("RegionId", self.region_id)
            .with("FactionId", self.faction_id)
            .with_position(&self.position)
    }
}

impl ToRow for SolarSystem {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("Id", self.id)
            .with("Name", self.name.clone())
            .with("RegionId", self.region_id)
            .with("ConstellationId", self.constellation_id)
            .with("FactionId", self.faction_id)
            .with_position(&self.position)
            .with("Position2DX", self.position_2d.x)
            .with("Position2DY", self.position_2d.y)
            .with("SecurityClass", self.security_class.clone())
            .with("SecurityStatus", self.security_status)
    }
}

impl ToRow for Stargate {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("Id", self.id)
            .with("SourceSystemId", self.source_system_id)
            .with("DestinationSystemId", self.destination_system_id)
            .with("DestinationStargateId", self.destination_stargate_id)
    }
}

impl ToRow for RenderEntity {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("Id", self.id)
            .with("Name", self.name.clone())
            .with("RenderCoords", self.coords.to_json())
    }
}

impl ToRow for StargateLink {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("SourceSystemId", self.source_system_id)
            .with("DestinationSystemId", self.destination_system_id)
            .with("LinkType", self.link_type.as_str())
    }
}

impl ToRow for ConstellationLink {
    fn to_row(&self) -> ParsedRow {
        ParsedRow::default()
            .with("SourceConstellationId", self.source_constellation_id)
            .with("DestinationConstellationId", self.destination_constellation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkType;
    use crate::model::Position2;
    use crate::schema::{SOLAR_SYSTEMS, STARGATE_LINKS};

    #[test]
    fn test_solar_system_row_covers_schema() {
        let system = SolarSystem {
            id: 30000142,
            name: Some("Jita".to_string()),
            region_id: Some(10000002),
            position: Position3::new(Decimal::ONE, Decimal::TWO, Decimal::TEN),
            position_2d: Position2 {
                x: Some(Decimal::ONE),
                y: None,
            },
            security_status: Some(Decimal::new(5, 1)),
            ..Default::default()
        };
        let row = system.to_row();

        for column in SOLAR_SYSTEMS.column_names() {
            assert!(row.values.contains_key(column), "missing column {}", column);
        }
        assert_eq!(row.values["Id"], SqlValue::Integer(30000142));
        assert_eq!(row.values["Name"], SqlValue::Text("Jita".to_string()));
        assert_eq!(row.values["ConstellationId"], SqlValue::Null);
        assert_eq!(row.values["PositionZ"], SqlValue::Real(10.0));
        assert_eq!(row.values["Position2DY"], SqlValue::Null);
        assert_eq!(row.values["SecurityStatus"], SqlValue::Real(0.5));
    }

    #[test]
    fn test_link_row() {
        let link = StargateLink {
            source_system_id: 1,
            destination_system_id: 2,
            link_type: LinkType::Regional,
        };
        let row = link.to_row();
        assert_eq!(row.values.len(), STARGATE_LINKS.columns.len());
        assert_eq!(row.values["LinkType"], SqlValue::Text("regional".to_string()));
    }
}
