use rust_decimal::Decimal;

use super::position::{Position2, Position3, Positioned};

pub type SystemId = i64;
pub type RegionId = i64;
pub type ConstellationId = i64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarSystem {
    pub id: SystemId,
    pub name: Option<String>,
    pub constellation_id: Option<ConstellationId>,
    pub region_id: Option<RegionId>,
    pub faction_id: Option<i64>,
    pub position: Position3,
    pub position_2d: Position2,
    pub security_class: Option<String>,
    pub security_status: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: Option<String>,
    pub faction_id: Option<i64>,
    pub position: Position3,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constellation {
    pub id: ConstellationId,
    pub name: Option<String>,
    pub region_id: Option<RegionId>,
    pub faction_id: Option<i64>,
    pub position: Position3,
}

/// One-directional gate from `source_system_id` to `destination_system_id`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stargate {
    pub id: i64,
    pub source_system_id: SystemId,
    pub destination_system_id: SystemId,
    pub destination_stargate_id: Option<i64>,
}

impl Stargate {
    /// Gates missing their id or either endpoint are not usable
    pub fn is_valid(&self) -> bool {
        self.id > 0 && self.source_system_id > 0 && self.destination_system_id > 0
    }
}

/// Entities that carry an id and display name into the render database
pub trait Named {
    fn id(&self) -> i64;
    fn name(&self) -> Option<&str>;
}

macro_rules! impl_map_entity {
    ($ty:ty) => {
        impl Positioned for $ty {
            fn position(&self) -> &Position3 {
                &self.position
            }
        }

        impl Named for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }
    };
}

impl_map_entity!(SolarSystem);
impl_map_entity!(Region);
impl_map_entity!(Constellation);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stargate_validity() {
        let gate = Stargate {
            id: 50000001,
            source_system_id: 30000001,
            destination_system_id: 30000002,
            destination_stargate_id: None,
        };
        assert!(gate.is_valid());

        assert!(!Stargate { id: 0, ..gate.clone() }.is_valid());
        assert!(!Stargate { source_system_id: 0, ..gate.clone() }.is_valid());
        assert!(!Stargate { destination_system_id: -1, ..gate }.is_valid());
    }
}
