//! Bounding boxes and linear rescaling of SDE positions into render space.
//!
//! SDE coordinates are in metres and span roughly 1e17 in every direction,
//! so positions are mapped into a fixed cube with side [`RENDER_RANGE`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Named, Position3, Positioned};

/// Side length of the render cube
pub const RENDER_RANGE: i64 = 10_000;

/// Axis-aligned bounds over every entity with a complete position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Decimal,
    pub max_x: Decimal,
    pub min_y: Decimal,
    pub max_y: Decimal,
    pub min_z: Decimal,
    pub max_z: Decimal,
}

impl BoundingBox {
    /// Compute bounds for a collection; `collection` names it in errors.
    ///
    /// Entities missing any axis are ignored.
    pub fn from_entities<T: Positioned>(
        entities: &[T],
        collection: &'static str,
    ) -> Result<Self, Error> {
        if entities.is_empty() {
            return Err(Error::EmptyInput { collection });
        }

        let mut positions = entities.iter().filter_map(|e| e.position().complete());

        let (x, y, z) = positions
            .next()
            .ok_or(Error::NoValidPositions { collection })?;

        let mut bounds = BoundingBox {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
            min_z: z,
            max_z: z,
        };

        for (x, y, z) in positions {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
            bounds.min_z = bounds.min_z.min(z);
            bounds.max_z = bounds.max_z.max(z);
        }

        Ok(bounds)
    }

    pub fn range_x(&self) -> Decimal {
        self.max_x - self.min_x
    }

    pub fn range_y(&self) -> Decimal {
        self.max_y - self.min_y
    }

    pub fn range_z(&self) -> Decimal {
        self.max_z - self.min_z
    }
}

/// Position inside the render cube, stored in the render database as JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderCoords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RenderCoords {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from(r#"{"x":0.0,"y":0.0,"z":0.0}"#))
    }
}

/// Map a position into the render cube, one axis at a time.
///
/// An incomplete position maps to the origin. An axis with zero range maps
/// to 0.
pub fn scale_coordinates(position: &Position3, bounds: &BoundingBox) -> RenderCoords {
    let Some((x, y, z)) = position.complete() else {
        return RenderCoords::default();
    };

    RenderCoords {
        x: scale_axis(x, bounds.min_x, bounds.range_x()),
        y: scale_axis(y, bounds.min_y, bounds.range_y()),
        z: scale_axis(z, bounds.min_z, bounds.range_z()),
    }
}

fn scale_axis(value: Decimal, min: Decimal, range: Decimal) -> f64 {
    if range <= Decimal::ZERO {
        return 0.0;
    }

    (value - min)
        .checked_div(range)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(RENDER_RANGE)))
        .and_then(|scaled| scaled.to_f64())
        .unwrap_or(0.0)
}

/// An entity reduced to what the render database stores
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntity {
    pub id: i64,
    pub name: Option<String>,
    pub coords: RenderCoords,
}

/// Rescale a whole collection against its own bounding box
pub fn rescale_collection<T: Positioned + Named>(
    entities: &[T],
    collection: &'static str,
) -> Result<Vec<RenderEntity>, Error> {
    let bounds = BoundingBox::from_entities(entities, collection)?;

    Ok(entities
        .iter()
        .map(|entity| RenderEntity {
            id: entity.id(),
            name: entity.name().map(str::to_string),
            coords: scale_coordinates(entity.position(), &bounds),
        })
        .collect())
}
