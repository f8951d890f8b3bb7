use rust_decimal::Decimal;

/// 3D position as read from the SDE; each axis may be missing independently
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position3 {
    pub x: Option<Decimal>,
    pub y: Option<Decimal>,
    pub z: Option<Decimal>,
}

impl Position3 {
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// All three axes, or `None` if any one is missing
    pub fn complete(&self) -> Option<(Decimal, Decimal, Decimal)> {
        Some((self.x?, self.y?, self.z?))
    }
}

/// Projected map position (`position2D` in the SDE has no z axis)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position2 {
    pub x: Option<Decimal>,
    pub y: Option<Decimal>,
}

/// Anything with a 3D position that can be rescaled into render space
pub trait Positioned {
    fn position(&self) -> &Position3;
}
