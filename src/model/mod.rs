//! Typed records for the SDE map files

pub mod entities;
pub mod position;

pub use entities::*;
pub use position::*;
