pub mod fields;
pub mod jsonl;
pub mod record;

pub use jsonl::parse_jsonl;
pub use record::{parse_record, SdeRecord};

use anyhow::Result;
use std::path::Path;

use crate::model::{Constellation, Region, SolarSystem, Stargate};
use crate::ui::Ui;

pub fn parse_solar_systems(input_dir: &Path, ui: &mut impl Ui) -> Result<Vec<SolarSystem>> {
    parse_jsonl(input_dir, ui)
}

pub fn parse_stargates(input_dir: &Path, ui: &mut impl Ui) -> Result<Vec<Stargate>> {
    parse_jsonl(input_dir, ui)
}

pub fn parse_regions(input_dir: &Path, ui: &mut impl Ui) -> Result<Vec<Region>> {
    parse_jsonl(input_dir, ui)
}

pub fn parse_constellations(input_dir: &Path, ui: &mut impl Ui) -> Result<Vec<Constellation>> {
    parse_jsonl(input_dir, ui)
}
