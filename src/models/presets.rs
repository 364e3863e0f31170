//! Predefined pack size configurations.

use serde::Serialize;

use crate::config::DEFAULT_PACK_SIZES;

/// A named pack size set offered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: String,
    pub pack_sizes: Vec<i64>,
}

impl Preset {
    fn new(name: &str, pack_sizes: &[i64]) -> Self {
        Self {
            name: name.to_string(),
            pack_sizes: pack_sizes.to_vec(),
        }
    }
}

pub fn presets() -> Vec<Preset> {
    vec![
        Preset::new("Standard", &DEFAULT_PACK_SIZES),
        Preset::new("Edge Case", &[23, 31, 53]),
        Preset::new("Small Packs", &[10, 25, 50, 100]),
    ]
}
