//! Selectable browser and OS names, bundled with the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const EMBEDDED_MAP: &str = include_str!("../data/map.json");

/// The browsers and operating systems a catalog exists for.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionsMap {
    pub browser: Vec<String>,
    pub os: Vec<String>,
}

pub fn load_options() -> Result<OptionsMap> {
    serde_json::from_str(EMBEDDED_MAP).context("Failed to parse embedded map.json")
}
