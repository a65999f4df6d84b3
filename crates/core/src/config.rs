//! Game configuration, loaded from JSON.
//!
//! Every field has a default, so an empty object (or no file at all) gives the
//! standard game: three regular levels and one track per level.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::Soundtrack;
use crate::types::DEFAULT_LEVEL_CAP;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Piece sequence seed; `None` lets the caller pick one
    pub seed: Option<u32>,
    /// Highest regular level; finishing it wins the game
    pub level_cap: u32,
    /// Background music per level
    pub soundtrack: Soundtrack,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            level_cap: DEFAULT_LEVEL_CAP,
            soundtrack: Soundtrack::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("invalid game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.level_cap >= 1, "level_cap must be at least 1");
        Ok(())
    }
}
