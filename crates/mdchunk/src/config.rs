//! Configuration loading for mdchunk.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use section_chunker::ChunkerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub chunking: Option<ChunkingConfig>,
}

/// `[chunking]` table; unset keys fall through to the preset
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_tokens: Option<usize>,
    pub overlap: Option<usize>,
    pub min_tokens: Option<usize>,
}

impl ChunkingConfig {
    /// Overlay the values that are set onto `base`.
    pub fn apply(&self, base: ChunkerConfig) -> ChunkerConfig {
        ChunkerConfig {
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            overlap: self.overlap.unwrap_or(base.overlap),
            min_tokens: self.min_tokens.unwrap_or(base.min_tokens),
        }
    }
}

impl Config {
    /// Final chunker settings: command-line values over the config file over `base`.
    pub fn resolve(&self, base: ChunkerConfig, cli: &ChunkingConfig) -> Result<ChunkerConfig> {
        let from_file = self.chunking.unwrap_or_default().apply(base);
        let resolved = cli.apply(from_file);
        resolved
            .validate()
            .context("Invalid chunking configuration")?;
        Ok(resolved)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "mdchunk").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}
