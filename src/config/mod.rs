use serde::Deserialize;
use std::{fs, path::Path};

use crate::serial::SerializationFormat;

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the SQLite database file backing the overflow store.
    pub path: String,
    pub format: SerializationFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BufferConfig {
    pub floor: usize,
    pub ceiling: usize,
    pub auto_start: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BlockingConfig {
    /// Maximum in-flight items; omit for unbounded.
    pub capacity: Option<usize>,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub buffer: BufferConfig,
    /// When present, an admission-control layer is placed over the buffered
    /// queue; omit the section for direct, unbounded access.
    pub blocking: Option<BlockingConfig>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, anyhow::Error> {
    let raw: String = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    Ok(config)
}
