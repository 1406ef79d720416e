//! Fixture configuration: TOML schema, loading, validation.
//!
//! The schema mirrors the sections of the config file one to one.
//! Deserialization catches shape errors (unknown hole tags, wrong-arity
//! annotation tuples); `Config::validate` catches value errors before any
//! geometry work starts.

pub mod error;
pub mod schema;

pub use error::ConfigError;
pub use schema::{
    AlignmentPinConfig, Config, PcbConfig, PlateConfig, PlateSize, PointMm, ProjectConfig,
    TesterBoardConfig,
};

use std::path::Path;

/// Read, parse, and validate a config file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    config.validate()?;
    Ok(config)
}
