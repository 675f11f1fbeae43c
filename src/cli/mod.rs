pub mod analyze;
pub mod commands;
pub mod serve;

pub use commands::{Cli, Commands};

use std::path::PathBuf;

use crate::config::{parse_config, SitescopeConfig};
use crate::errors::SitescopeError;

/// Load the YAML config when a path was given; otherwise fall back to the
/// defaults (credentials then resolve purely from the environment).
pub async fn load_config(path: Option<&str>) -> Result<SitescopeConfig, SitescopeError> {
    match path {
        Some(path) => parse_config(&PathBuf::from(path)).await,
        None => Ok(SitescopeConfig::default()),
    }
}
