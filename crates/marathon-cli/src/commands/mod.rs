pub mod contest;
pub mod day;
pub mod rules;
pub mod vote;

use std::error::Error;
use std::path::Path;

use marathon_core::{EngineConfig, HttpBackend};

/// Build the HTTP backend from the config file, falling back to
/// defaults when the file does not exist yet.
pub(crate) fn backend_from(config_path: &Path) -> Result<HttpBackend, Box<dyn Error>> {
    let config = if config_path.exists() {
        EngineConfig::load_from(config_path)?
    } else {
        EngineConfig::default()
    };
    Ok(HttpBackend::from_config(&config)?)
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}
