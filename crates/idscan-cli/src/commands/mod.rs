pub mod batch;
pub mod config;
pub mod date;
pub mod pipeline;
pub mod process;
pub mod validate;

use std::path::Path;

use tracing::debug;

use idscan_core::models::config::IdscanConfig;

/// Load the config given on the command line, else the user config file,
/// else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdscanConfig> {
    if let Some(path) = config_path {
        return Ok(IdscanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(IdscanConfig::from_file(&default_path)?)
    } else {
        Ok(IdscanConfig::default())
    }
}
