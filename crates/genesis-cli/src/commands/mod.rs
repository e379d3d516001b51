pub mod config;
pub mod run;

use std::path::Path;

use genesis_sim::SimConfig;

/// Load a config file if one was given, otherwise start from the defaults.
fn load_config(path: Option<&Path>) -> Result<SimConfig, String> {
    match path {
        Some(path) => SimConfig::from_json_file(path)
            .map_err(|e| format!("could not load {}: {e}", path.display())),
        None => Ok(SimConfig::default()),
    }
}
