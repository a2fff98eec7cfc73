use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

const SCANBOT_SCENARIO_ENV_NAME: &str = "SCANBOT_SCENARIO_PATH";
const DEFAULT_LOG_FILTER: &str = "scanbot=info";

/// Get scenario config from input or env SCANBOT_SCENARIO_PATH
pub fn get_scenario_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(SCANBOT_SCENARIO_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `scanbot=info` filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
