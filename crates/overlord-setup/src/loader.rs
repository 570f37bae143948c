//! Loading worker behavior configs from JSON or TOML.
//!
//! JSON is the wire format shared with the rest of the cluster. TOML is
//! accepted for operator-maintained files; it has no `null`, so leaving a
//! field out means the same as `null` in JSON.
//!
//! Both formats decode into the raw input shape first and then go through
//! [`DefaultWorkerBehaviorConfig::new`], so a rejected config surfaces as
//! [`SetupError::InvalidConfiguration`] rather than a decode error.

use std::path::Path;

use tracing::{debug, info};

use crate::behavior::{DefaultWorkerBehaviorConfig, RawWorkerBehaviorConfig};
use crate::error::{SetupError, SetupResult};

pub fn from_json_str(content: &str) -> SetupResult<DefaultWorkerBehaviorConfig> {
    let raw: RawWorkerBehaviorConfig = serde_json::from_str(content)?;
    DefaultWorkerBehaviorConfig::try_from(raw)
}

pub fn from_toml_str(content: &str) -> SetupResult<DefaultWorkerBehaviorConfig> {
    let raw: RawWorkerBehaviorConfig = toml::from_str(content)?;
    DefaultWorkerBehaviorConfig::try_from(raw)
}

/// Load a config file. `.toml` files are parsed as TOML, everything else
/// as JSON.
pub fn from_file(path: &Path) -> SetupResult<DefaultWorkerBehaviorConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| SetupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    debug!(path = %path.display(), toml = is_toml, "loading worker behavior config");

    let config = if is_toml {
        from_toml_str(&content)?
    } else {
        from_json_str(&content)?
    };

    info!(
        path = %path.display(),
        auto_scalers = config.auto_scalers().len(),
        categories = config.categories().len(),
        "loaded worker behavior config"
    );
    Ok(config)
}

/// Normalized JSON: `selectStrategy` and `autoScalers` only.
pub fn to_json_string_pretty(config: &DefaultWorkerBehaviorConfig) -> SetupResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
