use super::types::Config;
use crate::error::{BridgeError, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Load configuration from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file does not exist
/// - The file cannot be read
/// - The YAML content is invalid or cannot be parsed
/// - The configuration fails validation (e.g., missing working directory)
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(BridgeError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_saphyr::from_str(&content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Load the configuration the server should run with.
///
/// An explicit path must exist. Without one, the default path is used
/// when present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if an explicit path is missing or if the selected
/// file fails to load.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let path = default_config_path();
    if path.exists() {
        load_config(&path)
    } else {
        debug!(path = %path.display(), "No config file, using defaults");
        Ok(Config::default())
    }
}

/// Validate the configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(dir) = &config.ffuf.working_dir {
        if !dir.is_dir() {
            return Err(BridgeError::ConfigInvalid {
                field: "ffuf.working_dir".to_string(),
                reason: format!("'{}' is not an existing directory", dir.display()),
            });
        }
    }

    for key in config.ffuf.env.keys() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(BridgeError::ConfigInvalid {
                field: "ffuf.env".to_string(),
                reason: format!("Invalid environment variable name '{key}'"),
            });
        }
    }

    for (key, value) in &config.ffuf.env {
        if value.contains('\0') {
            return Err(BridgeError::ConfigInvalid {
                field: format!("ffuf.env.{key}"),
                reason: "Value cannot contain NUL bytes".to_string(),
            });
        }
    }

    Ok(())
}

/// Warn when the ffuf binary given at startup does not look launchable.
///
/// Launch failures are still reported per call, so this never fails.
pub fn check_binary(binary: &Path) {
    if binary.components().count() > 1 && !binary.exists() {
        warn!(
            binary = %binary.display(),
            "ffuf binary not found, every fuzz job will fail to start"
        );
    }
}

/// Get the default config path
#[must_use]
pub fn default_config_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("ffuf-mcp")
        .join("config.yaml")
}
