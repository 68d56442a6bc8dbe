use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    COMMAND_NAME, DEFAULT_IMGBOX_URL, DEFAULT_THUMB_WIDTH, HTTP_REQUEST_TIMEOUT_SECS,
};
use crate::utils::ImgboxError;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Image host connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Defaults for gallery options not given on the command line
    #[serde(default)]
    pub upload: UploadDefaults,
}

/// Image host connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the image host
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMGBOX_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Gallery option defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDefaults {
    pub thumb_width: u32,
    pub square_thumbs: bool,
    pub comments: bool,
    pub adult: bool,
}

impl Default for UploadDefaults {
    fn default() -> Self {
        Self {
            thumb_width: DEFAULT_THUMB_WIDTH,
            square_thumbs: false,
            comments: false,
            adult: false,
        }
    }
}

/// Load configuration from defaults, a TOML file and the environment
///
/// With `path` set, that file must exist. Otherwise the global config file is
/// used if there is one.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(global_config) = global_config_path() {
                if global_config.exists() {
                    tracing::debug!("Reading configuration from {}", global_config.display());
                    figment = figment.merge(Toml::file(global_config));
                }
            }
        }
    }

    // Environment variables (IMGBOX_SERVICE__BASE_URL, IMGBOX_UPLOAD__ADULT, ...)
    figment = figment.merge(Env::prefixed("IMGBOX_").ignore(&["config"]).split("__"));

    let config: Config = figment
        .extract()
        .context("Failed to load configuration")?;

    if config.upload.thumb_width == 0 {
        return Err(
            ImgboxError::Config("upload.thumb_width must be positive".to_string()).into(),
        );
    }

    Ok(config)
}

/// Location of the per-user configuration file, if the platform has one
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", COMMAND_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}
