//! Settings for devlint
//!
//! Settings are layered with figment, lowest priority first:
//! embedded defaults, the package's `devlint.{toml,json,yaml,yml}`, an explicit
//! `--config` file, then `DEVLINT_` environment variables (`__` nests keys).

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod smart_load;


// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Environment prefix for overrides
pub const ENV_PREFIX: &str = "DEVLINT_";

/// Base name of the per-package settings file
pub const CONFIG_BASENAME: &str = "devlint";

/// Fully merged settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub engine: EngineSettings,
    pub run: RunSettings,
}

/// How the lint engine is located and constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Executable path or name; empty means auto-locate
    #[serde(default)]
    pub command: Option<String>,

    /// Extensions linted inside directories
    pub extensions: Vec<String>,

    /// Shared rule-set package name or `./path`
    pub base_config: String,

    /// Allow `.eslintrc.*` discovery inside the package
    #[serde(default)]
    pub use_eslintrc: bool,

    /// Plugin resolution directory; empty means the executable's directory
    #[serde(default)]
    pub resolve_plugins_relative_to: Option<String>,
}

/// What a run lints and how it prints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Package metadata file, relative to the root
    pub package_file: String,

    /// Directories linted, in print order
    pub directories: Vec<String>,

    /// Formatter name
    pub formatter: String,
}

impl Settings {
    /// Load settings for a package root
    pub fn load(root: &Path, custom_config: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(root, custom_config, ENV_PREFIX))
    }

    fn figment(root: &Path, custom_config: Option<&Path>, env_prefix: &str) -> Figment {
        tracing::trace!("CONFIG LOAD: root {}", root.display());

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(root.join(format!("{CONFIG_BASENAME}.toml"))))
            .merge(Json::file(root.join(format!("{CONFIG_BASENAME}.json"))))
            .merge(Yaml::file(root.join(format!("{CONFIG_BASENAME}.yaml"))))
            .merge(Yaml::file(root.join(format!("{CONFIG_BASENAME}.yml"))));

        if let Some(path) = custom_config {
            tracing::trace!("CONFIG LOAD: custom file {}", path.display());
            figment = figment.merge(smart_load::auto(path));
        }

        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract().context("Invalid devlint settings")?;
        tracing::trace!("CONFIG LOAD: {:?}", settings);
        Ok(settings)
    }
}
