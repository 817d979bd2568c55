//! Manages application configuration by loading settings from standard locations.
//!
//! This crate provides a unified configuration object (`Config`) that aggregates
//! settings from files and environment variables, making them accessible
//! globally via a lazily initialized static reference (`CONFIG`).

use std::path::PathBuf;
use std::sync::LazyLock;

use etcetera::BaseStrategy;
use figment::providers::{Env, Format, Toml};
use figment::{Figment, Metadata, Provider};
use serde::{Deserialize, Serialize};

/// The default configuration values
const DEFAULT_TOML_CONFIG: &str = include_str!("./cpcli.default.toml");

//================================================================================================
// Statics
//================================================================================================

/// Provides a lazily instantiated static reference to the application `Config`.
///
/// This static variable ensures that configuration is parsed only once from
/// canonical locations and then made immutably available throughout the
/// application's lifecycle.
pub static CONFIG: LazyLock<Config> = LazyLock::new(load_config);

//================================================================================================
// Types
//================================================================================================

/// Represents the application's primary configuration structure.
#[derive(Deserialize, Serialize, Default)]
pub struct Config {
    /// Compiler invocation settings.
    #[serde(default)]
    pub compile: CompileConfig,
    /// Default artifact locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Repository scaffolding settings.
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

/// Compiler flag defaults for the `compile` and `run` subcommands.
#[derive(Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CompileConfig {
    /// Flags passed to the compiler by `compile`.
    pub flags: String,
    /// Flags passed to the compiler by `run` (sanitizers on by default).
    pub run_flags: String,
}

/// Where build artifacts land relative to the contest repository.
#[derive(Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Directory for compiled binaries.
    pub build_dir: PathBuf,
    /// Directory for packed single-file submissions.
    pub submission_dir: PathBuf,
}

/// Defaults for the `init` subcommand.
#[derive(Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ScaffoldConfig {
    /// How many starter main programs to create.
    pub count: u8,
    /// The template repository vendored into new contest repositories.
    pub repository: String,
    /// The testlib repository vendored when `--testlib` is given.
    pub testlib_repository: String,
}

//================================================================================================
// Impls
//================================================================================================

impl Config {
    /// Constructs a `Figment` instance for configuration loading.
    ///
    /// This method builds a configuration provider by layering default settings,
    /// user-specific configuration files, and environment variables.
    pub fn figment() -> Figment {
        let mut fig = Figment::from(Config::default()).merge(Toml::string(DEFAULT_TOML_CONFIG));

        if let Ok(c) = etcetera::choose_base_strategy() {
            let config = c.config_dir().join("cpcli.toml");
            fig = fig.admerge(Toml::file(config));
        }

        fig.admerge(Env::prefixed("CPCLI_"))
    }

    /// Creates a `Config` instance from a given provider.
    pub fn from<T: Provider>(provider: T) -> Result<Config, Box<figment::Error>> {
        Figment::from(provider).extract().map_err(Box::new)
    }
}

impl Provider for Config {
    fn metadata(&self) -> figment::Metadata {
        Metadata::named("cpcli Config")
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        figment::providers::Serialized::defaults(self).data()
    }
}

//================================================================================================
// Functions
//================================================================================================

/// Loads the application configuration using the default `Figment` provider.
///
/// This function is used to initialize the `CONFIG` static variable.
fn load_config() -> Config {
    Config::figment().extract().unwrap_or_else(|e| {
        tracing::error!(error = %e, "problem loading config from default sources, falling back to nearly empty configuration");
        Config::default()
    })
}
