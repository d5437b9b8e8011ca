//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::DocfillConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Prefix for environment overrides, e.g. `DOCFILL_MERGE__MAX_REPLACEMENTS`
pub const ENV_PREFIX: &str = "DOCFILL_";

/// Separator between nested keys in environment variable names
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Loads [`DocfillConfig`] from defaults, discovered files and the environment.
///
/// No caching is performed; every call to [`ConfigProvider::load`] reads the
/// sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Provider that discovers files from the current and home directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that reads configuration files from explicit directories
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            discovery: FileDiscovery::with_directories(project_dir, global_dir),
        }
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> ConfigResult<DocfillConfig> {
        let config: DocfillConfig = self.build_figment().extract()?;
        config.validate()?;
        debug!(
            entity_variants = config.merge.entity_variants,
            collapsed_variants = config.merge.collapsed_variants,
            max_replacements = config.merge.max_replacements,
            "loaded docfill configuration"
        );
        Ok(config)
    }

    /// Sources in precedence order, later overriding earlier:
    /// 1. Defaults
    /// 2. Global then project configuration files
    /// 3. `DOCFILL_` environment variables
    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(DocfillConfig::default()));

        for file in self.discovery.discover_all() {
            trace!(path = %file.path.display(), format = ?file.format, "merging config file");
            figment = merge_file(figment, &file);
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_NESTING_SEPARATOR))
    }
}

fn merge_file(figment: Figment, file: &ConfigFile) -> Figment {
    match file.format {
        ConfigFormat::Toml => figment.merge(Toml::file(&file.path)),
        ConfigFormat::Yaml => figment.merge(Yaml::file(&file.path)),
        ConfigFormat::Json => figment.merge(Json::file(&file.path)),
    }
}

/// Load configuration from the standard locations.
pub fn load_configuration() -> ConfigResult<DocfillConfig> {
    ConfigProvider::new().load()
}
