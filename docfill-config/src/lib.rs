//! Docfill configuration management using Figment
//!
//! Configuration is assembled from several sources with a clear precedence:
//! defaults → global file → project file → environment.
//!
//! # Configuration Files
//!
//! - Global: `~/.docfill/docfill.{toml,yaml,yml,json}`
//! - Project: `./.docfill/docfill.{toml,yaml,yml,json}`
//!
//! ```toml
//! [merge]
//! entity_variants = true
//! collapsed_variants = false
//! max_replacements = 5000
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export DOCFILL_MERGE__COLLAPSED_VARIANTS=false   # → merge.collapsed_variants
//! export DOCFILL_MERGE__MAX_REPLACEMENTS=500       # → merge.max_replacements
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use docfill_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("max replacements: {}", config.merge.max_replacements);
//! # Ok::<(), docfill_config::ConfigError>(())
//! ```

/// File discovery logic for configuration files
pub mod discovery;
/// Error types and handling
pub mod error;
/// Figment-backed configuration provider
pub mod provider;
/// Configuration data structures
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{load_configuration, ConfigProvider};
pub use types::{DocfillConfig, MergeSettings, DEFAULT_MAX_REPLACEMENTS};

#[cfg(test)]
mod tests;
