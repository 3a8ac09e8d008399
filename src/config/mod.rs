//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::query::{DEFAULT_PER_PAGE, SearchParams, SearchProps};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Search defaults applied when normalizing [`SearchProps`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size used when a request gives none (or a non-positive one)
    pub default_per_page: u64,

    /// Upper bound on the page size a request may ask for
    pub max_per_page: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: None,
        }
    }
}

impl SearchConfig {
    /// Normalize raw search input with these defaults
    pub fn params(&self, props: SearchProps) -> SearchParams {
        SearchParams::with_defaults(props, self.default_per_page, self.max_per_page)
    }
}

/// Per-entity settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Entity type name (e.g., "user")
    pub name: String,

    /// Fields searches may sort by
    #[serde(default)]
    pub sortable_fields: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete configuration of the kernel
///
/// Every section is optional in YAML; missing keys take their defaults.
///
/// ```yaml
/// search:
///   default_per_page: 20
///   max_per_page: 100
/// entities:
///   - name: user
///     sortable_fields: [name, createdAt]
/// logging:
///   filter: "seedwork=debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedworkConfig {
    pub search: SearchConfig,
    pub entities: Vec<EntityConfig>,
    pub logging: LoggingConfig,
}

impl SeedworkConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    ///
    /// Malformed YAML is a [`ConfigError::ParseError`].
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find the settings of an entity type
    pub fn entity(&self, name: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Sortable fields declared for an entity type; `None` when the entity
    /// is not configured
    pub fn sortable_fields_for(&self, name: &str) -> Option<&[String]> {
        self.entity(name).map(|entity| entity.sortable_fields.as_slice())
    }
}

impl SearchParams {
    /// Normalize raw search input with configured defaults
    pub fn with_config(props: SearchProps, config: &SearchConfig) -> Self {
        config.params(props)
    }
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `filter`. Returns `false` when a global subscriber
/// was already set, which leaves the existing one in place.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
