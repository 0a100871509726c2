//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::fetcher::DEFAULT_MAX_PAGES;
use crate::core::query::{DEFAULT_PAGE_SIZE, SortSpec};
use crate::source::DEFAULT_BASE_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Where and how to fetch the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Collection endpoint; pages are requested with `?page=N`
    pub base_url: String,

    /// Ceiling on pages requested in one fetch
    pub max_pages: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Initial view inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    pub default_page_size: usize,

    /// Page sizes the user may pick; empty allows any positive size
    pub page_sizes: Vec<usize>,

    /// Initial order, e.g. `id-asc` or `name:desc`
    pub default_sort: String,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_sizes: vec![10, 20, 30],
            default_sort: "id-asc".to_string(),
        }
    }
}

/// Complete configuration for a character view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub source: SourceConfig,
    pub view: ViewDefaults,
}

impl ViewConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.source.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.max_pages".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.view.page_sizes.contains(&0) {
            return Err(ConfigError::InvalidValue {
                field: "view.page_sizes".to_string(),
                message: "page sizes must be positive".to_string(),
            });
        }

        let size = self.view.default_page_size;
        if size == 0 || (!self.view.page_sizes.is_empty() && !self.view.page_sizes.contains(&size)) {
            return Err(ConfigError::InvalidValue {
                field: "view.default_page_size".to_string(),
                message: format!("{} is not one of {:?}", size, self.view.page_sizes),
            });
        }

        self.default_sort()?;
        Ok(())
    }

    /// Parsed initial sort
    pub fn default_sort(&self) -> Result<SortSpec, ConfigError> {
        self.view
            .default_sort
            .parse()
            .map_err(|e: crate::core::error::ViewError| ConfigError::InvalidValue {
                field: "view.default_sort".to_string(),
                message: e.to_string(),
            })
    }
}
