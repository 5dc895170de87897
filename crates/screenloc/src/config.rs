//! Resolver configuration.
//!
//! Stored as JSON. Missing fields take their defaults, so a config file only
//! needs the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::list::ListLayout;
use crate::process::layout::limits;

/// Limits and layout used while walking foreign memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum nodes visited by any single list walk
    pub max_nodes: usize,
    /// Maximum decoded name length in bytes
    pub max_text_len: usize,
    /// Node layout shared by every list the resolver walks
    pub list_layout: ListLayout,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: limits::MAX_NODES,
            max_text_len: limits::MAX_TEXT_LEN,
            list_layout: ListLayout::default(),
        }
    }
}

impl ResolverConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }

    /// Load configuration from a JSON file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: ResolverConfig = serde_json::from_str(&content)?;
        debug!("Loaded resolver config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved resolver config to {}", path.as_ref().display());
        Ok(())
    }
}

/// Builder for ResolverConfig
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    max_nodes: Option<usize>,
    max_text_len: Option<usize>,
    list_layout: Option<ListLayout>,
}

impl ResolverConfigBuilder {
    /// Set the per-walk node bound
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Set the maximum decoded name length
    pub fn max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = Some(max_text_len);
        self
    }

    pub fn list_layout(mut self, layout: ListLayout) -> Self {
        self.list_layout = Some(layout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ResolverConfig {
        let default = ResolverConfig::default();
        ResolverConfig {
            max_nodes: self.max_nodes.unwrap_or(default.max_nodes),
            max_text_len: self.max_text_len.unwrap_or(default.max_text_len),
            list_layout: self.list_layout.unwrap_or(default.list_layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let config = ResolverConfig::builder().max_nodes(16).build();
        assert_eq!(config.max_nodes, 16);
        assert_eq!(config.max_text_len, limits::MAX_TEXT_LEN);
        assert_eq!(config.list_layout, ListLayout::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        let config = ResolverConfig::builder()
            .max_nodes(128)
            .max_text_len(64)
            .build();
        config.save_to_path(&path).unwrap();

        let loaded = ResolverConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), r#"{ "max_text_len": 32 }"#).unwrap();

        let loaded = ResolverConfig::load_from_path(temp_file.path()).unwrap();
        assert_eq!(loaded.max_text_len, 32);
        assert_eq!(loaded.max_nodes, limits::MAX_NODES);
    }

    #[test]
    fn test_missing_config_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolverConfig::load_from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
