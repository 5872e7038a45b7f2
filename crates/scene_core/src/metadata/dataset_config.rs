//! Dataset configuration file
//!
//! The subset of simulator configuration a dataset consumes, loadable from
//! TOML or RON through [`Config`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::managers::DEFAULT_LIGHTING_KEY;

/// Configuration values pushed into a [`SceneDatasetAttributes`](super::SceneDatasetAttributes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset name
    pub dataset_name: String,
    /// Handle of the physics manager attributes governing the dataset
    pub physics_manager_handle: String,
    /// Light setup key stages default to
    pub light_setup: String,
    /// Whether stages should be partitioned for frustum culling
    pub frustum_culling: bool,
    /// Log level used by binaries that load this config
    pub log_level: String,
    /// File paths from the simulator configuration
    pub file_paths: BTreeMap<String, String>,
    /// Navmesh file locations by name
    pub navmesh_map: BTreeMap<String, String>,
    /// Semantic scene descriptor file locations by name
    pub semantic_scene_descr_map: BTreeMap<String, String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dataset_name: "default".to_string(),
            physics_manager_handle: "default.physics_config.json".to_string(),
            light_setup: DEFAULT_LIGHTING_KEY.to_string(),
            frustum_culling: true,
            log_level: "info".to_string(),
            file_paths: BTreeMap::new(),
            navmesh_map: BTreeMap::new(),
            semantic_scene_descr_map: BTreeMap::new(),
        }
    }
}

impl DatasetConfig {
    /// Create a config for the named dataset with default values
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            ..Default::default()
        }
    }

    /// Set the physics manager handle
    pub fn with_physics_manager_handle(mut self, handle: impl Into<String>) -> Self {
        self.physics_manager_handle = handle.into();
        self
    }

    /// Set the light setup key
    pub fn with_light_setup(mut self, light_setup: impl Into<String>) -> Self {
        self.light_setup = light_setup.into();
        self
    }

    /// Enable or disable frustum culling
    pub fn with_frustum_culling(mut self, enabled: bool) -> Self {
        self.frustum_culling = enabled;
        self
    }

    /// Add a named file path
    pub fn with_file_path(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.file_paths.insert(key.into(), path.into());
        self
    }
}

impl Config for DatasetConfig {}
