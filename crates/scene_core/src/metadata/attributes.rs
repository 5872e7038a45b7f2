//! Dataset attributes
//!
//! [`SceneDatasetAttributes`] holds everything one dataset contributes: the
//! five attribute sub-managers, navmesh and semantic-descriptor path maps and
//! a few named values. The scene core only pushes configuration into it and
//! reads handles back out.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use super::dataset_config::DatasetConfig;
use super::managers::{
    read, write, AssetAttributesManager, LightLayoutAttributesManager, ManagerPtr,
    ObjectAttributesManager, PhysicsAttributesManager, SceneAttributesManager,
    StageAttributesManager,
};

const PHYSICS_MANAGER_HANDLE_KEY: &str = "physMgrAttrHandle";

/// Value stored in an attributes key/value map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Double(f64),
    /// String value
    String(String),
}

/// Named, typed key/value store shared by all attribute kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributesBase {
    class_key: String,
    handle: String,
    values: BTreeMap<String, AttributeValue>,
}

impl AttributesBase {
    /// Create an empty store of kind `class_key` named `handle`
    pub fn new(class_key: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            class_key: class_key.into(),
            handle: handle.into(),
            values: BTreeMap::new(),
        }
    }

    /// Attribute kind, e.g. `"SceneDatasetAttributes"`
    pub fn class_key(&self) -> &str {
        &self.class_key
    }

    /// Handle naming this attributes instance
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Store a string value
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), AttributeValue::String(value.into()));
    }

    /// String value stored under `key`, if any
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AttributeValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Store a boolean value
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), AttributeValue::Bool(value));
    }

    /// Boolean value stored under `key`, if any
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(AttributeValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Store an integer value
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), AttributeValue::Int(value));
    }

    /// Integer value stored under `key`, if any
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(AttributeValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Store a floating point value
    pub fn set_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), AttributeValue::Double(value));
    }

    /// Floating point value stored under `key`, if any
    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(AttributeValue::Double(value)) => Some(*value),
            _ => None,
        }
    }

    /// Raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }
}

/// Data and configuration for one scene dataset
#[derive(Debug)]
pub struct SceneDatasetAttributes {
    base: AttributesBase,
    asset_attributes_manager: ManagerPtr<AssetAttributesManager>,
    light_layout_attributes_manager: ManagerPtr<LightLayoutAttributesManager>,
    object_attributes_manager: ManagerPtr<ObjectAttributesManager>,
    scene_attributes_manager: ManagerPtr<SceneAttributesManager>,
    stage_attributes_manager: ManagerPtr<StageAttributesManager>,
    navmesh_map: BTreeMap<String, String>,
    semantic_scene_descr_map: BTreeMap<String, String>,
}

impl SceneDatasetAttributes {
    /// Build the dataset's managers and wire them together
    ///
    /// Objects get the asset manager; stages get the object manager and the
    /// externally owned physics manager.
    pub fn new(
        dataset_name: &str,
        physics_attributes_manager: &ManagerPtr<PhysicsAttributesManager>,
    ) -> Self {
        let asset_attributes_manager = AssetAttributesManager::create();
        let light_layout_attributes_manager = LightLayoutAttributesManager::create();
        let object_attributes_manager = ObjectAttributesManager::create();
        write(&object_attributes_manager)
            .set_asset_attributes_manager(asset_attributes_manager.clone());
        let scene_attributes_manager = SceneAttributesManager::create();
        let stage_attributes_manager = StageAttributesManager::create(
            object_attributes_manager.clone(),
            physics_attributes_manager.clone(),
        );

        info!("Created scene dataset attributes '{}'", dataset_name);
        Self {
            base: AttributesBase::new("SceneDatasetAttributes", dataset_name),
            asset_attributes_manager,
            light_layout_attributes_manager,
            object_attributes_manager,
            scene_attributes_manager,
            stage_attributes_manager,
            navmesh_map: BTreeMap::new(),
            semantic_scene_descr_map: BTreeMap::new(),
        }
    }

    /// Build from a loaded dataset configuration
    pub fn from_config(
        config: &DatasetConfig,
        physics_attributes_manager: &ManagerPtr<PhysicsAttributesManager>,
    ) -> Self {
        let mut dataset = Self::new(&config.dataset_name, physics_attributes_manager);
        dataset.navmesh_map.extend(config.navmesh_map.clone());
        dataset
            .semantic_scene_descr_map
            .extend(config.semantic_scene_descr_map.clone());
        dataset.set_curr_cfg_vals(&config.file_paths, &config.light_setup, config.frustum_culling);
        dataset.set_physics_manager_handle(&config.physics_manager_handle);
        dataset
    }

    /// Dataset name
    pub fn handle(&self) -> &str {
        self.base.handle()
    }

    /// Named values stored on the dataset
    pub fn attributes(&self) -> &AttributesBase {
        &self.base
    }

    /// Manager for primitive asset attributes
    pub fn asset_attributes_manager(&self) -> ManagerPtr<AssetAttributesManager> {
        self.asset_attributes_manager.clone()
    }

    /// Manager for object attributes
    pub fn object_attributes_manager(&self) -> ManagerPtr<ObjectAttributesManager> {
        self.object_attributes_manager.clone()
    }

    /// Manager for light layout attributes
    pub fn light_layout_attributes_manager(&self) -> ManagerPtr<LightLayoutAttributesManager> {
        self.light_layout_attributes_manager.clone()
    }

    /// Manager for scene instance attributes
    pub fn scene_attributes_manager(&self) -> ManagerPtr<SceneAttributesManager> {
        self.scene_attributes_manager.clone()
    }

    /// Manager for stage attributes
    pub fn stage_attributes_manager(&self) -> ManagerPtr<StageAttributesManager> {
        self.stage_attributes_manager.clone()
    }

    /// Navmesh file locations by name
    pub fn navmesh_map(&self) -> &BTreeMap<String, String> {
        &self.navmesh_map
    }

    /// Navmesh file locations by name, for building
    pub fn edit_navmesh_map(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.navmesh_map
    }

    /// Semantic scene descriptor file locations by name
    pub fn semantic_scene_descr_map(&self) -> &BTreeMap<String, String> {
        &self.semantic_scene_descr_map
    }

    /// Semantic scene descriptor file locations by name, for building
    pub fn edit_semantic_scene_descr_map(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.semantic_scene_descr_map
    }

    /// Forward simulator-config values to the stage manager as stage defaults
    pub fn set_curr_cfg_vals(
        &self,
        filepaths: &BTreeMap<String, String>,
        light_setup: &str,
        frustum_culling: bool,
    ) {
        write(&self.stage_attributes_manager)
            .set_curr_cfg_vals(filepaths, light_setup, frustum_culling);
    }

    /// Record the physics manager attributes handle governing this dataset
    pub fn set_physics_manager_handle(&mut self, handle: &str) {
        self.base.set_string(PHYSICS_MANAGER_HANDLE_KEY, handle);
        write(&self.stage_attributes_manager).set_curr_physics_manager_attributes_handle(handle);
    }

    /// Physics manager attributes handle, empty if never set
    pub fn physics_manager_handle(&self) -> &str {
        self.base.get_string(PHYSICS_MANAGER_HANDLE_KEY).unwrap_or_default()
    }

    /// Whether the object manager is wired to this dataset's asset manager
    pub fn objects_use_dataset_assets(&self) -> bool {
        read(&self.object_attributes_manager)
            .asset_attributes_manager()
            .is_some_and(|assets| std::sync::Arc::ptr_eq(assets, &self.asset_attributes_manager))
    }
}
