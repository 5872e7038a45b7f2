//! Dataset metadata
//!
//! Attribute managers and the per-dataset attributes object that wires them
//! together. The scene graph only talks to this module through handle strings
//! and configuration values.

pub mod attributes;
pub mod dataset_config;
pub mod managers;

pub use attributes::{AttributeValue, AttributesBase, SceneDatasetAttributes};
pub use dataset_config::DatasetConfig;
pub use managers::{
    AssetAttributesManager, AttributesManager, LightLayoutAttributesManager, ManagerPtr,
    ObjectAttributesManager, PhysicsAttributesManager, SceneAttributesManager,
    StageAttributesManager,
};
