//! # Scene Core
//!
//! A spatial scene graph: a tree of nodes carrying rigid transforms, semantic
//! type tags and ids, with features (renderables, sensors, ...) attached to
//! nodes and bounding volumes aggregated on demand.
//!
//! ## Features
//!
//! - **Owned tree**: nodes only come from `create_child`; the root belongs to the graph
//! - **Bounding volumes**: local mesh boxes, cached cumulative boxes, optional world boxes
//! - **Features**: typed capabilities bound to one node and dropped with it
//! - **Dataset metadata**: attribute managers wired per dataset, configured from TOML/RON
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_core::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! let root = graph.root();
//! graph.root_node_mut().set_mesh_bb(AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
//!
//! let child = graph.create_child(root)?;
//! let mut node = graph.node_mut(child).expect("just created");
//! node.set_mesh_bb(AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
//! node.translate(Vec3::new(2.0, 0.0, 0.0));
//!
//! let bounds = graph.compute_cumulative_bb(root)?;
//! assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 1.0));
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod metadata;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::NodeKey,
            math::{Quat, RigidTransform, Transformable, Vec3},
        },
        metadata::{DatasetConfig, PhysicsAttributesManager, SceneDatasetAttributes},
        scene::{
            Feature, IdentifiedEntity, NodeMut, RenderFeature, SceneError, SceneGraph,
            SceneManager, SceneNode, SceneNodeType, SensorFeature, AABB, ID_UNDEFINED,
        },
    };
}
