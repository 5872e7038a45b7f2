//! Scene graph demo
//!
//! Loads a dataset configuration (TOML or RON, path as the first argument),
//! builds a small agent-with-sensors scene on a furnished stage and logs the
//! aggregated bounding data.
//!
//! ```text
//! cargo run -p scene_demo -- dataset.toml
//! ```

use scene_core::foundation::logging;
use scene_core::foundation::math::{utils::deg_to_rad, Quat};
use scene_core::metadata::managers::read;
use scene_core::prelude::*;
use scene_core::scene::{RenderIdCache, SemanticIdFeature};
use log::{info, warn};
use std::sync::Arc;

const STAGE_ID: i32 = 0;
const AGENT_ID: i32 = 100;
const CHAIR_COUNT: usize = 4;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

fn unit_box() -> AABB {
    AABB::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
}

/// Stage with a floor and a ring of chairs, all static
fn build_stage(
    graph: &mut SceneGraph,
    render_ids: &RenderIdCache,
) -> Result<Vec<NodeKey>, DemoError> {
    let root = graph.root();
    let stage = graph.create_child(root)?;
    graph.set_node_id(stage, STAGE_ID)?;

    let floor = graph.create_child(stage)?;
    graph.add_feature(floor, |owner| RenderFeature::new(owner, "stage/floor.glb"))?;
    if let Some(mut node) = graph.node_mut(floor) {
        node.set_mesh_bb(AABB::new(Vec3::new(-5.0, -0.1, -5.0), Vec3::new(5.0, 0.0, 5.0)));
    }

    let mut static_nodes = vec![floor];
    for index in 0..CHAIR_COUNT {
        let chair = graph.create_child(stage)?;
        let chair_id = STAGE_ID + 1 + index as i32;
        graph.set_node_id(chair, chair_id)?;
        let cache = Arc::clone(render_ids);
        graph.add_feature(chair, |owner| SemanticIdFeature::new(owner, chair_id, cache))?;
        graph.add_feature(chair, |owner| RenderFeature::new(owner, "objects/chair.glb"))?;

        if let Some(mut node) = graph.node_mut(chair) {
            node.set_mesh_bb(unit_box());
            node.translate(Vec3::new(3.0, 0.5, 0.0));
            node.rotate(Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(90.0 * index as f32)));
        }
        static_nodes.push(chair);
    }
    Ok(static_nodes)
}

/// Agent body with an RGB and a depth sensor on a head node
fn build_agent(graph: &mut SceneGraph) -> Result<NodeKey, DemoError> {
    let root = graph.root();
    let agent = graph.create_child(root)?;
    graph.set_node_id(agent, AGENT_ID)?;
    if let Some(mut node) = graph.node_mut(agent) {
        node.set_node_type(SceneNodeType::Agent);
        node.set_mesh_bb(AABB::new(Vec3::new(-0.2, 0.0, -0.2), Vec3::new(0.2, 1.5, 0.2)));
        node.translate(Vec3::new(0.0, 0.0, 1.0));
    }

    let head = graph.create_child(agent)?;
    if let Some(mut node) = graph.node_mut(head) {
        node.translate(Vec3::new(0.0, 1.5, 0.0));
    }
    for (uuid, resolution) in [("rgb", (480, 640)), ("depth", (480, 640))] {
        let sensor = graph.create_child(head)?;
        if let Some(mut node) = graph.node_mut(sensor) {
            node.set_node_type(SceneNodeType::Sensor);
        }
        graph.add_feature(sensor, |owner| SensorFeature::new(owner, uuid, resolution))?;
    }
    Ok(agent)
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => DatasetConfig::load_from_file(path)?,
        None => DatasetConfig::default(),
    };
    logging::init_with_level(&config.log_level);

    let physics = PhysicsAttributesManager::create();
    let dataset = SceneDatasetAttributes::from_config(&config, &physics);
    {
        let stage_manager = dataset.stage_attributes_manager();
        let stage_manager = read(&stage_manager);
        info!(
            "Dataset '{}': physics '{}', light setup '{}', frustum culling {}",
            dataset.handle(),
            stage_manager.curr_physics_manager_attributes_handle(),
            stage_manager.cfg_light_setup(),
            stage_manager.cfg_frustum_culling()
        );
    }

    let mut scenes = SceneManager::new();
    let scene_id = scenes.init_scene_graph();
    let graph = scenes.scene_graph_mut(scene_id)?;
    let render_ids = RenderIdCache::default();

    let static_nodes = build_stage(graph, &render_ids)?;
    let agent = build_agent(graph)?;

    let updated = graph.compute_absolute_aabbs(&static_nodes)?;
    info!("Computed {} static world-space boxes", updated);

    let root = graph.root();
    let bounds = graph.compute_cumulative_bb(root)?;
    info!("Scene bounds: min {:?} max {:?}", bounds.min, bounds.max);

    for (key, sensor) in graph.find_features::<SensorFeature>(root) {
        let position = graph.absolute_translation(key)?;
        info!("Sensor '{}' {:?} at {:?}", sensor.uuid, sensor.resolution, position);
    }

    let agent_bounds = graph.compute_cumulative_bb(agent)?;
    info!("Agent bounds (local frame): min {:?} max {:?}", agent_bounds.min, agent_bounds.max);

    let mut ids: Vec<_> = render_ids
        .read()
        .map(|cache| cache.values().copied().collect())
        .unwrap_or_default();
    ids.sort_unstable();
    info!("Render ids in use: {:?}", ids);

    if let Some(&chair) = static_nodes.last() {
        let removed = graph.remove_node(chair)?;
        info!("Removed a chair: {} nodes, {} features", removed.nodes, removed.features);
    }
    if render_ids.read().map(|cache| cache.len()).unwrap_or_default() != CHAIR_COUNT - 1 {
        warn!("Render id cache out of sync with the scene");
    }
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("scene_demo failed: {error}");
        std::process::exit(1);
    }
}
