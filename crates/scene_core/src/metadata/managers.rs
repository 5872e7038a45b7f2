//! Attribute sub-managers
//!
//! Each manager owns the templates of one attribute family, addressed by
//! handle string. Template creation and parsing live with the loaders; the
//! managers here keep the handle bookkeeping and the cross-manager wiring the
//! dataset needs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

/// Shared handle to a manager
pub type ManagerPtr<T> = Arc<RwLock<T>>;

/// Wrap a manager for sharing
pub fn shared<T>(manager: T) -> ManagerPtr<T> {
    Arc::new(RwLock::new(manager))
}

/// Read-lock a manager, recovering from a poisoned lock
pub fn read<T>(manager: &ManagerPtr<T>) -> RwLockReadGuard<'_, T> {
    manager.read().unwrap_or_else(|poisoned| {
        warn!("Recovering poisoned attributes manager lock");
        PoisonError::into_inner(poisoned)
    })
}

/// Write-lock a manager, recovering from a poisoned lock
pub fn write<T>(manager: &ManagerPtr<T>) -> RwLockWriteGuard<'_, T> {
    manager.write().unwrap_or_else(|poisoned| {
        warn!("Recovering poisoned attributes manager lock");
        PoisonError::into_inner(poisoned)
    })
}

/// Light setup key meaning "use the default lighting"
pub const DEFAULT_LIGHTING_KEY: &str = "";

/// Light setup key meaning "no lights at all"
pub const NO_LIGHT_KEY: &str = "no_lights";

/// Set of template handles known to a manager
#[derive(Debug, Clone, Default)]
pub struct TemplateHandles {
    handles: BTreeSet<String>,
}

/// Common surface of every attributes manager
pub trait AttributesManager {
    /// Attribute family name, used in logs
    fn attributes_type(&self) -> &'static str;

    /// Handles registered with this manager
    fn templates(&self) -> &TemplateHandles;

    /// Handles registered with this manager, mutably
    fn templates_mut(&mut self) -> &mut TemplateHandles;

    /// Whether a template with this handle exists
    fn has_handle(&self, handle: &str) -> bool {
        self.templates().handles.contains(handle)
    }

    /// All handles in sorted order
    fn handles(&self) -> Vec<String> {
        self.templates().handles.iter().cloned().collect()
    }

    /// Record a template handle; returns false if it was already known
    fn register_handle(&mut self, handle: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        let handle = handle.into();
        debug!("{} attributes: registering template {}", self.attributes_type(), handle);
        self.templates_mut().handles.insert(handle)
    }
}

macro_rules! attributes_manager {
    ($manager:ident, $attributes_type:literal) => {
        impl AttributesManager for $manager {
            fn attributes_type(&self) -> &'static str {
                $attributes_type
            }

            fn templates(&self) -> &TemplateHandles {
                &self.templates
            }

            fn templates_mut(&mut self) -> &mut TemplateHandles {
                &mut self.templates
            }
        }
    };
}

/// Primitive asset templates (cubes, spheres, ...)
#[derive(Debug, Default)]
pub struct AssetAttributesManager {
    templates: TemplateHandles,
}

impl AssetAttributesManager {
    /// Create a shared, empty manager
    pub fn create() -> ManagerPtr<Self> {
        shared(Self::default())
    }
}

attributes_manager!(AssetAttributesManager, "Asset");

/// Light layout templates
#[derive(Debug, Default)]
pub struct LightLayoutAttributesManager {
    templates: TemplateHandles,
}

impl LightLayoutAttributesManager {
    /// Create a shared, empty manager
    pub fn create() -> ManagerPtr<Self> {
        shared(Self::default())
    }
}

attributes_manager!(LightLayoutAttributesManager, "LightLayout");

/// Object templates; primitive-based objects need the asset manager
#[derive(Debug, Default)]
pub struct ObjectAttributesManager {
    templates: TemplateHandles,
    asset_attributes_manager: Option<ManagerPtr<AssetAttributesManager>>,
}

impl ObjectAttributesManager {
    /// Create a shared, empty manager
    pub fn create() -> ManagerPtr<Self> {
        shared(Self::default())
    }

    /// Give access to primitive asset templates
    pub fn set_asset_attributes_manager(&mut self, manager: ManagerPtr<AssetAttributesManager>) {
        self.asset_attributes_manager = Some(manager);
    }

    /// Asset manager used for primitive-based objects, if wired
    pub fn asset_attributes_manager(&self) -> Option<&ManagerPtr<AssetAttributesManager>> {
        self.asset_attributes_manager.as_ref()
    }
}

attributes_manager!(ObjectAttributesManager, "Object");

/// Scene instance templates
#[derive(Debug, Default)]
pub struct SceneAttributesManager {
    templates: TemplateHandles,
}

impl SceneAttributesManager {
    /// Create a shared, empty manager
    pub fn create() -> ManagerPtr<Self> {
        shared(Self::default())
    }
}

attributes_manager!(SceneAttributesManager, "SceneInstance");

/// Physics manager templates; owned outside any single dataset
#[derive(Debug, Default)]
pub struct PhysicsAttributesManager {
    templates: TemplateHandles,
}

impl PhysicsAttributesManager {
    /// Create a shared, empty manager
    pub fn create() -> ManagerPtr<Self> {
        shared(Self::default())
    }
}

attributes_manager!(PhysicsAttributesManager, "PhysicsManager");

/// Stage templates, plus the simulator-config values used as stage defaults
#[derive(Debug)]
pub struct StageAttributesManager {
    templates: TemplateHandles,
    object_attributes_manager: ManagerPtr<ObjectAttributesManager>,
    physics_attributes_manager: ManagerPtr<PhysicsAttributesManager>,
    cfg_filepaths: BTreeMap<String, String>,
    cfg_light_setup: String,
    cfg_frustum_culling: bool,
    curr_physics_manager_attributes_handle: String,
}

impl StageAttributesManager {
    /// Create a shared manager wired to the object and physics managers
    pub fn create(
        object_attributes_manager: ManagerPtr<ObjectAttributesManager>,
        physics_attributes_manager: ManagerPtr<PhysicsAttributesManager>,
    ) -> ManagerPtr<Self> {
        shared(Self {
            templates: TemplateHandles::default(),
            object_attributes_manager,
            physics_attributes_manager,
            cfg_filepaths: BTreeMap::new(),
            cfg_light_setup: NO_LIGHT_KEY.to_string(),
            cfg_frustum_culling: false,
            curr_physics_manager_attributes_handle: String::new(),
        })
    }

    /// Copy the current simulator-config values used as stage defaults
    pub fn set_curr_cfg_vals(
        &mut self,
        filepaths: &BTreeMap<String, String>,
        light_setup: &str,
        frustum_culling: bool,
    ) {
        self.cfg_filepaths = filepaths.clone();
        self.cfg_light_setup = light_setup.to_string();
        self.cfg_frustum_culling = frustum_culling;
        debug!(
            "Stage defaults: {} file paths, light setup '{}', frustum culling {}",
            self.cfg_filepaths.len(),
            self.cfg_light_setup,
            self.cfg_frustum_culling
        );
    }

    /// Set the physics manager attributes handle new stages default to
    pub fn set_curr_physics_manager_attributes_handle(&mut self, handle: &str) {
        self.curr_physics_manager_attributes_handle = handle.to_string();
    }

    /// Physics manager attributes handle new stages default to
    pub fn curr_physics_manager_attributes_handle(&self) -> &str {
        &self.curr_physics_manager_attributes_handle
    }

    /// File paths copied from the simulator config
    pub fn cfg_filepaths(&self) -> &BTreeMap<String, String> {
        &self.cfg_filepaths
    }

    /// Light setup copied from the simulator config
    pub fn cfg_light_setup(&self) -> &str {
        &self.cfg_light_setup
    }

    /// Whether stages should be partitioned for frustum culling
    pub fn cfg_frustum_culling(&self) -> bool {
        self.cfg_frustum_culling
    }

    /// Object manager stages use for embedded objects
    pub fn object_attributes_manager(&self) -> &ManagerPtr<ObjectAttributesManager> {
        &self.object_attributes_manager
    }

    /// Physics manager stages read defaults from
    pub fn physics_attributes_manager(&self) -> &ManagerPtr<PhysicsAttributesManager> {
        &self.physics_attributes_manager
    }
}

attributes_manager!(StageAttributesManager, "Stage");
