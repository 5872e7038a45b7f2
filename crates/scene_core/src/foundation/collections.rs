//! Specialized collection types

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a node stored in a scene graph arena
    pub struct NodeKey;
}

/// Arena holding every node of one scene graph
pub type NodeArena<T> = SlotMap<NodeKey, T>;
