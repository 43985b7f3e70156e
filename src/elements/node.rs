//! Node element - a point in the bridge plane

use serde::{Deserialize, Serialize};

use super::Support;

/// A 2D node of the bridge model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Dense zero-based id, equal to the node's position in the node table
    pub id: usize,
    /// X coordinate (m, along the bridge)
    pub x: f64,
    /// Y coordinate (m, above water level)
    pub y: f64,
    /// Translational restraints
    pub support: Support,
}

impl Node {
    /// Create a new unsupported node
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            support: Support::free(),
        }
    }

    /// Set the support conditions
    pub fn with_support(mut self, support: Support) -> Self {
        self.support = support;
        self
    }
}
