//! Support conditions

use serde::{Deserialize, Serialize};

/// Translational restraints at a node
///
/// Rotations are never restrained; in the frame model the rotational DOF
/// of a supported node stays free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
}

impl Support {
    /// Create a support with no restraints
    pub fn free() -> Self {
        Self::default()
    }

    /// Create a support restrained in both translations
    pub fn fixed() -> Self {
        Self { dx: true, dy: true }
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool) -> Self {
        Self { dx, dy }
    }

    /// Whether local DOF `dof` (0 = X, 1 = Y, 2 = rotation) is restrained
    pub fn is_restrained(&self, dof: usize) -> bool {
        match dof {
            0 => self.dx,
            1 => self.dy,
            _ => false,
        }
    }

    /// Get list of restrained DOF indices (0 = X, 1 = Y)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        let mut dofs = Vec::new();
        if self.dx { dofs.push(0); }
        if self.dy { dofs.push(1); }
        dofs
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.dx || self.dy
    }
}
