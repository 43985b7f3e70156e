//! Element - a two-node bar or frame member

use serde::{Deserialize, Serialize};

use super::{MemberRole, Section};
use crate::error::{BridgeError, BridgeResult};

/// Geometry derived by the element finalizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementGeometry {
    /// x(end) - x(start)
    pub dx: f64,
    /// y(end) - y(start)
    pub dy: f64,
    /// Element length
    pub length: f64,
}

impl ElementGeometry {
    /// Direction cosines (cos θ, sin θ) of the element axis
    pub fn direction_cosines(&self) -> (f64, f64) {
        (self.dx / self.length, self.dy / self.length)
    }
}

/// A two-node element between nodes `start <= end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Dense zero-based id, equal to the element's position in the element table
    pub id: usize,
    /// Lower node id
    pub start: usize,
    /// Higher node id
    pub end: usize,
    /// Cross-sectional area (m^2)
    pub area: f64,
    /// Modulus of elasticity (Pa)
    pub e: f64,
    /// Part of the bridge this element belongs to
    pub role: MemberRole,

    #[serde(skip)]
    pub(crate) geometry: Option<ElementGeometry>,
}

impl Element {
    /// Create an element, storing its endpoints in canonical order
    pub fn new(id: usize, a: usize, b: usize, section: Section, role: MemberRole) -> Self {
        Self {
            id,
            start: a.min(b),
            end: a.max(b),
            area: section.area,
            e: section.e,
            role,
            geometry: None,
        }
    }

    /// Create an element with the fixed section of its role
    pub fn with_role(id: usize, a: usize, b: usize, role: MemberRole) -> Self {
        Self::new(id, a, b, role.section(), role)
    }

    /// Derived geometry, if the element has been finalized
    pub fn geometry(&self) -> Option<ElementGeometry> {
        self.geometry
    }

    /// Derived geometry, or an error if the finalizer has not run
    pub fn finalized_geometry(&self) -> BridgeResult<ElementGeometry> {
        self.geometry.ok_or(BridgeError::NotFinalized(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_canonical() {
        let element = Element::with_role(0, 7, 3, MemberRole::Deck);
        assert_eq!(element.start, 3);
        assert_eq!(element.end, 7);
    }

    #[test]
    fn test_unfinalized_geometry() {
        let element = Element::with_role(5, 0, 1, MemberRole::Cable);
        assert!(element.geometry().is_none());
        assert!(matches!(
            element.finalized_geometry(),
            Err(BridgeError::NotFinalized(5))
        ));
    }

    #[test]
    fn test_direction_cosines() {
        let g = ElementGeometry { dx: 3.0, dy: -4.0, length: 5.0 };
        let (c, s) = g.direction_cosines();
        assert!((c - 0.6).abs() < 1e-12);
        assert!((s + 0.8).abs() < 1e-12);
    }
}
