//! Cross-section and material properties of the bridge members

use serde::{Deserialize, Serialize};

/// Modulus of elasticity of structural steel (Pa)
pub const STEEL_E: f64 = 2e11;

/// Second moment of area shared by every frame element (m^4)
pub const FRAME_MOMENT_OF_INERTIA: f64 = 700.0;

/// Axial properties of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area (m^2)
    pub area: f64,
    /// Modulus of elasticity (Pa)
    pub e: f64,
}

impl Section {
    /// Create a new section
    pub fn new(area: f64, e: f64) -> Self {
        Self { area, e }
    }
}

/// What part of the bridge a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    /// Road deck truss chord, vertical or diagonal
    Deck,
    /// Tower column from water level to tower top
    Tower,
    /// Vertical rope between cable and deck (also tower-to-deck ties)
    Hanger,
    /// Main or side cable segment
    Cable,
}

impl MemberRole {
    /// Fixed section properties of the role
    pub fn section(&self) -> Section {
        match self {
            MemberRole::Deck => Section::new(0.45, STEEL_E),
            MemberRole::Tower => Section::new(0.62, STEEL_E),
            MemberRole::Hanger => Section::new(0.06, STEEL_E),
            MemberRole::Cable => Section::new(0.36, STEEL_E),
        }
    }
}
