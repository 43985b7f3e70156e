//! Bridge FEM - parametric 2D suspension bridge model
//!
//! Generates a suspension bridge (truss deck, two towers, side and main
//! cables with hangers) from a handful of dimensions and assembles its
//! global stiffness matrix in block-row sparse form, ready for an external
//! linear solver:
//! - Bar elements (2 DOFs per node) or Euler frame elements (3 DOFs per node)
//! - Two-phase sparse assembly with restrained DOFs masked out
//! - Force vector from a caller supplied deck load
//! - Plain-text dumps and a legacy VTK mesh for inspection
//!
//! ## Example
//! ```rust
//! use bridge_fem::prelude::*;
//!
//! let params = BridgeParams::default();
//! let model = BridgeModel::new(
//!     &UniformDeckLoad::downward(1e4),
//!     params,
//!     &AssemblyOptions::bar(),
//! )
//! .unwrap();
//!
//! let system = model.into_system().into_checked().unwrap();
//! assert_eq!(system.matrix.block_size(), 2);
//! let k = system.matrix.to_csr();
//! assert_eq!(k.nrows(), system.rhs.len());
//! ```

pub mod analysis;
pub mod assembly;
pub mod elements;
pub mod error;
pub mod export;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
pub mod params;
pub mod results;
pub mod stiffness;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AssemblyOptions, ElementKind};
    pub use crate::elements::{Element, MemberRole, Node, Section, Support};
    pub use crate::error::{BridgeError, BridgeResult};
    pub use crate::loads::{DeckLoad, UniformDeckLoad};
    pub use crate::math::BlockCsrMatrix;
    pub use crate::mesh::{BridgeLayout, BridgeMesh, Mesh, MeshBuilder};
    pub use crate::model::BridgeModel;
    pub use crate::params::BridgeParams;
    pub use crate::results::{AssembledSystem, AssemblyDiagnostic};
}
