//! Structural elements module

mod element;
mod node;
mod section;
mod support;

pub use element::{Element, ElementGeometry};
pub use node::Node;
pub use section::{MemberRole, Section, FRAME_MOMENT_OF_INERTIA, STEEL_E};
pub use support::Support;
