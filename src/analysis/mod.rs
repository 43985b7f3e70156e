//! Element formulation and assembly options

use serde::{Deserialize, Serialize};

/// Structural formulation used for every element of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Pin-jointed bar: axial stiffness only, translations per node
    Bar,
    /// Rigid-jointed Euler beam: axial and bending, translations + rotation per node
    Frame,
}

impl Default for ElementKind {
    fn default() -> Self {
        Self::Bar
    }
}

impl ElementKind {
    /// Degrees of freedom per node (the global matrix block size)
    pub fn dofs_per_node(&self) -> usize {
        match self {
            ElementKind::Bar => 2,
            ElementKind::Frame => 3,
        }
    }

    /// Size of the square element stiffness matrix
    pub fn element_matrix_size(&self) -> usize {
        2 * self.dofs_per_node()
    }
}

/// Options controlling stiffness computation and assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyOptions {
    /// Element formulation
    pub kind: ElementKind,
    /// Fail on assembly diagnostics instead of reporting them
    pub strict: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            kind: ElementKind::Bar,
            strict: false,
        }
    }
}

impl AssemblyOptions {
    /// Options for the pin-jointed bar model
    pub fn bar() -> Self {
        Self::default()
    }

    /// Options for the rigid frame model
    pub fn frame() -> Self {
        Self {
            kind: ElementKind::Frame,
            ..Self::default()
        }
    }

    /// Turn assembly diagnostics into hard errors
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sizes() {
        assert_eq!(ElementKind::Bar.dofs_per_node(), 2);
        assert_eq!(ElementKind::Bar.element_matrix_size(), 4);
        assert_eq!(ElementKind::Frame.dofs_per_node(), 3);
        assert_eq!(ElementKind::Frame.element_matrix_size(), 6);
    }

    #[test]
    fn test_strict_builder() {
        let options = AssemblyOptions::frame().strict();
        assert_eq!(options.kind, ElementKind::Frame);
        assert!(options.strict);
    }
}
