//! Result types handed to the caller after assembly

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ElementKind;
use crate::error::{BridgeError, BridgeResult};
use crate::math::sparse::BlockCsrMatrix;

/// A consistency problem detected while building the global matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyDiagnostic {
    /// The number of columns placed in a row differs from its allocated span
    RowCountMismatch {
        row: usize,
        expected: usize,
        placed: usize,
    },
    /// An element referenced a block that is absent from the sparsity pattern
    MissingBlock { row: usize, col: usize },
}

impl fmt::Display for AssemblyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyDiagnostic::RowCountMismatch {
                row,
                expected,
                placed,
            } => write!(
                f,
                "row {} has {} allocated blocks but {} were placed",
                row, expected, placed
            ),
            AssemblyDiagnostic::MissingBlock { row, col } => {
                write!(f, "block ({}, {}) is not in the sparsity pattern", row, col)
            }
        }
    }
}

/// The assembled linear system: block stiffness matrix and right-hand side
#[derive(Debug, Clone)]
#[must_use = "assembly diagnostics must be inspected or the system checked"]
pub struct AssembledSystem {
    /// Element formulation used for every element
    pub kind: ElementKind,
    /// Global stiffness matrix in block-row compressed form
    pub matrix: BlockCsrMatrix,
    /// Force vector, `kind.dofs_per_node()` entries per node
    pub rhs: Vec<f64>,
    /// Problems found during symbolic or numeric assembly
    pub diagnostics: Vec<AssemblyDiagnostic>,
}

impl AssembledSystem {
    /// True if no assembly diagnostics were recorded
    pub fn is_consistent(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Return the system only if assembly was consistent
    pub fn into_checked(self) -> BridgeResult<Self> {
        match self.diagnostics.first() {
            Some(&diagnostic) => Err(BridgeError::AssemblyInconsistent(diagnostic)),
            None => Ok(self),
        }
    }

    /// Force block for a node: `[fx, fy]` or `[fx, fy, m]`
    pub fn force(&self, node: usize) -> &[f64] {
        let bs = self.kind.dofs_per_node();
        &self.rhs[node * bs..(node + 1) * bs]
    }
}
