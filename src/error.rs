//! Error types for the bridge model

use thiserror::Error;

use crate::results::AssemblyDiagnostic;

/// Main error type for bridge generation and assembly
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Bridge length {total_length} is not a whole number of {segment_length} m segments")]
    IndivisibleSpan { total_length: f64, segment_length: f64 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Element {element} has zero length (nodes {start} -> {end})")]
    ZeroLengthElement {
        element: usize,
        start: usize,
        end: usize,
    },

    #[error("Element {0} has no geometry - run finalize_elements() first")]
    NotFinalized(usize),

    #[error("Global stiffness matrix assembly is broken: {0}")]
    AssemblyInconsistent(AssemblyDiagnostic),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("VTK error: {0}")]
    VtkError(#[from] vtkio::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
