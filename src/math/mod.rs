//! Mathematical utilities for 2D bar and frame elements

pub mod curves;
pub mod sparse;

use nalgebra::{DMatrix, Matrix4, Matrix6};

pub use curves::{Line, Parabola};
pub use sparse::BlockCsrMatrix;

pub type Mat = DMatrix<f64>;
/// 4x4 matrix for bar element stiffness
pub type Mat4 = Matrix4<f64>;
/// 6x6 matrix for frame element stiffness
pub type Mat6 = Matrix6<f64>;

/// Compute the local stiffness matrix for a 2D bar element
///
/// DOF order is `[u_i, v_i, u_j, v_j]`; only the axial DOFs couple.
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `length` - Element length
pub fn bar_local_stiffness(e: f64, a: f64, length: f64) -> Mat4 {
    let ea_l = a * e / length;

    #[rustfmt::skip]
    let data = [
        ea_l,  0.0, -ea_l, 0.0,
        0.0,   0.0,  0.0,  0.0,
        -ea_l, 0.0,  ea_l, 0.0,
        0.0,   0.0,  0.0,  0.0,
    ];

    Mat4::from_row_slice(&data)
}

/// Compute the local stiffness matrix for a 2D Euler frame element
///
/// DOF order is `[u_i, v_i, θ_i, u_j, v_j, θ_j]`. The whole matrix is scaled
/// by `EI/L^3`, so the axial terms are written as `AL^2/I`.
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Second moment of area
/// * `length` - Element length
pub fn frame_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let ei_l3 = e * i / (l2 * l);
    let al2_i = a * l2 / i;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        al2_i,  0.0,      0.0,     -al2_i, 0.0,      0.0,
        // Row 1: shear at i
        0.0,    12.0,     6.0*l,    0.0,   -12.0,    6.0*l,
        // Row 2: moment at i
        0.0,    6.0*l,    4.0*l2,   0.0,   -6.0*l,   2.0*l2,
        // Row 3: axial at j
        -al2_i, 0.0,      0.0,      al2_i, 0.0,      0.0,
        // Row 4: shear at j
        0.0,    -12.0,   -6.0*l,    0.0,   12.0,    -6.0*l,
        // Row 5: moment at j
        0.0,    6.0*l,    2.0*l2,   0.0,   -6.0*l,   4.0*l2,
    ];

    Mat6::from_row_slice(&data) * ei_l3
}

/// Compute the 4x4 transformation matrix for a 2D bar element
///
/// # Arguments
/// * `cos` - cos θ = dx / L
/// * `sin` - sin θ = dy / L
pub fn bar_transformation_matrix(cos: f64, sin: f64) -> Mat4 {
    #[rustfmt::skip]
    let data = [
        cos,  sin, 0.0,  0.0,
        -sin, cos, 0.0,  0.0,
        0.0,  0.0, cos,  sin,
        0.0,  0.0, -sin, cos,
    ];

    Mat4::from_row_slice(&data)
}

/// Compute the 6x6 transformation matrix for a 2D frame element
///
/// Translations rotate with the element axis; rotations are invariant.
pub fn frame_transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    #[rustfmt::skip]
    let data = [
        cos,  sin, 0.0, 0.0,  0.0, 0.0,
        -sin, cos, 0.0, 0.0,  0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,  0.0, 0.0,
        0.0,  0.0, 0.0, cos,  sin, 0.0,
        0.0,  0.0, 0.0, -sin, cos, 0.0,
        0.0,  0.0, 0.0, 0.0,  0.0, 1.0,
    ];

    Mat6::from_row_slice(&data)
}
