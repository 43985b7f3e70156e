//! Two-node cantilever: one element, left end fixed

use approx::assert_relative_eq;
use bridge_fem::assembly::assemble_global_stiffness;
use bridge_fem::prelude::*;
use bridge_fem::stiffness::build_element_stiffness;

fn cantilever_mesh() -> Mesh {
    let mut builder = MeshBuilder::new();
    builder.allocate_node(0.0, 0.0, Support::fixed());
    builder.allocate_node(1.0, 0.0, Support::free());
    let mut mesh = builder.finish();
    mesh.elements
        .push(Element::new(0, 0, 1, Section::new(1.0, 100.0), MemberRole::Deck));
    mesh.finalize_elements().unwrap();
    mesh
}

fn assemble(mesh: &Mesh, options: AssemblyOptions) -> BlockCsrMatrix {
    let stiffness = build_element_stiffness(&mesh.elements, options.kind).unwrap();
    let assembly = assemble_global_stiffness(mesh, &stiffness, &options.strict()).unwrap();
    assert!(assembly.diagnostics.is_empty());
    assembly.matrix
}

#[test]
fn test_bar_cantilever() {
    let mesh = cantilever_mesh();
    let k = assemble(&mesh, AssemblyOptions::bar());

    assert_eq!(k.nnzb(), 4);
    assert_eq!(k.row_ptr(), &[0, 2, 4]);
    assert_eq!(k.columns(), &[0, 1, 0, 1]);

    assert_eq!(k.block(0, 0).unwrap(), &[0.0; 4]);
    assert_eq!(k.block(0, 1).unwrap(), &[0.0; 4]);
    assert_eq!(k.block(1, 0).unwrap(), &[0.0; 4]);
    let free = k.block(1, 1).unwrap();
    assert_relative_eq!(free[0], 100.0, max_relative = 1e-12);
    assert_relative_eq!(free[1], 0.0, epsilon = 1e-12);
    assert_relative_eq!(free[3], 0.0, epsilon = 1e-12);
}

#[test]
fn test_frame_cantilever() {
    let mesh = cantilever_mesh();
    let k = assemble(&mesh, AssemblyOptions::frame());
    let ei_l3 = 100.0 * 700.0;

    // Fixed node keeps only its rotation
    let fixed = k.block(0, 0).unwrap();
    assert!(fixed[..8].iter().all(|v| *v == 0.0));
    assert_relative_eq!(fixed[8], 4.0 * ei_l3, max_relative = 1e-12);

    let coupling = k.block(0, 1).unwrap();
    assert!(coupling[..6].iter().all(|v| *v == 0.0));
    assert_relative_eq!(coupling[7], -6.0 * ei_l3, max_relative = 1e-12);
    assert_relative_eq!(coupling[8], 2.0 * ei_l3, max_relative = 1e-12);

    #[rustfmt::skip]
    let expected = [
        100.0, 0.0,           0.0,
        0.0,   12.0 * ei_l3, -6.0 * ei_l3,
        0.0,  -6.0 * ei_l3,   4.0 * ei_l3,
    ];
    let free = k.block(1, 1).unwrap();
    for (got, want) in free.iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-9, max_relative = 1e-12);
    }
    assert!(k.is_symmetric(1e-9));
}

#[test]
fn test_cantilever_dense_matches_blocks() {
    let mesh = cantilever_mesh();
    let k = assemble(&mesh, AssemblyOptions::bar());
    let dense = k.to_dense();
    assert_eq!(dense.nrows(), 4);
    assert_relative_eq!(dense[(2, 2)], 100.0, max_relative = 1e-12);
    assert_eq!(dense.iter().filter(|v| **v != 0.0).count(), 1);
}
