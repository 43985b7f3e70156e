//! Plain-text dumps and legacy VTK output
//!
//! Every writer takes any `io::Write`, so callers choose between files,
//! buffers and pipes. Column order and counts are fixed; downstream tools
//! parse these files positionally. The visualization mesh goes through
//! `vtkio`.

use std::io::{self, Write};

use vtkio::model::*;

use crate::error::{BridgeError, BridgeResult};
use crate::mesh::Mesh;

/// Node table: count, then `id x y` per node, then a blank line
pub fn write_nodes<W: Write>(w: &mut W, mesh: &Mesh) -> io::Result<()> {
    writeln!(w, "{}", mesh.node_count())?;
    for node in &mesh.nodes {
        writeln!(w, "{} {} {}", node.id, node.x, node.y)?;
    }
    writeln!(w)
}

/// Force table: count, then `id fx fy` per node, then a blank line
///
/// `rhs` holds `block_size` entries per node; only the two translational
/// components are written.
pub fn write_forces<W: Write>(
    w: &mut W,
    mesh: &Mesh,
    rhs: &[f64],
    block_size: usize,
) -> BridgeResult<()> {
    check_vector_len("force vector", rhs, mesh.node_count(), block_size)?;

    writeln!(w, "{}", mesh.node_count())?;
    for node in &mesh.nodes {
        let base = node.id * block_size;
        writeln!(w, "{} {} {}", node.id, rhs[base], rhs[base + 1])?;
    }
    writeln!(w)?;
    Ok(())
}

/// Element table followed by the list of restrained DOFs
///
/// ```text
/// <element count>
/// <id> <start> <end> <area> <modulus>
/// ...
///
/// <restrained dof count>
/// <node> <axis>
/// ...
/// ```
pub fn write_elements<W: Write>(w: &mut W, mesh: &Mesh) -> io::Result<()> {
    writeln!(w, "{}", mesh.element_count())?;
    for element in &mesh.elements {
        writeln!(
            w,
            "{} {} {} {} {}",
            element.id, element.start, element.end, element.area, element.e
        )?;
    }
    writeln!(w)?;

    writeln!(w, "{}", mesh.restrained_dof_count())?;
    for node in &mesh.nodes {
        for axis in node.support.restrained_dofs() {
            writeln!(w, "{} {}", node.id, axis)?;
        }
    }
    Ok(())
}

/// Build the legacy VTK unstructured grid of line cells
///
/// With a displacement vector the points are drawn displaced and the
/// `AvgDisplacement` scalar is `(|ux| + |uy|) / 2`; without one the
/// undeformed mesh is written with a zero scalar field.
pub fn mesh_as_vtk(
    mesh: &Mesh,
    displacement: Option<&[f64]>,
    block_size: usize,
) -> BridgeResult<Vtk> {
    if let Some(u) = displacement {
        check_vector_len("displacement vector", u, mesh.node_count(), block_size)?;
    }
    let translation = |node: usize| match displacement {
        Some(u) => (u[node * block_size], u[node * block_size + 1]),
        None => (0.0, 0.0),
    };

    let n_elements = mesh.element_count();

    Ok(Vtk {
        version: Version { major: 3, minor: 0 },
        title: String::from("vtk output"),
        byte_order: ByteOrder::BigEndian,
        file_path: None,
        data: DataSet::inline(UnstructuredGridPiece {
            points: IOBuffer::F64(
                mesh.nodes
                    .iter()
                    .flat_map(|node| {
                        let (ux, uy) = translation(node.id);
                        [node.x + ux, node.y + uy, 0.0]
                    })
                    .collect(),
            ),
            cells: Cells {
                cell_verts: VertexNumbers::Legacy {
                    num_cells: n_elements as u32,
                    vertices: mesh
                        .elements
                        .iter()
                        .flat_map(|e| [2, e.start as u32, e.end as u32])
                        .collect(),
                },
                types: vec![CellType::Line; n_elements],
            },
            data: Attributes {
                point: vec![Attribute::DataArray(DataArrayBase {
                    name: String::from("AvgDisplacement"),
                    elem: ElementType::Scalars {
                        num_comp: 1,
                        lookup_table: None,
                    },
                    data: IOBuffer::F64(
                        mesh.nodes
                            .iter()
                            .map(|node| {
                                let (ux, uy) = translation(node.id);
                                (ux.abs() + uy.abs()) / 2.0
                            })
                            .collect(),
                    ),
                })],
                ..Default::default()
            },
        }),
    })
}

/// Write the mesh as a legacy VTK 3.0 ASCII file
pub fn write_vtk<W: Write>(
    w: &mut W,
    mesh: &Mesh,
    displacement: Option<&[f64]>,
    block_size: usize,
) -> BridgeResult<()> {
    let mut text = String::new();
    mesh_as_vtk(mesh, displacement, block_size)?.write_legacy_ascii(&mut text)?;
    w.write_all(text.as_bytes())?;
    Ok(())
}

fn check_vector_len(what: &str, v: &[f64], n_nodes: usize, block_size: usize) -> BridgeResult<()> {
    if block_size < 2 || v.len() != n_nodes * block_size {
        return Err(BridgeError::InvalidParameter(format!(
            "{} has {} entries, expected {} nodes x {}",
            what,
            v.len(),
            n_nodes,
            block_size
        )));
    }
    Ok(())
}
