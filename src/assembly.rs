//! Global stiffness assembly into block-row sparse form
//!
//! Assembly runs in two phases. The symbolic phase derives the sparsity
//! pattern from element connectivity: one diagonal block per node plus one
//! block per element in each direction. The numeric phase scatters every
//! element's global stiffness into that pattern, skipping restrained DOFs.

use crate::analysis::AssemblyOptions;
use crate::elements::{Element, Node, Support};
use crate::error::{BridgeError, BridgeResult};
use crate::math::sparse::BlockCsrMatrix;
use crate::mesh::Mesh;
use crate::results::AssemblyDiagnostic;
use crate::stiffness::ElementStiffness;

/// Assembled global matrix together with what went wrong building it
#[derive(Debug, Clone)]
pub struct Assembly {
    pub matrix: BlockCsrMatrix,
    pub diagnostics: Vec<AssemblyDiagnostic>,
}

/// Build the sparsity pattern for `n_nodes` nodes connected by `elements`
///
/// # Returns
/// A zero-valued matrix with `n_nodes + 2 * elements.len()` blocks and the
/// diagnostics of any row whose placed column count differs from its span.
pub fn assemble_symbolic(
    n_nodes: usize,
    elements: &[Element],
    block_size: usize,
) -> BridgeResult<(BlockCsrMatrix, Vec<AssemblyDiagnostic>)> {
    // Always count the diagonal
    let mut counts = vec![1usize; n_nodes];
    for element in elements {
        if element.start >= n_nodes || element.end >= n_nodes {
            return Err(BridgeError::InvalidGeometry(format!(
                "element {} references nodes {} -> {} outside the {} node table",
                element.id, element.start, element.end, n_nodes
            )));
        }
        counts[element.start] += 1;
        counts[element.end] += 1;
    }

    let mut row_ptr = Vec::with_capacity(n_nodes + 1);
    let mut offset = 0;
    for count in &counts {
        row_ptr.push(offset);
        offset += count;
    }
    row_ptr.push(offset);

    let (columns, diagnostics) = fill_row_columns(&row_ptr, elements);

    let mut matrix = BlockCsrMatrix::new(n_nodes, n_nodes, block_size, n_nodes + 2 * elements.len());
    matrix.row_ptr_mut().copy_from_slice(&row_ptr);
    matrix.columns_mut().copy_from_slice(&columns);

    Ok((matrix, diagnostics))
}

/// Place the diagonal and both directions of every element edge into rows
fn fill_row_columns(
    row_ptr: &[usize],
    elements: &[Element],
) -> (Vec<usize>, Vec<AssemblyDiagnostic>) {
    let n_rows = row_ptr.len() - 1;
    let mut columns = vec![0usize; row_ptr[n_rows]];
    let mut diagnostics = Vec::new();

    for row in 0..n_rows {
        if row_ptr[row] < row_ptr[row + 1] {
            columns[row_ptr[row]] = row;
        }
    }

    // Slot 0 of every row holds the diagonal
    let mut placed = vec![1usize; n_rows];
    for element in elements {
        for (row, col) in [(element.start, element.end), (element.end, element.start)] {
            let span = row_ptr[row + 1] - row_ptr[row];
            if placed[row] < span {
                columns[row_ptr[row] + placed[row]] = col;
            }
            placed[row] += 1;
        }
    }

    for row in 0..n_rows {
        let span = row_ptr[row + 1] - row_ptr[row];
        if placed[row] != span {
            diagnostics.push(AssemblyDiagnostic::RowCountMismatch {
                row,
                expected: span,
                placed: placed[row],
            });
        }
        columns[row_ptr[row]..row_ptr[row + 1]].sort_unstable();
    }

    (columns, diagnostics)
}

/// Scatter one quadrant of an element matrix into block (row, col)
///
/// Entries whose row or column DOF is restrained are left untouched.
#[allow(clippy::too_many_arguments)]
fn scatter_quadrant(
    matrix: &mut BlockCsrMatrix,
    row: usize,
    col: usize,
    stiffness: &ElementStiffness,
    quadrant: (usize, usize),
    supports: (Support, Support),
    accumulate: bool,
    diagnostics: &mut Vec<AssemblyDiagnostic>,
) {
    let bs = matrix.block_size();
    let (row_offset, col_offset) = quadrant;
    let (row_support, col_support) = supports;

    let Some(block) = matrix.block_mut(row, col) else {
        diagnostics.push(AssemblyDiagnostic::MissingBlock { row, col });
        return;
    };

    for i in 0..bs {
        if row_support.is_restrained(i) {
            continue;
        }
        for j in 0..bs {
            if col_support.is_restrained(j) {
                continue;
            }
            let value = stiffness.get(row_offset + i, col_offset + j);
            if accumulate {
                block[i * bs + j] += value;
            } else {
                block[i * bs + j] = value;
            }
        }
    }
}

/// Scatter-add every element stiffness into the symbolic pattern
///
/// Diagonal blocks accumulate across elements sharing a node; off-diagonal
/// blocks are assigned, since each element edge owns its two directed blocks.
///
/// # Returns
/// The diagnostics of every pattern block the scatter could not find, or an
/// error if `stiffness` does not pair one matrix of the pattern's block size
/// with each element.
pub fn assemble_numeric(
    matrix: &mut BlockCsrMatrix,
    nodes: &[Node],
    elements: &[Element],
    stiffness: &[ElementStiffness],
) -> BridgeResult<Vec<AssemblyDiagnostic>> {
    let bs = matrix.block_size();
    if stiffness.len() != elements.len() {
        return Err(BridgeError::InvalidParameter(format!(
            "{} element stiffness matrices for {} elements",
            stiffness.len(),
            elements.len()
        )));
    }
    if let Some(k) = stiffness.iter().find(|k| k.kind().dofs_per_node() != bs) {
        return Err(BridgeError::InvalidParameter(format!(
            "{:?} element stiffness in a block size {} pattern",
            k.kind(),
            bs
        )));
    }

    let mut diagnostics = Vec::new();

    for (element, k) in elements.iter().zip(stiffness) {
        let (begin, end) = (element.start, element.end);
        let (Some(node_begin), Some(node_end)) = (nodes.get(begin), nodes.get(end)) else {
            diagnostics.push(AssemblyDiagnostic::MissingBlock { row: begin, col: end });
            continue;
        };
        let bc_begin = node_begin.support;
        let bc_end = node_end.support;

        scatter_quadrant(matrix, begin, begin, k, (0, 0), (bc_begin, bc_begin), true, &mut diagnostics);
        scatter_quadrant(matrix, begin, end, k, (0, bs), (bc_begin, bc_end), false, &mut diagnostics);
        scatter_quadrant(matrix, end, end, k, (bs, bs), (bc_end, bc_end), true, &mut diagnostics);
        scatter_quadrant(matrix, end, begin, k, (bs, 0), (bc_end, bc_begin), false, &mut diagnostics);
    }

    Ok(diagnostics)
}

/// Build the global stiffness matrix of a finalized mesh
pub fn assemble_global_stiffness(
    mesh: &Mesh,
    stiffness: &[ElementStiffness],
    options: &AssemblyOptions,
) -> BridgeResult<Assembly> {
    if let Some(k) = stiffness.iter().find(|k| k.kind() != options.kind) {
        return Err(BridgeError::InvalidParameter(format!(
            "{:?} element stiffness in a {:?} assembly",
            k.kind(),
            options.kind
        )));
    }

    let bs = options.kind.dofs_per_node();
    let (mut matrix, mut diagnostics) = assemble_symbolic(mesh.node_count(), &mesh.elements, bs)?;
    diagnostics.extend(assemble_numeric(&mut matrix, &mesh.nodes, &mesh.elements, stiffness)?);

    for diagnostic in &diagnostics {
        log::warn!("global stiffness matrix assembly is broken: {}", diagnostic);
    }
    if options.strict {
        if let Some(&diagnostic) = diagnostics.first() {
            return Err(BridgeError::AssemblyInconsistent(diagnostic));
        }
    }

    log::info!(
        "assembled {}x{} block matrix, block size {}, {} blocks",
        matrix.n_rows(),
        matrix.n_cols(),
        bs,
        matrix.nnzb()
    );

    Ok(Assembly { matrix, diagnostics })
}
