//! Block compressed sparse row storage for the global stiffness matrix
//!
//! Each stored entry is a dense `block_size x block_size` block coupling two
//! nodes. Block values are stored row-major, one block after another in the
//! order of `columns`.

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use super::Mat;

/// Block-row compressed sparse matrix
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCsrMatrix {
    n_rows: usize,
    n_cols: usize,
    block_size: usize,
    row_ptr: Vec<usize>,
    columns: Vec<usize>,
    values: Vec<f64>,
}

impl BlockCsrMatrix {
    /// Create a zero-initialized matrix with room for `nnzb` blocks
    ///
    /// # Arguments
    /// * `n_rows` - Number of block rows
    /// * `n_cols` - Number of block columns
    /// * `block_size` - Rows (and columns) per block
    /// * `nnzb` - Number of stored blocks
    pub fn new(n_rows: usize, n_cols: usize, block_size: usize, nnzb: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            block_size,
            row_ptr: vec![0; n_rows + 1],
            columns: vec![0; nnzb],
            values: vec![0.0; nnzb * block_size * block_size],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of stored blocks
    pub fn nnzb(&self) -> usize {
        self.columns.len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn row_ptr_mut(&mut self) -> &mut [usize] {
        &mut self.row_ptr
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [usize] {
        &mut self.columns
    }

    /// Sorted block columns of a row
    pub fn row_columns(&self, row: usize) -> &[usize] {
        &self.columns[self.row_ptr[row]..self.row_ptr[row + 1]]
    }

    /// Position of block (row, col) in `columns`
    ///
    /// Requires the row's columns to be sorted.
    fn block_index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.n_rows {
            return None;
        }
        let start = self.row_ptr[row];
        self.row_columns(row)
            .binary_search(&col)
            .ok()
            .map(|offset| start + offset)
    }

    /// Values of block (row, col), row-major
    pub fn block(&self, row: usize, col: usize) -> Option<&[f64]> {
        let bs2 = self.block_size * self.block_size;
        let idx = self.block_index(row, col)?;
        Some(&self.values[idx * bs2..(idx + 1) * bs2])
    }

    /// Mutable values of block (row, col), row-major
    pub fn block_mut(&mut self, row: usize, col: usize) -> Option<&mut [f64]> {
        let bs2 = self.block_size * self.block_size;
        let idx = self.block_index(row, col)?;
        Some(&mut self.values[idx * bs2..(idx + 1) * bs2])
    }

    /// Scalar entry at global (row, col), zero if the block is not stored
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let bs = self.block_size;
        self.block(row / bs, col / bs)
            .map(|block| block[(row % bs) * bs + col % bs])
            .unwrap_or(0.0)
    }

    /// Iterate over `(block_row, block_col, block_values)`
    pub fn block_iter(&self) -> impl Iterator<Item = (usize, usize, &[f64])> + '_ {
        let bs2 = self.block_size * self.block_size;
        (0..self.n_rows).flat_map(move |row| {
            (self.row_ptr[row]..self.row_ptr[row + 1])
                .map(move |idx| (row, self.columns[idx], &self.values[idx * bs2..(idx + 1) * bs2]))
        })
    }

    /// Expand into a scalar CSR matrix for a sparse solver
    ///
    /// Every entry of every stored block is kept, including zeros, so the
    /// scalar pattern mirrors the block pattern.
    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let bs = self.block_size;
        let mut coo = CooMatrix::new(self.n_rows * bs, self.n_cols * bs);

        for (row, col, block) in self.block_iter() {
            for i in 0..bs {
                for j in 0..bs {
                    coo.push(row * bs + i, col * bs + j, block[i * bs + j]);
                }
            }
        }

        CsrMatrix::from(&coo)
    }

    /// Convert to dense matrix (for comparison/debugging)
    pub fn to_dense(&self) -> Mat {
        let bs = self.block_size;
        let mut mat = Mat::zeros(self.n_rows * bs, self.n_cols * bs);

        for (row, col, block) in self.block_iter() {
            for i in 0..bs {
                for j in 0..bs {
                    mat[(row * bs + i, col * bs + j)] += block[i * bs + j];
                }
            }
        }

        mat
    }

    /// Check symmetry block by block against the transposed block
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let bs = self.block_size;
        self.block_iter().all(|(row, col, block)| match self.block(col, row) {
            Some(mirror) => (0..bs).all(|i| {
                (0..bs).all(|j| (block[i * bs + j] - mirror[j * bs + i]).abs() <= tol)
            }),
            None => block.iter().all(|v| v.abs() <= tol),
        })
    }
}
