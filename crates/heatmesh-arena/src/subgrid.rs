//! A square block of fixed-point cells.

use heatmesh_core::Fixed;

/// An L×L matrix of temperatures stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subgrid {
    len: usize,
    cells: Vec<Fixed>,
}

impl Subgrid {
    /// A zeroed `len × len` subgrid.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cells: vec![Fixed::ZERO; len * len],
        }
    }

    /// Edge length L.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the subgrid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Fixed {
        self.cells[row * self.len + col]
    }

    /// Overwrite the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Fixed) {
        self.cells[row * self.len + col] = value;
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: Fixed) {
        self.cells.fill(value);
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[Fixed] {
        &self.cells[row * self.len..(row + 1) * self.len]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Fixed] {
        &self.cells
    }
}
