//! Dense grid of reals (after `ql/math/matrix.hpp`), stored in a
//! `nalgebra::DMatrix`.
//!
//! Surfaces keep one row per `y` node and one column per `x` node, so
//! `m[(row, col)]` is the value at `(xs[col], ys[row])`.

use nalgebra::DMatrix;
use ql_core::Real;
use std::ops::{Index, IndexMut};

/// A `rows × cols` matrix indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Matrix read row by row from `data`, which must hold `rows * cols`
    /// values.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<Real> {
        self.0.row(i).iter().copied().collect()
    }

    /// Drop the first `n` columns, or every column when `n >= cols`. Rows
    /// are kept.
    pub fn remove_leading_columns(&mut self, n: usize) {
        let n = n.min(self.cols());
        if n > 0 {
            let full = std::mem::replace(&mut self.0, DMatrix::zeros(0, 0));
            self.0 = full.remove_columns(0, n);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, at: (usize, usize)) -> &Real {
        &self.0[at]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, at: (usize, usize)) -> &mut Real {
        &mut self.0[at]
    }
}
