//! Index-shifted storage
//!
//! Every discrete object of the method is indexed by integers that start
//! below zero: the grid runs over −2..=N+2, the basis functions, the
//! functionals, the unknowns and the rows/columns of the linear system over
//! −2..=N−1. This module provides the one adapter that maps such a domain
//! index onto contiguous `nalgebra` storage:
//!
//! ```text
//! domain index   first   first+1   ...   last
//! storage slot     0        1      ...   last-first
//! ```
//!
//! Reading outside `[first, last]` is an invariant violation and panics.
//! [`ShiftedVector::get`] and [`ShiftedMatrix::get`] offer a checked view.

use nalgebra::{DMatrix, DVector};
use std::ops::{Index, IndexMut, RangeInclusive, Sub};

// =================================================================================================
// Shifted Vector
// =================================================================================================

/// Vector indexed over `first..=last`
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftedVector {
    first: i64,
    data: DVector<f64>,
}

impl ShiftedVector {
    /// Zero vector over `first..=last`
    ///
    /// # Panics
    ///
    /// Panics when `last < first`.
    pub fn zeros(first: i64, last: i64) -> Self {
        assert!(last >= first, "empty index range {first}..={last}");
        Self {
            first,
            data: DVector::zeros((last - first + 1) as usize),
        }
    }

    /// Vector over `first..=last` filled by `f(index)`
    pub fn from_fn<F>(first: i64, last: i64, mut f: F) -> Self
    where
        F: FnMut(i64) -> f64,
    {
        let mut vector = Self::zeros(first, last);
        for index in first..=last {
            vector[index] = f(index);
        }
        vector
    }

    /// Wrap existing storage whose slot 0 holds domain index `first`
    pub fn from_storage(first: i64, data: DVector<f64>) -> Self {
        assert!(!data.is_empty(), "shifted vector storage must not be empty");
        Self { first, data }
    }

    /// First domain index
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Last domain index
    pub fn last(&self) -> i64 {
        self.first + self.data.len() as i64 - 1
    }

    /// Domain index range
    pub fn indices(&self) -> RangeInclusive<i64> {
        self.first..=self.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects empty ranges
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked access
    pub fn get(&self, index: i64) -> Option<f64> {
        self.slot(index).map(|slot| self.data[slot])
    }

    /// Iterate over `(domain index, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(slot, value)| (self.first + slot as i64, *value))
    }

    /// Underlying contiguous storage
    pub fn as_dvector(&self) -> &DVector<f64> {
        &self.data
    }

    /// Consume and return the contiguous storage
    pub fn into_dvector(self) -> DVector<f64> {
        self.data
    }

    fn slot(&self, index: i64) -> Option<usize> {
        if index < self.first || index > self.last() {
            None
        } else {
            Some((index - self.first) as usize)
        }
    }

    fn slot_or_panic(&self, index: i64) -> usize {
        self.slot(index).unwrap_or_else(|| {
            panic!("index {} outside populated range {}..={}", index, self.first, self.last())
        })
    }
}

impl Index<i64> for ShiftedVector {
    type Output = f64;

    fn index(&self, index: i64) -> &f64 {
        &self.data[self.slot_or_panic(index)]
    }
}

impl IndexMut<i64> for ShiftedVector {
    fn index_mut(&mut self, index: i64) -> &mut f64 {
        let slot = self.slot_or_panic(index);
        &mut self.data[slot]
    }
}

// =================================================================================================
// Shifted Matrix
// =================================================================================================

/// Square matrix whose rows and columns are indexed over `first..=last`
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftedMatrix {
    first: i64,
    data: DMatrix<f64>,
}

impl ShiftedMatrix {
    /// Zero matrix over `first..=last` × `first..=last`
    pub fn zeros(first: i64, last: i64) -> Self {
        assert!(last >= first, "empty index range {first}..={last}");
        let n = (last - first + 1) as usize;
        Self { first, data: DMatrix::zeros(n, n) }
    }

    /// Identity matrix: 1 where row == col, 0 elsewhere
    pub fn identity(first: i64, last: i64) -> Self {
        assert!(last >= first, "empty index range {first}..={last}");
        let n = (last - first + 1) as usize;
        Self { first, data: DMatrix::identity(n, n) }
    }

    /// Matrix filled by `f(row, col)`
    pub fn from_fn<F>(first: i64, last: i64, mut f: F) -> Self
    where
        F: FnMut(i64, i64) -> f64,
    {
        let mut matrix = Self::zeros(first, last);
        for row in first..=last {
            for col in first..=last {
                matrix[(row, col)] = f(row, col);
            }
        }
        matrix
    }

    /// Wrap existing square storage whose slot (0, 0) holds `(first, first)`
    pub fn from_storage(first: i64, data: DMatrix<f64>) -> Self {
        assert!(data.is_square(), "shifted matrix storage must be square");
        assert!(data.nrows() > 0, "shifted matrix storage must not be empty");
        Self { first, data }
    }

    /// First domain index
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Last domain index
    pub fn last(&self) -> i64 {
        self.first + self.data.nrows() as i64 - 1
    }

    /// Domain index range (rows and columns)
    pub fn indices(&self) -> RangeInclusive<i64> {
        self.first..=self.last()
    }

    /// Dimension
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    /// Checked access
    pub fn get(&self, row: i64, col: i64) -> Option<f64> {
        let range = self.indices();
        if range.contains(&row) && range.contains(&col) {
            Some(self.data[((row - self.first) as usize, (col - self.first) as usize)])
        } else {
            None
        }
    }

    /// Underlying contiguous storage
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Consume and return the contiguous storage
    pub fn into_dmatrix(self) -> DMatrix<f64> {
        self.data
    }

    fn slots(&self, row: i64, col: i64) -> (usize, usize) {
        let range = self.indices();
        if !range.contains(&row) || !range.contains(&col) {
            panic!(
                "index ({}, {}) outside populated range {}..={}",
                row, col, self.first, self.last()
            );
        }
        ((row - self.first) as usize, (col - self.first) as usize)
    }
}

impl Index<(i64, i64)> for ShiftedMatrix {
    type Output = f64;

    fn index(&self, (row, col): (i64, i64)) -> &f64 {
        let slots = self.slots(row, col);
        &self.data[slots]
    }
}

impl IndexMut<(i64, i64)> for ShiftedMatrix {
    fn index_mut(&mut self, (row, col): (i64, i64)) -> &mut f64 {
        let slots = self.slots(row, col);
        &mut self.data[slots]
    }
}

/// Entrywise difference over the shared index domain
impl Sub for &ShiftedMatrix {
    type Output = ShiftedMatrix;

    fn sub(self, rhs: &ShiftedMatrix) -> ShiftedMatrix {
        assert_eq!(
            self.indices(),
            rhs.indices(),
            "matrices must share the same index domain"
        );
        ShiftedMatrix {
            first: self.first,
            data: &self.data - &rhs.data,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
