//! The Z/2 matrix reducer: brings a `{0,1}` matrix to Smith normal form by
//! row swaps, column swaps, and XOR row/column additions.
//!
//! The algorithm is the one in Edelsbrunner & Harer's *Computational
//! Topology*: walk a pivot position down the diagonal, at each step
//! searching the live lower-right submatrix (row-major) for its first `1`,
//! swapping it onto the diagonal, then clearing the rest of its row and
//! column. Arithmetic is routed through [`GF2`] rather than a bare `^`, so
//! that "XOR a row into another" reads as the ring operation it is.

use ndarray::Array2;

use crate::rings::field_prime::GF2;
use crate::rings::ring::Semiring;

/// A matrix in Smith normal form over Z/2: reached from some source matrix
/// by row swaps, column swaps, and XOR row/column additions alone, so
/// `rank` and `nullity` below are invariants of the source matrix, not just
/// of this particular reduced form.
#[derive(Clone, Debug, PartialEq)]
pub struct SmithNormalForm {
    matrix: Array2<bool>,
    /// The pivot count: both the number of non-zero rows and the size of
    /// the leading identity block.
    rank: usize,
}

impl SmithNormalForm {
    /// The reduced matrix itself: a leading `rank × rank` identity block,
    /// zero everywhere else.
    pub fn matrix(&self) -> &Array2<bool> { &self.matrix }

    /// `rank(B)`: the number of non-zero rows, equivalently the size of the
    /// identity block.
    pub fn rank(&self) -> usize { self.rank }

    /// `rank(Z)`, the kernel dimension: the number of all-zero columns.
    pub fn nullity(&self) -> usize {
        let (_, cols) = self.matrix.dim();
        cols - self.rank
    }
}

/// Reduce `source` to Smith normal form over Z/2. Never mutates `source`;
/// the reducer works on an internal copy.
///
/// Pivot selection is deterministic: at each step, the lexicographically
/// smallest `(row, col)` (row-major order) holding a `1` in the live
/// submatrix `matrix[x.., x..]` is chosen. Any consistent rule yields the
/// same shape of SNF, but this rule is the one the tests pin.
pub fn reduce(source: &Array2<bool>) -> SmithNormalForm {
    let ring = GF2::new();
    let mut matrix = source.clone();
    let (rows, cols) = matrix.dim();
    let bound = rows.min(cols);

    let mut x = 0;
    while x < bound {
        let pivot = find_pivot(&matrix, x);
        let (k, l) = match pivot {
            Some(p) => p,
            None => break,
        };

        if k != x { swap_rows(&mut matrix, x, k); }
        if l != x { swap_cols(&mut matrix, x, l); }

        for row in 0..rows {
            if row != x && matrix[[row, x]] {
                xor_row_into(&mut matrix, x, row, &ring);
            }
        }
        for col in 0..cols {
            if col != x && matrix[[x, col]] {
                xor_col_into(&mut matrix, x, col, &ring);
            }
        }

        x += 1;
    }

    SmithNormalForm { matrix, rank: x }
}

/// The lexicographically smallest `(row, col)` with a `1` entry in
/// `matrix[x.., x..]`, row-major.
fn find_pivot(matrix: &Array2<bool>, x: usize) -> Option<(usize, usize)> {
    let (rows, cols) = matrix.dim();
    for row in x..rows {
        for col in x..cols {
            if matrix[[row, col]] { return Some((row, col)); }
        }
    }
    None
}

fn swap_rows(matrix: &mut Array2<bool>, a: usize, b: usize) {
    if a == b { return; }
    let cols = matrix.ncols();
    for col in 0..cols {
        matrix.swap([a, col], [b, col]);
    }
}

fn swap_cols(matrix: &mut Array2<bool>, a: usize, b: usize) {
    if a == b { return; }
    let rows = matrix.nrows();
    for row in 0..rows {
        matrix.swap([row, a], [row, b]);
    }
}

/// XOR pivot row `x` into `row`, entry by entry, through the GF(2) ring.
fn xor_row_into(matrix: &mut Array2<bool>, x: usize, row: usize, ring: &GF2) {
    let cols = matrix.ncols();
    for col in 0..cols {
        let pivot_entry = matrix[[x, col]];
        let target = &mut matrix[[row, col]];
        *target = ring.add(*target, pivot_entry);
    }
}

/// XOR pivot column `x` into `col`, entry by entry, through the GF(2) ring.
fn xor_col_into(matrix: &mut Array2<bool>, x: usize, col: usize, ring: &GF2) {
    let rows = matrix.nrows();
    for row in 0..rows {
        let pivot_entry = matrix[[row, x]];
        let target = &mut matrix[[row, col]];
        *target = ring.add(*target, pivot_entry);
    }
}
