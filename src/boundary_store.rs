//! The sparse boundary-matrix store: one `{0,1}` matrix per dimension,
//! together with the index maps translating between matrix positions and
//! simplex labels.

use ndarray::Array2;

use crate::errors::{Result, SimplicialError};
use crate::utilities::sequences_and_ordinals::BiMapSequential;
use crate::vertex_label::VertexLabel;

/// Holds `boundary[p]` for `p = 0..=D` and the matching `index_map[p]`: the
/// sorted, deduplicated array of `p`-simplices giving `boundary[p]`'s
/// column order (and `boundary[p+1]`'s row order).
///
/// A store is a short-lived derived snapshot -- rebuilt fresh for each
/// Betti query -- and never aliases the simplex tree it was built from.
pub struct BoundaryStore<L: VertexLabel> {
    boundary: Vec<Array2<bool>>,
    index_map: Vec<BiMapSequential<Vec<L>>>,
}

impl<L: VertexLabel> Default for BoundaryStore<L> {
    fn default() -> Self { Self::new() }
}

impl<L: VertexLabel> BoundaryStore<L> {

    pub fn new() -> Self {
        BoundaryStore { boundary: Vec::new(), index_map: Vec::new() }
    }

    /// Register every `p`-simplex in `simplices` (all sharing dimension
    /// `p`) and build `boundary[p]`. Must be called in ascending order of
    /// `p`, starting at `0`, so that `index_map[p-1]` is always ready.
    ///
    /// [`SimplicialError::MissingLowerDimension`] if `p > 0` and
    /// `boundary[p-1]` hasn't been built yet.
    /// [`SimplicialError::DimensionMismatch`] if a facet of some
    /// `p`-simplex is absent from `index_map[p-1]`.
    pub fn add_simplices(&mut self, p: usize, simplices: Vec<Vec<L>>) -> Result<()> {
        if p > 0 && self.index_map.len() < p {
            return Err(SimplicialError::MissingLowerDimension);
        }

        let mut cols: Vec<Vec<L>> = simplices.into_iter()
            .map(|mut s| { s.sort(); s })
            .collect();
        cols.sort();
        cols.dedup();

        let matrix = if p == 0 {
            Array2::from_elem((1, cols.len()), true)
        } else {
            let rows_map = &self.index_map[p - 1];
            let mut m = Array2::from_elem((rows_map.len(), cols.len()), false);
            for (j, simplex) in cols.iter().enumerate() {
                for idx in 0..simplex.len() {
                    let mut face = simplex.clone();
                    face.remove(idx);
                    let i = rows_map.ord(&face).ok_or(SimplicialError::DimensionMismatch)?;
                    m[[i, j]] = true;
                }
            }
            m
        };

        let col_map = BiMapSequential::from_vec(cols);
        if self.boundary.len() == p {
            self.boundary.push(matrix);
            self.index_map.push(col_map);
        } else {
            self.boundary[p] = matrix;
            self.index_map[p] = col_map;
        }
        Ok(())
    }

    /// `boundary[p]`, or [`SimplicialError::NotPresent`] if dimension `p`
    /// hasn't been built.
    pub fn get(&self, p: usize) -> Result<&Array2<bool>> {
        self.boundary.get(p).ok_or(SimplicialError::NotPresent)
    }

    /// `index_map[p]`, or [`SimplicialError::NotPresent`].
    pub fn index_map(&self, p: usize) -> Result<&BiMapSequential<Vec<L>>> {
        self.index_map.get(p).ok_or(SimplicialError::NotPresent)
    }

    /// Highest dimension for which a boundary matrix has been built.
    pub fn max_dimension(&self) -> Option<usize> {
        if self.boundary.is_empty() { None } else { Some(self.boundary.len() - 1) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_zero_is_all_ones_row() {
        let mut store: BoundaryStore<usize> = BoundaryStore::new();
        store.add_simplices(0, vec![vec![0], vec![1], vec![2]]).unwrap();
        let b0 = store.get(0).unwrap();
        assert_eq!( b0.dim(), (1, 3) );
        assert!( b0.iter().all(|&x| x) );
    }

    #[test]
    fn test_missing_lower_dimension() {
        let mut store: BoundaryStore<usize> = BoundaryStore::new();
        let err = store.add_simplices(1, vec![vec![0, 1]]).unwrap_err();
        assert_eq!( err, SimplicialError::MissingLowerDimension );
    }

    #[test]
    fn test_triangle_boundary_shapes_and_incidence() {
        let mut store: BoundaryStore<usize> = BoundaryStore::new();
        store.add_simplices(0, vec![vec![0], vec![1], vec![2]]).unwrap();
        store.add_simplices(1, vec![vec![0, 1], vec![0, 2], vec![1, 2]]).unwrap();
        store.add_simplices(2, vec![vec![0, 1, 2]]).unwrap();

        let b1 = store.get(1).unwrap();
        assert_eq!( b1.dim(), (3, 3) );   // rows(boundary[1]) == cols(boundary[0])
        let b2 = store.get(2).unwrap();
        assert_eq!( b2.dim(), (3, 1) );   // rows(boundary[2]) == cols(boundary[1])

        // the triangle {0,1,2} is incident to all three of its edges
        assert!( b2.column(0).iter().all(|&x| x) );
    }

    #[test]
    fn test_dimension_mismatch_on_gap() {
        let mut store: BoundaryStore<usize> = BoundaryStore::new();
        store.add_simplices(0, vec![vec![0], vec![1]]).unwrap();
        // edge {0,2}: vertex 2 was never registered at dimension 0
        let err = store.add_simplices(1, vec![vec![0, 2]]).unwrap_err();
        assert_eq!( err, SimplicialError::DimensionMismatch );
    }

    #[test]
    fn test_index_map_gives_column_order_of_its_dimension() {
        let mut store: BoundaryStore<usize> = BoundaryStore::new();
        store.add_simplices(0, vec![vec![2], vec![0], vec![1]]).unwrap();
        store.add_simplices(1, vec![vec![0, 2], vec![0, 1], vec![1, 2]]).unwrap();

        // index_map[0] is sorted/deduplicated regardless of insertion order,
        // and its ordinal positions are exactly boundary[0]'s column indices.
        let vertices = store.index_map(0).unwrap();
        assert_eq!( vertices.len(), 3 );
        assert_eq!( vertices.val(0), Some(vec![0]) );
        assert_eq!( vertices.val(1), Some(vec![1]) );
        assert_eq!( vertices.val(2), Some(vec![2]) );
        assert_eq!( vertices.ord(&vec![2]), Some(2) );

        // index_map[1] likewise gives boundary[1]'s column order, and an
        // edge absent from the complex resolves to None.
        let edges = store.index_map(1).unwrap();
        assert_eq!( edges.val(0), Some(vec![0, 1]) );
        assert_eq!( edges.ord(&vec![1, 2]), Some(2) );
        assert_eq!( edges.ord(&vec![0, 9]), None );
    }

    #[test]
    fn test_index_map_not_present_beyond_built_dimensions() {
        let store: BoundaryStore<usize> = BoundaryStore::new();
        assert_eq!( store.index_map(0), Err(SimplicialError::NotPresent) );
    }
}
