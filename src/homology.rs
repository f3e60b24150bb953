//! The homology facade: turns a [`SimplexTree`] into Betti numbers and an
//! Euler characteristic by building a [`BoundaryStore`] and reducing each
//! of its matrices.

use crate::boundary_store::BoundaryStore;
use crate::reducer;
use crate::simplex_tree::SimplexTree;
use crate::vertex_label::VertexLabel;

/// Build the boundary-matrix store for `tree`: `k_simplices(p)` for every
/// `p` from `0` up to `tree.dimension()`, fed to [`BoundaryStore`] in
/// ascending order so each dimension's `index_map` is ready before the
/// next's facets are looked up.
///
/// `None` if `tree` is empty.
fn build_store<L: VertexLabel>(tree: &SimplexTree<L>) -> Option<BoundaryStore<L>> {
    let d = tree.dimension()?;
    let mut store = BoundaryStore::new();
    for p in 0..=d {
        store.add_simplices(p, tree.k_simplices(p))
            .expect("a simplex tree's own k_simplices always satisfy the store's shape invariants");
    }
    Some(store)
}

/// The ordinary Betti numbers `[β_0, …, β_D]` of `tree`'s complex, or `[]`
/// for an empty tree.
///
/// For each dimension `p`, `boundary[p]` is reduced to Smith normal form to
/// get `rank(Z_p)` (the nullity) and `rank(B_{p-1})` (the rank, shifted up
/// by one dimension since `B_{p-1}` is the image of `boundary[p]`). Then
/// `β_p = rank(Z_p) - rank(B_p)`, with `β_0` incremented by one to promote
/// the reduced Betti number to the ordinary one (`B_{-1} = 0` is implicit
/// and never stored, so `rank(B_{-1}) = 0` without the boundary store
/// needing a dimension `-1` entry).
pub fn betti_numbers<L: VertexLabel>(tree: &SimplexTree<L>) -> Vec<usize> {
    let store = match build_store(tree) {
        Some(s) => s,
        None => return Vec::new(),
    };
    let d = store.max_dimension().expect("a non-empty store always has a max dimension");

    // rank_zp[p] = rank(Z_p) = nullity of boundary[p].
    // rank_bp_minus_1[p] = rank(B_{p-1}) = rank of boundary[p].
    let mut rank_zp = vec![0usize; d + 1];
    let mut rank_bp_minus_1 = vec![0usize; d + 2]; // index D+1 stays 0: B_D = 0 is implicit.
    for p in 0..=d {
        let snf = reducer::reduce(store.get(p).expect("built for every p in 0..=d"));
        rank_zp[p] = snf.nullity();
        rank_bp_minus_1[p] = snf.rank();
    }

    let mut betti = Vec::with_capacity(d + 1);
    for p in 0..=d {
        let rank_bp = rank_bp_minus_1[p + 1];
        let mut beta = rank_zp[p] - rank_bp;
        if p == 0 { beta += 1; }
        betti.push(beta);
    }
    betti
}

/// Same vector as [`betti_numbers`], but with `β_0` decremented by one (the
/// reduced, rather than ordinary, Betti numbers). `[]` for an empty tree.
pub fn reduced_betti_numbers<L: VertexLabel>(tree: &SimplexTree<L>) -> Vec<usize> {
    let mut betti = betti_numbers(tree);
    if let Some(first) = betti.first_mut() {
        *first -= 1;
    }
    betti
}

/// `χ = Σ_{p even} β_p - Σ_{p odd} β_p`, derived from [`betti_numbers`].
pub fn euler_characteristic<L: VertexLabel>(tree: &SimplexTree<L>) -> isize {
    betti_numbers(tree).iter().enumerate()
        .map(|(p, &beta)| if p % 2 == 0 { beta as isize } else { -(beta as isize) })
        .sum()
}

/// A cross-check computation of [`euler_characteristic`], independent of
/// Betti numbers and matrix reduction entirely: the alternating sum of
/// per-dimension simplex counts, `Σ_p (-1)^p · (#p-simplices)`.
pub fn euler_characteristic_from_simplex_counts<L: VertexLabel>(tree: &SimplexTree<L>) -> isize {
    let d = match tree.dimension() {
        Some(d) => d,
        None => return 0,
    };
    (0..=d)
        .map(|p| {
            let count = tree.k_simplices(p).len() as isize;
            if p % 2 == 0 { count } else { -count }
        })
        .sum()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(simplices: &[&[usize]]) -> SimplexTree<usize> {
        let mut tree = SimplexTree::new();
        for s in simplices {
            tree.insert_closed(s).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty_tree_has_no_betti_numbers() {
        let tree: SimplexTree<usize> = SimplexTree::new();
        assert_eq!( betti_numbers(&tree), Vec::<usize>::new() );
    }

    #[test]
    fn test_solid_3_ball() {
        let tree = tree_from(&[&[0, 1, 2, 3]]);
        assert_eq!( betti_numbers(&tree), vec![1, 0, 0, 0] );
        assert_eq!( euler_characteristic(&tree), 1 );
        assert_eq!( euler_characteristic(&tree), euler_characteristic_from_simplex_counts(&tree) );
    }

    #[test]
    fn test_2_sphere_via_removed_interior() {
        let mut tree = tree_from(&[&[0, 1, 2, 3]]);
        tree.remove(&[0, 1, 2, 3]).unwrap();
        assert_eq!( betti_numbers(&tree), vec![1, 0, 1] );
        assert_eq!( euler_characteristic(&tree), 2 );
        assert_eq!( euler_characteristic(&tree), euler_characteristic_from_simplex_counts(&tree) );
    }

    #[test]
    fn test_cylinder() {
        let tree = tree_from(&[
            &[0, 1, 4], &[0, 2, 3], &[0, 3, 4],
            &[1, 2, 5], &[1, 4, 5], &[2, 3, 5],
        ]);
        assert_eq!( betti_numbers(&tree), vec![1, 1, 0] );
        assert_eq!( euler_characteristic(&tree), 0 );
        assert_eq!( euler_characteristic(&tree), euler_characteristic_from_simplex_counts(&tree) );
    }

    #[test]
    fn test_mobius_strip() {
        let tree = tree_from(&[
            &[0, 1, 4], &[0, 2, 3], &[0, 2, 5],
            &[0, 3, 4], &[1, 2, 5], &[1, 4, 5],
        ]);
        assert_eq!( betti_numbers(&tree), vec![1, 1, 0] );
        assert_eq!( euler_characteristic(&tree), 0 );
    }

    #[test]
    fn test_reduced_betti_numbers_subtract_one_from_beta_0() {
        let tree = tree_from(&[&[0, 1, 2, 3]]);
        assert_eq!( reduced_betti_numbers(&tree), vec![0, 0, 0, 0] );
    }
}
