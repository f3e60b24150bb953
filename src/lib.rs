//! A simplex tree (a trie over sorted vertex labels, cross-linked for
//! sub-quadratic coface search) and a Z/2 boundary-matrix reduction engine,
//! together computing the Betti numbers and Euler characteristic of an
//! abstract simplicial complex.
//!
//! # Start here
//!
//! [`SimplexTree`](simplex_tree::SimplexTree) is the combinatorial index:
//! `insert_closed`/`insert_one` build a complex, `remove` tears one down,
//! `search`/`facets`/`cofaces`/`k_simplices` query it, and
//! `elementary_collapse` removes a free pair. The
//! [`homology`] module turns a tree into Betti numbers:
//!
//! ```
//! use simplicial_complex::simplex_tree::SimplexTree;
//! use simplicial_complex::homology;
//!
//! // A solid tetrahedron: insert_closed pulls in every face automatically.
//! let mut tree: SimplexTree<usize> = SimplexTree::new();
//! tree.insert_closed(&[0, 1, 2, 3]).unwrap();
//! assert_eq!( homology::betti_numbers(&tree), vec![1, 0, 0, 0] );
//!
//! // Remove the solid tetrahedron itself, leaving its boundary: a 2-sphere.
//! tree.remove(&[0, 1, 2, 3]).unwrap();
//! assert_eq!( homology::betti_numbers(&tree), vec![1, 0, 1] );
//! assert_eq!( homology::euler_characteristic(&tree), 2 );
//! ```
//!
//! Underneath, [`boundary_store::BoundaryStore`] translates a tree's
//! `k_simplices` layers into sparse `{0,1}` boundary matrices, and
//! [`reducer`] brings each one to Smith normal form over Z/2 so that ranks
//! (and, from those, Betti numbers) can be read off directly. Vertex labels
//! only need to satisfy [`vertex_label::VertexLabel`]; integers, strings,
//! and integer pairs all qualify out of the box.
//!
//! Every fallible operation returns a [`Result`](errors::Result) whose
//! error variants are listed in [`errors::SimplicialError`] -- there is no
//! panicking path for a caller-facing contract violation.

pub mod errors;
pub mod vertex_label;
pub mod simplex_tree;
pub mod boundary_store;
pub mod reducer;
pub mod homology;
pub mod rings;
pub mod utilities;
