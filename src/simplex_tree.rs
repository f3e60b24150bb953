//! The simplex tree: a trie over sorted vertex labels with cross-links for
//! sub-quadratic coface search.
//!
//! Nodes live in an arena (`Vec<Option<Node<L>>>`) and are addressed by a
//! stable [`NodeId`] handle rather than a native reference, since nothing
//! here can lean on a garbage collector to keep cross-links (`parent`,
//! `next_sibling_link`) valid across removals. A freed slot is recorded on
//! a free list and reused by the next insertion.

use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;
use serde::Serialize;

use crate::errors::{Result, SimplicialError};
use crate::vertex_label::VertexLabel;

//  ---------------------------------------------------------------------------
//  NODE ID
//  ---------------------------------------------------------------------------

/// A stable handle into a [`SimplexTree`]'s arena. Not meaningful across
/// different trees, and invalidated for a node once it is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

//  ---------------------------------------------------------------------------
//  NODE
//  ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Node<L: VertexLabel> {
    /// Unset only for the root, which represents the empty simplex.
    label: Option<L>,
    /// Unset only for the root.
    parent: Option<NodeId>,
    /// Owning: children are destroyed when their parent is removed.
    children: BTreeMap<L, NodeId>,
    /// `depth(node) == |simplex(node)|`; the root has depth 0.
    depth: usize,
    /// Non-owning. Chains this node into the circular list of every other
    /// node sharing its `(depth, label)`. A singleton class links to
    /// itself. Unset only for the root, which belongs to no class.
    next_sibling_link: Option<NodeId>,
}

//  ---------------------------------------------------------------------------
//  THE TREE
//  ---------------------------------------------------------------------------

/// A simplex tree: the combinatorial index of an abstract simplicial
/// complex, supporting insertion, removal, search, facet/coface location,
/// per-dimension enumeration, and elementary collapse.
#[derive(Clone, Debug)]
pub struct SimplexTree<L: VertexLabel> {
    arena: Vec<Option<Node<L>>>,
    free_list: Vec<usize>,
    root: NodeId,
    /// `None` iff the complex is empty (no simplices beyond the empty one).
    dimension: Option<usize>,
    /// Head of the circular list for each `(depth, label)` pair, depth >= 1.
    sibling_class_heads: HashMap<(usize, L), NodeId>,
}

impl<L: VertexLabel> Default for SimplexTree<L> {
    fn default() -> Self { Self::new() }
}

impl<L: VertexLabel> SimplexTree<L> {

    /// An empty complex: just the root, representing the empty simplex.
    pub fn new() -> Self {
        let root = Node { label: None, parent: None, children: BTreeMap::new(), depth: 0, next_sibling_link: None };
        SimplexTree {
            arena: vec![Some(root)],
            free_list: Vec::new(),
            root: NodeId(0),
            dimension: None,
            sibling_class_heads: HashMap::new(),
        }
    }

    /// Highest `p` for which a `p`-simplex is present, or `None` if the
    /// complex is empty.
    pub fn dimension(&self) -> Option<usize> { self.dimension }

    //  -----------------------------------------------------------------
    //  ARENA PLUMBING
    //  -----------------------------------------------------------------

    fn node(&self, id: NodeId) -> &Node<L> {
        self.arena[id.0].as_ref().expect("NodeId refers to a freed slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<L> {
        self.arena[id.0].as_mut().expect("NodeId refers to a freed slot")
    }

    fn alloc_node(&mut self, node: Node<L>) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            self.arena[idx] = Some(node);
            NodeId(idx)
        } else {
            self.arena.push(Some(node));
            NodeId(self.arena.len() - 1)
        }
    }

    fn free_node(&mut self, id: NodeId) {
        self.arena[id.0] = None;
        self.free_list.push(id.0);
    }

    //  -----------------------------------------------------------------
    //  CANONICALIZATION AND LOOKUP
    //  -----------------------------------------------------------------

    fn canonicalize(simplex: &[L]) -> Vec<L> {
        let mut v: Vec<L> = simplex.to_vec();
        v.sort();
        v.dedup();
        v
    }

    /// Walk from the root along `simplex`'s labels; `Some(root)` for the
    /// empty slice.
    fn locate(&self, simplex: &[L]) -> Option<NodeId> {
        let mut cur = self.root;
        for label in simplex {
            cur = *self.node(cur).children.get(label)?;
        }
        Some(cur)
    }

    /// `true` iff `simplex` (in any vertex order, with or without
    /// duplicates) is a member of the complex.
    pub fn search(&self, simplex: &[L]) -> bool {
        self.locate(&Self::canonicalize(simplex)).is_some()
    }

    fn path_labels(&self, id: NodeId) -> Vec<L> {
        let mut labels = Vec::new();
        let mut cur = Some(id);
        while let Some(cid) = cur {
            let n = self.node(cid);
            if let Some(l) = &n.label { labels.push(l.clone()); }
            cur = n.parent;
        }
        labels.reverse();
        labels
    }

    //  -----------------------------------------------------------------
    //  SIBLING CIRCULAR LISTS
    //  -----------------------------------------------------------------

    fn splice_into_class(&mut self, depth: usize, label: L, id: NodeId) {
        match self.sibling_class_heads.get(&(depth, label.clone())) {
            Some(&head) => {
                let head_next = self.node(head).next_sibling_link.expect("class head always has a successor");
                self.node_mut(id).next_sibling_link = Some(head_next);
                self.node_mut(head).next_sibling_link = Some(id);
            }
            None => {
                self.node_mut(id).next_sibling_link = Some(id);
                self.sibling_class_heads.insert((depth, label), id);
            }
        }
    }

    /// Walks the cycle to find `id`'s predecessor, since nodes only carry a
    /// `next` pointer. `O(class size)` rather than `O(1)`; see DESIGN.md for
    /// why that tradeoff was made over a doubly-linked list.
    fn unsplice_from_class(&mut self, depth: usize, label: &L, id: NodeId) {
        let next = self.node(id).next_sibling_link.expect("removed node was in a class");
        if next == id {
            self.sibling_class_heads.remove(&(depth, label.clone()));
            return;
        }
        let mut pred = next;
        while self.node(pred).next_sibling_link.expect("class is circular") != id {
            pred = self.node(pred).next_sibling_link.expect("class is circular");
        }
        self.node_mut(pred).next_sibling_link = Some(next);
        if self.sibling_class_heads.get(&(depth, label.clone())) == Some(&id) {
            self.sibling_class_heads.insert((depth, label.clone()), next);
        }
    }

    //  -----------------------------------------------------------------
    //  INSERTION
    //  -----------------------------------------------------------------

    /// Insert `simplex` alone. Requires its immediate parent simplex
    /// (`simplex` minus its largest vertex) to already be present;
    /// [`SimplicialError::MissingFace`] otherwise. A no-op if `simplex` is
    /// already in the complex.
    pub fn insert_one(&mut self, simplex: &[L]) -> Result<()> {
        let canon = Self::canonicalize(simplex);
        if canon.is_empty() { return Ok(()); }
        if self.locate(&canon).is_some() { return Ok(()); }

        let label = canon[canon.len() - 1].clone();
        let parent_id = self.locate(&canon[..canon.len() - 1]).ok_or(SimplicialError::MissingFace)?;
        let depth = self.node(parent_id).depth + 1;

        let new_id = self.alloc_node(Node {
            label: Some(label.clone()),
            parent: Some(parent_id),
            children: BTreeMap::new(),
            depth,
            next_sibling_link: None,
        });
        self.node_mut(parent_id).children.insert(label.clone(), new_id);
        self.splice_into_class(depth, label, new_id);

        let new_dim = canon.len() - 1;
        self.dimension = Some(self.dimension.map_or(new_dim, |d| d.max(new_dim)));
        Ok(())
    }

    /// Insert `simplex` and every missing face, smallest first, so that
    /// each call to [`insert_one`](Self::insert_one) finds its immediate
    /// parent already present. Idempotent.
    pub fn insert_closed(&mut self, simplex: &[L]) -> Result<()> {
        let canon = Self::canonicalize(simplex);
        if canon.is_empty() { return Ok(()); }
        for k in 1..=canon.len() {
            for combo in canon.iter().cloned().combinations(k) {
                self.insert_one(&combo)?;
            }
        }
        Ok(())
    }

    //  -----------------------------------------------------------------
    //  ENUMERATION
    //  -----------------------------------------------------------------

    /// The `k`-simplices (nodes at depth `k+1`), in lexicographic trie
    /// order.
    pub fn k_simplices(&self, k: usize) -> Vec<Vec<L>> {
        let mut out = Vec::new();
        self.collect_at_depth(self.root, k + 1, &mut out);
        out
    }

    fn collect_at_depth(&self, id: NodeId, target_depth: usize, out: &mut Vec<Vec<L>>) {
        let n = self.node(id);
        if n.depth == target_depth {
            out.push(self.path_labels(id));
            return;
        }
        for &child in n.children.values() {
            self.collect_at_depth(child, target_depth, out);
        }
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.node(id).children.values() {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    fn sort_by_dimension_then_lex(simplices: &mut Vec<Vec<L>>) {
        simplices.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    }

    //  -----------------------------------------------------------------
    //  FACETS
    //  -----------------------------------------------------------------

    /// The `|σ|` codimension-1 faces of `simplex`, in ascending
    /// lexicographic order. Located by ascent-and-resuffix: the facet
    /// obtained by deleting the largest vertex is just `simplex`'s parent
    /// node; every other facet is found by re-searching the vertex suffix
    /// past the deletion point, starting from the ancestor at that depth.
    pub fn facets(&self, simplex: &[L]) -> Result<Vec<Vec<L>>> {
        let canon = Self::canonicalize(simplex);
        let node = self.locate(&canon).ok_or(SimplicialError::NotPresent)?;
        let k = canon.len();
        if k == 0 { return Ok(Vec::new()); }

        // ancestors[i] is the node representing canon's length-i prefix.
        let mut ancestors = vec![node];
        let mut cur = node;
        for _ in 0..k {
            cur = self.node(cur).parent.expect("non-root node always has a parent");
            ancestors.push(cur);
        }
        ancestors.reverse();

        let mut out = Vec::with_capacity(k);
        for deleted in (0..k).rev() {
            let mut facet = Vec::with_capacity(k - 1);
            facet.extend_from_slice(&canon[..deleted]);
            facet.extend_from_slice(&canon[deleted + 1..]);

            // Re-search the suffix past the deletion point; a no-op walk
            // when `deleted == k - 1`, since the facet node is then just
            // `ancestors[deleted]` itself.
            let mut probe = ancestors[deleted];
            for label in &canon[deleted + 1..] {
                probe = *self.node(probe).children.get(label)
                    .expect("down-closure guarantees every facet of a present simplex is present");
            }
            let _ = probe;

            out.push(facet);
        }
        Ok(out)
    }

    //  -----------------------------------------------------------------
    //  COFACES
    //  -----------------------------------------------------------------

    /// Nodes at depth `>= |simplex| + 1` sharing `simplex`'s largest label
    /// whose ancestor path contains every label of `simplex` (in order);
    /// each is the root of a subtree of external cofaces.
    fn external_coface_roots(&self, canon: &[L]) -> Vec<NodeId> {
        let s = canon.len();
        let l_max = canon[s - 1].clone();
        let max_depth = match self.dimension {
            Some(d) => d + 1,
            None => return Vec::new(),
        };

        let mut roots = Vec::new();
        for depth in (s + 1)..=max_depth {
            if let Some(&head) = self.sibling_class_heads.get(&(depth, l_max.clone())) {
                let mut cur = head;
                loop {
                    if self.ancestor_path_contains(cur, canon) {
                        roots.push(cur);
                    }
                    let next = self.node(cur).next_sibling_link.expect("sibling class is circular");
                    if next == head { break; }
                    cur = next;
                }
            }
        }
        roots
    }

    fn ancestor_path_contains(&self, candidate: NodeId, canon: &[L]) -> bool {
        let mut cur = Some(candidate);
        let mut i = canon.len();
        // Walk from candidate up to the root, matching canon's labels from
        // the end backward (ancestor labels arrive in descending order).
        while let Some(id) = cur {
            let n = self.node(id);
            if let Some(label) = &n.label {
                if i > 0 && canon[i - 1] == *label { i -= 1; }
            }
            cur = n.parent;
        }
        i == 0
    }

    /// Every strict coface of `simplex`: internal cofaces (descendants of
    /// its own node) plus external cofaces (found via the per-(depth,
    /// label) circular lists), deduplicated.
    pub fn cofaces(&self, simplex: &[L]) -> Result<Vec<Vec<L>>> {
        let canon = Self::canonicalize(simplex);
        let node = self.locate(&canon).ok_or(SimplicialError::NotPresent)?;

        let mut ids = self.descendants(node);
        for root in self.external_coface_roots(&canon) {
            ids.push(root);
            ids.extend(self.descendants(root));
        }

        let mut seen = HashSet::new();
        ids.retain(|id| seen.insert(*id));

        let mut out: Vec<Vec<L>> = ids.iter().map(|&id| self.path_labels(id)).collect();
        Self::sort_by_dimension_then_lex(&mut out);
        Ok(out)
    }

    //  -----------------------------------------------------------------
    //  REMOVAL
    //  -----------------------------------------------------------------

    /// Remove `simplex` and every one of its cofaces.
    /// [`SimplicialError::EmptySimplex`] for an empty argument;
    /// [`SimplicialError::NotPresent`] if `simplex` is absent.
    pub fn remove(&mut self, simplex: &[L]) -> Result<()> {
        let canon = Self::canonicalize(simplex);
        if canon.is_empty() { return Err(SimplicialError::EmptySimplex); }
        let node = self.locate(&canon).ok_or(SimplicialError::NotPresent)?;

        let mut doomed = vec![node];
        doomed.extend(self.descendants(node));
        for root in self.external_coface_roots(&canon) {
            doomed.push(root);
            doomed.extend(self.descendants(root));
        }
        let mut seen = HashSet::new();
        doomed.retain(|id| seen.insert(*id));

        for id in doomed {
            let (depth, label, parent) = {
                let n = self.node(id);
                (
                    n.depth,
                    n.label.clone().expect("only the root has no label, and the root is never removed"),
                    n.parent.expect("only the root has no parent, and the root is never removed"),
                )
            };
            self.node_mut(parent).children.remove(&label);
            self.unsplice_from_class(depth, &label, id);
            self.free_node(id);
        }

        self.recompute_dimension();
        Ok(())
    }

    /// Removal can only shrink the complex, so the new dimension is found
    /// by scanning the tree rather than tracked incrementally downward.
    fn recompute_dimension(&mut self) {
        let max_depth = self.arena.iter()
            .filter_map(|slot| slot.as_ref())
            .map(|n| n.depth)
            .filter(|&d| d > 0)
            .max();
        self.dimension = max_depth.map(|d| d - 1);
    }

    //  -----------------------------------------------------------------
    //  ELEMENTARY COLLAPSE
    //  -----------------------------------------------------------------

    /// Remove a free pair: a facet `τ` of `simplex` whose only strict
    /// coface is `simplex` itself, together with `simplex`. Returns `τ`.
    /// [`SimplicialError::NotCollapsible`] if no such facet exists.
    pub fn elementary_collapse(&mut self, simplex: &[L]) -> Result<Vec<L>> {
        let canon = Self::canonicalize(simplex);
        for facet in self.facets(&canon)? {
            let cofaces_of_facet = self.cofaces(&facet)?;
            if cofaces_of_facet.len() == 1 && cofaces_of_facet[0] == canon {
                self.remove(&facet)?;
                return Ok(facet);
            }
        }
        Err(SimplicialError::NotCollapsible)
    }

    //  -----------------------------------------------------------------
    //  GOLDEN-FILE SNAPSHOT
    //  -----------------------------------------------------------------

    /// A deterministic, dimension-by-dimension snapshot of every simplex
    /// currently in the complex, with vertex labels flattened through
    /// [`VertexLabel::to_stable_key`]. Used to pin traversal order in
    /// tests without depending on `L`'s own `Serialize` impl.
    pub fn snapshot(&self) -> TreeSnapshot {
        let mut simplices_by_dimension = Vec::new();
        if let Some(d) = self.dimension {
            for k in 0..=d {
                let layer = self.k_simplices(k).into_iter()
                    .map(|s| s.iter().map(VertexLabel::to_stable_key).collect())
                    .collect();
                simplices_by_dimension.push(layer);
            }
        }
        TreeSnapshot { simplices_by_dimension }
    }

    /// [`Self::snapshot`] rendered as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}

/// A golden-file-style dump of a [`SimplexTree`]'s contents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeSnapshot {
    pub simplices_by_dimension: Vec<Vec<Vec<String>>>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_one_requires_parent() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        assert_eq!( tree.insert_one(&[0, 1]), Err(SimplicialError::MissingFace) );
        tree.insert_one(&[0]).unwrap();
        tree.insert_one(&[1]).unwrap();
        tree.insert_one(&[0, 1]).unwrap();
        assert!( tree.search(&[0, 1]) );
    }

    #[test]
    fn test_insert_closed_down_closure() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[2, 0, 1]).unwrap();
        for face in [vec![0], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2], vec![0, 1, 2]] {
            assert!( tree.search(&face), "missing face {:?}", face );
        }
        assert_eq!( tree.dimension(), Some(2) );
    }

    #[test]
    fn test_insert_closed_idempotent() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        assert_eq!( tree.k_simplices(2).len(), 1 );
    }

    #[test]
    fn test_search_matches_membership() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1]).unwrap();
        assert!( tree.search(&[0]) );
        assert!( tree.search(&[1, 0]) );  // order of the input doesn't matter
        assert!( ! tree.search(&[5]) );
        assert!( ! tree.search(&[0, 5]) );
    }

    #[test]
    fn test_facets_of_a_tetrahedron() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2, 3]).unwrap();
        let facets = tree.facets(&[0, 1, 2, 3]).unwrap();
        assert_eq!( facets, vec![
            vec![0, 1, 2],
            vec![0, 1, 3],
            vec![0, 2, 3],
            vec![1, 2, 3],
        ]);
    }

    #[test]
    fn test_facets_not_present() {
        let tree: SimplexTree<usize> = SimplexTree::new();
        assert_eq!( tree.facets(&[0, 1]), Err(SimplicialError::NotPresent) );
    }

    #[test]
    fn test_cofaces_small_complex() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        tree.insert_closed(&[1, 2, 3]).unwrap();

        // vertex 1 is a face of both triangles and every edge of both
        let cofaces = tree.cofaces(&[1]).unwrap();
        assert_eq!( cofaces, vec![
            vec![0, 1], vec![1, 2], vec![1, 3],
            vec![0, 1, 2], vec![1, 2, 3],
        ]);
    }

    #[test]
    fn test_remove_deletes_closure_and_cofaces() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        tree.remove(&[0]).unwrap();

        assert!( ! tree.search(&[0]) );
        assert!( ! tree.search(&[0, 1]) );
        assert!( ! tree.search(&[0, 2]) );
        assert!( ! tree.search(&[0, 1, 2]) );
        assert!( tree.search(&[1]) );
        assert!( tree.search(&[2]) );
        assert!( tree.search(&[1, 2]) );
        assert_eq!( tree.dimension(), Some(1) );
    }

    #[test]
    fn test_remove_empty_simplex_errors() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        assert_eq!( tree.remove(&[]), Err(SimplicialError::EmptySimplex) );
    }

    #[test]
    fn test_remove_absent_simplex_errors() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_one(&[0]).unwrap();
        assert_eq!( tree.remove(&[9]), Err(SimplicialError::NotPresent) );
    }

    #[test]
    fn test_elementary_collapse() {
        // {3} is a free face: its only coface is the pendant edge {2,3}.
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        tree.insert_closed(&[2, 3]).unwrap();

        let removed_facet = tree.elementary_collapse(&[2, 3]).unwrap();
        assert_eq!( removed_facet, vec![3] );
        assert!( ! tree.search(&[3]) );
        assert!( ! tree.search(&[2, 3]) );
        assert!( tree.search(&[2]) );
    }

    #[test]
    fn test_elementary_collapse_not_collapsible() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        // edge {1,2} is shared by two triangles, so neither of its
        // vertices has {1,2} as a unique coface.
        tree.insert_closed(&[1, 2, 3]).unwrap();
        assert_eq!( tree.elementary_collapse(&[1, 2]), Err(SimplicialError::NotCollapsible) );
    }

    #[test]
    fn test_k_simplices_lexicographic_order() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1, 2]).unwrap();
        assert_eq!( tree.k_simplices(0), vec![vec![0], vec![1], vec![2]] );
        assert_eq!( tree.k_simplices(1), vec![vec![0, 1], vec![0, 2], vec![1, 2]] );
        assert_eq!( tree.k_simplices(2), vec![vec![0, 1, 2]] );
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut tree: SimplexTree<usize> = SimplexTree::new();
        tree.insert_closed(&[0, 1]).unwrap();
        let json = tree.to_json().unwrap();
        assert!( json.contains("\"0\"") );
        assert!( json.contains("\"1\"") );
    }
}
