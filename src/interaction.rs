//! Interaction lists: for each node, the cells that are "well separated" from
//! it — children of the parent's neighbors that are not themselves neighbors
//! of this node.
//!
//! This is the classic far-field list used by hierarchical multipole methods:
//! a pair of cells on this list are close enough to their common parent scale
//! to share a multipole interaction, but far enough from each other that a
//! direct (near-field) computation is unnecessary. Construction is a small,
//! sequential filter over already-built neighbor lists, grounded on the same
//! CSR-by-counting-sort idiom as [`crate::child_index`].

use crate::builder::Tree;
use crate::child_index::ChildData;
use crate::neighbors::NeighborData;

/// `ilstp[k]..ilstp[k + 1]` indexes into `ilsti`, giving node `k`'s
/// interaction list.
#[derive(Clone, Debug)]
pub struct InteractionData {
    pub ilstp: Vec<u32>,
    pub ilsti: Vec<u32>,
}

impl InteractionData {
    /// Interaction list of node `k`.
    pub fn of(&self, k: usize) -> &[u32] {
        &self.ilsti[self.ilstp[k] as usize..self.ilstp[k + 1] as usize]
    }
}

/// Builds [`InteractionData`] from already-materialized child and neighbor
/// structures.
pub fn build_interaction_data(tree: &Tree, child: &ChildData, nbor: &NeighborData) -> InteractionData {
    let node_count = tree.node_count();
    let mut lists: Vec<Vec<u32>> = vec![Vec::new(); node_count];

    for k in 1..node_count {
        let p = tree.parent_of(k);
        let p_level = tree.node_level(p);
        let own_neighbors = nbor.of(k);
        let mut out = Vec::new();
        for &n in nbor.of(p) {
            let n_idx = n as usize;
            for ci in child.chldp[n_idx] as usize..child.chldp[n_idx + 1] as usize {
                let c = child.chld[ci];
                if c as usize != k && !own_neighbors.contains(&c) {
                    out.push(c);
                }
            }
            // A coarser retained ancestor has no children to offer; it is
            // itself the far-field cell holding whatever it retained.
            if tree.mode().retains() && tree.node_level(n_idx) < p_level && !own_neighbors.contains(&n) {
                out.push(n);
            }
        }
        out.sort_unstable();
        out.dedup();
        lists[k] = out;
    }

    let mut ilstp = vec![0u32; node_count + 1];
    for k in 0..node_count {
        ilstp[k + 1] = ilstp[k] + lists[k].len() as u32;
    }
    let mut ilsti = Vec::with_capacity(ilstp[node_count] as usize);
    for l in &lists {
        ilsti.extend_from_slice(l);
    }

    InteractionData { ilstp, ilsti }
}
