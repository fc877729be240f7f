//! CSR child-pointer construction: for every node, the contiguous range of
//! its children's node indices.

use crate::builder::Tree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `chldp[k]..chldp[k + 1]` indexes into `chld`, giving the node indices of
/// node `k`'s children in ascending octant-mask order.
#[derive(Clone, Debug)]
pub struct ChildData {
    pub chldp: Vec<u32>,
    pub chld: Vec<u32>,
}

/// Builds [`ChildData`] from a tree's `parent` array by counting sort.
///
/// The counting pass is the only part worth parallelizing here (the scatter
/// is a single linear write of `node_count - 1` entries); under the
/// `parallel` feature it is done per level, since a level's nodes are a
/// contiguous, independent slice of `parent`.
pub fn build_child_data(tree: &Tree) -> ChildData {
    let node_count = tree.node_count();
    let parent = &tree.parent;

    let counts = count_children(node_count, parent, tree.levels());

    let mut chldp = vec![0u32; node_count + 1];
    for k in 0..node_count {
        chldp[k + 1] = chldp[k] + counts[k];
    }

    let mut cursor = chldp.clone();
    let mut chld = vec![0u32; chldp[node_count] as usize];
    for (k, &p) in parent.iter().enumerate().skip(1) {
        let p = p as usize;
        chld[cursor[p] as usize] = k as u32;
        cursor[p] += 1;
    }

    ChildData { chldp, chld }
}

#[cfg(not(feature = "parallel"))]
fn count_children(node_count: usize, parent: &[u32], _levels: &[u32]) -> Vec<u32> {
    let mut counts = vec![0u32; node_count];
    for &p in &parent[1..] {
        counts[p as usize] += 1;
    }
    counts
}

#[cfg(feature = "parallel")]
fn count_children(node_count: usize, parent: &[u32], levels: &[u32]) -> Vec<u32> {
    let depth = levels.len().saturating_sub(2);
    let per_level: Vec<Vec<u32>> = (0..depth)
        .into_par_iter()
        .map(|l| {
            let mut counts = vec![0u32; node_count];
            let start = levels[l + 1] as usize;
            let end = levels[l + 2] as usize;
            for &p in &parent[start..end] {
                counts[p as usize] += 1;
            }
            counts
        })
        .collect();

    let mut counts = vec![0u32; node_count];
    for level_counts in per_level {
        for (c, lc) in counts.iter_mut().zip(level_counts) {
            *c += lc;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use crate::mode::{Adaptivity, Mode};

    #[test]
    fn child_ranges_cover_every_internal_node() {
        let x = [0.1, 0.2, 0.8, 0.9];
        let tree = build_tree(&x, 1, 4, Mode::Point, &[0.0; 4], 1, -1, &[0.0], Adaptivity::Adaptive).unwrap();
        let data = build_child_data(&tree);
        assert_eq!(data.chldp.len(), tree.node_count() + 1);
        for k in 0..tree.node_count() {
            let children = &data.chld[data.chldp[k] as usize..data.chldp[k + 1] as usize];
            assert_eq!(tree.is_leaf(k), children.is_empty());
            for &c in children {
                assert_eq!(tree.parent_of(c as usize), k);
            }
        }
    }

    #[test]
    fn children_enumerate_in_ascending_octant_mask_order() {
        let x = [
            0.1, 0.1, 0.9, 0.1, 0.1, 0.9, 0.9, 0.9,
        ];
        let tree = build_tree(&x, 2, 4, Mode::Point, &[0.0; 4], 1, -1, &[0.0, 0.0], Adaptivity::Adaptive).unwrap();
        let data = build_child_data(&tree);
        let children = &data.chld[data.chldp[0] as usize..data.chldp[1] as usize];
        let masks: Vec<u32> = children.iter().map(|&c| tree.octant_mask(c as usize)).collect();
        let mut sorted = masks.clone();
        sorted.sort_unstable();
        assert_eq!(masks, sorted);
    }
}
