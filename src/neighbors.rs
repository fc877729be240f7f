//! Same-level (and, in element modes, retaining-ancestor) adjacency lists,
//! with minimum-image periodic wraparound.
//!
//! There is no direct analogue for this in the teacher crate — a Barnes-Hut
//! tree only ever walks parent-to-child, never sideways. The construction
//! here is the classic parent-neighbor expansion used by hierarchical
//! N-body/FMM codes: a node's same-level neighbors are found among the
//! children of its parent's own neighbors (plus the parent itself), descended
//! only as far as the querying node's own level.

use crate::builder::Tree;
use crate::child_index::ChildData;
use crate::geometry;
use crate::reconstruct::GeometryData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `nborp[k]..nborp[k + 1]` indexes into `nbori`, giving node `k`'s neighbors.
#[derive(Clone, Debug)]
pub struct NeighborData {
    pub nborp: Vec<u32>,
    pub nbori: Vec<u32>,
}

impl NeighborData {
    /// Neighbors of node `k`.
    pub fn of(&self, k: usize) -> &[u32] {
        &self.nbori[self.nborp[k] as usize..self.nborp[k + 1] as usize]
    }
}

/// Builds [`NeighborData`] under periodicity bitmask `per` (bit `j` set means
/// axis `j` wraps around over the root extent).
///
/// Levels are filled top-down since a node's candidates come only from its
/// (already-resolved) parent's own list; within a level, nodes are
/// independent of one another and are computed concurrently under the
/// `parallel` feature.
pub fn build_neighbor_data(tree: &Tree, geo: &GeometryData, child: &ChildData, per: u32) -> NeighborData {
    let d = tree.dimension();
    let periods: Vec<Option<f64>> = (0..d)
        .map(|j| {
            if per & (1 << j) != 0 {
                Some(tree.root_extent()[j])
            } else {
                None
            }
        })
        .collect();

    let node_count = tree.node_count();
    let levels = tree.levels().to_vec();
    let mut lists: Vec<Vec<u32>> = vec![Vec::new(); node_count];

    // A root that tiles a periodic domain wraps onto itself along that axis,
    // so it is its own (sole) neighbor: no level-1 expansion ever reaches
    // node 0, so this has to be seeded explicitly.
    if (0..d).any(|j| periods[j].is_some() && tree.root_extent()[j] > 0.0) {
        lists[0] = vec![0];
    }

    for l in 1..=tree.depth() {
        let lo = levels[l] as usize;
        let hi = levels[l + 1] as usize;

        #[cfg(feature = "parallel")]
        let computed: Vec<Vec<u32>> = (lo..hi)
            .into_par_iter()
            .map(|k| node_neighbors(k, l, tree, geo, child, &lists, &periods))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let computed: Vec<Vec<u32>> = (lo..hi).map(|k| node_neighbors(k, l, tree, geo, child, &lists, &periods)).collect();

        for (i, v) in computed.into_iter().enumerate() {
            lists[lo + i] = v;
        }
    }

    let mut nborp = vec![0u32; node_count + 1];
    for k in 0..node_count {
        nborp[k + 1] = nborp[k] + lists[k].len() as u32;
    }
    let mut nbori = Vec::with_capacity(nborp[node_count] as usize);
    for l in &lists {
        nbori.extend_from_slice(l);
    }

    NeighborData { nborp, nbori }
}

fn node_neighbors(
    k: usize,
    level: usize,
    tree: &Tree,
    geo: &GeometryData,
    child: &ChildData,
    lists: &[Vec<u32>],
    periods: &[Option<f64>],
) -> Vec<u32> {
    let p = tree.parent_of(k);
    let mut candidates = vec![p];
    candidates.extend(lists[p].iter().copied().map(|c| c as usize));

    let mut out = Vec::new();
    for c in candidates {
        collect_same_level(c, k, level, tree, geo, child, periods, &mut out);
    }

    if tree.mode().retains() {
        let mut a = p;
        loop {
            if tree.held_count(a) > 0 {
                out.push(a as u32);
            }
            if a == 0 {
                break;
            }
            a = tree.parent_of(a);
        }
    }

    out.sort_unstable();
    out.dedup();
    out.retain(|&c| c as usize != k);
    out
}

fn collect_same_level(
    c: usize,
    k: usize,
    level: usize,
    tree: &Tree,
    geo: &GeometryData,
    child: &ChildData,
    periods: &[Option<f64>],
    out: &mut Vec<u32>,
) {
    if !geometry::cells_adjacent(geo.center(c), geo.extent(c), geo.center(k), geo.extent(k), periods) {
        return;
    }
    if tree.node_level(c) == level || (tree.mode().retains() && tree.is_leaf(c)) {
        out.push(c as u32);
        return;
    }
    for i in child.chldp[c] as usize..child.chldp[c + 1] as usize {
        collect_same_level(child.chld[i] as usize, k, level, tree, geo, child, periods, out);
    }
}
