//! Point-location search: descend from the root toward the cell that fully
//! contains a query under its radius, recording the path taken.
//!
//! This mirrors the way the teacher's Barnes-Hut evaluator walks down a tree
//! testing one condition per level and stopping at the first node with no
//! matching child (there: `theta < width / mag` against `Node::Internal`;
//! here: whether any child cell contains the query under its radius).

use crate::builder::Tree;
use crate::child_index::ChildData;
use crate::geometry;
use crate::reconstruct::GeometryData;

/// For each of `m` query points (`queries` flattened `m * d`, radii `siz_q`),
/// the path of node indices from the root to the deepest node whose cell
/// fully contains it, capped at `mlvl` levels (negative means unbounded).
///
/// Each path has exactly `tree.depth() + 1` entries. Once no child fully
/// contains the query, or the level cap is reached, every remaining entry in
/// that row is `0` — a sentinel that can never collide with a real node at
/// that level, since only the root ever sits at level 0.
pub fn search(tree: &Tree, geo: &GeometryData, child: &ChildData, queries: &[f64], siz_q: &[f64], mlvl: i64) -> Vec<u32> {
    let d = tree.dimension();
    let depth = tree.depth();
    let stride = depth + 1;
    let cap = if mlvl < 0 { depth } else { (mlvl as usize).min(depth) };
    let m = queries.len() / d;
    let mut trav = vec![0u32; m * stride];

    for qi in 0..m {
        let q = &queries[qi * d..(qi + 1) * d];
        let radius = siz_q[qi];
        let row = &mut trav[qi * stride..(qi + 1) * stride];
        let mut current = 0usize;
        row[0] = 0;

        for lvl in 1..=cap {
            let children = child.chldp[current] as usize..child.chldp[current + 1] as usize;
            let next = children
                .clone()
                .map(|ci| child.chld[ci] as usize)
                .find(|&c| geometry::contains(geo.center(c), geo.extent(c), q, radius));

            match next {
                Some(c) => {
                    current = c;
                    row[lvl] = current as u32;
                }
                None => break,
            }
        }
    }

    trav
}
