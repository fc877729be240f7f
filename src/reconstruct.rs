//! Top-down reconstruction of per-node center/extent from the root geometry
//! and each node's octant-mask chain.
//!
//! This is deliberately a separate pass from [`crate::builder::build_tree`]:
//! the builder only needs a node's geometry transiently, to decide how to
//! partition that node's objects, and does not retain it. Anything that needs
//! geometry later (the neighbor finder, search) asks for it through
//! [`crate::Tree::geometry_data`], which materializes it once here.

use crate::builder::Tree;
use crate::geometry;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-node center and extent, flattened `node_count * d` row-major.
#[derive(Clone, Debug)]
pub struct GeometryData {
    d: usize,
    pub ctr: Vec<f64>,
    pub ext: Vec<f64>,
}

impl GeometryData {
    /// Center of node `k`.
    pub fn center(&self, k: usize) -> &[f64] {
        &self.ctr[k * self.d..(k + 1) * self.d]
    }

    /// Extent (full side length per axis) of node `k`.
    pub fn extent(&self, k: usize) -> &[f64] {
        &self.ext[k * self.d..(k + 1) * self.d]
    }
}

/// Reconstructs center/extent for every node of `tree`, level by level.
///
/// A level's geometry depends only on the previous (already-computed) level,
/// so each level is filled independently; under the `parallel` feature, the
/// nodes within a level are computed concurrently.
pub fn build_geometry_data(tree: &Tree) -> GeometryData {
    let d = tree.dimension();
    let node_count = tree.node_count();
    let mut ctr = vec![0.0; node_count * d];
    let mut ext = vec![0.0; node_count * d];

    ctr[0..d].copy_from_slice(tree.root_center());
    ext[0..d].copy_from_slice(tree.root_extent());

    let levels = tree.levels().to_vec();
    for l in 0..tree.depth() {
        let (child_lo, child_hi) = (levels[l + 1] as usize, levels[l + 2] as usize);

        let (done, pending) = ctr.split_at_mut(child_lo * d);
        let (done_ext, pending_ext) = ext.split_at_mut(child_lo * d);

        let fill = |k: usize, out_ctr: &mut [f64], out_ext: &mut [f64]| {
            let p = tree.parent_of(k);
            let mask = tree.octant_mask(k);
            let p_ctr = &done[p * d..(p + 1) * d];
            let p_ext = &done_ext[p * d..(p + 1) * d];
            geometry::child_center(p_ctr, p_ext, mask, out_ctr);
            for j in 0..d {
                out_ext[j] = p_ext[j] / 2.0;
            }
        };

        #[cfg(feature = "parallel")]
        {
            pending[..(child_hi - child_lo) * d]
                .par_chunks_mut(d)
                .zip(pending_ext[..(child_hi - child_lo) * d].par_chunks_mut(d))
                .enumerate()
                .for_each(|(i, (out_ctr, out_ext))| fill(child_lo + i, out_ctr, out_ext));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (i, (out_ctr, out_ext)) in pending[..(child_hi - child_lo) * d]
                .chunks_mut(d)
                .zip(pending_ext[..(child_hi - child_lo) * d].chunks_mut(d))
                .enumerate()
            {
                fill(child_lo + i, out_ctr, out_ext);
            }
        }
    }

    GeometryData { d, ctr, ext }
}
