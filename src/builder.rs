//! Breadth-first construction of the base tree representation.

use crate::child_index::ChildData;
use crate::error::BuildError;
use crate::geometry::{self, BoundingBox};
use crate::interaction::InteractionData;
use crate::mode::{Adaptivity, Mode};
use crate::neighbors::NeighborData;
use crate::partition::partition_by_octant;
use crate::reconstruct::GeometryData;

const BOUNDARY_MARGIN: f64 = 1e-9;

/// An adaptive axis-aligned tree over `n` objects in `d` dimensions.
///
/// Holds the base breadth-first representation (`parent`, `xi`, `xi_off`,
/// `xi_len`, `octant_mask`, `lvlx`) produced by [`build_tree`], plus whichever
/// derived structures have been materialized so far by the orchestration
/// methods in the crate root.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(crate) d: usize,
    pub(crate) n: usize,
    pub(crate) mode: Mode,
    pub(crate) x: Vec<f64>,
    pub(crate) siz: Vec<f64>,
    pub(crate) root_center: Vec<f64>,
    pub(crate) root_extent: Vec<f64>,
    pub(crate) parent: Vec<u32>,
    pub(crate) xi: Vec<u32>,
    pub(crate) xi_off: Vec<u32>,
    pub(crate) xi_len: Vec<u32>,
    pub(crate) octant_mask: Vec<u32>,
    pub(crate) lvlx: Vec<u32>,
    pub(crate) child: Option<ChildData>,
    pub(crate) geometry: Option<GeometryData>,
    pub(crate) neighbor: Option<(u32, NeighborData)>,
    pub(crate) interaction: Option<InteractionData>,
}

impl Tree {
    /// Number of spatial dimensions.
    pub fn dimension(&self) -> usize {
        self.d
    }

    /// Number of objects the tree was built over.
    pub fn object_count(&self) -> usize {
        self.n
    }

    /// The object-inclusion mode the tree was built with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.parent.len()
    }

    /// Greatest level index reached by any node (root is level 0).
    pub fn depth(&self) -> usize {
        self.lvlx.len() - 2
    }

    /// Node index ranges bounding each level: level `l`'s nodes are
    /// `levels()[l]..levels()[l + 1]`.
    pub fn levels(&self) -> &[u32] {
        &self.lvlx
    }

    /// Parent of node `k` (the root is its own parent by convention).
    pub fn parent_of(&self, k: usize) -> usize {
        self.parent[k] as usize
    }

    /// Octant mask node `k` occupies within its parent (`0` for the root).
    pub fn octant_mask(&self, k: usize) -> u32 {
        self.octant_mask[k]
    }

    /// Whether node `k` is a leaf (no node lists it as parent).
    ///
    /// Children are always created after their parent in BFS order, so it is
    /// enough to scan `parent[k + 1..]`; this also sidesteps the root's
    /// self-referential `parent[0] == 0`.
    pub fn is_leaf(&self, k: usize) -> bool {
        self.child_count(k) == 0
    }

    fn child_count(&self, k: usize) -> usize {
        if let Some(child) = &self.child {
            (child.chldp[k + 1] - child.chldp[k]) as usize
        } else {
            self.parent[k + 1..].iter().filter(|&&p| p as usize == k).count()
        }
    }

    /// The half-open range of `xi` held directly by node `k`.
    pub fn xi_range(&self, k: usize) -> &[u32] {
        let off = self.xi_off[k] as usize;
        let len = self.xi_len[k] as usize;
        &self.xi[off..off + len]
    }

    /// Coordinates of object `i`.
    pub fn coordinates(&self, i: usize) -> &[f64] {
        &self.x[i * self.d..(i + 1) * self.d]
    }

    /// Radius of object `i` (meaningless, always `0.0`, in [`Mode::Point`]).
    pub fn size(&self, i: usize) -> f64 {
        self.siz[i]
    }

    /// Root cell center.
    pub fn root_center(&self) -> &[f64] {
        &self.root_center
    }

    /// Root cell extent (full side length per axis).
    pub fn root_extent(&self) -> &[f64] {
        &self.root_extent
    }

    /// Number of objects held directly by node `k` (as opposed to by its
    /// descendants); nonzero only for retained objects in [`Mode::Element`]
    /// and [`Mode::SparseElement`].
    pub fn held_count(&self, k: usize) -> usize {
        self.xi_len[k] as usize
    }

    /// The BFS level node `k` belongs to (the root is level `0`).
    pub fn node_level(&self, k: usize) -> usize {
        match self.lvlx.binary_search(&(k as u32)) {
            Ok(l) => l,
            Err(l) => l - 1,
        }
    }
}

/// Builds a tree over `n` objects of dimension `d`.
///
/// `x` is a flattened `n * d` array of coordinates. `siz` holds one radius per
/// object; it is ignored (but still validated) when `mode` is [`Mode::Point`].
/// `occ` is the maximum occupancy a node may hold before it is a subdivision
/// candidate. `lvlmax` bounds the depth; a negative value means unbounded.
/// `ext` gives a fixed per-axis root extent where positive, or `0.0`/negative
/// to derive that axis from the data's bounding box.
#[allow(clippy::too_many_arguments)]
pub fn build_tree(
    x: &[f64],
    d: usize,
    n: usize,
    mode: Mode,
    siz: &[f64],
    occ: i64,
    lvlmax: i64,
    ext: &[f64],
    adap: Adaptivity,
) -> Result<Tree, BuildError> {
    if d < 1 || d > 32 {
        return Err(BuildError::InvalidDimension { d });
    }
    if n < 1 {
        return Err(BuildError::NoObjects);
    }
    if occ < 1 {
        return Err(BuildError::InvalidOccupancy { occ });
    }
    if x.len() != n * d {
        return Err(BuildError::SizeMismatch {
            x_len: x.len() / d.max(1),
            siz_len: n,
        });
    }
    if siz.len() != n {
        return Err(BuildError::SizeMismatch {
            x_len: n,
            siz_len: siz.len(),
        });
    }
    for (i, &s) in siz.iter().enumerate() {
        if s < 0.0 {
            return Err(BuildError::NegativeSize { index: i, value: s });
        }
    }

    let (root_center, root_extent) = root_geometry(x, d, n, mode, siz, ext)?;

    let mut xi: Vec<u32> = (0..n as u32).collect();
    let mut parent: Vec<u32> = vec![0];
    let mut xi_off: Vec<u32> = vec![0];
    let mut xi_len: Vec<u32> = vec![n as u32];
    let mut octant_mask: Vec<u32> = vec![0];
    let mut lvlx: Vec<u32> = vec![0, 1];

    let mut level_centers = vec![root_center.clone()];
    let mut level_extents = vec![root_extent.clone()];

    let num_octants = 1usize << d;
    let mut level: i64 = 0;

    loop {
        let level_start = lvlx[level as usize] as usize;
        let level_end = lvlx[level as usize + 1] as usize;
        let within_depth = lvlmax < 0 || level < lvlmax;

        let mut eligible: Vec<bool> = (level_start..level_end)
            .map(|k| {
                let has_extent = level_extents[k - level_start].iter().any(|&e| e > 0.0);
                within_depth && has_extent && xi_len[k] as i64 > occ
            })
            .collect();

        if adap == Adaptivity::Uniform && eligible.iter().any(|&e| e) {
            for (li, k) in (level_start..level_end).enumerate() {
                let has_extent = level_extents[li].iter().any(|&e| e > 0.0);
                eligible[li] = within_depth && has_extent && xi_len[k] > 0;
            }
        }

        if !eligible.iter().any(|&e| e) {
            break;
        }

        let mut next_centers = Vec::new();
        let mut next_extents = Vec::new();
        let mut created_any = false;

        for (li, k) in (level_start..level_end).enumerate() {
            if !eligible[li] {
                continue;
            }

            let center = level_centers[li].clone();
            let extent = level_extents[li].clone();
            let off = xi_off[k] as usize;
            let len = xi_len[k] as usize;

            let retained = if mode.retains() {
                partition_retained(&mut xi[off..off + len], x, siz, d, &center)
            } else {
                0
            };

            let descend_start = off + retained;
            let descend_len = len - retained;
            if descend_len == 0 {
                continue;
            }

            let blocks = {
                let descend = &mut xi[descend_start..descend_start + descend_len];
                partition_by_octant(descend, num_octants, |idx| {
                    geometry::octant_of(&center, &x[idx as usize * d..idx as usize * d + d])
                })
            };

            xi_len[k] = retained as u32;

            for (mask, local_start, local_len) in blocks {
                if parent.len() == u32::MAX as usize {
                    return Err(BuildError::DepthOverflow);
                }
                let mut child_center = vec![0.0; d];
                geometry::child_center(&center, &extent, mask, &mut child_center);
                let child_extent: Vec<f64> = extent.iter().map(|&e| e / 2.0).collect();

                parent.push(k as u32);
                xi_off.push((descend_start + local_start) as u32);
                xi_len.push(local_len as u32);
                octant_mask.push(mask);

                next_centers.push(child_center);
                next_extents.push(child_extent);
                created_any = true;
            }
        }

        if !created_any {
            break;
        }

        lvlx.push(parent.len() as u32);
        level_centers = next_centers;
        level_extents = next_extents;
        level += 1;
    }

    Ok(Tree {
        d,
        n,
        mode,
        x: x.to_vec(),
        siz: siz.to_vec(),
        root_center,
        root_extent,
        parent,
        xi,
        xi_off,
        xi_len,
        octant_mask,
        lvlx,
        child: None,
        geometry: None,
        neighbor: None,
        interaction: None,
    })
}

fn root_geometry(
    x: &[f64],
    d: usize,
    n: usize,
    mode: Mode,
    siz: &[f64],
    ext: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), BuildError> {
    let mut bbox = BoundingBox::empty(d);
    for i in 0..n {
        let radius = if mode == Mode::Point { 0.0 } else { siz[i] };
        bbox.extend(&x[i * d..(i + 1) * d], radius);
    }

    let center = bbox.center();
    let mut extent = bbox.extent();
    for j in 0..d {
        if j < ext.len() && ext[j] > 0.0 {
            extent[j] = ext[j];
        } else if extent[j] > 0.0 {
            extent[j] *= 1.0 + BOUNDARY_MARGIN;
        }
    }

    if extent.iter().all(|&e| e == 0.0) {
        let first = &x[0..d];
        let distinct = (1..n).any(|i| x[i * d..(i + 1) * d] != *first);
        if distinct {
            return Err(BuildError::DegenerateGeometry);
        }
    }

    Ok((center, extent))
}

/// Partitions `slice` in place so that objects straddling the splitting plane
/// through `center` (and thus retained at this node) occupy the front.
/// Returns the retained count.
fn partition_retained(slice: &mut [u32], x: &[f64], siz: &[f64], d: usize, center: &[f64]) -> usize {
    let mut i = 0;
    let mut j = slice.len();
    while i < j {
        let idx = slice[i] as usize;
        let coords = &x[idx * d..(idx + 1) * d];
        if geometry::straddles(center, coords, siz[idx]) {
            i += 1;
        } else {
            j -= 1;
            slice.swap(i, j);
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_dimension() {
        let err = build_tree(&[0.0], 0, 1, Mode::Point, &[0.0], 1, -1, &[0.0], Adaptivity::Adaptive).unwrap_err();
        assert_eq!(err, BuildError::InvalidDimension { d: 0 });
    }

    #[test]
    fn rejects_negative_size() {
        let err = build_tree(
            &[0.0, 1.0],
            1,
            2,
            Mode::Element,
            &[0.0, -1.0],
            1,
            -1,
            &[0.0],
            Adaptivity::Adaptive,
        )
        .unwrap_err();
        assert_eq!(err, BuildError::NegativeSize { index: 1, value: -1.0 });
    }

    #[test]
    fn single_point_is_a_leaf_root() {
        let tree = build_tree(&[0.0], 1, 1, Mode::Point, &[0.0], 1, -1, &[0.0], Adaptivity::Adaptive).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.xi_range(0), &[0]);
    }

    #[test]
    fn occupancy_one_splits_four_points_in_1d() {
        let x = [0.1, 0.4, 0.6, 0.9];
        let tree = build_tree(&x, 1, 4, Mode::Point, &[0.0; 4], 1, -1, &[0.0], Adaptivity::Adaptive).unwrap();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.node_count(), 7);
        for k in 0..tree.node_count() {
            if tree.is_leaf(k) {
                assert_eq!(tree.xi_range(k).len(), 1);
            }
        }
    }

    #[test]
    fn element_retention_keeps_oversized_object_at_ancestor() {
        let x = [0.0, 10.0];
        let siz = [100.0, 0.0];
        let tree = build_tree(&x, 1, 2, Mode::Element, &siz, 1, -1, &[0.0], Adaptivity::Adaptive).unwrap();
        assert_eq!(tree.xi_range(0), &[0]);
        assert!(tree.node_count() > 1);
    }
}
