//! Adaptive axis-aligned spatial trees in arbitrary dimension.
//!
//! A [`Tree`] partitions a set of objects (points, or elements with a radius)
//! into an axis-aligned hierarchy with up to `2^d` children per node, built
//! breadth-first so sibling ranges stay contiguous and ancestor/descendant
//! relationships stay simple index comparisons. [`build_tree`] produces the
//! base representation; everything else (child pointers, reconstructed
//! geometry, neighbor lists, interaction lists, point-location search) is
//! derived lazily and cached the first time it's asked for, through the
//! methods on [`Tree`] itself.
//!
//! ```
//! use hyperoctree::{build_tree, Adaptivity, Mode};
//!
//! let x = [0.1, 0.4, 0.6, 0.9];
//! let siz = [0.0; 4];
//! let mut tree = build_tree(&x, 1, 4, Mode::Point, &siz, 1, -1, &[0.0], Adaptivity::Adaptive).unwrap();
//!
//! assert_eq!(tree.node_count(), 7);
//! let _ = tree.child_data();
//! let _ = tree.geometry_data();
//! ```

mod builder;
mod child_index;
mod error;
mod geometry;
mod interaction;
mod mode;
mod neighbors;
mod partition;
mod reconstruct;
mod search;

pub use builder::{build_tree, Tree};
pub use child_index::ChildData;
pub use error::BuildError;
pub use geometry::BoundingBox;
pub use interaction::InteractionData;
pub use mode::{Adaptivity, Mode};
pub use neighbors::NeighborData;
pub use reconstruct::GeometryData;

/// Re-exports the common entry points for glob-importing.
pub mod prelude {
    pub use crate::{build_tree, Adaptivity, BuildError, Mode, Tree};
}

impl Tree {
    /// Child-pointer CSR (`chldp`, `chld`), materializing it on first use.
    pub fn child_data(&mut self) -> &ChildData {
        if self.child.is_none() {
            self.child = Some(child_index::build_child_data(self));
        }
        self.child.as_ref().unwrap()
    }

    /// Reconstructed per-node center/extent, materializing it on first use.
    pub fn geometry_data(&mut self) -> &GeometryData {
        if self.geometry.is_none() {
            self.geometry = Some(reconstruct::build_geometry_data(self));
        }
        self.geometry.as_ref().unwrap()
    }

    /// Same-level (and, in element modes, retaining-ancestor) neighbor lists
    /// under periodicity bitmask `per` (bit `j` set means axis `j` wraps).
    ///
    /// Recomputed whenever `per` differs from the cached value, since
    /// periodicity changes which cells are adjacent.
    pub fn neighbors(&mut self, per: u32) -> &NeighborData {
        self.geometry_data();
        self.child_data();
        let needs_rebuild = match &self.neighbor {
            Some((cached_per, _)) => *cached_per != per,
            None => true,
        };
        if needs_rebuild {
            let geo = self.geometry.as_ref().unwrap();
            let child = self.child.as_ref().unwrap();
            let data = neighbors::build_neighbor_data(self, geo, child, per);
            self.neighbor = Some((per, data));
        }
        &self.neighbor.as_ref().unwrap().1
    }

    /// Interaction (far-field) lists under periodicity bitmask `per`,
    /// materializing neighbor and child data as needed.
    pub fn interaction_lists(&mut self, per: u32) -> &InteractionData {
        self.neighbors(per);
        let child = self.child.as_ref().unwrap();
        let nbor = &self.neighbor.as_ref().unwrap().1;
        let data = interaction::build_interaction_data(self, child, nbor);
        self.interaction = Some(data);
        self.interaction.as_ref().unwrap()
    }

    /// Descends `queries` (flattened `m * d`, per-query radius `siz_q`)
    /// toward the cells that fully contain them, returning each query's
    /// root-to-path node-index trace (`m` rows of `depth() + 1` entries).
    ///
    /// Descent stops early, zero-filling the rest of that row, once no child
    /// fully contains the query or `mlvl` levels have been descended
    /// (negative `mlvl` means no additional cap beyond the tree's own depth).
    pub fn search(&mut self, queries: &[f64], siz_q: &[f64], mlvl: i64) -> Vec<u32> {
        self.geometry_data();
        self.child_data();
        let geo = self.geometry.as_ref().unwrap();
        let child = self.child.as_ref().unwrap();
        search::search(self, geo, child, queries, siz_q, mlvl)
    }
}
