//! Axis-aligned box arithmetic shared by the builder, the geometry reconstructor,
//! the neighbor finder and the search traversal.
//!
//! Every function here operates on a node's *center* and *extent* (full side
//! length per axis), both represented as `&[f64]` of length `d`. Dimension is a
//! runtime value throughout this crate rather than a const generic, since
//! [`crate::build_tree`] takes `d` as an ordinary argument.

/// Axis-aligned bounding box over `d`-dimensional points, tracked as min/max
/// corners.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec<f64>,
    /// Maximum corner.
    pub max: Vec<f64>,
}

impl BoundingBox {
    /// Creates an empty box (min = `+inf`, max = `-inf`) for dimension `d`.
    pub fn empty(d: usize) -> Self {
        Self {
            min: vec![f64::INFINITY; d],
            max: vec![f64::NEG_INFINITY; d],
        }
    }

    /// Extends the box to contain a sphere of the given `radius` centered at `x`.
    pub fn extend(&mut self, x: &[f64], radius: f64) {
        for j in 0..self.min.len() {
            self.min[j] = self.min[j].min(x[j] - radius);
            self.max[j] = self.max[j].max(x[j] + radius);
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec<f64> {
        (0..self.min.len())
            .map(|j| (self.min[j] + self.max[j]) / 2.0)
            .collect()
    }

    /// Full side length of the box per axis.
    pub fn extent(&self) -> Vec<f64> {
        (0..self.min.len())
            .map(|j| self.max[j] - self.min[j])
            .collect()
    }
}

/// Bit `j` is `1` iff `x[j] >= center[j]` (ties go to the upper half).
#[inline]
pub fn octant_of(center: &[f64], x: &[f64]) -> u32 {
    let mut mask = 0u32;
    for j in 0..center.len() {
        if x[j] >= center[j] {
            mask |= 1 << j;
        }
    }
    mask
}

/// Center of the child cell identified by `mask` within a parent of the given
/// `center`/`extent`.
pub fn child_center(center: &[f64], extent: &[f64], mask: u32, out: &mut [f64]) {
    for j in 0..center.len() {
        let quarter = extent[j] / 4.0;
        out[j] = if mask & (1 << j) != 0 {
            center[j] + quarter
        } else {
            center[j] - quarter
        };
    }
}

/// Whether a node of the given `center`/`extent` fully contains an object of
/// `radius` at position `x`.
pub fn contains(center: &[f64], extent: &[f64], x: &[f64], radius: f64) -> bool {
    (0..center.len()).all(|j| (x[j] - center[j]).abs() + radius <= extent[j] / 2.0)
}

/// Whether an object of `radius` centered at `x` crosses the splitting plane
/// through `center` along any axis, and therefore cannot fit wholly inside
/// either half of a cell split at `center`.
#[inline]
pub fn straddles(center: &[f64], x: &[f64], radius: f64) -> bool {
    center.iter().zip(x.iter()).any(|(&c, &xv)| radius > (xv - c).abs())
}

/// Minimum-image displacement of `delta` under a period (`None` = non-periodic).
#[inline]
pub fn min_image(delta: f64, period: Option<f64>) -> f64 {
    match period {
        Some(p) if p > 0.0 => delta - p * (delta / p).round(),
        _ => delta,
    }
}

/// Whether two intervals of half-widths `a_half`/`b_half` centered at
/// `a_center`/`b_center` touch or overlap along one axis, under the minimum
/// image if `period` is set.
pub fn axis_overlap(a_center: f64, a_half: f64, b_center: f64, b_half: f64, period: Option<f64>) -> bool {
    let delta = min_image(a_center - b_center, period);
    delta.abs() <= a_half + b_half
}

/// Whether two axis-aligned cells touch or overlap on every axis, under the
/// active per-axis periodicity.
pub fn cells_adjacent(
    a_center: &[f64],
    a_extent: &[f64],
    b_center: &[f64],
    b_extent: &[f64],
    periods: &[Option<f64>],
) -> bool {
    (0..a_center.len()).all(|j| {
        axis_overlap(
            a_center[j],
            a_extent[j] / 2.0,
            b_center[j],
            b_extent[j] / 2.0,
            periods[j],
        )
    })
}
