use std::fmt;

/// Failure reported by [`build_tree`](crate::build_tree) at the call site.
///
/// No partial [`Tree`](crate::Tree) is ever returned alongside an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuildError {
    /// `d < 1` or `d` exceeds the bitmask width supported by octant masks.
    InvalidDimension {
        /// The rejected dimension.
        d: usize,
    },
    /// `N < 1`.
    NoObjects,
    /// `occ < 1`.
    InvalidOccupancy {
        /// The rejected occupancy.
        occ: i64,
    },
    /// `x` and `siz` do not describe the same number of objects.
    SizeMismatch {
        /// Number of objects implied by `x`.
        x_len: usize,
        /// Number of objects implied by `siz`.
        siz_len: usize,
    },
    /// A radius in `siz` is negative.
    NegativeSize {
        /// Index of the offending object.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// Root extent is zero along every axis while more than one distinct
    /// object is present.
    DegenerateGeometry,
    /// Construction would need more nodes than fit in a [`u32`] node index.
    ///
    /// Distinct from reaching `lvlmax`: this is a hard limit of the fixed-width
    /// index representation, not a user-requested depth cap.
    DepthOverflow,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidDimension { d } => {
                write!(f, "dimension must be between 1 and 32, got {d}")
            }
            Self::NoObjects => write!(f, "at least one object is required"),
            Self::InvalidOccupancy { occ } => {
                write!(f, "occupancy must be at least 1, got {occ}")
            }
            Self::SizeMismatch { x_len, siz_len } => write!(
                f,
                "coordinate count {x_len} does not match size count {siz_len}"
            ),
            Self::NegativeSize { index, value } => {
                write!(f, "object {index} has a negative size {value}")
            }
            Self::DegenerateGeometry => write!(
                f,
                "root extent is zero along every axis with more than one distinct object"
            ),
            Self::DepthOverflow => write!(
                f,
                "construction needs more nodes than fit in a u32 node index"
            ),
        }
    }
}

impl std::error::Error for BuildError {}
