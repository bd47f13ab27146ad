//! Boolean engine: loop splitting and classification, figure and figure list booleans, loop
//! organising and strand clipping.
mod disjoint_set;
mod figure_boolean;
mod figure_list;
mod loop_boolean;
mod organise;
mod stitch;
mod strand_boolean;
mod strand_split;
mod stroke_intersects;

pub use disjoint_set::DisjointSet;
pub use figure_boolean::{cut_figures, fuse_figures, intersect_figures};
pub use figure_list::{cut_figure_lists, fuse_figure_lists, intersect_figure_lists};
pub use loop_boolean::{loop_boolean, loop_boolean_op, LoopBooleanResult};
pub use organise::organise_loops;
pub use stitch::stitch_strands;
pub use strand_boolean::{confine_strand_to_figures, erase_strand_in_figures};
pub use strand_split::strands_between_points;
pub use stroke_intersects::{find_stroke_intersects, split_segments, StrokeIntersects};

use crate::core::traits::Real;

/// Options shared by all boolean operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanOptions<T>
where
    T: Real,
{
    /// Fuzzy comparison epsilon used for determining if two positions are equal.
    pub pos_equal_eps: T,
    /// Chain the selected strands of a loop boolean by their pairing order before falling back to
    /// spatial stitching. When false the stitching pass always runs.
    pub positional_chaining: bool,
}

impl<T> BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            pos_equal_eps: T::fuzzy_epsilon(),
            positional_chaining: true,
        }
    }
}

impl<T> Default for BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Boolean operation to apply to two regions.
pub enum BooleanOp {
    /// Union of the regions.
    Fuse,
    /// First region with the second region removed.
    Cut,
    /// Region covered by both.
    Intersect,
}

/// What happens to the part of one loop lying inside the other loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsidePolicy {
    Keep,
    Remove,
}

/// Selection rule of a loop boolean, one policy per input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BooleanPolicy {
    /// Applied to the strands of the first loop lying inside the second loop.
    pub first_inside: InsidePolicy,
    /// Applied to the strands of the second loop lying inside the first loop.
    pub second_inside: InsidePolicy,
}

impl BooleanOp {
    pub fn policy(self) -> BooleanPolicy {
        use InsidePolicy::*;
        let (first_inside, second_inside) = match self {
            BooleanOp::Fuse => (Remove, Remove),
            BooleanOp::Cut => (Remove, Keep),
            BooleanOp::Intersect => (Keep, Keep),
        };
        BooleanPolicy {
            first_inside,
            second_inside,
        }
    }
}

impl BooleanPolicy {
    /// True if a strand of the first loop with the given containment in the second is kept.
    #[inline]
    pub fn keeps_first(&self, inside_second: bool) -> bool {
        inside_second == (self.first_inside == InsidePolicy::Keep)
    }

    /// True if a strand of the second loop with the given containment in the first is kept.
    #[inline]
    pub fn keeps_second(&self, inside_first: bool) -> bool {
        inside_first == (self.second_inside == InsidePolicy::Keep)
    }
}
