//! Planar geometry kernel: segments, strands, loops, figures and diagrams with fuse, cut and
//! intersect boolean operations.
//!
//! Loops are closed non-self-intersecting sequences of line, arc, ellipse arc and Bezier
//! segments. A [Figure] is a contour loop with hole loops and a [Diagram] is a set of disjoint
//! figures. The operations in [ops] combine any of them and always return a well formed
//! [Diagram].
extern crate static_aabb2d_index;

#[macro_use]
mod macros;
pub mod log;

pub mod algorithms;
pub mod bounding_box;
pub mod core;
pub mod diagram;
pub mod error;
pub mod figure;
pub mod ops;
pub mod segment;
pub mod shapes;
pub mod stroke;

pub use static_aabb2d_index::AABB;

pub use crate::algorithms::{BooleanOp, BooleanOptions};
pub use crate::bounding_box::BoundingBox;
pub use crate::core::{math::Vector2, traits::*};
pub use crate::diagram::Diagram;
pub use crate::error::{AlgorithmError, Error, InvariantError, Result};
pub use crate::figure::Figure;
pub use crate::ops::Shape;
pub use crate::segment::{Curve, Segment};
pub use crate::stroke::{Loop, LoopRelation, Strand, Stroke};
