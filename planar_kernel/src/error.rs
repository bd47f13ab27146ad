//! Error types returned by constructors and boolean operations.

use thiserror::Error;

/// Rejection of a stroke, figure or diagram that does not satisfy its construction invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("stroke has no segments")]
    EmptyStroke,

    #[error("segment {index} does not start where the previous segment ends")]
    DisconnectedSegments { index: usize },

    #[error("loop is not closed, last point does not match first point")]
    LoopNotClosed,

    #[error("loop intersects itself (segments {first} and {second})")]
    SelfIntersectingLoop { first: usize, second: usize },

    #[error("hole {index} is not inside the figure contour")]
    HoleOutsideContour { index: usize },

    #[error("hole {inner} lies inside hole {outer}")]
    NestedHoles { outer: usize, inner: usize },

    #[error("figure loops {first} and {second} intersect each other")]
    IntersectingLoops { first: usize, second: usize },

    #[error("diagram figures {first} and {second} overlap")]
    OverlappingFigures { first: usize, second: usize },
}

/// Internal consistency failure inside a boolean algorithm.
///
/// These indicate degenerate input or a defect in the algorithm, not a recoverable condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("bug in boolean algorithm: odd number of crossings ({count}) at a shared point")]
    OddCrossingCount { count: usize },

    #[error("bug in boolean algorithm: intersection vertex missing from split segment list")]
    VertexNotFound,

    #[error("bug in boolean algorithm: strand counts differ ({first} vs {second})")]
    StrandCountMismatch { first: usize, second: usize },

    #[error("bug in stitching algorithm: exceeded loop guard of {max_loop_count} iterations")]
    StitchLoopGuard { max_loop_count: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
