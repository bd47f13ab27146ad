use super::{check_connected, lines_through, simplify_segments, Stroke};
use crate::{
    core::{math::Vector2, traits::Real},
    error::{InvariantError, Result},
    segment::{Curve, Segment},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open, connected sequence of segments.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Strand<T = f64> {
    segments: Vec<Segment<T>>,
}

impl<T> Strand<T>
where
    T: Real,
{
    /// Creates a strand, checking it is non-empty and connected.
    pub fn new(segments: Vec<Segment<T>>) -> Result<Self> {
        Self::new_eps(segments, T::fuzzy_epsilon())
    }

    pub fn new_eps(segments: Vec<Segment<T>>, eps: T) -> Result<Self> {
        check_connected(&segments, eps)?;
        Ok(Self { segments })
    }

    /// Creates a strand without checking, `segments` must be non-empty and connected.
    #[inline]
    pub fn new_unchecked(segments: Vec<Segment<T>>) -> Self {
        Self { segments }
    }

    /// Strand of line segments through `points`.
    pub fn from_points(points: &[Vector2<T>]) -> Result<Self> {
        Self::new(lines_through(points, T::fuzzy_epsilon()))
    }

    #[inline]
    pub fn into_segments(self) -> Vec<Segment<T>> {
        self.segments
    }

    pub fn reverse(&self) -> Self {
        Self::new_unchecked(self.segments.iter().rev().map(|s| s.reverse()).collect())
    }

    /// Appends `other`, which must start where this strand ends.
    pub fn extend(&self, other: &Strand<T>, eps: T) -> Result<Self> {
        if !self.last_point().fuzzy_eq_eps(other.first_point(), eps) {
            return Err(InvariantError::DisconnectedSegments {
                index: self.segments.len(),
            }
            .into());
        }

        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&other.segments);
        Ok(Self::new_unchecked(segments))
    }

    /// In place append without checking connection.
    pub(crate) fn push_unchecked(&mut self, other: &Strand<T>) {
        self.segments.extend_from_slice(&other.segments);
    }

    /// Point used to classify the strand against another stroke, the middle segment's midpoint.
    pub fn probe_point(&self) -> Vector2<T> {
        self.segments[self.segments.len() / 2].mid_point()
    }

    /// True if both strands have the same segments, in the same or reversed order.
    pub fn is_same(&self, other: &Strand<T>, eps: T) -> bool {
        let a = self.simplify_eps(eps);
        let b = other.simplify_eps(eps);
        if a.segments.len() != b.segments.len() {
            return false;
        }

        let forward = a
            .segments
            .iter()
            .zip(b.segments.iter())
            .all(|(x, y)| x.is_same(y, eps));
        forward
            || a.segments
                .iter()
                .zip(b.segments.iter().rev())
                .all(|(x, y)| x.is_same(y, eps))
    }

    pub fn simplify(&self) -> Self {
        self.simplify_eps(T::fuzzy_epsilon())
    }

    /// Merges consecutive collinear lines and co-circular (or co-elliptical) arcs.
    pub fn simplify_eps(&self, eps: T) -> Self {
        Self::new_unchecked(simplify_segments(&self.segments, eps, false))
    }

    pub fn translate(&self, offset: Vector2<T>) -> Self {
        Self::new_unchecked(self.segments.iter().map(|s| s.translate(offset)).collect())
    }

    pub fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        Self::new_unchecked(
            self.segments
                .iter()
                .map(|s| s.rotate_about(origin, angle))
                .collect(),
        )
    }

    pub fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        Self::new_unchecked(
            self.segments
                .iter()
                .map(|s| s.scale_about(origin, factor))
                .collect(),
        )
    }
}

impl<T> Stroke<T> for Strand<T>
where
    T: Real,
{
    #[inline]
    fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }
}
