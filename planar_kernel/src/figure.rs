//! Region bounded by a contour loop with zero or more hole loops.
use crate::{
    bounding_box::BoundingBox,
    core::{math::Vector2, traits::Real},
    error::{InvariantError, Result},
    stroke::{Loop, LoopRelation, Stroke},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A contour loop with hole loops.
///
/// Holes lie inside the contour (touching it is allowed), never inside another hole, and no two
/// loops of a figure cross each other.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Figure<T = f64> {
    contour: Loop<T>,
    holes: Vec<Loop<T>>,
}

impl<T> Figure<T>
where
    T: Real,
{
    /// Creates a figure, checking the hole placement invariants.
    pub fn new(contour: Loop<T>, holes: Vec<Loop<T>>) -> Result<Self> {
        Self::new_eps(contour, holes, T::fuzzy_epsilon())
    }

    pub fn new_eps(contour: Loop<T>, holes: Vec<Loop<T>>, eps: T) -> Result<Self> {
        for (i, hole) in holes.iter().enumerate() {
            match hole.relation_to(&contour, eps) {
                LoopRelation::Inside => {}
                LoopRelation::Crossing => {
                    return Err(InvariantError::IntersectingLoops {
                        first: 0,
                        second: i + 1,
                    }
                    .into())
                }
                LoopRelation::Outside | LoopRelation::Coincident => {
                    return Err(InvariantError::HoleOutsideContour { index: i }.into())
                }
            }
        }

        for i in 0..holes.len() {
            for j in (i + 1)..holes.len() {
                let (a, b) = (&holes[i], &holes[j]);
                if !a.bounding_box().overlaps_eps(&b.bounding_box(), eps) {
                    continue;
                }
                match (a.relation_to(b, eps), b.relation_to(a, eps)) {
                    (LoopRelation::Outside, LoopRelation::Outside) => {}
                    (LoopRelation::Inside, _) | (LoopRelation::Coincident, _) => {
                        return Err(InvariantError::NestedHoles { outer: j, inner: i }.into())
                    }
                    (_, LoopRelation::Inside) => {
                        return Err(InvariantError::NestedHoles { outer: i, inner: j }.into())
                    }
                    _ => {
                        return Err(InvariantError::IntersectingLoops {
                            first: i + 1,
                            second: j + 1,
                        }
                        .into())
                    }
                }
            }
        }

        Ok(Self { contour, holes })
    }

    /// Creates a figure without checks, used by the boolean algorithms.
    #[inline]
    pub fn new_unchecked(contour: Loop<T>, holes: Vec<Loop<T>>) -> Self {
        Self { contour, holes }
    }

    /// Figure without holes.
    #[inline]
    pub fn full(contour: Loop<T>) -> Self {
        Self::new_unchecked(contour, Vec::new())
    }

    #[inline]
    pub fn contour(&self) -> &Loop<T> {
        &self.contour
    }

    #[inline]
    pub fn holes(&self) -> &[Loop<T>] {
        &self.holes
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.holes.is_empty()
    }

    #[inline]
    pub fn into_parts(self) -> (Loop<T>, Vec<Loop<T>>) {
        (self.contour, self.holes)
    }

    /// Contour followed by the holes.
    pub fn all_loops(&self) -> impl Iterator<Item = &Loop<T>> + '_ {
        std::iter::once(&self.contour).chain(self.holes.iter())
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox<T> {
        self.contour.bounding_box()
    }

    /// True if `point` is inside the contour and outside every hole.
    pub fn contains(&self, point: Vector2<T>) -> bool {
        self.contains_eps(point, T::fuzzy_epsilon())
    }

    pub fn contains_eps(&self, point: Vector2<T>, eps: T) -> bool {
        self.contour.contains_eps(point, eps)
            && !self
                .holes
                .iter()
                .any(|h| h.contains_eps(point, eps) || h.on_stroke(point, eps))
    }

    /// True if `point` is on the contour or on a hole.
    pub fn on_boundary(&self, point: Vector2<T>, eps: T) -> bool {
        self.all_loops().any(|l| l.on_stroke(point, eps))
    }

    /// Contour area minus the hole areas.
    pub fn area(&self) -> T {
        self.holes
            .iter()
            .fold(self.contour.area(), |acc, h| acc - h.area())
    }

    pub fn translate(&self, offset: Vector2<T>) -> Self {
        self.map_loops(|l| l.translate(offset))
    }

    pub fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        self.map_loops(|l| l.rotate_about(origin, angle))
    }

    pub fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        self.map_loops(|l| l.scale_about(origin, factor))
    }

    fn map_loops<F>(&self, f: F) -> Self
    where
        F: Fn(&Loop<T>) -> Loop<T>,
    {
        Self::new_unchecked(f(&self.contour), self.holes.iter().map(f).collect())
    }
}

impl<T> From<Loop<T>> for Figure<T>
where
    T: Real,
{
    #[inline]
    fn from(contour: Loop<T>) -> Self {
        Figure::full(contour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, error::Error, shapes::rect};

    #[test]
    fn figure_with_hole() {
        let f = Figure::new(rect(4.0_f64, 4.0), vec![rect(2.0, 2.0)]).unwrap();
        assert!((f.area() - 12.0).abs() < 1e-9);
        assert!(f.contains(vec2(1.5, 0.0)));
        assert!(!f.contains(vec2(0.0, 0.0)));
        assert!(!f.contains(vec2(1.0, 0.0)));
        assert!(!f.is_full());
    }

    #[test]
    fn rejects_misplaced_holes() {
        let outside = Figure::new(rect(2.0, 2.0), vec![rect(1.0, 1.0).translate(vec2(5.0, 0.0))]);
        assert_eq!(
            outside,
            Err(Error::Invariant(InvariantError::HoleOutsideContour { index: 0 }))
        );

        let nested = Figure::new(rect(8.0, 8.0), vec![rect(4.0, 4.0), rect(2.0, 2.0)]);
        assert_eq!(
            nested,
            Err(Error::Invariant(InvariantError::NestedHoles { outer: 0, inner: 1 }))
        );

        let crossing = Figure::new(rect(2.0, 2.0), vec![rect(2.0, 1.0).translate(vec2(1.0, 0.0))]);
        assert!(matches!(
            crossing,
            Err(Error::Invariant(InvariantError::IntersectingLoops { .. }))
        ));
    }
}
