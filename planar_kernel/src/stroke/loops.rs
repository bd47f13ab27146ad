use super::{check_connected, lines_through, simplify_segments, Stroke};
use crate::{
    algorithms::{find_stroke_intersects, split_segments},
    bounding_box::spatial_index,
    core::{
        math::{polygon_signed_area, Vector2},
        traits::Real,
    },
    error::{InvariantError, Result},
    segment::{find_intersections_and_overlaps, Curve, Segment},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed, non-self-intersecting sequence of segments.
///
/// The last segment ends where the first segment starts. Loops have no required orientation,
/// [Loop::clockwise] reports it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Loop<T = f64> {
    segments: Vec<Segment<T>>,
}

/// Position of one loop relative to another, see [Loop::relation_to].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopRelation {
    /// Every part of the loop not on the other loop's boundary is inside the other loop.
    Inside,
    /// Every part of the loop not on the other loop's boundary is outside the other loop.
    Outside,
    /// Parts of the loop are inside and parts are outside the other loop.
    Crossing,
    /// The loop lies entirely on the other loop's boundary.
    Coincident,
}

/// Parameter offset used to probe either side of a tangent ray hit.
const TANGENT_PROBE: f64 = 1e-4;

impl<T> Loop<T>
where
    T: Real,
{
    /// Creates a loop, checking it is non-empty, connected, closed and not self-intersecting.
    pub fn new(segments: Vec<Segment<T>>) -> Result<Self> {
        Self::new_eps(segments, T::fuzzy_epsilon())
    }

    pub fn new_eps(segments: Vec<Segment<T>>, eps: T) -> Result<Self> {
        check_connected(&segments, eps)?;
        let first = segments[0].first_point();
        let last = segments[segments.len() - 1].last_point();
        if !first.fuzzy_eq_eps(last, eps) {
            return Err(InvariantError::LoopNotClosed.into());
        }

        check_self_intersects(&segments, eps)?;
        Ok(Self { segments })
    }

    /// Creates a loop without any checks.
    ///
    /// Used by algorithms which assemble loops already known to be closed and simple.
    #[inline]
    pub fn new_unchecked(segments: Vec<Segment<T>>) -> Self {
        Self { segments }
    }

    /// Loop of line segments through `points`, closed back to the first point.
    pub fn from_points(points: &[Vector2<T>]) -> Result<Self> {
        let eps = T::fuzzy_epsilon();
        let mut segments = lines_through(points, eps);
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if !first.fuzzy_eq_eps(last, eps) {
                segments.push(Segment::line(last, first));
            }
        }
        Self::new(segments)
    }

    #[inline]
    pub fn into_segments(self) -> Vec<Segment<T>> {
        self.segments
    }

    /// Signed area, positive for counter clockwise loops.
    pub fn signed_area(&self) -> T {
        self.segments
            .iter()
            .fold(T::zero(), |acc, s| acc + s.signed_area_contribution())
    }

    #[inline]
    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    /// Orientation from the polygon through the first and middle point of every segment.
    pub fn clockwise(&self) -> bool {
        let mut samples = Vec::with_capacity(self.segments.len() * 2);
        for s in self.segments.iter() {
            samples.push(s.first_point());
            if !s.is_line() {
                samples.push(s.mid_point());
            }
        }
        polygon_signed_area(&samples) < T::zero()
    }

    pub fn reverse(&self) -> Self {
        Self::new_unchecked(self.segments.iter().rev().map(|s| s.reverse()).collect())
    }

    /// Same loop oriented counter clockwise (`ccw == true`) or clockwise.
    pub fn oriented(&self, ccw: bool) -> Self {
        if self.clockwise() == ccw {
            self.reverse()
        } else {
            self.clone()
        }
    }

    /// Same loop starting at the segment `start`.
    #[cfg(test)]
    pub(crate) fn rotated(&self, start: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.rotate_left(start % self.segments.len());
        Self::new_unchecked(segments)
    }

    /// True if `point` is strictly inside the loop, points on the boundary are not contained.
    pub fn contains(&self, point: Vector2<T>) -> bool {
        self.contains_eps(point, T::fuzzy_epsilon())
    }

    /// Parity ray cast along the positive x direction.
    ///
    /// Crossings at a segment end point are counted once per segment leaving the end point
    /// upward, so a vertex touched by the ray from one side counts twice (or not at all) while a
    /// vertex crossed counts once. Tangent hits inside a segment are probed on either side.
    pub fn contains_eps(&self, point: Vector2<T>, eps: T) -> bool {
        if !self.bounding_box().contains_point_eps(point, eps) {
            return false;
        }

        if self.on_stroke(point, eps) {
            return false;
        }

        let mut crossings = 0usize;
        let probe = T::constant(TANGENT_PROBE);
        for seg in self.segments.iter() {
            let bb = seg.bounding_box();
            if bb.max_x < point.x || bb.max_y < point.y - eps || bb.min_y > point.y + eps {
                continue;
            }

            let first = seg.first_point();
            let last = seg.last_point();
            for t in seg.horizontal_hits(point.y, eps) {
                let p = seg.param_point(t);
                if p.x <= point.x || p.fuzzy_eq_eps(first, eps) || p.fuzzy_eq_eps(last, eps) {
                    continue;
                }
                let t_before = num_traits::real::Real::max(T::zero(), t - probe);
                let t_after = num_traits::real::Real::min(T::one(), t + probe);
                let before = seg.param_point(t_before).y - point.y;
                let after = seg.param_point(t_after).y - point.y;
                if (before < T::zero() && after > T::zero())
                    || (before > T::zero() && after < T::zero())
                {
                    crossings += 1;
                }
            }

            if (first.y - point.y).abs() < eps && first.x > point.x && leaves_upward(seg, true) {
                crossings += 1;
            }
            if (last.y - point.y).abs() < eps && last.x > point.x && leaves_upward(seg, false) {
                crossings += 1;
            }
        }

        crossings % 2 == 1
    }

    /// Midpoint of a segment which is not on `other`, `None` if every segment midpoint is.
    pub fn probe_point_against(&self, other: &Loop<T>, eps: T) -> Option<Vector2<T>> {
        self.segments
            .iter()
            .map(|s| s.mid_point())
            .find(|&p| !other.on_stroke(p, eps))
    }

    /// Classifies this loop against `other` by splitting it at all intersects with `other` and
    /// testing the midpoint of every piece.
    pub fn relation_to(&self, other: &Loop<T>, eps: T) -> LoopRelation {
        if !self.bounding_box().overlaps_eps(&other.bounding_box(), eps) {
            return LoopRelation::Outside;
        }

        let intersects = find_stroke_intersects(&self.segments, &other.segments, eps);
        let pieces = if intersects.is_empty() {
            self.segments.clone()
        } else {
            split_segments(&self.segments, &intersects.first_points, eps)
        };

        let mut inside = false;
        let mut outside = false;
        for piece in pieces.iter() {
            let m = piece.mid_point();
            if other.on_stroke(m, eps) {
                continue;
            }
            if other.contains_eps(m, eps) {
                inside = true;
            } else {
                outside = true;
            }
            if inside && outside {
                return LoopRelation::Crossing;
            }
        }

        match (inside, outside) {
            (true, _) => LoopRelation::Inside,
            (false, true) => LoopRelation::Outside,
            (false, false) => LoopRelation::Coincident,
        }
    }

    /// True if both loops trace the same curve, with any start point and either direction.
    pub fn is_same(&self, other: &Loop<T>, eps: T) -> bool {
        let a = self.simplify_eps(eps).segments;
        let b = other.simplify_eps(eps).segments;
        let n = a.len();
        if n != b.len() {
            return false;
        }

        (0..n).filter(|&j| a[0].is_same(&b[j], eps)).any(|j| {
            let forward = (0..n).all(|k| a[k].is_same(&b[(j + k) % n], eps));
            forward || (0..n).all(|k| a[k].is_same(&b[(j + n - k) % n], eps))
        })
    }

    pub fn simplify(&self) -> Self {
        self.simplify_eps(T::fuzzy_epsilon())
    }

    /// Merges consecutive collinear lines and co-circular (or co-elliptical) arcs, including
    /// across the closing junction.
    pub fn simplify_eps(&self, eps: T) -> Self {
        Self::new_unchecked(simplify_segments(&self.segments, eps, true))
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

impl<T> Stroke<T> for Loop<T>
where
    T: Real,
{
    #[inline]
    fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }
}

/// True if `seg` moves upward (positive y) when leaving its first point (`at_start`) or, traced
/// backward, when leaving its last point.
fn leaves_upward<T: Real>(seg: &Segment<T>, at_start: bool) -> bool {
    let (vertex, tangent_y, probe) = if at_start {
        (
            seg.first_point(),
            seg.derivative_at(T::zero()).y,
            seg.param_point(T::constant(0.01)),
        )
    } else {
        (
            seg.last_point(),
            -seg.derivative_at(T::one()).y,
            seg.param_point(T::constant(0.99)),
        )
    };

    let scale = seg.derivative_at(if at_start { T::zero() } else { T::one() }).length();
    if tangent_y.abs() > scale * T::constant(1e-9) {
        return tangent_y > T::zero();
    }

    probe.y > vertex.y
}

/// Rejects loops whose segments intersect other than at their shared junctions.
fn check_self_intersects<T: Real>(segments: &[Segment<T>], eps: T) -> Result<(), InvariantError> {
    let n = segments.len();
    if n < 2 {
        return Ok(());
    }

    let index = spatial_index(segments.iter().map(|s| s.bounding_box()));
    let mut query_stack = Vec::with_capacity(8);
    let mut found: Option<(usize, usize)> = None;
    for (i, seg) in segments.iter().enumerate() {
        let mut query_visitor = |j: usize| {
            if j <= i || found.is_some() {
                return;
            }

            let r = find_intersections_and_overlaps(seg, &segments[j], eps);
            if r.is_empty() {
                return;
            }

            if !r.overlaps.is_empty() {
                found = Some((i, j));
                return;
            }

            // adjacent segments may only meet at their junction point(s)
            let mut junctions = Vec::with_capacity(2);
            if j == i + 1 {
                junctions.push(seg.last_point());
            }
            if i == 0 && j == n - 1 {
                junctions.push(seg.first_point());
            }

            let allowed = r
                .intersections
                .iter()
                .all(|p| junctions.iter().any(|q| q.fuzzy_eq_eps(*p, eps)));
            if !allowed {
                found = Some((i, j));
            }
        };

        let bb = seg.bounding_box();
        index.visit_query_with_stack(
            bb.min_x - eps,
            bb.min_y - eps,
            bb.max_x + eps,
            bb.max_y + eps,
            &mut query_visitor,
            &mut query_stack,
        );

        if let Some((first, second)) = found {
            return Err(InvariantError::SelfIntersectingLoop { first, second });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, error::Error};

    fn unit_square() -> Loop<f64> {
        Loop::from_points(&[
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn square_properties() {
        let sq = unit_square();
        assert_eq!(sq.segments().len(), 4);
        assert!(!sq.clockwise());
        assert!(sq.reverse().clockwise());
        assert!((sq.signed_area() - 1.0).abs() < 1e-12);
        assert!((sq.reverse().signed_area() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn contains_points() {
        let sq = unit_square();
        assert!(sq.contains(vec2(0.5, 0.5)));
        assert!(!sq.contains(vec2(1.5, 0.5)));
        // on the boundary
        assert!(!sq.contains(vec2(1.0, 0.5)));
        assert!(!sq.contains(vec2(0.0, 0.0)));
        // ray passes exactly through vertices
        assert!(sq.contains(vec2(0.5, 1.0 - 1e-6)));
        let diamond = Loop::from_points(&[
            vec2(0.0, -1.0),
            vec2(1.0, 0.0),
            vec2(0.0, 1.0),
            vec2(-1.0, 0.0),
        ])
        .unwrap();
        assert!(diamond.contains(vec2(0.0, 0.0)));
        assert!(diamond.contains(vec2(-0.5, 0.0)));
        assert!(!diamond.contains(vec2(-1.5, 0.0)));
    }

    #[test]
    fn rejects_open_and_self_intersecting() {
        let open = Loop::new(vec![
            Segment::line(vec2(0.0, 0.0), vec2(1.0, 0.0)),
            Segment::line(vec2(1.0, 0.0), vec2(1.0, 1.0)),
        ]);
        assert_eq!(open, Err(Error::Invariant(InvariantError::LoopNotClosed)));

        let bow_tie = Loop::from_points(&[
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(1.0, 0.0),
            vec2(0.0, 1.0),
        ]);
        assert!(matches!(
            bow_tie,
            Err(Error::Invariant(InvariantError::SelfIntersectingLoop { .. }))
        ));
    }

    #[test]
    fn same_loop_any_start_and_direction() {
        let sq = unit_square();
        assert!(sq.is_same(&sq.rotated(2), 1e-9));
        assert!(sq.is_same(&sq.reverse(), 1e-9));
        assert!(!sq.is_same(&sq.translate(vec2(0.5, 0.0)), 1e-9));
    }

    #[test]
    fn relations() {
        let sq = unit_square();
        let inner = sq.scale_about(vec2(0.5, 0.5), 0.5);
        let shifted = sq.translate(vec2(0.5, 0.0));
        let far = sq.translate(vec2(5.0, 0.0));
        assert_eq!(inner.relation_to(&sq, 1e-9), LoopRelation::Inside);
        assert_eq!(sq.relation_to(&inner, 1e-9), LoopRelation::Outside);
        assert_eq!(shifted.relation_to(&sq, 1e-9), LoopRelation::Crossing);
        assert_eq!(far.relation_to(&sq, 1e-9), LoopRelation::Outside);
        assert_eq!(sq.relation_to(&sq.reverse(), 1e-9), LoopRelation::Coincident);
    }
}
