//! Connected sequences of segments: open [Strand]s and closed [Loop]s.
mod loops;
mod strand;

pub use loops::{Loop, LoopRelation};
pub use strand::Strand;

use crate::{
    bounding_box::{spatial_index, BoundingBox},
    core::{
        math::{normalize_radians, Vector2},
        traits::Real,
    },
    error::InvariantError,
    segment::{Arc, Curve, EllipseArc, Line, Segment},
};
use static_aabb2d_index::StaticAABB2DIndex;

/// Queries shared by strands and loops.
///
/// Strokes are never empty, methods index the first/last segment directly.
pub trait Stroke<T>
where
    T: Real,
{
    fn segments(&self) -> &[Segment<T>];

    #[inline]
    fn first_point(&self) -> Vector2<T> {
        self.segments()[0].first_point()
    }

    #[inline]
    fn last_point(&self) -> Vector2<T> {
        let segs = self.segments();
        segs[segs.len() - 1].last_point()
    }

    fn bounding_box(&self) -> BoundingBox<T> {
        let mut iter = self.segments().iter();
        match iter.next() {
            Some(first) => iter.fold(first.bounding_box(), |acc, s| {
                acc.merge(&s.bounding_box())
            }),
            None => BoundingBox::new(T::zero(), T::zero(), T::zero(), T::zero()),
        }
    }

    /// True if `point` lies on any segment of the stroke within `eps`.
    fn on_stroke(&self, point: Vector2<T>, eps: T) -> bool {
        self.segments().iter().any(|s| {
            s.bounding_box().contains_point_eps(point, eps) && s.is_on_segment(point, eps)
        })
    }

    fn length(&self) -> T {
        self.segments()
            .iter()
            .fold(T::zero(), |acc, s| acc + s.length())
    }

    /// Spatial index of the segment bounding boxes, keyed by segment index.
    fn create_aabb_index(&self) -> StaticAABB2DIndex<T> {
        spatial_index(self.segments().iter().map(|s| s.bounding_box()))
    }
}

/// Checks every segment starts where the previous one ends.
fn check_connected<T: Real>(segments: &[Segment<T>], eps: T) -> Result<(), InvariantError> {
    if segments.is_empty() {
        return Err(InvariantError::EmptyStroke);
    }

    for (i, pair) in segments.windows(2).enumerate() {
        if !pair[0].last_point().fuzzy_eq_eps(pair[1].first_point(), eps) {
            return Err(InvariantError::DisconnectedSegments { index: i + 1 });
        }
    }

    Ok(())
}

/// Line segments joining consecutive `points`, zero length steps are skipped.
fn lines_through<T: Real>(points: &[Vector2<T>], eps: T) -> Vec<Segment<T>> {
    points
        .windows(2)
        .filter(|w| !w[0].fuzzy_eq_eps(w[1], eps))
        .map(|w| Segment::line(w[0], w[1]))
        .collect()
}

/// Single segment equivalent to `a` followed by `b` if they lie on the same line/circle/ellipse
/// and run in the same direction.
fn merge_segments<T: Real>(a: &Segment<T>, b: &Segment<T>, eps: T) -> Option<Segment<T>> {
    match (a, b) {
        (Segment::Line(l1), Segment::Line(l2)) => {
            let d1 = l1.direction();
            let d2 = l2.direction();
            if d1.dot(d2) <= T::zero() {
                return None;
            }
            let joined = Line::new(l1.first_point, l2.last_point);
            if joined.is_on_segment(l1.last_point, eps) {
                Some(Segment::Line(joined))
            } else {
                None
            }
        }
        (Segment::Arc(a1), Segment::Arc(a2)) => {
            if a1.clockwise != a2.clockwise || !a1.is_co_circular(a2, eps) {
                return None;
            }
            let total = a1.sweep_angle().abs() + a2.sweep_angle().abs();
            if total >= T::tau() - eps / a1.radius() {
                return None;
            }
            Some(Segment::Arc(Arc::new(
                a1.first_point,
                a2.last_point,
                a1.center,
                a1.clockwise,
            )))
        }
        (Segment::EllipseArc(e1), Segment::EllipseArc(e2)) => {
            if e1.clockwise != e2.clockwise || !e1.is_co_elliptical(e2, eps) {
                return None;
            }
            let total = e1.sweep_angle().abs() + e2.sweep_angle().abs();
            if total >= T::tau() - eps / e1.minor_radius {
                return None;
            }
            // keep the tilt of the first arc, co-elliptical tilts may differ by a half turn
            let tilt = normalize_radians(e1.tilt_angle);
            Some(Segment::EllipseArc(EllipseArc::new(
                e1.first_point,
                e2.last_point,
                e1.center,
                e1.major_radius,
                e1.minor_radius,
                tilt,
                e1.clockwise,
            )))
        }
        _ => None,
    }
}

/// Merges consecutive mergeable segments, when `cyclic` the last and first segments are merged
/// too (the result keeps at least two segments).
fn simplify_segments<T: Real>(segments: &[Segment<T>], eps: T, cyclic: bool) -> Vec<Segment<T>> {
    let mut result: Vec<Segment<T>> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let Some(last) = result.last_mut() {
            if let Some(merged) = merge_segments(last, seg, eps) {
                *last = merged;
                continue;
            }
        }
        result.push(*seg);
    }

    if cyclic {
        while result.len() > 2 {
            let last = result[result.len() - 1];
            match merge_segments(&last, &result[0], eps) {
                Some(merged) => {
                    result[0] = merged;
                    result.pop();
                }
                None => break,
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn merges_collinear_lines() {
        let segs = vec![
            Segment::line(vec2(0.0, 0.0), vec2(1.0, 0.0)),
            Segment::line(vec2(1.0, 0.0), vec2(2.0, 0.0)),
            Segment::line(vec2(2.0, 0.0), vec2(2.0, 1.0)),
        ];
        let simplified = simplify_segments(&segs, 1e-9, false);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0].last_point(), vec2(2.0, 0.0));
    }

    #[test]
    fn does_not_merge_back_tracking_lines() {
        let a = Segment::line(vec2(0.0, 0.0), vec2(2.0, 0.0));
        let b = Segment::line(vec2(2.0, 0.0), vec2(1.0, 0.0));
        assert!(merge_segments(&a, &b, 1e-9).is_none());
    }

    #[test]
    fn arcs_never_merge_into_full_circle() {
        let upper = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let lower = Segment::arc(vec2(-1.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 0.0), false);
        assert!(merge_segments(&upper, &lower, 1e-9).is_none());
        let halves = upper.split_at(&[vec2(0.0, 1.0)], 1e-9);
        let merged = merge_segments(&halves[0], &halves[1], 1e-9).unwrap();
        assert!(merged.is_same(&upper, 1e-9));
    }
}
