use super::{Arc, Curve, Line, Segment};
use crate::{
    bounding_box::BoundingBox,
    core::{
        math::{
            circle_circle_intr, line_circle_intr, line_line_intr, parametric_from_point,
            CircleCircleIntr, LineCircleIntr, LineLineIntr, Vector2,
        },
        traits::Real,
    },
};

/// Result of intersecting two segments.
///
/// `overlaps` holds the portions where the segments coincide, oriented along the first segment.
/// `intersections` holds isolated crossing or touching points (points covered by an overlap are
/// not repeated here).
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentIntersections<T = f64> {
    pub intersections: Vec<Vector2<T>>,
    pub overlaps: Vec<Segment<T>>,
}

impl<T> SegmentIntersections<T>
where
    T: Real,
{
    #[inline]
    pub fn empty() -> Self {
        Self {
            intersections: Vec::new(),
            overlaps: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty() && self.overlaps.is_empty()
    }
}

/// Finds all intersection points and coincident portions between `first` and `second`.
///
/// `eps` is the distance below which two points are considered equal. Intersection points within
/// `eps` of an end point of either segment are snapped to that end point.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// # use planar_kernel::segment::*;
/// let a = Segment::line(vec2(0.0, 0.0), vec2(2.0, 2.0));
/// let b = Segment::line(vec2(0.0, 2.0), vec2(2.0, 0.0));
/// let result = find_intersections_and_overlaps(&a, &b, 1e-9);
/// assert_eq!(result.intersections, vec![vec2(1.0, 1.0)]);
/// assert!(result.overlaps.is_empty());
/// ```
pub fn find_intersections_and_overlaps<T>(
    first: &Segment<T>,
    second: &Segment<T>,
    eps: T,
) -> SegmentIntersections<T>
where
    T: Real,
{
    if !first.bounding_box().overlaps_eps(&second.bounding_box(), eps) {
        return SegmentIntersections::empty();
    }

    let mut result = match (first, second) {
        (Segment::Line(a), Segment::Line(b)) => line_line(a, b, eps),
        (Segment::Line(l), Segment::Arc(c)) => line_arc(l, c, eps),
        (Segment::Arc(c), Segment::Line(l)) => line_arc(l, c, eps),
        (Segment::Arc(a), Segment::Arc(b)) => arc_arc(a, b, eps),
        _ => {
            let common = common_portions(first, second, eps);
            if !common.overlaps.is_empty() {
                common
            } else {
                let points = match (first, second) {
                    (Segment::Line(l), other) | (other, Segment::Line(l)) => {
                        line_curve(l, other, eps)
                    }
                    _ => subdivision_intersects(first, second, eps),
                };
                SegmentIntersections {
                    intersections: points,
                    overlaps: Vec::new(),
                }
            }
        }
    };

    finalize(&mut result, first, second, eps);
    result
}

fn line_line<T: Real>(a: &Line<T>, b: &Line<T>, eps: T) -> SegmentIntersections<T> {
    let mut result = SegmentIntersections::empty();
    match line_line_intr(a.first_point, a.last_point, b.first_point, b.last_point, eps) {
        LineLineIntr::TrueIntersect { seg1_t, .. } => {
            result.intersections.push(a.param_point(seg1_t));
        }
        LineLineIntr::Overlapping { seg2_t0, seg2_t1 } => {
            let mut p0 = b.param_point(seg2_t0);
            let mut p1 = b.param_point(seg2_t1);
            if parametric_from_point(a.first_point, a.last_point, p0)
                > parametric_from_point(a.first_point, a.last_point, p1)
            {
                std::mem::swap(&mut p0, &mut p1);
            }
            result.overlaps.push(Segment::line(p0, p1));
        }
        LineLineIntr::NoIntersect | LineLineIntr::FalseIntersect { .. } => {}
    }
    result
}

fn line_arc<T: Real>(line: &Line<T>, arc: &Arc<T>, eps: T) -> SegmentIntersections<T> {
    let mut result = SegmentIntersections::empty();
    let line_length = line.length();
    let mut try_param = |t: T| {
        let dist_along = t * line_length;
        if dist_along < -eps || dist_along > line_length + eps {
            return;
        }
        let p = line.param_point(t);
        if arc.is_on_segment(p, eps) {
            result.intersections.push(p);
        }
    };

    match line_circle_intr(
        line.first_point,
        line.last_point,
        arc.radius(),
        arc.center,
        eps,
    ) {
        LineCircleIntr::NoIntersect => {}
        LineCircleIntr::TangentIntersect { t0 } => try_param(t0),
        LineCircleIntr::TwoIntersects { t0, t1 } => {
            try_param(t0);
            try_param(t1);
        }
    }

    result
}

fn arc_arc<T: Real>(a: &Arc<T>, b: &Arc<T>, eps: T) -> SegmentIntersections<T> {
    let mut result = SegmentIntersections::empty();
    let mut try_point = |p: Vector2<T>| {
        if a.is_on_segment(p, eps) && b.is_on_segment(p, eps) {
            result.intersections.push(p);
        }
    };

    match circle_circle_intr(a.radius(), a.center, b.radius(), b.center, eps) {
        CircleCircleIntr::NoIntersect => {}
        CircleCircleIntr::TangentIntersect { point } => try_point(point),
        CircleCircleIntr::TwoIntersects { point1, point2 } => {
            try_point(point1);
            try_point(point2);
        }
        CircleCircleIntr::Overlapping => {
            return common_portions(&Segment::Arc(*a), &Segment::Arc(*b), eps);
        }
    }

    result
}

/// Finds the portions shared by two segments lying on the same underlying curve.
///
/// Only the end points of each segment lying on the other are candidates for the bounds of a
/// shared portion. Candidates not bounding a shared portion are returned as touch points.
fn common_portions<T: Real>(
    first: &Segment<T>,
    second: &Segment<T>,
    eps: T,
) -> SegmentIntersections<T> {
    let mut candidates: Vec<Vector2<T>> = Vec::with_capacity(4);
    let mut add_candidate = |p: Vector2<T>| {
        if !candidates.iter().any(|c| c.fuzzy_eq_eps(p, eps)) {
            candidates.push(p);
        }
    };

    for p in [first.first_point(), first.last_point()] {
        if second.is_on_segment(p, eps) {
            add_candidate(p);
        }
    }
    for p in [second.first_point(), second.last_point()] {
        if first.is_on_segment(p, eps) {
            add_candidate(p);
        }
    }

    let mut result = SegmentIntersections::empty();
    if candidates.len() < 2 {
        result.intersections = candidates;
        return result;
    }

    let mut keyed: Vec<(T, Vector2<T>)> = candidates
        .into_iter()
        .map(|p| (param_on(first, p, eps), p))
        .collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut covered = vec![false; keyed.len()];
    let pieces = first.split_at(&keyed.iter().map(|k| k.1).collect::<Vec<_>>(), eps);
    for i in 0..keyed.len() - 1 {
        let (start, end) = (keyed[i].1, keyed[i + 1].1);
        let piece = pieces
            .iter()
            .find(|s| s.first_point().fuzzy_eq_eps(start, eps) && s.last_point().fuzzy_eq_eps(end, eps));

        if let Some(piece) = piece {
            let shared = [T::constant(0.25), T::half(), T::constant(0.75)]
                .iter()
                .all(|&t| second.is_on_segment(piece.param_point(t), eps));
            if shared {
                result.overlaps.push(*piece);
                covered[i] = true;
                covered[i + 1] = true;
            }
        }
    }

    result.intersections = keyed
        .into_iter()
        .zip(covered)
        .filter(|(_, c)| !c)
        .map(|(k, _)| k.1)
        .collect();

    result
}

/// Parameter of `point` on `seg` with the end points mapped exactly.
fn param_on<T: Real>(seg: &Segment<T>, point: Vector2<T>, eps: T) -> T {
    if point.fuzzy_eq_eps(seg.first_point(), eps) {
        T::zero()
    } else if point.fuzzy_eq_eps(seg.last_point(), eps) {
        T::one()
    } else {
        seg.param_of(point)
    }
}

/// Line against a non-circular curve by rotating the curve so the line is horizontal.
fn line_curve<T: Real>(line: &Line<T>, curve: &Segment<T>, eps: T) -> Vec<Vector2<T>> {
    let dir = line.direction();
    if dir.length() < eps {
        return if curve.is_on_segment(line.first_point, eps) {
            vec![line.first_point]
        } else {
            Vec::new()
        };
    }

    let angle = T::atan2(dir.y, dir.x);
    let rotated = curve.rotate_about(line.first_point, -angle);
    rotated
        .horizontal_hits(line.first_point.y, eps)
        .into_iter()
        .map(|t| curve.param_point(t))
        .filter(|&p| line.is_on_segment(p, eps))
        .collect()
}

/// Sub-piece of a segment being subdivided, `t0..t1` is the parameter range on the original.
#[derive(Debug, Clone, Copy)]
struct Piece<T> {
    seg: Segment<T>,
    t0: T,
    t1: T,
    bbox: BoundingBox<T>,
}

impl<T: Real> Piece<T> {
    fn new(seg: Segment<T>, t0: T, t1: T) -> Self {
        Self {
            seg,
            t0,
            t1,
            bbox: seg.bounding_box(),
        }
    }

    fn is_flat(&self, eps: T) -> bool {
        if self.seg.is_line() {
            return true;
        }
        let p0 = self.seg.first_point();
        let p1 = self.seg.last_point();
        let chord = Line::new(p0, p1);
        [T::constant(0.25), T::half(), T::constant(0.75)]
            .iter()
            .all(|&t| chord.is_on_segment(self.seg.param_point(t), eps))
    }

    fn halves(&self) -> (Self, Self) {
        let mid = (self.t0 + self.t1) / T::two();
        let parts = self.seg.split_at_params(&[T::half()]);
        (
            Self::new(parts[0], self.t0, mid),
            Self::new(parts[1], mid, self.t1),
        )
    }
}

const MAX_SUBDIVISION_STEPS: usize = 8192;
const MIN_PIECE_PARAM: f64 = 1e-12;

/// General curve/curve intersection by recursive subdivision followed by Newton refinement.
fn subdivision_intersects<T: Real>(
    first: &Segment<T>,
    second: &Segment<T>,
    eps: T,
) -> Vec<Vector2<T>> {
    let flat_tol = eps * T::constant(1e3);
    let mut stack = vec![(
        Piece::new(*first, T::zero(), T::one()),
        Piece::new(*second, T::zero(), T::one()),
    )];
    let mut candidates: Vec<(T, T)> = Vec::new();
    let mut steps = 0;
    let min_param = T::constant(MIN_PIECE_PARAM);

    while let Some((a, b)) = stack.pop() {
        steps += 1;
        if steps > MAX_SUBDIVISION_STEPS {
            crate::log::warn!(
                "subdivision step limit reached intersecting {:?} and {:?}",
                first,
                second
            );
            break;
        }

        let overlapping = if a.seg.is_line() {
            b.bbox
                .intersects_line(a.seg.first_point(), a.seg.last_point(), flat_tol)
        } else if b.seg.is_line() {
            a.bbox
                .intersects_line(b.seg.first_point(), b.seg.last_point(), flat_tol)
        } else {
            a.bbox.overlaps_eps(&b.bbox, flat_tol)
        };

        if !overlapping {
            continue;
        }

        let a_done = a.is_flat(flat_tol) || a.t1 - a.t0 < min_param;
        let b_done = b.is_flat(flat_tol) || b.t1 - b.t0 < min_param;

        if a_done && b_done {
            let (a0, a1) = (a.seg.first_point(), a.seg.last_point());
            let (b0, b1) = (b.seg.first_point(), b.seg.last_point());
            let hit = match line_line_intr(a0, a1, b0, b1, flat_tol) {
                LineLineIntr::TrueIntersect { seg1_t, seg2_t } => Some((seg1_t, seg2_t)),
                LineLineIntr::Overlapping { .. } => Some((T::half(), T::half())),
                _ => None,
            };
            if let Some((s, t)) = hit {
                let clamp = |v: T| {
                    num_traits::real::Real::min(T::one(), num_traits::real::Real::max(T::zero(), v))
                };
                candidates.push((
                    a.t0 + clamp(s) * (a.t1 - a.t0),
                    b.t0 + clamp(t) * (b.t1 - b.t0),
                ));
            }
            continue;
        }

        let split_a = !a_done && (b_done || a.bbox.max_extent() >= b.bbox.max_extent());
        if split_a {
            let (a_left, a_right) = a.halves();
            stack.push((a_left, b));
            stack.push((a_right, b));
        } else {
            let (b_left, b_right) = b.halves();
            stack.push((a, b_left));
            stack.push((a, b_right));
        }
    }

    let mut refined: Vec<(T, T, Vector2<T>)> = Vec::new();
    for (s, t) in candidates {
        let (s, t) = newton_refine(first, second, s, t);
        let pa = first.param_point(s);
        let pb = second.param_point(t);
        if pa.distance_to(pb) >= eps {
            continue;
        }

        let p = pa.lerp(pb, T::half());
        let merge_tol = T::constant(1e-7);
        if !refined
            .iter()
            .any(|r| (r.0 - s).abs() < merge_tol || r.2.fuzzy_eq_eps(p, eps))
        {
            refined.push((s, t, p));
        }
    }

    refined.into_iter().map(|r| r.2).collect()
}

/// Newton iteration on `first(s) - second(t) = 0`.
fn newton_refine<T: Real>(first: &Segment<T>, second: &Segment<T>, s: T, t: T) -> (T, T) {
    let clamp =
        |v: T| num_traits::real::Real::min(T::one(), num_traits::real::Real::max(T::zero(), v));
    let (mut s, mut t) = (s, t);
    for _ in 0..12 {
        let f = first.param_point(s) - second.param_point(t);
        let da = first.derivative_at(s);
        let db = second.derivative_at(t);
        let det = da.perp_dot(db);
        if det.fuzzy_eq_zero() {
            break;
        }
        let ds = -f.perp_dot(db) / det;
        let dt = da.perp_dot(f) / det;
        s = clamp(s + ds);
        t = clamp(t + dt);
        if ds.abs() < T::constant(1e-15) && dt.abs() < T::constant(1e-15) {
            break;
        }
    }
    (s, t)
}

/// Snaps points to segment end points, drops points covered by overlaps and removes duplicates.
fn finalize<T: Real>(
    result: &mut SegmentIntersections<T>,
    first: &Segment<T>,
    second: &Segment<T>,
    eps: T,
) {
    let ends = [
        first.first_point(),
        first.last_point(),
        second.first_point(),
        second.last_point(),
    ];
    let snap = |p: Vector2<T>| {
        ends.iter()
            .copied()
            .find(|e| e.fuzzy_eq_eps(p, eps))
            .unwrap_or(p)
    };

    for overlap in result.overlaps.iter_mut() {
        let start = snap(overlap.first_point());
        let end = snap(overlap.last_point());
        *overlap = overlap.with_endpoints(start, end);
    }

    let mut points: Vec<Vector2<T>> = Vec::with_capacity(result.intersections.len());
    for p in result.intersections.iter().map(|&p| snap(p)) {
        if points.iter().any(|q| q.fuzzy_eq_eps(p, eps)) {
            continue;
        }
        if result.overlaps.iter().any(|o| {
            o.first_point().fuzzy_eq_eps(p, eps) || o.last_point().fuzzy_eq_eps(p, eps)
        }) {
            continue;
        }
        points.push(p);
    }
    result.intersections = points;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq};
    use crate::segment::{CubicBezier, EllipseArc, QuadraticBezier};

    const EPS: f64 = 1e-9;

    #[test]
    fn collinear_lines_overlap() {
        let a = Segment::line(vec2(0.0, 0.0), vec2(2.0, 0.0));
        let b = Segment::line(vec2(3.0, 0.0), vec2(1.0, 0.0));
        let r = find_intersections_and_overlaps(&a, &b, EPS);
        assert!(r.intersections.is_empty());
        assert_eq!(r.overlaps.len(), 1);
        assert_eq!(r.overlaps[0].first_point(), vec2(1.0, 0.0));
        assert_eq!(r.overlaps[0].last_point(), vec2(2.0, 0.0));
    }

    #[test]
    fn lines_touching_at_end() {
        let a = Segment::line(vec2(0.0, 0.0), vec2(1.0, 0.0));
        let b = Segment::line(vec2(1.0, 0.0), vec2(1.0, 1.0));
        let r = find_intersections_and_overlaps(&a, &b, EPS);
        assert_eq!(r.intersections, vec![vec2(1.0, 0.0)]);
    }

    #[test]
    fn line_through_arc() {
        let arc = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let line = Segment::line(vec2(-2.0, 0.5), vec2(2.0, 0.5));
        let r = find_intersections_and_overlaps(&line, &arc, EPS);
        assert_eq!(r.intersections.len(), 2);
        for p in &r.intersections {
            assert!(p.length().fuzzy_eq(1.0));
            assert!(p.y.fuzzy_eq(0.5));
        }
    }

    #[test]
    fn co_circular_arcs_overlap() {
        let a = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let b = Segment::arc(vec2(0.0, 1.0), vec2(0.0, -1.0), vec2(0.0, 0.0), false);
        let r = find_intersections_and_overlaps(&a, &b, EPS);
        assert_eq!(r.overlaps.len(), 1);
        assert!(r.overlaps[0].first_point().fuzzy_eq(vec2(0.0, 1.0)));
        assert!(r.overlaps[0].last_point().fuzzy_eq(vec2(-1.0, 0.0)));
        assert!(r.intersections.is_empty());
    }

    #[test]
    fn co_circular_arcs_touching() {
        let a = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let b = Segment::arc(vec2(-1.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 0.0), false);
        let r = find_intersections_and_overlaps(&a, &b, EPS);
        assert!(r.overlaps.is_empty());
        assert_eq!(r.intersections.len(), 2);
    }

    #[test]
    fn line_through_cubic() {
        let c = Segment::from(CubicBezier::new(
            vec2(0.0, 0.0),
            vec2(1.0, 3.0),
            vec2(3.0, -3.0),
            vec2(4.0, 0.0),
        ));
        let line = Segment::line(vec2(-1.0, 0.0), vec2(5.0, 0.0));
        let r = find_intersections_and_overlaps(&line, &c, EPS);
        assert_eq!(r.intersections.len(), 3);
        assert!(r.intersections.iter().any(|p| p.fuzzy_eq(vec2(2.0, 0.0))));
    }

    #[test]
    fn ellipse_and_quadratic_cross() {
        let e = Segment::from(EllipseArc::new(
            vec2(2.0, 0.0),
            vec2(-2.0, 0.0),
            vec2(0.0, 0.0),
            2.0,
            1.0,
            0.0,
            false,
        ));
        let q = Segment::from(QuadraticBezier::new(
            vec2(-3.0, 2.0),
            vec2(0.0, -2.0),
            vec2(3.0, 2.0),
        ));
        let r = find_intersections_and_overlaps(&e, &q, EPS);
        assert_eq!(r.intersections.len(), 2);
        for p in &r.intersections {
            assert!(e.is_on_segment(*p, 1e-8));
            assert!(q.is_on_segment(*p, 1e-8));
        }
    }

    #[test]
    fn same_ellipse_overlaps() {
        let e = EllipseArc::new(
            vec2(2.0, 0.0),
            vec2(-2.0, 0.0),
            vec2(0.0, 0.0),
            2.0,
            1.0,
            0.0,
            false,
        );
        let half = Segment::from(e).split_at(&[vec2(0.0, 1.0)], EPS);
        let r = find_intersections_and_overlaps(&Segment::from(e), &half[1], EPS);
        assert_eq!(r.overlaps.len(), 1);
        assert!(r.overlaps[0].first_point().fuzzy_eq(vec2(0.0, 1.0)));
    }
}
