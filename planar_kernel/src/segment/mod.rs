//! Segment primitives and the pairwise intersection oracle.
//!
//! Every segment kind implements [Curve], the [Segment] enum dispatches to the concrete kind. All
//! segments are parameterized over `t` in `[0, 1]` from `first_point` to `last_point`.
mod arc;
mod bezier;
mod ellipse_arc;
mod intersect;
mod line;

pub use arc::Arc;
pub use bezier::{CubicBezier, QuadraticBezier};
pub use ellipse_arc::EllipseArc;
pub use intersect::{find_intersections_and_overlaps, SegmentIntersections};
pub use line::Line;

use crate::{
    bounding_box::BoundingBox,
    core::{math::Vector2, traits::Real},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometric queries and transforms shared by every segment kind.
pub trait Curve<T>: Clone
where
    T: Real,
{
    fn first_point(&self) -> Vector2<T>;

    fn last_point(&self) -> Vector2<T>;

    /// Point at parameter `t`, `0` gives `first_point` and `1` gives `last_point`.
    fn param_point(&self, t: T) -> Vector2<T>;

    #[inline]
    fn mid_point(&self) -> Vector2<T> {
        self.param_point(T::half())
    }

    /// Derivative with respect to the parameter at `t`.
    fn derivative_at(&self, t: T) -> Vector2<T>;

    /// Parameter of `point`, which is assumed to lie on (or very near) the segment.
    fn param_of(&self, point: Vector2<T>) -> T;

    fn bounding_box(&self) -> BoundingBox<T>;

    /// True if `point` lies on the segment within distance `eps`.
    fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool;

    fn length(&self) -> T;

    /// Signed area contribution `∫(x dy - y dx) / 2` along the segment.
    ///
    /// Summing the contributions of a closed loop gives its signed area (positive for counter
    /// clockwise).
    fn signed_area_contribution(&self) -> T;

    /// Parameters where the segment crosses the horizontal line at height `y`.
    fn horizontal_hits(&self, y: T, eps: T) -> Vec<T>;

    /// Same geometry traversed in the opposite direction.
    fn reverse(&self) -> Self;

    /// Splits at strictly increasing parameters in `(0, 1)`, returning `params.len() + 1` pieces.
    fn split_at_params(&self, params: &[T]) -> Vec<Self>;

    /// Same underlying curve with replaced end points.
    fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self;

    fn translate(&self, offset: Vector2<T>) -> Self;

    fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self;

    fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self;
}

/// A single segment of a stroke.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment<T = f64> {
    Line(Line<T>),
    Arc(Arc<T>),
    EllipseArc(EllipseArc<T>),
    QuadraticBezier(QuadraticBezier<T>),
    CubicBezier(CubicBezier<T>),
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Segment::Line($s) => $e,
            Segment::Arc($s) => $e,
            Segment::EllipseArc($s) => $e,
            Segment::QuadraticBezier($s) => $e,
            Segment::CubicBezier($s) => $e,
        }
    };
}

macro_rules! dispatch_wrap {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Segment::Line($s) => Segment::Line($e),
            Segment::Arc($s) => Segment::Arc($e),
            Segment::EllipseArc($s) => Segment::EllipseArc($e),
            Segment::QuadraticBezier($s) => Segment::QuadraticBezier($e),
            Segment::CubicBezier($s) => Segment::CubicBezier($e),
        }
    };
}

macro_rules! dispatch_vec {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Segment::Line($s) => $e.into_iter().map(Segment::Line).collect(),
            Segment::Arc($s) => $e.into_iter().map(Segment::Arc).collect(),
            Segment::EllipseArc($s) => $e.into_iter().map(Segment::EllipseArc).collect(),
            Segment::QuadraticBezier($s) => $e.into_iter().map(Segment::QuadraticBezier).collect(),
            Segment::CubicBezier($s) => $e.into_iter().map(Segment::CubicBezier).collect(),
        }
    };
}

impl<T> Curve<T> for Segment<T>
where
    T: Real,
{
    #[inline]
    fn first_point(&self) -> Vector2<T> {
        dispatch!(self, s => s.first_point())
    }

    #[inline]
    fn last_point(&self) -> Vector2<T> {
        dispatch!(self, s => s.last_point())
    }

    fn param_point(&self, t: T) -> Vector2<T> {
        dispatch!(self, s => s.param_point(t))
    }

    fn derivative_at(&self, t: T) -> Vector2<T> {
        dispatch!(self, s => s.derivative_at(t))
    }

    fn param_of(&self, point: Vector2<T>) -> T {
        dispatch!(self, s => s.param_of(point))
    }

    fn bounding_box(&self) -> BoundingBox<T> {
        dispatch!(self, s => s.bounding_box())
    }

    fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool {
        dispatch!(self, s => s.is_on_segment(point, eps))
    }

    fn length(&self) -> T {
        dispatch!(self, s => s.length())
    }

    fn signed_area_contribution(&self) -> T {
        dispatch!(self, s => s.signed_area_contribution())
    }

    fn horizontal_hits(&self, y: T, eps: T) -> Vec<T> {
        dispatch!(self, s => s.horizontal_hits(y, eps))
    }

    fn reverse(&self) -> Self {
        dispatch_wrap!(self, s => s.reverse())
    }

    fn split_at_params(&self, params: &[T]) -> Vec<Self> {
        dispatch_vec!(self, s => s.split_at_params(params))
    }

    fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self {
        dispatch_wrap!(self, s => s.with_endpoints(first, last))
    }

    fn translate(&self, offset: Vector2<T>) -> Self {
        dispatch_wrap!(self, s => s.translate(offset))
    }

    fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        dispatch_wrap!(self, s => s.rotate_about(origin, angle))
    }

    fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        dispatch_wrap!(self, s => s.scale_about(origin, factor))
    }
}

impl<T> Segment<T>
where
    T: Real,
{
    /// Shorthand for a line segment.
    #[inline]
    pub fn line(first_point: Vector2<T>, last_point: Vector2<T>) -> Self {
        Segment::Line(Line::new(first_point, last_point))
    }

    /// Shorthand for a circular arc segment.
    #[inline]
    pub fn arc(
        first_point: Vector2<T>,
        last_point: Vector2<T>,
        center: Vector2<T>,
        clockwise: bool,
    ) -> Self {
        Segment::Arc(Arc::new(first_point, last_point, center, clockwise))
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }

    /// Unit tangent direction leaving `first_point`.
    pub fn start_direction(&self) -> Vector2<T> {
        self.derivative_at(T::zero()).normalize()
    }

    /// Unit tangent direction arriving at `last_point`.
    pub fn end_direction(&self) -> Vector2<T> {
        self.derivative_at(T::one()).normalize()
    }

    /// Splits the segment at the given points.
    ///
    /// Points within `eps` of either end point are ignored, duplicates are merged. The returned
    /// pieces are ordered from `first_point` and their shared end points are exactly the given
    /// points (so pieces produced by different segments at the same point connect exactly).
    pub fn split_at(&self, points: &[Vector2<T>], eps: T) -> Vec<Self> {
        let first = self.first_point();
        let last = self.last_point();
        let mut cuts: Vec<(T, Vector2<T>)> = points
            .iter()
            .filter(|p| !p.fuzzy_eq_eps(first, eps) && !p.fuzzy_eq_eps(last, eps))
            .map(|&p| (self.param_of(p), p))
            .filter(|&(t, _)| t > T::zero() && t < T::one())
            .collect();

        if cuts.is_empty() {
            return vec![*self];
        }

        cuts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        cuts.dedup_by(|a, b| a.1.fuzzy_eq_eps(b.1, eps));

        let params: Vec<T> = cuts.iter().map(|c| c.0).collect();
        let mut pieces = self.split_at_params(&params);
        for (i, piece) in pieces.iter_mut().enumerate() {
            let start = if i == 0 { first } else { cuts[i - 1].1 };
            let end = if i == cuts.len() { last } else { cuts[i].1 };
            *piece = piece.with_endpoints(start, end);
        }

        pieces
    }

    /// True if both segments describe the same geometry within `eps`, in either direction.
    pub fn is_same(&self, other: &Self, eps: T) -> bool {
        let forward = self.first_point().fuzzy_eq_eps(other.first_point(), eps)
            && self.last_point().fuzzy_eq_eps(other.last_point(), eps);
        let reversed = self.first_point().fuzzy_eq_eps(other.last_point(), eps)
            && self.last_point().fuzzy_eq_eps(other.first_point(), eps);
        if !forward && !reversed {
            return false;
        }

        if let (Segment::Line(_), Segment::Line(_)) = (self, other) {
            return true;
        }

        let samples = [T::constant(0.25), T::half(), T::constant(0.75)];
        samples.iter().all(|&t| {
            self.is_on_segment(other.param_point(t), eps)
                && other.is_on_segment(self.param_point(t), eps)
        })
    }
}

macro_rules! impl_from_segment_kind {
    ($($kind:ident),*) => {
        $(
            impl<T> From<$kind<T>> for Segment<T> {
                #[inline]
                fn from(value: $kind<T>) -> Self {
                    Segment::$kind(value)
                }
            }
        )*
    };
}

impl_from_segment_kind!(Line, Arc, EllipseArc, QuadraticBezier, CubicBezier);

/// Five point Gauss-Legendre quadrature of `f` over `[a, b]`.
///
/// Exact for polynomials up to degree 9.
pub(crate) fn gauss_legendre<T, F>(f: F, a: T, b: T) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    const NODES: [f64; 5] = [
        0.0,
        -0.538_469_310_105_683_1,
        0.538_469_310_105_683_1,
        -0.906_179_845_938_664,
        0.906_179_845_938_664,
    ];
    const WEIGHTS: [f64; 5] = [
        0.568_888_888_888_888_9,
        0.478_628_670_499_366_5,
        0.478_628_670_499_366_5,
        0.236_926_885_056_189_1,
        0.236_926_885_056_189_1,
    ];

    let half_width = (b - a) / T::two();
    let center = (a + b) / T::two();
    NODES
        .iter()
        .zip(WEIGHTS.iter())
        .fold(T::zero(), |acc, (&x, &w)| {
            acc + T::constant(w) * f(center + half_width * T::constant(x))
        })
        * half_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq};

    #[test]
    fn split_line_snaps_to_points() {
        let seg = Segment::line(vec2(0.0, 0.0), vec2(4.0, 0.0));
        let pieces = seg.split_at(&[vec2(3.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 0.0)], 1e-9);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].last_point(), vec2(1.0, 0.0));
        assert_eq!(pieces[1].first_point(), vec2(1.0, 0.0));
        assert_eq!(pieces[1].last_point(), vec2(3.0, 0.0));
        assert_eq!(pieces[2].last_point(), vec2(4.0, 0.0));
    }

    #[test]
    fn split_arc_keeps_circle() {
        let seg = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let pieces = seg.split_at(&[vec2(0.0, 1.0)], 1e-9);
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(|p| p.length()).sum();
        assert!(total.fuzzy_eq(std::f64::consts::PI));
        assert!(pieces[0].mid_point().fuzzy_eq(vec2(0.5f64.sqrt(), 0.5f64.sqrt())));
    }

    #[test]
    fn same_segments() {
        let a = Segment::line(vec2(0.0, 0.0), vec2(1.0, 1.0));
        assert!(a.is_same(&a.reverse(), 1e-9));
        let upper = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let lower = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), true);
        assert!(upper.is_same(&upper.reverse(), 1e-9));
        assert!(!upper.is_same(&lower, 1e-9));
        assert!(!a.is_same(&upper, 1e-9));
    }

    #[test]
    fn closed_area_from_contributions() {
        // unit circle from two half arcs
        let upper = Segment::arc(vec2(1.0, 0.0), vec2(-1.0, 0.0), vec2(0.0, 0.0), false);
        let lower = Segment::arc(vec2(-1.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 0.0), false);
        let area = upper.signed_area_contribution() + lower.signed_area_contribution();
        assert!(area.fuzzy_eq(std::f64::consts::PI));

        let e = EllipseArc::new(
            vec2(2.0, 0.0),
            vec2(-2.0, 0.0),
            vec2(0.0, 0.0),
            2.0,
            1.0,
            0.0,
            false,
        );
        let closing = Segment::line(vec2(-2.0, 0.0), vec2(2.0, 0.0));
        let half_ellipse = Segment::from(e).signed_area_contribution()
            + closing.signed_area_contribution();
        assert!(half_ellipse.fuzzy_eq(std::f64::consts::PI));
    }

    #[test]
    fn ellipse_queries() {
        let e = EllipseArc::new(
            vec2(2.0, 0.0),
            vec2(-2.0, 0.0),
            vec2(0.0, 0.0),
            2.0,
            1.0,
            0.0,
            false,
        );
        assert!(e.param_point(0.5).fuzzy_eq(vec2(0.0, 1.0)));
        assert!(e.is_on_segment(vec2(0.0, 1.0), 1e-9));
        assert!(!e.is_on_segment(vec2(0.0, -1.0), 1e-9));
        let bb = e.bounding_box();
        assert!(bb.max_y.fuzzy_eq(1.0));
        assert!(bb.min_y.fuzzy_eq(0.0));
        let hits = e.horizontal_hits(0.5, 1e-9);
        assert_eq!(hits.len(), 2);
    }
}
