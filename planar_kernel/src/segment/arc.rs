use super::Curve;
use crate::{
    bounding_box::BoundingBox,
    core::{
        math::{
            angle, angle_is_within_sweep_eps, is_left, normalize_radians, point_on_circle,
            sweep_angle, Vector2,
        },
        traits::Real,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Circular arc going from `first_point` to `last_point` around `center`.
///
/// The radius is the distance from `center` to `first_point`. An arc is never a full circle,
/// closed circles are built from two arcs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arc<T = f64> {
    pub first_point: Vector2<T>,
    pub last_point: Vector2<T>,
    pub center: Vector2<T>,
    pub clockwise: bool,
}

impl<T> Arc<T>
where
    T: Real,
{
    #[inline]
    pub fn new(
        first_point: Vector2<T>,
        last_point: Vector2<T>,
        center: Vector2<T>,
        clockwise: bool,
    ) -> Self {
        Self {
            first_point,
            last_point,
            center,
            clockwise,
        }
    }

    /// Arc starting at `first_point`, passing through `through_point` and ending at `last_point`.
    ///
    /// Returns `None` if the three points are collinear.
    pub fn from_three_points(
        first_point: Vector2<T>,
        through_point: Vector2<T>,
        last_point: Vector2<T>,
    ) -> Option<Self> {
        let (a, b, c) = (first_point, through_point, last_point);
        let d = T::two() * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.fuzzy_eq_zero() {
            return None;
        }

        let a2 = a.length_squared();
        let b2 = b.length_squared();
        let c2 = c.length_squared();
        let center = Vector2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );

        Some(Self::new(
            first_point,
            last_point,
            center,
            is_left(first_point, last_point, through_point),
        ))
    }

    #[inline]
    pub fn radius(&self) -> T {
        self.first_point.distance_to(self.center)
    }

    #[inline]
    pub fn start_angle(&self) -> T {
        angle(self.center, self.first_point)
    }

    #[inline]
    pub fn end_angle(&self) -> T {
        angle(self.center, self.last_point)
    }

    /// Signed sweep angle, negative for clockwise arcs.
    #[inline]
    pub fn sweep_angle(&self) -> T {
        sweep_angle(self.start_angle(), self.end_angle(), self.clockwise)
    }

    /// True if the polar angle `test_angle` (around the center) falls within the arc sweep.
    ///
    /// `eps` is a distance, converted to an angle using the radius.
    pub fn contains_angle(&self, test_angle: T, eps: T) -> bool {
        let angle_eps = eps / self.radius();
        angle_is_within_sweep_eps(test_angle, self.start_angle(), self.sweep_angle(), angle_eps)
    }

    /// True if both arcs lie on the same circle (same center and radius).
    pub fn is_co_circular(&self, other: &Self, eps: T) -> bool {
        self.center.fuzzy_eq_eps(other.center, eps)
            && self.radius().fuzzy_eq_eps(other.radius(), eps)
    }
}

impl<T> Curve<T> for Arc<T>
where
    T: Real,
{
    #[inline]
    fn first_point(&self) -> Vector2<T> {
        self.first_point
    }

    #[inline]
    fn last_point(&self) -> Vector2<T> {
        self.last_point
    }

    fn param_point(&self, t: T) -> Vector2<T> {
        point_on_circle(
            self.radius(),
            self.center,
            self.start_angle() + t * self.sweep_angle(),
        )
    }

    fn derivative_at(&self, t: T) -> Vector2<T> {
        let sweep = self.sweep_angle();
        let (s, c) = (self.start_angle() + t * sweep).sin_cos();
        Vector2::new(-s, c).scale(self.radius() * sweep)
    }

    fn param_of(&self, point: Vector2<T>) -> T {
        let sweep = self.sweep_angle();
        let total = sweep.abs();
        let a = angle(self.center, point);
        let delta = if sweep > T::zero() {
            normalize_radians(a - self.start_angle())
        } else {
            normalize_radians(self.start_angle() - a)
        };

        if delta <= total {
            return delta / total;
        }

        // outside of the sweep, report relative to the nearest end
        let past_end = delta - total;
        let before_start = T::tau() - delta;
        if before_start < past_end {
            -before_start / total
        } else {
            delta / total
        }
    }

    fn bounding_box(&self) -> BoundingBox<T> {
        let mut bb = BoundingBox::from_corners(self.first_point, self.last_point);
        let r = self.radius();
        let start = self.start_angle();
        let sweep = self.sweep_angle();
        for k in 0..4 {
            let axis_angle = T::constant(k as f64) * T::pi() / T::two();
            if angle_is_within_sweep_eps(axis_angle, start, sweep, T::zero()) {
                bb = bb.add_point(point_on_circle(r, self.center, axis_angle));
            }
        }
        bb
    }

    fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool {
        if !(point.distance_to(self.center) - self.radius()).fuzzy_eq_zero_eps(eps) {
            return false;
        }

        point.fuzzy_eq_eps(self.first_point, eps)
            || point.fuzzy_eq_eps(self.last_point, eps)
            || self.contains_angle(angle(self.center, point), eps)
    }

    #[inline]
    fn length(&self) -> T {
        self.radius() * self.sweep_angle().abs()
    }

    fn signed_area_contribution(&self) -> T {
        let r = self.radius();
        (self.center.perp_dot(self.last_point - self.first_point) + r * r * self.sweep_angle())
            / T::two()
    }

    fn horizontal_hits(&self, y: T, eps: T) -> Vec<T> {
        let r = self.radius();
        let dy = y - self.center.y;
        if dy.abs() > r + eps {
            return Vec::new();
        }

        let dx = num_traits::real::Real::max(r * r - dy * dy, T::zero()).sqrt();
        let candidates = if dx < eps {
            vec![Vector2::new(self.center.x, y)]
        } else {
            vec![
                Vector2::new(self.center.x + dx, y),
                Vector2::new(self.center.x - dx, y),
            ]
        };

        candidates
            .into_iter()
            .filter(|&p| self.contains_angle(angle(self.center, p), T::zero()))
            .map(|p| {
                let t = self.param_of(p);
                num_traits::real::Real::min(T::one(), num_traits::real::Real::max(T::zero(), t))
            })
            .collect()
    }

    fn reverse(&self) -> Self {
        Self::new(self.last_point, self.first_point, self.center, !self.clockwise)
    }

    fn split_at_params(&self, params: &[T]) -> Vec<Self> {
        let mut result = Vec::with_capacity(params.len() + 1);
        let mut start = self.first_point;
        for &t in params {
            let p = self.param_point(t);
            result.push(Self::new(start, p, self.center, self.clockwise));
            start = p;
        }
        result.push(Self::new(
            start,
            self.last_point,
            self.center,
            self.clockwise,
        ));
        result
    }

    fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self {
        Self::new(first, last, self.center, self.clockwise)
    }

    fn translate(&self, offset: Vector2<T>) -> Self {
        Self::new(
            self.first_point + offset,
            self.last_point + offset,
            self.center + offset,
            self.clockwise,
        )
    }

    fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        Self::new(
            self.first_point.rotate_about(origin, angle),
            self.last_point.rotate_about(origin, angle),
            self.center.rotate_about(origin, angle),
            self.clockwise,
        )
    }

    fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        Self::new(
            self.first_point.scale_about(origin, factor),
            self.last_point.scale_about(origin, factor),
            self.center.scale_about(origin, factor),
            self.clockwise,
        )
    }
}
