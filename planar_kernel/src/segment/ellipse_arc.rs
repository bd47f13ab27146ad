use super::{gauss_legendre, Curve};
use crate::{
    bounding_box::BoundingBox,
    core::{
        math::{angle_is_within_sweep_eps, normalize_radians, sweep_angle, Vector2},
        traits::Real,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Elliptical arc going from `first_point` to `last_point`.
///
/// The ellipse is centred at `center`, its major axis is rotated by `tilt_angle` (radians) from
/// the x axis. Direction is given by `clockwise` in world space. Angles used internally are the
/// parametric (eccentric) angles of the ellipse, not polar angles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EllipseArc<T = f64> {
    pub first_point: Vector2<T>,
    pub last_point: Vector2<T>,
    pub center: Vector2<T>,
    pub major_radius: T,
    pub minor_radius: T,
    pub tilt_angle: T,
    pub clockwise: bool,
}

impl<T> EllipseArc<T>
where
    T: Real,
{
    #[inline]
    pub fn new(
        first_point: Vector2<T>,
        last_point: Vector2<T>,
        center: Vector2<T>,
        major_radius: T,
        minor_radius: T,
        tilt_angle: T,
        clockwise: bool,
    ) -> Self {
        Self {
            first_point,
            last_point,
            center,
            major_radius,
            minor_radius,
            tilt_angle,
            clockwise,
        }
    }

    /// Parametric angle of `point` (assumed on or near the ellipse).
    pub fn angle_of(&self, point: Vector2<T>) -> T {
        let local = (point - self.center).rotate_about(Vector2::zero(), -self.tilt_angle);
        T::atan2(local.y / self.minor_radius, local.x / self.major_radius)
    }

    /// Point on the full ellipse at parametric angle `theta`.
    pub fn point_at_angle(&self, theta: T) -> Vector2<T> {
        let (s, c) = theta.sin_cos();
        let local = Vector2::new(self.major_radius * c, self.minor_radius * s);
        self.center + local.rotate_about(Vector2::zero(), self.tilt_angle)
    }

    /// Derivative of [EllipseArc::point_at_angle] with respect to `theta`.
    fn angle_derivative(&self, theta: T) -> Vector2<T> {
        let (s, c) = theta.sin_cos();
        Vector2::new(-self.major_radius * s, self.minor_radius * c)
            .rotate_about(Vector2::zero(), self.tilt_angle)
    }

    #[inline]
    pub fn start_angle(&self) -> T {
        self.angle_of(self.first_point)
    }

    #[inline]
    pub fn end_angle(&self) -> T {
        self.angle_of(self.last_point)
    }

    /// Signed parametric sweep angle, negative for clockwise arcs.
    #[inline]
    pub fn sweep_angle(&self) -> T {
        sweep_angle(self.start_angle(), self.end_angle(), self.clockwise)
    }

    fn contains_angle(&self, theta: T, eps: T) -> bool {
        let angle_eps = eps / self.minor_radius;
        angle_is_within_sweep_eps(theta, self.start_angle(), self.sweep_angle(), angle_eps)
    }

    fn param_of_angle(&self, theta: T) -> T {
        let sweep = self.sweep_angle();
        let total = sweep.abs();
        let delta = if sweep > T::zero() {
            normalize_radians(theta - self.start_angle())
        } else {
            normalize_radians(self.start_angle() - theta)
        };

        if delta <= total {
            return delta / total;
        }

        let past_end = delta - total;
        let before_start = T::tau() - delta;
        if before_start < past_end {
            -before_start / total
        } else {
            delta / total
        }
    }

    /// Parametric angle of the closest point on the full ellipse to `point`.
    fn closest_angle(&self, point: Vector2<T>) -> T {
        let mut theta = self.angle_of(point);
        for _ in 0..4 {
            let p = self.point_at_angle(theta);
            let d1 = self.angle_derivative(theta);
            let d2 = self.center - p;
            let diff = p - point;
            let f = diff.dot(d1);
            let df = d1.dot(d1) + diff.dot(d2);
            if df.fuzzy_eq_zero() {
                break;
            }
            theta = theta - f / df;
        }
        theta
    }

    /// True if both arcs lie on the same ellipse.
    pub fn is_co_elliptical(&self, other: &Self, eps: T) -> bool {
        if !self.center.fuzzy_eq_eps(other.center, eps)
            || !self.major_radius.fuzzy_eq_eps(other.major_radius, eps)
            || !self.minor_radius.fuzzy_eq_eps(other.minor_radius, eps)
        {
            return false;
        }

        if self.major_radius.fuzzy_eq_eps(self.minor_radius, eps) {
            // circular, tilt has no meaning
            return true;
        }

        let tilt_diff = normalize_radians(self.tilt_angle - other.tilt_angle);
        let tilt_eps = eps / self.major_radius;
        let half_turns = tilt_diff / T::pi();
        (half_turns - half_turns.round()).abs() * T::pi() < tilt_eps
    }
}

impl<T> Curve<T> for EllipseArc<T>
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
        self.point_at_angle(self.start_angle() + t * self.sweep_angle())
    }

    fn derivative_at(&self, t: T) -> Vector2<T> {
        let sweep = self.sweep_angle();
        self.angle_derivative(self.start_angle() + t * sweep)
            .scale(sweep)
    }

    fn param_of(&self, point: Vector2<T>) -> T {
        self.param_of_angle(self.closest_angle(point))
    }

    fn bounding_box(&self) -> BoundingBox<T> {
        let mut bb = BoundingBox::from_corners(self.first_point, self.last_point);
        let (st, ct) = self.tilt_angle.sin_cos();
        let a = self.major_radius;
        let b = self.minor_radius;
        let theta_x = T::atan2(-b * st, a * ct);
        let theta_y = T::atan2(b * ct, a * st);
        let start = self.start_angle();
        let sweep = self.sweep_angle();
        for theta in [theta_x, theta_x + T::pi(), theta_y, theta_y + T::pi()] {
            if angle_is_within_sweep_eps(theta, start, sweep, T::zero()) {
                bb = bb.add_point(self.point_at_angle(theta));
            }
        }
        bb
    }

    fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool {
        if point.fuzzy_eq_eps(self.first_point, eps) || point.fuzzy_eq_eps(self.last_point, eps)
        {
            return true;
        }

        let theta = self.closest_angle(point);
        self.point_at_angle(theta).distance_to(point) < eps && self.contains_angle(theta, eps)
    }

    fn length(&self) -> T {
        let pieces = 16;
        let step = T::one() / T::constant(pieces as f64);
        (0..pieces)
            .map(|i| {
                let a = T::constant(i as f64) * step;
                gauss_legendre(|t| self.derivative_at(t).length(), a, a + step)
            })
            .fold(T::zero(), |acc, l| acc + l)
    }

    fn signed_area_contribution(&self) -> T {
        (self.center.perp_dot(self.last_point - self.first_point)
            + self.major_radius * self.minor_radius * self.sweep_angle())
            / T::two()
    }

    fn horizontal_hits(&self, y: T, eps: T) -> Vec<T> {
        // y(theta) = cy + A cos(theta) + B sin(theta) = cy + R cos(theta - phi)
        let (st, ct) = self.tilt_angle.sin_cos();
        let a_coeff = self.major_radius * st;
        let b_coeff = self.minor_radius * ct;
        let r = (a_coeff * a_coeff + b_coeff * b_coeff).sqrt();
        let d = y - self.center.y;
        if d.abs() > r + eps || r.fuzzy_eq_zero() {
            return Vec::new();
        }

        let phi = T::atan2(b_coeff, a_coeff);
        let cos_arg = num_traits::real::Real::min(
            T::one(),
            num_traits::real::Real::max(-T::one(), d / r),
        );
        let delta = cos_arg.acos();
        let candidates = if delta.fuzzy_eq_zero_eps(eps) {
            vec![phi]
        } else {
            vec![phi + delta, phi - delta]
        };

        candidates
            .into_iter()
            .filter(|&theta| self.contains_angle(theta, T::zero()))
            .map(|theta| {
                let t = self.param_of_angle(theta);
                num_traits::real::Real::min(T::one(), num_traits::real::Real::max(T::zero(), t))
            })
            .collect()
    }

    fn reverse(&self) -> Self {
        Self {
            first_point: self.last_point,
            last_point: self.first_point,
            clockwise: !self.clockwise,
            ..*self
        }
    }

    fn split_at_params(&self, params: &[T]) -> Vec<Self> {
        let mut result = Vec::with_capacity(params.len() + 1);
        let mut start = self.first_point;
        for &t in params {
            let p = self.param_point(t);
            result.push(self.with_endpoints(start, p));
            start = p;
        }
        result.push(self.with_endpoints(start, self.last_point));
        result
    }

    fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self {
        Self {
            first_point: first,
            last_point: last,
            ..*self
        }
    }

    fn translate(&self, offset: Vector2<T>) -> Self {
        Self {
            first_point: self.first_point + offset,
            last_point: self.last_point + offset,
            center: self.center + offset,
            ..*self
        }
    }

    fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        Self {
            first_point: self.first_point.rotate_about(origin, angle),
            last_point: self.last_point.rotate_about(origin, angle),
            center: self.center.rotate_about(origin, angle),
            tilt_angle: self.tilt_angle + angle,
            ..*self
        }
    }

    fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        Self {
            first_point: self.first_point.scale_about(origin, factor),
            last_point: self.last_point.scale_about(origin, factor),
            center: self.center.scale_about(origin, factor),
            major_radius: self.major_radius * factor.abs(),
            minor_radius: self.minor_radius * factor.abs(),
            ..*self
        }
    }
}
