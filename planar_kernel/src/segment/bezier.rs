use super::{gauss_legendre, Curve};
use crate::{
    bounding_box::BoundingBox,
    core::{
        math::{cubic_roots, quadratic_roots, Vector2},
        traits::Real,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quadratic Bezier curve with a single control point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadraticBezier<T = f64> {
    pub first_point: Vector2<T>,
    pub control_point: Vector2<T>,
    pub last_point: Vector2<T>,
}

impl<T> QuadraticBezier<T>
where
    T: Real,
{
    #[inline]
    pub fn new(first_point: Vector2<T>, control_point: Vector2<T>, last_point: Vector2<T>) -> Self {
        Self {
            first_point,
            control_point,
            last_point,
        }
    }

    #[inline]
    fn points(&self) -> [Vector2<T>; 3] {
        [self.first_point, self.control_point, self.last_point]
    }

    #[inline]
    fn from_points(points: [Vector2<T>; 3]) -> Self {
        Self::new(points[0], points[1], points[2])
    }

    /// Power basis coefficients `(a, b, c)` of one coordinate, `a t^2 + b t + c`.
    fn power_coefficients(v0: T, v1: T, v2: T) -> [T; 3] {
        [v0 - T::two() * v1 + v2, T::two() * (v1 - v0), v0]
    }

    fn axis_roots(v0: T, v1: T, v2: T, value: T) -> Vec<T> {
        let [a, b, c] = Self::power_coefficients(v0, v1, v2);
        quadratic_roots(a, b, c - value)
    }

    fn derivative_axis_roots(v0: T, v1: T, v2: T) -> Vec<T> {
        let [a, b, _] = Self::power_coefficients(v0, v1, v2);
        quadratic_roots(T::zero(), T::two() * a, b)
    }
}

/// Cubic Bezier curve with two control points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier<T = f64> {
    pub first_point: Vector2<T>,
    pub control_point1: Vector2<T>,
    pub control_point2: Vector2<T>,
    pub last_point: Vector2<T>,
}

impl<T> CubicBezier<T>
where
    T: Real,
{
    #[inline]
    pub fn new(
        first_point: Vector2<T>,
        control_point1: Vector2<T>,
        control_point2: Vector2<T>,
        last_point: Vector2<T>,
    ) -> Self {
        Self {
            first_point,
            control_point1,
            control_point2,
            last_point,
        }
    }

    #[inline]
    fn points(&self) -> [Vector2<T>; 4] {
        [
            self.first_point,
            self.control_point1,
            self.control_point2,
            self.last_point,
        ]
    }

    #[inline]
    fn from_points(points: [Vector2<T>; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Power basis coefficients `(a, b, c, d)` of one coordinate, `a t^3 + b t^2 + c t + d`.
    fn power_coefficients(v0: T, v1: T, v2: T, v3: T) -> [T; 4] {
        let three = T::three();
        [
            -v0 + three * v1 - three * v2 + v3,
            three * v0 - T::constant(6.0) * v1 + three * v2,
            -three * v0 + three * v1,
            v0,
        ]
    }

    fn axis_roots(v0: T, v1: T, v2: T, v3: T, value: T) -> Vec<T> {
        let [a, b, c, d] = Self::power_coefficients(v0, v1, v2, v3);
        cubic_roots(a, b, c, d - value)
    }

    fn derivative_axis_roots(v0: T, v1: T, v2: T, v3: T) -> Vec<T> {
        let [a, b, c, _] = Self::power_coefficients(v0, v1, v2, v3);
        quadratic_roots(T::three() * a, T::two() * b, c)
    }
}

/// Evaluates the Bezier curve defined by `points` at `t` using de Casteljau's algorithm.
fn de_casteljau<T: Real>(points: &[Vector2<T>], t: T) -> Vector2<T> {
    let mut work = [Vector2::zero(); 4];
    let n = points.len();
    work[..n].copy_from_slice(points);
    for level in 1..n {
        for i in 0..n - level {
            work[i] = work[i].lerp(work[i + 1], t);
        }
    }
    work[0]
}

/// Control points of the derivative curve.
fn hodograph<T: Real>(points: &[Vector2<T>]) -> Vec<Vector2<T>> {
    let degree = T::constant((points.len() - 1) as f64);
    points
        .windows(2)
        .map(|w| (w[1] - w[0]).scale(degree))
        .collect()
}

fn split_points<T: Real, const N: usize>(
    points: [Vector2<T>; N],
    t: T,
) -> ([Vector2<T>; N], [Vector2<T>; N]) {
    let mut work = points;
    let mut left = points;
    let mut right = points;
    for level in 1..N {
        for i in 0..N - level {
            work[i] = work[i].lerp(work[i + 1], t);
        }
        left[level] = work[0];
        right[N - 1 - level] = work[N - 1 - level];
    }
    (left, right)
}

/// Splits at increasing `params` by repeatedly splitting the remaining tail.
fn split_points_at_params<T: Real, const N: usize>(
    points: [Vector2<T>; N],
    params: &[T],
) -> Vec<[Vector2<T>; N]> {
    let mut result = Vec::with_capacity(params.len() + 1);
    let mut remaining = points;
    let mut previous = T::zero();
    for &t in params {
        let local = (t - previous) / (T::one() - previous);
        let (left, right) = split_points(remaining, local);
        result.push(left);
        remaining = right;
        previous = t;
    }
    result.push(remaining);
    result
}

/// Parameter of the closest point on the curve to `point`, clamped to `[0, 1]`.
fn closest_param<T: Real>(points: &[Vector2<T>], point: Vector2<T>) -> T {
    const SAMPLES: usize = 16;
    let d1 = hodograph(points);
    let d2 = hodograph(&d1);

    let mut best_t = T::zero();
    let mut best_dist: T = Real::max_value();
    for i in 0..=SAMPLES {
        let t = T::constant(i as f64) / T::constant(SAMPLES as f64);
        let dist = de_casteljau(points, t).distance_to(point);
        if dist < best_dist {
            best_dist = dist;
            best_t = t;
        }
    }

    let mut t = best_t;
    for _ in 0..8 {
        let diff = de_casteljau(points, t) - point;
        let first = de_casteljau(&d1, t);
        let second = if d2.is_empty() {
            Vector2::zero()
        } else {
            de_casteljau(&d2, t)
        };
        let f = diff.dot(first);
        let df = first.dot(first) + diff.dot(second);
        if df.fuzzy_eq_zero() {
            break;
        }
        let next = num_traits::real::Real::min(
            T::one(),
            num_traits::real::Real::max(T::zero(), t - f / df),
        );
        if (next - t).abs() < T::constant(1e-14) {
            t = next;
            break;
        }
        t = next;
    }

    t
}

fn filter_unit_params<T: Real>(roots: Vec<T>) -> Vec<T> {
    let tol = T::constant(1e-9);
    roots
        .into_iter()
        .filter(|&t| t >= -tol && t <= T::one() + tol)
        .map(|t| num_traits::real::Real::min(T::one(), num_traits::real::Real::max(T::zero(), t)))
        .collect()
}

macro_rules! impl_bezier_curve {
    ($ty:ident, $n:literal, |$s:ident, $y:ident| $hits:expr, |$b:ident| $extremes:expr) => {
        impl<T> Curve<T> for $ty<T>
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
                de_casteljau(&self.points(), t)
            }

            fn derivative_at(&self, t: T) -> Vector2<T> {
                de_casteljau(&hodograph(&self.points()), t)
            }

            fn param_of(&self, point: Vector2<T>) -> T {
                closest_param(&self.points(), point)
            }

            fn bounding_box(&self) -> BoundingBox<T> {
                let $b = self;
                let mut bb = BoundingBox::from_corners(self.first_point, self.last_point);
                for t in filter_unit_params($extremes) {
                    bb = bb.add_point(self.param_point(t));
                }
                bb
            }

            fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool {
                if point.fuzzy_eq_eps(self.first_point, eps)
                    || point.fuzzy_eq_eps(self.last_point, eps)
                {
                    return true;
                }

                if !self.bounding_box().contains_point_eps(point, eps) {
                    return false;
                }

                let t = self.param_of(point);
                self.param_point(t).distance_to(point) < eps
            }

            fn length(&self) -> T {
                let pieces = 16;
                let step = T::one() / T::constant(pieces as f64);
                let d1 = hodograph(&self.points());
                (0..pieces)
                    .map(|i| {
                        let a = T::constant(i as f64) * step;
                        gauss_legendre(|t| de_casteljau(&d1, t).length(), a, a + step)
                    })
                    .fold(T::zero(), |acc, l| acc + l)
            }

            fn signed_area_contribution(&self) -> T {
                // polynomial integrand, the quadrature is exact
                let points = self.points();
                let d1 = hodograph(&points);
                gauss_legendre(
                    |t| de_casteljau(&points, t).perp_dot(de_casteljau(&d1, t)),
                    T::zero(),
                    T::one(),
                ) / T::two()
            }

            fn horizontal_hits(&self, y: T, _eps: T) -> Vec<T> {
                let $s = self;
                let $y = y;
                let mut hits = filter_unit_params($hits);
                hits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                hits.dedup_by(|a, b| (*a - *b).abs() < T::constant(1e-12));
                hits
            }

            fn reverse(&self) -> Self {
                let mut points = self.points();
                points.reverse();
                Self::from_points(points)
            }

            fn split_at_params(&self, params: &[T]) -> Vec<Self> {
                split_points_at_params::<T, $n>(self.points(), params)
                    .into_iter()
                    .map(Self::from_points)
                    .collect()
            }

            fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self {
                Self {
                    first_point: first,
                    last_point: last,
                    ..*self
                }
            }

            fn translate(&self, offset: Vector2<T>) -> Self {
                Self::from_points(self.points().map(|p| p + offset))
            }

            fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
                Self::from_points(self.points().map(|p| p.rotate_about(origin, angle)))
            }

            fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
                Self::from_points(self.points().map(|p| p.scale_about(origin, factor)))
            }
        }
    };
}

impl_bezier_curve!(
    QuadraticBezier,
    3,
    |s, y| QuadraticBezier::axis_roots(s.first_point.y, s.control_point.y, s.last_point.y, y),
    |b| {
        let mut roots = QuadraticBezier::derivative_axis_roots(
            b.first_point.x,
            b.control_point.x,
            b.last_point.x,
        );
        roots.extend(QuadraticBezier::derivative_axis_roots(
            b.first_point.y,
            b.control_point.y,
            b.last_point.y,
        ));
        roots
    }
);

impl_bezier_curve!(
    CubicBezier,
    4,
    |s, y| CubicBezier::axis_roots(
        s.first_point.y,
        s.control_point1.y,
        s.control_point2.y,
        s.last_point.y,
        y
    ),
    |b| {
        let mut roots = CubicBezier::derivative_axis_roots(
            b.first_point.x,
            b.control_point1.x,
            b.control_point2.x,
            b.last_point.x,
        );
        roots.extend(CubicBezier::derivative_axis_roots(
            b.first_point.y,
            b.control_point1.y,
            b.control_point2.y,
            b.last_point.y,
        ));
        roots
    }
);
