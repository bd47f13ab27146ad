use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Normalize radians to be between `0` and `2PI`, e.g. `-PI/4` becomes `7PI/4` and `5PI` becomes
/// `PI`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// # use planar_kernel::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// assert!(normalize_radians(2.0 * PI).fuzzy_eq(2.0 * PI));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Signed sweep angle going from `start_angle` to `end_angle` in the direction given.
///
/// Counter clockwise sweeps are positive and in `(0, 2PI]`, clockwise sweeps are negative and in
/// `[-2PI, 0)`. Coincident angles give a full turn since arcs never have zero sweep.
#[inline]
pub fn sweep_angle<T>(start_angle: T, end_angle: T, clockwise: bool) -> T
where
    T: Real,
{
    let ccw = normalize_radians(end_angle - start_angle);
    let ccw = if ccw.fuzzy_eq_zero() || ccw.fuzzy_eq(T::tau()) {
        T::tau()
    } else {
        ccw
    };

    if !clockwise {
        return ccw;
    }

    if ccw == T::tau() {
        -T::tau()
    } else {
        ccw - T::tau()
    }
}

/// Tests if `test_angle` is between a `start_angle` and `end_angle`.
///
/// Test assumes counter clockwise `start_angle` to `end_angle`, and is inclusive using `epsilon`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// use std::f64::consts::PI;
/// assert!(angle_is_between_eps(PI / 2.0, 0.0, PI, 1e-5));
/// assert!(angle_is_between_eps(0.0, 0.0, PI, 1e-5));
/// assert!(angle_is_between_eps(PI, 0.0, PI, 1e-5));
/// assert!(!angle_is_between_eps(1.5 * PI, 0.0, PI, 1e-5));
/// ```
#[inline]
pub fn angle_is_between_eps<T>(test_angle: T, start_angle: T, end_angle: T, epsilon: T) -> bool
where
    T: Real,
{
    let end_sweep = normalize_radians(end_angle - start_angle);
    let mid_sweep = normalize_radians(test_angle - start_angle);

    mid_sweep < end_sweep + epsilon || mid_sweep > T::tau() - epsilon
}

/// Tests if `test_angle` is within the `sweep_angle` starting at `start_angle`.
///
/// If `sweep_angle` is positive then sweep is counter clockwise, otherwise it is clockwise.
/// `epsilon` controls the fuzzy inclusion.
#[inline]
pub fn angle_is_within_sweep_eps<T>(
    test_angle: T,
    start_angle: T,
    sweep_angle: T,
    epsilon: T,
) -> bool
where
    T: Real,
{
    if sweep_angle.abs() >= T::tau() - epsilon {
        return true;
    }

    let end_angle = start_angle + sweep_angle;
    if sweep_angle < T::zero() {
        return angle_is_between_eps(test_angle, end_angle, start_angle, epsilon);
    }

    angle_is_between_eps(test_angle, start_angle, end_angle, epsilon)
}

/// Returns the solutions to the quadratic equation.
///
/// Quadratic equation is `-b +/- sqrt(b * b - 4 * a * c) / (2 * a)`.
/// With the `sqrt_discriminant` defined as `sqrt(b * b - 4 * a * c)`.
///
/// The purpose of this function is to minimize error in the process of finding solutions
/// to the quadratic equation.
#[inline]
pub fn quadratic_solutions<T>(a: T, b: T, c: T, sqrt_discriminant: T) -> (T, T)
where
    T: Real,
{
    // Avoids loss in precision due to taking the difference of two floating point values that are
    // very near each other in value.
    let denom = T::two() * a;
    let sol1 = if b < T::zero() {
        (-b + sqrt_discriminant) / denom
    } else {
        (-b - sqrt_discriminant) / denom
    };

    let sol2 = if sol1 == T::zero() {
        sol1
    } else {
        (c / a) / sol1
    };

    (sol1, sol2)
}

/// Relative threshold below which a leading polynomial coefficient is treated as zero.
#[inline]
fn degenerate_coefficient<T: Real>(coefficient: T, scale: T) -> bool {
    coefficient.abs() <= scale * T::constant(1e-12)
}

/// Real roots of `a * t^2 + b * t + c = 0`.
///
/// Degenerates to the linear case when `a` is negligible relative to the other coefficients.
/// Double roots are returned once.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// let mut roots = quadratic_roots(1.0, -3.0, 2.0);
/// roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert_eq!(roots, vec![1.0, 2.0]);
/// assert!(quadratic_roots(1.0, 0.0, 1.0).is_empty());
/// ```
pub fn quadratic_roots<T>(a: T, b: T, c: T) -> Vec<T>
where
    T: Real,
{
    let scale = num_traits::real::Real::max(
        a.abs(),
        num_traits::real::Real::max(b.abs(), c.abs()),
    );
    if scale == T::zero() {
        return Vec::new();
    }

    if degenerate_coefficient(a, scale) {
        if degenerate_coefficient(b, scale) {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - T::four() * a * c;
    let tiny = scale * scale * T::constant(1e-14);
    if discriminant < -tiny {
        return Vec::new();
    }

    if discriminant <= tiny {
        return vec![-b / (T::two() * a)];
    }

    let (r1, r2) = quadratic_solutions(a, b, c, discriminant.sqrt());
    vec![r1, r2]
}

/// Real roots of `a * t^3 + b * t^2 + c * t + d = 0`.
///
/// Uses the trigonometric/Cardano closed forms followed by two Newton polishing steps per root.
/// Degenerates to [quadratic_roots] when `a` is negligible.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// # use planar_kernel::core::traits::*;
/// // (t - 1)(t - 2)(t - 3)
/// let mut roots = cubic_roots(1.0, -6.0, 11.0, -6.0);
/// roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert_eq!(roots.len(), 3);
/// assert!(roots[0].fuzzy_eq(1.0));
/// assert!(roots[1].fuzzy_eq(2.0));
/// assert!(roots[2].fuzzy_eq(3.0));
/// ```
pub fn cubic_roots<T>(a: T, b: T, c: T, d: T) -> Vec<T>
where
    T: Real,
{
    let scale = num_traits::real::Real::max(
        num_traits::real::Real::max(a.abs(), b.abs()),
        num_traits::real::Real::max(c.abs(), d.abs()),
    );
    if scale == T::zero() {
        return Vec::new();
    }

    if degenerate_coefficient(a, scale) {
        return quadratic_roots(b, c, d);
    }

    // normalized to monic t^3 + b t^2 + c t + d
    let b = b / a;
    let c = c / a;
    let d = d / a;

    let three = T::three();
    let p = c - b * b / three;
    let q = T::two() * b * b * b / T::constant(27.0) - b * c / three + d;
    let shift = -b / three;
    let discriminant = q * q / T::four() + p * p * p / T::constant(27.0);
    let tiny = T::constant(1e-14);

    let mut roots = if discriminant > tiny {
        let s = discriminant.sqrt();
        let u = (-q / T::two() + s).cbrt();
        let v = (-q / T::two() - s).cbrt();
        vec![u + v + shift]
    } else if discriminant < -tiny {
        let r = (-p / three).sqrt();
        let cos_arg = (-q / T::two()) / (r * r * r);
        let cos_arg = num_traits::real::Real::min(
            T::one(),
            num_traits::real::Real::max(-T::one(), cos_arg),
        );
        let phi = cos_arg.acos();
        (0..3)
            .map(|k| {
                let k = T::constant(k as f64);
                T::two() * r * ((phi + T::tau() * k) / three).cos() + shift
            })
            .collect()
    } else {
        let u = (-q / T::two()).cbrt();
        if u.fuzzy_eq_zero() {
            vec![shift]
        } else {
            vec![T::two() * u + shift, -u + shift]
        }
    };

    for r in roots.iter_mut() {
        for _ in 0..2 {
            let f = ((*r + b) * *r + c) * *r + d;
            let df = (three * *r + T::two() * b) * *r + c;
            if df == T::zero() {
                break;
            }
            *r = *r - f / df;
        }
    }

    roots
}

/// Angle of the direction vector described by `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Returns the point on the circle with `radius`, `center`, and polar `angle` in radians given.
#[inline]
pub fn point_on_circle<T>(radius: T, center: Vector2<T>, angle: T) -> Vector2<T>
where
    T: Real,
{
    let (s, c) = angle.sin_cos();
    Vector2::new(center.x + radius * c, center.y + radius * s)
}

/// Returns the point on the line segment going from `p0` to `p1` at parametric value `t`.
#[inline]
pub fn point_from_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Returns the parametric value on the line going from `p0` to `p1` for the projection of
/// `point` onto it.
///
/// Returns zero for a degenerate (zero length) line.
#[inline]
pub fn parametric_from_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    let v = p1 - p0;
    let len_sq = v.length_squared();
    if len_sq == T::zero() {
        return T::zero();
    }

    (point - p0).dot(v) / len_sq
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    // See: http://geomalgorithms.com/a02-_lines.html
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 <= T::zero() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 <= c1 {
        return p1;
    }

    let b = c1 / c2;
    p0 + v.scale(b)
}

/// Returns true if `point` is left of a direction vector.
///
/// Direction vector is defined as `p1 - p0`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// let p0 = Vector2::new(1.0, 1.0);
/// let p1 = Vector2::new(2.0, 2.0);
/// assert!(is_left(p0, p1, Vector2::new(0.0, 1.0)));
/// assert!(!is_left(p0, p1, Vector2::new(1.0, 0.0)));
/// ```
#[inline]
pub fn is_left<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    (p1 - p0).perp_dot(point - p0) > T::zero()
}

/// Signed area of the closed polygon through `points` (shoelace formula), positive when the
/// points run counter clockwise.
pub fn polygon_signed_area<T>(points: &[Vector2<T>]) -> T
where
    T: Real,
{
    if points.len() < 3 {
        return T::zero();
    }

    let mut sum = T::zero();
    let mut prev = points[points.len() - 1];
    for &p in points {
        sum = sum + prev.perp_dot(p);
        prev = p;
    }

    sum / T::two()
}
