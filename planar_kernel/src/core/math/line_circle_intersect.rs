use super::base_math::{min_max, parametric_from_point};
use super::Vector2;
use crate::core::traits::Real;

/// Holds the result of finding the intersect between a line segment and a circle.
#[derive(Debug, Copy, Clone)]
pub enum LineCircleIntr<T>
where
    T: Real,
{
    /// No intersects found.
    NoIntersect,
    /// One tangent intersect point found.
    TangentIntersect {
        /// Holds the line segment parametric value for where the intersect point is.
        t0: T,
    },
    /// Simple case of two intersect points found.
    TwoIntersects {
        /// Holds the line segment parametric value for where the first intersect point is.
        t0: T,
        /// Holds the line segment parametric value for where the second intersect point is.
        t1: T,
    },
}

/// Finds the intersects between the line through `p0->p1` and a circle.
///
/// This function returns the parametric solution(s) for the line segment equation
/// `P(t) = p0 + t * (p1 - p0)`, values outside `[0, 1]` are intersects past the segment ends.
/// Intersects are "sticky" and snap to a single tangent point when the line passes within
/// `epsilon` of being tangent.
///
/// # Examples
///
/// ```
/// # use planar_kernel::core::math::*;
/// let p0 = Vector2::new(0.0, 0.0);
/// let p1 = Vector2::new(1.0, 0.0);
/// if let LineCircleIntr::TangentIntersect { t0 } =
///     line_circle_intr(p0, p1, 1.0, Vector2::new(0.0, 1.0), 1e-9)
/// {
///     assert_eq!(t0, 0.0);
/// } else {
///     unreachable!("expected tangent intersect");
/// }
/// ```
pub fn line_circle_intr<T>(
    p0: Vector2<T>,
    p1: Vector2<T>,
    radius: T,
    circle_center: Vector2<T>,
    epsilon: T,
) -> LineCircleIntr<T>
where
    T: Real,
{
    use LineCircleIntr::*;

    let eps = epsilon;
    let d = p1 - p0;
    let len_sq = d.length_squared();

    if p0.fuzzy_eq_eps(p1, eps) {
        if ((p0 - circle_center).length() - radius).fuzzy_eq_zero_eps(eps) {
            return TangentIntersect { t0: T::zero() };
        }
        return NoIntersect;
    }

    // closest point on the infinite line to the circle center
    let t_closest = (circle_center - p0).dot(d) / len_sq;
    let closest = p0 + d.scale(t_closest);
    let shortest_dist = (closest - circle_center).length();

    if shortest_dist > radius + eps {
        return NoIntersect;
    }

    if shortest_dist.fuzzy_eq_eps(radius, eps) {
        return TangentIntersect {
            t0: parametric_from_point(p0, p1, closest),
        };
    }

    let half_chord = (radius * radius - shortest_dist * shortest_dist).abs().sqrt();
    let offset = half_chord / len_sq.sqrt();
    let (t0, t1) = min_max(t_closest - offset, t_closest + offset);
    TwoIntersects { t0, t1 }
}
