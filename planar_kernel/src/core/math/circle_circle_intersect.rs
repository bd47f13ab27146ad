use super::Vector2;
use crate::core::traits::Real;

/// Holds the result of finding the intersect between two circles.
#[derive(Debug, Copy, Clone)]
pub enum CircleCircleIntr<T>
where
    T: Real,
{
    /// No intersects found.
    NoIntersect,
    /// One tangent intersect point found.
    TangentIntersect {
        /// Holds the tangent intersect point.
        point: Vector2<T>,
    },
    /// Simple case of two intersect points found.
    TwoIntersects {
        /// Holds the first intersect point.
        point1: Vector2<T>,
        /// Holds the second intersect point.
        point2: Vector2<T>,
    },
    /// Circles overlap each other (same circle).
    Overlapping,
}

/// Finds the intersects between two circles, `epsilon` is used for fuzzy distance comparisons.
pub fn circle_circle_intr<T>(
    radius1: T,
    center1: Vector2<T>,
    radius2: T,
    center2: Vector2<T>,
    epsilon: T,
) -> CircleCircleIntr<T>
where
    T: Real,
{
    // Reference algorithm: http://paulbourke.net/geometry/circlesphere/
    use CircleCircleIntr::*;

    let eps = epsilon;
    let cv = center2 - center1;
    let d2 = cv.dot(cv);
    let d = d2.sqrt();

    if d.fuzzy_eq_zero_eps(eps) {
        if radius1.fuzzy_eq_eps(radius2, eps) {
            return Overlapping;
        }
        return NoIntersect;
    }

    if !d.fuzzy_lt_eps(radius1 + radius2, eps) || !d.fuzzy_gt_eps((radius1 - radius2).abs(), eps)
    {
        return NoIntersect;
    }

    let rad1_sq = radius1 * radius1;
    let a = (rad1_sq - radius2 * radius2 + d2) / (T::two() * d);
    let midpoint = center1 + cv.scale(a / d);
    let diff = rad1_sq - a * a;

    if diff < T::zero() {
        return TangentIntersect { point: midpoint };
    }

    let h = diff.sqrt();
    let h_over_d = h / d;
    let x_term = h_over_d * cv.y;
    let y_term = h_over_d * cv.x;

    let pt1 = Vector2::new(midpoint.x + x_term, midpoint.y - y_term);
    let pt2 = Vector2::new(midpoint.x - x_term, midpoint.y + y_term);

    if pt1.fuzzy_eq_eps(pt2, eps) {
        return TangentIntersect { point: pt1 };
    }

    TwoIntersects {
        point1: pt1,
        point2: pt2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn two_unit_circles() {
        match circle_circle_intr(1.0, vec2(0.0, 0.0), 1.0, vec2(1.0, 0.0), 1e-9) {
            CircleCircleIntr::TwoIntersects { point1, point2 } => {
                let h = (0.75f64).sqrt();
                assert!(point1.fuzzy_eq(vec2(0.5, -h)) || point1.fuzzy_eq(vec2(0.5, h)));
                assert!((point1.y + point2.y).abs() < 1e-12);
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn tangent_and_same_circle() {
        assert!(matches!(
            circle_circle_intr(1.0, vec2(0.0, 0.0), 1.0, vec2(2.0, 0.0), 1e-9),
            CircleCircleIntr::TangentIntersect { .. }
        ));
        assert!(matches!(
            circle_circle_intr(1.0, vec2(0.0, 0.0), 1.0, vec2(0.0, 0.0), 1e-9),
            CircleCircleIntr::Overlapping
        ));
    }
}
