use super::Curve;
use crate::{
    bounding_box::BoundingBox,
    core::{
        math::{line_seg_closest_point, parametric_from_point, point_from_parametric, Vector2},
        traits::Real,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Straight line segment going from `first_point` to `last_point`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line<T = f64> {
    pub first_point: Vector2<T>,
    pub last_point: Vector2<T>,
}

impl<T> Line<T>
where
    T: Real,
{
    #[inline]
    pub fn new(first_point: Vector2<T>, last_point: Vector2<T>) -> Self {
        Self {
            first_point,
            last_point,
        }
    }

    /// Direction vector (not normalized) of the line.
    #[inline]
    pub fn direction(&self) -> Vector2<T> {
        self.last_point - self.first_point
    }
}

impl<T> Curve<T> for Line<T>
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

    #[inline]
    fn param_point(&self, t: T) -> Vector2<T> {
        point_from_parametric(self.first_point, self.last_point, t)
    }

    #[inline]
    fn derivative_at(&self, _t: T) -> Vector2<T> {
        self.direction()
    }

    #[inline]
    fn param_of(&self, point: Vector2<T>) -> T {
        parametric_from_point(self.first_point, self.last_point, point)
    }

    fn bounding_box(&self) -> BoundingBox<T> {
        BoundingBox::from_corners(self.first_point, self.last_point)
    }

    fn is_on_segment(&self, point: Vector2<T>, eps: T) -> bool {
        let closest = line_seg_closest_point(self.first_point, self.last_point, point);
        closest.distance_to(point) < eps
    }

    #[inline]
    fn length(&self) -> T {
        self.direction().length()
    }

    #[inline]
    fn signed_area_contribution(&self) -> T {
        self.first_point.perp_dot(self.last_point) / T::two()
    }

    fn horizontal_hits(&self, y: T, eps: T) -> Vec<T> {
        let dy = self.last_point.y - self.first_point.y;
        if dy.fuzzy_eq_zero_eps(eps) {
            // horizontal lines never cross a horizontal line, coincidence is handled by callers
            return Vec::new();
        }

        let t = (y - self.first_point.y) / dy;
        if t >= T::zero() && t <= T::one() {
            vec![t]
        } else {
            Vec::new()
        }
    }

    fn reverse(&self) -> Self {
        Self::new(self.last_point, self.first_point)
    }

    fn split_at_params(&self, params: &[T]) -> Vec<Self> {
        let mut result = Vec::with_capacity(params.len() + 1);
        let mut start = self.first_point;
        for &t in params {
            let p = self.param_point(t);
            result.push(Self::new(start, p));
            start = p;
        }
        result.push(Self::new(start, self.last_point));
        result
    }

    fn with_endpoints(&self, first: Vector2<T>, last: Vector2<T>) -> Self {
        Self::new(first, last)
    }

    fn translate(&self, offset: Vector2<T>) -> Self {
        Self::new(self.first_point + offset, self.last_point + offset)
    }

    fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        Self::new(
            self.first_point.rotate_about(origin, angle),
            self.last_point.rotate_about(origin, angle),
        )
    }

    fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        Self::new(
            self.first_point.scale_about(origin, factor),
            self.last_point.scale_about(origin, factor),
        )
    }
}
