//! Axis aligned bounding box used as the cheap pre-filter by every algorithm in the kernel.
use crate::core::{
    math::{min_max, Vector2},
    traits::Real,
};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis aligned bounding box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T> BoundingBox<T>
where
    T: Real,
{
    #[inline]
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box spanning the two corner points given (in any order).
    pub fn from_corners(p0: Vector2<T>, p1: Vector2<T>) -> Self {
        let (min_x, max_x) = min_max(p0.x, p1.x);
        let (min_y, max_y) = min_max(p0.y, p1.y);
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Smallest box containing all the `points`, `None` if `points` is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector2<T>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut result = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            result = result.add_point(p);
        }

        Some(result)
    }

    #[inline]
    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// Largest of width and height.
    #[inline]
    pub fn max_extent(&self) -> T {
        num_traits::real::Real::max(self.width(), self.height())
    }

    #[inline]
    pub fn center(&self) -> Vector2<T> {
        Vector2::new(
            (self.min_x + self.max_x) / T::two(),
            (self.min_y + self.max_y) / T::two(),
        )
    }

    /// Returns a box grown to include `point`.
    #[inline]
    pub fn add_point(&self, point: Vector2<T>) -> Self {
        Self::new(
            num_traits::real::Real::min(self.min_x, point.x),
            num_traits::real::Real::min(self.min_y, point.y),
            num_traits::real::Real::max(self.max_x, point.x),
            num_traits::real::Real::max(self.max_y, point.y),
        )
    }

    /// Smallest box containing both `self` and `other`.
    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(
            num_traits::real::Real::min(self.min_x, other.min_x),
            num_traits::real::Real::min(self.min_y, other.min_y),
            num_traits::real::Real::max(self.max_x, other.max_x),
            num_traits::real::Real::max(self.max_y, other.max_y),
        )
    }

    /// Returns a box expanded on all sides by `amount`.
    #[inline]
    pub fn expand(&self, amount: T) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Fuzzy inclusive overlap test, boxes touching within `eps` overlap.
    #[inline]
    pub fn overlaps_eps(&self, other: &Self, eps: T) -> bool {
        self.min_x <= other.max_x + eps
            && other.min_x <= self.max_x + eps
            && self.min_y <= other.max_y + eps
            && other.min_y <= self.max_y + eps
    }

    /// Same as [BoundingBox::overlaps_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_eps(other, T::fuzzy_epsilon())
    }

    /// Fuzzy inclusive point containment.
    #[inline]
    pub fn contains_point_eps(&self, point: Vector2<T>, eps: T) -> bool {
        point.x.fuzzy_in_range_eps(self.min_x, self.max_x, eps)
            && point.y.fuzzy_in_range_eps(self.min_y, self.max_y, eps)
    }

    /// Same as [BoundingBox::contains_point_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.contains_point_eps(point, T::fuzzy_epsilon())
    }

    /// True if `other` lies entirely inside (or on the border of) this box.
    #[inline]
    pub fn contains_eps(&self, other: &Self, eps: T) -> bool {
        other.min_x.fuzzy_gt_eps(self.min_x, eps)
            && other.min_y.fuzzy_gt_eps(self.min_y, eps)
            && other.max_x.fuzzy_lt_eps(self.max_x, eps)
            && other.max_y.fuzzy_lt_eps(self.max_y, eps)
    }

    #[inline]
    pub fn fuzzy_eq_eps(&self, other: &Self, eps: T) -> bool {
        self.min_x.fuzzy_eq_eps(other.min_x, eps)
            && self.min_y.fuzzy_eq_eps(other.min_y, eps)
            && self.max_x.fuzzy_eq_eps(other.max_x, eps)
            && self.max_y.fuzzy_eq_eps(other.max_y, eps)
    }

    /// Test if the line segment `p0->p1` passes through this box (Liang-Barsky clipping).
    pub fn intersects_line(&self, p0: Vector2<T>, p1: Vector2<T>, eps: T) -> bool {
        let b = self.expand(eps);
        let d = p1 - p0;
        let mut t0 = T::zero();
        let mut t1 = T::one();
        let checks = [
            (-d.x, p0.x - b.min_x),
            (d.x, b.max_x - p0.x),
            (-d.y, p0.y - b.min_y),
            (d.y, b.max_y - p0.y),
        ];

        for (p, q) in checks {
            if p == T::zero() {
                if q < T::zero() {
                    return false;
                }
                continue;
            }

            let r = q / p;
            if p < T::zero() {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }

        true
    }
}

/// Builds a spatial index over `boxes`, the item index is the position in the iterator.
///
/// # Panics
///
/// Panics if `T` fails to cast to/from a `u16` while building the index.
pub fn spatial_index<T, I>(boxes: I) -> StaticAABB2DIndex<T>
where
    T: Real,
    I: IntoIterator<Item = BoundingBox<T>>,
    I::IntoIter: ExactSizeIterator,
{
    let boxes = boxes.into_iter();
    let mut builder = StaticAABB2DIndexBuilder::new(boxes.len());
    for bb in boxes {
        builder.add(bb.min_x, bb.min_y, bb.max_x, bb.max_y);
    }

    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast numeric type: {e}")
            }
        },
    }
}
