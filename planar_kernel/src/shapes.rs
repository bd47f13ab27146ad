//! Constructors for common loops, all centred at the origin and counter clockwise.
use crate::{
    core::{math::Vector2, traits::Real},
    error::Result,
    segment::{EllipseArc, Segment},
    stroke::Loop,
};

/// Axis aligned rectangle.
///
/// # Examples
///
/// ```
/// # use planar_kernel::shapes::rect;
/// let r = rect(2.0_f64, 1.0);
/// assert!((r.area() - 2.0).abs() < 1e-12);
/// assert!(!r.clockwise());
/// ```
pub fn rect<T: Real>(width: T, height: T) -> Loop<T> {
    let hw = width / T::two();
    let hh = height / T::two();
    let corners = [
        Vector2::new(-hw, -hh),
        Vector2::new(hw, -hh),
        Vector2::new(hw, hh),
        Vector2::new(-hw, hh),
    ];
    Loop::new_unchecked(
        (0..4)
            .map(|i| Segment::line(corners[i], corners[(i + 1) % 4]))
            .collect(),
    )
}

/// Circle made of two half arcs.
pub fn circle<T: Real>(radius: T) -> Loop<T> {
    let right = Vector2::new(radius, T::zero());
    let left = Vector2::new(-radius, T::zero());
    let center = Vector2::zero();
    Loop::new_unchecked(vec![
        Segment::arc(right, left, center, false),
        Segment::arc(left, right, center, false),
    ])
}

/// Ellipse (major axis along x) made of two half ellipse arcs.
pub fn ellipse<T: Real>(major_radius: T, minor_radius: T) -> Loop<T> {
    let right = Vector2::new(major_radius, T::zero());
    let left = Vector2::new(-major_radius, T::zero());
    let center = Vector2::zero();
    let half = |from, to| {
        Segment::EllipseArc(EllipseArc::new(
            from,
            to,
            center,
            major_radius,
            minor_radius,
            T::zero(),
            false,
        ))
    };
    Loop::new_unchecked(vec![half(right, left), half(left, right)])
}

/// Closed polygon through `points`, validated like any other loop.
pub fn polygon<T: Real>(points: &[Vector2<T>]) -> Result<Loop<T>> {
    Loop::from_points(points)
}
