use planar_kernel::{
    core::math::{point_on_circle, Vector2},
    figure::Figure,
    shapes::rect,
    stroke::Loop,
    Real,
};

/// Star shaped loop with `vertex_count` vertices alternating between two radii.
pub fn star<T>(vertex_count: usize, center: Vector2<T>) -> Loop<T>
where
    T: Real,
{
    let outer = T::constant(40.0);
    let inner = T::constant(30.0);

    let points: Vec<Vector2<T>> = (0..vertex_count)
        .map(|i| {
            let angle = T::constant(i as f64) * T::tau() / T::constant(vertex_count as f64);
            let radius = if i % 2 == 0 { outer } else { inner };
            point_on_circle(radius, center, angle)
        })
        .collect();

    // points are distinct and wind once around the center
    Loop::from_points(&points).unwrap()
}

/// Grid of `n` by `n` unit squares spaced so neighbours overlap.
pub fn overlapping_grid(n: usize) -> Vec<Figure<f64>> {
    let mut figures = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let offset = Vector2::new(i as f64 * 0.8, j as f64 * 0.8);
            figures.push(Figure::full(rect(1.0, 1.0).translate(offset)));
        }
    }
    figures
}
