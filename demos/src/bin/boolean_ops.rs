//! Runs fuse, cut and intersect on a few shape pairs and prints the resulting figures.
//!
//! Set `RUST_LOG=planar_kernel=debug` to see the kernel's diagnostics.
use planar_kernel::{
    core::math::vec2,
    diagram::Diagram,
    figure::Figure,
    ops::{cut, fuse, intersect},
    shapes::{circle, ellipse, rect},
    Error, Shape, Stroke,
};

fn describe(name: &str, diagram: &Diagram<f64>) {
    println!(
        "  {:<10} figures: {}, area: {:.4}",
        name,
        diagram.figures().len(),
        diagram.area()
    );
    for (i, f) in diagram.figures().iter().enumerate() {
        println!(
            "    [{}] contour segments: {}, holes: {}, area: {:.4}",
            i,
            f.contour().segments().len(),
            f.holes().len(),
            f.area()
        );
    }
}

fn run_all<A, B>(title: &str, a: &A, b: &B) -> Result<(), Error>
where
    A: Shape<f64>,
    B: Shape<f64>,
{
    println!("{}", title);
    describe("fuse", &fuse(a, b)?);
    describe("cut", &cut(a, b)?);
    describe("intersect", &intersect(a, b)?);
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_all(
        "overlapping squares",
        &rect(2.0, 2.0),
        &rect(2.0, 2.0).translate(vec2(1.0, 0.0)),
    )?;

    run_all(
        "circle and ellipse",
        &circle(1.0),
        &ellipse(2.0, 0.5).rotate_about(vec2(0.0, 0.0), 0.4),
    )?;

    let ring = Figure::new(rect(6.0, 6.0), vec![rect(2.0, 2.0).reverse()])?;
    run_all(
        "ring and bar",
        &ring,
        &rect(8.0, 1.0).translate(vec2(1.0, 0.0)),
    )?;

    Ok(())
}
