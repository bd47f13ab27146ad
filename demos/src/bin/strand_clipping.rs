//! Clips a zig-zag strand against a figure with a hole and prints the pieces.
use planar_kernel::{
    figure::Figure,
    line_strand,
    ops::{confine_strand, erase_strand},
    shapes::{circle, rect},
    Error, Strand, Stroke,
};

fn print_pieces(name: &str, pieces: &[Strand<f64>]) {
    println!("{} ({} pieces)", name, pieces.len());
    for p in pieces {
        let (a, b) = (p.first_point(), p.last_point());
        println!(
            "  ({:.3}, {:.3}) -> ({:.3}, {:.3}), length {:.4}",
            a.x,
            a.y,
            b.x,
            b.y,
            p.length()
        );
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let plate = Figure::new(rect(8.0, 4.0), vec![circle(1.0).reverse()])?;
    let path = line_strand![(-5.0, -1.0), (-2.0, 1.5), (0.0, -1.5), (2.0, 1.5), (5.0, 0.0)]?;

    print_pieces("inside", &confine_strand(&path, &plate, true));
    print_pieces("outside", &erase_strand(&path, &plate, true));

    // a strand running along the plate's top edge
    let edge = line_strand![(-6.0, 2.0), (6.0, 2.0)]?;
    print_pieces("edge erased", &erase_strand(&edge, &plate, true));
    print_pieces("edge kept", &erase_strand(&edge, &plate, false));

    Ok(())
}
