use planar_kernel::{
    core::math::vec2,
    diagram::Diagram,
    figure::Figure,
    line_strand,
    ops::{confine_strand, erase_strand},
    shapes::{circle, rect},
    stroke::{Strand, Stroke},
};

fn lengths(strands: &[Strand<f64>]) -> Vec<f64> {
    strands.iter().map(|s| s.length()).collect()
}

fn assert_lengths(strands: &[Strand<f64>], expected: &[f64]) {
    let actual = lengths(strands);
    assert_eq!(actual.len(), expected.len(), "lengths {:?}", actual);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "lengths {:?} expected {:?}", actual, expected);
    }
}

fn ring() -> Figure<f64> {
    Figure::new(rect(6.0, 6.0), vec![rect(2.0, 2.0).reverse()]).unwrap()
}

#[test]
fn line_across_loop() {
    let square = rect(2.0, 2.0);
    let line = line_strand![(-3.0, 0.5), (3.0, 0.5)].unwrap();

    let outside = erase_strand(&line, &square, true);
    assert_lengths(&outside, &[2.0, 2.0]);
    assert!(outside[0].first_point().fuzzy_eq(vec2(-3.0, 0.5)));
    assert!(outside[1].last_point().fuzzy_eq(vec2(3.0, 0.5)));

    let inside = confine_strand(&line, &square, true);
    assert_lengths(&inside, &[2.0]);
    assert!(inside[0].first_point().fuzzy_eq(vec2(-1.0, 0.5)));
}

#[test]
fn line_across_figure_with_hole() {
    let line = line_strand![(-4.0, 0.0), (4.0, 0.0)].unwrap();

    let inside = confine_strand(&line, &ring(), true);
    assert_lengths(&inside, &[2.0, 2.0]);

    let outside = erase_strand(&line, &ring(), true);
    // both ends plus the part crossing the hole
    assert_lengths(&outside, &[1.0, 2.0, 1.0]);
}

#[test]
fn polyline_in_diagram() {
    let diagram = Diagram::new(vec![
        Figure::full(rect(2.0, 2.0)),
        Figure::full(rect(2.0, 2.0).translate(vec2(4.0, 0.0))),
    ])
    .unwrap();
    let path = line_strand![(-2.0, 0.0), (6.0, 0.0), (6.0, 5.0)].unwrap();

    let inside = confine_strand(&path, &diagram, true);
    assert_lengths(&inside, &[2.0, 2.0]);

    let outside = erase_strand(&path, &diagram, true);
    assert_lengths(&outside, &[1.0, 2.0, 6.0]);
}

#[test]
fn strand_along_border() {
    let square = rect(2.0, 2.0);
    // bottom edge from the middle, then straight out of the square
    let path = line_strand![(0.0, -1.0), (1.0, -1.0), (3.0, -1.0)].unwrap();

    assert_lengths(&erase_strand(&path, &square, true), &[2.0]);
    assert_lengths(&erase_strand(&path, &square, false), &[3.0]);
    assert!(confine_strand(&path, &square, true).is_empty());
    assert_lengths(&confine_strand(&path, &square, false), &[1.0]);
}

#[test]
fn strand_fully_inside_or_outside() {
    let disc = circle(2.0);
    let inner = line_strand![(-1.0, 0.0), (1.0, 0.0), (1.0, 1.0)].unwrap();
    let outer = line_strand![(3.0, 0.0), (4.0, 0.0)].unwrap();

    assert_lengths(&confine_strand(&inner, &disc, true), &[3.0]);
    assert!(erase_strand(&inner, &disc, true).is_empty());

    assert!(confine_strand(&outer, &disc, true).is_empty());
    assert_lengths(&erase_strand(&outer, &disc, true), &[1.0]);
}

#[test]
fn line_through_circle() {
    let disc = circle(1.0);
    let line = line_strand![(-2.0, 0.5), (2.0, 0.5)].unwrap();
    let chord = 3f64.sqrt();

    let inside = confine_strand(&line, &disc, true);
    assert_lengths(&inside, &[chord]);
    let outside = erase_strand(&line, &disc, true);
    assert_lengths(&outside, &[2.0 - chord / 2.0, 2.0 - chord / 2.0]);
}
