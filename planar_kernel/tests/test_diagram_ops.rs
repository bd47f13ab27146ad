mod test_utils;

use planar_kernel::{
    core::math::vec2,
    diagram::Diagram,
    figure::Figure,
    ops::{cut, fuse, intersect},
    shapes::{circle, rect},
};
use test_utils::{diagram_property_set, property_sets_match, LoopProperties};

fn ring() -> Figure<f64> {
    Figure::new(rect(6.0, 6.0), vec![rect(2.0, 2.0).reverse()]).unwrap()
}

fn assert_valid(diagram: &Diagram<f64>) {
    assert!(Diagram::new(diagram.figures().to_vec()).is_ok());
    for f in diagram.figures() {
        assert!(!f.contour().clockwise());
        assert!(f.holes().iter().all(|h| h.clockwise()));
    }
}

fn assert_area(diagram: &Diagram<f64>, expected: f64) {
    assert!(
        (diagram.area() - expected).abs() < 1e-9,
        "area {} expected {}",
        diagram.area(),
        expected
    );
}

#[test]
fn fuse_chain_of_rects() {
    let a = Diagram::new(vec![
        Figure::full(rect(2.0, 2.0)),
        Figure::full(rect(2.0, 2.0).translate(vec2(3.0, 0.0))),
    ])
    .unwrap();
    // bridges the gap between the two squares of a
    let bridge = rect(2.0, 1.0).translate(vec2(1.5, 0.0));

    let result = fuse(&a, &bridge).unwrap();
    assert_eq!(result.figures().len(), 1);
    assert_valid(&result);
    assert_area(&result, 9.0);
    assert!(property_sets_match(
        &diagram_property_set(&result),
        &[LoopProperties::new(12, 9.0, 16.0, -1.0, -1.0, 4.0, 1.0)]
    ));
}

#[test]
fn fuse_keeps_disjoint_figures() {
    let a = rect(2.0, 2.0);
    let b = circle(1.0).translate(vec2(10.0, 0.0));
    let result = fuse(&a, &b).unwrap();
    assert_eq!(result.figures().len(), 2);
    assert_area(&result, 4.0 + std::f64::consts::PI);
}

#[test]
fn fuse_ring_and_island() {
    let island = rect(1.0, 1.0);
    let result = fuse(&ring(), &island).unwrap();
    assert_eq!(result.figures().len(), 2);
    assert_valid(&result);
    assert_area(&result, 33.0);

    // fusing the island again changes nothing
    let again = fuse(&result, &island).unwrap();
    assert_eq!(again.figures().len(), 2);
    assert_area(&again, 33.0);
}

#[test]
fn fuse_is_idempotent() {
    let d = fuse(&ring(), &rect(2.0, 2.0).translate(vec2(3.0, 3.0))).unwrap();
    let again = fuse(&d, &d).unwrap();
    assert_eq!(again.figures().len(), d.figures().len());
    assert_area(&again, d.area());
}

#[test]
fn cut_diagram_by_diagram() {
    let a = Diagram::new(vec![
        Figure::full(rect(2.0, 2.0)),
        Figure::full(rect(2.0, 2.0).translate(vec2(4.0, 0.0))),
    ])
    .unwrap();
    let b = Diagram::new(vec![
        Figure::full(rect(2.0, 2.0).translate(vec2(1.0, 0.0))),
        Figure::full(rect(1.0, 1.0).translate(vec2(4.0, 0.0))),
    ])
    .unwrap();

    let result = cut(&a, &b).unwrap();
    assert_eq!(result.figures().len(), 2);
    assert_valid(&result);
    // half of the first square and the second square with a hole
    assert_area(&result, 2.0 + 3.0);
}

#[test]
fn intersect_diagram_by_diagram() {
    let a = Diagram::new(vec![
        Figure::full(rect(2.0, 2.0)),
        Figure::full(rect(2.0, 2.0).translate(vec2(4.0, 0.0))),
    ])
    .unwrap();
    let band = rect(8.0, 1.0).translate(vec2(2.0, 0.0));

    let result = intersect(&a, &band).unwrap();
    assert_eq!(result.figures().len(), 2);
    assert_valid(&result);
    assert_area(&result, 4.0);
}

#[test]
fn cut_then_fuse_restores_area() {
    let a = ring();
    let b = circle(1.5).translate(vec2(2.6, 0.5));

    let cut_part = cut(&a, &b).unwrap();
    let common = intersect(&a, &b).unwrap();
    assert_area(&cut_part, a.area() - common.area());

    let restored = fuse(&cut_part, &common).unwrap();
    assert_area(&restored, a.area());
}

#[test]
fn empty_operands() {
    let empty = Diagram::<f64>::empty();
    let square = rect(2.0, 2.0);

    assert_area(&fuse(&empty, &square).unwrap(), 4.0);
    assert!(cut(&empty, &square).unwrap().is_empty());
    assert_area(&cut(&square, &empty).unwrap(), 4.0);
    assert!(intersect(&square, &empty).unwrap().is_empty());
}
