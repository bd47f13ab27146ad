mod test_utils;

use std::f64::consts::PI;

use planar_kernel::{
    algorithms::{loop_boolean, BooleanOp, BooleanOptions},
    core::math::vec2,
    line_loop,
    segment::{CubicBezier, QuadraticBezier, Segment},
    shapes::{circle, ellipse, rect},
    stroke::{Loop, Stroke},
};
use test_utils::{
    create_property_set, loop_sets_same, property_sets_match, LoopProperties, ModifiedLoopSet,
};

fn run(a: &Loop<f64>, b: &Loop<f64>, op: BooleanOp) -> Vec<Loop<f64>> {
    loop_boolean(a, b, op, &BooleanOptions::new()).unwrap()
}

fn total_area(loops: &[Loop<f64>]) -> f64 {
    loops.iter().map(|l| l.area()).sum()
}

/// Region under a cubic arch over `[0, 3]`, peak height 1.5.
fn cubic_dome() -> Loop<f64> {
    let arch = CubicBezier::new(
        vec2(3.0, 0.0),
        vec2(2.0, 2.0),
        vec2(1.0, 2.0),
        vec2(0.0, 0.0),
    );
    Loop::new(vec![Segment::line(vec2(0.0, 0.0), vec2(3.0, 0.0)), arch.into()]).unwrap()
}

/// Region under a quadratic arch over `[0, 2]`, peak height 1.
fn quad_dome() -> Loop<f64> {
    let arch = QuadraticBezier::new(vec2(2.0, 0.0), vec2(1.0, 2.0), vec2(0.0, 0.0));
    Loop::new(vec![Segment::line(vec2(0.0, 0.0), vec2(2.0, 0.0)), arch.into()]).unwrap()
}

/// Every result loop must pass the checked loop constructor.
fn assert_well_formed(loops: &[Loop<f64>]) {
    for l in loops {
        assert!(
            Loop::new(l.segments().to_vec()).is_ok(),
            "result loop is not closed and simple: {:?}",
            l
        );
    }
}

#[test]
fn overlapping_rects() {
    let a = rect(2.0, 2.0);
    let b = rect(2.0, 2.0).translate(vec2(1.0, 0.0));

    let fused = [LoopProperties::new(4, 6.0, 10.0, -1.0, -1.0, 2.0, 1.0)];
    let cut = [LoopProperties::new(4, 2.0, 6.0, -1.0, -1.0, 0.0, 1.0)];
    let intersected = [LoopProperties::new(4, 2.0, 6.0, 0.0, -1.0, 1.0, 1.0)];

    ModifiedLoopSet::new(&a, true, true).accept_closure(&mut |a, a_state| {
        ModifiedLoopSet::new(&b, true, true).accept_closure(&mut |b, b_state| {
            for (op, expected) in [
                (BooleanOp::Fuse, &fused),
                (BooleanOp::Cut, &cut),
                (BooleanOp::Intersect, &intersected),
            ] {
                let result = run(&a, &b, op);
                assert_well_formed(&result);
                assert!(
                    property_sets_match(&create_property_set(&result), expected),
                    "boolean op: {:?}, modified state a: {:?}, modified state b: {:?}",
                    op,
                    a_state,
                    b_state
                );
            }
        });
    });
}

#[test]
fn overlapping_rects_match_reference_loops() {
    let a = rect(2.0, 2.0);
    let b = rect(2.0, 2.0).translate(vec2(1.0, 0.0));

    let fused = run(&a, &b, BooleanOp::Fuse);
    assert!(loop_sets_same(
        &fused,
        &[rect(3.0, 2.0).translate(vec2(0.5, 0.0))]
    ));

    let cut = run(&a, &b, BooleanOp::Cut);
    assert!(loop_sets_same(
        &cut,
        &[rect(1.0, 2.0).translate(vec2(-0.5, 0.0))]
    ));

    let intersected = run(&a, &b, BooleanOp::Intersect);
    assert!(loop_sets_same(
        &intersected,
        &[rect(1.0, 2.0).translate(vec2(0.5, 0.0))]
    ));
}

#[test]
fn disjoint_rects() {
    let a = rect(2.0, 2.0);
    let b = rect(2.0, 2.0).translate(vec2(5.0, 0.0));

    let fused = run(&a, &b, BooleanOp::Fuse);
    assert_eq!(fused, vec![a.clone(), b.clone()]);

    let cut = run(&a, &b, BooleanOp::Cut);
    assert_eq!(cut, vec![a.clone()]);

    assert!(run(&a, &b, BooleanOp::Intersect).is_empty());
}

#[test]
fn corner_touching_rects_stay_disjoint() {
    let a = rect(2.0, 2.0);
    let b = rect(2.0, 2.0).translate(vec2(2.0, 2.0));

    assert_eq!(run(&a, &b, BooleanOp::Fuse).len(), 2);
    assert_eq!(run(&a, &b, BooleanOp::Cut), vec![a.clone()]);
    assert!(run(&a, &b, BooleanOp::Intersect).is_empty());
}

#[test]
fn nested_rects() {
    let outer = rect(4.0, 4.0);
    let inner = rect(2.0, 2.0);

    assert!(loop_sets_same(
        &run(&outer, &inner, BooleanOp::Fuse),
        &[outer.clone()]
    ));
    assert!(loop_sets_same(
        &run(&outer, &inner, BooleanOp::Cut),
        &[outer.clone(), inner.clone()]
    ));
    assert!(loop_sets_same(
        &run(&outer, &inner, BooleanOp::Intersect),
        &[inner.clone()]
    ));

    // inner loop first
    assert!(loop_sets_same(
        &run(&inner, &outer, BooleanOp::Fuse),
        &[outer.clone()]
    ));
    assert!(run(&inner, &outer, BooleanOp::Cut).is_empty());
    assert!(loop_sets_same(
        &run(&inner, &outer, BooleanOp::Intersect),
        &[inner.clone()]
    ));
}

#[test]
fn nested_rects_sharing_corner_edges() {
    let outer = rect(4.0, 4.0);
    let inner = rect(2.0, 2.0).translate(vec2(1.0, 1.0));

    ModifiedLoopSet::new(&inner, true, true).accept_closure(&mut |inner, state| {
        let fused = run(&outer, &inner, BooleanOp::Fuse);
        assert!(loop_sets_same(&fused, &[outer.clone()]), "{:?}", state);

        let cut = run(&outer, &inner, BooleanOp::Cut);
        assert_well_formed(&cut);
        assert!(
            property_sets_match(
                &create_property_set(&cut),
                &[LoopProperties::new(6, 12.0, 16.0, -2.0, -2.0, 2.0, 2.0)]
            ),
            "{:?}",
            state
        );

        let intersected = run(&outer, &inner, BooleanOp::Intersect);
        assert!(loop_sets_same(&intersected, &[inner.clone()]), "{:?}", state);
    });
}

#[test]
fn side_by_side_rects_share_an_edge() {
    let a = rect(2.0, 2.0);
    let b = rect(2.0, 2.0).translate(vec2(2.0, 0.0));

    let fused = run(&a, &b, BooleanOp::Fuse);
    assert!(property_sets_match(
        &create_property_set(&fused),
        &[LoopProperties::new(4, 8.0, 12.0, -1.0, -1.0, 3.0, 1.0)]
    ));

    assert!(loop_sets_same(&run(&a, &b, BooleanOp::Cut), &[a.clone()]));
    assert!(run(&a, &b, BooleanOp::Intersect).is_empty());
}

#[test]
fn same_loop() {
    let a = rect(2.0, 2.0);
    ModifiedLoopSet::new(&a, true, true).accept_closure(&mut |b, state| {
        assert!(
            loop_sets_same(&run(&a, &b, BooleanOp::Fuse), &[a.clone()]),
            "{:?}",
            state
        );
        assert!(
            loop_sets_same(&run(&a, &b, BooleanOp::Intersect), &[a.clone()]),
            "{:?}",
            state
        );
        assert!(run(&a, &b, BooleanOp::Cut).is_empty(), "{:?}", state);
    });

    // same square traced with a split edge
    let split = line_loop![(-1.0, -1.0), (0.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)].unwrap();
    assert!(loop_sets_same(&run(&a, &split, BooleanOp::Fuse), &[a.clone()]));
    assert!(run(&a, &split, BooleanOp::Cut).is_empty());
}

#[test]
fn crossing_circles() {
    let a = circle(1.0);
    let b = circle(1.0).translate(vec2(1.0, 0.0));
    let lens = 2.0 * PI / 3.0 - 3f64.sqrt() / 2.0;

    let intersected = run(&a, &b, BooleanOp::Intersect);
    assert_eq!(intersected.len(), 1);
    assert!((total_area(&intersected) - lens).abs() < 1e-9);

    let fused = run(&a, &b, BooleanOp::Fuse);
    assert_eq!(fused.len(), 1);
    assert!((total_area(&fused) - (2.0 * PI - lens)).abs() < 1e-9);

    let cut = run(&a, &b, BooleanOp::Cut);
    assert_eq!(cut.len(), 1);
    assert!((total_area(&cut) - (PI - lens)).abs() < 1e-9);

    assert_well_formed(&intersected);
    assert_well_formed(&fused);
    assert_well_formed(&cut);
}

#[test]
fn cut_plus_intersect_is_first_area() {
    let pairs = [
        (rect(2.0, 2.0), rect(2.0, 2.0).translate(vec2(1.0, 0.0))),
        (circle(1.0), rect(2.0, 2.0).translate(vec2(1.2, 0.3))),
        (rect(3.0, 1.0), rect(3.0, 1.0).rotate_about(vec2(0.0, 0.0), 0.7)),
        (ellipse(2.0, 1.0), rect(2.0, 4.0)),
        (circle(1.0), circle(0.5).translate(vec2(0.8, 0.1))),
        (cubic_dome(), rect(2.0, 2.0).translate(vec2(1.5, 1.5))),
        (cubic_dome(), circle(1.0).translate(vec2(1.5, 1.2))),
        (cubic_dome(), quad_dome().translate(vec2(0.5, 0.8))),
        (quad_dome(), rect(1.0, 2.0).translate(vec2(1.0, 1.5))),
    ];

    for (a, b) in pairs.iter() {
        let cut = run(a, b, BooleanOp::Cut);
        let intersected = run(a, b, BooleanOp::Intersect);
        assert!(!intersected.is_empty());
        let sum = total_area(&cut) + total_area(&intersected);
        assert!(
            (sum - a.area()).abs() < 1e-6,
            "cut {} + intersect {} != {}",
            total_area(&cut),
            total_area(&intersected),
            a.area()
        );
    }
}

#[test]
fn curved_results_are_well_formed() {
    let a = cubic_dome();
    let b = quad_dome().translate(vec2(0.5, 0.8));
    for op in [BooleanOp::Fuse, BooleanOp::Cut, BooleanOp::Intersect] {
        let result = run(&a, &b, op);
        assert_eq!(result.len(), 1, "op: {:?}", op);
        assert_well_formed(&result);
    }
}

#[test]
fn tangent_contact_splits_cut_result() {
    // the ellipse touches the top edge of the rect at (0.3, 0.5)
    let a = rect(2.0, 1.0);
    let b = ellipse(1.5, 0.7).translate(vec2(0.3, -0.2));

    let cut = run(&a, &b, BooleanOp::Cut);
    assert_eq!(cut.len(), 2);
    assert_well_formed(&cut);
    assert!(cut
        .iter()
        .all(|l| l.on_stroke(vec2(0.3, 0.5), 1e-6)));

    let intersected = run(&a, &b, BooleanOp::Intersect);
    assert_well_formed(&intersected);
    let sum = total_area(&cut) + total_area(&intersected);
    assert!((sum - a.area()).abs() < 1e-6);
    assert!((total_area(&cut) - 0.15097).abs() < 1e-4);
}

#[test]
fn ellipse_cut_by_band() {
    let e = ellipse(2.0, 1.0);
    let band = rect(2.0, 4.0);

    let cut = run(&e, &band, BooleanOp::Cut);
    assert_eq!(cut.len(), 2);

    let intersected = run(&e, &band, BooleanOp::Intersect);
    assert_eq!(intersected.len(), 1);

    let fused = run(&e, &band, BooleanOp::Fuse);
    assert_eq!(fused.len(), 1);
    let expected_fused = e.area() + band.area() - total_area(&intersected);
    assert!((total_area(&fused) - expected_fused).abs() < 1e-6);
}

#[test]
fn stitching_matches_positional_chaining() {
    let pairs = [
        (rect(2.0, 2.0), rect(2.0, 2.0).translate(vec2(1.0, 0.0))),
        (rect(4.0, 4.0), rect(2.0, 2.0).translate(vec2(1.0, 1.0))),
        (circle(1.0), circle(1.0).translate(vec2(1.0, 0.0))),
        (rect(2.0, 2.0), rect(2.0, 2.0).translate(vec2(2.0, 0.0))),
        (cubic_dome(), rect(2.0, 2.0).translate(vec2(1.5, 1.5))),
        (quad_dome(), circle(0.8).translate(vec2(1.0, 1.0))),
    ];

    let positional = BooleanOptions::new();
    let stitched = BooleanOptions {
        positional_chaining: false,
        ..BooleanOptions::new()
    };

    for (a, b) in pairs.iter() {
        for op in [BooleanOp::Fuse, BooleanOp::Cut, BooleanOp::Intersect] {
            let r1 = loop_boolean(a, b, op, &positional).unwrap();
            let r2 = loop_boolean(a, b, op, &stitched).unwrap();
            assert!(loop_sets_same(&r1, &r2), "op: {:?}", op);
        }
    }
}

#[test]
fn split_into_several_loops() {
    // a comb cut by a bar through its teeth
    let comb = line_loop![
        (0.0, 0.0),
        (5.0, 0.0),
        (5.0, 3.0),
        (4.0, 3.0),
        (4.0, 1.0),
        (3.0, 1.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (0.0, 3.0)
    ]
    .unwrap();
    let bar = line_loop![(-1.0, 2.0), (6.0, 2.0), (6.0, 2.5), (-1.0, 2.5)].unwrap();

    let cut = run(&comb, &bar, BooleanOp::Cut);
    // base with stubs plus three tooth tips
    assert_eq!(cut.len(), 4);
    assert_well_formed(&cut);

    let intersected = run(&comb, &bar, BooleanOp::Intersect);
    assert_eq!(intersected.len(), 3);
    assert!((total_area(&intersected) - 1.5).abs() < 1e-9);

    let sum = total_area(&cut) + total_area(&intersected);
    assert!((sum - comb.area()).abs() < 1e-9);
}
