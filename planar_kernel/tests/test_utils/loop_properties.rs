#![allow(dead_code)]

use planar_kernel::{
    bounding_box::BoundingBox,
    core::traits::FuzzyEq,
    diagram::Diagram,
    stroke::{Loop, Stroke},
};

/// Holds a set of properties of a loop for comparison in tests.
#[derive(Debug, Copy, Clone)]
pub struct LoopProperties {
    pub segment_count: usize,
    pub area: f64,
    pub length: f64,
    pub extents: BoundingBox<f64>,
}

impl LoopProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-6;

    pub fn new(
        segment_count: usize,
        area: f64,
        length: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            segment_count,
            area,
            length,
            extents: BoundingBox::new(min_x, min_y, max_x, max_y),
        }
    }

    /// Properties of the simplified loop, area is unsigned.
    pub fn from_loop(l: &Loop<f64>) -> Self {
        let l = l.simplify();
        Self {
            segment_count: l.segments().len(),
            area: l.area(),
            length: l.length(),
            extents: l.bounding_box(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        if self.segment_count != other.segment_count {
            return false;
        }
        if !self.area.fuzzy_eq_eps(other.area, eps) {
            return false;
        }
        if !self.length.fuzzy_eq_eps(other.length, eps) {
            return false;
        }
        if !self.extents.fuzzy_eq_eps(&other.extents, eps) {
            return false;
        }
        true
    }
}

pub fn create_property_set<'a, I>(loops: I) -> Vec<LoopProperties>
where
    I: IntoIterator<Item = &'a Loop<f64>>,
{
    loops.into_iter().map(LoopProperties::from_loop).collect()
}

/// Property set of every loop (contours and holes) in a diagram.
pub fn diagram_property_set(diagram: &Diagram<f64>) -> Vec<LoopProperties> {
    create_property_set(diagram.figures().iter().flat_map(|f| f.all_loops()))
}

pub fn property_sets_match(result_set: &[LoopProperties], expected_set: &[LoopProperties]) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, LoopProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// True if every loop of `result` matches exactly one loop of `expected` by [Loop::is_same].
pub fn loop_sets_same(result: &[Loop<f64>], expected: &[Loop<f64>]) -> bool {
    result.len() == expected.len()
        && expected
            .iter()
            .all(|e| result.iter().filter(|r| r.is_same(e, 1e-9)).count() == 1)
}
