use super::{
    find_stroke_intersects, split_segments, strands_between_points,
    stroke_intersects::push_distinct,
};
use crate::{
    core::traits::Real,
    figure::Figure,
    segment::{Curve, Segment},
    stroke::{Loop, Strand, Stroke},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceSide {
    Inside,
    Outside,
    OnBorder,
}

/// Parts of `strand` outside the figures.
///
/// Parts running along a figure boundary are dropped when `erase_on_border` is true and kept
/// otherwise.
pub fn erase_strand_in_figures<T>(
    strand: &Strand<T>,
    figures: &[Figure<T>],
    erase_on_border: bool,
    eps: T,
) -> Vec<Strand<T>>
where
    T: Real,
{
    clip_strand(strand, figures, eps, |side| match side {
        PieceSide::Outside => true,
        PieceSide::Inside => false,
        PieceSide::OnBorder => !erase_on_border,
    })
}

/// Parts of `strand` inside the figures.
///
/// Parts running along a figure boundary are dropped when `erase_on_border` is true and kept
/// otherwise.
pub fn confine_strand_to_figures<T>(
    strand: &Strand<T>,
    figures: &[Figure<T>],
    erase_on_border: bool,
    eps: T,
) -> Vec<Strand<T>>
where
    T: Real,
{
    clip_strand(strand, figures, eps, |side| match side {
        PieceSide::Inside => true,
        PieceSide::Outside => false,
        PieceSide::OnBorder => !erase_on_border,
    })
}

fn clip_strand<T, F>(strand: &Strand<T>, figures: &[Figure<T>], eps: T, keep: F) -> Vec<Strand<T>>
where
    T: Real,
    F: Fn(PieceSide) -> bool,
{
    let strand_bb = strand.bounding_box();
    let loops: Vec<&Loop<T>> = figures
        .iter()
        .filter(|f| f.bounding_box().overlaps_eps(&strand_bb, eps))
        .flat_map(|f| f.all_loops())
        .collect();

    let segments = strand.segments();
    let mut split_points = vec![Vec::new(); segments.len()];
    let mut break_points = Vec::new();
    let mut overlaps: Vec<Segment<T>> = Vec::new();
    for l in loops.iter() {
        let intersects = find_stroke_intersects(segments, l.segments(), eps);
        for (pts, found) in split_points.iter_mut().zip(intersects.first_points.iter()) {
            pts.extend_from_slice(found);
        }
        for &p in intersects.points.iter() {
            push_distinct(&mut break_points, p, eps);
        }
        for p in intersects.overlap_points(eps) {
            push_distinct(&mut break_points, p, eps);
        }
        overlaps.extend(intersects.overlaps);
    }

    let pieces = split_segments(segments, &split_points, eps);
    let shared: Vec<bool> = pieces
        .iter()
        .map(|s| {
            let m = s.mid_point();
            overlaps.iter().any(|o| o.is_on_segment(m, eps))
        })
        .collect();

    let side_of = |part: &Strand<T>| {
        let p = part.probe_point();
        if loops.iter().any(|l| l.on_stroke(p, eps)) {
            PieceSide::OnBorder
        } else if figures.iter().any(|f| f.contains_eps(p, eps)) {
            PieceSide::Inside
        } else {
            PieceSide::Outside
        }
    };

    // consecutive kept parts that connect are merged back together
    let mut result: Vec<Strand<T>> = Vec::new();
    let mut extend_last = false;
    for (part, _) in strands_between_points(&pieces, &shared, &break_points, eps) {
        if !keep(side_of(&part)) {
            extend_last = false;
            continue;
        }

        let joins = extend_last
            && result
                .last()
                .is_some_and(|last| last.last_point().fuzzy_eq_eps(part.first_point(), eps));
        if let (true, Some(last)) = (joins, result.last_mut()) {
            last.push_unchecked(&part);
        } else {
            result.push(part);
        }
        extend_last = true;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, shapes::rect};

    #[test]
    fn line_through_square() {
        let square = [Figure::full(rect(2.0_f64, 2.0))];
        let line = Strand::from_points(&[vec2(-3.0, 0.0), vec2(3.0, 0.0)]).unwrap();

        let outside = erase_strand_in_figures(&line, &square, true, 1e-9);
        assert_eq!(outside.len(), 2);
        assert!(outside.iter().all(|s| (s.length() - 2.0).abs() < 1e-9));

        let inside = confine_strand_to_figures(&line, &square, true, 1e-9);
        assert_eq!(inside.len(), 1);
        assert!((inside[0].length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn border_flag() {
        let square = [Figure::full(rect(2.0_f64, 2.0))];
        // runs along the bottom edge then leaves the square
        let line = Strand::from_points(&[vec2(0.0, -1.0), vec2(3.0, -1.0)]).unwrap();

        let erased = erase_strand_in_figures(&line, &square, true, 1e-9);
        assert_eq!(erased.len(), 1);
        assert!((erased[0].length() - 2.0).abs() < 1e-9);

        let kept = erase_strand_in_figures(&line, &square, false, 1e-9);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].length() - 3.0).abs() < 1e-9);
    }
}
