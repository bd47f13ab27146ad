use super::{
    find_stroke_intersects, split_segments, stitch_strands, strands_between_points,
    stroke_intersects::push_distinct, BooleanOp, BooleanOptions, BooleanPolicy,
};
use crate::{
    core::{math::Vector2, traits::Real},
    error::{AlgorithmError, Result},
    log::debug,
    segment::{Curve, Segment},
    stroke::{Loop, Strand, Stroke},
};

/// Outcome of [loop_boolean_op].
#[derive(Debug, Clone, PartialEq)]
pub enum LoopBooleanResult<T> {
    /// Both loops trace the same curve.
    Identical,
    /// The loops do not cross, at most they touch at isolated points.
    NonCrossing {
        first_in_second: bool,
        second_in_first: bool,
    },
    /// Loops assembled from the selected strands.
    Loops(Vec<Loop<T>>),
}

/// Boolean operation between two loops, returning the resulting loops.
///
/// Loops that do not cross resolve by containment, e.g. cutting a loop by a loop it contains
/// returns both loops (the second becomes a hole once organised into figures).
///
/// # Examples
///
/// ```
/// # use planar_kernel::algorithms::*;
/// # use planar_kernel::core::math::vec2;
/// # use planar_kernel::shapes::rect;
/// let a = rect(2.0_f64, 2.0);
/// let b = rect(2.0, 2.0).translate(vec2(1.0, 0.0));
/// let result = loop_boolean(&a, &b, BooleanOp::Fuse, &BooleanOptions::new()).unwrap();
/// assert_eq!(result.len(), 1);
/// assert!((result[0].area() - 6.0).abs() < 1e-9);
/// ```
pub fn loop_boolean<T>(
    first: &Loop<T>,
    second: &Loop<T>,
    op: BooleanOp,
    options: &BooleanOptions<T>,
) -> Result<Vec<Loop<T>>>
where
    T: Real,
{
    let result = match loop_boolean_op(first, second, op.policy(), options)? {
        LoopBooleanResult::Loops(loops) => loops,
        LoopBooleanResult::Identical => match op {
            BooleanOp::Fuse | BooleanOp::Intersect => vec![first.clone()],
            BooleanOp::Cut => Vec::new(),
        },
        LoopBooleanResult::NonCrossing {
            first_in_second,
            second_in_first,
        } => match (op, first_in_second, second_in_first) {
            (BooleanOp::Fuse, true, _) => vec![second.clone()],
            (BooleanOp::Fuse, false, true) => vec![first.clone()],
            (BooleanOp::Fuse, false, false) => vec![first.clone(), second.clone()],
            (BooleanOp::Cut, true, _) => Vec::new(),
            (BooleanOp::Cut, false, true) => vec![first.clone(), second.clone()],
            (BooleanOp::Cut, false, false) => vec![first.clone()],
            (BooleanOp::Intersect, true, _) => vec![first.clone()],
            (BooleanOp::Intersect, false, true) => vec![second.clone()],
            (BooleanOp::Intersect, false, false) => Vec::new(),
        },
    };

    Ok(result)
}

/// Splits both loops at their intersects and selects strands according to `policy`.
///
/// Returns [LoopBooleanResult::NonCrossing] or [LoopBooleanResult::Identical] instead of loops
/// when the loops do not cross, leaving the resolution to the caller.
pub fn loop_boolean_op<T>(
    first: &Loop<T>,
    second: &Loop<T>,
    policy: BooleanPolicy,
    options: &BooleanOptions<T>,
) -> Result<LoopBooleanResult<T>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let first_bb = first.bounding_box();
    let second_bb = second.bounding_box();
    if !first_bb.overlaps_eps(&second_bb, eps) {
        return Ok(LoopBooleanResult::NonCrossing {
            first_in_second: false,
            second_in_first: false,
        });
    }

    if first_bb.fuzzy_eq_eps(&second_bb, eps) && first.is_same(second, eps) {
        return Ok(LoopBooleanResult::Identical);
    }

    let intersects = find_stroke_intersects(first.segments(), second.segments(), eps);
    let mut first_pieces = split_segments(first.segments(), &intersects.first_points, eps);
    let mut second_pieces = split_segments(second.segments(), &intersects.second_points, eps);

    let mut crossings = Vec::with_capacity(intersects.points.len());
    for &p in intersects.points.iter() {
        if is_touch_point(&first_pieces, second, p, eps)?
            || is_touch_point(&second_pieces, first, p, eps)?
        {
            continue;
        }
        crossings.push(p);
    }

    if crossings.is_empty() && intersects.overlaps.is_empty() {
        debug!(
            touch_points = intersects.points.len(),
            "loops do not cross, resolving by containment"
        );
        return Ok(non_crossing(&first_pieces, first, &second_pieces, second, eps));
    }

    if intersects.overlaps.is_empty() && crossings.len() % 2 == 1 {
        return Err(AlgorithmError::OddCrossingCount {
            count: crossings.len(),
        }
        .into());
    }

    let mut first_shared = shared_flags(&first_pieces, &intersects.overlaps, eps);
    let mut second_shared = shared_flags(&second_pieces, &intersects.overlaps, eps);

    // first list starts at the beginning of a shared run, or at a crossing
    let start = if intersects.overlaps.is_empty() {
        first_pieces
            .iter()
            .position(|s| crossings.iter().any(|p| p.fuzzy_eq_eps(s.first_point(), eps)))
            .ok_or(AlgorithmError::VertexNotFound)?
    } else {
        let n = first_pieces.len();
        match (0..n).find(|&i| first_shared[i] && !first_shared[(i + n - 1) % n]) {
            Some(i) => i,
            None => return Ok(LoopBooleanResult::Identical),
        }
    };
    first_pieces.rotate_left(start);
    first_shared.rotate_left(start);

    let v = first_pieces[0].first_point();
    let second_start = second_pieces
        .iter()
        .position(|s| s.first_point().fuzzy_eq_eps(v, eps))
        .ok_or(AlgorithmError::VertexNotFound)?;
    second_pieces.rotate_left(second_start);
    second_shared.rotate_left(second_start);

    let mut break_points = crossings;
    for p in intersects.overlap_points(eps) {
        push_distinct(&mut break_points, p, eps);
    }

    let first_strands = strands_between_points(&first_pieces, &first_shared, &break_points, eps);
    let mut second_strands =
        strands_between_points(&second_pieces, &second_shared, &break_points, eps);
    if first_strands.len() != second_strands.len() {
        return Err(AlgorithmError::StrandCountMismatch {
            first: first_strands.len(),
            second: second_strands.len(),
        }
        .into());
    }

    let ends_match = |f: &[(Strand<T>, bool)], s: &[(Strand<T>, bool)]| {
        f[0].0.last_point().fuzzy_eq_eps(s[0].0.last_point(), eps)
    };
    let mut aligned = ends_match(&first_strands, &second_strands);
    if !aligned {
        second_strands = second_strands
            .iter()
            .rev()
            .map(|(s, shared)| (s.reverse(), *shared))
            .collect();
        aligned = ends_match(&first_strands, &second_strands);
    }

    let selected = select_strands(&first_strands, &second_strands, first, second, policy, eps);

    let chained = if options.positional_chaining && aligned {
        chain_positional(&selected, eps)
    } else {
        None
    };
    let rings = match chained {
        Some(rings) => rings,
        None => {
            debug!(
                strand_count = selected.len(),
                aligned, "positional chaining failed, stitching selected strands"
            );
            stitch_strands(&selected, eps)?
        }
    };

    let mut loops = Vec::with_capacity(rings.len());
    for ring in rings {
        loops.extend(ring_to_loops(ring, eps));
    }

    Ok(LoopBooleanResult::Loops(loops))
}

/// True if `other` only touches the loop of `pieces` at `p` without crossing it.
fn is_touch_point<T>(pieces: &[Segment<T>], other: &Loop<T>, p: Vector2<T>, eps: T) -> Result<bool>
where
    T: Real,
{
    let n = pieces.len();
    let k = pieces
        .iter()
        .position(|s| s.last_point().fuzzy_eq_eps(p, eps))
        .ok_or(AlgorithmError::VertexNotFound)?;
    let before = pieces[k].mid_point();
    let after = pieces[(k + 1) % n].mid_point();
    if other.on_stroke(before, eps) || other.on_stroke(after, eps) {
        return Ok(false);
    }

    Ok(other.contains_eps(before, eps) == other.contains_eps(after, eps))
}

fn non_crossing<T>(
    first_pieces: &[Segment<T>],
    first: &Loop<T>,
    second_pieces: &[Segment<T>],
    second: &Loop<T>,
    eps: T,
) -> LoopBooleanResult<T>
where
    T: Real,
{
    let probe = |pieces: &[Segment<T>], other: &Loop<T>| {
        pieces
            .iter()
            .map(|s| s.mid_point())
            .find(|&m| !other.on_stroke(m, eps))
    };

    match (probe(first_pieces, second), probe(second_pieces, first)) {
        (Some(p), Some(q)) => {
            let first_in_second = second.contains_eps(p, eps);
            let second_in_first = first.contains_eps(q, eps);
            if first_in_second && second_in_first {
                LoopBooleanResult::Identical
            } else {
                LoopBooleanResult::NonCrossing {
                    first_in_second,
                    second_in_first,
                }
            }
        }
        _ => LoopBooleanResult::Identical,
    }
}

fn shared_flags<T>(pieces: &[Segment<T>], overlaps: &[Segment<T>], eps: T) -> Vec<bool>
where
    T: Real,
{
    pieces
        .iter()
        .map(|s| {
            let m = s.mid_point();
            overlaps.iter().any(|o| o.is_on_segment(m, eps))
        })
        .collect()
}

/// Bookkeeping carried along the first strand list while deciding shared runs.
#[derive(Debug, Clone, Copy, Default)]
struct SharedRunState {
    /// Selected non-shared strands incident to the start of the current shared run.
    strands_in: usize,
    last_was_same: bool,
}

/// Selects the strands kept by `policy`, in pairing order (first strand `i`, then second strand
/// `i`).
///
/// A run of shared strands is kept only when exactly one selected strand arrives at its start,
/// otherwise the output would branch (two strands) or dead end (none) at that vertex.
fn select_strands<T>(
    first_strands: &[(Strand<T>, bool)],
    second_strands: &[(Strand<T>, bool)],
    first: &Loop<T>,
    second: &Loop<T>,
    policy: BooleanPolicy,
    eps: T,
) -> Vec<Strand<T>>
where
    T: Real,
{
    let first_keep: Vec<bool> = first_strands
        .iter()
        .map(|(s, shared)| {
            !shared && policy.keeps_first(second.contains_eps(s.probe_point(), eps))
        })
        .collect();
    let second_keep: Vec<bool> = second_strands
        .iter()
        .map(|(s, shared)| {
            !shared && policy.keeps_second(first.contains_eps(s.probe_point(), eps))
        })
        .collect();

    let incident = |strand: &Strand<T>, u: Vector2<T>| {
        strand.first_point().fuzzy_eq_eps(u, eps) || strand.last_point().fuzzy_eq_eps(u, eps)
    };
    let selected_in = |u: Vector2<T>| {
        let from_first = first_strands
            .iter()
            .zip(first_keep.iter())
            .filter(|((s, _), &keep)| keep && incident(s, u))
            .count();
        let from_second = second_strands
            .iter()
            .zip(second_keep.iter())
            .filter(|((s, _), &keep)| keep && incident(s, u))
            .count();
        from_first + from_second
    };

    let mut state = SharedRunState::default();
    let mut result = Vec::new();
    for (i, (strand, shared)) in first_strands.iter().enumerate() {
        if *shared {
            if !state.last_was_same {
                state.strands_in = selected_in(strand.first_point());
            }
            state.last_was_same = true;
            if state.strands_in == 1 {
                result.push(strand.clone());
            }
        } else {
            state.last_was_same = false;
            if first_keep[i] {
                result.push(strand.clone());
            }
        }

        if second_keep[i] {
            result.push(second_strands[i].0.clone());
        }
    }

    result
}

/// Chains strands in the given order, returns `None` if a strand does not connect to the running
/// chain or a chain is left open.
fn chain_positional<T>(selected: &[Strand<T>], eps: T) -> Option<Vec<Strand<T>>>
where
    T: Real,
{
    let mut result = Vec::new();
    let mut current: Option<Strand<T>> = None;
    for s in selected.iter() {
        let chain = match current.take() {
            None => s.clone(),
            Some(mut c) => {
                let end = c.last_point();
                if end.fuzzy_eq_eps(s.first_point(), eps) {
                    c.push_unchecked(s);
                } else if end.fuzzy_eq_eps(s.last_point(), eps) {
                    c.push_unchecked(&s.reverse());
                } else {
                    return None;
                }
                c
            }
        };

        if chain.first_point().fuzzy_eq_eps(chain.last_point(), eps) {
            result.push(chain);
        } else {
            current = Some(chain);
        }
    }

    if current.is_some() {
        return None;
    }

    Some(result)
}

/// Splits a closed ring at vertices it passes through more than once, so tangent contacts
/// produce separate loops touching at a point.
fn split_pinched<T>(segments: Vec<Segment<T>>, eps: T) -> Vec<Vec<Segment<T>>>
where
    T: Real,
{
    let mut result = Vec::new();
    let mut path: Vec<Segment<T>> = Vec::with_capacity(segments.len());
    for seg in segments {
        let end = seg.last_point();
        path.push(seg);
        if let Some(j) = path
            .iter()
            .position(|s| s.first_point().fuzzy_eq_eps(end, eps))
        {
            result.push(path.split_off(j));
        }
    }

    if !path.is_empty() {
        result.push(path);
    }

    result
}

fn ring_to_loops<T>(ring: Strand<T>, eps: T) -> Vec<Loop<T>>
where
    T: Real,
{
    if !ring.first_point().fuzzy_eq_eps(ring.last_point(), eps) {
        debug!("discarding open ring");
        return Vec::new();
    }

    let mut loops = Vec::new();
    for part in split_pinched(ring.into_segments(), eps) {
        let l = Loop::new_unchecked(part).simplify_eps(eps);
        if l.segments().len() < 2 {
            debug!("discarding degenerate ring");
            continue;
        }
        loops.push(l.oriented(true));
    }

    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, shapes::rect};

    #[test]
    fn touching_corner_is_not_a_crossing() {
        let a = rect(2.0, 2.0);
        let b = rect(2.0, 2.0).translate(vec2(2.0, 2.0));
        let r = loop_boolean_op(&a, &b, BooleanOp::Fuse.policy(), &BooleanOptions::new()).unwrap();
        assert_eq!(
            r,
            LoopBooleanResult::NonCrossing {
                first_in_second: false,
                second_in_first: false
            }
        );
    }

    #[test]
    fn identical_loops() {
        let a = rect(2.0, 2.0);
        let b = a.reverse();
        let r = loop_boolean_op(&a, &b, BooleanOp::Cut.policy(), &BooleanOptions::new()).unwrap();
        assert_eq!(r, LoopBooleanResult::Identical);
    }

    #[test]
    fn chain_positional_rejects_gap() {
        let strands = vec![
            Strand::new_unchecked(vec![Segment::line(vec2(0.0, 0.0), vec2(1.0, 0.0))]),
            Strand::new_unchecked(vec![Segment::line(vec2(2.0, 0.0), vec2(0.0, 0.0))]),
        ];
        assert!(chain_positional(&strands, 1e-9).is_none());
    }

    #[test]
    fn pinched_ring_becomes_two_loops() {
        let pts: [(f64, f64); 7] = [
            (0.0, 0.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (0.0, 0.0),
            (-1.0, 1.0),
            (-1.0, -1.0),
            (0.0, 0.0),
        ];
        let ring = Strand::new_unchecked(
            pts.windows(2)
                .map(|w| Segment::line(vec2(w[0].0, w[0].1), vec2(w[1].0, w[1].1)))
                .collect(),
        );

        let loops = ring_to_loops(ring, 1e-9);
        assert_eq!(loops.len(), 2);
        for l in loops.iter() {
            assert_eq!(l.segments().len(), 3);
            assert!(!l.clockwise());
            assert!((l.area() - 1.0).abs() < 1e-12);
        }
    }
}
