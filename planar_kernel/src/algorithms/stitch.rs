use std::cmp::Ordering;

use crate::{
    bounding_box::{spatial_index, BoundingBox},
    core::traits::Real,
    error::{AlgorithmError, Result},
    log::debug,
    stroke::{Strand, Stroke},
};

/// Connects strands end to end into closed chains using a spatial index over all strand end
/// points.
///
/// Strands may be joined in either direction. Starting from each unvisited strand the nearest
/// unvisited end point matching the current chain end is appended until the chain returns to its
/// start. Chains that cannot be closed are discarded.
pub fn stitch_strands<T>(strands: &[Strand<T>], eps: T) -> Result<Vec<Strand<T>>>
where
    T: Real,
{
    let mut result = Vec::new();
    if strands.is_empty() {
        return Ok(result);
    }

    // slot 2 * k is the first point of strand k, slot 2 * k + 1 its last point
    let end_point = |slot: usize| {
        let s = &strands[slot / 2];
        if slot % 2 == 0 {
            s.first_point()
        } else {
            s.last_point()
        }
    };

    let aabb_index = spatial_index((0..strands.len() * 2).map(|slot| {
        let p = end_point(slot);
        BoundingBox::from_corners(p, p).expand(eps)
    }));

    let mut visited = vec![false; strands.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);
    let max_loop_count = strands.len();

    for i in 0..strands.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let mut current = strands[i].clone();
        let start = current.first_point();
        let mut loop_count = 0;
        loop {
            if loop_count > max_loop_count {
                return Err(AlgorithmError::StitchLoopGuard { max_loop_count }.into());
            }
            loop_count += 1;

            let end = current.last_point();
            if end.fuzzy_eq_eps(start, eps) {
                result.push(current);
                break;
            }

            query_results.clear();
            let mut query_visitor = |slot: usize| {
                if !visited[slot / 2] {
                    query_results.push(slot);
                }
            };
            aabb_index.visit_query_with_stack(
                end.x - eps,
                end.y - eps,
                end.x + eps,
                end.y + eps,
                &mut query_visitor,
                &mut query_stack,
            );

            let nearest = query_results
                .iter()
                .copied()
                .filter(|&slot| end_point(slot).fuzzy_eq_eps(end, eps))
                .min_by(|&a, &b| {
                    let da = (end_point(a) - end).length_squared();
                    let db = (end_point(b) - end).length_squared();
                    da.partial_cmp(&db).unwrap_or(Ordering::Equal)
                });

            match nearest {
                None => {
                    debug!(
                        segment_count = current.segments().len(),
                        "discarding unclosed chain while stitching"
                    );
                    break;
                }
                Some(slot) => {
                    let k = slot / 2;
                    visited[k] = true;
                    if slot % 2 == 0 {
                        current.push_unchecked(&strands[k]);
                    } else {
                        current.push_unchecked(&strands[k].reverse());
                    }
                }
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, segment::Segment};

    fn strand(points: &[(f64, f64)]) -> Strand<f64> {
        Strand::new_unchecked(
            points
                .windows(2)
                .map(|w| Segment::line(vec2(w[0].0, w[0].1), vec2(w[1].0, w[1].1)))
                .collect(),
        )
    }

    #[test]
    fn stitches_mixed_directions() {
        let strands = vec![
            strand(&[(0.0, 0.0), (1.0, 0.0)]),
            strand(&[(0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
            strand(&[(0.0, 1.0), (0.0, 0.0)]),
        ];
        let closed = stitch_strands(&strands, 1e-9).unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].segments().len(), 4);
        assert!(closed[0].first_point().fuzzy_eq(closed[0].last_point()));
    }

    #[test]
    fn two_separate_rings() {
        let strands = vec![
            strand(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            strand(&[(5.0, 0.0), (6.0, 0.0), (5.0, 1.0), (5.0, 0.0)]),
            strand(&[(0.0, 1.0), (0.0, 0.0)]),
        ];
        let closed = stitch_strands(&strands, 1e-9).unwrap();
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn open_chain_is_discarded() {
        let strands = vec![
            strand(&[(0.0, 0.0), (1.0, 0.0)]),
            strand(&[(1.0, 0.0), (2.0, 1.0)]),
        ];
        assert!(stitch_strands(&strands, 1e-9).unwrap().is_empty());
    }
}
