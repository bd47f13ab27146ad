use crate::{
    core::{math::Vector2, traits::Real},
    segment::{Curve, Segment},
    stroke::Strand,
};

/// Groups consecutive segments into strands, ending a strand after every segment whose last
/// point is one of `break_points`.
///
/// Segments flagged in `shared` always form a strand of their own. Each returned strand carries
/// the flag of its segments. The last strand ends with the last segment whether or not it ends on
/// a break point.
pub fn strands_between_points<T>(
    segments: &[Segment<T>],
    shared: &[bool],
    break_points: &[Vector2<T>],
    eps: T,
) -> Vec<(Strand<T>, bool)>
where
    T: Real,
{
    debug_assert_eq!(segments.len(), shared.len());
    let mut result = Vec::new();
    let mut current = Vec::new();
    for (i, seg) in segments.iter().enumerate() {
        current.push(*seg);
        let next_shared = shared.get(i + 1).copied().unwrap_or(false);
        let at_break = break_points
            .iter()
            .any(|p| p.fuzzy_eq_eps(seg.last_point(), eps));
        if shared[i] || next_shared || at_break {
            result.push((
                Strand::new_unchecked(std::mem::take(&mut current)),
                shared[i],
            ));
        }
    }

    if !current.is_empty() {
        result.push((Strand::new_unchecked(current), false));
    }

    result
}
