use super::{
    cut_figures, fuse_figures, intersect_figures, loop_boolean_op, BooleanOp, BooleanOptions,
    DisjointSet, LoopBooleanResult,
};
use crate::{bounding_box::spatial_index, core::traits::Real, error::Result, figure::Figure};

/// True if the figure contours cross, share boundary or one contains the other.
fn figures_interact<T>(a: &Figure<T>, b: &Figure<T>, options: &BooleanOptions<T>) -> Result<bool>
where
    T: Real,
{
    if !a
        .bounding_box()
        .overlaps_eps(&b.bounding_box(), options.pos_equal_eps)
    {
        return Ok(false);
    }

    let r = loop_boolean_op(a.contour(), b.contour(), BooleanOp::Fuse.policy(), options)?;
    Ok(r != LoopBooleanResult::NonCrossing {
        first_in_second: false,
        second_in_first: false,
    })
}

/// Union of two figure lists.
///
/// Figures of both lists are grouped by interaction (a figure joins a group if it interacts with
/// any member), groups of one figure pass through unchanged and the members of larger groups are
/// fused together.
pub fn fuse_figure_lists<T>(
    a: &[Figure<T>],
    b: &[Figure<T>],
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let figures: Vec<&Figure<T>> = a.iter().chain(b.iter()).collect();
    match figures.len() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![figures[0].clone()]),
        _ => {}
    }

    let eps = options.pos_equal_eps;
    let aabb_index = spatial_index(figures.iter().map(|f| f.bounding_box()));
    let mut groups = DisjointSet::new(figures.len());
    let mut query_stack = Vec::with_capacity(8);
    for (i, f) in figures.iter().enumerate() {
        let bb = f.bounding_box();
        let mut candidates = Vec::new();
        let mut query_visitor = |j: usize| {
            if j > i {
                candidates.push(j);
            }
        };
        aabb_index.visit_query_with_stack(
            bb.min_x - eps,
            bb.min_y - eps,
            bb.max_x + eps,
            bb.max_y + eps,
            &mut query_visitor,
            &mut query_stack,
        );

        for j in candidates {
            if groups.find(i) != groups.find(j) && figures_interact(f, figures[j], options)? {
                groups.union(i, j);
            }
        }
    }

    let mut result = Vec::new();
    for group in groups.groups() {
        if group.len() == 1 {
            result.push(figures[group[0]].clone());
            continue;
        }

        result.extend(fuse_group(
            group.into_iter().map(|i| figures[i].clone()).collect(),
            options,
        )?);
    }

    Ok(result)
}

/// Fuses a group of interacting figures.
///
/// A figure is merged into an earlier result only when their union is a single figure, the
/// merged figure is then queued again. Unions giving several figures (an island inside a hole)
/// leave both figures in place.
fn fuse_group<T>(mut pending: Vec<Figure<T>>, options: &BooleanOptions<T>) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    pending.reverse();
    let mut done: Vec<Figure<T>> = Vec::with_capacity(pending.len());
    while let Some(f) = pending.pop() {
        let mut merged = None;
        for (k, r) in done.iter().enumerate() {
            if !figures_interact(r, &f, options)? {
                continue;
            }

            let mut fused = fuse_figures(r, &f, options)?;
            if fused.len() == 1 {
                merged = fused.pop().map(|m| (k, m));
                break;
            }
        }

        match merged {
            Some((k, m)) => {
                done.remove(k);
                pending.push(m);
            }
            None => done.push(f),
        }
    }

    Ok(done)
}

/// Every figure of `a` with all figures of `b` removed.
pub fn cut_figure_lists<T>(
    a: &[Figure<T>],
    b: &[Figure<T>],
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let mut result = Vec::with_capacity(a.len());
    for fa in a {
        let mut pieces = vec![fa.clone()];
        for fb in b {
            let fb_bb = fb.bounding_box();
            let mut next = Vec::with_capacity(pieces.len());
            for p in pieces {
                if p.bounding_box().overlaps_eps(&fb_bb, eps) {
                    next.extend(cut_figures(&p, fb, options)?);
                } else {
                    next.push(p);
                }
            }
            pieces = next;
        }
        result.extend(pieces);
    }

    Ok(result)
}

/// Pairwise intersections between the figures of `a` and `b`.
pub fn intersect_figure_lists<T>(
    a: &[Figure<T>],
    b: &[Figure<T>],
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let mut result = Vec::new();
    for fa in a {
        let fa_bb = fa.bounding_box();
        for fb in b {
            if fa_bb.overlaps_eps(&fb.bounding_box(), eps) {
                result.extend(intersect_figures(fa, fb, options)?);
            }
        }
    }

    Ok(result)
}
