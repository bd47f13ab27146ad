use super::DisjointSet;
use crate::{
    bounding_box::spatial_index,
    core::traits::Real,
    figure::Figure,
    log::warn,
    stroke::{Loop, Stroke},
};

/// Rebuilds contour/hole figures from an unordered set of non-crossing loops.
///
/// Geometrically identical loops are merged. Loops contained in no other loop become contours,
/// loops directly inside a contour become its holes and loops nested deeper start new figures.
/// Contours are returned counter clockwise and holes clockwise.
pub fn organise_loops<T>(loops: Vec<Loop<T>>, eps: T) -> Vec<Figure<T>>
where
    T: Real,
{
    let mut unique: Vec<Loop<T>> = Vec::with_capacity(loops.len());
    for l in loops {
        let bb = l.bounding_box();
        let duplicate = unique
            .iter()
            .any(|u| u.bounding_box().fuzzy_eq_eps(&bb, eps) && u.is_same(&l, eps));
        if !duplicate {
            unique.push(l);
        }
    }

    let mut result = Vec::new();
    match unique.len() {
        0 => return result,
        1 => {
            organise_cluster(unique, eps, &mut result);
            return result;
        }
        _ => {}
    }

    // loops with disjoint boxes never nest, cluster by box overlap first
    let boxes: Vec<_> = unique.iter().map(|l| l.bounding_box()).collect();
    let aabb_index = spatial_index(boxes.iter().copied());
    let mut clusters = DisjointSet::new(unique.len());
    let mut query_stack = Vec::with_capacity(8);
    for (i, bb) in boxes.iter().enumerate() {
        let mut overlapping = Vec::new();
        let mut query_visitor = |j: usize| {
            if j > i {
                overlapping.push(j);
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
        for j in overlapping {
            clusters.union(i, j);
        }
    }

    let mut slots: Vec<Option<Loop<T>>> = unique.into_iter().map(Some).collect();
    for group in clusters.groups() {
        let members = group.into_iter().filter_map(|i| slots[i].take()).collect();
        organise_cluster(members, eps, &mut result);
    }

    result
}

/// True if `outer` contains `inner`, tested with a point of `inner` not on `outer`.
fn loop_contains<T: Real>(outer: &Loop<T>, inner: &Loop<T>, eps: T) -> bool {
    if !outer.bounding_box().contains_eps(&inner.bounding_box(), eps) {
        return false;
    }

    match inner.probe_point_against(outer, eps) {
        Some(p) => outer.contains_eps(p, eps),
        None => false,
    }
}

fn organise_cluster<T>(loops: Vec<Loop<T>>, eps: T, result: &mut Vec<Figure<T>>)
where
    T: Real,
{
    if loops.len() == 1 {
        result.extend(loops.into_iter().map(|l| Figure::full(l.oriented(true))));
        return;
    }

    let n = loops.len();
    let contained_by: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| j != i && loop_contains(&loops[j], &loops[i], eps))
                .collect()
        })
        .collect();

    let outers: Vec<usize> = (0..n).filter(|&i| contained_by[i].is_empty()).collect();
    match outers.len() {
        0 => {
            warn!(
                loop_count = n,
                "cyclic loop containment while organising, emitting full figures"
            );
            result.extend(loops.into_iter().map(|l| Figure::full(l.oriented(true))));
        }
        1 => {
            let outer = outers[0];
            let mut contour = None;
            let mut holes = Vec::new();
            let mut deeper = Vec::new();
            for (i, l) in loops.into_iter().enumerate() {
                if i == outer {
                    contour = Some(l.oriented(true));
                } else if contained_by[i].len() == 1 {
                    holes.push(l.oriented(false));
                } else {
                    deeper.push(l);
                }
            }

            if let Some(contour) = contour {
                result.push(Figure::new_unchecked(contour, holes));
            }
            if !deeper.is_empty() {
                organise_cluster(deeper, eps, result);
            }
        }
        _ => {
            // one sub problem per outer loop holding everything nested inside it
            let mut slots: Vec<Option<Loop<T>>> = loops.into_iter().map(Some).collect();
            for &o in outers.iter() {
                let mut members = Vec::new();
                if let Some(l) = slots[o].take() {
                    members.push(l);
                }
                for i in 0..n {
                    if contained_by[i].contains(&o) {
                        if let Some(l) = slots[i].take() {
                            members.push(l);
                        }
                    }
                }
                organise_cluster(members, eps, result);
            }

            let rest: Vec<Loop<T>> = slots.into_iter().flatten().collect();
            if !rest.is_empty() {
                organise_cluster(rest, eps, result);
            }
        }
    }
}
