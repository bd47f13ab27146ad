use super::{
    fuse_figure_lists, loop_boolean, loop_boolean_op, organise_loops, BooleanOp, BooleanOptions,
    LoopBooleanResult,
};
use crate::{
    core::traits::Real,
    error::Result,
    figure::Figure,
    stroke::{Loop, LoopRelation, Stroke},
};

/// Union of two figures.
///
/// The contours are fused, each figure's holes are cut by the other contour (a hole survives
/// only where the other figure does not cover it) and holes of opposite figures are
/// intersected. The loops are then organised back into figures.
pub fn fuse_figures<T>(
    a: &Figure<T>,
    b: &Figure<T>,
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let (ca, cb) = (a.contour(), b.contour());
    let mut loops = loop_boolean(ca, cb, BooleanOp::Fuse, options)?;
    for h in a.holes() {
        loops.extend(loop_boolean(h, cb, BooleanOp::Cut, options)?);
    }
    for h in b.holes() {
        loops.extend(loop_boolean(h, ca, BooleanOp::Cut, options)?);
    }
    for ha in a.holes() {
        for hb in b.holes() {
            loops.extend(loop_boolean(ha, hb, BooleanOp::Intersect, options)?);
        }
    }

    Ok(organise_loops(loops, options.pos_equal_eps))
}

/// Which of the two figures of a cut carry holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutCase {
    BothFull,
    FirstFullOnly,
    SecondFullOnly,
    NeitherFull,
}

impl CutCase {
    fn of<T: Real>(a: &Figure<T>, b: &Figure<T>) -> Self {
        match (a.is_full(), b.is_full()) {
            (true, true) => CutCase::BothFull,
            (true, false) => CutCase::FirstFullOnly,
            (false, true) => CutCase::SecondFullOnly,
            (false, false) => CutCase::NeitherFull,
        }
    }
}

/// Figure `a` with the region of figure `b` removed.
///
/// Cases where `a` has holes reduce to cuts between full figures, every reduction step removes a
/// hole from the left hand side.
pub fn cut_figures<T>(
    a: &Figure<T>,
    b: &Figure<T>,
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let (ca, cb) = (a.contour(), b.contour());
    match CutCase::of(a, b) {
        CutCase::BothFull => Ok(organise_loops(
            loop_boolean(ca, cb, BooleanOp::Cut, options)?,
            eps,
        )),
        CutCase::FirstFullOnly => {
            // holes of b lying inside a come back as islands
            let mut loops = loop_boolean(ca, cb, BooleanOp::Cut, options)?;
            for h in b.holes() {
                loops.extend(loop_boolean(h, ca, BooleanOp::Intersect, options)?);
            }
            Ok(organise_loops(loops, eps))
        }
        CutCase::SecondFullOnly => {
            match loop_boolean_op(ca, cb, BooleanOp::Cut.policy(), options)? {
                LoopBooleanResult::NonCrossing {
                    first_in_second: false,
                    second_in_first: false,
                } => Ok(vec![a.clone()]),
                LoopBooleanResult::Identical
                | LoopBooleanResult::NonCrossing {
                    first_in_second: true,
                    ..
                } => Ok(Vec::new()),
                LoopBooleanResult::NonCrossing { .. } => cut_by_inner_contour(a, cb, options),
                LoopBooleanResult::Loops(loops) => {
                    cut_by_holes(organise_loops(loops, eps), a.holes(), options)
                }
            }
        }
        CutCase::NeitherFull => {
            let outer = cut_figures(&Figure::full(ca.clone()), b, options)?;
            cut_by_holes(outer, a.holes(), options)
        }
    }
}

/// Cut of a figure with holes by a loop lying inside its contour: the loop joins the holes it
/// touches, or leaves the figure unchanged when it sits inside a hole.
fn cut_by_inner_contour<T>(
    a: &Figure<T>,
    cb: &Loop<T>,
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let in_hole = a.holes().iter().any(|h| {
        matches!(
            cb.relation_to(h, eps),
            LoopRelation::Inside | LoopRelation::Coincident
        )
    });
    if in_hole {
        return Ok(vec![a.clone()]);
    }

    let holes: Vec<Figure<T>> = a.holes().iter().map(|h| Figure::full(h.clone())).collect();
    let fused = fuse_figure_lists(&holes, &[Figure::full(cb.clone())], options)?;

    let mut loops = vec![a.contour().clone()];
    for f in fused {
        let (contour, holes) = f.into_parts();
        loops.push(contour);
        loops.extend(holes);
    }

    Ok(organise_loops(loops, eps))
}

/// Cuts every figure by each hole in turn, treating the hole as a full figure.
fn cut_by_holes<T>(
    mut figures: Vec<Figure<T>>,
    holes: &[Loop<T>],
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    for h in holes {
        let hole = Figure::full(h.clone());
        let hole_bb = h.bounding_box();
        let mut next = Vec::with_capacity(figures.len());
        for f in figures {
            if f.bounding_box().overlaps_eps(&hole_bb, options.pos_equal_eps) {
                next.extend(cut_figures(&f, &hole, options)?);
            } else {
                next.push(f);
            }
        }
        figures = next;
    }

    Ok(figures)
}

/// Region covered by both figures.
///
/// The contours are intersected and the holes of each figure are then cut away, one figure's
/// holes at a time since the two hole sets may overlap each other.
pub fn intersect_figures<T>(
    a: &Figure<T>,
    b: &Figure<T>,
    options: &BooleanOptions<T>,
) -> Result<Vec<Figure<T>>>
where
    T: Real,
{
    let loops = loop_boolean(a.contour(), b.contour(), BooleanOp::Intersect, options)?;
    let figures = organise_loops(loops, options.pos_equal_eps);
    let figures = cut_by_holes(figures, a.holes(), options)?;
    cut_by_holes(figures, b.holes(), options)
}
