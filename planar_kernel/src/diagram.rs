//! Collection of mutually disjoint figures.
use crate::{
    bounding_box::BoundingBox,
    core::{math::Vector2, traits::Real},
    error::{InvariantError, Result},
    figure::Figure,
    stroke::{Loop, LoopRelation},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of figures whose regions do not overlap (they may touch).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagram<T = f64> {
    figures: Vec<Figure<T>>,
}

impl<T> Diagram<T>
where
    T: Real,
{
    /// Creates a diagram, checking no two figures overlap.
    pub fn new(figures: Vec<Figure<T>>) -> Result<Self> {
        Self::new_eps(figures, T::fuzzy_epsilon())
    }

    pub fn new_eps(figures: Vec<Figure<T>>, eps: T) -> Result<Self> {
        for i in 0..figures.len() {
            for j in (i + 1)..figures.len() {
                if figures_overlap(&figures[i], &figures[j], eps) {
                    return Err(InvariantError::OverlappingFigures {
                        first: i,
                        second: j,
                    }
                    .into());
                }
            }
        }

        Ok(Self { figures })
    }

    #[inline]
    pub fn new_unchecked(figures: Vec<Figure<T>>) -> Self {
        Self { figures }
    }

    #[inline]
    pub fn empty() -> Self {
        Self {
            figures: Vec::new(),
        }
    }

    #[inline]
    pub fn figures(&self) -> &[Figure<T>] {
        &self.figures
    }

    #[inline]
    pub fn into_figures(self) -> Vec<Figure<T>> {
        self.figures
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox<T>> {
        self.figures
            .iter()
            .map(|f| f.bounding_box())
            .reduce(|a, b| a.merge(&b))
    }

    pub fn contains(&self, point: Vector2<T>) -> bool {
        self.figures.iter().any(|f| f.contains(point))
    }

    pub fn area(&self) -> T {
        self.figures.iter().fold(T::zero(), |acc, f| acc + f.area())
    }

    pub fn translate(&self, offset: Vector2<T>) -> Self {
        Self::new_unchecked(self.figures.iter().map(|f| f.translate(offset)).collect())
    }

    pub fn rotate_about(&self, origin: Vector2<T>, angle: T) -> Self {
        Self::new_unchecked(
            self.figures
                .iter()
                .map(|f| f.rotate_about(origin, angle))
                .collect(),
        )
    }

    pub fn scale_about(&self, origin: Vector2<T>, factor: T) -> Self {
        Self::new_unchecked(
            self.figures
                .iter()
                .map(|f| f.scale_about(origin, factor))
                .collect(),
        )
    }
}

impl<T> From<Figure<T>> for Diagram<T>
where
    T: Real,
{
    fn from(figure: Figure<T>) -> Self {
        Diagram::new_unchecked(vec![figure])
    }
}

/// True if `inner`'s region sits inside one of `outer`'s holes.
fn inside_a_hole<T: Real>(inner: &Loop<T>, outer: &Figure<T>, eps: T) -> bool {
    outer.holes().iter().any(|h| {
        matches!(
            inner.relation_to(h, eps),
            LoopRelation::Inside | LoopRelation::Coincident
        )
    })
}

fn figures_overlap<T: Real>(a: &Figure<T>, b: &Figure<T>, eps: T) -> bool {
    if !a.bounding_box().overlaps_eps(&b.bounding_box(), eps) {
        return false;
    }

    let (ca, cb) = (a.contour(), b.contour());
    match (ca.relation_to(cb, eps), cb.relation_to(ca, eps)) {
        (LoopRelation::Outside, LoopRelation::Outside) => false,
        (LoopRelation::Inside, LoopRelation::Outside) => !inside_a_hole(ca, b, eps),
        (LoopRelation::Outside, LoopRelation::Inside) => !inside_a_hole(cb, a, eps),
        _ => true,
    }
}
