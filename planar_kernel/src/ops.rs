//! Boolean operations between loops, figures and diagrams, and strand clipping.
//!
//! Every operation accepts any combination of [Loop], [Figure] and [Diagram] through the [Shape]
//! trait and returns a [Diagram].
//!
//! # Examples
//!
//! ```
//! use planar_kernel::core::math::vec2;
//! use planar_kernel::ops::{cut, fuse, intersect};
//! use planar_kernel::shapes::rect;
//!
//! let a = rect(2.0_f64, 2.0);
//! let b = rect(2.0, 2.0).translate(vec2(1.0, 0.0));
//!
//! assert!((fuse(&a, &b).unwrap().area() - 6.0).abs() < 1e-9);
//! assert!((cut(&a, &b).unwrap().area() - 2.0).abs() < 1e-9);
//! assert!((intersect(&a, &b).unwrap().area() - 2.0).abs() < 1e-9);
//! ```
use crate::{
    algorithms::{
        confine_strand_to_figures, cut_figure_lists, erase_strand_in_figures, fuse_figure_lists,
        intersect_figure_lists, BooleanOptions,
    },
    core::traits::Real,
    diagram::Diagram,
    error::Result,
    figure::Figure,
    stroke::{Loop, Strand},
};

/// A region usable as an operand of the boolean operations.
pub trait Shape<T>
where
    T: Real,
{
    /// The mutually disjoint figures making up the region.
    fn to_figures(&self) -> Vec<Figure<T>>;
}

impl<T> Shape<T> for Loop<T>
where
    T: Real,
{
    fn to_figures(&self) -> Vec<Figure<T>> {
        vec![Figure::full(self.clone())]
    }
}

impl<T> Shape<T> for Figure<T>
where
    T: Real,
{
    fn to_figures(&self) -> Vec<Figure<T>> {
        vec![self.clone()]
    }
}

impl<T> Shape<T> for Diagram<T>
where
    T: Real,
{
    fn to_figures(&self) -> Vec<Figure<T>> {
        self.figures().to_vec()
    }
}

/// Union of `a` and `b`.
pub fn fuse<T, A, B>(a: &A, b: &B) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    fuse_opt(a, b, &BooleanOptions::new())
}

pub fn fuse_opt<T, A, B>(a: &A, b: &B, options: &BooleanOptions<T>) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    let figures = fuse_figure_lists(&a.to_figures(), &b.to_figures(), options)?;
    Ok(Diagram::new_unchecked(figures))
}

/// `a` with the region of `b` removed.
pub fn cut<T, A, B>(a: &A, b: &B) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    cut_opt(a, b, &BooleanOptions::new())
}

pub fn cut_opt<T, A, B>(a: &A, b: &B, options: &BooleanOptions<T>) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    let figures = cut_figure_lists(&a.to_figures(), &b.to_figures(), options)?;
    Ok(Diagram::new_unchecked(figures))
}

/// Region covered by both `a` and `b`.
pub fn intersect<T, A, B>(a: &A, b: &B) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    intersect_opt(a, b, &BooleanOptions::new())
}

pub fn intersect_opt<T, A, B>(a: &A, b: &B, options: &BooleanOptions<T>) -> Result<Diagram<T>>
where
    T: Real,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    let figures = intersect_figure_lists(&a.to_figures(), &b.to_figures(), options)?;
    Ok(Diagram::new_unchecked(figures))
}

/// Parts of `strand` outside `shape`, see [erase_strand_in_figures].
pub fn erase_strand<T, S>(strand: &Strand<T>, shape: &S, erase_on_border: bool) -> Vec<Strand<T>>
where
    T: Real,
    S: Shape<T> + ?Sized,
{
    erase_strand_opt(strand, shape, erase_on_border, &BooleanOptions::new())
}

pub fn erase_strand_opt<T, S>(
    strand: &Strand<T>,
    shape: &S,
    erase_on_border: bool,
    options: &BooleanOptions<T>,
) -> Vec<Strand<T>>
where
    T: Real,
    S: Shape<T> + ?Sized,
{
    erase_strand_in_figures(
        strand,
        &shape.to_figures(),
        erase_on_border,
        options.pos_equal_eps,
    )
}

/// Parts of `strand` inside `shape`, see [confine_strand_to_figures].
pub fn confine_strand<T, S>(strand: &Strand<T>, shape: &S, erase_on_border: bool) -> Vec<Strand<T>>
where
    T: Real,
    S: Shape<T> + ?Sized,
{
    confine_strand_opt(strand, shape, erase_on_border, &BooleanOptions::new())
}

pub fn confine_strand_opt<T, S>(
    strand: &Strand<T>,
    shape: &S,
    erase_on_border: bool,
    options: &BooleanOptions<T>,
) -> Vec<Strand<T>>
where
    T: Real,
    S: Shape<T> + ?Sized,
{
    confine_strand_to_figures(
        strand,
        &shape.to_figures(),
        erase_on_border,
        options.pos_equal_eps,
    )
}
