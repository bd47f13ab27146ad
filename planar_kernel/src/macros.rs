/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Used by the stroke macros to count repetitions for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a strand of line segments through the points given as a list of (x, y) tuples.
///
/// Evaluates to `Result<Strand, Error>`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::line_strand;
/// # use planar_kernel::stroke::*;
/// let strand = line_strand![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)].unwrap();
/// assert_eq!(strand.segments().len(), 2);
/// ```
#[macro_export]
macro_rules! line_strand {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points = Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Vector2::new($x.0, $x.1));
            )*
            $crate::stroke::Strand::from_points(&points)
        }
    };
}

/// Construct a loop of line segments through the points given as a list of (x, y) tuples, the
/// closing segment back to the first point is added automatically.
///
/// Evaluates to `Result<Loop, Error>`.
///
/// # Examples
///
/// ```
/// # use planar_kernel::line_loop;
/// # use planar_kernel::stroke::*;
/// let square = line_loop![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].unwrap();
/// assert_eq!(square.segments().len(), 4);
/// assert!(!square.clockwise());
/// ```
#[macro_export]
macro_rules! line_loop {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points = Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Vector2::new($x.0, $x.1));
            )*
            $crate::stroke::Loop::from_points(&points)
        }
    };
}
