use crate::{
    bounding_box::spatial_index,
    core::{math::Vector2, traits::Real},
    segment::{find_intersections_and_overlaps, Curve, Segment},
};

/// All intersects found between two segment sequences.
#[derive(Debug, Clone)]
pub struct StrokeIntersects<T> {
    /// Distinct isolated intersection points.
    pub points: Vec<Vector2<T>>,
    /// Coincident sub-segments, oriented along the first sequence.
    pub overlaps: Vec<Segment<T>>,
    /// Points (including overlap end points) lying on each segment of the first sequence.
    pub first_points: Vec<Vec<Vector2<T>>>,
    /// Points (including overlap end points) lying on each segment of the second sequence.
    pub second_points: Vec<Vec<Vector2<T>>>,
}

impl<T> StrokeIntersects<T>
where
    T: Real,
{
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.overlaps.is_empty()
    }

    /// Distinct end points of the overlap segments.
    pub fn overlap_points(&self, eps: T) -> Vec<Vector2<T>> {
        let mut result = Vec::with_capacity(self.overlaps.len() * 2);
        for o in self.overlaps.iter() {
            push_distinct(&mut result, o.first_point(), eps);
            push_distinct(&mut result, o.last_point(), eps);
        }
        result
    }
}

#[inline]
pub(crate) fn push_distinct<T: Real>(points: &mut Vec<Vector2<T>>, p: Vector2<T>, eps: T) {
    if !points.iter().any(|q| q.fuzzy_eq_eps(p, eps)) {
        points.push(p);
    }
}

/// Queries the intersection oracle for every segment pair whose bounding boxes overlap.
pub fn find_stroke_intersects<T>(
    first: &[Segment<T>],
    second: &[Segment<T>],
    eps: T,
) -> StrokeIntersects<T>
where
    T: Real,
{
    let mut result = StrokeIntersects {
        points: Vec::new(),
        overlaps: Vec::new(),
        first_points: vec![Vec::new(); first.len()],
        second_points: vec![Vec::new(); second.len()],
    };

    if first.is_empty() || second.is_empty() {
        return result;
    }

    let first_index = spatial_index(first.iter().map(|s| s.bounding_box()));
    let mut query_stack = Vec::with_capacity(8);
    for (j, seg2) in second.iter().enumerate() {
        let mut query_visitor = |i: usize| {
            let r = find_intersections_and_overlaps(&first[i], seg2, eps);
            for &p in r.intersections.iter() {
                push_distinct(&mut result.points, p, eps);
                result.first_points[i].push(p);
                result.second_points[j].push(p);
            }
            for o in r.overlaps.into_iter() {
                for p in [o.first_point(), o.last_point()] {
                    result.first_points[i].push(p);
                    result.second_points[j].push(p);
                }
                if !result.overlaps.iter().any(|x| x.is_same(&o, eps)) {
                    result.overlaps.push(o);
                }
            }
        };

        let bb = seg2.bounding_box();
        first_index.visit_query_with_stack(
            bb.min_x - eps,
            bb.min_y - eps,
            bb.max_x + eps,
            bb.max_y + eps,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    // isolated points coinciding with an overlap end point are part of that overlap
    let overlap_points = result.overlap_points(eps);
    result
        .points
        .retain(|p| !overlap_points.iter().any(|q| q.fuzzy_eq_eps(*p, eps)));

    result
}

/// Splits each segment at the points lying on it, returning the flattened piece list.
pub fn split_segments<T>(segments: &[Segment<T>], points: &[Vec<Vector2<T>>], eps: T) -> Vec<Segment<T>>
where
    T: Real,
{
    segments
        .iter()
        .zip(points.iter())
        .flat_map(|(s, pts)| {
            if pts.is_empty() {
                vec![*s]
            } else {
                s.split_at(pts, eps)
            }
        })
        .collect()
}
