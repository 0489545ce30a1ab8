// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use smallvec::SmallVec;
use tracing::warn;

use crate::{
    geometry::{
        edge_edge_intersect::point_on_segment,
        intersection::{faces_point, ray_hit_triangle},
        point_3::Point3,
    },
    numeric::scalar::Scalar,
    params::same_in_tolerance,
};

#[derive(Clone, Debug, PartialEq)]
pub enum TriTriIntersectionResult<T: Scalar> {
    /// The triangles cross along a segment.
    Proper([Point3<T>; 2]),
    /// Contact was found but not as a clean two-point crossing.
    Irregular(Vec<Point3<T>>),
    None,
}

impl<T: Scalar> TriTriIntersectionResult<T> {
    pub fn is_proper(&self) -> bool {
        matches!(self, TriTriIntersectionResult::Proper(_))
    }
}

/// Where segment `ab` touches the triangle `tri`, trying shared corners,
/// corners lying on the segment, then a two-sided ray cast limited to the
/// segment length.
pub fn triangle_edge_intersection<T: Scalar>(
    tri: &[Point3<T>; 3],
    a: &Point3<T>,
    b: &Point3<T>,
) -> Option<Point3<T>> {
    if tri.iter().any(|v| same_in_tolerance(v, a)) {
        return Some(*a);
    }
    if tri.iter().any(|v| same_in_tolerance(v, b)) {
        return Some(*b);
    }
    if let Some(v) = tri.iter().find(|v| point_on_segment(v, a, b).is_some()) {
        return Some(*v);
    }
    let dir = *b - *a;
    let [v0, v1, v2] = tri;
    ray_hit_triangle(a, &dir, v0, v1, v2)
        .or_else(|| ray_hit_triangle(a, &dir, v0, v2, v1))
        .filter(|hit| hit.t <= T::one())
        .map(|hit| hit.point)
}

/// Crossing test between two triangles given by their corner positions.
pub fn triangle_triangle_intersection<T: Scalar>(
    t1: &[Point3<T>; 3],
    t2: &[Point3<T>; 3],
) -> TriTriIntersectionResult<T> {
    let in_front = t2
        .iter()
        .filter(|p| faces_point(&t1[0], &t1[1], &t1[2], p))
        .count();
    if in_front == 0 || in_front == 3 {
        return TriTriIntersectionResult::None;
    }

    let mut points: SmallVec<[Point3<T>; 6]> = SmallVec::new();
    for i in 0..3 {
        let j = (i + 1) % 3;
        if let Some(p) = triangle_edge_intersection(t1, &t2[i], &t2[j]) {
            points.push(p);
        }
    }
    for i in 0..3 {
        let j = (i + 1) % 3;
        if let Some(p) = triangle_edge_intersection(t2, &t1[i], &t1[j]) {
            points.push(p);
        }
    }

    match points.len() {
        0 => TriTriIntersectionResult::None,
        2 => TriTriIntersectionResult::Proper([points[0], points[1]]),
        n => {
            warn!(points = n, "triangle/triangle intersection is not a single segment");
            TriTriIntersectionResult::Irregular(points.into_vec())
        }
    }
}
