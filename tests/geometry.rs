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

use approx::assert_relative_eq;

use procmesh::geometry::{
    Aabb3, Point3, Vector3, edge_edge_intersect, edge_edge_intersect_ignore_ends,
    edge_line_intersect, line_line_intersect, point_on_line, point_on_segment, polygon_normal,
    ray_hit_triangle, triangle_triangle_intersection,
};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

#[test]
fn test_line_line_crossing() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0));
    let hit = line_line_intersect(&a, &b, &p(1.0, -1.0, 0.0), &p(1.0, 1.0, 0.0))
        .expect("lines cross");
    assert_relative_eq!(hit.point.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(hit.m, 0.5, epsilon = 1e-12);
    assert_relative_eq!(hit.n, 0.5, epsilon = 1e-12);
}

#[test]
fn test_skew_lines_do_not_intersect() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    let hit = line_line_intersect(&a, &b, &p(0.5, -1.0, 1.0), &p(0.5, 1.0, 1.0));
    assert!(hit.is_none());
}

#[test]
fn test_parallel_lines_do_not_intersect() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    let hit = line_line_intersect(&a, &b, &p(0.0, 1.0, 0.0), &p(1.0, 1.0, 0.0));
    assert!(hit.is_none());
}

#[test]
fn test_edge_ranges() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));

    // the lines meet at x = 2, outside the first segment
    assert!(edge_edge_intersect(&a, &b, &p(2.0, -1.0, 0.0), &p(2.0, 1.0, 0.0)).is_none());
    assert!(edge_line_intersect(&a, &b, &p(2.0, -1.0, 0.0), &p(2.0, 1.0, 0.0)).is_none());

    // a line only needs to cross the first segment
    let hit = edge_line_intersect(&a, &b, &p(0.5, 5.0, 0.0), &p(0.5, 6.0, 0.0))
        .expect("line crosses edge");
    assert_relative_eq!(hit.x, 0.5, epsilon = 1e-12);
    assert!(edge_edge_intersect(&a, &b, &p(0.5, 5.0, 0.0), &p(0.5, 6.0, 0.0)).is_none());
}

#[test]
fn test_touching_edges_ignore_ends() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    let (c, d) = (p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0));
    assert!(edge_edge_intersect(&a, &b, &c, &d).is_some());
    assert!(edge_edge_intersect_ignore_ends(&a, &b, &c, &d).is_none());

    let hit = edge_edge_intersect_ignore_ends(&a, &b, &p(0.5, -1.0, 0.0), &p(0.5, 1.0, 0.0));
    assert!(hit.is_some());
}

#[test]
fn test_point_on_segment_and_line() {
    let (a, b) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    assert_relative_eq!(point_on_segment(&p(0.5, 0.0, 0.0), &a, &b).unwrap_or(-1.0), 0.5);
    assert!(point_on_segment(&p(2.0, 0.0, 0.0), &a, &b).is_none());
    assert_relative_eq!(point_on_line(&p(2.0, 0.0, 0.0), &a, &b).unwrap_or(-1.0), 2.0);
    assert!(point_on_line(&p(0.5, 0.1, 0.0), &a, &b).is_none());
}

#[test]
fn test_ray_hits_front_only() {
    let (v0, v1, v2) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
    let down = Vector3::new(0.0, 0.0, -1.0);

    let hit = ray_hit_triangle(&p(0.25, 0.25, 2.0), &down, &v0, &v1, &v2).expect("front hit");
    assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
    assert_relative_eq!(hit.point.z, 0.0, epsilon = 1e-12);

    // origin behind the face
    let up = Vector3::new(0.0, 0.0, 1.0);
    assert!(ray_hit_triangle(&p(0.25, 0.25, -2.0), &up, &v0, &v1, &v2).is_none());
    // swapping two corners tests the back side
    assert!(ray_hit_triangle(&p(0.25, 0.25, -2.0), &up, &v0, &v2, &v1).is_some());
    // outside the triangle
    assert!(ray_hit_triangle(&p(2.0, 2.0, 2.0), &down, &v0, &v1, &v2).is_none());
}

#[test]
fn test_polygon_normal_of_square() {
    let square = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)];
    let n = polygon_normal(&square);
    assert_relative_eq!(n.x, 0.0);
    assert_relative_eq!(n.y, 0.0);
    assert_relative_eq!(n.z, 2.0);
}

#[test]
fn test_triangle_triangle_crossing() {
    let flat = [p(-1.0, -1.0, 0.0), p(2.0, -1.0, 0.0), p(-1.0, 2.0, 0.0)];
    let standing = [p(0.0, 0.0, -1.0), p(0.5, 0.0, 1.0), p(0.0, 0.5, 1.0)];
    assert!(triangle_triangle_intersection(&flat, &standing).is_proper());

    let above = [p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(0.0, 1.0, 1.0)];
    assert!(!triangle_triangle_intersection(&flat, &above).is_proper());
}

#[test]
fn test_aabb_prefilter() {
    let a = Aabb3::from_points([p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)].iter()).expect("non-empty");
    let b = Aabb3::from_points([p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0)].iter()).expect("non-empty");
    let c = Aabb3::from_points([p(3.0, 3.0, 3.0)].iter()).expect("non-empty");
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert!(a.inflated(2.0).intersects(&c));
    assert!(Aabb3::<f64>::from_points([].iter()).is_none());
}
