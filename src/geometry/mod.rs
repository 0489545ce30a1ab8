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

pub mod aabb;
pub mod edge_edge_intersect;
pub mod intersection;
pub mod point_2;
pub mod point_3;
pub mod tri_tri_intersect;
pub mod vector_3;

pub use aabb::Aabb3;
pub use edge_edge_intersect::{
    LineIntersection, edge_edge_intersect, edge_edge_intersect_ignore_ends, edge_line_intersect,
    line_line_intersect, point_on_line, point_on_segment,
};
pub use intersection::{RayHit, faces_point, point_is_above, polygon_normal, ray_hit_triangle};
pub use point_2::Point2;
pub use point_3::Point3;
pub use tri_tri_intersect::{
    TriTriIntersectionResult, triangle_edge_intersection, triangle_triangle_intersection,
};
pub use vector_3::Vector3;
