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

use crate::{
    geometry::{point_2::Point2, point_3::Point3, vector_3::Vector3},
    mesh::{basic_types::VertexId, vertex::Vertex},
    numeric::scalar::Scalar,
};

/// Three vertex handles in counter-clockwise order (seen from the side the
/// normal points to), plus one UV per corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<T: Scalar> {
    pub(crate) vertices: [VertexId; 3],
    pub uvs: [Point2<T>; 3],
    pub(crate) removed: bool,
}

impl<T: Scalar> Triangle<T> {
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self {
            vertices: [a, b, c],
            uvs: [Point2::zero(); 3],
            removed: false,
        }
    }

    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Position of `v` among the corners.
    pub fn corner_of(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|x| *x == v)
    }

    /// The three directed edges in winding order.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    pub fn has_directed_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.edges().contains(&(a, b))
    }

    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.contains_vertex(a) && self.contains_vertex(b) && a != b
    }

    /// The corner that is neither `a` nor `b`.
    pub fn opposite_vertex(&self, a: VertexId, b: VertexId) -> Option<VertexId> {
        self.vertices.iter().copied().find(|v| *v != a && *v != b)
    }

    pub fn common_vertices(&self, other: &Triangle<T>) -> usize {
        self.vertices
            .iter()
            .filter(|v| other.vertices.contains(v))
            .count()
    }

    /// Exactly two corners in common; a triangle over the same three
    /// vertices does not count.
    pub fn shares_edge_with(&self, other: &Triangle<T>) -> bool {
        self.common_vertices(other) == 2
    }

    /// Same vertex set regardless of winding.
    pub fn same_vertex_set(&self, other: &Triangle<T>) -> bool {
        self.common_vertices(other) == 3
    }

    /// Both triangles traverse a shared edge in the same direction, so their
    /// windings disagree across it.
    pub fn shares_turning_edge(&self, other: &Triangle<T>) -> bool {
        self.edges()
            .iter()
            .any(|&(a, b)| other.has_directed_edge(a, b))
    }

    pub fn flip(&mut self) {
        self.vertices.swap(1, 2);
        self.uvs.swap(1, 2);
    }

    pub fn positions(&self, vertices: &[Vertex<T>]) -> [Point3<T>; 3] {
        self.vertices.map(|v| vertices[v].position)
    }

    /// Unnormalized face normal, `(b - a) × (c - a)`.
    pub fn cross(&self, vertices: &[Vertex<T>]) -> Vector3<T> {
        let [a, b, c] = self.positions(vertices);
        (b - a).cross(&(c - a))
    }

    /// Unit face normal; zero for degenerate triangles.
    pub fn normal(&self, vertices: &[Vertex<T>]) -> Vector3<T> {
        self.cross(vertices).normalized()
    }

    pub fn area(&self, vertices: &[Vertex<T>]) -> T {
        self.cross(vertices).norm() * T::half()
    }

    pub fn center(&self, vertices: &[Vertex<T>]) -> Point3<T> {
        Point3::centroid(self.positions(vertices))
    }

    pub fn is_degenerate(&self, vertices: &[Vertex<T>]) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || c == a || self.cross(vertices).is_zero()
    }
}
