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

use crate::{
    geometry::point_3::Point3,
    mesh::basic_types::{TriangleId, VertexId},
    numeric::scalar::Scalar,
    params::same_in_tolerance,
};

/// A position plus its adjacency.
///
/// `connected` is the undirected edge graph used by loop discovery.
/// `triangles` lists every live triangle that references this vertex; only
/// the kernel's link/unlink primitives touch it.
#[derive(Debug, Clone)]
pub struct Vertex<T: Scalar> {
    pub id: VertexId,
    pub position: Point3<T>,
    pub(crate) connected: SmallVec<[VertexId; 4]>,
    pub(crate) triangles: SmallVec<[TriangleId; 8]>,
    pub(crate) removed: bool,
}

impl<T: Scalar> Vertex<T> {
    pub fn new(id: VertexId, position: Point3<T>) -> Self {
        Self {
            id,
            position,
            connected: SmallVec::new(),
            triangles: SmallVec::new(),
            removed: false,
        }
    }

    pub fn connected(&self) -> &[VertexId] {
        &self.connected
    }

    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_connected_to(&self, other: VertexId) -> bool {
        self.connected.contains(&other)
    }

    pub(crate) fn attach_triangle(&mut self, t: TriangleId) {
        if !self.triangles.contains(&t) {
            self.triangles.push(t);
        }
    }

    pub(crate) fn detach_triangle(&mut self, t: TriangleId) {
        self.triangles.retain(|x| *x != t);
    }

    pub(crate) fn add_connection(&mut self, other: VertexId) {
        if other != self.id && !self.connected.contains(&other) {
            self.connected.push(other);
        }
    }

    pub(crate) fn remove_connection(&mut self, other: VertexId) {
        self.connected.retain(|x| *x != other);
    }
}

/// Positional equality within the weld tolerance.
impl<T: Scalar> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        same_in_tolerance(&self.position, &other.position)
    }
}
