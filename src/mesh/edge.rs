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

use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::mesh::basic_types::{TriangleId, VertexId};

/// Directed vertex pair. Equality and hashing use the endpoint handles in
/// order, so `(a, b)` and `(b, a)` are distinct keys.
#[derive(Debug, Clone)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
    /// Triangles owning this edge, filled by the caller that built it.
    pub triangles: SmallVec<[TriangleId; 2]>,
}

impl Edge {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self {
            a,
            b,
            triangles: SmallVec::new(),
        }
    }

    pub fn flipped(&self) -> Edge {
        Edge {
            a: self.b,
            b: self.a,
            triangles: self.triangles.clone(),
        }
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.a == v || self.b == v
    }

    /// The other endpoint, if `v` is one of them.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn is_undirected_eq(&self, other: &Edge) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.hash(state);
        self.b.hash(state);
    }
}

impl From<(VertexId, VertexId)> for Edge {
    fn from((a, b): (VertexId, VertexId)) -> Self {
        Edge::new(a, b)
    }
}
