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

use crate::{
    mesh::{basic_types::VertexId, ring::RingView, vertex::Vertex},
    numeric::scalar::Scalar,
};

/// A closed vertex cycle in canonical form.
///
/// The stored sequence starts at the vertex with the smallest coordinate sum
/// (ties broken by id) and runs toward the neighbour with the smaller id, so
/// every rotation and reversal of the same cycle yields the same value.
#[derive(Debug, Clone)]
pub struct EdgeLoop {
    vertices: Vec<VertexId>,
    fold: u64,
}

#[inline(always)]
fn mix(id: VertexId) -> u64 {
    (id as u64 ^ 0x9e37_79b9_7f4a_7c15).wrapping_mul(0xbf58_476d_1ce4_e5b9)
}

impl EdgeLoop {
    pub fn new<T: Scalar>(cycle: &[VertexId], vertices: &[Vertex<T>]) -> Self {
        if cycle.is_empty() {
            return Self {
                vertices: Vec::new(),
                fold: 0,
            };
        }

        let start = cycle
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let sa = vertices[**a].position.coordinate_sum();
                let sb = vertices[**b].position.coordinate_sum();
                sa.partial_cmp(&sb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(b))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut view = RingView::with_offset(cycle, start);
        if view.len() > 2 && view[-1] < view[1] {
            view.reverse();
        }
        let vertices: Vec<VertexId> = view.to_vec();

        let fold = vertices
            .iter()
            .fold(0u64, |h, v| h.wrapping_shl(1).wrapping_add(mix(*v)));

        Self { vertices, fold }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    pub fn ring(&self) -> RingView<'_, VertexId> {
        RingView::new(&self.vertices)
    }

    /// Undirected edges of the cycle in order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl PartialEq for EdgeLoop {
    fn eq(&self, other: &Self) -> bool {
        self.fold == other.fold && self.vertices == other.vertices
    }
}

impl Eq for EdgeLoop {}

impl Hash for EdgeLoop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fold);
    }
}
