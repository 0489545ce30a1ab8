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

use tracing::{debug, trace};

use crate::{
    error::MeshResult,
    impl_mesh,
    mesh::basic_types::{TriangleId, VertexId},
};

impl_mesh! {
    fn closest_live_pair(&self) -> Option<(VertexId, VertexId)> {
        let live: Vec<VertexId> = self.live_vertex_ids().collect();
        let mut best: Option<(VertexId, VertexId, T)> = None;
        for (i, &a) in live.iter().enumerate() {
            let pa = self.vertices[a].position;
            for &b in &live[i + 1..] {
                let d = pa.distance_squared_to(&self.vertices[b].position);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((a, b, d));
                }
            }
        }
        best.map(|(a, b, _)| (a, b))
    }

    /// Greedy vertex budget: merges the globally closest pair of live
    /// vertices at their midpoint until at most `max_vertices` remain.
    ///
    /// The lower id survives; triangles and arcs of the other vertex are
    /// moved onto it. Faces that collapse are left in place for the caller
    /// to clean up. Returns the number of merges.
    pub fn decimate(&mut self, max_vertices: usize) -> MeshResult<usize> {
        let mut merges = 0;
        while self.vertex_count() > max_vertices {
            let Some((keep, drop)) = self.closest_live_pair() else {
                break;
            };
            let mid = self.vertices[keep].position.midpoint(&self.vertices[drop].position);
            trace!("merging vertex {drop} into {keep}");
            self.set_vertex_position(keep, mid)?;

            let owned: Vec<TriangleId> = self.vertices[drop].triangles.to_vec();
            for t in owned {
                if let Some(corner) = self.triangles[t].corner_of(drop) {
                    self.set_triangle_vertex(t, corner, keep)?;
                }
            }
            let neighbours: Vec<VertexId> = self.vertices[drop].connected.to_vec();
            for n in neighbours {
                self.disconnect(drop, n);
                if n != keep {
                    self.connect(keep, n)?;
                }
            }
            self.remove_vertex(drop)?;
            merges += 1;
        }
        if merges > 0 {
            debug!("decimated {merges} vertices, {} left", self.vertex_count());
        }
        Ok(merges)
    }
}
