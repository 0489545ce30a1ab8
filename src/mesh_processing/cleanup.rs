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

use tracing::debug;

use crate::{error::MeshResult, impl_mesh, mesh::basic_types::TriangleId};

impl_mesh! {
    /// Removes back-to-back flaps: pairs of edge neighbours with opposite
    /// normals whose windings agree across the shared edge. Returns the
    /// number of triangles removed.
    pub fn cleanup_mesh(&mut self) -> MeshResult<usize> {
        let tolerance = T::of(self.params.flap_tolerance);
        let mut doomed: Vec<TriangleId> = Vec::new();
        let live: Vec<TriangleId> = self.live_triangle_ids().collect();
        for t in live {
            if doomed.contains(&t) {
                continue;
            }
            let n = self.triangle_normal(t);
            for adjacent in self.adjacent_triangles(t) {
                let facing = n.dot(&self.triangle_normal(adjacent));
                let opposite = (facing + T::one()).abs() < tolerance;
                if !opposite || self.triangles[t].shares_turning_edge(&self.triangles[adjacent]) {
                    continue;
                }
                for x in [t, adjacent] {
                    if !doomed.contains(&x) {
                        doomed.push(x);
                    }
                }
            }
        }
        let removed = self.remove_triangles(&doomed)?;
        debug!("cleanup removed {removed} flap triangles");
        Ok(removed)
    }
}
