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

use tracing::{trace, warn};

use crate::{
    error::{MeshError, MeshResult},
    geometry::intersection::polygon_normal,
    impl_mesh,
    mesh::{
        basic_types::{TriangleId, VertexId},
        ring::Ring,
    },
};

impl_mesh! {
    /// Ear-clips a closed, roughly planar ring of vertices.
    ///
    /// A corner is an ear when its backward tangent points against
    /// `forward × loop_normal` by more than the configured threshold and no
    /// other ring vertex lies inside the ear. When a full pass finds no ear,
    /// the remainder is fanned from its first vertex and a warning is logged.
    pub fn close_edge_loop(&mut self, ring: &[VertexId]) -> MeshResult<Vec<TriangleId>> {
        if ring.len() < 3 {
            return Err(MeshError::EmptyInput("edge loop needs at least three vertices"));
        }
        for v in ring {
            self.check_vertex(*v)?;
        }

        let normal = polygon_normal(&self.positions_of(ring)).normalized();
        let threshold = T::of(self.params.ear_threshold);
        let height = T::of(self.params.containment_height);

        let mut verts = Ring::new(ring.to_vec());
        let mut created = Vec::with_capacity(ring.len() - 2);
        let mut index: isize = 0;
        let mut no_action = 0usize;

        while verts.len() > 3 {
            let (prev, cur, next) = (verts[index - 1], verts[index], verts[index + 1]);
            let here = self.position(cur);
            let dir_fw = (self.position(next) - here).normalized();
            let dir_bk = (self.position(prev) - here).normalized();
            let convex = dir_bk.dot(&dir_fw.cross(&normal)) < threshold;

            if convex {
                let others = verts.to_vec();
                if self.corners_contain_any(prev, cur, next, &others, height).is_none() {
                    trace!("ear at {cur}");
                    created.push(self.add_triangle(prev, cur, next)?);
                    verts.remove_at(index);
                    no_action = 0;
                    continue;
                }
            }

            index += 1;
            no_action += 1;
            if no_action >= verts.len() {
                warn!("no ear found all the way around, fanning {} vertices", verts.len());
                let rest = verts.to_vec();
                for k in 1..rest.len() - 2 {
                    created.push(self.add_triangle(rest[0], rest[k], rest[k + 1])?);
                }
                let n = rest.len();
                verts = Ring::new(vec![rest[0], rest[n - 2], rest[n - 1]]);
                break;
            }
        }

        created.push(self.add_triangle(verts[0], verts[1], verts[2])?);
        Ok(created)
    }
}
