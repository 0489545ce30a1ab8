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

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::debug;

use crate::{
    error::{MeshError, MeshResult},
    geometry::point_3::Point3,
    impl_mesh,
    mesh::{
        basic_types::{TriangleId, VertexId},
        edge::Edge,
    },
};

impl_mesh! {
    /// Makes the winding of `ts` consistent across shared edges.
    ///
    /// A flood fill starts at the first unreached triangle of each connected
    /// component; every neighbour reached through an edge it traverses in the
    /// same direction as the current triangle gets flipped.
    pub fn set_normals(&mut self, ts: &[TriangleId]) {
        let members: AHashSet<TriangleId> = ts
            .iter()
            .copied()
            .filter(|t| !self.triangles[*t].removed)
            .collect();
        let mut reached: AHashSet<TriangleId> = AHashSet::with_capacity(members.len());
        let mut flips = 0usize;
        for &seed in ts {
            if !members.contains(&seed) || !reached.insert(seed) {
                continue;
            }
            let mut queue = VecDeque::from([seed]);
            while let Some(current) = queue.pop_front() {
                for n in self.adjacent_triangles(current) {
                    if !members.contains(&n) || reached.contains(&n) {
                        continue;
                    }
                    if self.triangles[current].shares_turning_edge(&self.triangles[n]) {
                        self.flip_normal(n);
                        flips += 1;
                    }
                    reached.insert(n);
                    queue.push_back(n);
                }
            }
        }
        debug!("orientation pass over {} triangles, {flips} flipped", members.len());
    }

    /// Aligns the winding of `ts` with the live triangles around them,
    /// growing inward from the triangles that touch the rest of the mesh.
    pub fn orient_to_neighbours(&mut self, ts: &[TriangleId]) {
        let members: AHashSet<TriangleId> = ts.iter().copied().collect();
        let mut queue: VecDeque<TriangleId> = VecDeque::new();
        let mut reached: AHashSet<TriangleId> = AHashSet::default();
        for &t in ts {
            if self.triangles[t].removed {
                continue;
            }
            for n in self.adjacent_triangles(t) {
                if !members.contains(&n) && !reached.contains(&n) {
                    reached.insert(n);
                    queue.push_back(n);
                }
            }
        }
        while let Some(current) = queue.pop_front() {
            for n in self.adjacent_triangles(current) {
                if !members.contains(&n) || reached.contains(&n) {
                    continue;
                }
                if self.triangles[current].shares_turning_edge(&self.triangles[n]) {
                    self.flip_normal(n);
                }
                reached.insert(n);
                queue.push_back(n);
            }
        }
    }

    /// Turns an unordered edge soup into triangulated, consistently wound
    /// faces: link, split crossings, find small loops, ear-clip each one,
    /// unify winding, then flip everything if most faces point at the
    /// centroid of the input vertices.
    pub fn close_unordered_edge_loops(&mut self, edges: &[Edge]) -> MeshResult<Vec<TriangleId>> {
        if edges.is_empty() {
            return Err(MeshError::EmptyInput("no edges to close"));
        }
        let mut edges = edges.to_vec();
        self.link_edges(&edges)?;
        let before = edges.len();
        self.resolve_edge_overlaps(&mut edges)?;
        debug!("overlap check: {before} edges before, {} after", edges.len());

        let mut all: Vec<VertexId> = edges.iter().flat_map(|e| [e.a, e.b]).collect();
        all.sort_unstable();
        all.dedup();
        let center = self.center_of(&all);

        let loops = self.find_small_edge_loops(&all, edges.len());
        let mut generated = Vec::new();
        for l in &loops {
            generated.extend(self.close_edge_loop(l.vertices())?);
        }
        if generated.is_empty() {
            return Ok(generated);
        }
        self.set_normals(&generated);

        let facing = self.facing_sum(&generated, &center);
        if facing > T::zero() {
            self.flip_normals_of(&generated)?;
        }
        Ok(generated)
    }

    /// Sum over `ts` of how much each normal points toward `center`.
    pub(crate) fn facing_sum(&self, ts: &[TriangleId], center: &Point3<T>) -> T {
        ts.iter()
            .map(|t| {
                let to_center = (*center - self.triangle_center(*t)).normalized();
                self.triangle_normal(*t).dot(&to_center)
            })
            .sum()
    }
}
