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

use tracing::{debug, warn};

use crate::{
    error::{MeshError, MeshResult},
    geometry::intersection::polygon_normal,
    impl_mesh,
    mesh::{
        basic_types::{TriangleId, VertexId},
        edge::Edge,
        ring::RingView,
    },
};

impl_mesh! {
    /// Fans `ring` around a welded vertex at its centroid.
    pub fn create_triangle_fan(&mut self, ring: &[VertexId]) -> MeshResult<Vec<TriangleId>> {
        if ring.len() < 3 {
            return Err(MeshError::EmptyInput("triangle fan needs at least three vertices"));
        }
        for v in ring {
            self.check_vertex(*v)?;
        }
        let center = self.add_vertex(self.center_of(ring));
        let view = RingView::new(ring);
        let mut created = Vec::with_capacity(ring.len());
        for i in 0..ring.len() as isize {
            created.push(self.add_triangle(center, view[i], view[i + 1])?);
        }
        Ok(created)
    }

    /// Stitches two rings of equal length with two triangles per side.
    pub fn bridge_edge_loops(
        &mut self,
        from: &[VertexId],
        to: &[VertexId],
    ) -> MeshResult<Vec<TriangleId>> {
        if from.len() != to.len() {
            return Err(MeshError::RingLengthMismatch { from: from.len(), to: to.len() });
        }
        if from.is_empty() {
            return Err(MeshError::EmptyInput("cannot bridge empty rings"));
        }
        for v in from.iter().chain(to) {
            self.check_vertex(*v)?;
        }
        let (f, t) = (RingView::new(from), RingView::new(to));
        let mut created = Vec::with_capacity(2 * from.len());
        for i in 0..from.len() as isize {
            created.push(self.add_triangle(f[i], f[i + 1], t[i + 1])?);
            created.push(self.add_triangle(f[i], t[i + 1], t[i])?);
        }
        Ok(created)
    }

    /// Fans a polygon given as a chain of edges from the start of its first
    /// edge.
    pub fn fill_polygon_edges(&mut self, edges: &[Edge]) -> MeshResult<Vec<TriangleId>> {
        if edges.len() < 3 {
            return Err(MeshError::EmptyInput("polygon needs at least three edges"));
        }
        if edges.len() == 3 {
            return Ok(vec![self.add_triangle(edges[0].a, edges[1].a, edges[2].a)?]);
        }
        let c = edges[0].a;
        let mut created = Vec::with_capacity(edges.len() - 2);
        for pair in edges.windows(2) {
            let (b, d) = (pair[0].b, pair[1].b);
            if b == c || d == c || b == d {
                continue;
            }
            created.push(self.add_triangle(c, b, d)?);
        }
        Ok(created)
    }

    /// Walks a closed ring clipping convex corners whose triangle contains no
    /// other ring vertex. Emitted triangles face against the ring's Newell
    /// normal. When a full lap creates nothing the remainder is fanned and a
    /// warning is logged.
    pub fn fill_polygon(&mut self, ring: &[VertexId]) -> MeshResult<Vec<TriangleId>> {
        if ring.len() < 3 {
            return Err(MeshError::EmptyInput("polygon needs at least three vertices"));
        }
        for v in ring {
            self.check_vertex(*v)?;
        }
        let height = T::of(self.params.containment_height);
        let normal = -polygon_normal(&self.positions_of(ring)).normalized();

        let mut list = ring.to_vec();
        let mut current = 0usize;
        let mut created = Vec::new();
        let mut created_at_lap = 0usize;

        while list.len() > 2 {
            let len = list.len();
            let next = (current + 1) % len;
            let second = (current + 2) % len;
            let (a, b, c) = (list[current], list[next], list[second]);
            let tangent = self.position(b) - self.position(a);
            let next_tangent = self.position(c) - self.position(b);
            let inward = tangent.cross(&normal);

            if inward.dot(&next_tangent) > T::zero()
                && self.corners_contain_any(a, c, b, &list, height).is_none()
            {
                if a != b && b != c && c != a {
                    created.push(self.add_triangle(a, c, b)?);
                }
                list.remove(next);
                if next < current {
                    current -= 1;
                }
                current %= list.len();
                continue;
            }

            if current + 1 == len {
                if created.len() == created_at_lap {
                    warn!("could not create more triangles, fanning {} vertices", list.len());
                    for k in 1..list.len() - 1 {
                        let (a, b, c) = (list[0], list[k], list[k + 1]);
                        if a != b && b != c && c != a {
                            created.push(self.add_triangle(a, c, b)?);
                        }
                    }
                    break;
                }
                created_at_lap = created.len();
            }
            current = (current + 1) % len;
        }
        Ok(created)
    }

    /// Triangulates the region between `outer` and an inner `hole` ring.
    ///
    /// The hole may be wound either way. One seam triangle joining a hole
    /// vertex to an outer edge is searched first; the hole is then threaded
    /// into the outer ring through it, running against the outer winding, and
    /// the combined ring is handed to [`Self::fill_polygon`]. Without a valid
    /// seam the region stays open and a warning is logged.
    pub fn fill_polygon_with_hole(
        &mut self,
        outer: &[VertexId],
        hole: &[VertexId],
    ) -> MeshResult<Vec<TriangleId>> {
        if outer.len() < 3 || hole.is_empty() {
            return Err(MeshError::EmptyInput("polygon with hole needs an outer ring and a hole"));
        }
        for v in outer.iter().chain(hole) {
            self.check_vertex(*v)?;
        }
        let height = T::of(self.params.containment_height);
        let outer_normal = polygon_normal(&self.positions_of(outer));
        let mut hole = hole.to_vec();
        if polygon_normal(&self.positions_of(&hole)).dot(&outer_normal) > T::zero() {
            hole.reverse();
        }

        let seam = hole.iter().enumerate().find_map(|(h, &v)| {
            (0..outer.len()).find_map(|i| {
                let j = (i + 1) % outer.len();
                let blocked = self
                    .corners_contain_any(v, outer[j], outer[i], &hole, height)
                    .or_else(|| self.corners_contain_any(v, outer[j], outer[i], outer, height));
                blocked.is_none().then_some((i, h))
            })
        });
        let Some((v_idx, h_idx)) = seam else {
            warn!("no seam triangle between outer ring and hole, leaving it open");
            return Ok(Vec::new());
        };

        let seam_end = outer[(v_idx + 1) % outer.len()];
        let mut created = vec![self.add_triangle(hole[h_idx], seam_end, outer[v_idx])?];
        let mut polygon = Vec::with_capacity(outer.len() + hole.len() + 1);
        polygon.extend_from_slice(&outer[..=v_idx]);
        polygon.extend_from_slice(&hole[h_idx..]);
        polygon.extend_from_slice(&hole[..=h_idx]);
        polygon.extend_from_slice(&outer[v_idx + 1..]);
        debug!("threaded polygon of {} vertices", polygon.len());
        created.extend(self.fill_polygon(&polygon)?);
        Ok(created)
    }
}
