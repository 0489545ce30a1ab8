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

//! Local re-triangulation: point splits, line splits, edge swaps and the
//! area-driven refinement pass.

use tracing::{debug, trace, warn};

use crate::{
    error::{MeshError, MeshResult},
    geometry::{edge_edge_intersect::edge_line_intersect, point_3::Point3},
    impl_mesh,
    mesh::basic_types::{TriangleId, VertexId},
    params::same_in_tolerance,
};

impl_mesh! {
    /// Replaces `t` by three triangles fanned around `v`.
    pub fn split_triangle(&mut self, t: TriangleId, v: VertexId) -> MeshResult<[TriangleId; 3]> {
        self.check_triangle(t)?;
        self.check_vertex(v)?;
        if self.triangles[t].contains_vertex(v) {
            return Err(MeshError::InvalidParameter(format!(
                "vertex {v} is already a corner of triangle {t}"
            )));
        }
        let [v0, v1, v2] = self.triangles[t].vertices;
        let uvs = self.triangles[t].uvs;
        self.remove_triangle(t)?;
        let created = [
            self.add_triangle(v0, v1, v)?,
            self.add_triangle(v1, v2, v)?,
            self.add_triangle(v2, v0, v)?,
        ];
        let mid = (uvs[0] + uvs[1] + uvs[2]) * T::of(1.0 / 3.0);
        self.triangles[created[0]].uvs = [uvs[0], uvs[1], mid];
        self.triangles[created[1]].uvs = [uvs[1], uvs[2], mid];
        self.triangles[created[2]].uvs = [uvs[2], uvs[0], mid];
        Ok(created)
    }

    /// Raises three side faces from the edges of `t` to `apex`; `t` is kept.
    pub fn make_pyramid(&mut self, t: TriangleId, apex: VertexId) -> MeshResult<[TriangleId; 3]> {
        self.check_triangle(t)?;
        self.check_vertex(apex)?;
        let [v0, v1, v2] = self.triangles[t].vertices;
        Ok([
            self.add_triangle(v0, apex, v1)?,
            self.add_triangle(v1, apex, v2)?,
            self.add_triangle(v2, apex, v0)?,
        ])
    }

    /// Cuts `t` along the infinite line through `a` and `b`.
    ///
    /// The line must cross two edges away from the corners; otherwise `t` is
    /// returned untouched. On a split `t` keeps the corner piece that
    /// contains its first vertex and two new triangles cover the rest.
    pub fn split_triangle_by_line(
        &mut self,
        t: TriangleId,
        a: &Point3<T>,
        b: &Point3<T>,
    ) -> MeshResult<Vec<TriangleId>> {
        self.check_triangle(t)?;
        let [i0, i1, i2] = self.triangles[t].vertices;
        let [p0, p1, p2] = self.triangle_positions(t);

        let off_corner = |hit: Option<Point3<T>>| {
            hit.filter(|h| [p0, p1, p2].iter().all(|p| !same_in_tolerance(p, h)))
        };
        let hit01 = off_corner(edge_line_intersect(&p0, &p1, a, b));
        let hit12 = off_corner(edge_line_intersect(&p1, &p2, a, b));
        let hit20 = off_corner(edge_line_intersect(&p2, &p0, a, b));

        let mut result = vec![t];
        match (hit01, hit12, hit20) {
            (Some(h01), Some(h12), None) => {
                let v3 = self.add_vertex(h01);
                let v4 = self.add_vertex(h12);
                result.push(self.add_triangle(v3, i1, v4)?);
                result.push(self.add_triangle(i0, v3, v4)?);
                self.set_triangle_vertex(t, 1, v4)?;
            }
            (Some(h01), None, Some(h20)) => {
                let v3 = self.add_vertex(h01);
                let v4 = self.add_vertex(h20);
                result.push(self.add_triangle(v3, i1, i2)?);
                result.push(self.add_triangle(v3, i2, v4)?);
                self.set_triangle_vertex(t, 1, v3)?;
                self.set_triangle_vertex(t, 2, v4)?;
            }
            (None, Some(h12), Some(h20)) => {
                let v3 = self.add_vertex(h12);
                let v4 = self.add_vertex(h20);
                result.push(self.add_triangle(i0, v3, v4)?);
                result.push(self.add_triangle(v4, v3, i2)?);
                self.set_triangle_vertex(t, 2, v3)?;
            }
            _ => trace!("line does not cut triangle {t} through two edges"),
        }
        Ok(result)
    }

    /// Swaps the diagonal shared by two edge-adjacent triangles of matching
    /// winding. Returns `false` when the pair does not qualify.
    pub fn swap_edges(&mut self, t1: TriangleId, t2: TriangleId) -> MeshResult<bool> {
        self.check_triangle(t1)?;
        self.check_triangle(t2)?;
        let (a, b) = (&self.triangles[t1], &self.triangles[t2]);
        if t1 == t2 || a.common_vertices(b) != 2 {
            return Ok(false);
        }
        let Some(i) = (0..3).find(|c| !b.contains_vertex(a.vertices[*c])) else {
            return Ok(false);
        };
        let Some(k) = (0..3).find(|c| !a.contains_vertex(b.vertices[*c])) else {
            return Ok(false);
        };
        let (x, u, w) = (a.vertices[i], a.vertices[(i + 1) % 3], a.vertices[(i + 2) % 3]);
        let y = b.vertices[k];
        if !b.has_directed_edge(w, u) {
            warn!("triangles {t1} and {t2} share an edge with the same winding, not swapping");
            return Ok(false);
        }
        if self.vertices[x].triangles.iter().any(|t| self.triangles[*t].contains_vertex(y)) {
            trace!("diagonal {x}-{y} already exists");
            return Ok(false);
        }
        self.set_triangle_vertex(t1, (i + 2) % 3, y)?;
        self.set_triangle_vertex(t2, (k + 2) % 3, x)?;
        Ok(true)
    }

    /// Splits every triangle holding more than `max_relative_area` of the
    /// total surface at a vertex pushed `offset` away from the mesh centre.
    /// Repeats until no triangle is too big or the pass limit is hit.
    /// Returns the number of splits.
    pub fn split_big_triangles(&mut self, max_relative_area: T, offset: T) -> MeshResult<usize> {
        if max_relative_area <= T::zero() || max_relative_area.is_nan() {
            return Err(MeshError::InvalidParameter(format!(
                "max relative area must be positive, got {max_relative_area:?}"
            )));
        }
        let total = self.area();
        if total <= T::zero() {
            return Ok(0);
        }
        let mesh_center = self.center();

        let mut splits = 0;
        for pass in 0..self.params.max_split_passes {
            let big: Vec<TriangleId> = self
                .live_triangle_ids()
                .filter(|t| self.triangle_area(*t) / total > max_relative_area)
                .collect();
            if big.is_empty() {
                debug!("refinement settled after {pass} passes, {splits} splits");
                return Ok(splits);
            }
            for t in big {
                let center = self.triangle_center(t);
                let outward = (center - mesh_center).normalized();
                let before = self.vertices.len();
                let v = self.add_vertex(center + outward * offset);
                if v < before {
                    warn!("split of triangle {t} reuses vertex {v}");
                    if self.triangles[t].contains_vertex(v) {
                        continue;
                    }
                }
                self.split_triangle(t, v)?;
                splits += 1;
            }
        }
        warn!(
            "refinement stopped after {} passes with triangles still above {:?}",
            self.params.max_split_passes, max_relative_area
        );
        Ok(splits)
    }
}
