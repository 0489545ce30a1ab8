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

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::{
    error::MeshResult,
    geometry::{
        aabb::Aabb3, intersection::polygon_normal, point_3::Point3,
        tri_tri_intersect::triangle_triangle_intersection,
    },
    impl_mesh,
    mesh::basic_types::{Mesh, SubtractionResult, TriangleId, VertexId},
    params::WELD_EPSILON,
};

impl_mesh! {
    /// `p` lies behind every live triangle.
    ///
    /// This is only a true inside test for closed convex meshes with outward
    /// winding; concave cutters are not supported. An empty mesh contains
    /// nothing.
    pub fn contains_point(&self, p: &Point3<T>) -> bool {
        let mut any = false;
        for t in self.live_triangle_ids() {
            any = true;
            if !self.is_behind(t, p) {
                return false;
            }
        }
        any
    }

    fn triangle_bounds(&self, t: TriangleId) -> Option<Aabb3<T>> {
        let corners = self.triangle_positions(t);
        Aabb3::from_points(corners.iter()).map(|b| b.inflated(T::of(WELD_EPSILON)))
    }

    /// Removes every vertex of this mesh inside `cutter` and every triangle
    /// touching one or crossing a cutter triangle. The surviving vertices of
    /// those triangles are returned as one ordered ring.
    pub fn remove_everything_inside(&mut self, cutter: &Mesh<T>) -> MeshResult<SubtractionResult> {
        self.remove_inside_keeping(cutter, &[])
    }

    pub(crate) fn remove_inside_keeping(
        &mut self,
        cutter: &Mesh<T>,
        keep: &[VertexId],
    ) -> MeshResult<SubtractionResult> {
        let inside: Vec<VertexId> = self
            .live_vertex_ids()
            .filter(|v| !keep.contains(v) && cutter.contains_point(&self.vertices[*v].position))
            .collect();

        let mut affected: BTreeSet<TriangleId> = BTreeSet::new();
        let mut outer: BTreeSet<VertexId> = BTreeSet::new();
        for &v in &inside {
            for &t in &self.vertices[v].triangles {
                affected.insert(t);
                outer.extend(self.triangles[t].vertices);
            }
        }

        let cutter_tris: Vec<(TriangleId, Option<Aabb3<T>>)> = cutter
            .live_triangle_ids()
            .map(|t| (t, cutter.triangle_bounds(t)))
            .collect();
        for t in self.live_triangle_ids() {
            if affected.contains(&t) {
                continue;
            }
            let Some(bounds) = self.triangle_bounds(t) else {
                continue;
            };
            let corners = self.triangle_positions(t);
            let crosses = cutter_tris.iter().any(|(ct, cb)| {
                cb.as_ref().is_some_and(|cb| cb.intersects(&bounds))
                    && triangle_triangle_intersection(&corners, &cutter.triangle_positions(*ct))
                        .is_proper()
            });
            if crosses {
                affected.insert(t);
                outer.extend(self.triangles[t].vertices);
            }
        }
        for v in &inside {
            outer.remove(v);
        }

        for &v in &inside {
            self.remove_vertex(v)?;
        }
        let affected: Vec<TriangleId> = affected.into_iter().collect();
        self.remove_triangles(&affected)?;

        let outer: Vec<VertexId> = outer
            .into_iter()
            .filter(|v| !self.vertices[*v].triangles.is_empty())
            .collect();
        if outer.is_empty() {
            warn!("nothing to remove inside the cutter");
        }
        debug!(
            "cutter removed {} vertices and {} triangles, {} on the rim",
            inside.len(),
            affected.len(),
            outer.len()
        );

        Ok(SubtractionResult {
            outer_ring: self.sort_connected_vertices(&outer),
            removed_vertices: inside.len(),
            removed_triangles: affected.len(),
            patch: Vec::new(),
        })
    }

    /// Cuts `cutter` out of this mesh and ear-clips the rim shut, wound to
    /// match the surrounding faces. The rim is rarely planar.
    pub fn subtract(&mut self, cutter: &Mesh<T>) -> MeshResult<SubtractionResult> {
        let mut result = self.remove_everything_inside(cutter)?;
        if result.outer_ring.len() >= 3 {
            result.patch = self.close_edge_loop(&result.outer_ring)?;
            self.orient_to_neighbours(&result.patch);
        }
        Ok(result)
    }

    /// Like [`Self::subtract`], but the opening is filled around `hole`, an
    /// inner ring of existing vertices that stays open.
    pub fn subtract_with_hole(
        &mut self,
        cutter: &Mesh<T>,
        hole: &[VertexId],
    ) -> MeshResult<SubtractionResult> {
        let mut result = self.remove_inside_keeping(cutter, hole)?;
        if result.outer_ring.len() >= 3 {
            result.patch = self.fill_polygon_with_hole(&result.outer_ring, hole)?;
            self.orient_to_neighbours(&result.patch);
        } else {
            warn!("rim too short to patch around the hole");
        }
        Ok(result)
    }

    /// Attaches the open ring `other` to this mesh: the ring is projected
    /// onto the surface facing it, a slab around the projected ring is cut
    /// out, the cut is filled around the projection and the projection is
    /// bridged to the ring. New faces are wound to match the surface.
    pub fn add_connector(&mut self, other: &Mesh<T>) -> MeshResult<Vec<TriangleId>> {
        let center = self.center();
        let direction = (center - other.center()).normalized();

        let ring: Vec<VertexId> = other
            .live_vertex_ids()
            .map(|v| self.add_vertex(other.position(v)))
            .collect();

        let mut projected = Vec::new();
        let targets: Vec<TriangleId> = self.live_triangle_ids().collect();
        for &v in &ring {
            let origin = self.position(v);
            for &t in &targets {
                if !self.faces_point(t, &origin) {
                    continue;
                }
                if let Some(hit) = self.triangle_ray_hit(t, &origin, &direction, false) {
                    projected.push(self.add_vertex(hit.point));
                }
            }
        }
        if projected.len() < 3 {
            warn!("connector ring does not project onto the mesh ({} hits)", projected.len());
            return Ok(Vec::new());
        }

        // the slab faces outward only when its rings wind around `direction`
        let mut around = projected.clone();
        if polygon_normal(&self.positions_of(&around)).dot(&direction) < T::zero() {
            around.reverse();
        }
        let mut slab = Mesh::<T>::with_params(self.params.clone());
        let half = direction * T::half();
        let mut near = Vec::with_capacity(around.len());
        let mut far = Vec::with_capacity(around.len());
        for &v in &around {
            let p = self.position(v);
            near.push(slab.add_vertex(p + half));
            far.push(slab.add_vertex(p - half));
        }
        slab.bridge_edge_loops(&far, &near)?;
        slab.create_triangle_fan(&near)?;
        let far_cap = slab.create_triangle_fan(&far)?;
        slab.flip_normals_of(&far_cap)?;

        let mut keep = ring.clone();
        keep.extend_from_slice(&projected);
        let cut = self.remove_inside_keeping(&slab, &keep)?;
        let mut created = Vec::new();
        if cut.outer_ring.len() >= 3 {
            created.extend(self.fill_polygon_with_hole(&cut.outer_ring, &projected)?);
        } else {
            warn!("connector cut left no rim to fill");
        }

        let projected_rev: Vec<VertexId> = projected.iter().rev().copied().collect();
        let ring_rev: Vec<VertexId> = ring.iter().rev().copied().collect();
        created.extend(self.bridge_edge_loops(&projected_rev, &ring_rev)?);
        self.orient_to_neighbours(&created);
        Ok(created)
    }
}
