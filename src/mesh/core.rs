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

use ahash::AHashMap;
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    error::{MeshError, MeshResult},
    geometry::{
        intersection::ray_hit_triangle, point_2::Point2, point_3::Point3, vector_3::Vector3,
    },
    impl_mesh,
    mesh::{
        basic_types::{Mesh, TriangleId, VertexId},
        triangle::Triangle,
        vertex::Vertex,
    },
    numeric::scalar::Scalar,
    params::KernelParams,
};

/// Nearest triangle hit by a ray cast over the whole mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRayHit<T: Scalar> {
    pub triangle: TriangleId,
    pub point: Point3<T>,
    /// The ray reached the triangle through its back side.
    pub from_back: bool,
}

impl_mesh! {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: KernelParams) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            params,
            vertex_spatial_hash: AHashMap::default(),
            collision_cache: None,
        }
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    pub fn set_params(&mut self, params: KernelParams) {
        self.params = params;
    }

    /// Every vertex ever inserted, including removed ones. Index == id.
    pub fn vertices(&self) -> &[Vertex<T>] {
        &self.vertices
    }

    /// Every triangle ever inserted, including removed ones. Index == id.
    pub fn triangles(&self) -> &[Triangle<T>] {
        &self.triangles
    }

    pub fn vertex(&self, id: VertexId) -> MeshResult<&Vertex<T>> {
        match self.vertices.get(id) {
            Some(v) if !v.removed => Ok(v),
            _ => Err(MeshError::InvalidVertex(id)),
        }
    }

    pub fn triangle(&self, id: TriangleId) -> MeshResult<&Triangle<T>> {
        match self.triangles.get(id) {
            Some(t) if !t.removed => Ok(t),
            _ => Err(MeshError::InvalidTriangle(id)),
        }
    }

    #[inline(always)]
    pub fn position(&self, id: VertexId) -> Point3<T> {
        self.vertices[id].position
    }

    pub fn positions_of(&self, ids: &[VertexId]) -> Vec<Point3<T>> {
        ids.iter().map(|v| self.vertices[*v].position).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| !v.removed).count()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.iter().filter(|t| !t.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0 && self.vertex_count() == 0
    }

    pub fn live_vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().filter(|v| !v.removed).map(|v| v.id)
    }

    pub fn live_triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.removed)
            .map(|(i, _)| i)
    }

    #[inline(always)]
    pub(crate) fn invalidate_caches(&mut self) {
        self.collision_cache = None;
    }

    pub(crate) fn check_vertex(&self, id: VertexId) -> MeshResult<()> {
        self.vertex(id).map(|_| ())
    }

    pub(crate) fn check_triangle(&self, id: TriangleId) -> MeshResult<()> {
        self.triangle(id).map(|_| ())
    }

    // ---------------------------------------------------------------------
    // Insertion
    // ---------------------------------------------------------------------

    /// Welding insert: returns the lowest-id live vertex within tolerance of
    /// `pos`, or appends a new one.
    pub fn add_vertex(&mut self, pos: Point3<T>) -> VertexId {
        if let Some(existing) = self.find_welded(&pos) {
            return existing;
        }
        self.add_vertex_unchecked(pos)
    }

    /// Appends a vertex even if another one already sits at `pos`.
    pub fn add_vertex_unchecked(&mut self, pos: Point3<T>) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex::new(id, pos));
        self.hash_insert(id);
        self.invalidate_caches();
        id
    }

    /// Welds every point and returns the distinct handles in first-seen order.
    pub fn add_range<I>(&mut self, points: I) -> Vec<VertexId>
    where
        I: IntoIterator<Item = Point3<T>>,
    {
        let mut result = Vec::new();
        for p in points {
            let id = self.add_vertex(p);
            if !result.contains(&id) {
                result.push(id);
            }
        }
        result
    }

    /// Live triangle over the same vertex set with the same winding.
    pub fn find_duplicate(&self, a: VertexId, b: VertexId, c: VertexId) -> Option<TriangleId> {
        let probe = Triangle::<T>::new(a, b, c);
        self.vertices.get(a)?.triangles.iter().copied().find(|&t| {
            let other = &self.triangles[t];
            other.same_vertex_set(&probe)
                && (0..3).any(|r| {
                    let [x, y, z] = other.vertices;
                    let rotated = [x, y, z, x, y];
                    rotated[r..r + 3] == probe.vertices
                })
        })
    }

    /// Adds and links a triangle. A live triangle over the same vertices with
    /// the same winding is returned instead of adding a second copy.
    pub fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> MeshResult<TriangleId> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.check_vertex(c)?;
        if let Some(existing) = self.find_duplicate(a, b, c) {
            warn!("refusing duplicate triangle ({a}, {b}, {c}), reusing {existing}");
            return Ok(existing);
        }
        let id = self.triangles.len();
        self.triangles.push(Triangle::new(a, b, c));
        self.link_triangle(id);
        Ok(id)
    }

    /// Welds the three corners and adds the triangle between them.
    pub fn add_triangle_at(
        &mut self,
        p0: Point3<T>,
        p1: Point3<T>,
        p2: Point3<T>,
    ) -> MeshResult<TriangleId> {
        let a = self.add_vertex(p0);
        let b = self.add_vertex(p1);
        let c = self.add_vertex(p2);
        self.add_triangle(a, b, c)
    }

    /// Unchecked import of an indexed triangle list: every position becomes a
    /// new vertex, even if it coincides with an existing one.
    pub fn import_indexed(
        &mut self,
        positions: &[Point3<T>],
        indices: &[[usize; 3]],
    ) -> MeshResult<Vec<TriangleId>> {
        if let Some(bad) = indices.iter().flatten().find(|i| **i >= positions.len()) {
            return Err(MeshError::InvalidVertex(*bad));
        }
        let base: Vec<VertexId> = positions
            .iter()
            .map(|p| self.add_vertex_unchecked(*p))
            .collect();
        let mut created = Vec::with_capacity(indices.len());
        for [a, b, c] in indices {
            created.push(self.add_triangle(base[*a], base[*b], base[*c])?);
        }
        Ok(created)
    }

    /// Weld-merges every live triangle of `other`, carrying its UVs over.
    pub fn add_object(&mut self, other: &Mesh<T>) -> Vec<TriangleId> {
        let mut created = Vec::new();
        for t in other.triangles.iter().filter(|t| !t.removed) {
            let [a, b, c] = t.positions(&other.vertices);
            let Ok(id) = self.add_triangle_at(a, b, c) else {
                continue;
            };
            self.triangles[id].uvs = t.uvs;
            created.push(id);
        }
        created
    }

    /// Axis-aligned box of half size `extents`, 12 outward-facing triangles,
    /// box-projected UVs.
    pub fn add_cube(
        &mut self,
        center: Point3<T>,
        extents: Vector3<T>,
        uv_scale: T,
    ) -> MeshResult<Vec<TriangleId>> {
        let (x, y, z) = (extents.x, extents.y, extents.z);
        let corner = |sx: T, sy: T, sz: T| center + Vector3::new(sx * x, sy * y, sz * z);
        let (n, p) = (-T::one(), T::one());
        let v = [
            self.add_vertex(corner(n, n, n)),
            self.add_vertex(corner(n, p, n)),
            self.add_vertex(corner(p, p, n)),
            self.add_vertex(corner(p, n, n)),
            self.add_vertex(corner(n, n, p)),
            self.add_vertex(corner(n, p, p)),
            self.add_vertex(corner(p, p, p)),
            self.add_vertex(corner(p, n, p)),
        ];
        const FACES: [[usize; 3]; 12] = [
            // front
            [0, 1, 2], [0, 2, 3],
            // left
            [4, 5, 1], [4, 1, 0],
            // right
            [3, 2, 6], [3, 6, 7],
            // back
            [7, 6, 5], [7, 5, 4],
            // top
            [1, 5, 6], [1, 6, 2],
            // bottom
            [4, 0, 3], [4, 3, 7],
        ];
        let mut created = Vec::with_capacity(12);
        for [a, b, c] in FACES {
            created.push(self.add_triangle(v[a], v[b], v[c])?);
        }
        self.set_uv_box_projection_of(&created, uv_scale)?;
        Ok(created)
    }

    // ---------------------------------------------------------------------
    // Linking
    // ---------------------------------------------------------------------

    pub(crate) fn link_triangle(&mut self, t: TriangleId) {
        let vs = self.triangles[t].vertices;
        for v in vs {
            self.vertices[v].attach_triangle(t);
        }
        self.invalidate_caches();
    }

    pub(crate) fn unlink_triangle(&mut self, t: TriangleId) {
        let vs = self.triangles[t].vertices;
        for v in vs {
            self.vertices[v].detach_triangle(t);
        }
        self.invalidate_caches();
    }

    /// Replaces corner `corner` of `t` with `v`, keeping back-links exact.
    pub fn set_triangle_vertex(
        &mut self,
        t: TriangleId,
        corner: usize,
        v: VertexId,
    ) -> MeshResult<()> {
        self.check_triangle(t)?;
        self.check_vertex(v)?;
        if corner > 2 {
            return Err(MeshError::InvalidParameter(format!(
                "corner index must be 0, 1 or 2, got {corner}"
            )));
        }
        self.unlink_triangle(t);
        self.triangles[t].vertices[corner] = v;
        self.link_triangle(t);
        Ok(())
    }

    /// Adds the undirected arc `a - b` to the connectivity graph.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> MeshResult<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.vertices[a].add_connection(b);
        self.vertices[b].add_connection(a);
        Ok(())
    }

    pub fn disconnect(&mut self, a: VertexId, b: VertexId) {
        if let Some(v) = self.vertices.get_mut(a) {
            v.remove_connection(b);
        }
        if let Some(v) = self.vertices.get_mut(b) {
            v.remove_connection(a);
        }
    }

    /// Verifies the vertex/triangle back-link invariant in both directions.
    pub fn validate_links(&self) -> MeshResult<()> {
        for (ti, t) in self.triangles.iter().enumerate() {
            if t.removed {
                continue;
            }
            for v in t.vertices {
                let vertex = self.vertices.get(v).ok_or(MeshError::InvalidVertex(v))?;
                if vertex.removed || !vertex.triangles.contains(&ti) {
                    return Err(MeshError::InvalidVertex(v));
                }
            }
        }
        for v in &self.vertices {
            for &t in &v.triangles {
                match self.triangles.get(t) {
                    Some(tri) if !tri.removed && tri.contains_vertex(v.id) => {}
                    Some(_) => {
                        return Err(MeshError::DanglingTriangle { vertex: v.id, triangle: t });
                    }
                    None => return Err(MeshError::InvalidTriangle(t)),
                }
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    pub fn remove_triangle(&mut self, t: TriangleId) -> MeshResult<()> {
        self.check_triangle(t)?;
        self.unlink_triangle(t);
        self.triangles[t].removed = true;
        Ok(())
    }

    /// Removes every listed triangle; already-removed handles are skipped.
    pub fn remove_triangles(&mut self, ts: &[TriangleId]) -> MeshResult<usize> {
        let mut removed = 0;
        for &t in ts {
            match self.triangles.get(t) {
                Some(tri) if tri.removed => {}
                Some(_) => {
                    self.remove_triangle(t)?;
                    removed += 1;
                }
                None => return Err(MeshError::InvalidTriangle(t)),
            }
        }
        Ok(removed)
    }

    /// Removes `v` together with every triangle that uses it.
    pub fn remove_vertex(&mut self, v: VertexId) -> MeshResult<()> {
        self.check_vertex(v)?;
        let owned: Vec<TriangleId> = self.vertices[v].triangles.to_vec();
        self.remove_triangles(&owned)?;
        let neighbours: Vec<VertexId> = self.vertices[v].connected.to_vec();
        for n in neighbours {
            self.disconnect(v, n);
        }
        let pos = self.vertices[v].position;
        self.hash_remove(v, &pos);
        self.vertices[v].removed = true;
        self.invalidate_caches();
        Ok(())
    }

    /// Removes vertices that belong to no triangle and have no connections.
    pub fn prune_vertices(&mut self) -> usize {
        let orphans: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|v| !v.removed && v.triangles.is_empty() && v.connected.is_empty())
            .map(|v| v.id)
            .collect();
        for &v in &orphans {
            let pos = self.vertices[v].position;
            self.hash_remove(v, &pos);
            self.vertices[v].removed = true;
        }
        if !orphans.is_empty() {
            self.invalidate_caches();
            debug!("pruned {} orphan vertices", orphans.len());
        }
        orphans.len()
    }

    /// Drops removed elements and renumbers the survivors in order. Returns
    /// the old-to-new vertex map.
    pub fn compact(&mut self) -> Vec<Option<VertexId>> {
        let mut vmap = vec![None; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.drain(..).filter(|v| !v.removed) {
            vmap[v.id] = Some(vertices.len());
            vertices.push(v);
        }

        let mut tmap = vec![None; self.triangles.len()];
        let mut triangles = Vec::with_capacity(self.triangles.len());
        for (i, t) in self.triangles.drain(..).enumerate() {
            if t.removed {
                continue;
            }
            tmap[i] = Some(triangles.len());
            triangles.push(t);
        }

        for t in &mut triangles {
            for v in &mut t.vertices {
                // live triangles only reference live vertices
                *v = vmap[*v].unwrap_or(*v);
            }
        }
        for (new_id, v) in vertices.iter_mut().enumerate() {
            v.id = new_id;
            v.connected = v.connected.iter().filter_map(|c| vmap[*c]).collect();
            v.triangles = v.triangles.iter().filter_map(|t| tmap[*t]).collect();
        }

        self.vertices = vertices;
        self.triangles = triangles;
        self.rebuild_spatial_hash();
        self.invalidate_caches();
        vmap
    }

    // ---------------------------------------------------------------------
    // Positions & transforms
    // ---------------------------------------------------------------------

    /// Moves a vertex without re-welding it.
    pub fn set_vertex_position(&mut self, v: VertexId, pos: Point3<T>) -> MeshResult<()> {
        self.check_vertex(v)?;
        let old = self.vertices[v].position;
        self.hash_remove(v, &old);
        self.vertices[v].position = pos;
        self.hash_insert(v);
        self.invalidate_caches();
        Ok(())
    }

    pub fn translate(&mut self, offset: Vector3<T>) {
        for v in self.vertices.iter_mut() {
            v.position += offset;
        }
        self.rebuild_spatial_hash();
        self.invalidate_caches();
    }

    /// Component-wise scale of the listed vertices about the origin.
    pub fn scale_vertices(&mut self, ids: &[VertexId], scale: Vector3<T>) -> MeshResult<()> {
        for &v in ids {
            let p = self.vertex(v)?.position;
            let scaled = Point3::from_vector(p.as_vector().mul_elementwise(&scale));
            self.set_vertex_position(v, scaled)?;
        }
        Ok(())
    }

    /// Shifts every live vertex by `displacement * (r - 0.5)`, `r` uniform in
    /// `[0, 1)` per vertex.
    pub fn randomize_vertices<R: Rng + ?Sized>(&mut self, displacement: Vector3<T>, rng: &mut R) {
        for v in self.vertices.iter_mut().filter(|v| !v.removed) {
            let r = T::of(rng.random::<f64>() - 0.5);
            v.position += displacement * r;
        }
        self.rebuild_spatial_hash();
        self.invalidate_caches();
    }

    /// Projects every `front[i]` lying behind the plane onto it and moves
    /// `back[i]` to the same spot.
    pub fn clamp_to_plane(
        &mut self,
        front: &[VertexId],
        back: &[VertexId],
        plane_point: Point3<T>,
        normal: Vector3<T>,
    ) -> MeshResult<()> {
        if front.len() != back.len() {
            return Err(MeshError::RingLengthMismatch { from: front.len(), to: back.len() });
        }
        for (&f, &b) in front.iter().zip(back) {
            let p = self.vertex(f)?.position;
            let dist = (p - plane_point).dot(&normal);
            if dist < T::zero() {
                let projected = p - normal * dist;
                self.set_vertex_position(f, projected)?;
                self.set_vertex_position(b, projected)?;
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Centroid of all live vertices.
    pub fn center(&self) -> Point3<T> {
        Point3::centroid(self.vertices.iter().filter(|v| !v.removed).map(|v| v.position))
    }

    pub fn center_of(&self, ids: &[VertexId]) -> Point3<T> {
        Point3::centroid(ids.iter().map(|v| self.vertices[*v].position))
    }

    pub fn area(&self) -> T {
        self.triangles
            .iter()
            .filter(|t| !t.removed)
            .map(|t| t.area(&self.vertices))
            .sum()
    }

    pub fn triangle_normal(&self, t: TriangleId) -> Vector3<T> {
        self.triangles[t].normal(&self.vertices)
    }

    pub fn triangle_center(&self, t: TriangleId) -> Point3<T> {
        self.triangles[t].center(&self.vertices)
    }

    pub fn triangle_area(&self, t: TriangleId) -> T {
        self.triangles[t].area(&self.vertices)
    }

    pub fn triangle_positions(&self, t: TriangleId) -> [Point3<T>; 3] {
        self.triangles[t].positions(&self.vertices)
    }

    pub fn flip_normal(&mut self, t: TriangleId) {
        self.triangles[t].flip();
        self.invalidate_caches();
    }

    pub fn flip_normals(&mut self) {
        for t in self.triangles.iter_mut().filter(|t| !t.removed) {
            t.flip();
        }
        self.invalidate_caches();
    }

    pub fn flip_normals_of(&mut self, ts: &[TriangleId]) -> MeshResult<()> {
        for &t in ts {
            self.check_triangle(t)?;
        }
        for &t in ts {
            self.triangles[t].flip();
        }
        self.invalidate_caches();
        Ok(())
    }

    pub fn set_triangle_uvs(&mut self, t: TriangleId, uvs: [Point2<T>; 3]) -> MeshResult<()> {
        self.check_triangle(t)?;
        self.triangles[t].uvs = uvs;
        Ok(())
    }

    /// Ray hit against one triangle. With `ignore_back` unset, the back side
    /// is tried when the front misses.
    pub fn triangle_ray_hit(
        &self,
        t: TriangleId,
        origin: &Point3<T>,
        direction: &Vector3<T>,
        ignore_back: bool,
    ) -> Option<MeshRayHit<T>> {
        let [v0, v1, v2] = self.triangle_positions(t);
        if let Some(hit) = ray_hit_triangle(origin, direction, &v0, &v1, &v2) {
            return Some(MeshRayHit { triangle: t, point: hit.point, from_back: false });
        }
        if ignore_back {
            return None;
        }
        ray_hit_triangle(origin, direction, &v0, &v2, &v1)
            .map(|hit| MeshRayHit { triangle: t, point: hit.point, from_back: true })
    }

    /// Nearest triangle hit over the whole mesh.
    pub fn ray_hit_triangle(
        &self,
        origin: &Point3<T>,
        direction: &Vector3<T>,
        ignore_back: bool,
    ) -> Option<MeshRayHit<T>> {
        self.live_triangle_ids()
            .filter_map(|t| self.triangle_ray_hit(t, origin, direction, ignore_back))
            .min_by(|a, b| {
                let da = a.point.distance_squared_to(origin);
                let db = b.point.distance_squared_to(origin);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
