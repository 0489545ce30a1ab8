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

//! Flat buffers handed to renderers and collision cookers.

use tracing::debug;

use crate::{
    geometry::vector_3::Vector3,
    impl_mesh,
    mesh::basic_types::{CollisionBuffers, RenderBuffers, ShadingMode, TriangleId, VertexId},
    params::KernelParams,
};

impl ShadingMode {
    /// Auto smoothing with the angle configured in `params`.
    pub fn auto_from(params: &KernelParams) -> Self {
        ShadingMode::Auto { angle_deg: params.auto_smooth_angle_deg }
    }
}

impl_mesh! {
    fn corner_normal(&self, v: VertexId, t: TriangleId, shading: ShadingMode) -> Vector3<T> {
        let face = self.triangle_normal(t);
        match shading {
            ShadingMode::Flat => face,
            ShadingMode::Smooth => {
                let mut n = Vector3::zero();
                for &other in &self.vertices[v].triangles {
                    n += self.triangle_normal(other);
                }
                n.normalized()
            }
            ShadingMode::Auto { angle_deg } => {
                let limit = T::of(angle_deg);
                let mut n = face;
                for &other in &self.vertices[v].triangles {
                    if other == t {
                        continue;
                    }
                    let on = self.triangle_normal(other);
                    if on.angle_deg(&face) < limit {
                        n += on;
                    }
                }
                n.normalized()
            }
        }
    }

    /// One buffer entry per corner of every live triangle, in triangle order,
    /// so UV seams and hard edges need no vertex splitting downstream.
    pub fn build_render_buffers(&self, shading: ShadingMode) -> RenderBuffers<T> {
        let count = 3 * self.triangle_count();
        let mut buffers = RenderBuffers {
            positions: Vec::with_capacity(count),
            normals: Vec::with_capacity(count),
            uvs: Vec::with_capacity(count),
            indices: Vec::with_capacity(count),
        };
        for t in self.live_triangle_ids() {
            let tri = &self.triangles[t];
            for (corner, &v) in tri.vertices.iter().enumerate() {
                buffers.indices.push(buffers.positions.len() as u32);
                buffers.positions.push(self.vertices[v].position);
                buffers.normals.push(self.corner_normal(v, t, shading));
                buffers.uvs.push(tri.uvs[corner]);
            }
        }
        debug!("render buffers: {} corners", buffers.positions.len());
        buffers
    }

    /// Live vertices in insertion order with three shared indices per live
    /// triangle.
    pub fn build_collision_buffers(&self) -> CollisionBuffers<T> {
        let mut index_of = vec![0u32; self.vertices.len()];
        let mut positions = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.iter().filter(|v| !v.removed) {
            index_of[v.id] = positions.len() as u32;
            positions.push(v.position);
        }
        let indices = self
            .live_triangle_ids()
            .flat_map(|t| self.triangles[t].vertices)
            .map(|v| index_of[v])
            .collect();
        CollisionBuffers { positions, indices }
    }

    /// Cached collision buffers, rebuilt after any mutation.
    pub fn collision_buffers(&mut self) -> &CollisionBuffers<T> {
        let cached = match self.collision_cache.take() {
            Some(buffers) => buffers,
            None => self.build_collision_buffers(),
        };
        self.collision_cache.insert(cached)
    }

    pub fn is_collision_cache_valid(&self) -> bool {
        self.collision_cache.is_some()
    }
}
