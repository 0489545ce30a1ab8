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
use smallvec::SmallVec;

use crate::{
    geometry::{point_2::Point2, point_3::Point3, vector_3::Vector3},
    mesh::{triangle::Triangle, vertex::Vertex},
    numeric::scalar::Scalar,
    params::KernelParams,
};

/// Stable handle of a vertex: its index in insertion order.
pub type VertexId = usize;

/// Stable handle of a triangle: its index in insertion order.
pub type TriangleId = usize;

/// How per-corner normals are derived when building render buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadingMode {
    /// Every corner uses its face normal.
    Flat,
    /// Every corner averages the normals of all faces around its vertex.
    Smooth,
    /// Like `Smooth`, restricted to faces within `angle_deg` of the corner's face.
    Auto { angle_deg: f64 },
}

/// Renderer hand-off: one entry per triangle corner, so UV seams and flat
/// shading need no vertex splitting downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers<T: Scalar> {
    pub positions: Vec<Point3<T>>,
    pub normals: Vec<Vector3<T>>,
    pub uvs: Vec<Point2<T>>,
    pub indices: Vec<u32>,
}

/// Collision hand-off: live vertices in insertion order and three indices
/// per live triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionBuffers<T: Scalar> {
    pub positions: Vec<Point3<T>>,
    pub indices: Vec<u32>,
}

/// Outcome of a cutter subtraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtractionResult {
    /// Ordered ring of surviving vertices around the removed region.
    pub outer_ring: Vec<VertexId>,
    pub removed_vertices: usize,
    pub removed_triangles: usize,
    /// Triangles created while patching the hole.
    pub patch: Vec<TriangleId>,
}

#[derive(Debug, Clone)]
pub struct Mesh<T: Scalar = f64> {
    pub(crate) vertices: Vec<Vertex<T>>,
    pub(crate) triangles: Vec<Triangle<T>>,
    pub(crate) params: KernelParams,

    pub(crate) vertex_spatial_hash: AHashMap<(i64, i64, i64), SmallVec<[VertexId; 4]>>,
    pub(crate) collision_cache: Option<CollisionBuffers<T>>,
}

impl<T: Scalar> Default for Mesh<T> {
    fn default() -> Self {
        Self::with_params(KernelParams::default())
    }
}
