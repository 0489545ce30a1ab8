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

//! Procedural triangle-mesh construction kernel.
//!
//! A [`Mesh`] owns arenas of vertices and triangles addressed by stable
//! integer handles. Vertices are welded on insert, triangles keep exact
//! back-links to their corners, and the higher-level operations (loop
//! discovery, triangulation, subtraction, refinement, UV projection) are all
//! inherent methods spread over the `mesh`, `operations` and
//! `mesh_processing` modules.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod mesh_processing;
pub mod numeric;
pub mod operations;
pub mod params;

pub use error::{MeshError, MeshResult};
pub use geometry::{Point2, Point3, Vector3};
pub use mesh::{
    basic_types::{
        CollisionBuffers, Mesh, RenderBuffers, ShadingMode, SubtractionResult, TriangleId,
        VertexId,
    },
    core::MeshRayHit,
    edge::Edge,
    edge_loop::EdgeLoop,
    loops::{LoopSearch, VisitedEdges},
    ring::{Ring, RingView},
    triangle::Triangle,
    vertex::Vertex,
};
pub use mesh_processing::uv::{AxisProjection, TunnelPath};
pub use numeric::Scalar;
pub use params::{EPSILON_SQUARED, KernelParams, WELD_EPSILON, same_in_tolerance};
