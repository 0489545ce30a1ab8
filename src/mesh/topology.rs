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

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    error::{MeshError, MeshResult},
    geometry::{
        intersection::{point_is_above, triangle_contains_point},
        point_3::Point3,
        tri_tri_intersect::triangle_edge_intersection,
    },
    impl_mesh,
    mesh::{
        basic_types::{TriangleId, VertexId},
        edge::Edge,
    },
};

impl_mesh! {
    /// Live triangles referencing both `a` and `b`.
    pub fn triangles_sharing(&self, a: VertexId, b: VertexId) -> SmallVec<[TriangleId; 2]> {
        let tb = &self.vertices[b].triangles;
        self.vertices[a]
            .triangles
            .iter()
            .copied()
            .filter(|t| tb.contains(t))
            .collect()
    }

    /// `a` and `b` span an interior edge: more than one triangle uses both.
    pub fn is_shared_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.triangles_sharing(a, b).len() > 1
    }

    /// Triangles sharing at least two vertices with `t`, ascending by id.
    pub fn adjacent_triangles(&self, t: TriangleId) -> Vec<TriangleId> {
        let [a, b, c] = self.triangles[t].vertices;
        let mut result: Vec<TriangleId> = self
            .triangles_sharing(a, b)
            .into_iter()
            .chain(self.triangles_sharing(b, c))
            .chain(self.triangles_sharing(c, a))
            .filter(|x| *x != t)
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }

    /// Triangles touching any corner of `t` whose normal is within
    /// `tolerance_deg` of its own.
    pub fn adjacent_planar_triangles(&self, t: TriangleId, tolerance_deg: T) -> Vec<TriangleId> {
        let n = self.triangle_normal(t);
        let mut result: Vec<TriangleId> = self.triangles[t]
            .vertices
            .iter()
            .flat_map(|v| self.vertices[*v].triangles.iter().copied())
            .filter(|x| *x != t)
            .collect();
        result.sort_unstable();
        result.dedup();
        result.retain(|x| self.triangle_normal(*x).angle_deg(&n) <= tolerance_deg);
        result
    }

    /// Edge neighbour with the smallest normal deviation, if within
    /// `tolerance_deg`.
    pub fn nearest_adjacent_by_normal(
        &self,
        t: TriangleId,
        tolerance_deg: T,
    ) -> Option<TriangleId> {
        let n = self.triangle_normal(t);
        self.adjacent_triangles(t)
            .into_iter()
            .map(|x| (x, self.triangle_normal(x).angle_deg(&n)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .filter(|(_, angle)| *angle <= tolerance_deg)
            .map(|(x, _)| x)
    }

    /// Edges of `t` not shared by exactly two triangles.
    pub fn non_manifold_edges(&self, t: TriangleId) -> Vec<Edge> {
        self.triangles[t]
            .edges()
            .into_iter()
            .filter(|(a, b)| self.triangles_sharing(*a, *b).len() != 2)
            .map(|(a, b)| {
                let mut e = Edge::new(a, b);
                e.triangles.push(t);
                e
            })
            .collect()
    }

    /// Largest interior angle of `t` in degrees.
    pub fn max_angle(&self, t: TriangleId) -> T {
        let [a, b, c] = self.triangle_positions(t);
        let phi = (b - a).angle_deg(&(c - a));
        let phi = phi.max((c - b).angle_deg(&(a - b)));
        phi.max((b - c).angle_deg(&(a - c)))
    }

    pub fn faces_point(&self, t: TriangleId, p: &Point3<T>) -> bool {
        let origin = self.position(self.triangles[t].vertices[0]);
        self.triangle_normal(t).dot(&(*p - origin)) > T::zero()
    }

    pub fn is_behind(&self, t: TriangleId, p: &Point3<T>) -> bool {
        let origin = self.position(self.triangles[t].vertices[0]);
        self.triangle_normal(t).dot(&(*p - origin)) < T::zero()
    }

    pub fn point_is_above(&self, t: TriangleId, p: &Point3<T>) -> bool {
        let [a, b, c] = self.triangle_positions(t);
        point_is_above(&a, &b, &c, p)
    }

    /// First vertex of `candidates` (other than the corners of `t`) inside
    /// the triangle's prism and within `height_tolerance` of its plane.
    pub fn contains_any_vertex(
        &self,
        t: TriangleId,
        candidates: &[VertexId],
        height_tolerance: T,
    ) -> Option<VertexId> {
        let [a, b, c] = self.triangles[t].vertices;
        self.corners_contain_any(a, b, c, candidates, height_tolerance)
    }

    /// Same test for a triangle that does not exist yet.
    pub(crate) fn corners_contain_any(
        &self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
        candidates: &[VertexId],
        height_tolerance: T,
    ) -> Option<VertexId> {
        let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
        candidates
            .iter()
            .copied()
            .filter(|v| *v != a && *v != b && *v != c)
            .find(|v| triangle_contains_point(&pa, &pb, &pc, &self.position(*v), height_tolerance))
    }

    /// Where segment `ab` touches triangle `t`.
    pub fn edge_intersection(
        &self,
        t: TriangleId,
        a: &Point3<T>,
        b: &Point3<T>,
    ) -> Option<Point3<T>> {
        triangle_edge_intersection(&self.triangle_positions(t), a, b)
    }

    /// Orders `ring` into one walk where consecutive vertices share a
    /// triangle through a boundary edge. Vertices without triangles are
    /// dropped; a disconnected remainder is logged and left out.
    pub fn sort_connected_vertices(&self, ring: &[VertexId]) -> Vec<VertexId> {
        let mut remaining: Vec<VertexId> = ring
            .iter()
            .copied()
            .filter(|v| {
                self.vertices
                    .get(*v)
                    .is_some_and(|x| !x.removed && !x.triangles.is_empty())
            })
            .collect();
        if remaining.is_empty() {
            return Vec::new();
        }
        let mut current = remaining.remove(0);
        let mut sorted = vec![current];
        while !remaining.is_empty() {
            let next = self.vertices[current].triangles.iter().find_map(|t| {
                self.triangles[*t].vertices.iter().copied().find(|v| {
                    *v != current && remaining.contains(v) && !self.is_shared_edge(current, *v)
                })
            });
            match next {
                Some(v) => {
                    remaining.retain(|x| *x != v);
                    sorted.push(v);
                    current = v;
                }
                None => {
                    warn!(
                        "ring is not connected, {} vertices left: {:?}",
                        remaining.len(),
                        remaining
                    );
                    break;
                }
            }
        }
        sorted
    }

    /// Ordered boundary ring around the triangles attached to `surrounding`,
    /// traced through their non-manifold edges.
    pub fn find_boundary_around(&self, surrounding: &[VertexId]) -> MeshResult<Vec<VertexId>> {
        for v in surrounding {
            self.check_vertex(*v)?;
        }
        let mut attached: Vec<TriangleId> = surrounding
            .iter()
            .flat_map(|v| self.vertices[*v].triangles.iter().copied())
            .collect();
        attached.sort_unstable();
        attached.dedup();

        let mut edges: Vec<Edge> = attached
            .iter()
            .flat_map(|t| self.non_manifold_edges(*t))
            .map(|e| e.flipped())
            .collect();
        debug!(
            "boundary trace: {} vertices, {} triangles, {} open edges",
            surrounding.len(),
            attached.len(),
            edges.len()
        );
        let Some(first) = edges.pop() else {
            warn!("no open edges around {} vertices", surrounding.len());
            return Ok(Vec::new());
        };

        let mut linked: VecDeque<Edge> = VecDeque::from([first.clone()]);
        let mut start = first.clone();
        let mut end = first;
        let mut dead_start = false;
        let mut dead_end = false;

        while !edges.is_empty() {
            let successor = if let Some(i) = edges.iter().position(|e| e.a == end.b) {
                Some(edges.remove(i))
            } else {
                edges
                    .iter()
                    .position(|e| e.b == end.b)
                    .map(|i| edges.remove(i).flipped())
            };
            match successor {
                Some(e) => {
                    end = e.clone();
                    linked.push_back(e);
                }
                None => dead_end = true,
            }

            let predecessor = if let Some(i) = edges.iter().position(|e| e.b == start.a) {
                Some(edges.remove(i))
            } else {
                edges
                    .iter()
                    .position(|e| e.a == start.a)
                    .map(|i| edges.remove(i).flipped())
            };
            match predecessor {
                Some(e) => {
                    start = e.clone();
                    linked.push_front(e);
                }
                None => dead_start = true,
            }

            if dead_start && dead_end && !edges.is_empty() {
                warn!("boundary trace dead-locked, {} edges left", edges.len());
                return Err(MeshError::BoundaryTraceDeadlock { remaining: edges.len() });
            }
        }
        Ok(linked.into_iter().map(|e| e.a).collect())
    }
}
