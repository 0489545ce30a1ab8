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

//! Edge-soup handling: connectivity linking, crossing resolution and the
//! bounded search for small closed loops.

use ahash::AHashSet;
use tracing::{debug, trace, warn};

use crate::{
    error::MeshResult,
    geometry::edge_edge_intersect::edge_edge_intersect_ignore_ends,
    impl_mesh,
    mesh::{basic_types::VertexId, edge::Edge, edge_loop::EdgeLoop, ring::Ring, vertex::Vertex},
    numeric::scalar::Scalar,
    params::same_in_tolerance,
};

/// Directed arcs consumed by previously accepted loops.
pub type VisitedEdges = AHashSet<(VertexId, VertexId)>;

/// Lazy depth-first enumeration of closed paths over the `connected` graph
/// restricted to a vertex set.
///
/// Every vertex of the set is tried as a head in ascending id order. The
/// length bound shrinks to the shortest loop reported so far, and the whole
/// enumeration ends as soon as a triangle is reported.
pub struct LoopSearch<'a, T: Scalar> {
    vertices: &'a [Vertex<T>],
    members: &'a AHashSet<VertexId>,
    visited: &'a VisitedEdges,
    found: &'a AHashSet<EdgeLoop>,
    planarity_tolerance: T,
    max_length: usize,

    heads: Vec<VertexId>,
    next_head: usize,
    path: Vec<VertexId>,
    cursors: Vec<usize>,
    fresh: bool,
    finished: bool,
}

impl<'a, T: Scalar> LoopSearch<'a, T> {
    pub fn new(
        vertices: &'a [Vertex<T>],
        members: &'a AHashSet<VertexId>,
        visited: &'a VisitedEdges,
        found: &'a AHashSet<EdgeLoop>,
        max_length: usize,
        planarity_tolerance: T,
    ) -> Self {
        let mut heads: Vec<VertexId> = members.iter().copied().collect();
        heads.sort_unstable();
        Self {
            vertices,
            members,
            visited,
            found,
            planarity_tolerance,
            max_length,
            heads,
            next_head: 0,
            path: Vec::new(),
            cursors: Vec::new(),
            fresh: false,
            finished: false,
        }
    }

    /// Current bound on reported loop length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn backtrack(&mut self) {
        self.path.pop();
        self.cursors.pop();
    }

    /// The corner formed at the tail by appending `candidate` must stay
    /// parallel (either sign) to the corner at the second path vertex.
    fn keeps_planar(&self, candidate: VertexId) -> bool {
        let n = self.path.len();
        if n < 3 {
            return true;
        }
        let p = |i: usize| self.vertices[self.path[i]].position;
        let c = self.vertices[candidate].position;
        let corner = (p(n - 1) - c).cross(&(p(n - 1) - p(n - 2))).normalized();
        let first = (p(1) - p(2)).cross(&(p(1) - p(0))).normalized();
        if first.is_zero() || corner.is_zero() {
            // collinear corners carry no orientation
            return true;
        }
        first.dot(&corner).abs() >= T::one() - self.planarity_tolerance
    }

    /// A visited edge whose endpoints both lie on the path must be one of
    /// the path's own sides; otherwise the path swallows it.
    fn encloses_visited_edge(&self) -> bool {
        if self.visited.is_empty() || self.path.len() < 4 {
            return false;
        }
        let ring = Ring::new(self.path.clone());
        self.visited.iter().any(|(a, b)| {
            match (ring.index_of(a), ring.index_of(b)) {
                (Some(ia), Some(ib)) => {
                    !(ring.is_consecutive_index(ia, ib) || ring.is_consecutive_index(ib, ia))
                }
                _ => false,
            }
        })
    }

    fn next_candidate(&mut self) -> Option<VertexId> {
        let tail = *self.path.last()?;
        let vertices = self.vertices;
        let connected = &vertices[tail].connected;
        while let Some(cursor) = self.cursors.last().copied() {
            if cursor >= connected.len() {
                return None;
            }
            if let Some(c) = self.cursors.last_mut() {
                *c += 1;
            }
            let v = connected[cursor];
            if !self.members.contains(&v)
                || self.path.contains(&v)
                || self.visited.contains(&(tail, v))
                || !self.keeps_planar(v)
            {
                continue;
            }
            return Some(v);
        }
        None
    }
}

impl<T: Scalar> Iterator for LoopSearch<'_, T> {
    type Item = Vec<VertexId>;

    fn next(&mut self) -> Option<Vec<VertexId>> {
        loop {
            if self.finished {
                return None;
            }
            if self.path.is_empty() {
                let head = *self.heads.get(self.next_head)?;
                self.next_head += 1;
                self.path.push(head);
                self.cursors.push(0);
                self.fresh = true;
            }

            if self.fresh {
                self.fresh = false;
                let head = self.path[0];
                let Some(&tail) = self.path.last() else {
                    continue;
                };
                if self.path.len() > 2 && self.vertices[tail].connected.contains(&head) {
                    let candidate = self.path.clone();
                    self.backtrack();
                    if self.found.contains(&EdgeLoop::new(&candidate, self.vertices)) {
                        continue;
                    }
                    trace!("loop candidate {:?}", candidate);
                    self.max_length = self.max_length.min(candidate.len());
                    if candidate.len() == 3 {
                        self.finished = true;
                    }
                    return Some(candidate);
                }
                if self.path.len() >= self.max_length {
                    self.backtrack();
                    continue;
                }
            }

            match self.next_candidate() {
                Some(v) => {
                    self.path.push(v);
                    if self.encloses_visited_edge() {
                        self.path.pop();
                        continue;
                    }
                    self.cursors.push(0);
                    self.fresh = true;
                }
                None => self.backtrack(),
            }
        }
    }
}

impl_mesh! {
    /// Adds every edge to the undirected connectivity graph.
    pub fn link_edges(&mut self, edges: &[Edge]) -> MeshResult<()> {
        for e in edges {
            self.connect(e.a, e.b)?;
        }
        Ok(())
    }

    /// Splits crossing edges at a welded vertex until no two edges cross
    /// away from their endpoints. Returns the number of splits.
    pub fn resolve_edge_overlaps(&mut self, edges: &mut Vec<Edge>) -> MeshResult<usize> {
        let mut splits = 0;
        let budget = 4 * edges.len() * edges.len() + 16;
        'search: loop {
            if splits > budget {
                warn!("edge overlap resolution did not settle after {splits} splits");
                break;
            }
            for i in 0..edges.len().saturating_sub(1) {
                for j in (i + 1)..edges.len() {
                    let (e1, e2) = (edges[i].clone(), edges[j].clone());
                    let (a, b) = (self.position(e1.a), self.position(e1.b));
                    let (c, d) = (self.position(e2.a), self.position(e2.b));
                    let Some(hit) = edge_edge_intersect_ignore_ends(&a, &b, &c, &d) else {
                        continue;
                    };
                    let split1 = !same_in_tolerance(&a, &hit) && !same_in_tolerance(&b, &hit);
                    let split2 = !same_in_tolerance(&c, &hit) && !same_in_tolerance(&d, &hit);
                    if !split1 && !split2 {
                        continue;
                    }
                    debug!("edges {}-{} and {}-{} cross", e1.a, e1.b, e2.a, e2.b);
                    let m = self.add_vertex(hit);
                    if split2 {
                        edges.remove(j);
                    }
                    if split1 {
                        edges.remove(i);
                    }
                    for (e, split) in [(e1, split1), (e2, split2)] {
                        if !split {
                            continue;
                        }
                        self.disconnect(e.a, e.b);
                        self.connect(e.a, m)?;
                        self.connect(m, e.b)?;
                        edges.push(Edge::new(e.a, m));
                        edges.push(Edge::new(m, e.b));
                        splits += 1;
                    }
                    continue 'search;
                }
            }
            break;
        }
        if splits > 0 {
            debug!("resolved {splits} edge crossings, {} edges now", edges.len());
        }
        Ok(splits)
    }

    /// Repeatedly accepts the shortest new loop over `set` and marks its
    /// edges visited, until the search finds nothing more. Loops are
    /// returned in acceptance order.
    pub fn find_small_edge_loops(&self, set: &[VertexId], max_length: usize) -> Vec<EdgeLoop> {
        let members: AHashSet<VertexId> = set
            .iter()
            .copied()
            .filter(|v| self.vertices.get(*v).is_some_and(|x| !x.removed))
            .collect();

        let degree = |v: &VertexId| self.vertices[*v].connected.len();
        if !members.iter().any(|v| degree(v) >= 2) {
            warn!("no closed polygon among {} vertices", members.len());
            return Vec::new();
        }

        let mut max_length = max_length.min(members.len());
        if let Some(cap) = self.params.max_loop_length {
            max_length = max_length.min(cap);
        }
        let tolerance = T::of(self.params.planarity_tolerance);

        let mut visited = VisitedEdges::default();
        let mut found: AHashSet<EdgeLoop> = AHashSet::default();
        let mut accepted = Vec::new();
        loop {
            let shortest = LoopSearch::new(
                &self.vertices,
                &members,
                &visited,
                &found,
                max_length,
                tolerance,
            )
            .reduce(|best, l| if l.len() < best.len() { l } else { best });
            let Some(path) = shortest else {
                break;
            };

            let n = path.len();
            for i in 0..n {
                let (a, b) = (path[i], path[(i + 1) % n]);
                if degree(&a) == 2 || degree(&b) == 2 {
                    visited.insert((b, a));
                }
                visited.insert((a, b));
            }
            let edge_loop = EdgeLoop::new(&path, &self.vertices);
            found.insert(edge_loop.clone());
            accepted.push(edge_loop);
        }
        debug!("found {} small edge loops", accepted.len());
        accepted
    }
}
