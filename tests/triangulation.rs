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

use std::f64::consts::TAU;

use approx::assert_relative_eq;

use procmesh::{Mesh, MeshError, Point3, TriangleId, VertexId};

fn regular_polygon(mesh: &mut Mesh, n: usize, z: f64) -> Vec<VertexId> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            mesh.add_vertex(Point3::new(a.cos(), a.sin(), z))
        })
        .collect()
}

fn unit_square(mesh: &mut Mesh) -> Vec<VertexId> {
    mesh.add_range([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ])
}

fn area_of(mesh: &Mesh, ts: &[TriangleId]) -> f64 {
    ts.iter().map(|t| mesh.triangle_area(*t)).sum()
}

#[test]
fn test_close_square_loop() {
    let mut mesh = Mesh::new();
    let ring = unit_square(&mut mesh);
    let ts = mesh.close_edge_loop(&ring).expect("close");
    assert_eq!(ts.len(), 2);
    assert_relative_eq!(area_of(&mesh, &ts), 1.0, epsilon = 1e-9);
    for t in &ts {
        assert_relative_eq!(mesh.triangle_normal(*t).z, 1.0, epsilon = 1e-9);
    }
    assert!(mesh.validate_links().is_ok());
}

#[test]
fn test_close_convex_polygons() {
    for n in [5usize, 6, 8, 12] {
        let mut mesh = Mesh::new();
        let ring = regular_polygon(&mut mesh, n, 0.0);
        let ts = mesh.close_edge_loop(&ring).expect("close");
        assert_eq!(ts.len(), n - 2, "n = {n}");
        let expected = 0.5 * n as f64 * (TAU / n as f64).sin();
        assert_relative_eq!(area_of(&mesh, &ts), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_close_concave_loop() {
    // L shape
    let mut mesh = Mesh::new();
    let ring = mesh.add_range([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ]);
    let ts = mesh.close_edge_loop(&ring).expect("close");
    assert_eq!(ts.len(), 4);
    assert_relative_eq!(area_of(&mesh, &ts), 3.0, epsilon = 1e-9);
}

#[test]
fn test_degenerate_loop_falls_back() {
    let mut mesh = Mesh::new();
    let ring = mesh.add_range([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]);
    let ts = mesh.close_edge_loop(&ring).expect("fallback close");
    assert_eq!(ts.len(), 2);
    assert!(mesh.validate_links().is_ok());
}

#[test]
fn test_short_loop_is_rejected() {
    let mut mesh = Mesh::new();
    let ring = unit_square(&mut mesh);
    assert!(matches!(mesh.close_edge_loop(&ring[..2]), Err(MeshError::EmptyInput(_))));
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_bridge_rings() {
    let mut mesh = Mesh::new();
    let bottom = regular_polygon(&mut mesh, 6, 0.0);
    let top = regular_polygon(&mut mesh, 6, 1.0);
    let ts = mesh.bridge_edge_loops(&bottom, &top).expect("bridge");
    assert_eq!(ts.len(), 12);

    let mut unique = ts.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 12);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate_links().is_ok());
}

#[test]
fn test_bridge_length_mismatch() {
    let mut mesh = Mesh::new();
    let bottom = regular_polygon(&mut mesh, 4, 0.0);
    let top = regular_polygon(&mut mesh, 3, 1.0);
    assert_eq!(
        mesh.bridge_edge_loops(&bottom, &top),
        Err(MeshError::RingLengthMismatch { from: 4, to: 3 })
    );
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_triangle_fan() {
    let mut mesh = Mesh::new();
    let ring = unit_square(&mut mesh);
    let ts = mesh.create_triangle_fan(&ring).expect("fan");
    assert_eq!(ts.len(), 4);
    assert_eq!(mesh.vertex_count(), 5);
    let hub = mesh.find_welded(&Point3::new(0.5, 0.5, 0.0)).expect("hub");
    assert_eq!(mesh.vertices()[hub].triangles().len(), 4);
    assert_relative_eq!(area_of(&mesh, &ts), 1.0, epsilon = 1e-9);
}

#[test]
fn test_fill_polygon_square() {
    let mut mesh = Mesh::new();
    let ring = unit_square(&mut mesh);
    let ts = mesh.fill_polygon(&ring).expect("fill");
    assert_eq!(ts.len(), 2);
    assert_relative_eq!(area_of(&mesh, &ts), 1.0, epsilon = 1e-9);
    for t in &ts {
        // faces away from the ring's winding
        assert_relative_eq!(mesh.triangle_normal(*t).z, -1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_fill_polygon_non_planar_rim() {
    // what is left around a cube after cutting one corner away
    let mut mesh = Mesh::new();
    let ring = mesh.add_range([
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(-1.0, 1.0, 1.0),
    ]);
    let ts = mesh.fill_polygon(&ring).expect("fill");
    assert_eq!(ts.len(), 3);
    for k in 0..ring.len() {
        let (a, b) = (ring[k], ring[(k + 1) % ring.len()]);
        assert_eq!(mesh.triangles_sharing(a, b).len(), 1, "rim side {a}-{b}");
    }
}

#[test]
fn test_fill_polygon_edges() {
    let mut mesh = Mesh::new();
    let ring = regular_polygon(&mut mesh, 5, 0.0);
    let edges: Vec<procmesh::Edge> = (0..5)
        .map(|i| procmesh::Edge::new(ring[i], ring[(i + 1) % 5]))
        .collect();
    let ts = mesh.fill_polygon_edges(&edges).expect("fill");
    assert_eq!(ts.len(), 3);
    assert!(ts.iter().all(|t| mesh.triangles()[*t].contains_vertex(ring[0])));
}

fn annulus(mesh: &mut Mesh, hole_reversed: bool) -> (Vec<VertexId>, Vec<VertexId>) {
    let outer = mesh.add_range([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(4.0, 4.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
    ]);
    let mut hole = mesh.add_range([
        Point3::new(1.5, 1.5, 0.0),
        Point3::new(2.5, 1.5, 0.0),
        Point3::new(2.5, 2.5, 0.0),
        Point3::new(1.5, 2.5, 0.0),
    ]);
    if hole_reversed {
        hole.reverse();
    }
    (outer, hole)
}

#[test]
fn test_fill_polygon_with_hole() {
    let mut mesh = Mesh::new();
    let (outer, hole) = annulus(&mut mesh, false);
    let ts = mesh.fill_polygon_with_hole(&outer, &hole).expect("fill");
    assert!(mesh.validate_links().is_ok());
    // the seam triangle joins a hole vertex to an outer edge
    let seam = mesh.triangles()[ts[0]].vertices();
    assert_eq!(seam.iter().filter(|v| hole.contains(*v)).count(), 1);
    assert_eq!(seam.iter().filter(|v| outer.contains(*v)).count(), 2);
}

#[test]
fn test_fill_polygon_with_hole_either_winding() {
    for reversed in [false, true] {
        let mut mesh = Mesh::new();
        let (outer, hole) = annulus(&mut mesh, reversed);
        let ts = mesh.fill_polygon_with_hole(&outer, &hole).expect("fill");

        assert_eq!(ts.len(), 8, "reversed = {reversed}");
        assert_relative_eq!(area_of(&mesh, &ts), 15.0, epsilon = 1e-9);
        for (i, a) in ts.iter().enumerate() {
            let tri = &mesh.triangles()[*a];
            assert_relative_eq!(mesh.triangle_normal(*a).z, -1.0, epsilon = 1e-9);
            // nothing spans the hole
            assert!(!tri.vertices().iter().all(|v| hole.contains(v)));
            for b in &ts[i + 1..] {
                assert!(!tri.shares_turning_edge(&mesh.triangles()[*b]));
            }
        }
        // each hole side borders exactly one triangle
        for k in 0..hole.len() {
            let (a, b) = (hole[k], hole[(k + 1) % hole.len()]);
            assert_eq!(mesh.triangles_sharing(a, b).len(), 1, "hole side {a}-{b}");
        }
    }
}
