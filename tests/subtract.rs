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

use approx::assert_relative_eq;

use procmesh::{Mesh, Point3, TriangleId, Vector3};

fn cube(center: Point3<f64>, extent: f64) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.add_cube(center, Vector3::new(extent, extent, extent), 1.0)
        .expect("cube");
    mesh
}

fn assert_consistent_winding(mesh: &Mesh) {
    let live: Vec<TriangleId> = mesh.live_triangle_ids().collect();
    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert!(
                !mesh.triangles()[*a].shares_turning_edge(&mesh.triangles()[*b]),
                "triangles {a} and {b} disagree"
            );
        }
    }
}

fn assert_no_removed_references(mesh: &Mesh) {
    for t in mesh.live_triangle_ids() {
        for v in mesh.triangles()[t].vertices() {
            assert!(!mesh.vertices()[v].is_removed(), "triangle {t} uses removed vertex {v}");
        }
    }
}

#[test]
fn test_contains_point() {
    let cutter = cube(Point3::origin(), 1.0);
    assert!(cutter.contains_point(&Point3::new(0.5, -0.5, 0.9)));
    assert!(!cutter.contains_point(&Point3::new(1.5, 0.0, 0.0)));
    // empty cutters contain nothing
    assert!(!Mesh::<f64>::new().contains_point(&Point3::origin()));
}

#[test]
fn test_subtract_cube_corner() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let corner = mesh.find_welded(&Point3::new(1.0, 1.0, 1.0)).expect("corner");
    let owned = mesh.vertices()[corner].triangles().len();
    let cutter = cube(Point3::new(1.0, 1.0, 1.0), 0.5);

    let result = mesh.subtract(&cutter).expect("subtract");
    assert_eq!(result.removed_vertices, 1);
    assert!(result.removed_triangles >= owned);
    assert!(mesh.vertex(corner).is_err());
    assert!(!result.outer_ring.contains(&corner));
    assert!(result.outer_ring.len() >= 3);
    assert!(mesh.validate_links().is_ok());
    assert_no_removed_references(&mesh);

    // the non-planar rim is closed completely
    assert_eq!(result.patch.len(), result.outer_ring.len() - 2);
    assert_eq!(mesh.triangle_count(), 12 - result.removed_triangles + result.patch.len());
    for t in mesh.live_triangle_ids() {
        assert!(mesh.non_manifold_edges(t).is_empty(), "open edge on triangle {t}");
    }
    assert_consistent_winding(&mesh);
}

#[test]
fn test_subtract_with_empty_cutter() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let result = mesh.subtract(&Mesh::new()).expect("subtract");
    assert_eq!(result.removed_vertices, 0);
    assert_eq!(result.removed_triangles, 0);
    assert!(result.outer_ring.is_empty());
    assert!(result.patch.is_empty());
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_remove_everything_inside_far_cutter() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let cutter = cube(Point3::new(10.0, 0.0, 0.0), 1.0);
    let result = mesh.remove_everything_inside(&cutter).expect("remove");
    assert_eq!(result.removed_vertices, 0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_subtract_with_hole_far_cutter() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let hole = mesh.add_range([
        Point3::new(0.2, 0.2, 1.0),
        Point3::new(-0.2, 0.2, 1.0),
        Point3::new(-0.2, -0.2, 1.0),
    ]);
    let cutter = cube(Point3::new(10.0, 0.0, 0.0), 1.0);
    let result = mesh.subtract_with_hole(&cutter, &hole).expect("subtract");
    assert!(result.patch.is_empty());
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_add_connector() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let mut ring = Mesh::<f64>::new();
    ring.add_range([
        Point3::new(0.5, 0.55, 3.0),
        Point3::new(0.1, 0.55, 3.0),
        Point3::new(0.1, 0.15, 3.0),
        Point3::new(0.5, 0.15, 3.0),
    ]);

    let created = mesh.add_connector(&ring).expect("connector");
    assert!(mesh.validate_links().is_ok());
    assert_no_removed_references(&mesh);
    // the ring itself was welded into the mesh
    assert!(mesh.find_welded(&Point3::new(0.5, 0.55, 3.0)).is_some());

    let on_face = |t: &TriangleId| {
        mesh.triangles()[*t]
            .vertices()
            .iter()
            .all(|v| (mesh.position(*v).z - 1.0).abs() < 1e-6)
    };
    let (fill, walls): (Vec<TriangleId>, Vec<TriangleId>) =
        created.iter().copied().partition(|t| on_face(t));
    // the face keeps an opening the size of the projected ring
    let fill_area: f64 = fill.iter().map(|t| mesh.triangle_area(*t)).sum();
    assert_relative_eq!(fill_area, 4.0 - 0.16, epsilon = 1e-6);
    for t in &fill {
        assert_relative_eq!(mesh.triangle_normal(*t).z, 1.0, epsilon = 1e-9);
    }
    assert_eq!(walls.len(), 8);
    assert_consistent_winding(&mesh);

    // walls face away from the tube's axis
    let top = Point3::new(0.3, 0.35, 3.0);
    let axis = (top - mesh.center_of(&ring_on_face(&mesh))).normalized();
    for t in &walls {
        let c = mesh.triangle_center(*t);
        let offset = c - top;
        let radial = offset - axis * offset.dot(&axis);
        assert!(mesh.triangle_normal(*t).dot(&radial) > 0.0, "wall {t} faces inward");
    }
}

fn ring_on_face(mesh: &Mesh) -> Vec<procmesh::VertexId> {
    mesh.live_vertex_ids()
        .filter(|v| {
            let p = mesh.position(*v);
            (p.z - 1.0).abs() < 1e-6 && p.x.abs() < 0.9 && p.y.abs() < 0.9
        })
        .collect()
}

#[test]
fn test_add_connector_misses() {
    let mut mesh = cube(Point3::origin(), 1.0);
    let mut ring = Mesh::<f64>::new();
    // the ring sits on the cube's centre so nothing faces it from outside
    ring.add_range([
        Point3::new(0.1, 0.0, 0.0),
        Point3::new(0.0, 0.1, 0.0),
        Point3::new(-0.1, 0.0, 0.0),
    ]);
    assert!(mesh.add_connector(&ring).expect("connector").is_empty());
    assert_eq!(mesh.triangle_count(), 12);
}
