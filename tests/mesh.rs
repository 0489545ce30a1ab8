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

use procmesh::{Mesh, MeshError, Point3, Triangle, Vector3};

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

fn unit_cube() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.add_cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), 1.0)
        .expect("cube");
    mesh
}

fn assert_no_removed_references(mesh: &Mesh) {
    for t in mesh.live_triangle_ids() {
        for v in mesh.triangles()[t].vertices() {
            assert!(!mesh.vertices()[v].is_removed(), "triangle {t} uses removed vertex {v}");
        }
    }
}

#[test]
fn test_welding_close_points() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(0.0005, 0.0, 0.0));
    assert_eq!(a, b);
    assert_eq!(mesh.vertex_count(), 1);

    let c = mesh.add_vertex(p(1.0, 0.0, 0.0));
    assert_ne!(a, c);
    assert_eq!(mesh.vertex_count(), 2);
}

#[test]
fn test_welding_across_cells() {
    let mut mesh = Mesh::<f64>::new();
    // straddles a spatial hash cell boundary
    let a = mesh.add_vertex(p(0.0009995, 0.0, 0.0));
    let b = mesh.add_vertex(p(0.0010005, 0.0, 0.0));
    assert_eq!(a, b);
}

#[test]
fn test_unchecked_insert_keeps_duplicates() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex_unchecked(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex_unchecked(p(0.0, 0.0, 0.0));
    assert_ne!(a, b);
    // welding returns the lowest id
    assert_eq!(mesh.add_vertex(p(0.0, 0.0, 0.0)), a);
}

#[test]
fn test_add_range_dedups() {
    let mut mesh = Mesh::<f64>::new();
    let ids = mesh.add_range([
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(0.0, 0.0, 0.0),
        p(0.0002, 0.0, 0.0),
    ]);
    assert_eq!(ids.len(), 2);
    assert_eq!(mesh.vertex_count(), 2);
}

#[test]
fn test_triangle_links() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let t = mesh.add_triangle(a, b, c).expect("triangle");

    for v in [a, b, c] {
        assert!(mesh.vertices()[v].triangles().contains(&t));
    }
    assert!(mesh.validate_links().is_ok());
    let n = mesh.triangle_normal(t);
    assert_relative_eq!(n.z, 1.0);
    assert_relative_eq!(mesh.triangle_area(t), 0.5);
}

#[test]
fn test_duplicate_triangle_is_reused() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let t = mesh.add_triangle(a, b, c).expect("triangle");

    assert_eq!(mesh.add_triangle(b, c, a).expect("rotated"), t);
    assert_eq!(mesh.triangle_count(), 1);

    let flipped = mesh.add_triangle(a, c, b).expect("flipped");
    assert_ne!(flipped, t);
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn test_shares_edge_needs_exactly_two_corners() {
    let t = Triangle::<f64>::new(0, 1, 2);
    assert!(t.shares_edge_with(&Triangle::new(2, 1, 3)));
    assert!(!t.shares_edge_with(&Triangle::new(2, 4, 3)));
    // same corners, other winding
    assert!(!t.shares_edge_with(&Triangle::new(0, 2, 1)));
    assert!(!t.shares_edge_with(&t.clone()));
}

#[test]
fn test_invalid_handles() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    assert_eq!(mesh.add_triangle(a, b, 7), Err(MeshError::InvalidVertex(7)));
    assert_eq!(mesh.remove_triangle(3), Err(MeshError::InvalidTriangle(3)));
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_remove_vertex_removes_its_triangles() {
    let mut mesh = unit_cube();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);

    let owned = mesh.vertices()[0].triangles().len();
    mesh.remove_vertex(0).expect("remove");
    assert_eq!(mesh.vertex_count(), 7);
    assert_eq!(mesh.triangle_count(), 12 - owned);
    assert!(mesh.validate_links().is_ok());
    assert_no_removed_references(&mesh);
    assert!(mesh.vertex(0).is_err());
}

#[test]
fn test_remove_triangles_skips_removed() {
    let mut mesh = unit_cube();
    assert_eq!(mesh.remove_triangles(&[0, 1]).expect("remove"), 2);
    assert_eq!(mesh.remove_triangles(&[1, 2]).expect("remove"), 1);
    assert_eq!(mesh.triangle_count(), 9);
    assert!(mesh.validate_links().is_ok());
}

#[test]
fn test_prune_and_compact() {
    let mut mesh = unit_cube();
    let lonely = mesh.add_vertex(p(5.0, 5.0, 5.0));
    assert_eq!(mesh.prune_vertices(), 1);
    assert!(mesh.vertex(lonely).is_err());

    mesh.remove_vertex(3).expect("remove");
    let map = mesh.compact();
    assert_eq!(map[3], None);
    assert_eq!(map[4], Some(3));
    assert_eq!(map[lonely], None);
    assert_eq!(mesh.vertices().len(), mesh.vertex_count());
    assert_eq!(mesh.triangles().len(), mesh.triangle_count());
    assert!(mesh.validate_links().is_ok());

    // the spatial hash follows the new numbering
    assert_eq!(mesh.add_vertex(p(-1.0, -1.0, 1.0)), 3);
}

#[test]
fn test_set_triangle_vertex_relinks() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let d = mesh.add_vertex(p(0.0, 2.0, 0.0));
    let t = mesh.add_triangle(a, b, c).expect("triangle");

    mesh.set_triangle_vertex(t, 2, d).expect("replace");
    assert!(mesh.vertices()[c].triangles().is_empty());
    assert!(mesh.vertices()[d].triangles().contains(&t));
    assert!(mesh.validate_links().is_ok());
    assert!(mesh.set_triangle_vertex(t, 3, c).is_err());
}

#[test]
fn test_import_indexed_does_not_weld() {
    let mut mesh = Mesh::<f64>::new();
    let positions = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 0.0)];
    let ts = mesh.import_indexed(&positions, &[[0, 1, 2], [3, 2, 1]]).expect("import");
    assert_eq!(ts.len(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    assert!(mesh.import_indexed(&positions, &[[0, 1, 9]]).is_err());
}

#[test]
fn test_add_object_merges_welded() {
    let cube = unit_cube();
    let mut mesh = unit_cube();
    let created = mesh.add_object(&cube);
    assert_eq!(created.len(), 12);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_cube_geometry() {
    let mesh = unit_cube();
    assert_relative_eq!(mesh.area(), 24.0, epsilon = 1e-9);
    let c = mesh.center();
    assert_relative_eq!(c.x, 0.0);
    assert_relative_eq!(c.y, 0.0);
    assert_relative_eq!(c.z, 0.0);
    for t in mesh.live_triangle_ids() {
        // outward winding: the centre is behind every face
        assert!(mesh.is_behind(t, &Point3::origin()));
    }
}

#[test]
fn test_connect_and_disconnect() {
    let mut mesh = Mesh::<f64>::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    mesh.connect(a, b).expect("connect");
    mesh.connect(a, b).expect("connect");
    assert_eq!(mesh.vertices()[a].connected(), &[b]);
    assert!(mesh.vertices()[b].is_connected_to(a));
    mesh.disconnect(b, a);
    assert!(mesh.vertices()[a].connected().is_empty());
}

#[test]
fn test_transforms() {
    let mut mesh = unit_cube();
    mesh.translate(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(mesh.center().x, 1.0, epsilon = 1e-12);
    // welding still finds moved vertices
    assert_eq!(mesh.add_vertex(p(0.0, -1.0, -1.0)), 0);

    mesh.scale_vertices(&[0], Vector3::new(2.0, 2.0, 2.0)).expect("scale");
    let moved = mesh.position(0);
    assert_relative_eq!(moved.y, -2.0);

    let front = [0];
    let back = [4];
    mesh.clamp_to_plane(&front, &back, p(0.0, -1.5, 0.0), Vector3::new(0.0, 1.0, 0.0))
        .expect("clamp");
    assert_relative_eq!(mesh.position(0).y, -1.5, epsilon = 1e-12);
    assert_relative_eq!(mesh.position(4).y, -1.5, epsilon = 1e-12);
    assert!(mesh.clamp_to_plane(&[0, 1], &[4], Point3::origin(), Vector3::unit_y()).is_err());
}

#[test]
fn test_ray_cast_nearest() {
    let mesh = unit_cube();
    let hit = mesh
        .ray_hit_triangle(&p(0.3, 0.2, 5.0), &Vector3::new(0.0, 0.0, -1.0), false)
        .expect("hit");
    assert_relative_eq!(hit.point.z, 1.0, epsilon = 1e-9);
    assert!(!hit.from_back);

    let miss = mesh.ray_hit_triangle(&p(3.0, 3.0, 5.0), &Vector3::new(0.0, 0.0, -1.0), false);
    assert!(miss.is_none());
}

#[test]
fn test_topology_queries() {
    let mesh = unit_cube();
    // every cube edge is shared by exactly two triangles
    for t in mesh.live_triangle_ids() {
        assert!(mesh.non_manifold_edges(t).is_empty());
        assert_eq!(mesh.adjacent_triangles(t).len(), 3);
        assert_relative_eq!(mesh.max_angle(t), 90.0, epsilon = 1e-9);
    }
    // the two halves of a face are coplanar
    let planar = mesh.adjacent_planar_triangles(0, 1.0);
    assert_eq!(planar, vec![1]);
    assert_eq!(mesh.nearest_adjacent_by_normal(0, 1.0), Some(1));
}

#[test]
fn test_find_boundary_around_open_fan() {
    let mut mesh = Mesh::<f64>::new();
    let center = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let ring = mesh.add_range([
        p(1.0, 0.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(-1.0, 0.0, 0.0),
        p(0.0, -1.0, 0.0),
    ]);
    for i in 0..4 {
        mesh.add_triangle(center, ring[i], ring[(i + 1) % 4]).expect("fan");
    }
    let boundary = mesh.find_boundary_around(&[center]).expect("boundary");
    assert_eq!(boundary.len(), 4);
    let mut sorted = boundary.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, ring);
}
