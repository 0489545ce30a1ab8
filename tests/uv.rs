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

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;

use procmesh::{AxisProjection, Mesh, MeshError, Point2, Point3, TunnelPath, Vector3};

fn assert_uv(uv: Point2<f64>, u: f64, v: f64) {
    assert_relative_eq!(uv.x, u, epsilon = 1e-9);
    assert_relative_eq!(uv.y, v, epsilon = 1e-9);
}

fn z_axis() -> AxisProjection<f64> {
    AxisProjection::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0))
}

#[test]
fn test_box_projection_per_axis() {
    let mut mesh = Mesh::<f64>::new();
    let flat = mesh
        .add_triangle_at(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .expect("floor");
    let side = mesh
        .add_triangle_at(
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, 1.0),
        )
        .expect("wall");
    mesh.set_uv_box_projection_of(&[flat, side], 2.0).expect("project");

    // facing z: (x, y)
    let uvs = mesh.triangles()[flat].uvs;
    assert_uv(uvs[0], 0.0, 0.0);
    assert_uv(uvs[1], 2.0, 0.0);
    assert_uv(uvs[2], 0.0, 2.0);

    // facing x: (z, y)
    let uvs = mesh.triangles()[side].uvs;
    assert_uv(uvs[1], 0.0, 2.0);
    assert_uv(uvs[2], 2.0, 0.0);
}

#[test]
fn test_box_projection_of_cube() {
    let mut mesh = Mesh::<f64>::new();
    let created = mesh
        .add_cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0), 2.0)
        .expect("cube");
    // front face lies in z = -1 and maps (x, y)
    let uvs = mesh.triangles()[created[0]].uvs;
    assert_uv(uvs[0], -2.0, -2.0);
    assert_uv(uvs[1], -2.0, 2.0);
    assert_uv(uvs[2], 2.0, 2.0);

    let before = mesh.triangles()[created[5]].uvs;
    mesh.set_uv_box_projection(1.0);
    let after = mesh.triangles()[created[5]].uvs;
    assert_uv(after[0], before[0].x / 2.0, before[0].y / 2.0);
}

#[test]
fn test_projection_checks_handles() {
    let mut mesh = Mesh::<f64>::new();
    mesh.add_triangle_at(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )
    .expect("triangle");
    assert_eq!(
        mesh.set_uv_box_projection_of(&[0, 4], 1.0),
        Err(MeshError::InvalidTriangle(4))
    );
    // nothing was written before the failure
    assert_eq!(mesh.triangles()[0].uvs, [Point2::zero(); 3]);
    assert!(mesh.set_uv_tunnel_projection(&[9], &z_axis()).is_err());
    assert!(mesh.set_uv_cylinder_projection(&[9], &z_axis()).is_err());
}

#[test]
fn test_cylinder_uv() {
    let projection = z_axis();
    assert_uv(projection.cylinder_uv(&Point3::new(0.0, 1.0, 2.0), false), 2.0, -FRAC_PI_2);

    // points just past the seam move to the favoured side
    assert_uv(projection.cylinder_uv(&Point3::new(1.0, 0.0, 0.0), true), 0.0, -TAU);
    assert_uv(projection.cylinder_uv(&Point3::new(1.0, 0.0, 0.0), false), 0.0, 0.0);

    let scaled = z_axis().with_scales(0.5, 2.0).with_u_offset(1.0);
    assert_uv(scaled.cylinder_uv(&Point3::new(0.0, 1.0, 2.0), false), 1.5, -PI);
}

#[test]
fn test_cylinder_projection_across_seam() {
    let mut mesh = Mesh::<f64>::new();
    let t = mesh
        .add_triangle_at(
            Point3::new(1.0, -0.1, 0.0),
            Point3::new(1.0, 0.1, 0.0),
            Point3::new(1.0, 0.1, 1.0),
        )
        .expect("triangle");
    mesh.set_uv_cylinder_projection(&[t], &z_axis()).expect("project");
    let uvs = mesh.triangles()[t].uvs;
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        assert!((uvs[a].y - uvs[b].y).abs() < 0.5, "seam split the triangle");
    }
}

#[test]
fn test_tunnel_uv() {
    let projection = z_axis();
    assert_uv(projection.tunnel_uv(&Point3::new(1.0, 0.0, 0.0)), 0.0, -FRAC_PI_2);
    assert_uv(projection.tunnel_uv(&Point3::new(-1.0, 0.0, 0.0)), 0.0, -FRAC_PI_2);
    assert_uv(projection.tunnel_uv(&Point3::new(0.0, 1.0, 3.0)), 3.0, -PI);
    assert_uv(projection.tunnel_uv(&Point3::new(0.0, -1.0, 0.0)), 0.0, 0.0);
}

#[test]
fn test_tunnel_path_keeps_u_continuous() {
    let mut path = TunnelPath::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0), 1.0, 1.0);
    let joint = Point3::new(1.0, 0.0, 2.0);
    let u_before = path.projection().tunnel_uv(&joint).x;

    path.advance(Point3::new(0.0, 0.0, 2.0));
    assert_relative_eq!(path.u_offset(), 2.0);
    assert_relative_eq!(path.center().z, 2.0);
    let u_after = path.projection().tunnel_uv(&joint).x;
    assert_relative_eq!(u_before, u_after, epsilon = 1e-12);

    // turning keeps accumulating distance
    path.advance(Point3::new(3.0, 0.0, 2.0));
    assert_relative_eq!(path.u_offset(), 5.0);
    assert_relative_eq!(path.projection().direction.x, 1.0);
}

#[test]
fn test_tunnel_path_projects_triangles() {
    let mut mesh = Mesh::<f64>::new();
    let t = mesh
        .add_triangle_at(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        )
        .expect("triangle");
    let path = TunnelPath::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0), 1.0, 1.0);
    path.project(&mut mesh, &[t]).expect("project");
    let uvs = mesh.triangles()[t].uvs;
    assert_uv(uvs[0], 0.0, -FRAC_PI_2);
    assert_uv(uvs[2], 1.0, -PI);
}
