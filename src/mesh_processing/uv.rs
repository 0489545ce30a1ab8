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

//! Texture coordinate projections. They only write triangle UVs and never
//! touch positions or links.

use crate::{
    error::MeshResult,
    geometry::{point_2::Point2, point_3::Point3, vector_3::Vector3},
    impl_mesh,
    mesh::basic_types::{Mesh, TriangleId},
    numeric::scalar::Scalar,
};

/// Orthonormal pair spanning the plane perpendicular to `axis`. For an axis
/// along +Z this is (+X, +Y).
fn radial_basis<T: Scalar>(axis: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let helper = if axis.x.abs() < T::of(0.9) {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let second = axis.cross(&helper).normalized();
    let first = second.cross(axis).normalized();
    (first, second)
}

/// Axial coordinate of `p` and its radial offset expressed in the basis.
fn axial_coordinates<T: Scalar>(
    p: &Point3<T>,
    center: &Point3<T>,
    axis: &Vector3<T>,
) -> (T, T, T) {
    let (e1, e2) = radial_basis(axis);
    let along = (*p - *center).dot(axis);
    let radial = *p - (*center + *axis * along);
    (along, radial.dot(&e1), radial.dot(&e2))
}

/// Azimuth of a radial offset as a fraction of a full turn in `[0, 1)`.
fn turn_fraction<T: Scalar>(x: T, y: T) -> T {
    let f = y.atan2(x) / T::TAU();
    if f < T::zero() { f + T::one() } else { f }
}

fn box_uv<T: Scalar>(p: &Point3<T>, weights: (T, T, T), scale: T) -> Point2<T> {
    let (dlr, dfb, dud) = weights;
    Point2::new(
        (dlr * p.z + dfb * p.x + dud * p.x) * scale,
        (dlr * p.y + dfb * p.y + dud * p.z) * scale,
    )
}

/// Cylinder projection parameters shared by the cylinder and tunnel modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisProjection<T: Scalar> {
    pub center: Point3<T>,
    /// Unit axis; U grows along it.
    pub direction: Vector3<T>,
    pub u_offset: T,
    pub u_scale: T,
    pub v_scale: T,
}

impl<T: Scalar> AxisProjection<T> {
    pub fn new(center: Point3<T>, direction: Vector3<T>) -> Self {
        Self {
            center,
            direction: direction.normalized(),
            u_offset: T::zero(),
            u_scale: T::one(),
            v_scale: T::one(),
        }
    }

    #[must_use]
    pub fn with_scales(mut self, u_scale: T, v_scale: T) -> Self {
        self.u_scale = u_scale;
        self.v_scale = v_scale;
        self
    }

    #[must_use]
    pub fn with_u_offset(mut self, u_offset: T) -> Self {
        self.u_offset = u_offset;
        self
    }

    /// Cylinder UV of one point. `favor_one` keeps azimuths near the seam on
    /// the high side so a triangle straddling it does not wrap.
    pub fn cylinder_uv(&self, p: &Point3<T>, favor_one: bool) -> Point2<T> {
        let (along, x, y) = axial_coordinates(p, &self.center, &self.direction);
        let mut f = turn_fraction(x, y);
        let quarter = T::of(0.25);
        if favor_one && f < quarter {
            f += T::one();
        } else if !favor_one && f > T::one() - quarter {
            f -= T::one();
        }
        Point2::new(
            (along + self.u_offset) * self.u_scale,
            -f * self.v_scale * T::TAU(),
        )
    }

    /// Tunnel UV of one point: the azimuth is folded so both halves of the
    /// tube mirror into the same V range.
    pub fn tunnel_uv(&self, p: &Point3<T>) -> Point2<T> {
        let (along, x, y) = axial_coordinates(p, &self.center, &self.direction);
        let angle = x.atan2(-y);
        Point2::new(
            (along + self.u_offset) * self.u_scale,
            -angle.abs() * self.v_scale,
        )
    }
}

/// Tunnel projection that follows a polyline of centres. Each
/// [`TunnelPath::advance`] adds the travelled distance to the U offset, so
/// U stays continuous across consecutive segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunnelPath<T: Scalar> {
    projection: AxisProjection<T>,
}

impl<T: Scalar> TunnelPath<T> {
    pub fn new(center: Point3<T>, direction: Vector3<T>, u_scale: T, v_scale: T) -> Self {
        Self {
            projection: AxisProjection::new(center, direction).with_scales(u_scale, v_scale),
        }
    }

    pub fn center(&self) -> Point3<T> {
        self.projection.center
    }

    pub fn u_offset(&self) -> T {
        self.projection.u_offset
    }

    pub fn projection(&self) -> &AxisProjection<T> {
        &self.projection
    }

    /// Moves to `next_center`, pointing the axis along the step.
    pub fn advance(&mut self, next_center: Point3<T>) {
        let step = next_center - self.projection.center;
        let length = step.norm();
        if !length.is_zero() {
            self.projection.direction = step.normalized();
        }
        self.projection.u_offset += length;
        self.projection.center = next_center;
    }

    /// Applies the current segment's projection to `ts` of `mesh`.
    pub fn project(&self, mesh: &mut Mesh<T>, ts: &[TriangleId]) -> MeshResult<()> {
        mesh.set_uv_tunnel_projection(ts, &self.projection)
    }
}

impl_mesh! {
    /// Box projection of every live triangle.
    pub fn set_uv_box_projection(&mut self, scale: T) {
        let ts: Vec<TriangleId> = self.live_triangle_ids().collect();
        for t in ts {
            self.box_project_triangle(t, scale);
        }
    }

    /// Box projection of the listed triangles: each triangle blends the
    /// three axis planes by how much its normal faces each axis.
    pub fn set_uv_box_projection_of(&mut self, ts: &[TriangleId], scale: T) -> MeshResult<()> {
        for &t in ts {
            self.check_triangle(t)?;
        }
        for &t in ts {
            self.box_project_triangle(t, scale);
        }
        Ok(())
    }

    fn box_project_triangle(&mut self, t: TriangleId, scale: T) {
        let n = self.triangle_normal(t);
        let weights = (n.x.abs(), n.z.abs(), n.y.abs());
        let [a, b, c] = self.triangle_positions(t);
        self.triangles[t].uvs = [
            box_uv(&a, weights, scale),
            box_uv(&b, weights, scale),
            box_uv(&c, weights, scale),
        ];
    }

    /// Cylinder projection of the listed triangles. The seam side is picked
    /// per triangle from the azimuth of its centre.
    pub fn set_uv_cylinder_projection(
        &mut self,
        ts: &[TriangleId],
        projection: &AxisProjection<T>,
    ) -> MeshResult<()> {
        for &t in ts {
            self.check_triangle(t)?;
        }
        for &t in ts {
            let center = self.triangle_center(t);
            let (_, x, y) = axial_coordinates(&center, &projection.center, &projection.direction);
            let favor_one = turn_fraction(x, y) > T::half();
            let [a, b, c] = self.triangle_positions(t);
            self.triangles[t].uvs = [
                projection.cylinder_uv(&a, favor_one),
                projection.cylinder_uv(&b, favor_one),
                projection.cylinder_uv(&c, favor_one),
            ];
        }
        Ok(())
    }

    /// Tunnel projection of the listed triangles, per vertex.
    pub fn set_uv_tunnel_projection(
        &mut self,
        ts: &[TriangleId],
        projection: &AxisProjection<T>,
    ) -> MeshResult<()> {
        for &t in ts {
            self.check_triangle(t)?;
        }
        for &t in ts {
            let [a, b, c] = self.triangle_positions(t);
            self.triangles[t].uvs = [
                projection.tunnel_uv(&a),
                projection.tunnel_uv(&b),
                projection.tunnel_uv(&c),
            ];
        }
        Ok(())
    }
}
