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

use crate::{
    geometry::{point_3::Point3, vector_3::Vector3},
    numeric::scalar::Scalar,
};

/// Minimum ray parameter accepted as a hit, and the half-width of the
/// "parallel to the plane" band.
pub const RAY_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<T: Scalar> {
    pub point: Point3<T>,
    /// Ray parameter: `point = origin + direction * t`.
    pub t: T,
}

/// Möller–Trumbore against the front side of `(v0, v1, v2)`.
///
/// Origins behind the triangle never hit; call again with `v1`/`v2` swapped
/// to test the back side.
pub fn ray_hit_triangle<T: Scalar>(
    origin: &Point3<T>,
    direction: &Vector3<T>,
    v0: &Point3<T>,
    v1: &Point3<T>,
    v2: &Point3<T>,
) -> Option<RayHit<T>> {
    let edge1 = *v1 - *v0;
    let edge2 = *v2 - *v0;
    let normal = edge1.cross(&edge2);
    if normal.dot(&(*origin - *v0)) < T::zero() {
        return None;
    }
    let h = direction.cross(&edge2);
    let aa = edge1.dot(&h);
    let eps = T::of(RAY_EPSILON);
    if aa > -eps && aa < eps {
        return None;
    }
    let f = T::one() / aa;
    let s = *origin - *v0;
    let u = f * s.dot(&h);
    if u < T::zero() || u > T::one() {
        return None;
    }
    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < T::zero() || u + v > T::one() {
        return None;
    }
    let t = f * edge2.dot(&q);
    if t <= eps {
        return None;
    }
    Some(RayHit {
        point: *origin + *direction * t,
        t,
    })
}

/// True if `point` lies strictly in the open half space the triangle faces.
#[inline]
pub fn faces_point<T: Scalar>(
    v0: &Point3<T>,
    v1: &Point3<T>,
    v2: &Point3<T>,
    point: &Point3<T>,
) -> bool {
    (*v1 - *v0).cross(&(*v2 - *v0)).dot(&(*point - *v0)) > T::zero()
}

/// Barycentric prism test: does the projection of `point` along the normal
/// fall inside the triangle?
pub fn point_is_above<T: Scalar>(
    v0: &Point3<T>,
    v1: &Point3<T>,
    v2: &Point3<T>,
    point: &Point3<T>,
) -> bool {
    let u = *v1 - *v0;
    let v = *v2 - *v0;
    let n = u.cross(&v);
    let nn = n.dot(&n);
    if nn.is_zero() {
        return false;
    }
    let w = *point - *v0;
    let gamma = u.cross(&w).dot(&n) / nn;
    let beta = w.cross(&v).dot(&n) / nn;
    let alpha = T::one() - gamma - beta;
    let unit = |x: T| x >= T::zero() && x <= T::one();
    unit(alpha) && unit(beta) && unit(gamma)
}

/// Edge-side containment used by the polygon fillers: `point` is inside the
/// triangle's prism (edges inclusive) and within `height_tolerance` of its
/// plane.
pub fn triangle_contains_point<T: Scalar>(
    v0: &Point3<T>,
    v1: &Point3<T>,
    v2: &Point3<T>,
    point: &Point3<T>,
    height_tolerance: T,
) -> bool {
    let n = (*v1 - *v0).cross(&(*v2 - *v0)).normalized();
    if n.cross(&(*v1 - *v0)).dot(&(*point - *v0)) < T::zero() {
        return false;
    }
    if n.cross(&(*v2 - *v1)).dot(&(*point - *v1)) < T::zero() {
        return false;
    }
    if n.cross(&(*v0 - *v2)).dot(&(*point - *v2)) < T::zero() {
        return false;
    }
    (*point - *v0).dot(&n).abs() < height_tolerance
}

/// Newell normal of a closed polygon, not normalized.
pub fn polygon_normal<T: Scalar>(points: &[Point3<T>]) -> Vector3<T> {
    let mut n = Vector3::zero();
    let len = points.len();
    for i in 0..len {
        let p = &points[i];
        let q = &points[(i + 1) % len];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n
}
