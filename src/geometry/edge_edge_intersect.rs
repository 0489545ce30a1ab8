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

//! Epsilon-tolerant 3D line and segment intersection.
//!
//! Both lines are written parametrically, `a + m·(b - a)` and `c + n·(d - c)`.
//! One coordinate plane with a non-zero determinant is used to solve for the
//! parameters, then the two implied 3D points are compared; skew lines fail
//! that comparison and report no intersection.

use crate::{geometry::point_3::Point3, numeric::scalar::Scalar, params::EPSILON_SQUARED};

/// Intersection of two infinite lines with the parameter on each line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection<T: Scalar> {
    pub point: Point3<T>,
    /// Parameter on `a + m·(b - a)`.
    pub m: T,
    /// Parameter on `c + n·(d - c)`.
    pub n: T,
}

#[inline(always)]
fn in_closed_unit<T: Scalar>(t: T) -> bool {
    t >= T::zero() && t <= T::one()
}

#[inline(always)]
fn in_open_unit<T: Scalar>(t: T) -> bool {
    t > T::zero() && t < T::one()
}

pub fn line_line_intersect<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Option<LineIntersection<T>> {
    let u = *b - *a;
    let v = *d - *c;

    let divisor_xy = v.x * u.y - v.y * u.x;
    let divisor_xz = v.x * u.z - v.z * u.x;
    let divisor_yz = v.y * u.z - v.z * u.y;

    let n = if !divisor_xy.is_zero() {
        (c.y * u.x - a.y * u.x - u.y * c.x + a.x * u.y) / divisor_xy
    } else if !divisor_xz.is_zero() {
        (c.z * u.x - a.z * u.x - u.z * c.x + a.x * u.z) / divisor_xz
    } else if !divisor_yz.is_zero() {
        (c.z * u.y - a.z * u.y - u.z * c.y + a.y * u.z) / divisor_yz
    } else {
        // parallel or degenerate in every plane
        return None;
    };

    let m = if !u.y.is_zero() {
        (c.y + n * v.y - a.y) / u.y
    } else if !u.x.is_zero() {
        (c.x + n * v.x - a.x) / u.x
    } else if !u.z.is_zero() {
        (c.z + n * v.z - a.z) / u.z
    } else {
        return None;
    };

    let on_first = *a + u * m;
    let on_second = *c + v * n;
    if on_first.distance_squared_to(&on_second) < T::of(EPSILON_SQUARED) {
        Some(LineIntersection {
            point: on_first,
            m,
            n,
        })
    } else {
        None
    }
}

/// Segment `ab` against segment `cd`, endpoints included.
pub fn edge_edge_intersect<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Option<Point3<T>> {
    line_line_intersect(a, b, c, d)
        .filter(|hit| in_closed_unit(hit.m) && in_closed_unit(hit.n))
        .map(|hit| hit.point)
}

/// Segment `ab` against segment `cd`; at least one of the two parameters must
/// lie strictly inside its segment, so edges that merely touch at a common
/// endpoint are not reported.
pub fn edge_edge_intersect_ignore_ends<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Option<Point3<T>> {
    let hit = line_line_intersect(a, b, c, d)?;
    let inside = (in_open_unit(hit.m) && in_closed_unit(hit.n))
        || (in_closed_unit(hit.m) && in_open_unit(hit.n));
    inside.then_some(hit.point)
}

/// Segment `ab` against the infinite line through `c` and `d`.
pub fn edge_line_intersect<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Option<Point3<T>> {
    line_line_intersect(a, b, c, d)
        .filter(|hit| in_closed_unit(hit.m))
        .map(|hit| hit.point)
}

/// Parameter of `p` on the line through `a` and `b`, if `p` lies on it.
pub fn point_on_line<T: Scalar>(p: &Point3<T>, a: &Point3<T>, b: &Point3<T>) -> Option<T> {
    let u = *b - *a;
    let m = if !u.x.is_zero() {
        (p.x - a.x) / u.x
    } else if !u.y.is_zero() {
        (p.y - a.y) / u.y
    } else if !u.z.is_zero() {
        (p.z - a.z) / u.z
    } else {
        T::zero()
    };
    let projected = *a + u * m;
    (projected.distance_squared_to(p) < T::of(EPSILON_SQUARED)).then_some(m)
}

/// Parameter of `p` on segment `ab`, if `p` lies on it.
pub fn point_on_segment<T: Scalar>(p: &Point3<T>, a: &Point3<T>, b: &Point3<T>) -> Option<T> {
    point_on_line(p, a, b).filter(|m| in_closed_unit(*m))
}
