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

use std::ops::{Add, AddAssign, Index, Sub};

use crate::{
    geometry::vector_3::Vector3,
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3<T: Scalar> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn from_vals(v: [T; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn as_vector(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn distance_squared_to(&self, other: &Point3<T>) -> T {
        (*self - *other).norm_squared()
    }

    pub fn distance_to(&self, other: &Point3<T>) -> T {
        self.distance_squared_to(other).sqrt()
    }

    pub fn midpoint(&self, other: &Point3<T>) -> Point3<T> {
        Point3::new(
            (self.x + other.x) * T::half(),
            (self.y + other.y) * T::half(),
            (self.z + other.z) * T::half(),
        )
    }

    /// Sum of the coordinates, used to pick a canonical start on loops.
    pub fn coordinate_sum(&self) -> T {
        self.x + self.y + self.z
    }

    /// Centroid of an arbitrary point set; the origin for an empty set.
    pub fn centroid<I: IntoIterator<Item = Point3<T>>>(points: I) -> Point3<T> {
        let mut sum = Vector3::zero();
        let mut count = 0usize;
        for p in points {
            sum += p.as_vector();
            count += 1;
        }
        if count == 0 {
            return Point3::origin();
        }
        Point3::from_vector(sum / T::of(count as f64))
    }
}

impl<T: Scalar> Index<usize> for Point3<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 index out of bounds: {i}"),
        }
    }
}

impl<T: Scalar> Sub for Point3<T> {
    type Output = Vector3<T>;
    fn sub(self, rhs: Point3<T>) -> Vector3<T> {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;
    fn add(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> AddAssign<Vector3<T>> for Point3<T> {
    fn add_assign(&mut self, rhs: Vector3<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Scalar> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;
    fn sub(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> From<[T; 3]> for Point3<T> {
    fn from(v: [T; 3]) -> Self {
        Point3::from_vals(v)
    }
}
