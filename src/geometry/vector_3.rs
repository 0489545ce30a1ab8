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

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::numeric::scalar::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3<T: Scalar> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    #[inline(always)]
    pub fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline(always)]
    pub fn cross(&self, other: &Vector3<T>) -> Vector3<T> {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline(always)]
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }

    #[inline(always)]
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero so that
    /// degenerate input never leaks NaN into later dot products.
    pub fn normalized(&self) -> Vector3<T> {
        let n = self.norm();
        if n.is_zero() {
            return Vector3::zero();
        }
        Vector3 {
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    pub fn scale(&self, s: T) -> Vector3<T> {
        Vector3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise product.
    pub fn mul_elementwise(&self, other: &Vector3<T>) -> Vector3<T> {
        Vector3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }

    /// Angle between two vectors in degrees, 0 for degenerate input.
    pub fn angle_deg(&self, other: &Vector3<T>) -> T {
        let denom = (self.norm_squared() * other.norm_squared()).sqrt();
        if denom.is_zero() {
            return T::zero();
        }
        let c = (self.dot(other) / denom).max(-T::one()).min(T::one());
        c.acos().to_degrees()
    }
}

impl<T: Scalar> Add for Vector3<T> {
    type Output = Vector3<T>;
    fn add(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> AddAssign for Vector3<T> {
    fn add_assign(&mut self, rhs: Vector3<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Scalar> Sub for Vector3<T> {
    type Output = Vector3<T>;
    fn sub(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, rhs: Vector3<T>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T: Scalar> Mul<T> for Vector3<T> {
    type Output = Vector3<T>;
    fn mul(self, s: T) -> Vector3<T> {
        self.scale(s)
    }
}

impl<T: Scalar> Div<T> for Vector3<T> {
    type Output = Vector3<T>;
    fn div(self, s: T) -> Vector3<T> {
        Vector3::new(self.x / s, self.y / s, self.z / s)
    }
}

impl<T: Scalar> Neg for Vector3<T> {
    type Output = Vector3<T>;
    fn neg(self) -> Vector3<T> {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}
