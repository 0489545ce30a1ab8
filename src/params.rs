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

//! Tolerances and tunables for the kernel.

use crate::{geometry::point_3::Point3, numeric::scalar::Scalar};

/// Positional tolerance used for welding and vertex equality.
pub const WELD_EPSILON: f64 = 1e-3;

/// Square of [`WELD_EPSILON`]; all positional comparisons use this.
pub const EPSILON_SQUARED: f64 = WELD_EPSILON * WELD_EPSILON;

/// Two positions are the same vertex if their squared distance is within
/// [`EPSILON_SQUARED`].
#[inline(always)]
pub fn same_in_tolerance<T: Scalar>(a: &Point3<T>, b: &Point3<T>) -> bool {
    a.distance_squared_to(b) <= T::of(EPSILON_SQUARED)
}

/// Tunables for loop discovery, triangulation, cleanup and refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelParams {
    /// Loop-search corners must satisfy `|dot(n0, n)| >= 1 - planarity_tolerance`
    /// against the normal of the first three loop points. Default: 0.1
    pub planarity_tolerance: f64,

    /// Ear test threshold: a corner is convex when
    /// `dot(back, forward × normal)` is below this value. Default: -0.1
    pub ear_threshold: f64,

    /// Two faces are back-to-back flaps when `|dot(n1, n2) + 1|` is below this.
    /// Default: 1e-3
    pub flap_tolerance: f64,

    /// Upper bound on refinement passes in `split_big_triangles`. Default: 16
    pub max_split_passes: usize,

    /// Angle in degrees used by `ShadingMode::Auto` when built from params.
    /// Default: 60
    pub auto_smooth_angle_deg: f64,

    /// Longest loop the small-loop search will report. `None` means bounded
    /// only by the number of input edges. Default: None
    pub max_loop_length: Option<usize>,

    /// Height tolerance for "vertex inside candidate triangle" checks in the
    /// polygon fillers. Default: 0.2
    pub containment_height: f64,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            planarity_tolerance: 0.1,
            ear_threshold: -0.1,
            flap_tolerance: 1e-3,
            max_split_passes: 16,
            auto_smooth_angle_deg: 60.0,
            max_loop_length: None,
            containment_height: 0.2,
        }
    }
}

impl KernelParams {
    #[must_use]
    pub const fn with_planarity_tolerance(mut self, tolerance: f64) -> Self {
        self.planarity_tolerance = tolerance;
        self
    }

    #[must_use]
    pub const fn with_ear_threshold(mut self, threshold: f64) -> Self {
        self.ear_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_max_split_passes(mut self, passes: usize) -> Self {
        self.max_split_passes = passes;
        self
    }

    #[must_use]
    pub const fn with_max_loop_length(mut self, len: usize) -> Self {
        self.max_loop_length = Some(len);
        self
    }

    #[must_use]
    pub const fn with_auto_smooth_angle(mut self, degrees: f64) -> Self {
        self.auto_smooth_angle_deg = degrees;
        self
    }
}
