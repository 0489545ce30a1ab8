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

use smallvec::SmallVec;

use crate::{
    geometry::point_3::Point3, impl_mesh, mesh::basic_types::VertexId,
    params::{WELD_EPSILON, same_in_tolerance},
};

impl_mesh! {
    #[inline(always)]
    fn floor_sat_i64(x: f64) -> i64 {
        if !x.is_finite() { return if x.is_sign_positive() { i64::MAX } else { i64::MIN }; }
        let i = x as i64;
        i - ((i as f64 > x) as i64)
    }

    /// Cell of `pos` in the weld grid. Cells are one weld tolerance wide, so
    /// any vertex within tolerance lives in the same or a neighbouring cell.
    #[inline(always)]
    pub fn position_to_hash_key(&self, pos: &Point3<T>) -> (i64, i64, i64) {
        let inv = 1.0 / WELD_EPSILON;
        (
            Self::floor_sat_i64(pos.x.as_f64() * inv),
            Self::floor_sat_i64(pos.y.as_f64() * inv),
            Self::floor_sat_i64(pos.z.as_f64() * inv),
        )
    }

    pub(crate) fn hash_insert(&mut self, id: VertexId) {
        let key = self.position_to_hash_key(&self.vertices[id].position);
        self.vertex_spatial_hash.entry(key).or_default().push(id);
    }

    pub(crate) fn hash_remove(&mut self, id: VertexId, pos: &Point3<T>) {
        let key = self.position_to_hash_key(pos);
        if let Some(bucket) = self.vertex_spatial_hash.get_mut(&key) {
            bucket.retain(|v| *v != id);
            if bucket.is_empty() {
                self.vertex_spatial_hash.remove(&key);
            }
        }
    }

    /// Lowest-id live vertex within weld tolerance of `pos`.
    pub fn find_welded(&self, pos: &Point3<T>) -> Option<VertexId> {
        let (kx, ky, kz) = self.position_to_hash_key(pos);
        let mut best: Option<VertexId> = None;
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let key = (
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    );
                    let Some(bucket) = self.vertex_spatial_hash.get(&key) else {
                        continue;
                    };
                    for &id in bucket {
                        let v = &self.vertices[id];
                        if v.removed || !same_in_tolerance(&v.position, pos) {
                            continue;
                        }
                        if best.is_none_or(|b| id < b) {
                            best = Some(id);
                        }
                    }
                }
            }
        }
        best
    }

    /// Every live vertex within weld tolerance of `pos`, ascending by id.
    pub fn find_all_welded(&self, pos: &Point3<T>) -> SmallVec<[VertexId; 4]> {
        let (kx, ky, kz) = self.position_to_hash_key(pos);
        let mut found: SmallVec<[VertexId; 4]> = SmallVec::new();
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let key = (
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    );
                    if let Some(bucket) = self.vertex_spatial_hash.get(&key) {
                        found.extend(bucket.iter().copied().filter(|&id| {
                            let v = &self.vertices[id];
                            !v.removed && same_in_tolerance(&v.position, pos)
                        }));
                    }
                }
            }
        }
        found.sort_unstable();
        found
    }

    pub(crate) fn rebuild_spatial_hash(&mut self) {
        self.vertex_spatial_hash.clear();
        for id in 0..self.vertices.len() {
            if !self.vertices[id].removed {
                self.hash_insert(id);
            }
        }
    }
}
