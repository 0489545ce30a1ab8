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

//! Cyclic sequences addressed with any signed index.
//!
//! [`RingView`] borrows a slice and only changes how it is read; [`Ring`]
//! owns its storage and supports removal.

use std::ops::Index;

#[inline(always)]
fn wrap(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Borrowed cyclic window with a rotation offset and a direction flag.
#[derive(Debug, Clone, Copy)]
pub struct RingView<'a, T> {
    data: &'a [T],
    offset: usize,
    reversed: bool,
}

impl<'a, T> RingView<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            offset: 0,
            reversed: false,
        }
    }

    /// A view whose index 0 is `data[offset]`.
    pub fn with_offset(data: &'a [T], offset: usize) -> Self {
        let offset = if data.is_empty() { 0 } else { offset % data.len() };
        Self {
            data,
            offset,
            reversed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    fn data_index(&self, i: isize) -> usize {
        let n = self.data.len();
        let clipped = wrap(i, n);
        if self.reversed {
            (self.offset + n - clipped) % n
        } else {
            (self.offset + clipped) % n
        }
    }

    pub fn get(&self, i: isize) -> Option<&'a T> {
        if self.data.is_empty() {
            return None;
        }
        Some(&self.data[self.data_index(i)])
    }

    /// Moves index 0 one step forward in the current reading direction.
    pub fn shift(&mut self) {
        let n = self.data.len();
        if n == 0 {
            return;
        }
        self.offset = if self.reversed {
            (self.offset + n - 1) % n
        } else {
            (self.offset + 1) % n
        };
    }

    /// Reads the ring backwards from the same index 0.
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        (0..self.data.len() as isize).map(move |i| &self.data[self.data_index(i)])
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Index<isize> for RingView<'_, T> {
    type Output = T;

    fn index(&self, i: isize) -> &T {
        assert!(!self.data.is_empty(), "index into empty ring");
        &self.data[self.data_index(i)]
    }
}

/// Owned cyclic list with removal and reverse lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring<T> {
    data: Vec<T>,
    offset: usize,
    reversed: bool,
}

impl<T> Ring<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            offset: 0,
            reversed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn data_index(&self, i: isize) -> usize {
        RingView {
            data: &self.data,
            offset: self.offset,
            reversed: self.reversed,
        }
        .data_index(i)
    }

    fn virtual_index(&self, data_index: usize) -> isize {
        let n = self.data.len() as isize;
        let d = data_index as isize;
        let o = self.offset as isize;
        if self.reversed {
            (o - d).rem_euclid(n)
        } else {
            (d - o).rem_euclid(n)
        }
    }

    pub fn get(&self, i: isize) -> Option<&T> {
        if self.data.is_empty() {
            return None;
        }
        Some(&self.data[self.data_index(i)])
    }

    pub fn view(&self) -> RingView<'_, T> {
        RingView {
            data: &self.data,
            offset: self.offset,
            reversed: self.reversed,
        }
    }

    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn shift(&mut self) {
        let n = self.data.len();
        if n == 0 {
            return;
        }
        self.offset = if self.reversed {
            (self.offset + n - 1) % n
        } else {
            (self.offset + 1) % n
        };
    }

    /// Removes the element at ring index `i`; the element after it takes its
    /// index.
    pub fn remove_at(&mut self, i: isize) -> Option<T> {
        let n = self.data.len();
        if n == 0 {
            return None;
        }
        let d = self.data_index(i);
        let removed = self.data.remove(d);
        let n = n - 1;
        if n == 0 {
            self.offset = 0;
            return Some(removed);
        }
        if self.reversed {
            // the successor in reading order sits at d - 1 in storage
            if d <= self.offset {
                self.offset = (self.offset + n - 1) % n;
            }
        } else if d < self.offset {
            self.offset -= 1;
        }
        self.offset %= n;
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.data.len() as isize).map(move |i| &self.data[self.data_index(i)])
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> Ring<T> {
    /// Ring index of the first stored element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<isize> {
        self.data
            .iter()
            .position(|x| x == item)
            .map(|d| self.virtual_index(d))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }

    /// `b` directly follows `a` in reading order.
    pub fn is_consecutive(&self, a: &T, b: &T) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.is_consecutive_index(i, j),
            _ => false,
        }
    }
}

impl<T> Ring<T> {
    pub fn is_consecutive_index(&self, i: isize, j: isize) -> bool {
        let n = self.data.len();
        n > 0 && wrap(i + 1, n) == wrap(j, n)
    }
}

impl<T> Index<isize> for Ring<T> {
    type Output = T;

    fn index(&self, i: isize) -> &T {
        assert!(!self.data.is_empty(), "index into empty ring");
        &self.data[self.data_index(i)]
    }
}

impl<T> From<Vec<T>> for Ring<T> {
    fn from(data: Vec<T>) -> Self {
        Ring::new(data)
    }
}
