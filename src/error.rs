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

//! Error types for kernel operations.
//!
//! Geometric degeneracies are not errors: they are logged and the operation
//! returns a best-effort result. Only structural inconsistencies and
//! parameter misuse surface here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// An input collection that must not be empty was empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Two rings that must be bridged have different lengths.
    #[error("cannot bridge rings of different length ({from} vs {to})")]
    RingLengthMismatch { from: usize, to: usize },

    /// A vertex handle is out of range or refers to a removed vertex.
    #[error("invalid vertex handle {0}")]
    InvalidVertex(usize),

    /// A triangle handle is out of range or refers to a removed triangle.
    #[error("invalid triangle handle {0}")]
    InvalidTriangle(usize),

    /// A vertex back-link refers to a triangle that is no longer in the mesh.
    #[error("vertex {vertex} is linked to removed triangle {triangle}")]
    DanglingTriangle { vertex: usize, triangle: usize },

    /// The boundary walk ran out of candidate edges at both ends.
    #[error("boundary trace dead-locked with {remaining} edges left")]
    BoundaryTraceDeadlock { remaining: usize },

    /// A scalar parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type MeshResult<T> = std::result::Result<T, MeshError>;
