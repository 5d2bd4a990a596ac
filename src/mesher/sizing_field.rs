// SPDX-License-Identifier: MIT
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

use crate::geometry::aabb::Aabb;
use crate::geometry::vector3::Vector3;

/// External sizing/indicator field the mesher samples during construction.
///
/// Implementations must be deterministic pure functions of position, and
/// should tolerate queries slightly outside `bounds` (the octree root cube
/// pads a non-cubic domain).
pub trait SizingField {
    /// Domain bounding box the mesh should cover.
    fn bounds(&self) -> Aabb;

    /// Recommended local element size at `p`.
    fn size_at(&self, p: &Vector3) -> f64;

    /// Material label at `p`. Non-negative; the negative range is reserved
    /// for the mesh's own unset/boundary markers.
    fn label_at(&self, p: &Vector3) -> i32;
}

/// Uniform element size and a single material over a box.
#[derive(Debug, Clone)]
pub struct ConstantField {
    bounds: Aabb,
    size: f64,
    label: i32,
}

impl ConstantField {
    pub fn new(bounds: Aabb, size: f64, label: i32) -> Self {
        Self {
            bounds,
            size,
            label,
        }
    }
}

impl SizingField for ConstantField {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn size_at(&self, _p: &Vector3) -> f64 {
        self.size
    }
    fn label_at(&self, _p: &Vector3) -> i32 {
        self.label
    }
}

/// Uniform element size with two materials separated by the plane
/// `normal . p = offset`.
#[derive(Debug, Clone)]
pub struct PlaneField {
    bounds: Aabb,
    size: f64,
    normal: Vector3,
    offset: f64,
    below: i32,
    above: i32,
}

impl PlaneField {
    pub fn new(
        bounds: Aabb,
        size: f64,
        normal: Vector3,
        offset: f64,
        below: i32,
        above: i32,
    ) -> Self {
        Self {
            bounds,
            size,
            normal: normal.normalized(),
            offset,
            below,
            above,
        }
    }
}

impl SizingField for PlaneField {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn size_at(&self, _p: &Vector3) -> f64 {
        self.size
    }
    fn label_at(&self, p: &Vector3) -> i32 {
        if self.normal.dot(p) < self.offset {
            self.below
        } else {
            self.above
        }
    }
}
