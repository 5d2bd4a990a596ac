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

use crate::geometry::vector3::Vector3;

/// Label of a vertex whose material has not been sampled yet.
pub const MATERIAL_UNSET: i32 = -1;

/// Label carried by interface vertices (cuts, triples, quadruples); they sit
/// on a material boundary and belong to no single material.
pub const MATERIAL_BOUNDARY: i32 = -2;

/// Role of a vertex in the conforming mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexOrder {
    /// Background-lattice vertex.
    Grid,
    /// Lies on an edge where two materials meet.
    Cut,
    /// Lies on a face where three materials meet.
    Triple,
    /// Lies inside a tet where four materials meet.
    Quadruple,
}

/// A mesh vertex. Owned by the [`TetMesh`](crate::mesh::TetMesh) arena and
/// referenced everywhere else by index; the position never changes after
/// insertion.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Vector3,
    pub label: i32,
    pub order: VertexOrder,
    /// Serial index assigned by the owning mesh at insertion.
    pub index: usize,
}

impl Vertex {
    pub fn new(pos: Vector3) -> Self {
        Self {
            pos,
            label: MATERIAL_UNSET,
            order: VertexOrder::Grid,
            index: usize::MAX,
        }
    }

    pub fn interface(pos: Vector3, order: VertexOrder) -> Self {
        Self {
            pos,
            label: MATERIAL_BOUNDARY,
            order,
            index: usize::MAX,
        }
    }
}
