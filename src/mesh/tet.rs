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

/// Vertex index pairs of the 6 edges of a tet, in canonical order.
pub const TET_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Vertex index triples of the 4 faces of a tet; face `i` is opposite
/// corner `i`.
pub const TET_FACES: [(usize, usize, usize); 4] = [(1, 2, 3), (0, 2, 3), (0, 1, 3), (0, 1, 2)];

/// A tetrahedron over four arena vertices.
///
/// `edges` and `faces` stay unresolved (`usize::MAX`) until the owning
/// mesh builds adjacency; `quadruple` is set iff the four corners carry
/// four distinct materials.
#[derive(Clone, Debug)]
pub struct Tet {
    pub verts: [usize; 4],
    pub edges: [usize; 6],
    pub faces: [usize; 4],
    pub quadruple: Option<usize>,
    /// Serial index assigned by the owning mesh at insertion.
    pub index: usize,
}

impl Tet {
    pub fn new(verts: [usize; 4]) -> Self {
        Self {
            verts,
            edges: [usize::MAX; 6],
            faces: [usize::MAX; 4],
            quadruple: None,
            index: usize::MAX,
        }
    }

    /// True once adjacency has been resolved for this tet.
    pub fn has_adjacency(&self) -> bool {
        self.edges[0] != usize::MAX
    }
}
