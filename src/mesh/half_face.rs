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

/// Triangular face of a tet, stored once per unordered vertex triple.
///
/// `triple` is set iff the face's corners carry three distinct materials;
/// the triple vertex lies within the closed triangle.
#[derive(Clone, Debug)]
pub struct HalfFace {
    /// Corner vertex indices, sorted ascending.
    pub verts: [usize; 3],
    /// The face's bounding edges in the edge arena.
    pub edges: [usize; 3],
    pub triple: Option<usize>,
}

impl HalfFace {
    pub fn new(mut verts: [usize; 3], edges: [usize; 3]) -> Self {
        verts.sort_unstable();
        Self {
            verts,
            edges,
            triple: None,
        }
    }
}
