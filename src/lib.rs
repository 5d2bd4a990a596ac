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

//! Multimaterial conforming tetrahedral meshing.
//!
//! Builds a background tetrahedralization over a sizing field with an
//! adaptively refined, 2:1 balanced octree, then resolves it into a
//! conforming multimaterial mesh: every edge, face, and tet can carry an
//! interface point (cut, triple, quadruple) where 2, 3, or 4 materials meet.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesher;
pub mod status;

pub use config::MesherConfig;
pub use error::{TetError, TetResult};
pub use mesher::OctreeMesher;
pub use mesher::sizing_field::SizingField;
