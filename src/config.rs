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

//! Configuration for the octree mesher.

use crate::geometry::util::EPS;

/// Tuning knobs for octree refinement and interface resolution.
///
/// The defaults are suitable for sizing fields measured in the same units
/// as the domain bounds. Use the `with_*` methods to adjust individual
/// settings:
///
/// ```
/// use tetcut::MesherConfig;
///
/// let config = MesherConfig::default().with_max_depth(6).with_size_alpha(1.5);
/// assert_eq!(config.max_depth, 6);
/// ```
#[derive(Debug, Clone)]
pub struct MesherConfig {
    /// Maximum octree refinement depth. Reaching it before the size
    /// criterion is satisfied is non-fatal; the coarser leaf is accepted.
    pub max_depth: u32,

    /// Split while `edge_length > size_alpha * size_at(center)`. Values
    /// above 1.0 tolerate coarser leaves than the field asks for.
    pub size_alpha: f64,

    /// Stop width, as a fraction of the edge, for the bisection search
    /// that places cut points.
    pub cut_tolerance: f64,

    /// Degeneracy tolerance for geometric predicates and for snapping
    /// near-endpoint cuts onto the endpoint itself.
    pub epsilon: f64,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            size_alpha: 1.0,
            cut_tolerance: 1e-6,
            epsilon: EPS,
        }
    }
}

impl MesherConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_size_alpha(mut self, size_alpha: f64) -> Self {
        self.size_alpha = size_alpha;
        self
    }

    pub fn with_cut_tolerance(mut self, cut_tolerance: f64) -> Self {
        self.cut_tolerance = cut_tolerance;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}
