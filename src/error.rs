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

//! Error types for mesh construction.
//!
//! Local geometric failures (degenerate triangles, parallel rays, snapped
//! cuts) are absorbed where they occur and surface as `Option`/`bool`
//! results; only an unusable input field is a hard error.

use thiserror::Error;

/// Errors that can occur while constructing a mesh.
#[derive(Debug, Error)]
pub enum TetError {
    /// `create_mesh` was called before a sizing field was set.
    #[error("no sizing field set")]
    MissingField,

    /// The sizing field reports a domain with no volume.
    #[error("empty sizing field domain: {details}")]
    EmptyDomain {
        /// Description of the offending bounds.
        details: String,
    },
}

/// Result type for mesh construction.
pub type TetResult<T> = Result<T, TetError>;
