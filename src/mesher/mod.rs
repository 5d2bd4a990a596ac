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

//! Octree-driven mesh construction.
//!
//! [`OctreeMesher`] consumes a [`SizingField`], builds a 2:1 balanced
//! octree over its domain, stitches the leaves into a background
//! tetrahedralization, and resolves material interfaces into cut, triple,
//! and quadruple points. The octree is a private construction scaffold;
//! callers only ever see the finished [`TetMesh`].

mod octree;
mod resolve;
pub mod sizing_field;

use tracing::info;

use crate::config::MesherConfig;
use crate::error::{TetError, TetResult};
use crate::mesh::TetMesh;
use crate::mesher::octree::Octree;
use crate::mesher::sizing_field::SizingField;
use crate::status::{NullSink, ProgressSink, Status};

/// Builds a conforming multimaterial tet mesh from a sizing field.
///
/// ```no_run
/// use tetcut::mesher::sizing_field::ConstantField;
/// use tetcut::{MesherConfig, OctreeMesher};
/// use tetcut::geometry::{Aabb, Vector3};
///
/// let field = ConstantField::new(
///     Aabb::new(Vector3::zero(), Vector3::new(4.0, 4.0, 4.0)),
///     1.0,
///     1,
/// );
/// let mut mesher = OctreeMesher::with_config(MesherConfig::default().with_max_depth(4));
/// mesher.set_sizing_field(&field);
/// mesher.create_mesh()?;
/// let mesh = mesher.mesh().expect("mesh was just created");
/// println!("{} tets", mesh.tets.len());
/// # Ok::<(), tetcut::TetError>(())
/// ```
pub struct OctreeMesher<'f> {
    config: MesherConfig,
    field: Option<&'f dyn SizingField>,
    sink: Box<dyn ProgressSink>,
    mesh: Option<TetMesh>,
}

impl Default for OctreeMesher<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f> OctreeMesher<'f> {
    pub fn new() -> Self {
        Self::with_config(MesherConfig::default())
    }

    pub fn with_config(config: MesherConfig) -> Self {
        Self {
            config,
            field: None,
            sink: Box::new(NullSink),
            mesh: None,
        }
    }

    pub fn set_sizing_field(&mut self, field: &'f dyn SizingField) {
        self.field = Some(field);
    }

    /// Install a progress receiver; construction reports per-leaf and
    /// per-element checkpoints through it.
    pub fn set_progress_sink(&mut self, sink: Box<dyn ProgressSink>) {
        self.sink = sink;
    }

    /// Run the full construction: refine, balance, stitch, resolve.
    ///
    /// The previous mesh (if any) is replaced. Fails only on a missing or
    /// empty sizing field; refinement hitting `max_depth` and degenerate
    /// local geometry are absorbed.
    pub fn create_mesh(&mut self) -> TetResult<()> {
        let field = self.field.ok_or(TetError::MissingField)?;
        let bounds = field.bounds();
        if bounds.is_empty() {
            return Err(TetError::EmptyDomain {
                details: format!("{:?} .. {:?}", bounds.min, bounds.max),
            });
        }

        let mut octree = Octree::new(&bounds, self.config.max_depth);
        octree.refine(field, &self.config);
        octree.balance();
        info!(leaves = octree.leaf_count(), "octree balanced");

        let mut mesh = TetMesh::with_hash_cell(octree.unit() * 0.25);
        let mut status = Status::new(octree.leaf_count(), self.sink.as_mut());
        octree.emit_tets(&mut mesh, &mut status);
        status.done();
        mesh.build_adjacency();
        info!(
            tets = mesh.tets.len(),
            verts = mesh.vertices.len(),
            "background mesh emitted"
        );

        let total = mesh.edges.len() + mesh.faces.len() + mesh.tets.len();
        let mut status = Status::new(total, self.sink.as_mut());
        resolve::resolve_interfaces(&mut mesh, field, &self.config, &mut status);
        status.done();
        info!("interfaces resolved");

        self.mesh = Some(mesh);
        Ok(())
    }

    /// The constructed mesh, once `create_mesh` has succeeded.
    pub fn mesh(&self) -> Option<&TetMesh> {
        self.mesh.as_ref()
    }

    /// Move the constructed mesh out of the mesher.
    pub fn take_mesh(&mut self) -> Option<TetMesh> {
        self.mesh.take()
    }
}
