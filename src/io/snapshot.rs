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

//! Structural JSON snapshots of a mesh for debugging and visualization.
//!
//! Read-only traversal; interface fields appear only when requested:
//!
//! ```text
//! Vertex := { "id", "material", "position": { "x", "y", "z" } }
//! Tet    := { "id", "verts": [Vertex x4],
//!             "cuts": [Vertex x6]?, "triples": [Vertex x4]?, "quadruple": Vertex? }
//! ```

use serde_json::{Value, json};

use crate::mesh::tet::Tet;
use crate::mesh::tet_mesh::TetMesh;
use crate::mesh::vertex::Vertex;

/// JSON record of a vertex in its current state.
pub fn vertex_snapshot(vertex: &Vertex) -> Value {
    json!({
        "id": vertex.index,
        "material": vertex.label,
        "position": {
            "x": vertex.pos.x,
            "y": vertex.pos.y,
            "z": vertex.pos.z,
        },
    })
}

fn optional_vertex(mesh: &TetMesh, idx: Option<usize>) -> Value {
    match idx {
        Some(i) => vertex_snapshot(&mesh.vertices[i]),
        None => Value::Null,
    }
}

/// JSON record of a tet in its current state; all vertices and, when
/// `include_interfaces` is set, the interface points of its edges, faces,
/// and interior. Needs the mesh for adjacency information.
pub fn tet_snapshot(tet: &Tet, mesh: &TetMesh, include_interfaces: bool) -> Value {
    let mut root = json!({
        "id": tet.index,
        "verts": tet.verts
            .iter()
            .map(|&v| vertex_snapshot(&mesh.vertices[v]))
            .collect::<Vec<_>>(),
    });

    if !include_interfaces {
        return root;
    }
    if let Some(adj) = mesh.adjacency_for_tet(tet.index) {
        let cuts: Vec<Value> = adj
            .edges
            .iter()
            .map(|&e| optional_vertex(mesh, mesh.edges[e].cut))
            .collect();
        let triples: Vec<Value> = adj
            .faces
            .iter()
            .map(|&f| optional_vertex(mesh, mesh.faces[f].triple))
            .collect();
        root["cuts"] = Value::from(cuts);
        root["triples"] = Value::from(triples);
        root["quadruple"] = optional_vertex(mesh, tet.quadruple);
    }
    root
}

/// Snapshot of a whole mesh as an array of tet records.
pub fn mesh_snapshot(mesh: &TetMesh, include_interfaces: bool) -> Value {
    json!({
        "tets": mesh
            .tets
            .iter()
            .map(|t| tet_snapshot(t, mesh, include_interfaces))
            .collect::<Vec<_>>(),
    })
}
