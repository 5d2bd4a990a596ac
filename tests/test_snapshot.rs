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

use tetcut::geometry::{Aabb, Vector3};
use tetcut::io::{mesh_snapshot, tet_snapshot, vertex_snapshot};
use tetcut::mesh::{MATERIAL_BOUNDARY, TetMesh, Vertex};
use tetcut::mesher::sizing_field::PlaneField;
use tetcut::OctreeMesher;

fn planar_mesh() -> TetMesh {
    let field = PlaneField::new(
        Aabb::new(Vector3::zero(), Vector3::new(2.0, 2.0, 2.0)),
        1.0,
        Vector3::new(1.0, 0.0, 0.0),
        0.9,
        1,
        2,
    );
    let mut mesher = OctreeMesher::new();
    mesher.set_sizing_field(&field);
    mesher.create_mesh().unwrap();
    mesher.take_mesh().unwrap()
}

#[test]
fn test_vertex_snapshot_shape() {
    let mut v = Vertex::new(Vector3::new(1.0, 2.5, -3.0));
    v.index = 42;
    v.label = 3;
    let json = vertex_snapshot(&v);
    assert_eq!(json["id"], 42);
    assert_eq!(json["material"], 3);
    assert_eq!(json["position"]["x"], 1.0);
    assert_eq!(json["position"]["y"], 2.5);
    assert_eq!(json["position"]["z"], -3.0);
}

#[test]
fn test_tet_snapshot_without_interfaces() {
    let mesh = planar_mesh();
    let json = tet_snapshot(&mesh.tets[0], &mesh, false);
    assert_eq!(json["id"], 0);
    assert_eq!(json["verts"].as_array().unwrap().len(), 4);
    assert!(json.get("cuts").is_none());
    assert!(json.get("triples").is_none());
    assert!(json.get("quadruple").is_none());
}

#[test]
fn test_tet_snapshot_with_interfaces() {
    let mesh = planar_mesh();
    let json = tet_snapshot(&mesh.tets[0], &mesh, true);
    assert_eq!(json["cuts"].as_array().unwrap().len(), 6);
    assert_eq!(json["triples"].as_array().unwrap().len(), 4);
    assert!(json.get("quadruple").is_some());
}

#[test]
fn test_snapshot_reports_cut_vertices_as_boundary() {
    let mesh = planar_mesh();
    let cut_tet = mesh
        .tets
        .iter()
        .find(|t| t.edges.iter().any(|&e| mesh.edges[e].cut.is_some()))
        .expect("planar field must cut some tet");
    let json = tet_snapshot(cut_tet, &mesh, true);
    let cut = json["cuts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| !c.is_null())
        .expect("tet with a cut edge must report it");
    assert_eq!(cut["material"], MATERIAL_BOUNDARY);
}

#[test]
fn test_mesh_snapshot_lists_every_tet() {
    let mesh = planar_mesh();
    let json = mesh_snapshot(&mesh, false);
    assert_eq!(json["tets"].as_array().unwrap().len(), mesh.tets.len());
}
