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

use rand::Rng;

use tetcut::geometry::{Aabb, Vector3};
use tetcut::mesh::TetMesh;
use tetcut::mesher::sizing_field::{ConstantField, PlaneField, SizingField};
use tetcut::status::ProgressSink;
use tetcut::{MesherConfig, OctreeMesher, TetError};

fn cube(side: f64) -> Aabb {
    Aabb::new(Vector3::zero(), Vector3::new(side, side, side))
}

/// Element size grows with distance from the domain center; a sphere of
/// material 1 sits in a background of material 2.
struct GradedSphereField {
    bounds: Aabb,
    radius: f64,
}

impl SizingField for GradedSphereField {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
    fn size_at(&self, p: &Vector3) -> f64 {
        0.05 + 0.3 * p.distance_to(&self.bounds.center())
    }
    fn label_at(&self, p: &Vector3) -> i32 {
        if p.distance_to(&self.bounds.center()) < self.radius {
            1
        } else {
            2
        }
    }
}

#[test]
fn test_create_mesh_without_field_fails() {
    let mut mesher = OctreeMesher::new();
    assert!(matches!(mesher.create_mesh(), Err(TetError::MissingField)));
}

#[test]
fn test_create_mesh_on_empty_domain_fails() {
    let field = ConstantField::new(Aabb::new(Vector3::zero(), Vector3::zero()), 1.0, 1);
    let mut mesher = OctreeMesher::new();
    mesher.set_sizing_field(&field);
    assert!(matches!(
        mesher.create_mesh(),
        Err(TetError::EmptyDomain { .. })
    ));
}

#[test]
fn test_uniform_field_produces_single_material_mesh() {
    let field = ConstantField::new(cube(4.0), 1.0, 7);
    let mut mesher = OctreeMesher::with_config(MesherConfig::default().with_max_depth(4));
    mesher.set_sizing_field(&field);
    mesher.create_mesh().unwrap();
    let mesh = mesher.mesh().unwrap();

    assert!(!mesh.tets.is_empty());
    for t in 0..mesh.tets.len() {
        assert!(mesh.adjacency_for_tet(t).is_some());
    }
    for v in &mesh.vertices {
        assert_eq!(v.label, 7);
    }
    assert!(mesh.edges.iter().all(|e| e.cut.is_none()));
}

fn plane_meshed(offset: f64) -> TetMesh {
    let field = PlaneField::new(cube(4.0), 1.0, Vector3::new(1.0, 0.0, 0.0), offset, 1, 2);
    let mut mesher = OctreeMesher::new();
    mesher.set_sizing_field(&field);
    mesher.create_mesh().unwrap();
    mesher.take_mesh().unwrap()
}

#[test]
fn test_planar_interface_cuts_lie_on_the_plane() {
    let offset = 1.7;
    let mesh = plane_meshed(offset);

    let mut cuts = 0usize;
    for edge in &mesh.edges {
        let [a, b] = edge.verts;
        let la = mesh.vertices[a].label;
        let lb = mesh.vertices[b].label;
        if la != lb && la >= 0 && lb >= 0 {
            let cut = edge.cut.expect("differing labels must produce a cut");
            let pos = mesh.vertices[cut].pos;
            assert!((pos.x - offset).abs() < 1e-4, "cut at x = {}", pos.x);
            let (xa, xb) = (mesh.vertices[a].pos.x, mesh.vertices[b].pos.x);
            assert!(pos.x >= xa.min(xb) && pos.x <= xa.max(xb));
            cuts += 1;
        } else {
            assert!(edge.cut.is_none());
        }
    }
    assert!(cuts > 0, "a plane through the cube must cut edges");
}

#[test]
fn test_two_material_mesh_has_no_unresolved_transitions() {
    let mesh = plane_meshed(1.7);

    for t in 0..mesh.tets.len() {
        let adj = mesh.adjacency_for_tet(t).unwrap();
        let labels = adj.verts.map(|v| mesh.vertices[v].label);
        let mixed = labels.iter().any(|&l| l != labels[0]);
        if mixed {
            let has_cut = adj.edges.iter().any(|&e| mesh.edges[e].cut.is_some());
            assert!(has_cut, "mixed-material tet {t} has no interface point");
        }
    }

    // two materials never meet three-or-four-way
    assert!(mesh.faces.iter().all(|f| f.triple.is_none()));
    assert!(mesh.tets.iter().all(|t| t.quadruple.is_none()));
}

fn signed_vol(a: &Vector3, b: &Vector3, c: &Vector3, d: &Vector3) -> f64 {
    (*b - *a).cross(&(*c - *a)).dot(&(*d - *a))
}

fn point_in_tet(p: &Vector3, t: &[Vector3; 4]) -> bool {
    let v = signed_vol(&t[0], &t[1], &t[2], &t[3]);
    let tol = -1e-9 * v.abs();
    signed_vol(p, &t[1], &t[2], &t[3]) >= tol
        && signed_vol(&t[0], p, &t[2], &t[3]) >= tol
        && signed_vol(&t[0], &t[1], p, &t[3]) >= tol
        && signed_vol(&t[0], &t[1], &t[2], p) >= tol
}

#[test]
fn test_mesh_covers_the_domain() {
    let mesh = plane_meshed(1.7);
    let mut rng = rand::rng();
    for _ in 0..25 {
        let p = Vector3::new(
            rng.random_range(0.0..4.0),
            rng.random_range(0.0..4.0),
            rng.random_range(0.0..4.0),
        );
        let covered = mesh.tets.iter().any(|tet| {
            let corners = tet.verts.map(|v| mesh.vertices[v].pos);
            point_in_tet(&p, &corners)
        });
        assert!(covered, "{p:?} not covered by any tet");
    }
}

#[test]
fn test_graded_mesh_is_conforming() {
    use tetcut::mesh::tet::TET_FACES;

    let side = 4.0;
    let field = GradedSphereField {
        bounds: cube(side),
        radius: 1.2,
    };
    let mut mesher = OctreeMesher::with_config(MesherConfig::default().with_max_depth(4));
    mesher.set_sizing_field(&field);
    mesher.create_mesh().unwrap();
    let mesh = mesher.take_mesh().unwrap();

    // positive volumes tiling the cube, and coarse cells alongside fine ones
    let mut volume = 0.0;
    let mut vmin = f64::INFINITY;
    let mut vmax = 0.0f64;
    for tet in &mesh.tets {
        let p = tet.verts.map(|v| mesh.vertices[v].pos);
        let v = signed_vol(&p[0], &p[1], &p[2], &p[3]) / 6.0;
        assert!(v > 0.0, "non-positive tet volume {v}");
        volume += v;
        vmin = vmin.min(v);
        vmax = vmax.max(v);
    }
    let expected = side.powi(3);
    assert!((volume - expected).abs() < 1e-9 * expected);
    assert!(vmax / vmin >= 8.0, "sizing gradient produced a uniform mesh");

    // every interior triangle is shared by exactly two tets
    let mut incidence = std::collections::HashMap::new();
    for tet in &mesh.tets {
        for &(i, j, k) in &TET_FACES {
            let mut key = [tet.verts[i], tet.verts[j], tet.verts[k]];
            key.sort_unstable();
            *incidence.entry(key).or_insert(0usize) += 1;
        }
    }
    for (key, count) in &incidence {
        assert!(*count <= 2, "face {key:?} bounded by {count} tets");
        if *count == 1 {
            let on_hull = (0..3).any(|axis| {
                key.iter().all(|&v| {
                    let p = mesh.vertices[v].pos;
                    let c = [p.x, p.y, p.z][axis];
                    c == 0.0 || c == side
                })
            });
            assert!(on_hull, "interior face {key:?} bounded by a single tet");
        }
    }

    // the embedded sphere leaves no transition unresolved
    let labels: std::collections::BTreeSet<i32> =
        mesh.vertices.iter().map(|v| v.label).collect();
    assert!(labels.contains(&1) && labels.contains(&2));
    assert!(mesh.edges.iter().any(|e| e.cut.is_some()));
    for edge in &mesh.edges {
        let [a, b] = edge.verts;
        let la = mesh.vertices[a].label;
        let lb = mesh.vertices[b].label;
        assert_eq!(edge.cut.is_some(), la != lb && la >= 0 && lb >= 0);
    }
}

#[derive(Default)]
struct RecordingSink {
    percents: Vec<u8>,
    finished: usize,
}

impl ProgressSink for RecordingSink {
    fn percent(&mut self, pct: u8) {
        self.percents.push(pct);
    }
    fn finished(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn test_progress_reported_through_injected_sink() {
    // the sink moves into the mesher, so observe through a shared cell
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedSink(Rc<RefCell<RecordingSink>>);
    impl ProgressSink for SharedSink {
        fn percent(&mut self, pct: u8) {
            self.0.borrow_mut().percent(pct);
        }
        fn finished(&mut self) {
            self.0.borrow_mut().finished();
        }
    }

    let record = Rc::new(RefCell::new(RecordingSink::default()));
    let field = ConstantField::new(cube(2.0), 1.0, 1);
    let mut mesher = OctreeMesher::with_config(MesherConfig::default().with_max_depth(3));
    mesher.set_sizing_field(&field);
    mesher.set_progress_sink(Box::new(SharedSink(record.clone())));
    mesher.create_mesh().unwrap();

    let record = record.borrow();
    // one phase for leaf stitching, one for interface resolution
    assert_eq!(record.finished, 2);
    assert!(!record.percents.is_empty());
}
