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

use tracing::debug;

use crate::config::MesherConfig;
use crate::geometry::vector3::Vector3;
use crate::mesh::{TetMesh, Vertex, VertexOrder};
use crate::mesher::sizing_field::SizingField;
use crate::status::Status;

/// Resolve the background mesh into a conforming multimaterial mesh.
///
/// Grid vertices are labeled from the field, then cut, triple, and
/// quadruple points are computed once per unique arena edge/face/tet.
/// Dedup through the adjacency maps is what keeps the result crack-free:
/// no element ever recomputes an interface point a neighbor already owns.
///
/// Adjacency must already be built.
pub(crate) fn resolve_interfaces(
    mesh: &mut TetMesh,
    field: &dyn SizingField,
    config: &MesherConfig,
    status: &mut Status,
) {
    for v in &mut mesh.vertices {
        if v.order == VertexOrder::Grid {
            v.label = field.label_at(&v.pos);
        }
    }

    let mut cuts = 0usize;
    for e in 0..mesh.edges.len() {
        let [a, b] = mesh.edges[e].verts;
        let la = mesh.vertices[a].label;
        let lb = mesh.vertices[b].label;
        if la != lb && la >= 0 && lb >= 0 {
            let pos = locate_cut(
                &mesh.vertices[a].pos,
                &mesh.vertices[b].pos,
                la,
                field,
                config,
            );
            let cut = mesh.add_vertex(Vertex::interface(pos, VertexOrder::Cut));
            mesh.edges[e].cut = Some(cut);
            cuts += 1;
        }
        status.tick();
    }

    let mut triples = 0usize;
    for f in 0..mesh.faces.len() {
        let verts = mesh.faces[f].verts;
        let labels = verts.map(|v| mesh.vertices[v].label);
        if distinct_count(&labels) == 3 && labels.iter().all(|&l| l >= 0) {
            // three distinct corner materials means every face edge has a cut
            let edge_cuts = mesh.faces[f].edges.map(|e| mesh.edges[e].cut);
            if let [Some(c0), Some(c1), Some(c2)] = edge_cuts {
                let pos = centroid(&[
                    mesh.vertices[c0].pos,
                    mesh.vertices[c1].pos,
                    mesh.vertices[c2].pos,
                ]);
                let triple = mesh.add_vertex(Vertex::interface(pos, VertexOrder::Triple));
                mesh.faces[f].triple = Some(triple);
                triples += 1;
            }
        }
        status.tick();
    }

    let mut quadruples = 0usize;
    for t in 0..mesh.tets.len() {
        let labels = mesh.tets[t].verts.map(|v| mesh.vertices[v].label);
        if distinct_count(&labels) == 4 && labels.iter().all(|&l| l >= 0) {
            let face_triples = mesh.tets[t].faces.map(|f| mesh.faces[f].triple);
            if let [Some(t0), Some(t1), Some(t2), Some(t3)] = face_triples {
                let pos = centroid(&[
                    mesh.vertices[t0].pos,
                    mesh.vertices[t1].pos,
                    mesh.vertices[t2].pos,
                    mesh.vertices[t3].pos,
                ]);
                let quad = mesh.add_vertex(Vertex::interface(pos, VertexOrder::Quadruple));
                mesh.tets[t].quadruple = Some(quad);
                quadruples += 1;
            }
        }
        status.tick();
    }

    debug!(cuts, triples, quadruples, "interface points placed");
}

/// Bisection for the material transition along segment `a..b`, where `a`
/// carries label `la` and `b` a different one.
///
/// Any sample not matching `la` moves the upper bound, so a third material
/// appearing mid-edge still yields one deterministic transition. Edges
/// shorter than the degeneracy tolerance, and transitions landing within
/// the cut tolerance of an end, snap onto the nearer endpoint instead of
/// leaving a sliver.
fn locate_cut(
    a: &Vector3,
    b: &Vector3,
    la: i32,
    field: &dyn SizingField,
    config: &MesherConfig,
) -> Vector3 {
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    while hi - lo > config.cut_tolerance {
        let mid = 0.5 * (lo + hi);
        if field.label_at(&a.lerp(b, mid)) == la {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let t = 0.5 * (lo + hi);

    if a.distance_to(b) < config.epsilon {
        return if t < 0.5 { *a } else { *b };
    }
    if t < config.cut_tolerance {
        return *a;
    }
    if t > 1.0 - config.cut_tolerance {
        return *b;
    }
    a.lerp(b, t)
}

fn distinct_count(labels: &[i32]) -> usize {
    let mut seen: Vec<i32> = Vec::with_capacity(labels.len());
    for &l in labels {
        if !seen.contains(&l) {
            seen.push(l);
        }
    }
    seen.len()
}

fn centroid(points: &[Vector3]) -> Vector3 {
    let mut sum = Vector3::zero();
    for p in points {
        sum = sum + *p;
    }
    sum / points.len() as f64
}
