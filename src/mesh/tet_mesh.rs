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

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::geometry::vector3::Vector3;
use crate::mesh::half_edge::HalfEdge;
use crate::mesh::half_face::HalfFace;
use crate::mesh::tet::{TET_EDGES, TET_FACES, Tet};
use crate::mesh::vertex::Vertex;

/// The 4 vertices, 6 edges, and 4 faces of a tet, in canonical order:
/// edges (01, 02, 03, 12, 13, 23), face `i` opposite corner `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetAdjacency {
    pub verts: [usize; 4],
    pub edges: [usize; 6],
    pub faces: [usize; 4],
}

/// Arena-owned tetrahedral mesh.
///
/// Vertices and tets get a stable serial index at insertion. Edges and
/// faces are derived views over tet vertex sets, deduplicated by their
/// sorted vertex-index key, so two tets touching the same geometry always
/// resolve to the same arena entry. That sharing is what keeps interface
/// points unique per physical edge/face and the output free of cracks.
#[derive(Debug, Clone)]
pub struct TetMesh {
    pub vertices: Vec<Vertex>,
    pub tets: Vec<Tet>,
    pub edges: Vec<HalfEdge>,
    pub faces: Vec<HalfFace>,

    pub edge_map: AHashMap<(usize, usize), usize>,
    pub face_map: AHashMap<(usize, usize, usize), usize>,
    vertex_spatial_hash: AHashMap<(i64, i64, i64), SmallVec<[usize; 4]>>,
    hash_inv: f64,
    merge_tol: f64,
}

impl Default for TetMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl TetMesh {
    pub fn new() -> Self {
        Self::with_hash_cell(1e-5)
    }

    /// `cell` is the spatial-hash bucket size used to merge coincident
    /// vertex positions; it should stay below half the smallest vertex
    /// spacing the caller will insert.
    pub fn with_hash_cell(cell: f64) -> Self {
        let cell = if cell.is_finite() && cell > 0.0 {
            cell
        } else {
            1e-5
        };
        Self {
            vertices: Vec::new(),
            tets: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            edge_map: AHashMap::new(),
            face_map: AHashMap::new(),
            vertex_spatial_hash: AHashMap::new(),
            hash_inv: 1.0 / cell,
            merge_tol: 0.5 * cell,
        }
    }

    #[inline(always)]
    fn floor_sat_i64(x: f64) -> i64 {
        if !x.is_finite() {
            return if x.is_sign_positive() {
                i64::MAX
            } else {
                i64::MIN
            };
        }
        let xf = x.floor();
        if xf >= i64::MAX as f64 {
            i64::MAX
        } else if xf <= i64::MIN as f64 {
            i64::MIN
        } else {
            xf as i64
        }
    }

    #[inline(always)]
    pub fn position_to_hash_key(&self, pos: &Vector3) -> (i64, i64, i64) {
        let inv = self.hash_inv;
        (
            Self::floor_sat_i64(pos.x * inv),
            Self::floor_sat_i64(pos.y * inv),
            Self::floor_sat_i64(pos.z * inv),
        )
    }

    /// Insert a vertex, assign its serial index, and register it in the
    /// spatial hash.
    pub fn add_vertex(&mut self, mut vertex: Vertex) -> usize {
        let idx = self.vertices.len();
        vertex.index = idx;
        let key = self.position_to_hash_key(&vertex.pos);
        self.vertices.push(vertex);
        self.vertex_spatial_hash.entry(key).or_default().push(idx);
        idx
    }

    /// Index of an existing vertex within merge tolerance of `pos`, or a
    /// freshly inserted grid vertex there. This is the dedup path the
    /// mesher uses so adjacent octree leaves share their corner vertices.
    pub fn add_or_get_vertex(&mut self, pos: Vector3) -> usize {
        let (kx, ky, kz) = self.position_to_hash_key(&pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.vertex_spatial_hash.get(&(kx + dx, ky + dy, kz + dz))
                    else {
                        continue;
                    };
                    for &idx in bucket {
                        if self.vertices[idx].pos.distance_to(&pos) <= self.merge_tol {
                            return idx;
                        }
                    }
                }
            }
        }
        self.add_vertex(Vertex::new(pos))
    }

    pub fn add_tet(&mut self, verts: [usize; 4]) -> usize {
        let idx = self.tets.len();
        let mut tet = Tet::new(verts);
        tet.index = idx;
        self.tets.push(tet);
        idx
    }

    #[inline]
    fn edge_key(a: usize, b: usize) -> (usize, usize) {
        if a < b { (a, b) } else { (b, a) }
    }

    #[inline]
    fn face_key(a: usize, b: usize, c: usize) -> (usize, usize, usize) {
        let mut k = [a, b, c];
        k.sort_unstable();
        (k[0], k[1], k[2])
    }

    fn get_or_insert_edge(&mut self, a: usize, b: usize) -> usize {
        let key = Self::edge_key(a, b);
        if let Some(&idx) = self.edge_map.get(&key) {
            return idx;
        }
        let idx = self.edges.len();
        self.edges.push(HalfEdge::new(a, b));
        self.edge_map.insert(key, idx);
        idx
    }

    fn get_or_insert_face(&mut self, a: usize, b: usize, c: usize) -> usize {
        let (k0, k1, k2) = Self::face_key(a, b, c);
        if let Some(&idx) = self.face_map.get(&(k0, k1, k2)) {
            return idx;
        }
        // A face's bounding edges are a subset of its tet's edges, so these
        // lookups only dedupe, never grow the arena out of step.
        let edges = [
            self.get_or_insert_edge(k0, k1),
            self.get_or_insert_edge(k0, k2),
            self.get_or_insert_edge(k1, k2),
        ];
        let idx = self.faces.len();
        self.faces.push(HalfFace::new([k0, k1, k2], edges));
        self.face_map.insert((k0, k1, k2), idx);
        idx
    }

    /// Resolve the edge/face arenas for every tet.
    ///
    /// Keyed on sorted vertex-index tuples, so tets sharing an edge or face
    /// land on the same arena entry regardless of traversal order.
    pub fn build_adjacency(&mut self) {
        for t in 0..self.tets.len() {
            let verts = self.tets[t].verts;
            let mut edges = [usize::MAX; 6];
            for (slot, &(i, j)) in TET_EDGES.iter().enumerate() {
                edges[slot] = self.get_or_insert_edge(verts[i], verts[j]);
            }
            let mut faces = [usize::MAX; 4];
            for (slot, &(i, j, k)) in TET_FACES.iter().enumerate() {
                faces[slot] = self.get_or_insert_face(verts[i], verts[j], verts[k]);
            }
            self.tets[t].edges = edges;
            self.tets[t].faces = faces;
        }
    }

    /// Canonical adjacency of a tet; `None` until
    /// [`build_adjacency`](Self::build_adjacency) has run.
    pub fn adjacency_for_tet(&self, t: usize) -> Option<TetAdjacency> {
        let tet = self.tets.get(t)?;
        if !tet.has_adjacency() {
            return None;
        }
        Some(TetAdjacency {
            verts: tet.verts,
            edges: tet.edges,
            faces: tet.faces,
        })
    }
}
