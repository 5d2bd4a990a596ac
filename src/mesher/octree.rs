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

use smallvec::SmallVec;
use tracing::debug;

use crate::config::MesherConfig;
use crate::geometry::aabb::Aabb;
use crate::geometry::util::pow2;
use crate::geometry::vector3::Vector3;
use crate::mesh::TetMesh;
use crate::mesher::sizing_field::SizingField;
use crate::status::Status;

/// Extra lattice levels below `max_depth` so quarter-edge points (subquad
/// centers on graded faces) land on the integer lattice.
const LATTICE_EXTRA: u32 = 2;

/// Depths beyond this would overflow the integer lattice.
const DEPTH_CAP: u32 = 40;

struct OctreeNode {
    /// Integer cell coordinates at this node's depth.
    coords: [u64; 3],
    depth: u32,
    children: Option<[usize; 8]>,
}

/// Balanced octree over the sizing-field domain.
///
/// All vertex positions the octree emits are integer multiples of a single
/// lattice `unit`, so a point shared between leaves is computed bit-identically
/// from either side and the mesh's vertex dedup is exact.
pub(crate) struct Octree {
    nodes: Vec<OctreeNode>,
    origin: Vector3,
    root_size: f64,
    max_depth: u32,
    /// Lattice resolution: `2^shift` units across the root edge.
    shift: u32,
    /// World-space size of one lattice unit.
    unit: f64,
}

impl Octree {
    /// Root cube anchored at the bounds' min corner, sized by the longest
    /// side so a non-cubic domain is padded, never truncated.
    pub fn new(bounds: &Aabb, max_depth: u32) -> Self {
        let max_depth = max_depth.min(DEPTH_CAP);
        let shift = max_depth + LATTICE_EXTRA;
        let root_size = bounds.longest_edge();
        Self {
            nodes: vec![OctreeNode {
                coords: [0, 0, 0],
                depth: 0,
                children: None,
            }],
            origin: bounds.min,
            root_size,
            max_depth,
            shift,
            unit: root_size * pow2(-(shift as i32)),
        }
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    fn edge_units(&self, depth: u32) -> u64 {
        1u64 << (self.shift - depth)
    }

    fn min_units(&self, n: usize) -> [u64; 3] {
        let s = self.shift - self.nodes[n].depth;
        self.nodes[n].coords.map(|c| c << s)
    }

    fn edge_length(&self, depth: u32) -> f64 {
        self.root_size * pow2(-(depth as i32))
    }

    fn point_at(&self, units: [u64; 3]) -> Vector3 {
        Vector3::new(
            self.origin.x + units[0] as f64 * self.unit,
            self.origin.y + units[1] as f64 * self.unit,
            self.origin.z + units[2] as f64 * self.unit,
        )
    }

    fn center(&self, n: usize) -> Vector3 {
        let m = self.min_units(n);
        let h = self.edge_units(self.nodes[n].depth) / 2;
        self.point_at([m[0] + h, m[1] + h, m[2] + h])
    }

    fn split(&mut self, n: usize) -> [usize; 8] {
        let base = self.nodes.len();
        let coords = self.nodes[n].coords;
        let depth = self.nodes[n].depth;
        let mut children = [0usize; 8];
        for (oct, child) in children.iter_mut().enumerate() {
            self.nodes.push(OctreeNode {
                coords: [
                    2 * coords[0] + (oct & 1) as u64,
                    2 * coords[1] + ((oct >> 1) & 1) as u64,
                    2 * coords[2] + ((oct >> 2) & 1) as u64,
                ],
                depth: depth + 1,
                children: None,
            });
            *child = base + oct;
        }
        self.nodes[n].children = Some(children);
        children
    }

    /// Leaf containing the point given in (fractional) lattice units, or
    /// `None` outside the root cube. Points on internal boundaries resolve
    /// to the high side, deterministically.
    fn leaf_at_units(&self, u: [f64; 3]) -> Option<usize> {
        let span = (1u64 << self.shift) as f64;
        if u.iter().any(|&x| x < 0.0 || x >= span) {
            return None;
        }
        let mut n = 0usize;
        while let Some(children) = self.nodes[n].children {
            let m = self.min_units(n);
            let h = self.edge_units(self.nodes[n].depth) / 2;
            let mut oct = 0usize;
            if u[0] >= (m[0] + h) as f64 {
                oct |= 1;
            }
            if u[1] >= (m[1] + h) as f64 {
                oct |= 2;
            }
            if u[2] >= (m[2] + h) as f64 {
                oct |= 4;
            }
            n = children[oct];
        }
        Some(n)
    }

    fn leaves(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&n| self.nodes[n].children.is_none())
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Top-down refinement: split while the cell edge exceeds the field's
    /// recommended size and the depth limit has not been reached. Hitting
    /// `max_depth` before the criterion holds is accepted, not an error.
    pub fn refine(&mut self, field: &dyn SizingField, config: &MesherConfig) {
        let mut stack = vec![0usize];
        while let Some(n) = stack.pop() {
            let depth = self.nodes[n].depth;
            if depth >= self.max_depth {
                continue;
            }
            let target = config.size_alpha * field.size_at(&self.center(n));
            if self.edge_length(depth) > target {
                let children = self.split(n);
                stack.extend_from_slice(&children);
            }
        }
        debug!(nodes = self.nodes.len(), "octree refined");
    }

    /// Enforce the 2:1 rule: no two face-adjacent leaves may differ by more
    /// than one level. Coarse offenders are forcibly split until a fixpoint;
    /// a violation is always visible from the finer side's face sample, so
    /// probing every leaf's 6 faces finds them all.
    pub fn balance(&mut self) {
        loop {
            let mut to_split: Vec<usize> = Vec::new();
            for n in 0..self.nodes.len() {
                if self.nodes[n].children.is_some() {
                    continue;
                }
                let depth = self.nodes[n].depth;
                if depth < 2 {
                    continue;
                }
                let m = self.min_units(n);
                let e = self.edge_units(depth) as f64;
                let c = [
                    m[0] as f64 + e * 0.5,
                    m[1] as f64 + e * 0.5,
                    m[2] as f64 + e * 0.5,
                ];
                for axis in 0..3 {
                    for side in [-1.0f64, 1.0] {
                        let mut u = c;
                        // Half a lattice unit past the face, strictly inside
                        // whatever leaf is on the other side.
                        u[axis] += side * (e * 0.5 + 0.5);
                        let Some(nb) = self.leaf_at_units(u) else {
                            continue;
                        };
                        if self.nodes[nb].depth + 1 < depth {
                            to_split.push(nb);
                        }
                    }
                }
            }
            if to_split.is_empty() {
                break;
            }
            for nb in to_split {
                if self.nodes[nb].children.is_none() {
                    self.split(nb);
                }
            }
        }
        debug!(leaves = self.leaf_count(), "octree balanced");
    }

    /// Whether the leaf across face (`axis`, `side`) of `n` is one level
    /// finer. Under 2:1 balance the region across a face is uniformly
    /// same-level, coarser, or one level finer.
    fn neighbor_finer(&self, n: usize, axis: usize, side: u64) -> bool {
        let m = self.min_units(n);
        let e = self.edge_units(self.nodes[n].depth);
        let h = (e / 2) as f64;
        let mut u = [m[0] as f64 + h, m[1] as f64 + h, m[2] as f64 + h];
        u[axis] = (m[axis] + side * e) as f64 + if side == 1 { 0.5 } else { -0.5 };
        match self.leaf_at_units(u) {
            Some(nb) => self.nodes[nb].depth > self.nodes[n].depth,
            None => false,
        }
    }

    /// Whether a finer leaf hangs a vertex at the midpoint of the cube edge
    /// `p0`-`p1` (endpoints in lattice units). A leaf deeper than `depth`
    /// whose closure touches the midpoint covers at least one full lattice
    /// cell in some octant around it, so probing the 8 octant points at
    /// half-unit offsets finds every such leaf.
    fn edge_bisected(&self, depth: u32, p0: [u64; 3], p1: [u64; 3]) -> bool {
        let mid = [
            ((p0[0] + p1[0]) / 2) as f64,
            ((p0[1] + p1[1]) / 2) as f64,
            ((p0[2] + p1[2]) / 2) as f64,
        ];
        for oct in 0..8u32 {
            let u = [
                mid[0] + if oct & 1 == 0 { -0.5 } else { 0.5 },
                mid[1] + if oct & 2 == 0 { -0.5 } else { 0.5 },
                mid[2] + if oct & 4 == 0 { -0.5 } else { 0.5 },
            ];
            if let Some(nb) = self.leaf_at_units(u) {
                if self.nodes[nb].depth > depth {
                    return true;
                }
            }
        }
        false
    }

    /// Stitch the balanced leaves into tets.
    ///
    /// Every cube face is fan-triangulated around a center point and each
    /// face triangle plus the cell center makes one tet, so the fans tile
    /// each cube and the mesh tiles the root cube. A face whose direct
    /// neighbor is finer is split into 4 subquads first, reproducing the
    /// neighbor faces exactly. Every other face walks its 4 boundary edges
    /// and inserts a midpoint on each one a finer leaf somewhere around
    /// that cube edge has bisected; both fans incident to a cube edge then
    /// emit the same segments along it and no triangle is left unpaired.
    pub fn emit_tets(&self, mesh: &mut TetMesh, status: &mut Status) {
        for n in self.leaves() {
            let depth = self.nodes[n].depth;
            let m = self.min_units(n);
            let e = self.edge_units(depth);
            let h = e / 2;
            let c_idx = mesh.add_or_get_vertex(self.point_at([m[0] + h, m[1] + h, m[2] + h]));

            for axis in 0..3usize {
                let ua = (axis + 1) % 3;
                let va = (axis + 2) % 3;
                for side in 0..2u64 {
                    let mut base = m;
                    base[axis] += side * e;
                    let to_units = |du: u64, dv: u64| {
                        let mut p = base;
                        p[ua] += du;
                        p[va] += dv;
                        p
                    };

                    if self.neighbor_finer(n, axis, side) {
                        // Subquad boundaries are faces of leaves one level
                        // down; 2:1 balance keeps anything deeper away, so
                        // plain 4-corner fans match the neighbors exactly.
                        let q = h / 2;
                        let rel = [[0, 0], [h, 0], [h, h], [0, h]];
                        for qo in rel {
                            let qc_idx = mesh
                                .add_or_get_vertex(self.point_at(to_units(qo[0] + q, qo[1] + q)));
                            let corner: [usize; 4] = rel.map(|r| {
                                mesh.add_or_get_vertex(
                                    self.point_at(to_units(qo[0] + r[0], qo[1] + r[1])),
                                )
                            });
                            for i in 0..4 {
                                let mut verts = [c_idx, corner[i], corner[(i + 1) % 4], qc_idx];
                                orient_positive(mesh, &mut verts);
                                mesh.add_tet(verts);
                            }
                        }
                    } else {
                        let fc_idx = mesh.add_or_get_vertex(self.point_at(to_units(h, h)));
                        let rel = [[0, 0], [e, 0], [e, e], [0, e]];
                        let mut ring: SmallVec<[usize; 8]> = SmallVec::new();
                        for i in 0..4 {
                            let pa = to_units(rel[i][0], rel[i][1]);
                            let pb = to_units(rel[(i + 1) % 4][0], rel[(i + 1) % 4][1]);
                            ring.push(mesh.add_or_get_vertex(self.point_at(pa)));
                            if self.edge_bisected(depth, pa, pb) {
                                let mid = [
                                    (pa[0] + pb[0]) / 2,
                                    (pa[1] + pb[1]) / 2,
                                    (pa[2] + pb[2]) / 2,
                                ];
                                ring.push(mesh.add_or_get_vertex(self.point_at(mid)));
                            }
                        }
                        for i in 0..ring.len() {
                            let mut verts = [c_idx, ring[i], ring[(i + 1) % ring.len()], fc_idx];
                            orient_positive(mesh, &mut verts);
                            mesh.add_tet(verts);
                        }
                    }
                }
            }
            status.tick();
        }
        debug!(
            tets = mesh.tets.len(),
            verts = mesh.vertices.len(),
            "leaves stitched"
        );
    }
}

fn orient_positive(mesh: &TetMesh, verts: &mut [usize; 4]) {
    let p = verts.map(|v| mesh.vertices[v].pos);
    let d = (p[1] - p[0]).cross(&(p[2] - p[0])).dot(&(p[3] - p[0]));
    if d < 0.0 {
        verts.swap(2, 3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::sizing_field::ConstantField;
    use crate::status::NullSink;

    struct CenterGradedField {
        bounds: Aabb,
        base: f64,
        slope: f64,
    }

    impl SizingField for CenterGradedField {
        fn bounds(&self) -> Aabb {
            self.bounds
        }
        fn size_at(&self, p: &Vector3) -> f64 {
            // fine near the domain center, coarse toward the boundary
            self.base + self.slope * p.distance_to(&self.bounds.center())
        }
        fn label_at(&self, _p: &Vector3) -> i32 {
            0
        }
    }

    fn unit_bounds(side: f64) -> Aabb {
        Aabb::new(Vector3::zero(), Vector3::new(side, side, side))
    }

    fn leaf_depths(tree: &Octree) -> std::collections::BTreeSet<u32> {
        tree.leaves().iter().map(|&n| tree.nodes[n].depth).collect()
    }

    /// Largest depth difference over all face-adjacent leaf pairs, plus the
    /// number of pairs checked.
    fn max_face_gap(tree: &Octree) -> (i64, usize) {
        let mut max_gap = 0i64;
        let mut checked = 0usize;
        for n in tree.leaves() {
            let depth = tree.nodes[n].depth;
            let m = tree.min_units(n);
            let e = tree.edge_units(depth) as f64;
            let c = [
                m[0] as f64 + e * 0.5,
                m[1] as f64 + e * 0.5,
                m[2] as f64 + e * 0.5,
            ];
            for axis in 0..3 {
                for sidesign in [-1.0f64, 1.0] {
                    let mut u = c;
                    u[axis] += sidesign * (e * 0.5 + 0.5);
                    if let Some(nb) = tree.leaf_at_units(u) {
                        let gap = (tree.nodes[nb].depth as i64 - depth as i64).abs();
                        max_gap = max_gap.max(gap);
                        checked += 1;
                    }
                }
            }
        }
        (max_gap, checked)
    }

    fn emit(tree: &Octree) -> TetMesh {
        let mut mesh = TetMesh::with_hash_cell(tree.unit() * 0.25);
        let mut sink = NullSink;
        let mut status = Status::new(tree.leaf_count(), &mut sink);
        tree.emit_tets(&mut mesh, &mut status);
        status.done();
        mesh
    }

    #[test]
    fn uniform_field_refines_to_uniform_leaves() {
        let field = ConstantField::new(unit_bounds(4.0), 1.0, 1);
        let mut tree = Octree::new(&field.bounds(), 6);
        tree.refine(&field, &MesherConfig::default());
        tree.balance();
        // edge 4 and 2 exceed size 1, edge 1 does not: uniform depth 2
        assert_eq!(tree.leaf_count(), 64);
        for n in tree.leaves() {
            assert_eq!(tree.nodes[n].depth, 2);
        }
    }

    #[test]
    fn balanced_tree_has_no_face_neighbors_two_levels_apart() {
        let field = CenterGradedField {
            bounds: unit_bounds(8.0),
            base: 0.05,
            slope: 1.0,
        };
        let mut tree = Octree::new(&field.bounds(), 6);
        tree.refine(&field, &MesherConfig::default());
        tree.balance();

        assert!(leaf_depths(&tree).len() >= 2, "grading produced no depth mix");
        let (gap, checked) = max_face_gap(&tree);
        assert!(checked > 0);
        assert!(gap <= 1, "face neighbors {gap} levels apart");
    }

    #[test]
    fn balance_splits_coarse_neighbors_of_deep_leaves() {
        let mut tree = Octree::new(&unit_bounds(8.0), 6);
        // drill three levels into one corner: the depth-3 leaves at the
        // domain center sit against untouched depth-1 siblings
        let a = tree.split(0)[0];
        let b = tree.split(a)[7];
        tree.split(b);
        let (gap, _) = max_face_gap(&tree);
        assert_eq!(gap, 2, "drilling must start from a 2:1 violation");

        tree.balance();
        let (gap, checked) = max_face_gap(&tree);
        assert!(checked > 0);
        assert!(gap <= 1, "face neighbors {gap} levels apart");
    }

    #[test]
    fn emitted_tets_tile_the_root_cube() {
        let field = CenterGradedField {
            bounds: unit_bounds(4.0),
            base: 0.05,
            slope: 0.3,
        };
        let mut tree = Octree::new(&field.bounds(), 4);
        tree.refine(&field, &MesherConfig::default());
        tree.balance();
        assert!(leaf_depths(&tree).len() >= 2, "grading produced no depth mix");

        let mesh = emit(&tree);
        let mut volume = 0.0;
        for tet in &mesh.tets {
            let p = tet.verts.map(|v| mesh.vertices[v].pos);
            let v = (p[1] - p[0]).cross(&(p[2] - p[0])).dot(&(p[3] - p[0])) / 6.0;
            assert!(v > 0.0, "non-positive tet volume {v}");
            volume += v;
        }
        let expected = 4.0f64.powi(3);
        assert!(
            (volume - expected).abs() < 1e-9 * expected,
            "tets cover {volume}, cube is {expected}"
        );
    }

    #[test]
    fn graded_mesh_interior_faces_pair_up() {
        use ahash::AHashMap;
        use crate::mesh::tet::TET_FACES;

        let side = 4.0;
        let field = CenterGradedField {
            bounds: unit_bounds(side),
            base: 0.05,
            slope: 0.3,
        };
        let mut tree = Octree::new(&field.bounds(), 4);
        tree.refine(&field, &MesherConfig::default());
        tree.balance();
        assert!(leaf_depths(&tree).len() >= 2, "grading produced no depth mix");

        let mesh = emit(&tree);
        let mut incidence: AHashMap<[usize; 3], usize> = AHashMap::new();
        for tet in &mesh.tets {
            for &(i, j, k) in &TET_FACES {
                let mut key = [tet.verts[i], tet.verts[j], tet.verts[k]];
                key.sort_unstable();
                *incidence.entry(key).or_insert(0) += 1;
            }
        }
        for (key, count) in &incidence {
            assert!(*count <= 2, "face {key:?} bounded by {count} tets");
            if *count == 1 {
                // lattice positions are exact, so hull membership is too
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
    }

    #[test]
    fn leaf_lookup_descends_to_the_containing_cell() {
        let field = ConstantField::new(unit_bounds(2.0), 0.6, 1);
        let mut tree = Octree::new(&field.bounds(), 3);
        tree.refine(&field, &MesherConfig::default());
        let span = (1u64 << tree.shift) as f64;
        let inside = tree.leaf_at_units([span * 0.3, span * 0.7, span * 0.1]);
        assert!(inside.is_some());
        assert!(tree.nodes[inside.unwrap()].children.is_none());
        assert!(tree.leaf_at_units([-1.0, 0.0, 0.0]).is_none());
        assert!(tree.leaf_at_units([span, 0.0, 0.0]).is_none());
    }
}
