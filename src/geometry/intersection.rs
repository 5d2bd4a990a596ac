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

use crate::geometry::util::EPS_BOUNDARY;
use crate::geometry::vector3::Vector3;

/// Minimum hit distance along the ray. Rejects self-intersections when the
/// origin sits on a neighboring face of the mesh.
const T_MIN: f64 = 0.01;

/// Intersection of a ray and a triangle, `Some(point)` on a hit.
///
/// Degenerate triangles (any two vertices closer than `epsilon`) and rays
/// parallel to the triangle plane report no hit. The barycentric inclusion
/// test uses the looser [`EPS_BOUNDARY`] slack so hits that land exactly on
/// a shared edge of two triangles survive floating round-off.
pub fn triangle_intersection(
    v1: &Vector3,
    v2: &Vector3,
    v3: &Vector3,
    origin: &Vector3,
    ray: &Vector3,
    epsilon: f64,
) -> Option<Vector3> {
    if v1.distance_to(v2) < epsilon
        || v2.distance_to(v3) < epsilon
        || v1.distance_to(v3) < epsilon
    {
        return None;
    }

    let e1 = *v1 - *v3;
    let e2 = *v2 - *v3;

    let ray = ray.normalized();
    let r1 = ray.cross(&e2);
    let denom = e1.dot(&r1);

    if denom.abs() < epsilon {
        return None;
    }

    let inv_denom = 1.0 / denom;
    let s = *origin - *v3;
    let b1 = s.dot(&r1) * inv_denom;

    if b1 < -EPS_BOUNDARY || b1 > 1.0 + EPS_BOUNDARY {
        return None;
    }

    let r2 = s.cross(&e1);
    let b2 = ray.dot(&r2) * inv_denom;

    if b2 < -EPS_BOUNDARY || b1 + b2 > 1.0 + 2.0 * EPS_BOUNDARY {
        return None;
    }

    let t = e2.dot(&r2) * inv_denom;
    if t < T_MIN {
        return None;
    }

    Some(*origin + ray.scale(t))
}
