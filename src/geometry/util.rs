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

pub const EPS: f64 = 1e-10;

/// Looser tolerance applied to barycentric inclusion tests so near-boundary
/// ray hits at shared mesh edges are not dropped by round-off.
pub const EPS_BOUNDARY: f64 = 1e-3;

const POW2_TABLE: [f64; 41] = [
    9.5367431640625e-7,   // 2^-20
    1.9073486328125e-6,   // 2^-19
    3.814697265625e-6,    // 2^-18
    7.62939453125e-6,     // 2^-17
    1.52587890625e-5,     // 2^-16
    3.0517578125e-5,      // 2^-15
    6.103515625e-5,       // 2^-14
    0.0001220703125,      // 2^-13
    0.000244140625,       // 2^-12
    0.00048828125,        // 2^-11
    0.0009765625,         // 2^-10
    0.001953125,          // 2^-9
    0.00390625,           // 2^-8
    0.0078125,            // 2^-7
    0.015625,             // 2^-6
    0.03125,              // 2^-5
    0.0625,               // 2^-4
    0.125,                // 2^-3
    0.25,                 // 2^-2
    0.5,                  // 2^-1
    1.0,                  // 2^0
    2.0,
    4.0,
    8.0,
    16.0,
    32.0,
    64.0,
    128.0,
    256.0,
    512.0,
    1024.0,
    2048.0,
    4096.0,
    8192.0,
    16384.0,
    32768.0,
    65536.0,
    131072.0,
    262144.0,
    524288.0,
    1048576.0,            // 2^20
];

/// 2^p for integer p.
///
/// Exact table values for p in [-20, 20]; the octree cell-size bookkeeping
/// needs these free of the drift that repeated multiplication accumulates.
/// Outside that range falls back to iterative doubling/halving.
pub fn pow2(p: i32) -> f64 {
    if (-20..=20).contains(&p) {
        return POW2_TABLE[(p + 20) as usize];
    }
    let mut ret = 1.0;
    if p > 0 {
        for _ in 0..p {
            ret *= 2.0;
        }
    } else {
        for _ in 0..-p {
            ret /= 2.0;
        }
    }
    ret
}
