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

//! Progress reporting.
//!
//! The mesher never prints; it ticks a [`Status`] tracker at per-leaf and
//! per-element checkpoints, and the tracker notifies an injected
//! [`ProgressSink`] only when the integer percentage changes.

use num_traits::clamp;
use tracing::debug;

/// Receiver for coarse progress notifications.
pub trait ProgressSink {
    /// Called whenever the completed percentage changes.
    fn percent(&mut self, pct: u8);
    /// Called when the tracked phase finishes.
    fn finished(&mut self);
}

/// Sink that discards all notifications.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn percent(&mut self, _pct: u8) {}
    fn finished(&mut self) {}
}

/// Sink that logs percentages through `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn percent(&mut self, pct: u8) {
        debug!(pct, "progress");
    }
    fn finished(&mut self) {
        debug!("done");
    }
}

/// Counts work units against a known total and forwards percentage
/// transitions to a sink.
pub struct Status<'a> {
    total: f64,
    count: usize,
    percent: i32,
    sink: &'a mut dyn ProgressSink,
}

impl<'a> Status<'a> {
    pub fn new(total: usize, sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            total: total as f64,
            count: 0,
            percent: -1,
            sink,
        }
    }

    /// Record one completed work unit.
    pub fn tick(&mut self) {
        let pcnt = if self.total > 0.0 {
            self.count as f64 / self.total
        } else {
            1.0
        };
        let val = (clamp(pcnt, 0.0, 1.0) * 100.0 + 0.5) as i32;
        if val != self.percent {
            self.percent = val;
            self.sink.percent(val as u8);
        }
        self.count += 1;
    }

    /// Finish the phase and reset the counter.
    pub fn done(&mut self) {
        self.sink.finished();
        self.percent = -1;
        self.count = 0;
    }
}
