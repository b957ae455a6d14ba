// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::index::BlockIndex;
use mosaic_core::math::interval::MinuteInterval;
use smallvec::SmallVec;

/// Inline capacity for adjacency lists. Calendar blocks rarely conflict
/// with more than a handful of neighbors.
pub type NeighborList = SmallVec<[BlockIndex; 4]>;

/// The mutable working record for one calendar block.
///
/// A block is created from its time interval and accumulates solver state
/// as the pipeline runs: the room `depth` from interval scheduling, the
/// conflict-graph adjacency, the `path_depth` from width expansion, and
/// finally the normalized geometry. Fields are plain data; the pipeline
/// stages in `mosaic_solver` own the invariants between them.
#[derive(Debug, Clone)]
pub struct Block {
    /// The time interval this block occupies.
    pub interval: MinuteInterval<i16>,
    /// Room index assigned by interval scheduling. Overlapping blocks
    /// always have distinct depths.
    pub depth: usize,
    /// Length of the deepest left-of chain through this block, set by
    /// width expansion. Zero until expansion runs.
    pub path_depth: usize,
    /// Normalized left edge in `[0, 1]`.
    pub left: f64,
    /// Normalized width in `(0, 1]`.
    pub width: f64,
    /// Whether this block's geometry is final for the current compute.
    pub is_fixed: bool,
    /// Traversal memo shared by DFS expansion and fixed-point resolution.
    pub visited: bool,
    /// All conflicting blocks with smaller depth.
    pub left_neighbors: NeighborList,
    /// All conflicting blocks with larger depth.
    pub right_neighbors: NeighborList,
    /// Non-dominated subset of `left_neighbors` after condensation.
    pub condensed_left: NeighborList,
    /// Non-dominated subset of `right_neighbors` after condensation.
    pub condensed_right: NeighborList,
}

impl Block {
    /// Creates a fresh block for the given interval.
    pub fn new(interval: MinuteInterval<i16>) -> Self {
        Self {
            interval,
            depth: 0,
            path_depth: 0,
            left: 0.0,
            width: 0.0,
            is_fixed: false,
            visited: false,
            left_neighbors: NeighborList::new(),
            right_neighbors: NeighborList::new(),
            condensed_left: NeighborList::new(),
            condensed_right: NeighborList::new(),
        }
    }

    /// Re-initializes this block for a new interval, keeping the
    /// adjacency allocations.
    pub fn reset(&mut self, interval: MinuteInterval<i16>) {
        self.interval = interval;
        self.depth = 0;
        self.path_depth = 0;
        self.left = 0.0;
        self.width = 0.0;
        self.is_fixed = false;
        self.visited = false;
        self.left_neighbors.clear();
        self.right_neighbors.clear();
        self.condensed_left.clear();
        self.condensed_right.clear();
    }

    /// Returns the normalized right edge, `left + width`.
    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.left + self.width
    }
}
