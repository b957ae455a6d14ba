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

//! # Block Pool
//!
//! The reusable working memory of the layout engine. The pool owns every
//! [`Block`], the permuted traversal order, and the directed left-of
//! adjacency matrix. It only ever grows to the high-water block count:
//! `reset` re-populates everything for a new compute and, in the steady
//! state, performs no allocation at all. Growth goes through `try_reserve`
//! so an allocator failure surfaces as [`PoolCapacityError`] instead of
//! aborting the host process.

use crate::{block::Block, index::BlockIndex};
use fixedbitset::FixedBitSet;
use mosaic_core::math::interval::MinuteInterval;
use std::{cmp::Ordering, collections::TryReserveError};

/// The error returned when the pool cannot grow to the requested block count.
#[derive(Debug)]
pub struct PoolCapacityError {
    /// The block count the pool was asked to hold.
    pub requested: usize,
    /// The underlying allocator error.
    pub source: TryReserveError,
}

impl std::fmt::Display for PoolCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not reserve pool capacity for {} blocks: {}",
            self.requested, self.source
        )
    }
}

impl std::error::Error for PoolCapacityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The arena holding all per-block working state for one engine.
///
/// Block `i` always corresponds to the `i`-th input interval. The
/// traversal `order` is the only thing the pipeline permutes; backing
/// storage never moves, so [`BlockIndex`] values stay valid for the whole
/// compute.
#[derive(Debug, Clone, Default)]
pub struct BlockPool {
    blocks: Vec<Block>,
    order: Vec<BlockIndex>,
    /// Bit `right * len + left` set means `left` is directly left of `right`.
    matrix: FixedBitSet,
    len: usize,
}

impl BlockPool {
    /// Creates an empty pool.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of active blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the pool holds no active blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Re-populates the pool for a new compute.
    ///
    /// Every block is re-initialized from its span, the traversal order is
    /// reset to the identity permutation, and the adjacency matrix is
    /// cleared. Capacity beyond the high-water mark is reserved through
    /// `try_reserve`.
    ///
    /// # Panics
    ///
    /// Panics if any span has `start > end`.
    pub fn reset(&mut self, spans: &[(i16, i16)]) -> Result<(), PoolCapacityError> {
        let n = spans.len();

        if n > self.blocks.len() {
            let additional = n - self.blocks.len();
            self.blocks
                .try_reserve(additional)
                .map_err(|source| PoolCapacityError {
                    requested: n,
                    source,
                })?;
            self.order
                .try_reserve(additional)
                .map_err(|source| PoolCapacityError {
                    requested: n,
                    source,
                })?;
        }

        for (i, &(start, end)) in spans.iter().enumerate() {
            let interval = MinuteInterval::new(start, end);
            if i < self.blocks.len() {
                self.blocks[i].reset(interval);
            } else {
                self.blocks.push(Block::new(interval));
            }
        }
        self.len = n;

        self.order.clear();
        self.order.extend((0..n).map(BlockIndex::new));

        self.matrix.clear();
        self.matrix.grow(n * n);

        Ok(())
    }

    /// Returns the block at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn block(&self, index: BlockIndex) -> &Block {
        debug_assert!(
            index.get() < self.len,
            "called `BlockPool::block` with block index out of bounds: the len is {} but the index is {}",
            self.len,
            index.get()
        );

        &self.blocks[index.get()]
    }

    /// Returns the block at the given index mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn block_mut(&mut self, index: BlockIndex) -> &mut Block {
        debug_assert!(
            index.get() < self.len,
            "called `BlockPool::block_mut` with block index out of bounds: the len is {} but the index is {}",
            self.len,
            index.get()
        );

        &mut self.blocks[index.get()]
    }

    /// Returns the current traversal order.
    #[inline]
    pub fn order(&self) -> &[BlockIndex] {
        &self.order[..self.len]
    }

    /// Sorts the traversal order by a comparator over blocks. Backing
    /// storage is not reordered.
    pub fn sort_order_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Block, &Block) -> Ordering,
    {
        let mut order = std::mem::take(&mut self.order);
        order.sort_by(|&a, &b| compare(&self.blocks[a.get()], &self.blocks[b.get()]));
        self.order = order;
    }

    /// Records that `left` sits directly left of `right` in the conflict graph.
    #[inline]
    pub fn mark_left_of(&mut self, left: BlockIndex, right: BlockIndex) {
        debug_assert!(left.get() < self.len && right.get() < self.len);
        self.matrix.insert(right.get() * self.len + left.get());
    }

    /// Returns `true` if `left` was recorded directly left of `right`.
    #[inline]
    pub fn is_left_of(&self, left: BlockIndex, right: BlockIndex) -> bool {
        debug_assert!(left.get() < self.len && right.get() < self.len);
        self.matrix.contains(right.get() * self.len + left.get())
    }

    /// Clears the traversal memo on every active block.
    pub fn clear_visited(&mut self) {
        for block in &mut self.blocks[..self.len] {
            block.visited = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(i: usize) -> BlockIndex {
        BlockIndex::new(i)
    }

    #[test]
    fn test_reset_populates_blocks_and_order() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 60), (30, 90), (120, 180)]).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.block(bi(1)).interval.start(), 30);
        assert_eq!(pool.order(), &[bi(0), bi(1), bi(2)]);
    }

    #[test]
    fn test_reset_shrinks_active_len_but_keeps_capacity() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 10), (5, 15), (10, 20), (15, 25)]).unwrap();
        assert_eq!(pool.len(), 4);

        pool.reset(&[(0, 30)]).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.order(), &[bi(0)]);
        assert_eq!(pool.block(bi(0)).interval.end(), 30);
    }

    #[test]
    fn test_reset_clears_stale_state() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 60), (0, 60)]).unwrap();
        pool.block_mut(bi(0)).is_fixed = true;
        pool.block_mut(bi(0)).left = 0.5;
        pool.mark_left_of(bi(0), bi(1));

        pool.reset(&[(0, 60), (0, 60)]).unwrap();
        assert!(!pool.block(bi(0)).is_fixed);
        assert_eq!(pool.block(bi(0)).left, 0.0);
        assert!(!pool.is_left_of(bi(0), bi(1)));
    }

    #[test]
    fn test_matrix_is_directional() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 60), (0, 60)]).unwrap();

        pool.mark_left_of(bi(0), bi(1));
        assert!(pool.is_left_of(bi(0), bi(1)));
        assert!(!pool.is_left_of(bi(1), bi(0)));
    }

    #[test]
    fn test_sort_order_permutes_only_the_order() {
        let mut pool = BlockPool::new();
        pool.reset(&[(30, 90), (0, 60), (10, 20)]).unwrap();

        pool.sort_order_by(|a, b| a.interval.start().cmp(&b.interval.start()));

        assert_eq!(pool.order(), &[bi(1), bi(2), bi(0)]);
        // Backing storage untouched.
        assert_eq!(pool.block(bi(0)).interval.start(), 30);
    }

    #[test]
    fn test_clear_visited() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 10), (0, 10)]).unwrap();
        pool.block_mut(bi(0)).visited = true;
        pool.block_mut(bi(1)).visited = true;

        pool.clear_visited();
        assert!(!pool.block(bi(0)).visited);
        assert!(!pool.block(bi(1)).visited);
    }

    #[test]
    fn test_empty_reset() {
        let mut pool = BlockPool::new();
        pool.reset(&[]).unwrap();
        assert!(pool.is_empty());
        assert!(pool.order().is_empty());
    }

    #[test]
    #[should_panic(expected = "Invalid interval")]
    fn test_reset_panics_on_inverted_span() {
        let mut pool = BlockPool::new();
        let _ = pool.reset(&[(60, 0)]);
    }
}
