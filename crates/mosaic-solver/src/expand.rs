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

//! # Width Expansion and Fixed Points
//!
//! The initial geometry pass and the fixed-point machinery driving the
//! LP iteration loop.
//!
//! Expansion walks the condensed graph from the deepest blocks outward:
//! every block reached from a DFS start of depth `d` gets
//! `path_depth = d + 1`, then `left = depth / path_depth` and
//! `width = 1 / path_depth`. A block is *fixed* when its geometry cannot
//! improve anymore: it hugs the left wall, or some condensed left
//! neighbor whose right edge touches its left edge is itself fixed.
//! Resolution is memoized through the `visited` flag; counting re-arms
//! the memo so the next pass only recomputes unfixed blocks.

use mosaic_core::num::constants::{edges_touch, EDGE_EPSILON};
use mosaic_model::{index::BlockIndex, pool::BlockPool};

/// Places every block at `left = depth / total_rooms`,
/// `width = 1 / total_rooms`.
///
/// This is the starting geometry when the DFS expansion is disabled, and
/// the final geometry for inputs that fit in a single room.
pub fn place_uniform(pool: &mut BlockPool, total_rooms: usize) {
    debug_assert!(total_rooms > 0 || pool.is_empty());

    let total = total_rooms as f64;
    for i in 0..pool.len() {
        let block = pool.block_mut(BlockIndex::new(i));
        block.left = block.depth as f64 / total;
        block.width = 1.0 / total;
    }
}

/// Stretches blocks along their condensed left-of chains.
///
/// Traverses blocks by depth descending; each unvisited block starts a
/// DFS over condensed left neighbors, stamping `path_depth = depth + 1`
/// of the start onto everything it reaches. Deeper starts run first, so
/// a block always keeps the longest chain it participates in.
pub fn expand_widths(pool: &mut BlockPool) {
    pool.sort_order_by(|a, b| b.depth.cmp(&a.depth));
    pool.clear_visited();

    let mut stack: Vec<BlockIndex> = Vec::new();
    for pos in 0..pool.len() {
        let start = pool.order()[pos];
        if pool.block(start).visited {
            continue;
        }

        let path_depth = pool.block(start).depth + 1;
        stack.push(start);
        while let Some(current) = stack.pop() {
            if pool.block(current).visited {
                continue;
            }
            {
                let block = pool.block_mut(current);
                block.visited = true;
                block.path_depth = path_depth;
            }
            for c in 0..pool.block(current).condensed_left.len() {
                let next = pool.block(current).condensed_left[c];
                if !pool.block(next).visited {
                    stack.push(next);
                }
            }
        }
    }

    for i in 0..pool.len() {
        let block = pool.block_mut(BlockIndex::new(i));
        debug_assert!(block.path_depth > 0);
        let path = block.path_depth as f64;
        block.left = block.depth as f64 / path;
        block.width = 1.0 / path;
    }
}

/// Runs fixed-point resolution on every block that qualifies for it:
/// blocks whose right edge reaches the right wall, and blocks whose
/// right edge touches an already fixed right neighbor.
pub fn refresh_fixed(pool: &mut BlockPool) {
    for i in 0..pool.len() {
        let idx = BlockIndex::new(i);
        let triggered = {
            let block = pool.block(idx);
            // The trigger scans the full right list: a dominated fixed
            // neighbor can touch when everything between has zero width.
            edges_touch(block.right_edge(), 1.0)
                || block.right_neighbors.iter().any(|&r| {
                    let right = pool.block(r);
                    right.is_fixed && edges_touch(right.left, block.right_edge())
                })
        };
        if triggered {
            resolve_fixed(pool, idx);
        }
    }
}

/// Counts fixed blocks and re-arms the resolution memo: `visited` is set
/// to `is_fixed`, so the next [`refresh_fixed`] pass recomputes exactly
/// the unfixed blocks.
pub fn count_fixed(pool: &mut BlockPool) -> usize {
    let mut count = 0;
    for i in 0..pool.len() {
        let block = pool.block_mut(BlockIndex::new(i));
        block.visited = block.is_fixed;
        if block.is_fixed {
            count += 1;
        }
    }
    count
}

/// Memoized fixed-point resolution from `root`, with an explicit stack.
///
/// Every touching left neighbor is resolved before the verdict for a
/// block is taken; finding one fixed neighbor early does not cut the
/// others short, so their memos are warm for later queries. The left-of
/// relation is a strict order (by depth, ties by traversal order), so the
/// condensed graph is acyclic and the walk terminates.
fn resolve_fixed(pool: &mut BlockPool, root: BlockIndex) -> bool {
    if pool.block(root).visited {
        return pool.block(root).is_fixed;
    }

    // (block, cursor into its condensed left neighbors)
    let mut stack: Vec<(BlockIndex, usize)> = vec![(root, 0)];

    while let Some(&(current, cursor)) = stack.last() {
        if pool.block(current).visited {
            stack.pop();
            continue;
        }

        if cursor == 0 && pool.block(current).left.abs() < EDGE_EPSILON {
            let block = pool.block_mut(current);
            block.is_fixed = true;
            block.visited = true;
            stack.pop();
            continue;
        }

        match pool.block(current).condensed_left.get(cursor).copied() {
            Some(neighbor) => {
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }
                let touching = {
                    let left_edge = pool.block(current).left;
                    edges_touch(pool.block(neighbor).right_edge(), left_edge)
                };
                if touching && !pool.block(neighbor).visited {
                    stack.push((neighbor, 0));
                }
            }
            None => {
                // All touching neighbors are resolved; take the verdict.
                let fixed = {
                    let block = pool.block(current);
                    block.condensed_left.iter().any(|&v| {
                        let neighbor = pool.block(v);
                        neighbor.is_fixed && edges_touch(neighbor.right_edge(), block.left)
                    })
                };
                let block = pool.block_mut(current);
                block.is_fixed = fixed;
                block.visited = true;
                stack.pop();
            }
        }
    }

    pool.block(root).is_fixed
}
