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

//! # Conflict Graph
//!
//! Builds the directed "left-of" graph between time-conflicting blocks
//! and condenses it. Edge direction follows room depth: the block with
//! the smaller depth sits left of the deeper one, with depth ties broken
//! by traversal order. Condensation drops
//! every dominated neighbor (one reachable through another neighbor), so
//! the DFS expansion and the LP models only ever look at immediate
//! horizontal contacts.

use mosaic_model::{block::NeighborList, index::BlockIndex, pool::BlockPool};

/// Wires up the conflict graph over a pool whose traversal order is
/// sorted by start time.
///
/// For each pair of conflicting blocks one directed edge is recorded in
/// the adjacency matrix and both full neighbor lists are extended. The
/// inner scan stops at the first block starting after the current one
/// ends; the sort guarantees nothing later can conflict.
pub fn build(pool: &mut BlockPool, tolerance: i16) {
    let n = pool.len();

    for a in 0..n {
        let i = pool.order()[a];
        let (interval_i, depth_i) = {
            let block = pool.block(i);
            (block.interval, block.depth)
        };

        for b in (a + 1)..n {
            let j = pool.order()[b];
            let (interval_j, depth_j) = {
                let block = pool.block(j);
                (block.interval, block.depth)
            };

            if !interval_i.conflicts_with(interval_j, tolerance) {
                break;
            }

            // Equal depths occur when the graph tolerance is stricter
            // than the room tolerance; the tie falls to traversal order.
            let (left, right) = if depth_i < depth_j { (i, j) } else { (j, i) };
            pool.mark_left_of(left, right);
            pool.block_mut(right).left_neighbors.push(left);
            pool.block_mut(left).right_neighbors.push(right);
        }
    }
}

/// Condenses both neighbor lists of every block to their non-dominated
/// members.
pub fn condense(pool: &mut BlockPool) {
    for i in 0..pool.len() {
        let idx = BlockIndex::new(i);

        let condensed_left: NeighborList = {
            let neighbors = &pool.block(idx).left_neighbors;
            neighbors
                .iter()
                .copied()
                .filter(|&v| !dominated_on_left(pool, neighbors, v))
                .collect()
        };
        pool.block_mut(idx).condensed_left = condensed_left;

        let condensed_right: NeighborList = {
            let neighbors = &pool.block(idx).right_neighbors;
            neighbors
                .iter()
                .copied()
                .filter(|&v| !dominated_on_right(pool, neighbors, v))
                .collect()
        };
        pool.block_mut(idx).condensed_right = condensed_right;
    }
}

/// A left neighbor is dominated when it sits left of another left
/// neighbor: the other one already separates it from this block.
fn dominated_on_left(pool: &BlockPool, neighbors: &NeighborList, candidate: BlockIndex) -> bool {
    for &other in neighbors {
        if other != candidate && pool.is_left_of(candidate, other) {
            return true;
        }
    }
    false
}

/// Mirror of [`dominated_on_left`] for the right side.
fn dominated_on_right(pool: &BlockPool, neighbors: &NeighborList, candidate: BlockIndex) -> bool {
    for &other in neighbors {
        if other != candidate && pool.is_left_of(other, candidate) {
            return true;
        }
    }
    false
}

/// Collects the connected component of unfixed blocks containing `seed`,
/// walking condensed adjacency in both directions.
///
/// `seen` persists across calls within one pass so every component is
/// collected exactly once. The component is appended to `out` in BFS
/// order.
pub fn collect_component(
    pool: &BlockPool,
    seed: BlockIndex,
    seen: &mut [bool],
    out: &mut Vec<BlockIndex>,
) {
    debug_assert!(!pool.block(seed).is_fixed);
    debug_assert!(!seen[seed.get()]);

    let mut cursor = out.len();
    seen[seed.get()] = true;
    out.push(seed);

    while cursor < out.len() {
        let current = out[cursor];
        cursor += 1;

        let block = pool.block(current);
        for &next in block.condensed_left.iter().chain(&block.condensed_right) {
            if !seen[next.get()] && !pool.block(next).is_fixed {
                seen[next.get()] = true;
                out.push(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms;
    use mosaic_model::options::SchedulerKind;

    fn bi(i: usize) -> BlockIndex {
        BlockIndex::new(i)
    }

    fn prepared_pool(spans: &[(i16, i16)], tolerance: i16) -> BlockPool {
        let mut pool = BlockPool::new();
        pool.reset(spans).unwrap();
        rooms::sort_by_start(&mut pool);
        rooms::assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        build(&mut pool, tolerance);
        pool
    }

    #[test]
    fn test_disjoint_blocks_get_no_edges() {
        let pool = prepared_pool(&[(0, 60), (60, 120)], 0);
        assert!(pool.block(bi(0)).left_neighbors.is_empty());
        assert!(pool.block(bi(0)).right_neighbors.is_empty());
        assert!(pool.block(bi(1)).left_neighbors.is_empty());
    }

    #[test]
    fn test_edge_direction_follows_depth() {
        let pool = prepared_pool(&[(0, 60), (30, 90)], 0);
        // Block 0 starts first and holds room 0; block 1 is deeper.
        assert_eq!(pool.block(bi(1)).left_neighbors.as_slice(), &[bi(0)]);
        assert_eq!(pool.block(bi(0)).right_neighbors.as_slice(), &[bi(1)]);
        assert!(pool.is_left_of(bi(0), bi(1)));
        assert!(!pool.is_left_of(bi(1), bi(0)));
    }

    #[test]
    fn test_graph_tolerance_drops_small_overlaps() {
        let pool = prepared_pool(&[(0, 60), (50, 120)], 15);
        assert!(pool.block(bi(1)).left_neighbors.is_empty());

        let pool = prepared_pool(&[(0, 60), (50, 120)], 0);
        assert_eq!(pool.block(bi(1)).left_neighbors.len(), 1);
    }

    #[test]
    fn test_stricter_graph_tolerance_pairs_blocks_sharing_a_room() {
        // Room assignment at tolerance 0 lets the back-to-back blocks
        // share room 1; graph tolerance -1 still counts them as
        // conflicting, and the edge direction falls to traversal order.
        let pool = prepared_pool(&[(0, 120), (0, 60), (60, 120)], -1);
        assert_eq!(pool.block(bi(1)).depth, pool.block(bi(2)).depth);

        assert!(pool.is_left_of(bi(2), bi(1)));
        assert!(pool.block(bi(1)).left_neighbors.contains(&bi(2)));
        assert!(pool.block(bi(2)).right_neighbors.contains(&bi(1)));
    }

    #[test]
    fn test_condense_keeps_only_deepest_left_neighbor_in_clique() {
        let mut pool = prepared_pool(&[(0, 60), (0, 60), (0, 60)], 0);
        condense(&mut pool);

        // In a clique the only non-dominated left neighbor is the one
        // directly above, and symmetrically on the right.
        assert_eq!(pool.block(bi(2)).left_neighbors.len(), 2);
        assert_eq!(pool.block(bi(2)).condensed_left.as_slice(), &[bi(1)]);
        assert_eq!(pool.block(bi(0)).condensed_right.as_slice(), &[bi(1)]);
        assert_eq!(pool.block(bi(1)).condensed_left.as_slice(), &[bi(0)]);
        assert_eq!(pool.block(bi(1)).condensed_right.as_slice(), &[bi(2)]);
    }

    #[test]
    fn test_condense_keeps_unrelated_left_neighbors() {
        // Blocks 0 and 1 both conflict with 2 but not with each other,
        // so neither dominates the other.
        let mut pool = prepared_pool(&[(0, 40), (45, 90), (30, 120)], 0);
        condense(&mut pool);

        let condensed = &pool.block(bi(2)).condensed_left;
        assert_eq!(condensed.len(), 2);
        assert!(condensed.contains(&bi(0)));
        assert!(condensed.contains(&bi(1)));
    }

    #[test]
    fn test_collect_component_walks_both_directions() {
        let mut pool = prepared_pool(&[(0, 60), (30, 90), (120, 180), (150, 210)], 0);
        condense(&mut pool);

        let mut seen = vec![false; pool.len()];
        let mut component = Vec::new();
        collect_component(&pool, bi(0), &mut seen, &mut component);

        assert_eq!(component.len(), 2);
        assert!(component.contains(&bi(0)));
        assert!(component.contains(&bi(1)));
        assert!(!seen[2]);

        component.clear();
        collect_component(&pool, bi(2), &mut seen, &mut component);
        assert_eq!(component.len(), 2);
        assert!(component.contains(&bi(3)));
    }

    #[test]
    fn test_collect_component_skips_fixed_blocks() {
        let mut pool = prepared_pool(&[(0, 60), (30, 90), (30, 90)], 0);
        condense(&mut pool);
        pool.block_mut(bi(0)).is_fixed = true;

        let mut seen = vec![false; pool.len()];
        let mut component = Vec::new();
        collect_component(&pool, bi(1), &mut seen, &mut component);

        assert!(!component.contains(&bi(0)));
        assert!(!seen[0]);
    }
}
