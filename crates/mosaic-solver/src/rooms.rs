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

//! # Interval Scheduling
//!
//! Room assignment for calendar blocks. Each block receives a room
//! `depth` such that blocks sharing a room never conflict under the
//! configured tolerance; the number of rooms opened is minimal (it equals
//! the maximum simultaneous overlap of the input).
//!
//! Two strategies are offered behind [`SchedulerKind`]. The greedy scan
//! always reuses the eligible room with the smallest index, which packs
//! low rooms densely and helps the conflict graph condense. The heap
//! variant reuses whichever room frees up first and runs in
//! O(n log n).

use mosaic_core::math::interval::MinuteInterval;
use mosaic_model::{options::SchedulerKind, pool::BlockPool};
use std::{cmp::Reverse, collections::BinaryHeap};

/// Sorts the pool's traversal order by start time ascending, breaking
/// ties by longer duration first.
///
/// Every later pipeline stage assumes this ordering.
pub fn sort_by_start(pool: &mut BlockPool) {
    pool.sort_order_by(|a, b| {
        a.interval
            .start()
            .cmp(&b.interval.start())
            .then_with(|| b.interval.duration().cmp(&a.interval.duration()))
    });
}

/// Assigns a room depth to every block and returns the room count.
///
/// The traversal order must already be sorted by [`sort_by_start`].
pub fn assign_rooms(pool: &mut BlockPool, kind: SchedulerKind, tolerance: i16) -> usize {
    match kind {
        SchedulerKind::Greedy => assign_greedy(pool, tolerance),
        SchedulerKind::Heap => assign_heap(pool, tolerance),
    }
}

/// O(n²) scan reusing the eligible room with the smallest index.
fn assign_greedy(pool: &mut BlockPool, tolerance: i16) -> usize {
    let mut rooms: Vec<MinuteInterval<i16>> = Vec::new();

    for pos in 0..pool.len() {
        let idx = pool.order()[pos];
        let interval = pool.block(idx).interval;

        let mut depth = rooms.len();
        for (room, last) in rooms.iter().enumerate() {
            if last.clears(interval, tolerance) {
                depth = room;
                break;
            }
        }

        if depth == rooms.len() {
            rooms.push(interval);
        } else {
            rooms[depth] = interval;
        }
        pool.block_mut(idx).depth = depth;
    }

    rooms.len()
}

/// O(n log n) variant keyed on room end times.
fn assign_heap(pool: &mut BlockPool, tolerance: i16) -> usize {
    // Min-heap of (last end, room index); ties prefer the lower room.
    let mut heap: BinaryHeap<Reverse<(i16, usize)>> = BinaryHeap::new();
    let mut total = 0usize;

    for pos in 0..pool.len() {
        let idx = pool.order()[pos];
        let interval = pool.block(idx).interval;

        let depth = match heap.peek() {
            Some(&Reverse((end, room))) if end <= interval.start() + tolerance => {
                heap.pop();
                room
            }
            _ => {
                let room = total;
                total += 1;
                room
            }
        };

        heap.push(Reverse((interval.end(), depth)));
        pool.block_mut(idx).depth = depth;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_model::index::BlockIndex;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn depth_of(pool: &BlockPool, i: usize) -> usize {
        pool.block(BlockIndex::new(i)).depth
    }

    fn pool_of(spans: &[(i16, i16)]) -> BlockPool {
        let mut pool = BlockPool::new();
        pool.reset(spans).unwrap();
        sort_by_start(&mut pool);
        pool
    }

    #[test]
    fn test_sort_orders_by_start_then_longer_first() {
        let mut pool = pool_of(&[(30, 60), (0, 30), (0, 90)]);
        let starts: Vec<i16> = pool
            .order()
            .iter()
            .map(|&i| pool.block(i).interval.start())
            .collect();
        assert_eq!(starts, vec![0, 0, 30]);
        // Equal starts: the longer block comes first.
        assert_eq!(pool.block(pool.order()[0]).interval.end(), 90);

        let total = assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_disjoint_blocks_share_one_room() {
        for kind in [SchedulerKind::Greedy, SchedulerKind::Heap] {
            let mut pool = pool_of(&[(0, 60), (60, 120), (120, 180)]);
            let total = assign_rooms(&mut pool, kind, 0);
            assert_eq!(total, 1);
            for i in 0..3 {
                assert_eq!(depth_of(&pool, i), 0);
            }
        }
    }

    #[test]
    fn test_clique_opens_one_room_per_block() {
        for kind in [SchedulerKind::Greedy, SchedulerKind::Heap] {
            let mut pool = pool_of(&[(480, 660), (480, 660), (480, 660), (480, 660)]);
            let total = assign_rooms(&mut pool, kind, 0);
            assert_eq!(total, 4);

            let mut depths: Vec<usize> = (0..4).map(|i| depth_of(&pool, i)).collect();
            depths.sort_unstable();
            assert_eq!(depths, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_greedy_reuses_smallest_room_index() {
        // Room 1 frees at 40, room 0 at 50; the block at 55 can take
        // either and must take room 0.
        let mut pool = pool_of(&[(0, 50), (0, 40), (55, 90)]);
        let total = assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        assert_eq!(total, 2);
        assert_eq!(depth_of(&pool, 2), 0);
    }

    #[test]
    fn test_heap_reuses_earliest_ending_room() {
        let mut pool = pool_of(&[(0, 50), (0, 40), (55, 90)]);
        let total = assign_rooms(&mut pool, SchedulerKind::Heap, 0);
        assert_eq!(total, 2);
        assert_eq!(depth_of(&pool, 2), 1);
    }

    #[test]
    fn test_positive_tolerance_merges_rooms() {
        // 10-minute overlap is forgiven with tolerance 15.
        let mut pool = pool_of(&[(0, 60), (50, 120)]);
        assert_eq!(assign_rooms(&mut pool, SchedulerKind::Greedy, 15), 1);

        let mut pool = pool_of(&[(0, 60), (50, 120)]);
        assert_eq!(assign_rooms(&mut pool, SchedulerKind::Greedy, 0), 2);
    }

    #[test]
    fn test_negative_tolerance_splits_adjacent_blocks() {
        let mut pool = pool_of(&[(0, 60), (60, 120)]);
        assert_eq!(assign_rooms(&mut pool, SchedulerKind::Greedy, -1), 2);
    }

    #[test]
    fn test_room_count_equals_max_simultaneous_overlap() {
        let spans = [(0i16, 30i16), (10, 40), (20, 50), (35, 60), (45, 70)];
        let expected = max_overlap(&spans);
        for kind in [SchedulerKind::Greedy, SchedulerKind::Heap] {
            let mut pool = pool_of(&spans);
            assert_eq!(assign_rooms(&mut pool, kind, 0), expected);
        }
    }

    #[test]
    fn test_greedy_and_heap_agree_on_room_count_random() {
        let mut rng = StdRng::seed_from_u64(0x4d6f7361);
        for _ in 0..50 {
            let n = rng.gen_range(1..=12);
            let spans: Vec<(i16, i16)> = (0..n)
                .map(|_| {
                    let start = rng.gen_range(0i16..48);
                    let duration = rng.gen_range(1i16..24);
                    (start, start + duration)
                })
                .collect();

            let mut greedy = pool_of(&spans);
            let mut heap = pool_of(&spans);
            let total_greedy = assign_rooms(&mut greedy, SchedulerKind::Greedy, 0);
            let total_heap = assign_rooms(&mut heap, SchedulerKind::Heap, 0);

            assert_eq!(total_greedy, total_heap, "spans: {spans:?}");
            assert_eq!(total_greedy, max_overlap(&spans), "spans: {spans:?}");
        }
    }

    #[test]
    fn test_rooms_never_hold_conflicting_blocks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n = rng.gen_range(2..=10);
            let spans: Vec<(i16, i16)> = (0..n)
                .map(|_| {
                    let start = rng.gen_range(0i16..32);
                    (start, start + rng.gen_range(1i16..16))
                })
                .collect();

            for kind in [SchedulerKind::Greedy, SchedulerKind::Heap] {
                let mut pool = pool_of(&spans);
                assign_rooms(&mut pool, kind, 0);
                for i in 0..n {
                    for j in (i + 1)..n {
                        let a = pool.block(BlockIndex::new(i));
                        let b = pool.block(BlockIndex::new(j));
                        if a.depth == b.depth {
                            assert!(
                                !a.interval.intersects(b.interval),
                                "blocks {i} and {j} share room {} but overlap",
                                a.depth
                            );
                        }
                    }
                }
            }
        }
    }

    // Maximum number of spans covering any single minute.
    fn max_overlap(spans: &[(i16, i16)]) -> usize {
        let mut best = 0;
        for t in 0..128i16 {
            let cover = spans.iter().filter(|&&(s, e)| s <= t && t < e).count();
            best = best.max(cover);
        }
        best
    }
}
