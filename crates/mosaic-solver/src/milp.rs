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

//! # Exact MILP Layout
//!
//! Globally optimal placement as a mixed-integer program over the whole
//! pool. Every overlapping pair gets one binary ordering variable and a
//! big-M disjunction: exactly one of the two blocks sits fully left of
//! the other. The solver maximizes total width; on hitting the time
//! limit the incumbent solution is written back instead of an error.

use crate::error::LayoutError;
use good_lp::{
    constraint, default_solver, variable, variables, Expression, Solution, SolverModel, Variable,
    WithTimeLimit,
};
use mosaic_model::{index::BlockIndex, pool::BlockPool};
use std::time::Duration;

/// Big-M constant for the pairwise ordering disjunctions. All geometry
/// lives in [0, 1], so 10 safely deactivates either branch.
const BIG_M: f64 = 10.0;

/// Solves the exact placement over every block in the pool.
///
/// Requires the conflict graph to be built; the pairwise disjunctions
/// are enumerated from the full right-neighbor lists. `total_rooms`
/// floors every width at `1 / total_rooms`, which is always feasible
/// because the room count equals the maximum simultaneous overlap.
pub fn solve_exact(
    pool: &mut BlockPool,
    total_rooms: usize,
    time_limit: Duration,
) -> Result<(), LayoutError> {
    let n = pool.len();
    debug_assert!(total_rooms > 0);
    let min_width = 1.0 / total_rooms as f64;

    let mut vars = variables!();
    let mut lefts: Vec<Variable> = Vec::with_capacity(n);
    let mut widths: Vec<Variable> = Vec::with_capacity(n);
    for _ in 0..n {
        lefts.push(vars.add(variable().min(0.0).max(1.0)));
        widths.push(vars.add(variable().min(min_width).max(1.0)));
    }

    // Each conflicting pair appears exactly once in the right lists.
    let mut pairs: Vec<(usize, usize, Variable)> = Vec::new();
    for i in 0..n {
        for &j in &pool.block(BlockIndex::new(i)).right_neighbors {
            pairs.push((i, j.get(), vars.add(variable().binary())));
        }
    }

    let objective = widths
        .iter()
        .fold(Expression::from(0.0), |acc, &w| acc + w);
    let mut problem = vars
        .maximise(objective)
        .using(default_solver)
        .with_time_limit(time_limit.as_secs_f64());

    for k in 0..n {
        problem = problem.with(constraint!(lefts[k] + widths[k] <= 1.0));
    }
    for &(i, j, order) in &pairs {
        // order == 0 puts block i left of block j, order == 1 flips it.
        problem = problem.with(constraint!(
            lefts[i] + widths[i] - BIG_M * order <= lefts[j]
        ));
        problem = problem.with(constraint!(
            lefts[j] + widths[j] + BIG_M * order <= lefts[i] + BIG_M
        ));
    }

    let solution = problem.solve()?;
    for k in 0..n {
        let block = pool.block_mut(BlockIndex::new(k));
        block.left = solution.value(lefts[k]);
        block.width = solution.value(widths[k]);
        block.is_fixed = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph, rooms};
    use mosaic_model::options::SchedulerKind;

    fn bi(i: usize) -> BlockIndex {
        BlockIndex::new(i)
    }

    fn solved_pool(spans: &[(i16, i16)]) -> (BlockPool, usize) {
        let mut pool = BlockPool::new();
        pool.reset(spans).unwrap();
        rooms::sort_by_start(&mut pool);
        let total = rooms::assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        graph::build(&mut pool, 0);
        solve_exact(&mut pool, total, Duration::from_secs(10)).expect("MILP solve failed");
        (pool, total)
    }

    #[test]
    fn test_two_overlapping_blocks_split_the_row() {
        let (pool, total) = solved_pool(&[(0, 60), (30, 90)]);
        assert_eq!(total, 2);

        let a = pool.block(bi(0));
        let b = pool.block(bi(1));
        assert!((a.width - 0.5).abs() < 1e-6);
        assert!((b.width - 0.5).abs() < 1e-6);

        let mut starts = [a.left, b.left];
        starts.sort_by(f64::total_cmp);
        assert!(starts[0].abs() < 1e-6);
        assert!((starts[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clique_widths_hit_the_floor() {
        let (pool, total) = solved_pool(&[(0, 60), (0, 60), (0, 60)]);
        assert_eq!(total, 3);

        let mut starts: Vec<f64> = (0..3).map(|i| pool.block(bi(i)).left).collect();
        starts.sort_by(f64::total_cmp);
        for (k, &left) in starts.iter().enumerate() {
            assert!((left - k as f64 / 3.0).abs() < 1e-6);
        }
        for i in 0..3 {
            assert!((pool.block(bi(i)).width - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_chain_of_partial_overlaps_beats_uniform_packing() {
        // Blocks 0 and 2 never overlap, so they can share a column while
        // block 1 takes the other; the optimum is width 1/2 everywhere
        // even though the chain has three blocks.
        let (pool, total) = solved_pool(&[(0, 40), (30, 70), (60, 100)]);
        assert_eq!(total, 2);

        for i in 0..3 {
            assert!(pool.block(bi(i)).width >= 0.5 - 1e-6);
        }

        let a = pool.block(bi(0));
        let b = pool.block(bi(1));
        let c = pool.block(bi(2));
        assert!(disjoint(a.left, a.width, b.left, b.width));
        assert!(disjoint(b.left, b.width, c.left, c.width));
    }

    #[test]
    fn test_all_blocks_marked_fixed() {
        let (pool, _) = solved_pool(&[(0, 60), (30, 90), (45, 120)]);
        for i in 0..3 {
            assert!(pool.block(bi(i)).is_fixed);
        }
    }

    fn disjoint(left_a: f64, width_a: f64, left_b: f64, width_b: f64) -> bool {
        left_a + width_a <= left_b + 1e-6 || left_b + width_b <= left_a + 1e-6
    }
}
