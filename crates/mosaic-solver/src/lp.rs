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

//! # LP Relaxation
//!
//! Linear relaxations solved per connected component of unfixed blocks.
//! Fixed blocks never enter a model; they contribute constant bounds: a
//! fixed left neighbor's right edge becomes a lower bound on `left`, a
//! fixed right neighbor's left edge caps `left + width`.
//!
//! Two relaxations are available behind the [`ComponentModel`] seam.
//! [`PerBlockWidthModel`] gives every block its own `(left, width)` pair
//! and solves twice: first maximizing the total width, then re-solving
//! with the total pinned near its optimum while minimizing the mean
//! absolute deviation of the widths, so no block starves for the sake of
//! the sum. [`UniformWidthModel`] shares one width variable across the
//! component and solves once.

use crate::error::LayoutError;
use good_lp::{
    constraint, default_solver, variable, variables, Expression, Solution, SolverModel, Variable,
};
use mosaic_core::num::constants::EDGE_EPSILON;
use mosaic_model::{index::BlockIndex, pool::BlockPool};

/// One LP relaxation strategy applied to a component of unfixed blocks.
///
/// Implementations write the primal solution straight back into the pool.
pub trait ComponentModel {
    fn solve(&self, pool: &mut BlockPool, members: &[BlockIndex]) -> Result<(), LayoutError>;
}

/// The `(left, width)`-per-block relaxation with the width-evening
/// second phase.
pub struct PerBlockWidthModel;

/// The shared-width relaxation: one width variable for the whole
/// component.
pub struct UniformWidthModel;

/// Constant bounds a block inherits from its fixed neighbors: the lower
/// bound on `left` and the cap on `left + width`.
fn fixed_neighbor_bounds(pool: &BlockPool, index: BlockIndex) -> (f64, f64) {
    let block = pool.block(index);

    let mut lower = 0.0f64;
    for &v in &block.condensed_left {
        let neighbor = pool.block(v);
        if neighbor.is_fixed {
            lower = lower.max(neighbor.right_edge());
        }
    }

    let mut cap = 1.0f64;
    for &v in &block.condensed_right {
        let neighbor = pool.block(v);
        if neighbor.is_fixed {
            cap = cap.min(neighbor.left);
        }
    }

    (lower, cap)
}

/// Maps pool indices to component-local column positions.
fn column_table(pool: &BlockPool, members: &[BlockIndex]) -> Vec<usize> {
    let mut column = vec![usize::MAX; pool.len()];
    for (k, &m) in members.iter().enumerate() {
        column[m.get()] = k;
    }
    column
}

impl ComponentModel for PerBlockWidthModel {
    fn solve(&self, pool: &mut BlockPool, members: &[BlockIndex]) -> Result<(), LayoutError> {
        debug_assert!(!members.is_empty());

        let column = column_table(pool, members);

        // Phase one: maximize the total width of the component.
        let mut vars = variables!();
        let mut lefts: Vec<Variable> = Vec::with_capacity(members.len());
        let mut widths: Vec<Variable> = Vec::with_capacity(members.len());
        for &m in members {
            let (lower, _) = fixed_neighbor_bounds(pool, m);
            let width_floor = pool.block(m).width;
            lefts.push(vars.add(variable().min(lower).max(1.0)));
            widths.push(vars.add(variable().min(width_floor).max(1.0)));
        }

        let objective = widths
            .iter()
            .fold(Expression::from(0.0), |acc, &w| acc + w);
        let mut problem = vars.maximise(objective).using(default_solver);
        problem = add_ordering_constraints(problem, pool, members, &column, &lefts, |k| {
            lefts[k] + widths[k]
        });

        let solution = problem.solve()?;
        let best_total: f64 = widths.iter().map(|&w| solution.value(w)).sum();
        let mean = best_total / members.len() as f64;

        // Phase two: hold the total near its optimum and even the widths
        // out by minimizing the absolute deviation from the mean.
        let mut vars = variables!();
        let mut lefts: Vec<Variable> = Vec::with_capacity(members.len());
        let mut widths: Vec<Variable> = Vec::with_capacity(members.len());
        let mut deviations: Vec<Variable> = Vec::with_capacity(members.len());
        for &m in members {
            let (lower, _) = fixed_neighbor_bounds(pool, m);
            let width_floor = pool.block(m).width;
            lefts.push(vars.add(variable().min(lower).max(1.0)));
            widths.push(vars.add(variable().min(width_floor).max(1.0)));
            deviations.push(vars.add(variable().min(0.0)));
        }

        let objective = deviations
            .iter()
            .fold(Expression::from(0.0), |acc, &t| acc + t);
        let mut problem = vars.minimise(objective).using(default_solver);
        problem = add_ordering_constraints(problem, pool, members, &column, &lefts, |k| {
            lefts[k] + widths[k]
        });

        let total = widths
            .iter()
            .fold(Expression::from(0.0), |acc, &w| acc + w);
        problem = problem.with(constraint!(total >= best_total - EDGE_EPSILON));
        for k in 0..members.len() {
            problem = problem.with(constraint!(deviations[k] - widths[k] >= -mean));
            problem = problem.with(constraint!(deviations[k] + widths[k] >= mean));
        }

        let solution = problem.solve()?;
        for (k, &m) in members.iter().enumerate() {
            let block = pool.block_mut(m);
            block.left = solution.value(lefts[k]);
            block.width = solution.value(widths[k]);
        }

        Ok(())
    }
}

impl ComponentModel for UniformWidthModel {
    fn solve(&self, pool: &mut BlockPool, members: &[BlockIndex]) -> Result<(), LayoutError> {
        debug_assert!(!members.is_empty());

        let column = column_table(pool, members);

        // Unlike the per-block model, the shared width carries no floor:
        // the widest member may have to shrink for the chain to fit.
        let mut vars = variables!();
        let width = vars.add(variable().min(0.0).max(1.0));
        let mut lefts: Vec<Variable> = Vec::with_capacity(members.len());
        for &m in members {
            let (lower, _) = fixed_neighbor_bounds(pool, m);
            lefts.push(vars.add(variable().min(lower).max(1.0)));
        }

        let mut problem = vars.maximise(width).using(default_solver);
        problem = add_ordering_constraints(problem, pool, members, &column, &lefts, |k| {
            lefts[k] + width
        });

        let solution = problem.solve()?;
        let solved_width = solution.value(width);
        for (k, &m) in members.iter().enumerate() {
            let block = pool.block_mut(m);
            block.left = solution.value(lefts[k]);
            block.width = solved_width;
        }

        Ok(())
    }
}

/// Adds the shared constraint rows: horizontal ordering between unfixed
/// condensed neighbors, and the fixed-neighbor cap on each block's right
/// edge. `right_edge_of` supplies the model-specific `left + width`
/// expression of column `k`.
fn add_ordering_constraints<M, F>(
    mut problem: M,
    pool: &BlockPool,
    members: &[BlockIndex],
    column: &[usize],
    lefts: &[Variable],
    right_edge_of: F,
) -> M
where
    M: SolverModel,
    F: Fn(usize) -> Expression,
{
    for (k, &m) in members.iter().enumerate() {
        let block = pool.block(m);
        for &v in &block.condensed_left {
            if pool.block(v).is_fixed {
                continue;
            }
            let j = column[v.get()];
            debug_assert!(j != usize::MAX, "unfixed neighbor outside the component");
            problem = problem.with(constraint!(lefts[k] >= right_edge_of(j)));
        }

        let (_, cap) = fixed_neighbor_bounds(pool, m);
        problem = problem.with(constraint!(right_edge_of(k) <= cap));
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expand, graph, rooms};
    use mosaic_model::options::SchedulerKind;

    fn bi(i: usize) -> BlockIndex {
        BlockIndex::new(i)
    }

    // Five pillars force a short trailing block onto a mismatched chain;
    // the LP must slide it against the fixed pillar and widen it.
    fn gap_scenario() -> BlockPool {
        let spans = [
            (0, 100),
            (0, 100),
            (0, 100),
            (0, 50),
            (0, 50),
            (60, 150),
        ];
        let mut pool = BlockPool::new();
        pool.reset(&spans).unwrap();
        rooms::sort_by_start(&mut pool);
        rooms::assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        graph::build(&mut pool, 0);
        graph::condense(&mut pool);
        expand::expand_widths(&mut pool);
        pool.clear_visited();
        expand::refresh_fixed(&mut pool);
        expand::count_fixed(&mut pool);
        pool
    }

    #[test]
    fn test_fixed_neighbor_bounds_for_trailing_block() {
        let pool = gap_scenario();
        let (lower, cap) = fixed_neighbor_bounds(&pool, bi(5));
        assert!((lower - 0.6).abs() < 1e-9);
        assert_eq!(cap, 1.0);
    }

    #[test]
    fn test_per_block_model_closes_the_gap() {
        let mut pool = gap_scenario();
        assert!(!pool.block(bi(5)).is_fixed);

        PerBlockWidthModel
            .solve(&mut pool, &[bi(5)])
            .expect("LP solve failed");

        let block = pool.block(bi(5));
        assert!((block.left - 0.6).abs() < 1e-6);
        assert!((block.width - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_model_closes_the_gap() {
        let mut pool = gap_scenario();

        UniformWidthModel
            .solve(&mut pool, &[bi(5)])
            .expect("LP solve failed");

        let block = pool.block(bi(5));
        assert!((block.left - 0.6).abs() < 1e-6);
        assert!((block.width - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_model_shrinks_widest_member_to_fit_chain() {
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 60), (0, 60), (0, 60)]).unwrap();
        rooms::sort_by_start(&mut pool);
        rooms::assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        graph::build(&mut pool, 0);
        graph::condense(&mut pool);

        // A fixed sliver against the left wall; the remaining chain of
        // two can only host a shared width of 0.4, below the widest
        // member's current 0.5.
        {
            let block = pool.block_mut(bi(0));
            block.left = 0.0;
            block.width = 0.2;
            block.is_fixed = true;
        }
        pool.block_mut(bi(1)).left = 0.2;
        pool.block_mut(bi(1)).width = 0.5;
        pool.block_mut(bi(2)).left = 0.7;
        pool.block_mut(bi(2)).width = 0.2;

        UniformWidthModel
            .solve(&mut pool, &[bi(1), bi(2)])
            .expect("LP solve failed");

        let b1 = pool.block(bi(1));
        let b2 = pool.block(bi(2));
        assert!((b1.width - 0.4).abs() < 1e-6);
        assert!((b2.width - 0.4).abs() < 1e-6);
        assert!((b1.left - 0.2).abs() < 1e-6);
        assert!((b2.left - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_widths_never_shrink() {
        let mut pool = gap_scenario();
        let before = pool.block(bi(5)).width;

        PerBlockWidthModel
            .solve(&mut pool, &[bi(5)])
            .expect("LP solve failed");

        assert!(pool.block(bi(5)).width >= before - 1e-9);
    }

    #[test]
    fn test_multi_member_component_keeps_ordering() {
        // Two unfixed stacked blocks with no fixed walls around them:
        // the model may widen both but must keep block 1 right of
        // block 0.
        let mut pool = BlockPool::new();
        pool.reset(&[(0, 60), (0, 60)]).unwrap();
        rooms::sort_by_start(&mut pool);
        rooms::assign_rooms(&mut pool, SchedulerKind::Greedy, 0);
        graph::build(&mut pool, 0);
        graph::condense(&mut pool);
        expand::expand_widths(&mut pool);

        PerBlockWidthModel
            .solve(&mut pool, &[bi(0), bi(1)])
            .expect("LP solve failed");

        let a = pool.block(bi(0));
        let b = pool.block(bi(1));
        assert!(b.left >= a.right_edge() - 1e-6);
        assert!(b.right_edge() <= 1.0 + 1e-6);
        assert!(a.width >= 0.5 - 1e-6);
        assert!(b.width >= 0.5 - 1e-6);
    }
}
