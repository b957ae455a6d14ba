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

//! # Layout Engine
//!
//! The driver tying the pipeline together. One [`LayoutEngine`] owns the
//! block pool, the result buffers and the scratch space, so repeated
//! computes reuse every allocation.
//!
//! A compute runs: sort, room assignment, conflict graph, condensation,
//! DFS width expansion, then iterated LP relaxation until every block is
//! fixed or a pass stops fixing new blocks. With
//! [`LayoutOptions::exact_milp`] set the iteration is replaced by one
//! global MILP solve.
//!
//! # Examples
//!
//! ```
//! use mosaic_solver::engine::LayoutEngine;
//!
//! let mut engine = LayoutEngine::new();
//! let layout = engine.compute(&[(540, 600), (570, 630)]).unwrap();
//!
//! assert_eq!(layout.len(), 2);
//! assert!((layout.widths()[0] - 0.5).abs() < 1e-6);
//! ```

use crate::{
    error::LayoutError,
    expand, graph,
    lp::{ComponentModel, PerBlockWidthModel, UniformWidthModel},
    milp, rooms,
    stats::LayoutStatistics,
};
use mosaic_model::{
    index::BlockIndex,
    layout::Layout,
    options::{LayoutOptions, LpModelKind},
    pool::BlockPool,
};
use std::time::Instant;

/// Computes horizontal layouts for sets of time-interval blocks.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
    pool: BlockPool,
    layout: Layout,
    stats: LayoutStatistics,
    seen: Vec<bool>,
    component: Vec<BlockIndex>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[inline]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    #[inline]
    pub fn options_mut(&mut self) -> &mut LayoutOptions {
        &mut self.options
    }

    /// Result of the most recent compute.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Statistics of the most recent compute.
    #[inline]
    pub fn statistics(&self) -> &LayoutStatistics {
        &self.stats
    }

    /// Computes `left` and `width` for every span, in input order.
    ///
    /// Spans are `(start, end)` minute pairs with `start <= end`. The
    /// returned layout borrows from the engine and stays valid until the
    /// next compute.
    pub fn compute(&mut self, spans: &[(i16, i16)]) -> Result<&Layout, LayoutError> {
        let started = Instant::now();
        self.stats = LayoutStatistics::default();
        self.stats.set_blocks(spans.len());

        let result = self.run_pipeline(spans);
        self.stats.set_total_time(started.elapsed());
        result?;
        Ok(&self.layout)
    }

    fn run_pipeline(&mut self, spans: &[(i16, i16)]) -> Result<(), LayoutError> {
        self.pool.reset(spans)?;
        let n = self.pool.len();
        if n == 0 {
            self.layout.clear();
            return Ok(());
        }

        rooms::sort_by_start(&mut self.pool);
        let total_rooms =
            rooms::assign_rooms(&mut self.pool, self.options.scheduler, self.options.room_tolerance);
        self.stats.set_total_rooms(total_rooms);

        if total_rooms <= 1 {
            expand::place_uniform(&mut self.pool, total_rooms.max(1));
            self.stats.set_fixed_blocks(n);
            self.layout.store(&self.pool)?;
            return Ok(());
        }

        if self.options.exact_milp {
            graph::build(&mut self.pool, self.options.graph_tolerance);
            milp::solve_exact(&mut self.pool, total_rooms, self.options.milp_time_limit)?;
            self.stats.set_milp_used(true);
            self.stats.set_fixed_blocks(n);
            self.layout.store(&self.pool)?;
            return Ok(());
        }

        graph::build(&mut self.pool, self.options.graph_tolerance);
        graph::condense(&mut self.pool);

        if self.options.apply_dfs_expansion {
            expand::expand_widths(&mut self.pool);
        } else {
            expand::place_uniform(&mut self.pool, total_rooms);
        }

        self.pool.clear_visited();
        expand::refresh_fixed(&mut self.pool);
        let mut fixed = expand::count_fixed(&mut self.pool);

        for _ in 0..self.options.lp_iteration_limit {
            if fixed == n {
                break;
            }

            self.solve_components()?;
            self.stats.on_lp_iteration();

            expand::refresh_fixed(&mut self.pool);
            let now_fixed = expand::count_fixed(&mut self.pool);
            if now_fixed == fixed {
                break;
            }
            fixed = now_fixed;
        }

        self.stats.set_fixed_blocks(fixed);
        self.layout.store(&self.pool)?;
        Ok(())
    }

    /// Runs one LP pass: every connected component of unfixed blocks is
    /// collected and solved once.
    fn solve_components(&mut self) -> Result<(), LayoutError> {
        let n = self.pool.len();
        self.seen.clear();
        self.seen.resize(n, false);

        for i in 0..n {
            let idx = BlockIndex::new(i);
            if self.seen[i] || self.pool.block(idx).is_fixed {
                continue;
            }

            self.component.clear();
            graph::collect_component(&self.pool, idx, &mut self.seen, &mut self.component);

            match self.options.lp_model {
                LpModelKind::PerBlockWidth => {
                    PerBlockWidthModel.solve(&mut self.pool, &self.component)?
                }
                LpModelKind::UniformWidth => {
                    UniformWidthModel.solve(&mut self.pool, &self.component)?
                }
            }
            self.stats.on_lp_model_solved();
        }

        Ok(())
    }
}
