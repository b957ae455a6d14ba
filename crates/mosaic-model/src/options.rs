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

use std::time::Duration;

/// Selects the room assignment strategy used by interval scheduling.
///
/// Both strategies produce the same minimal room count; they differ in
/// which room each block lands in and therefore in how well the conflict
/// graph condenses afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerKind {
    /// O(n²) scan that always reuses the eligible room with the smallest
    /// index. Produces denser low rooms, which condenses better.
    #[default]
    Greedy,
    /// O(n log n) min-heap keyed by room end time. Faster on large days,
    /// but reuses whichever room frees up first.
    Heap,
}

/// Selects the LP relaxation solved per connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LpModelKind {
    /// One `(left, width)` variable pair per block. Phase one maximizes
    /// the total width, phase two evens the widths out at near-optimal
    /// total.
    #[default]
    PerBlockWidth,
    /// One shared width variable for the whole component and one left
    /// variable per block. Single maximization phase.
    UniformWidth,
}

/// The full configuration surface of the layout engine.
///
/// Options are plain data and can be swapped between computes; the
/// engine reads them at the start of every [`compute`] call.
///
/// # Examples
///
/// ```rust
/// # use mosaic_model::options::{LayoutOptions, SchedulerKind};
///
/// let options = LayoutOptions::default()
///     .with_scheduler(SchedulerKind::Heap)
///     .with_room_tolerance(5);
/// assert_eq!(options.room_tolerance, 5);
/// ```
///
/// [`compute`]: https://docs.rs/mosaic-solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Signed tolerance in minutes for room reuse during interval
    /// scheduling. Positive values let blocks that overlap by up to this
    /// many minutes share a room.
    pub room_tolerance: i16,
    /// The room assignment strategy.
    pub scheduler: SchedulerKind,
    /// Whether to run the DFS width expansion after condensation. When
    /// disabled, all blocks start from the uniform `1 / total_rooms`
    /// placement before the fixed-point loop.
    pub apply_dfs_expansion: bool,
    /// Signed tolerance in minutes for conflict-graph edges. Two blocks
    /// conflict if the later one starts more than this many minutes
    /// before the earlier one ends.
    pub graph_tolerance: i16,
    /// Upper bound on LP relaxation iterations per compute.
    pub lp_iteration_limit: usize,
    /// The LP relaxation variant.
    pub lp_model: LpModelKind,
    /// Solve one exact MILP over all blocks instead of the iterative
    /// relaxation pipeline.
    pub exact_milp: bool,
    /// Wall-clock budget for the MILP. When it fires, the best incumbent
    /// found so far is used.
    pub milp_time_limit: Duration,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            room_tolerance: 0,
            scheduler: SchedulerKind::Greedy,
            apply_dfs_expansion: true,
            graph_tolerance: 0,
            lp_iteration_limit: 100,
            lp_model: LpModelKind::PerBlockWidth,
            exact_milp: false,
            milp_time_limit: Duration::from_secs(10),
        }
    }
}

impl LayoutOptions {
    /// Creates options with all defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the room reuse tolerance in minutes.
    #[inline]
    pub fn with_room_tolerance(mut self, minutes: i16) -> Self {
        self.room_tolerance = minutes;
        self
    }

    /// Sets the room assignment strategy.
    #[inline]
    pub fn with_scheduler(mut self, scheduler: SchedulerKind) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Enables or disables the DFS width expansion.
    #[inline]
    pub fn with_dfs_expansion(mut self, yes: bool) -> Self {
        self.apply_dfs_expansion = yes;
        self
    }

    /// Sets the conflict-graph tolerance in minutes.
    #[inline]
    pub fn with_graph_tolerance(mut self, minutes: i16) -> Self {
        self.graph_tolerance = minutes;
        self
    }

    /// Sets the LP iteration cap.
    #[inline]
    pub fn with_lp_iteration_limit(mut self, limit: usize) -> Self {
        self.lp_iteration_limit = limit;
        self
    }

    /// Sets the LP relaxation variant.
    #[inline]
    pub fn with_lp_model(mut self, model: LpModelKind) -> Self {
        self.lp_model = model;
        self
    }

    /// Enables or disables the exact MILP path.
    #[inline]
    pub fn with_exact_milp(mut self, yes: bool) -> Self {
        self.exact_milp = yes;
        self
    }

    /// Sets the MILP wall-clock budget.
    #[inline]
    pub fn with_milp_time_limit(mut self, limit: Duration) -> Self {
        self.milp_time_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_conventions() {
        let o = LayoutOptions::default();
        assert_eq!(o.room_tolerance, 0);
        assert_eq!(o.scheduler, SchedulerKind::Greedy);
        assert!(o.apply_dfs_expansion);
        assert_eq!(o.graph_tolerance, 0);
        assert_eq!(o.lp_iteration_limit, 100);
        assert_eq!(o.lp_model, LpModelKind::PerBlockWidth);
        assert!(!o.exact_milp);
        assert_eq!(o.milp_time_limit, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_style_setters() {
        let o = LayoutOptions::new()
            .with_room_tolerance(-10)
            .with_scheduler(SchedulerKind::Heap)
            .with_dfs_expansion(false)
            .with_graph_tolerance(3)
            .with_lp_iteration_limit(7)
            .with_lp_model(LpModelKind::UniformWidth)
            .with_exact_milp(true)
            .with_milp_time_limit(Duration::from_secs(1));

        assert_eq!(o.room_tolerance, -10);
        assert_eq!(o.scheduler, SchedulerKind::Heap);
        assert!(!o.apply_dfs_expansion);
        assert_eq!(o.graph_tolerance, 3);
        assert_eq!(o.lp_iteration_limit, 7);
        assert_eq!(o.lp_model, LpModelKind::UniformWidth);
        assert!(o.exact_milp);
        assert_eq!(o.milp_time_limit, Duration::from_secs(1));
    }
}
