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

/// Statistics collected during one layout compute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutStatistics {
    /// Number of input blocks.
    pub blocks: usize,
    /// Minimal room count found by interval scheduling.
    pub total_rooms: usize,
    /// Blocks whose geometry was final when the compute ended.
    pub fixed_blocks: usize,
    /// LP models solved across all iterations (one per component per pass).
    pub lp_models_solved: u64,
    /// LP relaxation passes run.
    pub lp_iterations: u64,
    /// Whether the exact MILP path was taken.
    pub milp_used: bool,
    /// Total time spent in the compute.
    pub time_total: Duration,
}

impl LayoutStatistics {
    #[inline]
    pub fn on_lp_model_solved(&mut self) {
        self.lp_models_solved = self.lp_models_solved.saturating_add(1);
    }

    #[inline]
    pub fn on_lp_iteration(&mut self) {
        self.lp_iterations = self.lp_iterations.saturating_add(1);
    }

    #[inline]
    pub fn set_blocks(&mut self, blocks: usize) {
        self.blocks = blocks;
    }

    #[inline]
    pub fn set_total_rooms(&mut self, rooms: usize) {
        self.total_rooms = rooms;
    }

    #[inline]
    pub fn set_fixed_blocks(&mut self, fixed: usize) {
        self.fixed_blocks = fixed;
    }

    #[inline]
    pub fn set_milp_used(&mut self, used: bool) {
        self.milp_used = used;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for LayoutStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mosaic Layout Statistics:")?;
        writeln!(f, "  Blocks:           {}", self.blocks)?;
        writeln!(f, "  Total rooms:      {}", self.total_rooms)?;
        writeln!(f, "  Fixed blocks:     {}", self.fixed_blocks)?;
        writeln!(f, "  LP models solved: {}", self.lp_models_solved)?;
        writeln!(f, "  LP iterations:    {}", self.lp_iterations)?;
        writeln!(f, "  MILP used:        {}", self.milp_used)?;
        writeln!(f, "  Total time:       {:.2?}", self.time_total)?;
        Ok(())
    }
}
