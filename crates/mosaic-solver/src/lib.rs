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

//! # Mosaic Solver
//!
//! The layout pipeline of the Mosaic calendar engine. Given N minute
//! intervals, the pipeline assigns each block a normalized `left`/`width`
//! pair in `[0, 1]` so that time-overlapping blocks never collide
//! horizontally while wasted width is kept low.
//!
//! ## Pipeline
//!
//! 1. **`rooms`**: interval scheduling assigns every block a room depth;
//!    the room count equals the maximum simultaneous overlap.
//! 2. **`graph`**: overlapping blocks are wired into a directed "left-of"
//!    conflict graph, which is then condensed to its non-dominated edges.
//! 3. **`expand`**: a DFS over the condensed graph stretches blocks to
//!    `width = 1 / path_depth`, and fixed-point detection marks blocks
//!    whose geometry can no longer improve.
//! 4. **`lp`**: per connected component of unfixed blocks, an LP
//!    relaxation widens the remaining blocks; the loop in **`engine`**
//!    alternates solving and fixed-point detection until the fixed count
//!    stops growing.
//! 5. **`milp`**: optionally, one exact MILP over all blocks replaces
//!    steps 2 through 4.
//!
//! [`engine::LayoutEngine`] owns the working memory and orchestrates the
//! stages; [`stats::LayoutStatistics`] reports what a compute did.

pub mod engine;
pub mod error;
pub mod expand;
pub mod graph;
pub mod lp;
pub mod milp;
pub mod rooms;
pub mod stats;
