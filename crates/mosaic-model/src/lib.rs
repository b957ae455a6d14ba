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

//! # Mosaic Model
//!
//! **The domain model for the Mosaic calendar layout engine.**
//!
//! This crate defines the data structures shared between the engine's
//! input side (time intervals and options) and its solving side
//! (`mosaic_solver`).
//!
//! ## Architecture
//!
//! * **`index`**: A strongly-typed `BlockIndex` to keep block identities
//!   from being confused with room depths or LP column positions.
//! * **`options`**: `LayoutOptions`, the full configuration surface of the
//!   engine (tolerances, scheduler and LP model selection, iteration and
//!   time limits).
//! * **`block`**: The per-block working record carrying the interval, the
//!   assigned room depth, the evolving geometry, and the conflict-graph
//!   adjacency.
//! * **`pool`**: `BlockPool`, a grow-never-shrink arena that owns every
//!   block plus the sorted order, the left-of adjacency matrix, and
//!   scratch storage. Capacity persists across computes so steady-state
//!   runs allocate nothing.
//! * **`layout`**: The output: per-block `left`/`width` in Structure of
//!   Arrays (SoA) form plus the width aggregates.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Block identities are a distinct index type.
//! 2.  **Memory Reuse**: The pool only ever grows to the high-water block
//!     count; resetting for a new compute touches no allocator in the
//!     steady state, and growth failures are reported instead of aborting.
//! 3.  **Fail-Fast**: Constructors and accessors validate eagerly so the
//!     solver never sees an inconsistent pool.

pub mod block;
pub mod index;
pub mod layout;
pub mod options;
pub mod pool;
