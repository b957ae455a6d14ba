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

//! # Mosaic Core
//!
//! Foundational primitives for the Mosaic calendar layout engine. This
//! crate consolidates the small, reusable building blocks that the model
//! and solver crates are built on.
//!
//! ## Modules
//!
//! - `math`: Half-open minute interval `[start, end)` primitives with
//!   validation, overlap queries, and the tolerance-aware clearance checks
//!   used by room assignment and conflict-graph construction.
//! - `num`: Floating-point edge comparison helpers. All "do these edges
//!   touch" decisions in the engine go through a single epsilon defined
//!   here.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod num;
