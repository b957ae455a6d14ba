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

/// Epsilon for comparing normalized horizontal edge positions.
///
/// Every "does this right edge touch that left edge" decision in the
/// layout pipeline uses this single epsilon, so that fixed-point
/// detection and LP write-backs agree on what counts as contact.
pub const EDGE_EPSILON: f64 = 1e-8;

/// Returns `true` if two normalized edge positions coincide within
/// [`EDGE_EPSILON`].
///
/// # Examples
///
/// ```rust
/// # use mosaic_core::num::constants::edges_touch;
///
/// assert!(edges_touch(0.25, 0.25 + 1e-12));
/// assert!(!edges_touch(0.25, 0.26));
/// ```
#[inline(always)]
pub fn edges_touch(a: f64, b: f64) -> bool {
    (a - b).abs() < EDGE_EPSILON
}
