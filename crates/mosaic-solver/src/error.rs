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

use good_lp::ResolutionError;
use mosaic_model::pool::PoolCapacityError;

/// The error type for a layout compute.
///
/// The LP and MILP models the engine builds are feasible by construction,
/// so a solver failure indicates a real defect and is surfaced rather
/// than masked. A MILP wall-clock timeout is not an error; the incumbent
/// solution is used.
#[derive(Debug)]
pub enum LayoutError {
    /// The block pool or layout could not grow to the requested size.
    Capacity(PoolCapacityError),
    /// The LP/MILP backend failed or reported the model unsolvable.
    Lp(ResolutionError),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capacity(e) => write!(f, "Capacity error: {e}"),
            Self::Lp(e) => write!(f, "LP solver error: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Capacity(e) => Some(e),
            Self::Lp(e) => Some(e),
        }
    }
}

impl From<PoolCapacityError> for LayoutError {
    fn from(e: PoolCapacityError) -> Self {
        Self::Capacity(e)
    }
}

impl From<ResolutionError> for LayoutError {
    fn from(e: ResolutionError) -> Self {
        Self::Lp(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_variant() {
        let err = LayoutError::from(ResolutionError::Infeasible);
        let text = format!("{}", err);
        assert!(text.contains("LP solver error"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;
        let err = LayoutError::from(ResolutionError::Unbounded);
        assert!(err.source().is_some());
    }
}
