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

use num_traits::{PrimInt, Signed};

/// A half-open minute interval `[start, end)` on a calendar timeline.
///
/// Start and end are minute offsets (typically minutes since midnight,
/// stored as `i16` by the layout engine). Besides plain overlap queries,
/// the type provides the tolerance-aware clearance checks that room
/// assignment and conflict-graph construction are built on. Tolerances
/// are signed: a positive tolerance lets nearly-adjacent intervals clear
/// each other, a negative one forces a visible gap.
///
/// # Invariants
/// `start` must always be less than or equal to `end`. Arithmetic with
/// tolerances assumes the offsets are small relative to the range of `T`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteInterval<T>
where
    T: PrimInt + Signed,
{
    start: T,
    end: T,
}

impl<T> MinuteInterval<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `MinuteInterval`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mosaic_core::math::interval::MinuteInterval;
    ///
    /// let iv = MinuteInterval::new(480, 660);
    /// assert_eq!(iv.duration(), 180);
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        assert!(
            start <= end,
            "Invalid interval: start must be less than or equal to end"
        );
        Self { start, end }
    }

    /// Creates a new `MinuteInterval` if the inputs are valid.
    ///
    /// Returns `None` if `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mosaic_core::math::interval::MinuteInterval;
    ///
    /// assert!(MinuteInterval::try_new(0, 30).is_some());
    /// assert!(MinuteInterval::try_new(30, 0).is_none());
    /// ```
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Creates a new `MinuteInterval` without checking invariants in release builds.
    ///
    /// # Safety
    ///
    /// The caller must ensure `start <= end`.
    /// This function contains a `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(start: T, end: T) -> Self {
        debug_assert!(
            start <= end,
            "Invalid interval: start must be less than or equal to end"
        );
        Self { start, end }
    }

    /// Returns the inclusive start bound of the interval.
    #[inline]
    pub const fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive end bound of the interval.
    #[inline]
    pub const fn end(&self) -> T {
        self.end
    }

    /// Returns the duration of the interval in minutes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mosaic_core::math::interval::MinuteInterval;
    ///
    /// let iv = MinuteInterval::new(540, 600);
    /// assert_eq!(iv.duration(), 60);
    /// ```
    #[inline]
    pub fn duration(&self) -> T {
        self.end - self.start
    }

    /// Returns `true` if this interval overlaps with `other`.
    ///
    /// Adjacent intervals do not overlap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mosaic_core::math::interval::MinuteInterval;
    ///
    /// let a = MinuteInterval::new(0, 60);
    /// let b = MinuteInterval::new(30, 90);
    /// assert!(a.intersects(b));
    ///
    /// let c = MinuteInterval::new(60, 120);
    /// assert!(!a.intersects(c));
    /// ```
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns `true` if this interval ends early enough for `next` to
    /// reuse its slot under the given signed tolerance.
    ///
    /// The check is `self.end <= next.start + tolerance`. A positive
    /// tolerance lets a slot be reused even though the intervals still
    /// overlap by up to `tolerance` minutes; a negative tolerance demands
    /// a gap of at least `-tolerance` minutes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mosaic_core::math::interval::MinuteInterval;
    ///
    /// let a = MinuteInterval::new(0, 60);
    /// let b = MinuteInterval::new(60, 120);
    /// assert!(a.clears(b, 0));
    /// assert!(!a.clears(b, -1));
    ///
    /// let c = MinuteInterval::new(55, 120);
    /// assert!(!a.clears(c, 0));
    /// assert!(a.clears(c, 5));
    /// ```
    #[inline]
    pub fn clears(&self, next: Self, tolerance: T) -> bool {
        self.end <= next.start + tolerance
    }

    /// Returns `true` if `later` still conflicts with this interval under
    /// the given signed tolerance.
    ///
    /// `later` is assumed to start at or after `self`. This is the
    /// negation of [`MinuteInterval::clears`] and drives conflict-graph
    /// edge creation: `later.start + tolerance < self.end`.
    #[inline]
    pub fn conflicts_with(&self, later: Self, tolerance: T) -> bool {
        later.start + tolerance < self.end
    }
}

impl<T> std::fmt::Debug for MinuteInterval<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<T> std::fmt::Display for MinuteInterval<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i16, end: i16) -> MinuteInterval<i16> {
        MinuteInterval::new(start, end)
    }

    #[test]
    fn test_construction_valid() {
        let a = iv(480, 660);
        assert_eq!(a.start(), 480);
        assert_eq!(a.end(), 660);
        assert_eq!(a.duration(), 180);
    }

    #[test]
    fn test_empty_interval_is_valid() {
        let a = iv(100, 100);
        assert_eq!(a.duration(), 0);
        assert!(!a.intersects(a));
    }

    #[test]
    #[should_panic(expected = "Invalid interval")]
    fn test_new_panics_on_inverted_bounds() {
        let _ = iv(660, 480);
    }

    #[test]
    fn test_try_new() {
        assert!(MinuteInterval::try_new(0i16, 10).is_some());
        assert!(MinuteInterval::try_new(10i16, 0).is_none());
    }

    #[test]
    fn test_intersects() {
        let a = iv(0, 60);
        assert!(a.intersects(iv(30, 90)));
        assert!(a.intersects(iv(0, 60)));
        assert!(a.intersects(iv(59, 61)));
        assert!(!a.intersects(iv(60, 120)));
        assert!(!a.intersects(iv(90, 120)));
    }

    #[test]
    fn test_clears_zero_tolerance() {
        let a = iv(0, 60);
        assert!(a.clears(iv(60, 120), 0));
        assert!(a.clears(iv(90, 120), 0));
        assert!(!a.clears(iv(59, 120), 0));
    }

    #[test]
    fn test_clears_positive_tolerance_allows_overlap() {
        let a = iv(0, 60);
        assert!(a.clears(iv(55, 120), 5));
        assert!(!a.clears(iv(54, 120), 5));
    }

    #[test]
    fn test_clears_negative_tolerance_demands_gap() {
        let a = iv(0, 60);
        assert!(!a.clears(iv(60, 120), -15));
        assert!(a.clears(iv(75, 120), -15));
    }

    #[test]
    fn test_conflicts_is_negation_of_clears() {
        let a = iv(0, 60);
        for start in [50i16, 55, 60, 65, 70] {
            let later = iv(start, 120);
            for tol in [-10i16, 0, 10] {
                assert_ne!(a.clears(later, tol), a.conflicts_with(later, tol));
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", iv(480, 660)), "[480, 660)");
    }
}
