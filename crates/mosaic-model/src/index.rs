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

/// A strongly typed index identifying a block within a [`crate::pool::BlockPool`].
///
/// The index is stable for the lifetime of one compute call: position `i`
/// always refers to the `i`-th input interval, regardless of how the
/// traversal order is permuted. Wrapping the `usize` keeps block
/// identities from being mixed up with room depths or LP column positions.
///
/// # Examples
///
/// ```rust
/// # use mosaic_model::index::BlockIndex;
///
/// let b = BlockIndex::new(3);
/// assert_eq!(b.get(), 3);
/// assert_eq!(format!("{}", b), "BlockIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockIndex(usize);

impl BlockIndex {
    /// Creates a new `BlockIndex`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for BlockIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockIndex({})", self.0)
    }
}

impl std::fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockIndex({})", self.0)
    }
}

impl From<usize> for BlockIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<BlockIndex> for usize {
    fn from(index: BlockIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let idx = BlockIndex::new(10);
        assert_eq!(idx.get(), 10);
    }

    #[test]
    fn test_conversions() {
        let idx: BlockIndex = 42.into();
        assert_eq!(idx.get(), 42);

        let val: usize = idx.into();
        assert_eq!(val, 42);
    }

    #[test]
    fn test_debug_and_display() {
        let idx = BlockIndex::new(7);
        assert_eq!(format!("{}", idx), "BlockIndex(7)");
        assert_eq!(format!("{:?}", idx), "BlockIndex(7)");
    }

    #[test]
    fn test_ordering() {
        assert!(BlockIndex::new(1) < BlockIndex::new(2));
        assert_eq!(BlockIndex::new(5), BlockIndex::new(5));
    }
}
