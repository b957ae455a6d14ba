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

use crate::{
    index::BlockIndex,
    pool::{BlockPool, PoolCapacityError},
};

/// The final geometry produced by one compute call.
///
/// This struct uses a Structure of Arrays (SoA) layout: position `i`
/// holds the normalized left edge and width of the `i`-th input interval.
/// Alongside the geometry it carries the two width aggregates the engine
/// reports, the sum and the sum of squares of `width * 100` over all
/// blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    lefts: Vec<f64>,
    widths: Vec<f64>,
    sum: f64,
    sum_sq: f64,
}

impl Layout {
    /// Creates an empty layout.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of blocks in this layout.
    #[inline]
    pub fn len(&self) -> usize {
        self.lefts.len()
    }

    /// Returns `true` if the layout holds no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lefts.is_empty()
    }

    /// Returns the normalized left edge of a specific block.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn left(&self, index: BlockIndex) -> f64 {
        debug_assert!(
            index.get() < self.len(),
            "called `Layout::left` with block index out of bounds: the len is {} but the index is {}",
            self.len(),
            index.get()
        );

        self.lefts[index.get()]
    }

    /// Returns the normalized width of a specific block.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn width(&self, index: BlockIndex) -> f64 {
        debug_assert!(
            index.get() < self.len(),
            "called `Layout::width` with block index out of bounds: the len is {} but the index is {}",
            self.len(),
            index.get()
        );

        self.widths[index.get()]
    }

    /// Returns a slice of all left edges.
    #[inline]
    pub fn lefts(&self) -> &[f64] {
        &self.lefts
    }

    /// Returns a slice of all widths.
    #[inline]
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Returns the sum of `width * 100` over all blocks.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the sum of squared `width * 100` over all blocks.
    #[inline]
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Empties the layout.
    pub fn clear(&mut self) {
        self.lefts.clear();
        self.widths.clear();
        self.sum = 0.0;
        self.sum_sq = 0.0;
    }

    /// Copies the geometry out of a pool and recomputes the aggregates.
    pub fn store(&mut self, pool: &BlockPool) -> Result<(), PoolCapacityError> {
        let n = pool.len();

        self.clear();
        if n > self.lefts.capacity() {
            let additional = n - self.lefts.capacity();
            self.lefts
                .try_reserve(additional)
                .map_err(|source| PoolCapacityError {
                    requested: n,
                    source,
                })?;
        }
        if n > self.widths.capacity() {
            let additional = n - self.widths.capacity();
            self.widths
                .try_reserve(additional)
                .map_err(|source| PoolCapacityError {
                    requested: n,
                    source,
                })?;
        }

        for i in 0..n {
            let block = pool.block(BlockIndex::new(i));
            self.lefts.push(block.left);
            self.widths.push(block.width);

            let scaled = block.width * 100.0;
            self.sum += scaled;
            self.sum_sq += scaled * scaled;
        }

        Ok(())
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Layout Summary")?;
        writeln!(f, "   Width sum:    {:.4}", self.sum)?;
        writeln!(f, "   Width sum sq: {:.4}", self.sum_sq)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No blocks)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10} | {:<10}", "Block", "Left", "Width")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<10}", "", "", "")?;
        for i in 0..self.len() {
            writeln!(
                f,
                "   {:<10} | {:<10.4} | {:<10.4}",
                i, self.lefts[i], self.widths[i]
            )?;
        }

        Ok(())
    }
}
