use std::cmp::Ordering;

use log::trace;

use crate::counting_sort::counting_sort;
use crate::index::{self, Index};

/// Builds the suffix array of `text` with the Skew (DC3) algorithm in linear time.
///
/// Every symbol must be at most `max_elem`. Offsets past the end of the text read as the
/// padding symbol `max_elem + 1`, so a suffix sorts after every longer suffix it prefixes.
///
/// # Panics
///
/// Panics if `text` is empty, if a symbol exceeds `max_elem`, or if `T` cannot represent
/// the text length or the padding symbol.
pub fn suffix_array<T: Index>(text: &[T], max_elem: T) -> Vec<T> {
    index::assert_text(text, max_elem);
    SkewSorter::sort(text, max_elem.as_usize())
}

struct SkewSorter<'a, T> {
    text: &'a [T],
    max_elem: usize,
    // Ranks of offsets not divisible by three; offsets divisible by three are never read.
    ranks: Vec<T>,
    // Upper sentinel returned for ranks past the end.
    dollar_rank: usize,
}

impl<'a, T: Index> SkewSorter<'a, T> {
    fn sort(text: &'a [T], max_elem: usize) -> Vec<T> {
        trace!("skew: n={}, max_elem={}", text.len(), max_elem);
        let mut sorter = Self {
            text,
            max_elem,
            ranks: vec![T::zero(); text.len()],
            dollar_rank: 0,
        };
        let rem12 = sorter.sort_rem12();
        let rem0 = sorter.sort_rem0();
        sorter.merge(&rem0, &rem12)
    }

    #[inline]
    fn symbol(&self, pos: usize) -> usize {
        self.text
            .get(pos)
            .map_or(self.max_elem + 1, |&c| c.as_usize())
    }

    #[inline]
    fn rank(&self, pos: usize) -> usize {
        self.ranks
            .get(pos)
            .map_or(self.dollar_rank, |&r| r.as_usize())
    }

    #[inline]
    fn window(&self, pos: usize) -> [usize; 3] {
        [self.symbol(pos), self.symbol(pos + 1), self.symbol(pos + 2)]
    }

    /// Sorts offsets of residues 1 and 2 and fixes their ranks to a total order.
    fn sort_rem12(&mut self) -> Vec<T> {
        let n = self.text.len();
        let mut rem12: Vec<T> = (1..n)
            .step_by(3)
            .chain((2..n).step_by(3))
            .map(T::from_usize)
            .collect();

        // Radix sort by the first three symbols.
        let mut tmp = vec![T::zero(); rem12.len()];
        for col in (0..3).rev() {
            counting_sort(&rem12, &mut tmp, self.max_elem + 1, |pos| {
                self.symbol(pos.as_usize() + col)
            });
            std::mem::swap(&mut rem12, &mut tmp);
        }

        let mut rank = 0;
        for i in 0..rem12.len() {
            let pos = rem12[i].as_usize();
            if i != 0 && self.window(pos) != self.window(rem12[i - 1].as_usize()) {
                rank += 1;
            }
            self.ranks[pos] = T::from_usize(rank);
        }
        self.dollar_rank = rank + 1;

        if self.dollar_rank < rem12.len() {
            self.resolve_ties(&mut rem12);
        }
        rem12
    }

    /// Orders tied offsets by recursing on the text of their ranks.
    fn resolve_ties(&mut self, rem12: &mut [T]) {
        let n = self.text.len();

        // Class-1 ranks, a separator larger than any rank, then class-2 ranks.
        let mut symbols = Vec::with_capacity(rem12.len() + 1);
        symbols.extend((1..n).step_by(3).map(|pos| self.ranks[pos]));
        let sep = symbols.len();
        symbols.push(T::from_usize(self.dollar_rank));
        symbols.extend((2..n).step_by(3).map(|pos| self.ranks[pos]));

        let order = SkewSorter::sort(&symbols, self.dollar_rank);

        // The separator is the unique largest symbol, so it is ranked last.
        let positions = order.iter().filter_map(|&p| {
            let p = p.as_usize();
            match p.cmp(&sep) {
                Ordering::Less => Some(1 + p * 3),
                Ordering::Greater => Some(2 + (p - sep - 1) * 3),
                Ordering::Equal => None,
            }
        });
        for (rank, pos) in positions.enumerate() {
            rem12[rank] = T::from_usize(pos);
            self.ranks[pos] = T::from_usize(rank);
        }
        self.dollar_rank = rem12.len();
    }

    /// Sorts offsets of residue 0 by (symbol, rank of the next offset).
    fn sort_rem0(&self) -> Vec<T> {
        let n = self.text.len();
        let mut rem0: Vec<T> = (0..n).step_by(3).map(T::from_usize).collect();
        let mut tmp = vec![T::zero(); rem0.len()];
        counting_sort(&rem0, &mut tmp, self.dollar_rank, |pos| {
            self.rank(pos.as_usize() + 1)
        });
        counting_sort(&tmp, &mut rem0, self.max_elem, |pos| {
            self.symbol(pos.as_usize())
        });
        rem0
    }

    fn merge(&self, rem0: &[T], rem12: &[T]) -> Vec<T> {
        let mut sa = Vec::with_capacity(self.text.len());
        let (mut i, mut j) = (0, 0);
        while i < rem0.len() && j < rem12.len() {
            if self.rem0_first(rem0[i].as_usize(), rem12[j].as_usize()) {
                sa.push(rem0[i]);
                i += 1;
            } else {
                sa.push(rem12[j]);
                j += 1;
            }
        }
        sa.extend_from_slice(&rem0[i..]);
        sa.extend_from_slice(&rem12[j..]);
        sa
    }

    /// Ties go to the residue-0 offset.
    #[inline]
    fn rem0_first(&self, p0: usize, p12: usize) -> bool {
        if p12 % 3 == 1 {
            (self.symbol(p0), self.rank(p0 + 1)) <= (self.symbol(p12), self.rank(p12 + 1))
        } else {
            (self.symbol(p0), self.symbol(p0 + 1), self.rank(p0 + 2))
                <= (self.symbol(p12), self.symbol(p12 + 1), self.rank(p12 + 2))
        }
    }
}
