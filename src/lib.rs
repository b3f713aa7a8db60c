//! Suffix array and Burrows-Wheeler transform construction.
//!
//! The suffix array is built by the linear-time Skew (DC3) algorithm of Kärkkäinen and Sanders.
//! Offsets past the end of the text read as a padding symbol *larger* than any real symbol,
//! so a suffix sorts after every longer suffix it is a prefix of.
//!
//! # Examples
//!
//! ```
//! use skew_bwt::{build_suffix_array, compute_bwt, decode_bwt};
//!
//! let sa = build_suffix_array(&[1u32, 0], 1);
//! assert_eq!(sa, vec![1, 0]);
//!
//! let bwt = compute_bwt(b"abacaba\xff");
//! assert_eq!(bwt, b"\xffcbbaaaa");
//! assert_eq!(decode_bwt(&bwt).unwrap(), b"abacaba\xff");
//! ```
//!
//! [`SuffixArrayBuilder`] and [`BwtBuilder`] validate their input and pick the narrowest
//! integer width for the run.
pub mod bwt;
pub mod counting_sort;
pub mod doubling;
pub mod index;
pub mod naive;
pub mod skew;

use std::io::Write;

use anyhow::{anyhow, ensure, Result};
use log::{log, log_enabled, Level};

pub use bwt::{compute_bwt, decode_bwt, decode_bwt_from};
pub use counting_sort::counting_sort;
pub use index::{Index, Width};

/// Builds the suffix array of `text` whose symbols are at most `max_elem`.
///
/// Equivalent to [`skew::suffix_array`].
pub fn build_suffix_array<T: Index>(text: &[T], max_elem: T) -> Vec<T> {
    skew::suffix_array(text, max_elem)
}

/// Suffix array construction algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Skew (DC3), linear time.
    #[default]
    Skew,
    /// Prefix doubling, O(n log n) time.
    Doubling,
    /// Direct suffix comparison, O(n^2 log n) time.
    Naive,
}

/// Largest `max_elem` run without alphabet compaction, unless the text is longer.
pub const MAX_RAW_ALPHABET: usize = 1 << 20;

/// Builder of the suffix array of a text over `usize` symbols.
pub struct SuffixArrayBuilder<'a> {
    text: &'a [usize],
    max_elem: usize,
    // `None` compacts only when the alphabet is too wide to bucket directly.
    compact_alphabet: Option<bool>,
    algorithm: Algorithm,
    verbose: bool,
}

impl<'a> SuffixArrayBuilder<'a> {
    pub fn new(text: &'a [usize]) -> Result<Self> {
        let max_elem = text
            .iter()
            .copied()
            .max()
            .ok_or_else(|| anyhow!("text must not be empty."))?;
        Ok(Self {
            text,
            max_elem,
            compact_alphabet: None,
            algorithm: Algorithm::default(),
            verbose: false,
        })
    }

    /// Sets the declared maximum symbol, defaulting to the largest symbol in the text.
    pub fn max_elem(mut self, max_elem: usize) -> Result<Self> {
        let actual = self.text.iter().copied().max().unwrap_or(0);
        ensure!(
            actual <= max_elem,
            "max_elem must be at least the largest symbol {}.",
            actual
        );
        ensure!(
            max_elem.checked_add(2).is_some(),
            "max_elem must be less than usize::MAX - 1."
        );
        self.max_elem = max_elem;
        Ok(self)
    }

    /// Remaps symbols to their ranks among the distinct symbols before construction.
    ///
    /// By default, the alphabet is compacted only if `max_elem` exceeds both the text length
    /// and [`MAX_RAW_ALPHABET`].
    pub fn compact_alphabet(mut self, yes: bool) -> Self {
        self.compact_alphabet = Some(yes);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(&self) -> Result<Vec<usize>> {
        let level = progress_level(self.verbose);
        let raw_limit = self.text.len().max(MAX_RAW_ALPHABET);
        let compact = self
            .compact_alphabet
            .unwrap_or(self.max_elem > raw_limit);
        let (text, max_elem) = if compact {
            compact_alphabet(self.text)
        } else {
            ensure!(
                self.max_elem <= raw_limit,
                "max_elem {} is too large without alphabet compaction; at most {} is allowed.",
                self.max_elem,
                raw_limit
            );
            (self.text.to_vec(), self.max_elem)
        };

        let bound = (text.len() + 1).max(max_elem + 1);
        let width = Width::for_bound(bound);
        log!(level, "Text length: {}", text.len());
        log!(level, "Alphabet size: {}", max_elem + 1);
        log!(level, "Algorithm: {:?}, width: {:?}", self.algorithm, width);

        let sa = match width {
            Width::U16 => self.run::<u16>(&text, max_elem),
            Width::U32 => self.run::<u32>(&text, max_elem),
            Width::U64 => self.run::<u64>(&text, max_elem),
        };
        log!(level, "Done.");
        Ok(sa)
    }

    fn run<T: Index>(&self, text: &[usize], max_elem: usize) -> Vec<usize> {
        let text: Vec<T> = text.iter().map(|&c| T::from_usize(c)).collect();
        let max_elem = T::from_usize(max_elem);
        let sa = match self.algorithm {
            Algorithm::Skew => skew::suffix_array(&text, max_elem),
            Algorithm::Doubling => doubling::suffix_array(&text, max_elem),
            Algorithm::Naive => naive::suffix_array(&text),
        };
        sa.into_iter().map(T::as_usize).collect()
    }
}

/// Maps each symbol to its rank among the distinct symbols of `text`.
///
/// Returns the mapped text and its largest symbol.
fn compact_alphabet(text: &[usize]) -> (Vec<usize>, usize) {
    let mut alphabet = text.to_vec();
    alphabet.sort_unstable();
    alphabet.dedup();
    // Every symbol of `text` is in `alphabet`.
    let mapped = text
        .iter()
        .map(|c| match alphabet.binary_search(c) {
            Ok(rank) => rank,
            Err(_) => unreachable!("symbol {} missing from the alphabet", c),
        })
        .collect();
    (mapped, alphabet.len().saturating_sub(1))
}

/// Builder of the BWT of a byte text.
pub struct BwtBuilder<'a> {
    text: &'a [u8],
    verbose: bool,
}

impl<'a> BwtBuilder<'a> {
    pub fn new(text: &'a [u8]) -> Result<Self> {
        if text.is_empty() {
            return Err(anyhow!("text must not be empty."));
        }
        Ok(Self {
            text,
            verbose: false,
        })
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Writes the BWT of the text into `wtr`.
    pub fn build<W: Write>(&self, mut wtr: W) -> Result<()> {
        let level = progress_level(self.verbose);
        log!(level, "Text length: {:.3} MiB", to_mib(self.text.len()));
        if log_enabled!(level) {
            let n_sentinels = self.text.iter().filter(|&&c| c == bwt::SENTINEL).count();
            if n_sentinels != 0 {
                log!(
                    level,
                    "Remapping {} occurrences of {:#04x}",
                    n_sentinels,
                    bwt::SENTINEL
                );
            }
        }

        log!(level, "Generating BWT...");
        let bwt = compute_bwt(self.text);
        wtr.write_all(&bwt)?;
        wtr.flush()?;
        log!(level, "Done.");
        Ok(())
    }
}

fn progress_level(verbose: bool) -> Level {
    if verbose {
        Level::Info
    } else {
        Level::Debug
    }
}

fn to_mib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_array_builder() {
        let text: Vec<usize> = b"abracadabra$".iter().map(|&c| c as usize).collect();
        let sa = SuffixArrayBuilder::new(&text).unwrap().build().unwrap();
        assert_eq!(sa, vec![11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
    }

    #[test]
    fn test_suffix_array_builder_algorithms() {
        let text: Vec<usize> = b"mississippi".iter().map(|&c| c as usize).collect();
        let skew = SuffixArrayBuilder::new(&text).unwrap().build().unwrap();
        for algorithm in [Algorithm::Doubling, Algorithm::Naive] {
            let sa = SuffixArrayBuilder::new(&text)
                .unwrap()
                .algorithm(algorithm)
                .build()
                .unwrap();
            assert_eq!(sa, skew);
        }
    }

    #[test]
    fn test_suffix_array_builder_compact_alphabet() {
        let text = [1_000_000, 7, 1_000_000, 42, 1_000_000, 7, 1_000_000];
        let sa = SuffixArrayBuilder::new(&text)
            .unwrap()
            .compact_alphabet(true)
            .build()
            .unwrap();
        assert_eq!(sa, vec![1, 5, 3, 0, 4, 2, 6]);
        assert_eq!(sa, naive::suffix_array(&text));
    }

    #[test]
    fn test_suffix_array_builder_wide_symbols() {
        // Symbols alone force a u32 run.
        let text = [70_000, 3, 70_000];
        let sa = SuffixArrayBuilder::new(&text).unwrap().build().unwrap();
        assert_eq!(sa, vec![1, 0, 2]);
    }

    #[test]
    fn test_suffix_array_builder_sparse_wide_alphabet() {
        let text = [1 << 30, 3, 1 << 30, usize::MAX - 1];
        let sa = SuffixArrayBuilder::new(&text).unwrap().build().unwrap();
        assert_eq!(sa, vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_suffix_array_builder_wide_alphabet_without_compaction() {
        let text = [1 << 30, 3, 1 << 30];
        let builder = SuffixArrayBuilder::new(&text)
            .unwrap()
            .compact_alphabet(false);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_suffix_array_builder_max_elem_overflow() {
        let text = [0, 1, 0];
        assert!(SuffixArrayBuilder::new(&text)
            .unwrap()
            .max_elem(usize::MAX - 1)
            .is_err());
        let sa = SuffixArrayBuilder::new(&text)
            .unwrap()
            .max_elem(usize::MAX - 2)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(sa, vec![0, 2, 1]);
    }

    #[test]
    fn test_suffix_array_builder_max_elem() {
        let text = [2, 0, 1];
        let sa = SuffixArrayBuilder::new(&text)
            .unwrap()
            .max_elem(10)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(sa, vec![1, 2, 0]);
        assert!(SuffixArrayBuilder::new(&text).unwrap().max_elem(1).is_err());
    }

    #[test]
    fn test_suffix_array_builder_empty() {
        assert!(SuffixArrayBuilder::new(&[]).is_err());
    }

    #[test]
    fn test_compact_alphabet() {
        let (text, max_elem) = compact_alphabet(&[30, 10, 20, 10]);
        assert_eq!(text, vec![2, 0, 1, 0]);
        assert_eq!(max_elem, 2);
    }

    #[test]
    fn test_bwt_builder() {
        let text = "abacaba\u{7f}";
        let mut bwt = vec![];
        BwtBuilder::new(text.as_bytes())
            .unwrap()
            .verbose(true)
            .build(&mut bwt)
            .unwrap();
        assert_eq!(bwt, compute_bwt(text.as_bytes()));
        assert_eq!(decode_bwt(&bwt).unwrap(), b"abacaba\xff");
    }

    #[test]
    fn test_bwt_builder_empty() {
        assert!(BwtBuilder::new(&[]).is_err());
    }
}
