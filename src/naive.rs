use std::cmp::Ordering;

use crate::index::Index;

/// Builds the suffix array by comparing suffixes directly, in O(n^2 log n) time.
///
/// A suffix that is a proper prefix of another sorts after it, i.e., the text is treated as
/// followed by symbols larger than any real one.
pub fn suffix_array<T: Index>(text: &[T]) -> Vec<T> {
    let mut sa: Vec<T> = (0..text.len()).map(T::from_usize).collect();
    sa.sort_by(|&a, &b| compare_suffixes(text, a.as_usize(), b.as_usize()));
    sa
}

/// Compares the suffixes of `text` starting at `a` and `b`, running off the end sorting last.
pub fn compare_suffixes<T: Ord>(text: &[T], a: usize, b: usize) -> Ordering {
    let (x, y) = (&text[a..], &text[b..]);
    x.iter()
        .zip(y)
        .map(|(c, d)| c.cmp(d))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| y.len().cmp(&x.len()))
}
