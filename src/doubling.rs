use log::trace;

use crate::counting_sort::counting_sort;
use crate::index::{self, Index};

/// Builds the suffix array of `text` by Karp-Miller-Rosenberg prefix doubling in O(n log n) time.
///
/// Produces the same order as [`crate::skew::suffix_array`], with offsets past the end of the
/// text reading larger than any rank.
///
/// # Panics
///
/// Panics under the same conditions as [`crate::skew::suffix_array`].
pub fn suffix_array<T: Index>(text: &[T], max_elem: T) -> Vec<T> {
    index::assert_text(text, max_elem);

    let n = text.len();
    let mut ranks = text.to_vec();
    let mut order: Vec<T> = (0..n).map(T::from_usize).collect();
    let mut tmp = vec![T::zero(); n];
    let mut max_rank = max_elem.as_usize();
    let mut h = 1;

    loop {
        let pad = max_rank + 1;
        let rank_at = |pos: usize| ranks.get(pos).map_or(pad, |&r| r.as_usize());
        let pair_at = |pos: T| {
            let pos = pos.as_usize();
            (rank_at(pos), rank_at(pos + h))
        };

        counting_sort(&order, &mut tmp, pad, |pos| pair_at(pos).1);
        counting_sort(&tmp, &mut order, pad, |pos| pair_at(pos).0);

        let mut next = vec![T::zero(); n];
        let mut rank = 0;
        for i in 0..n {
            if i != 0 && pair_at(order[i]) != pair_at(order[i - 1]) {
                rank += 1;
            }
            next[order[i].as_usize()] = T::from_usize(rank);
        }
        trace!("doubling: h={}, distinct ranks={}", h, rank + 1);

        ranks = next;
        if rank + 1 == n {
            break;
        }
        max_rank = rank;
        h *= 2;
    }
    order
}
