/// Stable counting sort of `items` into `sorted` by `key`.
///
/// Every key must lie in `0..=max_key`. Items with equal keys keep their relative order,
/// which the multi-pass radix sorts in this crate depend on.
///
/// # Panics
///
/// Panics if `items` and `sorted` differ in length or if a key exceeds `max_key`.
pub fn counting_sort<T, F>(items: &[T], sorted: &mut [T], max_key: usize, key: F)
where
    T: Copy,
    F: Fn(T) -> usize,
{
    assert_eq!(items.len(), sorted.len());

    // Counts occurrences, shifted by one so the prefix sums give bucket heads.
    let mut heads = vec![0; max_key + 2];
    for &item in items {
        let k = key(item);
        assert!(k <= max_key, "key {} exceeds max_key {}", k, max_key);
        heads[k + 1] += 1;
    }

    for i in 2..heads.len() {
        heads[i] += heads[i - 1];
    }

    for &item in items {
        let k = key(item);
        sorted[heads[k]] = item;
        heads[k] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sort() {
        let items = [3usize, 1, 4, 1, 5, 9, 2, 6];
        let mut sorted = [0; 8];
        counting_sort(&items, &mut sorted, 9, |x| x);
        assert_eq!(sorted, [1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn test_counting_sort_stable_constant_key() {
        let items = [(7u8, 'a'), (2, 'b'), (9, 'c'), (2, 'd')];
        let mut sorted = [(0, ' '); 4];
        counting_sort(&items, &mut sorted, 0, |_| 0);
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_counting_sort_stable() {
        let items = [(1u8, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (2, 'e')];
        let mut sorted = [(0, ' '); 5];
        counting_sort(&items, &mut sorted, 2, |(k, _)| k as usize);
        assert_eq!(sorted, [(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (2, 'e')]);
    }

    #[test]
    fn test_counting_sort_radix_passes() {
        // Least significant digit first.
        let items = [21usize, 12, 11, 22, 10];
        let mut tmp = [0; 5];
        let mut sorted = [0; 5];
        counting_sort(&items, &mut tmp, 9, |x| x % 10);
        counting_sort(&tmp, &mut sorted, 9, |x| x / 10);
        assert_eq!(sorted, [10, 11, 12, 21, 22]);
    }

    #[test]
    fn test_counting_sort_empty() {
        let items: [usize; 0] = [];
        let mut sorted: [usize; 0] = [];
        counting_sort(&items, &mut sorted, 0, |x| x);
    }

    #[test]
    #[should_panic]
    fn test_counting_sort_key_out_of_range() {
        let items = [0usize, 3];
        let mut sorted = [0; 2];
        counting_sort(&items, &mut sorted, 2, |x| x);
    }
}
