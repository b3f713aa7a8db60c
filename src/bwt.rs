use anyhow::{anyhow, ensure, Result};

use crate::index::{Index, Width};
use crate::skew;

/// Symbol forced onto the last position, unique after [`prepare`].
pub const SENTINEL: u8 = u8::MAX;

/// Replaces every [`SENTINEL`] byte with `SENTINEL - 1` and then forces the last byte to
/// [`SENTINEL`], so the text ends with its unique maximum.
pub fn prepare(text: &[u8]) -> Vec<u8> {
    let mut text: Vec<u8> = text
        .iter()
        .map(|&c| if c == SENTINEL { SENTINEL - 1 } else { c })
        .collect();
    if let Some(last) = text.last_mut() {
        *last = SENTINEL;
    }
    text
}

/// Computes the BWT of `text` after [`prepare`]-ing it.
///
/// # Panics
///
/// Panics if `text` is empty.
pub fn compute_bwt(text: &[u8]) -> Vec<u8> {
    assert!(!text.is_empty(), "text must not be empty.");
    let text = prepare(text);
    let bound = (text.len() + 1).max(SENTINEL as usize + 1);
    match Width::for_bound(bound) {
        Width::U16 => bwt_from_prepared::<u16>(&text),
        Width::U32 => bwt_from_prepared::<u32>(&text),
        Width::U64 => bwt_from_prepared::<u64>(&text),
    }
}

/// Reads off the cyclic predecessor of each suffix in sorted order.
fn bwt_from_prepared<T: Index>(text: &[u8]) -> Vec<u8> {
    let n = text.len();
    let symbols: Vec<T> = text.iter().map(|&c| T::from_usize(c as usize)).collect();
    let sa = skew::suffix_array(&symbols, T::from_usize(SENTINEL as usize));
    sa.iter()
        .map(|&p| text[(p.as_usize() + n - 1) % n])
        .collect()
}

/// Inverts a BWT produced by [`compute_bwt`], returning the prepared text.
///
/// The row of the original text is located by the unique [`SENTINEL`] byte.
pub fn decode_bwt(bwt: &[u8]) -> Result<Vec<u8>> {
    ensure!(!bwt.is_empty(), "bwt must not be empty.");

    let mut sentinels = bwt.iter().enumerate().filter(|&(_, &c)| c == SENTINEL);
    let (row, _) = sentinels
        .next()
        .ok_or_else(|| anyhow!("bwt must contain the sentinel byte {:#04x}.", SENTINEL))?;
    ensure!(
        sentinels.next().is_none(),
        "bwt must contain the sentinel byte {:#04x} exactly once.",
        SENTINEL
    );
    decode_bwt_from(bwt, row)
}

/// Inverts the BWT of a text, given the `row` of the text among its sorted rotations.
///
/// Unlike [`decode_bwt`], this needs no [`SENTINEL`] in `bwt`.
pub fn decode_bwt_from(bwt: &[u8], mut row: usize) -> Result<Vec<u8>> {
    ensure!(
        row < bwt.len(),
        "row {} is out of range for a bwt of length {}.",
        row,
        bwt.len()
    );

    // Number of occurrences of bwt[i] in bwt[..i].
    let mut counts = vec![0; 256];
    let mut occ = Vec::with_capacity(bwt.len());
    for &c in bwt {
        occ.push(counts[c as usize]);
        counts[c as usize] += 1;
    }

    // First row of each symbol in the sorted first column.
    let mut starts = vec![0; 256];
    for c in 1..256 {
        starts[c] = starts[c - 1] + counts[c - 1];
    }

    let mut text = vec![0; bwt.len()];
    for slot in text.iter_mut().rev() {
        let c = bwt[row];
        *slot = c;
        row = starts[c as usize] + occ[row];
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::collection::vec;
    use proptest::prelude::*;

    fn sorted(mut v: Vec<u8>) -> Vec<u8> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_prepare() {
        assert_eq!(prepare(&[255, 3, 255, 7]), vec![254, 3, 254, 255]);
        assert_eq!(prepare(&[0]), vec![255]);
    }

    #[test]
    fn test_compute_bwt_two_bytes() {
        assert_eq!(compute_bwt(&[5, 7]), vec![255, 5]);
    }

    #[test]
    fn test_compute_bwt_singleton() {
        assert_eq!(compute_bwt(&[42]), vec![255]);
    }

    #[test]
    fn test_compute_bwt_abacaba() {
        assert_eq!(compute_bwt(b"abacaba\xff"), b"\xffcbbaaaa".to_vec());
    }

    #[test]
    fn test_compute_bwt_remaps_sentinel() {
        let bwt = compute_bwt(&[255, 255, 255]);
        assert_eq!(sorted(bwt.clone()), vec![254, 254, 255]);
        assert_eq!(decode_bwt(&bwt).unwrap(), vec![254, 254, 255]);
    }

    #[test]
    #[should_panic]
    fn test_compute_bwt_empty() {
        compute_bwt(&[]);
    }

    #[test]
    fn test_decode_bwt_abacaba() {
        let text = decode_bwt(b"\xffcbbaaaa").unwrap();
        assert_eq!(text, b"abacaba\xff".to_vec());
    }

    #[test]
    fn test_decode_bwt_errors() {
        assert!(decode_bwt(&[]).is_err());
        assert!(decode_bwt(b"abc").is_err());
        assert!(decode_bwt(b"a\xff\xff").is_err());
    }

    #[test]
    fn test_decode_bwt_from_row() {
        // Rotation BWT of "abracadabra$"; the text is the rotation in row 3.
        let text = decode_bwt_from(b"ard$rcaaaabb", 3).unwrap();
        assert_eq!(text, b"abracadabra$".to_vec());
    }

    #[test]
    fn test_decode_bwt_from_errors() {
        assert!(decode_bwt_from(&[], 0).is_err());
        assert!(decode_bwt_from(b"ard$rcaaaabb", 12).is_err());
    }

    #[test]
    fn test_bwt_u32_width() {
        // Long enough to overflow u16 offsets.
        let text: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
        let bwt = compute_bwt(&text);
        assert_eq!(decode_bwt(&bwt).unwrap(), prepare(&text));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn test_bwt_is_permutation(text in vec(any::<u8>(), 1..300)) {
            let bwt = compute_bwt(&text);
            prop_assert_eq!(bwt.len(), text.len());
            prop_assert_eq!(sorted(bwt), sorted(prepare(&text)));
        }

        #[test]
        fn test_bwt_roundtrip_sentinel_heavy(text in vec(252u8..=255, 1..300)) {
            let bwt = compute_bwt(&text);
            prop_assert_eq!(decode_bwt(&bwt).unwrap(), prepare(&text));
        }

        #[test]
        fn test_bwt_roundtrip(text in vec(any::<u8>(), 1..300)) {
            let bwt = compute_bwt(&text);
            prop_assert_eq!(decode_bwt(&bwt).unwrap(), prepare(&text));
        }
    }
}
