use std::fmt::{Debug, Formatter};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size bit array backed by 64-bit words.
///
/// Bits beyond `len` in the last word are don't-care: every query masks them out.
#[derive(Clone)]
pub struct DenseBitVec {
    words: Vec<u64>,
    len: usize,
}

impl DenseBitVec {
    /// Creates a bit vector of `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; (len + WORD_BITS - 1) / WORD_BITS],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl DenseBitVec {
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit {} out of range {}", i, self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 != 0
    }

    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit {} out of range {}", i, self.len);
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    pub fn unset(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit {} out of range {}", i, self.len);
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
    }

    pub fn assign(&mut self, i: usize, value: bool) {
        if value {
            self.set(i)
        } else {
            self.unset(i)
        }
    }

    /// Sets `len` bits starting at `start`.
    pub fn set_range(&mut self, start: usize, len: usize) {
        self.update_range(start, len, |word, mask| *word |= mask);
    }

    /// Unsets `len` bits starting at `start`.
    pub fn unset_range(&mut self, start: usize, len: usize) {
        self.update_range(start, len, |word, mask| *word &= !mask);
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    pub fn fill(&mut self) {
        self.words.fill(u64::MAX);
    }

    fn update_range<F>(&mut self, start: usize, len: usize, mut f: F)
    where
        F: FnMut(&mut u64, u64),
    {
        assert!(start + len <= self.len, "range {}+{} out of range {}", start, len, self.len);
        if len == 0 {
            return;
        }
        let end = start + len;
        let first = start / WORD_BITS;
        let last = (end - 1) / WORD_BITS;
        for w in first..=last {
            let lo = if w == first { start % WORD_BITS } else { 0 };
            let hi = if w == last { (end - 1) % WORD_BITS + 1 } else { WORD_BITS };
            f(&mut self.words[w], mask_between(lo, hi));
        }
    }
}

impl DenseBitVec {
    /// Index of the lowest set bit, or `None` if all bits are unset.
    pub fn leftmost_set(&self) -> Option<usize> {
        self.leftmost_by(|word| word)
    }

    /// Index of the lowest unset bit, or `None` if all bits are set.
    pub fn leftmost_unset(&self) -> Option<usize> {
        self.leftmost_by(|word| !word)
    }

    pub fn count_ones(&self) -> usize {
        (0..self.words.len()).map(|w| self.masked_word(w).count_ones() as usize).sum()
    }

    fn leftmost_by<F>(&self, f: F) -> Option<usize>
    where
        F: Fn(u64) -> u64,
    {
        (0..self.words.len()).find_map(|w| {
            let word = f(self.words[w]) & self.valid_mask(w);
            if word != 0 {
                Some(w * WORD_BITS + word.trailing_zeros() as usize)
            } else {
                None
            }
        })
    }

    fn valid_mask(&self, w: usize) -> u64 {
        if w + 1 == self.words.len() && self.len % WORD_BITS != 0 {
            mask_between(0, self.len % WORD_BITS)
        } else {
            u64::MAX
        }
    }

    fn masked_word(&self, w: usize) -> u64 {
        self.words[w] & self.valid_mask(w)
    }
}

/// Mask with bits `lo..hi` set, `lo < 64`, `hi <= 64`.
fn mask_between(lo: usize, hi: usize) -> u64 {
    let upper = if hi == WORD_BITS { u64::MAX } else { (1 << hi) - 1 };
    upper & !((1 << lo) - 1)
}

impl PartialEq for DenseBitVec {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.words.len()).all(|w| self.masked_word(w) == other.masked_word(w))
    }
}

impl Eq for DenseBitVec {}

impl Debug for DenseBitVec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.len).map(|i| if self.get(i) { '1' } else { '0' }).collect();
        write!(f, "DenseBitVec({})", bits)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_new_is_unset() {
        let bv = DenseBitVec::new(130);
        assert_eq!(bv.len(), 130);
        assert_eq!(bv.leftmost_set(), None);
        assert_eq!(bv.leftmost_unset(), Some(0));
        assert_eq!(bv.count_ones(), 0);
    }

    #[test]
    fn test_empty() {
        let mut bv = DenseBitVec::new(0);
        assert!(bv.is_empty());
        assert_eq!(bv.leftmost_set(), None);
        assert_eq!(bv.leftmost_unset(), None);
        bv.set_range(0, 0);
        assert_eq!(bv, DenseBitVec::new(0));
    }

    #[test]
    fn test_get_set_unset() {
        let mut bv = DenseBitVec::new(100);
        bv.set(3);
        bv.set(64);
        bv.set(99);
        assert!(bv.get(3));
        assert!(bv.get(64));
        assert!(bv.get(99));
        assert!(!bv.get(4));
        assert_eq!(bv.leftmost_set(), Some(3));
        bv.unset(3);
        assert_eq!(bv.leftmost_set(), Some(64));
        bv.assign(64, false);
        bv.assign(65, true);
        assert_eq!(bv.leftmost_set(), Some(65));
        assert_eq!(bv.count_ones(), 2);
    }

    #[test]
    fn test_leftmost_unset_ignores_trailing_bits() {
        let mut bv = DenseBitVec::new(70);
        bv.set_range(0, 70);
        assert_eq!(bv.leftmost_unset(), None);
        bv.unset(69);
        assert_eq!(bv.leftmost_unset(), Some(69));

        let mut full = DenseBitVec::new(64);
        full.fill();
        assert_eq!(full.leftmost_unset(), None);
        assert_eq!(full.count_ones(), 64);
    }

    #[test]
    fn test_fill_does_not_leak_past_len() {
        let mut bv = DenseBitVec::new(5);
        bv.fill();
        assert_eq!(bv.count_ones(), 5);
        assert_eq!(bv.leftmost_unset(), None);
        bv.clear();
        assert_eq!(bv.leftmost_set(), None);
    }

    #[test]
    fn test_ranges_across_words() {
        let mut bv = DenseBitVec::new(200);
        bv.set_range(60, 80);
        assert_eq!(bv.leftmost_set(), Some(60));
        assert_eq!(bv.count_ones(), 80);
        assert!(bv.get(139));
        assert!(!bv.get(140));
        bv.unset_range(61, 70);
        assert!(bv.get(60));
        assert!(!bv.get(61));
        assert!(!bv.get(130));
        assert!(bv.get(131));
        assert_eq!(bv.count_ones(), 10);
    }

    #[test]
    fn test_range_within_single_word() {
        let mut bv = DenseBitVec::new(64);
        bv.set_range(5, 3);
        assert_eq!(bv.count_ones(), 3);
        assert_eq!(bv.leftmost_set(), Some(5));
        bv.set_range(0, 64);
        bv.unset_range(10, 1);
        assert_eq!(bv.leftmost_unset(), Some(10));
    }

    #[test]
    fn test_eq_ignores_trailing_bits() {
        let mut a = DenseBitVec::new(10);
        let mut b = DenseBitVec::new(10);
        a.fill();
        b.set_range(0, 10);
        assert_eq!(a, b);
        b.unset(9);
        assert_ne!(a, b);
        assert_ne!(DenseBitVec::new(10), DenseBitVec::new(11));
    }

    #[test]
    fn test_debug() {
        let mut bv = DenseBitVec::new(4);
        bv.set(1);
        assert_eq!(format!("{:?}", bv), "DenseBitVec(0100)");
    }

    #[quickcheck]
    fn range_ops_match_vec_model(ops: Vec<(bool, u8, u8)>) -> bool {
        const LEN: usize = 150;
        let mut bv = DenseBitVec::new(LEN);
        let mut model = vec![false; LEN];
        for (value, start, len) in ops {
            let start = start as usize % LEN;
            let len = len as usize % (LEN - start + 1);
            if value {
                bv.set_range(start, len);
            } else {
                bv.unset_range(start, len);
            }
            model[start..start + len].fill(value);
        }
        bv.leftmost_set() == model.iter().position(|&b| b)
            && bv.leftmost_unset() == model.iter().position(|&b| !b)
            && bv.count_ones() == model.iter().filter(|&&b| b).count()
            && (0..LEN).all(|i| bv.get(i) == model[i])
    }
}
