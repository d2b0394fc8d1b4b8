use alloc::vec;
use alloc::vec::Vec;

pub struct BitPack;

impl BitPack {
    /// Number of u64 words needed to hold `bits` bits.
    #[inline(always)]
    pub fn words_for(bits: usize) -> usize {
        bits.div_ceil(64)
    }

    /// Allocates a zeroed word vector large enough for `bits` bits.
    pub fn zeroed(bits: usize) -> Vec<u64> {
        vec![0; Self::words_for(bits)]
    }

    #[inline(always)]
    pub fn get(storage: &[u64], index: usize) -> bool {
        (storage[index / 64] >> (index % 64)) & 1 == 1
    }

    #[inline(always)]
    pub fn set(storage: &mut [u64], index: usize, val: bool) {
        let mask = 1u64 << (index % 64);
        if val {
            storage[index / 64] |= mask;
        } else {
            storage[index / 64] &= !mask;
        }
    }

    /// Parity of the bitwise AND of two equally sized word slices.
    ///
    /// This is one output bit of a matrix-vector product over GF(2).
    #[inline(always)]
    pub fn and_parity(a: &[u64], b: &[u64]) -> bool {
        let ones: u32 = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x & y).count_ones())
            .sum();
        ones % 2 == 1
    }

    /// Number of set bits across all words.
    #[inline(always)]
    pub fn weight(storage: &[u64]) -> usize {
        storage.iter().map(|w| w.count_ones() as usize).sum()
    }
}
