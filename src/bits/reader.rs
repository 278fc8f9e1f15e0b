use mem_dbg::{MemDbg, MemSize};

use crate::traits::rank_select::{Rank, Select};
use crate::utils::{BITS_IN_BYTE, MASK_TOP};

/// Width of a byte in bits.
const W: usize = 8;

/// A read-only view over a byte buffer that supports reading integers of arbitrary width from
/// arbitrary bit offsets and counting the ones in a range of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, MemDbg, MemSize)]
pub struct BitReader {
    data: Vec<u8>,

    /// The number of addressable bits, i.e. `data.len() * 8`.
    len: usize,
}

impl BitReader {
    pub fn new(data: Vec<u8>) -> Self {
        let len = data.len() * W;
        Self { data, len }
    }

    /// The number of addressable bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the `n`-bit unsigned integer starting at bit `pos`, reading the bits from the most
    /// significant to the least significant one.
    ///
    /// # Panics
    /// If `n > 64` or if the range exceeds the length of the buffer.
    #[inline]
    pub fn get(&self, mut pos: usize, mut n: usize) -> u64 {
        assert!(n <= u64::BITS as usize, "Cannot read {} bits at once", n);
        debug_assert!(pos + n <= self.len, "Reading bits [{}, {}) out of {}", pos, pos + n, self.len);

        if n == 0 {
            return 0;
        }

        let offset = pos % W;
        let first = (self.data[pos / W] & MASK_TOP[offset]) as u64;

        // bits lie within the first byte
        if offset + n <= W {
            return first >> (W - offset - n);
        }

        let mut result = first;
        pos += W - offset;
        n -= W - offset;

        while n >= W {
            result = (result << W) | self.data[pos / W] as u64;
            pos += W;
            n -= W;
        }

        if n > 0 {
            result = (result << n) | (self.data[pos / W] >> (W - n)) as u64;
        }
        result
    }

    /// Returns the bit at position `pos`.
    #[inline(always)]
    pub fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len);
        self.data[pos / W] & (0x80 >> (pos % W)) != 0
    }

    /// Counts the bits set to one in the range `[pos, pos + n)`.
    pub fn count_ones(&self, pos: usize, n: usize) -> usize {
        debug_assert!(pos + n <= self.len, "Counting bits [{}, {}) out of {}", pos, pos + n, self.len);

        if n == 0 {
            return 0;
        }

        let last = pos + n - 1;
        let first_byte = pos / W;
        let last_byte = last / W;
        let head_mask = MASK_TOP[pos % W];
        // keeps the first `last % W + 1` bits of the last byte
        let tail_mask = !MASK_TOP[last % W + 1];

        if first_byte == last_byte {
            return BITS_IN_BYTE[(self.data[first_byte] & head_mask & tail_mask) as usize] as usize;
        }

        let mut count = BITS_IN_BYTE[(self.data[first_byte] & head_mask) as usize] as usize;
        for byte in &self.data[first_byte + 1..last_byte] {
            count += BITS_IN_BYTE[*byte as usize] as usize;
        }
        count + BITS_IN_BYTE[(self.data[last_byte] & tail_mask) as usize] as usize
    }

    /// Returns the number of bits set to one in `[0, pos]`, inspecting one bit at a time.
    ///
    /// This is only meant as an oracle for the indexed structures.
    pub fn rank_naive(&self, pos: usize) -> usize {
        (0..=pos).filter(|index| self.bit(*index)).count()
    }
}

impl Rank for BitReader {
    fn rank(&self, bit: bool, pos: usize) -> usize {
        let ones = self.rank_naive(pos);
        if bit {
            ones
        } else {
            pos + 1 - ones
        }
    }
}

impl Select for BitReader {
    fn select(&self, bit: bool, k: usize) -> Option<usize> {
        if k == 0 {
            return None;
        }
        (0..self.len)
            .filter(|pos| self.bit(*pos) == bit)
            .nth(k - 1)
    }
}

impl From<Vec<u8>> for BitReader {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
