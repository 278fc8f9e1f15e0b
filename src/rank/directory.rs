use anyhow::{bail, ensure, Result};
use log::debug;
use mem_dbg::{MemDbg, MemSize};

use crate::bits::reader::BitReader;
use crate::bits::writer::BitWriter;
use crate::traits::rank_select::{Rank, Select};
use crate::utils::{bits_needed, bytes_for_bits};
use crate::{L1, L2};

/// The widths of the blocks indexed by a [`RankDirectory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, MemDbg, MemSize)]
pub struct RankDirectoryParams {
    /// Width, in bits, of the coarse blocks. Each coarse entry stores an absolute count.
    pub l1: usize,

    /// Width, in bits, of the fine blocks. Each fine entry stores a count relative to the
    /// enclosing coarse block.
    pub l2: usize,
}

impl Default for RankDirectoryParams {
    fn default() -> Self {
        Self { l1: L1, l2: L2 }
    }
}

impl RankDirectoryParams {
    pub fn new(l1: usize, l2: usize) -> Result<Self> {
        let params = Self { l1, l2 };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.l2 > 0, "L2 must be positive");
        ensure!(self.l1 >= self.l2, "L1 ({}) must not be smaller than L2 ({})", self.l1, self.l2);
        ensure!(
            self.l1 % self.l2 == 0,
            "L1 ({}) must be a multiple of L2 ({})",
            self.l1,
            self.l2
        );
        Ok(())
    }
}

/// A two-level directory answering rank and select queries over a sequence of `num_bits` bits.
///
/// The directory holds one entry for each complete block of `l2` bits. The entry closing a
/// complete block of `l1` bits is the number of ones up to the end of that block (a coarse
/// entry, `l1_bits` wide); every other entry is the number of ones from the start of the
/// enclosing coarse block up to the end of its fine block (a fine entry, `l2_bits` wide). The
/// entries are packed in a bit string so that the directory can travel alongside the data.
#[derive(Clone, Debug, MemDbg, MemSize)]
pub struct RankDirectory {
    /// The indexed bits. May be longer than `num_bits`: only the prefix is indexed.
    data: BitReader,

    /// The packed coarse and fine entries.
    directory: BitReader,

    num_bits: usize,

    l1: usize,

    l2: usize,

    l1_bits: usize,

    l2_bits: usize,

    /// Bits taken by the entries of a complete coarse block.
    section_bits: usize,

    /// Total number of ones in the indexed bits.
    ones: usize,
}

impl RankDirectory {
    /// Builds a directory over the first `num_bits` bits of `data` with the default block widths.
    pub fn new(data: Vec<u8>, num_bits: usize) -> Result<Self> {
        Self::with_parameters(data, num_bits, RankDirectoryParams::default())
    }

    /// Builds a directory over the first `num_bits` bits of `data` with the given block widths.
    pub fn with_parameters(data: Vec<u8>, num_bits: usize, params: RankDirectoryParams) -> Result<Self> {
        params.validate()?;
        let data = BitReader::new(data);
        ensure!(
            num_bits <= data.len(),
            "Cannot index {} bits of a buffer holding {} bits",
            num_bits,
            data.len()
        );

        let directory = Self::build_directory(&data, num_bits, params);
        debug!(
            "Built rank directory over {} bits with L1 = {}, L2 = {}: {} directory bytes",
            num_bits,
            params.l1,
            params.l2,
            directory.len()
        );

        Ok(Self::assemble(data, directory, num_bits, params))
    }

    /// Rebuilds a directory from its serialized parts, as returned by [`data_bytes`](Self::data_bytes)
    /// and [`directory_bytes`](Self::directory_bytes).
    ///
    /// The received directory must be exactly the one built over `data`: any other buffer would
    /// make rank and select disagree with the indexed bits.
    pub fn from_parts(
        data: Vec<u8>,
        directory: Vec<u8>,
        num_bits: usize,
        params: RankDirectoryParams,
    ) -> Result<Self> {
        params.validate()?;
        let data = BitReader::new(data);
        ensure!(
            num_bits <= data.len(),
            "Cannot index {} bits of a buffer holding {} bits",
            num_bits,
            data.len()
        );

        let expected = Self::directory_len(num_bits, params);
        ensure!(
            directory.len() == expected,
            "Directory over {} bits must take {} bytes, found {}",
            num_bits,
            expected,
            directory.len()
        );

        let rebuilt = Self::build_directory(&data, num_bits, params);
        if let Some(byte) = rebuilt.iter().zip(&directory).position(|(built, read)| built != read) {
            bail!("Directory is inconsistent with the indexed bits at byte {}", byte);
        }

        Ok(Self::assemble(data, directory, num_bits, params))
    }

    /// Packs one entry per complete fine block of the first `num_bits` bits of `data`.
    fn build_directory(data: &BitReader, num_bits: usize, params: RankDirectoryParams) -> Vec<u8> {
        let RankDirectoryParams { l1, l2 } = params;
        let (l1_bits, l2_bits) = Self::entry_widths(num_bits, params);
        let mut writer = BitWriter::with_capacity(Self::directory_bits(num_bits, params));
        let mut ones = 0;
        let mut ones_in_l1 = 0;
        let mut pos = 0;

        while pos + l2 <= num_bits {
            ones_in_l1 += data.count_ones(pos, l2);
            pos += l2;

            if pos % l1 == 0 {
                ones += ones_in_l1;
                writer.write(ones as u64, l1_bits);
                ones_in_l1 = 0;
            } else {
                writer.write(ones_in_l1 as u64, l2_bits);
            }
        }
        writer.into_bytes()
    }

    fn assemble(data: BitReader, directory: Vec<u8>, num_bits: usize, params: RankDirectoryParams) -> Self {
        let (l1_bits, l2_bits) = Self::entry_widths(num_bits, params);
        let ones = data.count_ones(0, num_bits);

        Self {
            data,
            directory: BitReader::new(directory),
            num_bits,
            l1: params.l1,
            l2: params.l2,
            l1_bits,
            l2_bits,
            section_bits: (params.l1 / params.l2 - 1) * l2_bits + l1_bits,
            ones,
        }
    }

    /// Returns the widths of the coarse and fine entries.
    fn entry_widths(num_bits: usize, params: RankDirectoryParams) -> (usize, usize) {
        (bits_needed(num_bits), bits_needed(params.l1))
    }

    fn directory_bits(num_bits: usize, params: RankDirectoryParams) -> usize {
        let (l1_bits, l2_bits) = Self::entry_widths(num_bits, params);
        let coarse_entries = num_bits / params.l1;
        let fine_entries = num_bits / params.l2 - coarse_entries;
        coarse_entries * l1_bits + fine_entries * l2_bits
    }

    /// Returns how many bytes the serialized directory over `num_bits` bits takes.
    pub fn directory_len(num_bits: usize, params: RankDirectoryParams) -> usize {
        bytes_for_bits(Self::directory_bits(num_bits, params))
    }

    /// The number of indexed bits.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn params(&self) -> RankDirectoryParams {
        RankDirectoryParams {
            l1: self.l1,
            l2: self.l2,
        }
    }

    /// The number of indexed bits equal to `bit`.
    pub fn count(&self, bit: bool) -> usize {
        if bit {
            self.ones
        } else {
            self.num_bits - self.ones
        }
    }

    /// The bits this directory indexes.
    pub fn data(&self) -> &BitReader {
        &self.data
    }

    pub fn data_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    pub fn directory_bytes(&self) -> &[u8] {
        self.directory.as_bytes()
    }

    /// Number of ones before the coarse block `block`.
    #[inline(always)]
    fn coarse_ones(&self, block: usize) -> usize {
        if block == 0 {
            return 0;
        }
        self.directory
            .get(block * self.section_bits - self.l1_bits, self.l1_bits) as usize
    }

    /// Number of ones between the start of the coarse block `block` and the start of its fine
    /// block `sub`.
    #[inline(always)]
    fn fine_ones(&self, block: usize, sub: usize) -> usize {
        if sub == 0 {
            return 0;
        }
        self.directory
            .get(block * self.section_bits + sub * self.l2_bits - self.l2_bits, self.l2_bits) as usize
    }

    /// Number of bits equal to `bit` before the coarse block `block`.
    #[inline(always)]
    fn before_block(&self, bit: bool, block: usize) -> usize {
        let ones = self.coarse_ones(block);
        if bit {
            ones
        } else {
            block * self.l1 - ones
        }
    }

    /// Number of bits equal to `bit` between the start of the coarse block `block` and the start
    /// of its fine block `sub`.
    #[inline(always)]
    fn before_sub_block(&self, bit: bool, block: usize, sub: usize) -> usize {
        let ones = self.fine_ones(block, sub);
        if bit {
            ones
        } else {
            sub * self.l2 - ones
        }
    }
}

impl Rank for RankDirectory {
    /// Returns how many bits equal to `bit` appear in positions `[0, pos]`.
    ///
    /// # Panics
    /// If `pos` is not smaller than the number of indexed bits.
    #[inline]
    fn rank(&self, bit: bool, pos: usize) -> usize {
        assert!(
            pos < self.num_bits,
            "Rank position {} out of {} indexed bits",
            pos,
            self.num_bits
        );

        let block = pos / self.l1;
        let sub = (pos % self.l1) / self.l2;
        let residual = pos % self.l2;
        let ones = self.coarse_ones(block)
            + self.fine_ones(block, sub)
            + self.data.count_ones(pos - residual, residual + 1);

        if bit {
            ones
        } else {
            pos + 1 - ones
        }
    }
}

impl Select for RankDirectory {
    fn select(&self, bit: bool, k: usize) -> Option<usize> {
        if k == 0 || k > self.count(bit) {
            return None;
        }

        // the last coarse block whose preceding count is still below k
        let mut low = 0;
        let mut high = self.num_bits / self.l1 + 1;
        while high - low > 1 {
            let mid = (low + high) / 2;
            if self.before_block(bit, mid) < k {
                low = mid;
            } else {
                high = mid;
            }
        }
        let block = low;
        let start = block * self.l1;
        let mut remaining = k - self.before_block(bit, block);

        // fine entries exist only for complete fine blocks
        let subs = self.l1 / self.l2;
        let mut sub = 0;
        while sub + 1 < subs
            && start + (sub + 1) * self.l2 <= self.num_bits
            && self.before_sub_block(bit, block, sub + 1) < remaining
        {
            sub += 1;
        }
        remaining -= self.before_sub_block(bit, block, sub);

        let mut pos = start + sub * self.l2;
        while pos + 8 <= self.num_bits {
            let ones = self.data.count_ones(pos, 8);
            let matches = if bit { ones } else { 8 - ones };
            if matches >= remaining {
                break;
            }
            remaining -= matches;
            pos += 8;
        }

        while pos < self.num_bits {
            if self.data.bit(pos) == bit {
                remaining -= 1;
                if remaining == 0 {
                    return Some(pos);
                }
            }
            pos += 1;
        }
        None
    }
}
