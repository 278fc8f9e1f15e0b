use itertools::Itertools;

/// An append-only bit buffer. Bits are packed into bytes most-significant-bit first and the
/// last byte is padded with zeros.
///
/// This is only used while encoding, so it favours simplicity over speed.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,

    /// How many bits have been written so far.
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Appends the `num_bits` least significant bits of `value`, most significant first.
    pub fn write(&mut self, value: u64, num_bits: usize) {
        debug_assert!(num_bits <= u64::BITS as usize, "Cannot write more than 64 bits at once");

        for shift in (0..num_bits).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    /// Appends a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// The number of bits written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the written bits packed into bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the written bits as a string of `0`s and `1`s, with a space after every `group`
    /// bits.
    pub fn debug_string(&self, group: usize) -> String {
        let bits = (0..self.len).map(|pos| {
            if self.bytes[pos / 8] & (0x80 >> (pos % 8)) != 0 {
                '1'
            } else {
                '0'
            }
        });

        if group == 0 {
            return bits.collect();
        }

        let grouped = bits
            .chunks(group)
            .into_iter()
            .map(|chunk| chunk.collect::<String>())
            .join(" ");
        grouped
    }
}
