use std::io::{self, BufRead};

/// Number of bits set in each possible byte value.
pub const BITS_IN_BYTE: [u8; 256] = {
    let mut table = [0_u8; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = (byte as u8).count_ones() as u8;
        byte += 1;
    }
    table
};

/// Masks keeping the `8 - i` least significant bits of a byte, i.e. dropping the first `i` bits
/// when reading most-significant-bit first.
pub const MASK_TOP: [u8; 9] = [0xff, 0x7f, 0x3f, 0x1f, 0x0f, 0x07, 0x03, 0x01, 0x00];

/// Returns how many bits are needed to write `value` in binary (at least one).
pub fn bits_needed(value: usize) -> usize {
    (usize::BITS - value.leading_zeros()).max(1) as usize
}

/// Returns how many bytes are needed to hold `bits` bits.
pub fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Returns the words of a list holding one word per line. Line terminators (`\n` or `\r\n`) are
/// dropped and blank lines are skipped, so a list never stores the empty word.
pub fn read_words<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) => {
            let word = line.trim_end_matches('\r');
            (!word.is_empty()).then(|| Ok(word.to_owned()))
        }
        Err(err) => Some(Err(err)),
    })
}
