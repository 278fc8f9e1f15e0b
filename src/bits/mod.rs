//! Bit-addressable storage: a read-only [`BitReader`](reader::BitReader) used by every query and
//! an append-only [`BitWriter`](writer::BitWriter) used while encoding.
//!
//! Both address bits most-significant-bit first within each byte.

pub mod reader;
pub mod writer;
