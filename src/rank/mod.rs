//! Indexed rank/select over a bit sequence.

pub mod directory;
