//! Bit-level framing engine
//!
//! [`decoder`] turns a stream of sampled line levels back into bytes;
//! [`encoder`] turns a byte into the level sequence to drive onto the TX
//! pin. Both work purely on [`crate::config::FrameParams`] and individual
//! bits, so they are testable without pins or timers - and against each
//! other: an encoded frame minus its start bit is exactly one decoder
//! input sequence.

pub mod decoder;
pub mod encoder;

pub use decoder::{BitOutcome, RxDecoder};
pub use encoder::{parity_bit, FrameBits};
