//! RX bit decoder: the per-frame framing state machine
//!
//! One decoder instance lives for exactly one frame attempt. The
//! acquisition path creates it when a start bit is detected and feeds it
//! one sampled level per bit cell; the decoder maps each position after
//! the start bit to data, parity or stop handling purely by index, never
//! by wall-clock time.

use crate::config::{FrameParams, Parity};

/// Result of feeding one sampled bit to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOutcome {
    /// Mid-frame, keep sampling
    Continue,
    /// Frame finished; `ok` is false on a parity or stop-bit mismatch
    ///
    /// Completion always terminates the frame - the caller returns to
    /// start-bit detection whether or not the frame was clean.
    Complete { byte: u8, ok: bool },
}

/// Framing state for one in-flight frame
#[derive(Debug, Clone)]
pub struct RxDecoder {
    params: FrameParams,
    /// Bits consumed since the start bit
    position: u8,
    /// Accumulated data bits, LSB first
    byte: u8,
    /// Set data bits seen so far (for the parity check)
    set_bits: u8,
    parity_err: bool,
    /// High levels seen across the stop-bit slot(s)
    stop_high: u8,
}

impl RxDecoder {
    /// Fresh decoder positioned at the first data bit
    pub fn new(params: FrameParams) -> Self {
        Self {
            params,
            position: 0,
            byte: 0,
            set_bits: 0,
            parity_err: false,
            stop_high: 0,
        }
    }

    /// Advance the frame by one sampled level
    pub fn advance(&mut self, bit: bool) -> BitOutcome {
        let data_bits = self.params.data_bits;

        if self.position < data_bits && bit {
            self.byte |= 1 << self.position;
            self.set_bits += 1;
        }

        self.position += 1;

        if self.position > data_bits {
            if self.params.parity != Parity::None && self.position == data_bits + 1 {
                // Parity slot: the total set-bit count including this bit
                // must match the configured expectation.
                let total_even = (self.set_bits + u8::from(bit)) % 2 == 0;
                let violated = match self.params.parity {
                    Parity::Even => !total_even,
                    Parity::Odd => total_even,
                    Parity::None => false,
                };
                if violated {
                    self.parity_err = true;
                }
            } else {
                // Stop slot. Validity is judged on the *total* number of
                // high samples across the stop slots, not per slot; a
                // low-then-high glitch that still totals right passes.
                if bit {
                    self.stop_high += 1;
                }

                if self.position == self.params.frame_len {
                    let ok = !self.parity_err && self.stop_high == self.params.stop_bits;
                    return BitOutcome::Complete {
                        byte: self.byte,
                        ok,
                    };
                }
            }
        }

        BitOutcome::Continue
    }
}
