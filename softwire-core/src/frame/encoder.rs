//! TX bit encoder: one byte as a sequence of line levels
//!
//! [`FrameBits`] yields the exact levels to drive onto the TX pin, in
//! order: start (low), data LSB first, optional parity, stop bit(s)
//! (high). Holding each level for one bit duration is the transmit path's
//! job; separating level generation from timing keeps the encoder
//! replayable into the decoder for tests.

use crate::config::{FrameParams, Parity};

/// Level of the parity bit for `byte`, `None` when parity is disabled
///
/// Chosen so the total set-bit count (data + parity) satisfies the
/// configured expectation: even total for even parity, odd for odd.
pub fn parity_bit(byte: u8, data_bits: u8, parity: Parity) -> Option<bool> {
    match parity {
        Parity::None => None,
        Parity::Even | Parity::Odd => {
            let mask = ((1u16 << data_bits) - 1) as u8;
            let data_even = (byte & mask).count_ones() % 2 == 0;
            let level = if data_even {
                parity == Parity::Odd
            } else {
                parity == Parity::Even
            };
            Some(level)
        }
    }
}

/// Iterator over the line levels of one complete frame
#[derive(Debug, Clone)]
pub struct FrameBits {
    byte: u8,
    params: FrameParams,
    /// 0 = start bit, 1..=data_bits = data, then parity, then stop(s)
    position: u8,
}

impl FrameBits {
    pub fn new(byte: u8, params: FrameParams) -> Self {
        let mask = ((1u16 << params.data_bits) - 1) as u8;
        Self {
            byte: byte & mask,
            params,
            position: 0,
        }
    }

    /// Total levels in the frame, including the start bit
    pub fn frame_len(&self) -> usize {
        usize::from(self.params.frame_len) + 1
    }
}

impl Iterator for FrameBits {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let data_bits = self.params.data_bits;
        if usize::from(self.position) >= self.frame_len() {
            return None;
        }

        let level = if self.position == 0 {
            false // start bit
        } else if self.position <= data_bits {
            (self.byte >> (self.position - 1)) & 1 == 1
        } else if self.params.parity != Parity::None && self.position == data_bits + 1 {
            // parity_bit is Some whenever parity is enabled
            parity_bit(self.byte, data_bits, self.params.parity).unwrap_or(true)
        } else {
            true // stop bit(s)
        };

        self.position += 1;
        Some(level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame_len() - usize::from(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameBits {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataBits, PortConfig, StopBits};

    fn params(data_bits: DataBits, parity: Parity, stop_bits: StopBits) -> FrameParams {
        PortConfig {
            data_bits,
            parity,
            stop_bits,
            ..PortConfig::default()
        }
        .frame_params()
        .unwrap()
    }

    #[test]
    fn frame_for_0x41_8n1() {
        let p = params(DataBits::Eight, Parity::None, StopBits::One);
        let levels: heapless::Vec<bool, 16> = FrameBits::new(0x41, p).collect();
        assert_eq!(
            levels.as_slice(),
            &[
                false, // start
                true, false, false, false, false, false, true, false, // 0x41 LSB first
                true, // stop
            ]
        );
    }

    #[test]
    fn two_stop_bits_are_both_high() {
        let p = params(DataBits::Eight, Parity::None, StopBits::Two);
        let levels: heapless::Vec<bool, 16> = FrameBits::new(0x00, p).collect();
        assert_eq!(levels.len(), 11);
        assert!(levels[9] && levels[10]);
    }

    #[test]
    fn parity_levels() {
        // 0xFF: eight set bits (even count)
        assert_eq!(parity_bit(0xFF, 8, Parity::Even), Some(false));
        assert_eq!(parity_bit(0xFF, 8, Parity::Odd), Some(true));
        // 0x01: one set bit (odd count)
        assert_eq!(parity_bit(0x01, 8, Parity::Even), Some(true));
        assert_eq!(parity_bit(0x01, 8, Parity::Odd), Some(false));
        assert_eq!(parity_bit(0x55, 8, Parity::None), None);
        // Bits above the data width are ignored
        assert_eq!(parity_bit(0xE1, 5, Parity::Even), Some(true));
    }

    #[test]
    fn exact_size_matches_frame_len() {
        let p = params(DataBits::Seven, Parity::Even, StopBits::Two);
        let bits = FrameBits::new(0x12, p);
        assert_eq!(bits.frame_len(), 1 + 7 + 1 + 2);
        assert_eq!(bits.len(), 11);
        assert_eq!(bits.count(), 11);
    }

    #[test]
    fn masks_bits_beyond_data_width() {
        let p = params(DataBits::Five, Parity::None, StopBits::One);
        let a: heapless::Vec<bool, 16> = FrameBits::new(0x1F, p).collect();
        let b: heapless::Vec<bool, 16> = FrameBits::new(0xFF, p).collect();
        assert_eq!(a, b);
    }
}
