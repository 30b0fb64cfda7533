//! Line configuration and derived frame timing
//!
//! A port is configured once (or repeatedly) with a [`PortConfig`]; the
//! values the framing engine actually works with - microseconds per bit
//! and the frame length in sampled bits - are derived from it as
//! [`FrameParams`] at configuration time.

use crate::error::SoftUartError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backing capacity of every RX/TX FIFO; configured sizes must fit in it
pub use crate::buffer::MAX_BUFFER_CAPACITY;

/// Highest supported baud rate
///
/// Above 1 MBd the derived bit duration rounds to zero microseconds.
pub const MAX_BAUD_RATE: u32 = 1_000_000;

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    #[default]
    Eight,
}

impl DataBits {
    /// Bit count as a number
    pub fn bits(self) -> u8 {
        match self {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

impl Parity {
    /// Number of parity bits in a frame (0 or 1)
    pub fn bit_count(self) -> u8 {
        match self {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        }
    }
}

/// Number of stop bits
///
/// `OneAndHalf` is representable so callers holding a generic serial
/// configuration can pass it through, but the soft UART always rejects it
/// at [`PortConfig::validate`] time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    #[default]
    One,
    OneAndHalf,
    Two,
}

impl StopBits {
    /// Stop-bit count, `None` for the unsupported 1.5 setting
    pub fn count(self) -> Option<u8> {
        match self {
            StopBits::One => Some(1),
            StopBits::OneAndHalf => None,
            StopBits::Two => Some(2),
        }
    }
}

/// Per-port configuration, immutable once applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PortConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Number of data bits per frame
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// RX buffer capacity in bytes
    pub rx_buf_size: usize,
    /// TX buffer capacity in bytes
    pub tx_buf_size: usize,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            rx_buf_size: 256,
            tx_buf_size: 256,
        }
    }
}

impl PortConfig {
    /// Check the configuration against the supported ranges
    pub fn validate(&self) -> Result<(), SoftUartError> {
        if self.stop_bits.count().is_none() {
            return Err(SoftUartError::InvalidConfig);
        }
        if self.baud_rate == 0 || self.baud_rate > MAX_BAUD_RATE {
            return Err(SoftUartError::InvalidConfig);
        }
        if self.rx_buf_size == 0 || self.rx_buf_size > MAX_BUFFER_CAPACITY {
            return Err(SoftUartError::InvalidConfig);
        }
        if self.tx_buf_size == 0 || self.tx_buf_size > MAX_BUFFER_CAPACITY {
            return Err(SoftUartError::InvalidConfig);
        }
        Ok(())
    }

    /// Validate and derive the timing constants the framing engine uses
    pub fn frame_params(&self) -> Result<FrameParams, SoftUartError> {
        self.validate()?;
        // validate() has rejected OneAndHalf
        let stop_bits = self.stop_bits.count().ok_or(SoftUartError::InvalidConfig)?;
        let data_bits = self.data_bits.bits();
        Ok(FrameParams {
            data_bits,
            parity: self.parity,
            stop_bits,
            bit_duration_us: 1_000_000 / self.baud_rate,
            frame_len: data_bits + self.parity.bit_count() + stop_bits,
        })
    }
}

/// Timing constants derived from a validated [`PortConfig`]
///
/// `frame_len` counts the sampled bits after the start bit: data bits,
/// the optional parity bit and the stop bit(s). The start bit itself is
/// consumed by edge detection and never sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameParams {
    /// Data bits per frame (5-8)
    pub data_bits: u8,
    /// Parity mode
    pub parity: Parity,
    /// Stop bits per frame (1 or 2)
    pub stop_bits: u8,
    /// Microseconds per bit cell
    pub bit_duration_us: u32,
    /// Sampled bits per frame
    pub frame_len: u8,
}
