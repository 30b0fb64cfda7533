//! Bit-banged ("soft") UART core
//!
//! This crate reconstructs byte-accurate asynchronous serial data from raw
//! pin-level sampling, and transmits bytes with busy-waited per-bit holds,
//! without any hardware shift register:
//!
//! - Line configuration types and derived frame timing
//! - RX bit decoder (per-frame framing state machine)
//! - TX bit encoder (frame level sequence)
//! - Per-port runtime: start-bit detection, periodic sampling,
//!   idle/dispatch monitoring, buffered read/write/flush
//! - Port registry (arena of ports addressed by index handles)
//!
//! Hardware access goes exclusively through the `softwire-hal` traits; the
//! platform integration routes the RX pin's falling edge and its timer
//! fires into [`port::SoftUartPort::on_rx_edge`],
//! [`port::SoftUartPort::on_sample_tick`] and
//! [`port::SoftUartPort::on_dispatch_tick`].

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first so the logging macros are visible everywhere.
#[macro_use]
mod fmt;

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod port;
pub mod registry;

#[cfg(test)]
pub(crate) mod testutil;

pub use buffer::{ByteFifo, MAX_BUFFER_CAPACITY};
pub use config::{DataBits, FrameParams, Parity, PortConfig, StopBits};
pub use dispatch::{DispatchEvent, Dispatcher, PortIndex};
pub use error::SoftUartError;
pub use frame::{BitOutcome, FrameBits, RxDecoder};
pub use port::SoftUartPort;
pub use registry::SoftUartRegistry;
