//! Error types for port operations
//!
//! Framing errors on received frames are deliberately absent here: byte
//! corruption is expected on a software UART, so a malformed frame is
//! dropped inside the RX path and decoding simply re-arms. Only the
//! synchronous consumer-facing operations report errors.

/// Errors that can occur on port operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoftUartError {
    /// Port index out of range
    InvalidPort,
    /// Rejected configuration (unsupported stop bits, baud or buffer size)
    InvalidConfig,
    /// Timer or interrupt registration failed
    ResourceExhausted,
    /// The port has never been successfully configured
    NotConfigured,
    /// Operation needs an RX pin and none was wired
    NoRxPin,
    /// Operation needs a TX pin and none was wired
    NoTxPin,
}
