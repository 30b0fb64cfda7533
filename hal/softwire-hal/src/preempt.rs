//! Preemption control
//!
//! A soft UART byte is transmitted with busy-waited per-bit holds; an
//! interrupt in the middle of a byte stretches a bit cell and corrupts the
//! frame on the receiving end. The core therefore suppresses preemption
//! for the whole of a TX flush.

/// Scoped interrupt/preemption suppression
///
/// `suppress` and `restore` are called in strict pairs by the core, never
/// nested. While suppressed, the RX sampling and dispatch timers of every
/// port are stalled too - that is the intended trade-off: TX bit timing
/// outweighs throughput, and the flush duration bounds the system's
/// tolerable interrupt latency while transmitting.
pub trait PreemptionControl {
    /// Disable interrupts / preemption for the calling context
    fn suppress(&mut self);

    /// Re-enable interrupts / preemption
    fn restore(&mut self);
}
