//! Microsecond timer service
//!
//! The soft UART needs two periodic timers per port (bit sampling and the
//! idle/dispatch check), a monotonic microsecond clock, and short
//! busy-waits for per-bit pin holds. All of that sits behind one trait so
//! the core stays platform-agnostic and host-testable.

/// Error arming a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// No free timer slot on the platform
    Exhausted,
}

/// Platform timer service
///
/// When an armed periodic timer fires, the platform calls back into the
/// port that armed it (`on_sample_tick` for the sampling timer,
/// `on_dispatch_tick` for the dispatch timer); the returned id is what the
/// core hands back to [`TimerService::cancel`].
///
/// `busy_wait_micros` holds the calling context for the given duration. On
/// platforms with hard real-time timers this should be a hardware wait;
/// elsewhere a calibrated spin loop. Accuracy directly bounds the usable
/// baud rate.
pub trait TimerService {
    /// Identifier for an armed timer
    type Id: Copy + PartialEq;

    /// Arm a periodic timer firing every `period_us` microseconds
    ///
    /// The first fire happens one full period after arming.
    fn start_periodic(&mut self, period_us: u32) -> Result<Self::Id, TimerError>;

    /// Disarm a previously armed timer
    ///
    /// Cancelling an already-fired-and-cancelled id is a no-op.
    fn cancel(&mut self, id: Self::Id);

    /// Monotonic microseconds since some fixed point (boot)
    fn now_micros(&self) -> u64;

    /// Block the calling context for `micros` microseconds
    fn busy_wait_micros(&mut self, micros: u32);
}
