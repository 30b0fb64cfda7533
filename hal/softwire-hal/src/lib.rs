//! Softwire Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the soft UART core is written
//! against. A platform integration implements them on top of its chip HAL
//! and routes the RX pin's falling-edge interrupt and the armed timers back
//! into the core's `on_rx_edge` / `on_sample_tick` / `on_dispatch_tick`
//! entry points.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / board integration        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softwire-core (port registry, framing) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softwire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::EdgeInterrupt`] - RX falling-edge interrupt control
//! - [`timer::TimerService`] - Microsecond timers and busy-waits
//! - [`preempt::PreemptionControl`] - Interrupt suppression around TX
//!
//! The [`compat`] module bridges `embedded-hal` 1.0 digital pins to the
//! traits above.

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod preempt;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{EdgeInterrupt, InputPin, IrqError, OutputPin};
pub use preempt::PreemptionControl;
pub use timer::{TimerError, TimerService};
