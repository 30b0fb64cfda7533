//! GPIO pin abstractions
//!
//! Provides traits for the digital pins a soft UART port is built from:
//! an output pin for TX and an input pin with falling-edge interrupt
//! control for RX. Pull-up selection for the RX line is part of pin
//! construction on the platform side and is not modelled here.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. TX bit timing assumes `set_state` completes in a
/// small fraction of one bit duration.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&mut self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&mut self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Methods take `&mut self` to line up with `embedded-hal` 1.0, so chip
/// HAL pins can be bridged without interior mutability (see [`crate::compat`]).
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Error on interrupt (de)activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqError {
    /// The pin does not support edge interrupts
    Unsupported,
    /// No interrupt slot / resource left on the platform
    Exhausted,
}

/// Falling-edge interrupt control for an RX pin
///
/// The platform wires the edge event to the owning port's `on_rx_edge`
/// entry point; this trait only toggles delivery. Both operations must be
/// callable repeatedly (enabling an enabled interrupt is a no-op).
pub trait EdgeInterrupt {
    /// Start delivering falling-edge events for this pin
    fn enable_falling_edge(&mut self) -> Result<(), IrqError>;

    /// Stop delivering falling-edge events for this pin
    fn disable_falling_edge(&mut self) -> Result<(), IrqError>;
}
