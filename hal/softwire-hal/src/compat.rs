//! `embedded-hal` 1.0 bridges
//!
//! Newtype adapters that let any chip HAL's digital pins serve as soft
//! UART pins. Bit-bang sampling has no per-read error channel, so pin
//! errors collapse to the line's idle level: a failed RX read is treated
//! as high (idle line), a failed TX write is dropped.

use crate::gpio::{InputPin, OutputPin};

/// Adapter from `embedded_hal::digital::InputPin`
pub struct EhInput<P>(pub P);

impl<P: embedded_hal::digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(true)
    }
}

/// Adapter from `embedded_hal::digital::StatefulOutputPin`
pub struct EhOutput<P>(pub P);

impl<P: embedded_hal::digital::StatefulOutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }

    fn is_set_high(&mut self) -> bool {
        self.0.is_set_high().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct FakePin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl embedded_hal::digital::OutputPin for FakePin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    impl embedded_hal::digital::StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[test]
    fn input_adapter_reads_level() {
        let mut rx = EhInput(FakePin { high: true });
        assert!(rx.is_high());
        assert!(!rx.is_low());
    }

    #[test]
    fn output_adapter_drives_level() {
        let mut tx = EhOutput(FakePin { high: false });
        tx.set_high();
        assert!(tx.is_set_high());
        tx.set_state(false);
        assert!(tx.is_set_low());
    }
}
