//! Port registry: the consumer-facing manager
//!
//! An arena of up to `N` ports addressed by [`PortIndex`] handles. Ports
//! are added once at startup (which wires their pins); configuration can
//! be (re)applied any number of times afterwards. Every operation
//! bounds-checks its handle; the byte-count operations mirror the framing
//! engine's "corruption is local" stance and report 0 instead of erroring
//! for an unknown port.
//!
//! The platform integration forwards hardware events here:
//! [`SoftUartRegistry::on_rx_edge`] from the RX pin's falling-edge
//! interrupt, [`SoftUartRegistry::on_sample_tick`] and
//! [`SoftUartRegistry::on_dispatch_tick`] from the timers armed through
//! the port's [`softwire_hal::TimerService`].

use softwire_hal::{EdgeInterrupt, InputPin, OutputPin, PreemptionControl, TimerService};

use crate::config::PortConfig;
use crate::dispatch::{Dispatcher, PortIndex};
use crate::error::SoftUartError;
use crate::port::SoftUartPort;

/// Fixed-size arena of soft UART ports
pub struct SoftUartRegistry<RX, TX, TM, CS, D, const N: usize>
where
    TM: TimerService,
{
    ports: heapless::Vec<SoftUartPort<RX, TX, TM, CS, D>, N>,
}

impl<RX, TX, TM, CS, D, const N: usize> SoftUartRegistry<RX, TX, TM, CS, D, N>
where
    RX: InputPin + EdgeInterrupt,
    TX: OutputPin,
    TM: TimerService,
    CS: PreemptionControl,
    D: Dispatcher,
{
    /// An empty registry; `N` is the maximum port count (minimum 1 useful)
    pub const fn new() -> Self {
        Self {
            ports: heapless::Vec::new(),
        }
    }

    /// Wire a new port and return its handle
    ///
    /// A port without an RX pin is TX-only and vice versa. Fails with
    /// `ResourceExhausted` once `N` ports exist.
    pub fn add_port(
        &mut self,
        rx_pin: Option<RX>,
        tx_pin: Option<TX>,
        timer: TM,
        preempt: CS,
    ) -> Result<PortIndex, SoftUartError> {
        let index = self.ports.len();
        self.ports
            .push(SoftUartPort::new(index, rx_pin, tx_pin, timer, preempt))
            .map_err(|_| SoftUartError::ResourceExhausted)?;
        Ok(index)
    }

    /// Number of wired ports
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether no port has been wired yet
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Borrow a port by handle
    pub fn port(
        &self,
        port: PortIndex,
    ) -> Result<&SoftUartPort<RX, TX, TM, CS, D>, SoftUartError> {
        self.ports.get(port).ok_or(SoftUartError::InvalidPort)
    }

    /// Mutably borrow a port by handle
    pub fn port_mut(
        &mut self,
        port: PortIndex,
    ) -> Result<&mut SoftUartPort<RX, TX, TM, CS, D>, SoftUartError> {
        self.ports.get_mut(port).ok_or(SoftUartError::InvalidPort)
    }

    /// Apply a configuration to a port
    pub fn configure(&mut self, port: PortIndex, config: &PortConfig) -> Result<(), SoftUartError> {
        self.port_mut(port)?.configure(config)
    }

    /// Currently applied configuration of a port
    pub fn config(&self, port: PortIndex) -> Result<PortConfig, SoftUartError> {
        self.port(port)?.config()
    }

    /// Install or remove a port's consumer dispatcher
    pub fn set_dispatcher(
        &mut self,
        port: PortIndex,
        dispatcher: Option<D>,
    ) -> Result<(), SoftUartError> {
        self.port_mut(port)?.set_dispatcher(dispatcher);
        Ok(())
    }

    /// Enable or disable reception on a port
    pub fn set_rx_enabled(&mut self, port: PortIndex, enabled: bool) -> Result<(), SoftUartError> {
        self.port_mut(port)?.set_rx_enabled(enabled)
    }

    /// Whether reception is enabled; false for an unknown port
    pub fn is_rx_enabled(&self, port: PortIndex) -> bool {
        self.port(port).map(SoftUartPort::is_rx_enabled).unwrap_or(false)
    }

    /// Read received bytes; 0 for an unknown port (see
    /// [`SoftUartPort::read`] for the idle gating)
    pub fn read(&mut self, port: PortIndex, buf: &mut [u8]) -> usize {
        self.port_mut(port).map(|p| p.read(buf)).unwrap_or(0)
    }

    /// Read received bytes into a growable vector; 0 for an unknown port
    pub fn read_extend<const M: usize>(
        &mut self,
        port: PortIndex,
        out: &mut heapless::Vec<u8, M>,
        max: usize,
    ) -> usize {
        self.port_mut(port).map(|p| p.read_extend(out, max)).unwrap_or(0)
    }

    /// Readable byte count; 0 for an unknown port or while mid-burst
    pub fn read_available(&self, port: PortIndex) -> usize {
        self.port(port).map(SoftUartPort::read_available).unwrap_or(0)
    }

    /// Queue and transmit bytes; 0 accepted for an unknown port
    pub fn write(&mut self, port: PortIndex, data: &[u8]) -> usize {
        self.port_mut(port).map(|p| p.write(data)).unwrap_or(0)
    }

    /// printf-style convenience over [`SoftUartRegistry::write`]
    pub fn write_fmt(&mut self, port: PortIndex, args: core::fmt::Arguments<'_>) -> usize {
        self.port_mut(port).map(|p| p.write_fmt(args)).unwrap_or(0)
    }

    /// Remaining TX buffer space; 0 for an unknown port
    pub fn write_available(&self, port: PortIndex) -> usize {
        self.port(port).map(SoftUartPort::write_available).unwrap_or(0)
    }

    /// Transmit and drain a port's TX buffer
    pub fn flush(&mut self, port: PortIndex) {
        if let Ok(p) = self.port_mut(port) {
            p.flush();
        }
    }

    /// Forward a falling-edge interrupt to a port; unknown handles are
    /// ignored (interrupt context cannot act on an error)
    pub fn on_rx_edge(&mut self, port: PortIndex) {
        if let Ok(p) = self.port_mut(port) {
            p.on_rx_edge();
        }
    }

    /// Forward a sampling-timer fire to a port
    pub fn on_sample_tick(&mut self, port: PortIndex) {
        if let Ok(p) = self.port_mut(port) {
            p.on_sample_tick();
        }
    }

    /// Forward a dispatch-timer fire to a port
    pub fn on_dispatch_tick(&mut self, port: PortIndex) {
        if let Ok(p) = self.port_mut(port) {
            p.on_dispatch_tick();
        }
    }
}

impl<RX, TX, TM, CS, D, const N: usize> Default for SoftUartRegistry<RX, TX, TM, CS, D, N>
where
    RX: InputPin + EdgeInterrupt,
    TX: OutputPin,
    TM: TimerService,
    CS: PreemptionControl,
    D: Dispatcher,
{
    fn default() -> Self {
        Self::new()
    }
}
