//! Per-port runtime: acquisition, idle monitoring, buffered I/O
//!
//! A [`SoftUartPort`] ties the framing engine to one RX/TX pin pair. Three
//! execution contexts touch it:
//!
//! - the consumer context (`configure`, `read`, `write`, `flush`, ...)
//! - the falling-edge interrupt context ([`SoftUartPort::on_rx_edge`])
//! - the periodic timer context ([`SoftUartPort::on_sample_tick`],
//!   [`SoftUartPort::on_dispatch_tick`])
//!
//! No lock guards the RX state. Correctness rests on the `RxPhase`
//! split: the edge context performs only the `AwaitingStart -> Receiving`
//! transition (repeated edges inside a frame are data-bit transitions and
//! are ignored), and the sampling context only advances within or exits
//! `Receiving`. The sampling timer is armed exactly for the window between
//! those two transitions. TX holds preemption suppressed for the whole
//! flush, so neither context can observe a half-written pin level.

use softwire_hal::{EdgeInterrupt, InputPin, OutputPin, PreemptionControl, TimerService};

use crate::buffer::ByteFifo;
use crate::config::{FrameParams, PortConfig};
use crate::dispatch::{DispatchEvent, Dispatcher, PortIndex};
use crate::error::SoftUartError;
use crate::frame::{BitOutcome, FrameBits, RxDecoder};

/// Period of the idle/dispatch check, independent of baud rate
pub const DISPATCH_PERIOD_US: u32 = 50_000;

/// Render buffer size for [`SoftUartPort::write_fmt`]; longer output is
/// truncated
pub const WRITE_FMT_CAPACITY: usize = 128;

/// RX acquisition phase
///
/// The tagged enum is the concurrency story: only the edge context creates
/// `Receiving`, only the sampling context mutates or leaves it.
#[derive(Debug, Clone)]
enum RxPhase {
    /// Waiting for a start-bit falling edge
    AwaitingStart,
    /// Mid-frame, sampling timer armed
    Receiving(RxDecoder),
}

/// One emulated serial port
pub struct SoftUartPort<RX, TX, TM, CS, D>
where
    TM: TimerService,
{
    index: PortIndex,
    rx_pin: Option<RX>,
    tx_pin: Option<TX>,
    timer: TM,
    preempt: CS,
    dispatcher: Option<D>,
    config: Option<PortConfig>,
    params: Option<FrameParams>,
    rx_buf: ByteFifo,
    tx_buf: ByteFifo,
    rx_enabled: bool,
    rx_idle: bool,
    rx_phase: RxPhase,
    /// Completion timestamp of the last stored byte; cleared once the
    /// idle monitor reports the burst
    last_byte_at: Option<u64>,
    sample_timer: Option<TM::Id>,
    dispatch_timer: Option<TM::Id>,
}

impl<RX, TX, TM, CS, D> SoftUartPort<RX, TX, TM, CS, D>
where
    RX: InputPin + EdgeInterrupt,
    TX: OutputPin,
    TM: TimerService,
    CS: PreemptionControl,
    D: Dispatcher,
{
    /// Wire a port to its pins; called once at startup by the registry
    ///
    /// Drives the TX line to its idle (high) level. Pin modes and pull-ups
    /// are the platform's business when it constructs the pins.
    pub fn new(
        index: PortIndex,
        rx_pin: Option<RX>,
        mut tx_pin: Option<TX>,
        timer: TM,
        preempt: CS,
    ) -> Self {
        if let Some(tx) = tx_pin.as_mut() {
            tx.set_high();
        }
        Self {
            index,
            rx_pin,
            tx_pin,
            timer,
            preempt,
            dispatcher: None,
            config: None,
            params: None,
            rx_buf: ByteFifo::new(),
            tx_buf: ByteFifo::new(),
            rx_enabled: false,
            rx_idle: true,
            rx_phase: RxPhase::AwaitingStart,
            last_byte_at: None,
            sample_timer: None,
            dispatch_timer: None,
        }
    }

    /// Index handle of this port
    pub fn index(&self) -> PortIndex {
        self.index
    }

    /// Apply a configuration, resizing both buffers and recomputing the
    /// derived timing
    ///
    /// On rejection the previous configuration (and buffers) stay intact.
    pub fn configure(&mut self, config: &PortConfig) -> Result<(), SoftUartError> {
        let params = config.frame_params().inspect_err(|_| {
            error!("soft UART{}: invalid configuration rejected", self.index);
        })?;

        self.config = Some(*config);
        self.params = Some(params);
        self.rx_buf.reset(config.rx_buf_size);
        self.tx_buf.reset(config.tx_buf_size);
        self.notify(DispatchEvent::ConfigApplied);
        Ok(())
    }

    /// Currently applied configuration
    pub fn config(&self) -> Result<PortConfig, SoftUartError> {
        self.config.ok_or(SoftUartError::NotConfigured)
    }

    /// Install or remove the consumer dispatcher
    pub fn set_dispatcher(&mut self, dispatcher: Option<D>) {
        self.dispatcher = dispatcher;
    }

    /// Enable or disable reception
    ///
    /// Enabling arms the dispatch timer and then the pin interrupt; if the
    /// interrupt fails the timer is disarmed again, so there is no partial
    /// enable. Disabling deterministically disarms both the dispatch and
    /// any in-flight sampling timer and abandons a partially decoded frame.
    pub fn set_rx_enabled(&mut self, enabled: bool) -> Result<(), SoftUartError> {
        if self.rx_pin.is_none() {
            return Err(SoftUartError::NoRxPin);
        }
        if self.params.is_none() {
            return Err(SoftUartError::NotConfigured);
        }
        if self.rx_enabled == enabled {
            return Ok(());
        }

        if enabled {
            let Ok(id) = self.timer.start_periodic(DISPATCH_PERIOD_US) else {
                error!("soft UART{}: unable to start the dispatch timer", self.index);
                return Err(SoftUartError::ResourceExhausted);
            };
            let rx = self.rx_pin.as_mut().ok_or(SoftUartError::NoRxPin)?;
            if rx.enable_falling_edge().is_err() {
                self.timer.cancel(id);
                error!("soft UART{}: unable to enable RX", self.index);
                return Err(SoftUartError::ResourceExhausted);
            }
            self.dispatch_timer = Some(id);
        } else {
            let rx = self.rx_pin.as_mut().ok_or(SoftUartError::NoRxPin)?;
            if rx.disable_falling_edge().is_err() {
                error!("soft UART{}: unable to disable RX", self.index);
                return Err(SoftUartError::ResourceExhausted);
            }
            if let Some(id) = self.dispatch_timer.take() {
                self.timer.cancel(id);
            }
            if let Some(id) = self.sample_timer.take() {
                self.timer.cancel(id);
            }
            // abandon any partially decoded frame
            self.rx_phase = RxPhase::AwaitingStart;
        }

        self.rx_enabled = enabled;
        Ok(())
    }

    /// Whether reception is currently enabled
    pub fn is_rx_enabled(&self) -> bool {
        self.rx_enabled
    }

    /// Whether the RX line is idle (no byte completed within the last bit
    /// duration); gates consumer visibility of buffered data
    pub fn is_rx_idle(&self) -> bool {
        self.rx_idle
    }

    /// Falling-edge entry point (interrupt urgency)
    ///
    /// A falling edge while `AwaitingStart` is a start bit: wait half a
    /// bit duration so every subsequent periodic sample lands mid-cell,
    /// then arm the sampling timer and start a fresh frame. Edges while
    /// `Receiving` are data-bit transitions and are ignored.
    pub fn on_rx_edge(&mut self) {
        if !self.rx_enabled || !matches!(self.rx_phase, RxPhase::AwaitingStart) {
            return;
        }
        let Some(params) = self.params else { return };

        if self.sample_timer.is_none() {
            self.timer.busy_wait_micros(params.bit_duration_us / 2);
            match self.timer.start_periodic(params.bit_duration_us) {
                Ok(id) => self.sample_timer = Some(id),
                Err(_) => {
                    error!("soft UART{}: unable to start the RX timer", self.index);
                    return;
                }
            }
        }

        self.rx_phase = RxPhase::Receiving(RxDecoder::new(params));
        self.rx_idle = false;
    }

    /// Sampling-timer entry point: sample the RX pin, advance the frame
    ///
    /// On completion the byte is stored (framing errors drop it silently),
    /// the sampling timer is disarmed and the port returns to start-bit
    /// detection - every frame attempt ends back in `AwaitingStart`.
    pub fn on_sample_tick(&mut self) {
        let Some(rx) = self.rx_pin.as_mut() else { return };
        let bit = rx.is_high();

        let outcome = match &mut self.rx_phase {
            RxPhase::Receiving(decoder) => decoder.advance(bit),
            RxPhase::AwaitingStart => return,
        };

        if let BitOutcome::Complete { byte, ok } = outcome {
            if ok {
                if !self.rx_buf.push(byte) {
                    debug!("soft UART{}: RX buffer full, byte dropped", self.index);
                }
                self.last_byte_at = Some(self.timer.now_micros());
            }
            if let Some(id) = self.sample_timer.take() {
                self.timer.cancel(id);
            }
            self.rx_phase = RxPhase::AwaitingStart;
        }
    }

    /// Dispatch-timer entry point: the low-frequency idle check
    ///
    /// Once no byte has completed for more than one bit duration the burst
    /// is over: mark the port idle (readable) and notify the consumer.
    pub fn on_dispatch_tick(&mut self) {
        let Some(params) = self.params else { return };
        if let Some(at) = self.last_byte_at {
            if self.timer.now_micros().saturating_sub(at) > u64::from(params.bit_duration_us) {
                self.last_byte_at = None;
                self.rx_idle = true;
                self.notify(DispatchEvent::DataReady);
            }
        }
    }

    /// Consume up to `buf.len()` received bytes
    ///
    /// Returns 0 unless reception is enabled and the port is idle, so a
    /// burst is never read while frames are still arriving.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        if !self.rx_enabled || !self.rx_idle {
            return 0;
        }
        let n = buf.len().min(self.rx_buf.len());
        buf[..n].copy_from_slice(&self.rx_buf.as_slice()[..n]);
        self.rx_buf.consume(n);
        n
    }

    /// Consume up to `max` received bytes into a growable vector
    ///
    /// Same gating as [`SoftUartPort::read`]; additionally bounded by the
    /// vector's free space.
    pub fn read_extend<const M: usize>(
        &mut self,
        out: &mut heapless::Vec<u8, M>,
        max: usize,
    ) -> usize {
        if !self.rx_enabled {
            return 0;
        }
        let n = self.read_available().min(max).min(M - out.len());
        let _ = out.extend_from_slice(&self.rx_buf.as_slice()[..n]);
        self.rx_buf.consume(n);
        n
    }

    /// Buffered received bytes, reported only while idle
    pub fn read_available(&self) -> usize {
        if self.rx_idle {
            self.rx_buf.len()
        } else {
            0
        }
    }

    /// Queue bytes for transmission, flushing whenever the TX buffer fills
    ///
    /// Transmits synchronously in chunks of at most the configured TX
    /// capacity; always flushes once at the end. Returns the number of
    /// bytes accepted, never more than requested; 0 without a TX pin or
    /// configuration.
    pub fn write(&mut self, data: &[u8]) -> usize {
        if self.tx_pin.is_none() || self.params.is_none() {
            return 0;
        }

        let mut written = 0;
        while written < data.len() {
            let n = (data.len() - written).min(self.tx_buf.available());
            self.tx_buf.extend_from_slice(&data[written..written + n]);
            written += n;
            if written < data.len() {
                self.flush();
            }
        }
        self.flush();

        if self.write_available() > 0 {
            self.notify(DispatchEvent::TxSpaceAvailable);
        }
        written
    }

    /// printf-style convenience over [`SoftUartPort::write`]
    ///
    /// Renders into a bounded buffer; output beyond
    /// [`WRITE_FMT_CAPACITY`] bytes is truncated.
    pub fn write_fmt(&mut self, args: core::fmt::Arguments<'_>) -> usize {
        let mut rendered: heapless::String<WRITE_FMT_CAPACITY> = heapless::String::new();
        if core::fmt::write(&mut rendered, args).is_err() {
            debug!("soft UART{}: formatted write truncated", self.index);
        }
        self.write(rendered.as_bytes())
    }

    /// Remaining TX buffer space
    pub fn write_available(&self) -> usize {
        self.tx_buf.available()
    }

    /// Transmit and drain every buffered TX byte
    ///
    /// The whole drain runs under one preemption-suppressed scope: a bit
    /// cell stretched by an interrupt corrupts the frame on the receiver,
    /// so bit timing wins over interrupt latency for the duration.
    pub fn flush(&mut self) {
        let Some(params) = self.params else { return };
        let Some(tx) = self.tx_pin.as_mut() else { return };

        self.preempt.suppress();
        for &byte in self.tx_buf.as_slice() {
            for level in FrameBits::new(byte, params) {
                tx.set_state(level);
                self.timer.busy_wait_micros(params.bit_duration_us);
            }
        }
        self.preempt.restore();
        self.tx_buf.clear();
    }

    fn notify(&mut self, event: DispatchEvent) {
        if let Some(dispatcher) = self.dispatcher.as_mut() {
            dispatcher.on_event(self.index, event);
        }
    }
}

#[cfg(test)]
impl<RX, TX, TM, CS, D> SoftUartPort<RX, TX, TM, CS, D>
where
    RX: InputPin + EdgeInterrupt,
    TX: OutputPin,
    TM: TimerService,
    CS: PreemptionControl,
    D: Dispatcher,
{
    pub(crate) fn timer(&self) -> &TM {
        &self.timer
    }

    pub(crate) fn timer_mut(&mut self) -> &mut TM {
        &mut self.timer
    }

    pub(crate) fn rx_pin_mut(&mut self) -> Option<&mut RX> {
        self.rx_pin.as_mut()
    }

    pub(crate) fn tx_pin_ref(&self) -> Option<&TX> {
        self.tx_pin.as_ref()
    }

    pub(crate) fn preempt_ref(&self) -> &CS {
        &self.preempt
    }

    pub(crate) fn dispatcher_ref(&self) -> Option<&D> {
        self.dispatcher.as_ref()
    }

    pub(crate) fn is_receiving(&self) -> bool {
        matches!(self.rx_phase, RxPhase::Receiving(_))
    }

    pub(crate) fn sample_timer_armed(&self) -> bool {
        self.sample_timer.is_some()
    }

    pub(crate) fn dispatch_timer_armed(&self) -> bool {
        self.dispatch_timer.is_some()
    }
}
