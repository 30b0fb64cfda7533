//! Shared test doubles for the HAL traits
//!
//! Pins are scripted or recording, the timer is a manual clock, and the
//! dispatcher records every event. Everything exposes its internals so
//! tests can assert on arming/cancelling and on recorded levels.

use heapless::Vec;
use softwire_hal::{
    EdgeInterrupt, InputPin, IrqError, OutputPin, PreemptionControl, TimerError, TimerService,
};

use crate::dispatch::{DispatchEvent, Dispatcher, PortIndex};

/// RX pin replaying a scripted level sequence, idle-high once exhausted
pub struct ScriptPin {
    pub levels: Vec<bool, 256>,
    pub cursor: usize,
    pub irq_enabled: bool,
    pub fail_enable: bool,
    pub fail_disable: bool,
}

impl ScriptPin {
    pub fn idle() -> Self {
        Self {
            levels: Vec::new(),
            cursor: 0,
            irq_enabled: false,
            fail_enable: false,
            fail_disable: false,
        }
    }

    pub fn script(&mut self, levels: impl IntoIterator<Item = bool>) {
        self.levels.clear();
        self.cursor = 0;
        self.levels.extend(levels);
    }
}

impl InputPin for ScriptPin {
    fn is_high(&mut self) -> bool {
        let level = self.levels.get(self.cursor).copied().unwrap_or(true);
        self.cursor += 1;
        level
    }
}

impl EdgeInterrupt for ScriptPin {
    fn enable_falling_edge(&mut self) -> Result<(), IrqError> {
        if self.fail_enable {
            return Err(IrqError::Exhausted);
        }
        self.irq_enabled = true;
        Ok(())
    }

    fn disable_falling_edge(&mut self) -> Result<(), IrqError> {
        if self.fail_disable {
            return Err(IrqError::Exhausted);
        }
        self.irq_enabled = false;
        Ok(())
    }
}

/// TX pin recording every driven level (the first entry is the idle-high
/// drive from port wiring)
#[derive(Default)]
pub struct RecordPin {
    pub levels: Vec<bool, 256>,
    pub high: bool,
}

impl OutputPin for RecordPin {
    fn set_high(&mut self) {
        self.high = true;
        let _ = self.levels.push(true);
    }

    fn set_low(&mut self) {
        self.high = false;
        let _ = self.levels.push(false);
    }

    fn is_set_high(&mut self) -> bool {
        self.high
    }
}

/// Manual-clock timer: busy-waits advance `now`, armed timers are listed
pub struct MockTimer {
    pub now: u64,
    pub next_id: u32,
    pub armed: Vec<(u32, u32), 8>, // (id, period_us)
    pub fail_arm: bool,
    pub waited_us: u64,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            armed: Vec::new(),
            fail_arm: false,
            waited_us: 0,
        }
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }
}

impl TimerService for MockTimer {
    type Id = u32;

    fn start_periodic(&mut self, period_us: u32) -> Result<u32, TimerError> {
        if self.fail_arm {
            return Err(TimerError::Exhausted);
        }
        let id = self.next_id;
        self.next_id += 1;
        let _ = self.armed.push((id, period_us));
        Ok(id)
    }

    fn cancel(&mut self, id: u32) {
        self.armed.retain(|&(armed_id, _)| armed_id != id);
    }

    fn now_micros(&self) -> u64 {
        self.now
    }

    fn busy_wait_micros(&mut self, micros: u32) {
        self.waited_us += u64::from(micros);
        self.now += u64::from(micros);
    }
}

/// Counts suppress/restore pairs
#[derive(Default)]
pub struct MockPreempt {
    pub depth: i32,
    pub suppress_calls: usize,
}

impl PreemptionControl for MockPreempt {
    fn suppress(&mut self) {
        self.depth += 1;
        self.suppress_calls += 1;
    }

    fn restore(&mut self) {
        self.depth -= 1;
    }
}

/// Records every dispatched event in order
#[derive(Default)]
pub struct RecordingDispatcher {
    pub events: Vec<(PortIndex, DispatchEvent), 16>,
}

impl Dispatcher for RecordingDispatcher {
    fn on_event(&mut self, port: PortIndex, event: DispatchEvent) {
        let _ = self.events.push((port, event));
    }
}
