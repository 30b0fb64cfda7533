//! Consumer dispatcher
//!
//! The port never pushes data at the consumer; it raises edge-style
//! notifications through a [`Dispatcher`] and the consumer pulls with
//! `read`. Per-byte arrival is deliberately not an event - `DataReady`
//! fires only once a burst has gone idle (no completed byte for one bit
//! duration), debouncing noisy arrival into a batch-ready signal.

/// Index handle into the port registry
pub type PortIndex = usize;

/// Why the dispatcher is being invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchEvent {
    /// A configuration was (re)applied to the port
    ConfigApplied,
    /// The RX line went idle with buffered data available to read
    DataReady,
    /// A write finished with TX buffer space left over
    TxSpaceAvailable,
}

/// Consumer-supplied notification sink
///
/// Invoked from the port's own execution context: `ConfigApplied` and
/// `TxSpaceAvailable` from the calling (consumer) context,
/// `DataReady` from the dispatch timer context. Implementations should
/// only flag work, not perform long reads inline.
pub trait Dispatcher {
    fn on_event(&mut self, port: PortIndex, event: DispatchEvent);
}
