//! Bounded byte FIFOs for the RX and TX queues
//!
//! Backed by a fixed-capacity `heapless::Vec` with a runtime-configured
//! logical capacity, so (re)configuration can size the queues without
//! allocation. Consumption removes from the front.

use heapless::Vec;

/// Backing capacity of a [`ByteFifo`]; configured capacities must not
/// exceed it
pub const MAX_BUFFER_CAPACITY: usize = 1024;

/// Bounded FIFO byte queue
#[derive(Debug, Default)]
pub struct ByteFifo {
    data: Vec<u8, MAX_BUFFER_CAPACITY>,
    capacity: usize,
}

impl ByteFifo {
    /// An unconfigured FIFO with zero capacity
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Reconfigure the logical capacity, dropping any current contents
    ///
    /// Capacities beyond the backing storage are clamped.
    pub fn reset(&mut self, capacity: usize) {
        self.data.clear();
        self.capacity = capacity.min(MAX_BUFFER_CAPACITY);
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the FIFO holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Configured logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remaining space before the configured capacity is reached
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.data.len())
    }

    /// Append one byte; false when the FIFO is full
    pub fn push(&mut self, byte: u8) -> bool {
        if self.data.len() < self.capacity {
            // len < capacity <= MAX_BUFFER_CAPACITY, cannot fail
            let _ = self.data.push(byte);
            true
        } else {
            false
        }
    }

    /// Append as many of `bytes` as fit; returns the accepted count
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.available());
        let _ = self.data.extend_from_slice(&bytes[..n]);
        n
    }

    /// The buffered bytes, oldest first
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Remove up to `n` bytes from the front; returns the removed count
    pub fn consume(&mut self, n: usize) -> usize {
        let n = n.min(self.data.len());
        let remaining = self.data.len() - n;
        self.data.as_mut_slice().copy_within(n.., 0);
        self.data.truncate(remaining);
        n
    }

    /// Drop all buffered bytes, keeping the capacity
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
