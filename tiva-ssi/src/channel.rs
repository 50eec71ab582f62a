//! Per-channel transfer state.
//!
//! A [`Channel`] holds the software transmit and receive buffers of one unit
//! together with their cursors and the Idle/Busy status. It knows nothing
//! about registers; the transfer engine in [`driver`](crate::driver) moves
//! words between these buffers and the hardware FIFOs.
//!
//! Invariants kept by every method:
//!
//! - `tx_index <= tx_length <= TX_BUFFER_SIZE`
//! - `rx_index <= RX_BUFFER_SIZE`

use crate::constants::{Word, RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use crate::error::Error;

/// Transfer status of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Busy,
}

/// Buffers, cursors and status of one unit.
pub struct Channel {
    pub(crate) status: Status,
    tx_buffer: [Word; TX_BUFFER_SIZE],
    /// Next word to push into the TX FIFO.
    pub(crate) tx_index: usize,
    /// Number of valid words in `tx_buffer`.
    pub(crate) tx_length: usize,
    rx_buffer: [Word; RX_BUFFER_SIZE],
    /// Number of words received since the last read.
    pub(crate) rx_index: usize,
    pub(crate) overruns: u32,
    /// Set while the interrupt continuation owns the in-flight transfer.
    pub(crate) interrupt_driven: bool,
    /// RX/RT mask bits set because `rx_buffer` filled up; cleared on read.
    pub(crate) rx_masked: u32,
}

impl Channel {
    pub const fn new() -> Self {
        Channel {
            status: Status::Idle,
            tx_buffer: [0; TX_BUFFER_SIZE],
            tx_index: 0,
            tx_length: 0,
            rx_buffer: [0; RX_BUFFER_SIZE],
            rx_index: 0,
            overruns: 0,
            interrupt_driven: false,
            rx_masked: 0,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_idle(&self) -> bool {
        self.status == Status::Idle
    }

    /// Replace the queued transmit data with `words`.
    ///
    /// Oversized payloads are rejected without touching the buffer, as is any
    /// write while a transfer is in flight.
    pub fn write(&mut self, words: &[Word]) -> Result<(), Error> {
        if words.len() > TX_BUFFER_SIZE {
            return Err(Error::CapacityExceeded);
        }
        if self.status == Status::Busy {
            return Err(Error::Busy);
        }
        self.tx_buffer[..words.len()].copy_from_slice(words);
        self.tx_length = words.len();
        self.tx_index = 0;
        Ok(())
    }

    /// Move received words into `dest` and mark them consumed.
    ///
    /// Copies at most `dest.len()` words; any excess is dropped along with the
    /// rest of the receive buffer. Returns the number of words copied.
    pub fn read(&mut self, dest: &mut [Word]) -> Result<usize, Error> {
        if self.rx_index == 0 {
            return Err(Error::NoData);
        }
        let count = self.rx_index.min(dest.len());
        dest[..count].copy_from_slice(&self.rx_buffer[..count]);
        self.rx_index = 0;
        Ok(count)
    }

    /// Word at the transmit cursor, if any remain.
    pub(crate) fn next_tx_word(&self) -> Option<Word> {
        if self.tx_index < self.tx_length {
            Some(self.tx_buffer[self.tx_index])
        } else {
            None
        }
    }

    pub(crate) fn tx_remaining(&self) -> bool {
        self.tx_index < self.tx_length
    }

    pub(crate) fn rx_full(&self) -> bool {
        self.rx_index >= RX_BUFFER_SIZE
    }

    /// Append one received word. Returns `false` when the buffer is full.
    pub(crate) fn push_rx(&mut self, word: Word) -> bool {
        if self.rx_full() {
            return false;
        }
        self.rx_buffer[self.rx_index] = word;
        self.rx_index += 1;
        true
    }

    /// A blocking transfer is in flight; the interrupt path keeps out.
    pub(crate) fn is_blocking(&self) -> bool {
        self.status == Status::Busy && !self.interrupt_driven
    }

    /// Whether a TX interrupt has words to push for this channel: either an
    /// interrupt-driven transfer is in flight, or frames were primed by hand
    /// on an Idle channel and the rest of the buffer is still queued.
    pub(crate) fn continues_on_tx_interrupt(&self) -> bool {
        match self.status {
            Status::Busy => self.interrupt_driven,
            Status::Idle => self.tx_index > 0 && self.tx_remaining(),
        }
    }

    /// Back to Idle with the transmit cursor rewound.
    pub(crate) fn finish(&mut self) {
        self.tx_index = 0;
        self.status = Status::Idle;
        self.interrupt_driven = false;
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}
