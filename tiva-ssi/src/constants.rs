/// Number of SSI units on the part (SSI0..SSI3).
pub const NUM_UNITS: usize = 4;

/// Capacity of each channel's transmit buffer, in words.
pub const TX_BUFFER_SIZE: usize = 16;

/// Capacity of each channel's receive buffer, in words.
pub const RX_BUFFER_SIZE: usize = 16;

/// Depth of the hardware transmit and receive FIFOs, in frames.
pub const FIFO_DEPTH: usize = 8;

/// Default system clock frequency in Hz (16 MHz precision internal oscillator).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// One frame on the wire. Frames narrower than 16 bits are right-justified.
pub type Word = u16;
