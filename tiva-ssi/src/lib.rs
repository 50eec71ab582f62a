//! # tiva-ssi
//!
//! A `no_std` driver for the four Synchronous Serial Interface (SSI) units of
//! the TM4C123 family, used as SPI masters or slaves. It provides blocking
//! and interrupt-driven transmission from a per-channel software buffer,
//! interrupt-driven reception into a second buffer, and bit-rate divider
//! calculation.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Hardware | [`hw`] | Unit selector, register names, [`RegisterBlock`] trait, [`Mmio`] |
//! | Config | [`config`] | Static per-channel configuration table entries |
//! | Clocking | [`bitrate`] | Prescaler/divider calculation |
//! | State | [`channel`] | Transmit/receive buffers, cursors, Idle/Busy status |
//! | Engine | [`driver`] | [`Ssi`]: init, sync/async transmit, interrupt continuation |
//!
//! ## Quick start
//!
//! ```ignore
//! use tiva_ssi::config::{ChannelConfig, InterruptConfig};
//! use tiva_ssi::{Mmio, Ssi, Unit};
//!
//! static SSI_CONFIG: [ChannelConfig; 1] =
//!     [ChannelConfig::new(Unit::Ssi0, 1_000_000).with_interrupts(InterruptConfig::ALL)];
//! static SSI: Ssi<Mmio> = Ssi::new(unsafe { Mmio::new() }, &SSI_CONFIG);
//!
//! SSI.init()?;
//!
//! // Blocking
//! SSI.write_ib(Unit::Ssi0, &[0x06])?;
//! SSI.sync_transmit_timeout(Unit::Ssi0, &mut delay, 1_000)?;
//!
//! // Interrupt-driven; the SSI0 handler calls SSI.on_interrupt(Unit::Ssi0)
//! SSI.write_ib(Unit::Ssi0, &[0x02, 0x00, 0x10, 0xAB])?;
//! SSI.start_async_transfer(Unit::Ssi0)?;
//! while SSI.get_status(Unit::Ssi0) == Status::Busy {}
//!
//! let mut rx = [0u16; 16];
//! let n = SSI.read_ib(Unit::Ssi0, &mut rx)?;
//! ```
//!
//! ## Parameters
//!
//! - **Units:** 4 ([`constants::NUM_UNITS`])
//! - **Buffers:** 16 words each way ([`constants::TX_BUFFER_SIZE`], [`constants::RX_BUFFER_SIZE`])
//! - **Word:** `u16`, 4- to 16-bit frames
//! - **System clock:** 16 MHz by default ([`constants::SYSTEM_CLOCK_HZ`])
//!
//! Log output goes through the [`log`] facade.

#![no_std]

pub mod constants;
pub mod hw;
pub mod config;
pub mod bitrate;
pub mod channel;
pub mod driver;
mod error;

#[cfg(test)]
mod mock;


pub use channel::Status;
pub use driver::Ssi;
pub use error::Error;
pub use hw::{Mmio, Register, RegisterBlock, Unit};
