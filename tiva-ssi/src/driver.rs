//! The SSI transfer engine.
//!
//! [`Ssi`] owns the register interface, the configuration table and one
//! [`Channel`] per unit. It offers two transmit paths:
//!
//! - **Synchronous** ([`sync_transmit`](Ssi::sync_transmit)): writes one
//!   frame at a time and polls BSY between frames. Runs on the caller's
//!   context and must not be used from an interrupt handler.
//! - **Asynchronous** ([`start_async_transfer`](Ssi::start_async_transfer)):
//!   fills the TX FIFO as far as it goes and returns. Each TX interrupt
//!   routed to [`on_interrupt`](Ssi::on_interrupt) refills it until the
//!   buffer is drained, then the unit's interrupts are masked and the channel
//!   goes back to Idle.
//!
//! Received frames are collected into the channel's receive buffer by the
//! interrupt continuation (and after each frame on the synchronous path) and
//! handed out by [`read_ib`](Ssi::read_ib).
//!
//! ## Locking
//!
//! Each channel sits in a `critical_section::Mutex<RefCell<_>>`. The Idle
//! check and the state change it admits always happen inside one critical
//! section. The synchronous path releases the lock while it waits on BSY;
//! the channel stays Busy meanwhile, so buffer writes are refused. A channel
//! records whether its transfer is interrupt-driven, and the TX interrupt
//! only ever continues that kind (or frames primed with
//! [`async_transmit`](Ssi::async_transmit)). A TX interrupt with nothing to
//! continue masks TXIM, since the source is level-triggered and cannot be
//! cleared through ICR.
//!
//! When the receive buffer fills up, the RX and RT sources are masked until
//! the next [`read_ib`](Ssi::read_ib) so a FIFO that cannot be drained does
//! not keep the handler re-entering.
//!
//! ## Usage
//!
//! ```ignore
//! static SSI_CONFIG: [ChannelConfig; 1] =
//!     [ChannelConfig::new(Unit::Ssi0, 1_000_000).with_interrupts(InterruptConfig::ALL)];
//! static SSI: Ssi<Mmio> = Ssi::new(unsafe { Mmio::new() }, &SSI_CONFIG);
//!
//! SSI.init()?;
//! SSI.write_ib(Unit::Ssi0, &[0x9F, 0, 0, 0])?;
//! SSI.start_async_transfer(Unit::Ssi0)?;
//!
//! #[interrupt]
//! fn SSI0() {
//!     SSI.on_interrupt(Unit::Ssi0);
//! }
//! ```

use core::cell::{RefCell, RefMut};

use critical_section::{CriticalSection, Mutex};
use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::bitrate;
use crate::channel::{Channel, Status};
use crate::config::ChannelConfig;
use crate::constants::{Word, NUM_UNITS, SYSTEM_CLOCK_HZ};
use crate::error::Error;
use crate::hw::registers as reg;
use crate::hw::{Register, RegisterBlock, Unit};

/// SSI driver for all units.
pub struct Ssi<R> {
    regs: R,
    config: &'static [ChannelConfig],
    system_clock_hz: u32,
    channels: [Mutex<RefCell<Channel>>; NUM_UNITS],
}

impl<R: RegisterBlock> Ssi<R> {
    /// Create a driver clocked from [`SYSTEM_CLOCK_HZ`]. Nothing is written
    /// to the hardware until [`init`](Self::init).
    pub const fn new(regs: R, config: &'static [ChannelConfig]) -> Self {
        Self::with_system_clock(regs, config, SYSTEM_CLOCK_HZ)
    }

    /// Create a driver for a part running from a different system clock.
    #[allow(clippy::declare_interior_mut_const)]
    pub const fn with_system_clock(
        regs: R,
        config: &'static [ChannelConfig],
        system_clock_hz: u32,
    ) -> Self {
        const IDLE: Mutex<RefCell<Channel>> = Mutex::new(RefCell::new(Channel::new()));
        Ssi {
            regs,
            config,
            system_clock_hz,
            channels: [IDLE; NUM_UNITS],
        }
    }

    fn channel<'cs>(&'cs self, cs: CriticalSection<'cs>, unit: Unit) -> RefMut<'cs, Channel> {
        self.channels[unit.index()].borrow_ref_mut(cs)
    }

    fn with_channel<T>(&self, unit: Unit, f: impl FnOnce(&mut Channel) -> T) -> T {
        critical_section::with(|cs| {
            let mut ch = self.channel(cs, unit);
            f(&mut *ch)
        })
    }

    /// Configuration entry for `unit`, if the table has one.
    pub fn config(&self, unit: Unit) -> Option<&'static ChannelConfig> {
        self.config.iter().find(|c| c.unit == unit)
    }

    /// Program every unit in the configuration table and mark its channel Idle.
    ///
    /// Each unit is disabled for the duration of its register sequence. A
    /// bit rate the clock tree cannot produce is reported before that unit
    /// is touched; units earlier in the table stay configured.
    pub fn init(&self) -> Result<(), Error> {
        for cfg in self.config {
            let unit = cfg.unit;
            let divisors = bitrate::clock_divisors(self.system_clock_hz, cfg.bit_rate)?;

            self.regs.clear_bits(unit, Register::Cr1, reg::CR1_SSE);
            self.regs.modify(
                unit,
                Register::Cr1,
                cfg.cr1_bits(),
                reg::CR1_MS | reg::CR1_SOD | reg::CR1_LBM | reg::CR1_EOT,
            );
            self.regs.write(unit, Register::Cc, cfg.clock_source as u32);
            self.regs.write(unit, Register::Cpsr, divisors.prescaler as u32);
            self.regs.modify(
                unit,
                Register::Cr0,
                (divisors.divider as u32) << reg::CR0_SCR_SHIFT,
                reg::CR0_SCR_MASK,
            );
            self.regs.modify(
                unit,
                Register::Cr0,
                cfg.cr0_format_bits(),
                reg::CR0_SPH | reg::CR0_SPO | reg::CR0_FRF_MASK | reg::CR0_DSS_MASK,
            );
            self.regs.set_bits(unit, Register::Cr1, reg::CR1_SSE);

            self.with_channel(unit, Channel::finish);

            debug!(
                "SSI{}: {} Hz requested, CPSDVSR={} SCR={} ({} Hz)",
                unit.index(),
                cfg.bit_rate,
                divisors.prescaler,
                divisors.divider,
                bitrate::achieved_bit_rate(self.system_clock_hz, divisors)
            );
        }
        Ok(())
    }

    /// Unmask the interrupt sources enabled for `unit` in its configuration.
    ///
    /// Sources not enabled there keep their mask bit.
    pub fn enable_interrupts(&self, unit: Unit) {
        let bits = match self.config(unit) {
            Some(cfg) => cfg.interrupts.mask_bits(),
            None => 0,
        };
        if bits != 0 {
            self.regs.clear_bits(unit, Register::Im, bits);
        }
    }

    /// Mask all four interrupt sources of `unit`.
    pub fn disable_interrupts(&self, unit: Unit) {
        self.regs.set_bits(unit, Register::Im, reg::INT_ALL);
    }

    pub fn get_status(&self, unit: Unit) -> Status {
        self.with_channel(unit, |ch| ch.status())
    }

    /// Queue `words` for the next transfer on `unit`.
    pub fn write_ib(&self, unit: Unit, words: &[Word]) -> Result<(), Error> {
        self.with_channel(unit, |ch| ch.write(words))
    }

    /// Copy words received on `unit` into `dest` and return how many were copied.
    ///
    /// Receive interrupts masked because the buffer was full are unmasked again.
    pub fn read_ib(&self, unit: Unit, dest: &mut [Word]) -> Result<usize, Error> {
        self.with_channel(unit, |ch| {
            let count = ch.read(dest)?;
            let masked = core::mem::take(&mut ch.rx_masked);
            if masked != 0 {
                self.regs.clear_bits(unit, Register::Im, masked);
            }
            Ok(count)
        })
    }

    /// Receive-overrun events seen on `unit` since start-up.
    pub fn overrun_count(&self, unit: Unit) -> u32 {
        self.with_channel(unit, |ch| ch.overruns)
    }

    /// Push the word at the transmit cursor and advance the cursor.
    ///
    /// This primes a single frame only: it neither marks the channel Busy nor
    /// unmasks interrupts. [`start_async_transfer`](Self::start_async_transfer)
    /// does all three. Once the caller unmasks TX, the next TX interrupt
    /// carries on from the cursor.
    pub fn async_transmit(&self, unit: Unit) -> Result<(), Error> {
        self.with_channel(unit, |ch| {
            if !ch.is_idle() {
                return Err(Error::NotIdle);
            }
            if let Some(word) = ch.next_tx_word() {
                self.regs.write(unit, Register::Dr, word.into());
                ch.tx_index += 1;
            }
            Ok(())
        })
    }

    /// Start an interrupt-driven transfer of the queued buffer.
    ///
    /// Marks the channel Busy, unmasks its configured interrupts and fills the
    /// TX FIFO. The rest of the buffer is sent from [`on_interrupt`](Self::on_interrupt).
    pub fn start_async_transfer(&self, unit: Unit) -> Result<(), Error> {
        self.with_channel(unit, |ch| {
            if !ch.is_idle() {
                return Err(Error::NotIdle);
            }
            debug!("SSI{}: async transfer of {} words", unit.index(), ch.tx_length);
            ch.tx_index = 0;
            self.enable_interrupts(unit);
            self.refill(unit, ch);
            Ok(())
        })
    }

    /// Push queued words while the TX FIFO has room.
    ///
    /// Marks the channel Busy. Once the last word is in the FIFO the unit's
    /// interrupts are masked and the channel returns to Idle. Does nothing
    /// while a blocking transfer owns the channel.
    pub fn refill_tx_fifo(&self, unit: Unit) {
        self.with_channel(unit, |ch| {
            if ch.is_blocking() {
                trace!("SSI{}: refill refused, blocking transfer in flight", unit.index());
                return;
            }
            self.refill(unit, ch);
        });
    }

    fn refill(&self, unit: Unit, ch: &mut Channel) {
        ch.status = Status::Busy;
        ch.interrupt_driven = true;
        while let Some(word) = ch.next_tx_word() {
            if self.regs.read(unit, Register::Sr) & reg::SR_TNF == 0 {
                break;
            }
            self.regs.write(unit, Register::Dr, word.into());
            ch.tx_index += 1;
        }

        if ch.tx_remaining() {
            trace!("SSI{}: TX FIFO full at {}/{}", unit.index(), ch.tx_index, ch.tx_length);
        } else {
            self.disable_interrupts(unit);
            ch.rx_masked = 0;
            ch.finish();
            debug!("SSI{}: async transfer complete", unit.index());
        }
    }

    fn drain_rx(&self, unit: Unit, ch: &mut Channel) {
        while !ch.rx_full() && self.regs.read(unit, Register::Sr) & reg::SR_RNE != 0 {
            // Frames are at most 16 bits wide; the upper half of DR reads as zero.
            let word = self.regs.read(unit, Register::Dr) as Word;
            ch.push_rx(word);
        }

        if ch.rx_full() && ch.rx_masked == 0 {
            let enabled = !self.regs.read(unit, Register::Im) & (reg::INT_RX | reg::INT_RT);
            if enabled != 0 {
                self.regs.set_bits(unit, Register::Im, enabled);
                ch.rx_masked = enabled;
                debug!("SSI{}: receive buffer full, RX interrupts masked", unit.index());
            }
        }
    }

    fn is_busy(&self, unit: Unit) -> bool {
        self.regs.read(unit, Register::Sr) & reg::SR_BSY != 0
    }

    /// Send the queued buffer frame by frame, waiting on BSY after each one.
    ///
    /// The wait has no bound: if the unit never clears BSY this call never
    /// returns. Prefer [`sync_transmit_timeout`](Self::sync_transmit_timeout)
    /// unless the bus is known to be healthy.
    pub fn sync_transmit(&self, unit: Unit) -> Result<(), Error> {
        self.transmit_blocking(unit, || {
            while self.is_busy(unit) {
                core::hint::spin_loop();
            }
            Ok(())
        })
    }

    /// Like [`sync_transmit`](Self::sync_transmit), but gives up when a single
    /// frame keeps the unit busy for more than `timeout_us` microseconds.
    ///
    /// On timeout the channel is returned to Idle with its cursor rewound;
    /// frames already in the FIFO are not recalled.
    pub fn sync_transmit_timeout<D: DelayNs>(
        &self,
        unit: Unit,
        delay: &mut D,
        timeout_us: u32,
    ) -> Result<(), Error> {
        self.transmit_blocking(unit, || {
            let mut waited_us = 0;
            while self.is_busy(unit) {
                if waited_us >= timeout_us {
                    warn!("SSI{}: BSY stuck for {} us", unit.index(), timeout_us);
                    return Err(Error::Timeout);
                }
                delay.delay_us(1);
                waited_us += 1;
            }
            Ok(())
        })
    }

    fn transmit_blocking(
        &self,
        unit: Unit,
        mut wait: impl FnMut() -> Result<(), Error>,
    ) -> Result<(), Error> {
        let length = self.with_channel(unit, |ch| {
            if !ch.is_idle() {
                return Err(Error::NotIdle);
            }
            ch.status = Status::Busy;
            ch.interrupt_driven = false;
            ch.tx_index = 0;
            Ok(ch.tx_length)
        })?;
        debug!("SSI{}: sync transfer of {} words", unit.index(), length);

        let mut result = Ok(());
        for _ in 0..length {
            self.with_channel(unit, |ch| {
                if let Some(word) = ch.next_tx_word() {
                    self.regs.write(unit, Register::Dr, word.into());
                    ch.tx_index += 1;
                }
            });
            if let Err(e) = wait() {
                result = Err(e);
                break;
            }
            self.with_channel(unit, |ch| self.drain_rx(unit, ch));
        }

        self.with_channel(unit, Channel::finish);
        result
    }

    /// Interrupt continuation for `unit`.
    ///
    /// Call from the unit's interrupt handler. Handles every source flagged
    /// in the masked interrupt status:
    ///
    /// - receive overrun: cleared and counted
    /// - receive / receive timeout: RX FIFO drained into the receive buffer
    /// - transmit: TX FIFO refilled if an interrupt-driven transfer is in
    ///   flight or frames were primed with [`async_transmit`](Self::async_transmit);
    ///   otherwise TXIM is masked
    pub fn on_interrupt(&self, unit: Unit) {
        let status = self.regs.read(unit, Register::Mis);

        critical_section::with(|cs| {
            let mut ch = self.channel(cs, unit);

            if status & reg::INT_ROR != 0 {
                self.regs.write(unit, Register::Icr, reg::ICR_RORIC);
                ch.overruns = ch.overruns.wrapping_add(1);
                warn!("SSI{}: receive overrun", unit.index());
            }

            if status & (reg::INT_RX | reg::INT_RT) != 0 {
                self.drain_rx(unit, &mut ch);
            }

            if status & reg::INT_RT != 0 {
                self.regs.write(unit, Register::Icr, reg::ICR_RTIC);
            }

            if status & reg::INT_TX != 0 {
                if ch.continues_on_tx_interrupt() {
                    self.refill(unit, &mut ch);
                } else {
                    // Level-triggered on FIFO space; no ICR bit to clear it
                    self.regs.set_bits(unit, Register::Im, reg::INT_TX);
                    trace!("SSI{}: TX interrupt with nothing queued, TXIM masked", unit.index());
                }
            }
        });
    }
}
