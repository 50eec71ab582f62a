//! Static channel configuration.
//!
//! The application supplies one [`ChannelConfig`] per unit it uses, normally
//! as a `static` table handed to [`Ssi::new`](crate::Ssi::new):
//!
//! ```
//! use embedded_hal::spi::MODE_3;
//! use tiva_ssi::config::{ChannelConfig, DataSize, InterruptConfig};
//! use tiva_ssi::Unit;
//!
//! static SSI_CONFIG: [ChannelConfig; 2] = [
//!     ChannelConfig::new(Unit::Ssi0, 1_000_000),
//!     ChannelConfig::new(Unit::Ssi2, 4_000_000)
//!         .with_spi_mode(MODE_3)
//!         .with_data_size(DataSize::SIXTEEN)
//!         .with_interrupts(InterruptConfig::ALL),
//! ];
//! ```

use embedded_hal::spi::{Mode, Phase, Polarity};

use crate::hw::registers as reg;
use crate::hw::Unit;

/// Master/slave selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Master,
    /// Slave driving SSInTx.
    Slave,
    /// Slave with SSInTx tri-stated (broadcast topologies).
    SlaveOutputDisabled,
}

/// When the transmit interrupt fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxInterruptMode {
    /// TX FIFO at most half full.
    FifoHalfEmpty,
    /// Last frame shifted out and TX FIFO empty.
    EndOfTransmission,
}

/// Baud clock source (SSICC.CS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    SystemClock = 0x0,
    Piosc = 0x5,
}

/// Frame protocol (SSICR0.FRF).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// Motorola/Freescale SPI.
    Freescale = 0,
    /// TI synchronous serial.
    TexasInstruments = 1,
    /// National Microwire.
    Microwire = 2,
}

/// Frame width in bits, 4..=16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSize(u8);

impl DataSize {
    pub const EIGHT: DataSize = DataSize(8);
    pub const SIXTEEN: DataSize = DataSize(16);

    /// Returns `None` outside the 4..=16 range the hardware supports.
    pub const fn new(bits: u8) -> Option<Self> {
        if bits >= 4 && bits <= 16 {
            Some(DataSize(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Encoding for SSICR0.DSS.
    pub(crate) const fn dss(self) -> u32 {
        (self.0 - 1) as u32
    }
}

/// Which interrupt sources [`Ssi::enable_interrupts`](crate::Ssi::enable_interrupts) unmasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptConfig {
    pub rx_overrun: bool,
    pub rx_timeout: bool,
    pub rx: bool,
    pub tx: bool,
}

impl InterruptConfig {
    pub const NONE: InterruptConfig = InterruptConfig {
        rx_overrun: false,
        rx_timeout: false,
        rx: false,
        tx: false,
    };

    pub const ALL: InterruptConfig = InterruptConfig {
        rx_overrun: true,
        rx_timeout: true,
        rx: true,
        tx: true,
    };

    /// SSIIM bits of the enabled sources.
    pub(crate) const fn mask_bits(&self) -> u32 {
        let mut bits = 0;
        if self.rx_overrun {
            bits |= reg::INT_ROR;
        }
        if self.rx_timeout {
            bits |= reg::INT_RT;
        }
        if self.rx {
            bits |= reg::INT_RX;
        }
        if self.tx {
            bits |= reg::INT_TX;
        }
        bits
    }
}

/// One entry of the configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub unit: Unit,
    pub mode: OperatingMode,
    pub loopback: bool,
    pub tx_interrupt_mode: TxInterruptMode,
    pub clock_source: ClockSource,
    pub polarity: Polarity,
    pub phase: Phase,
    pub frame_format: FrameFormat,
    pub data_size: DataSize,
    /// Target serial clock in Hz.
    pub bit_rate: u32,
    pub interrupts: InterruptConfig,
}

impl ChannelConfig {
    /// Master, SPI mode 0, 8-bit Freescale frames from the system clock,
    /// no interrupts.
    pub const fn new(unit: Unit, bit_rate: u32) -> Self {
        ChannelConfig {
            unit,
            mode: OperatingMode::Master,
            loopback: false,
            tx_interrupt_mode: TxInterruptMode::FifoHalfEmpty,
            clock_source: ClockSource::SystemClock,
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
            frame_format: FrameFormat::Freescale,
            data_size: DataSize::EIGHT,
            bit_rate,
            interrupts: InterruptConfig::NONE,
        }
    }

    pub const fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_loopback(mut self, loopback: bool) -> Self {
        self.loopback = loopback;
        self
    }

    pub const fn with_tx_interrupt_mode(mut self, tx_interrupt_mode: TxInterruptMode) -> Self {
        self.tx_interrupt_mode = tx_interrupt_mode;
        self
    }

    pub const fn with_clock_source(mut self, clock_source: ClockSource) -> Self {
        self.clock_source = clock_source;
        self
    }

    /// Set clock polarity and phase together.
    pub const fn with_spi_mode(mut self, mode: Mode) -> Self {
        self.polarity = mode.polarity;
        self.phase = mode.phase;
        self
    }

    pub const fn with_frame_format(mut self, frame_format: FrameFormat) -> Self {
        self.frame_format = frame_format;
        self
    }

    pub const fn with_data_size(mut self, data_size: DataSize) -> Self {
        self.data_size = data_size;
        self
    }

    pub const fn with_interrupts(mut self, interrupts: InterruptConfig) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Clock polarity and phase as an `embedded-hal` SPI mode.
    pub const fn spi_mode(&self) -> Mode {
        Mode {
            polarity: self.polarity,
            phase: self.phase,
        }
    }

    /// SSICR1 bits for mode, loopback and TX interrupt mode. SSE is never set here.
    pub(crate) const fn cr1_bits(&self) -> u32 {
        let mut bits = match self.mode {
            OperatingMode::Master => 0,
            OperatingMode::Slave => reg::CR1_MS,
            OperatingMode::SlaveOutputDisabled => reg::CR1_MS | reg::CR1_SOD,
        };
        if self.loopback {
            bits |= reg::CR1_LBM;
        }
        if let TxInterruptMode::EndOfTransmission = self.tx_interrupt_mode {
            bits |= reg::CR1_EOT;
        }
        bits
    }

    /// SSICR0 bits for phase, polarity, frame format and data size (SCR excluded).
    pub(crate) const fn cr0_format_bits(&self) -> u32 {
        let mut bits = ((self.frame_format as u32) << reg::CR0_FRF_SHIFT) | self.data_size.dss();
        if let Phase::CaptureOnSecondTransition = self.phase {
            bits |= reg::CR0_SPH;
        }
        if let Polarity::IdleHigh = self.polarity {
            bits |= reg::CR0_SPO;
        }
        bits
    }
}
