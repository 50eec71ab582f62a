//! SSI register offsets and bitfield definitions.
//!
//! Taken from the TM4C123GH6PM datasheet, section 15.6. Offsets are relative
//! to the base address of each unit; all registers are 32 bits wide.

// ── Base addresses ─────────────────────────────────────────────────────────

pub const SSI0_BASE: usize = 0x4000_8000;
pub const SSI1_BASE: usize = 0x4000_9000;
pub const SSI2_BASE: usize = 0x4000_A000;
pub const SSI3_BASE: usize = 0x4000_B000;

// ── Control 0 ──────────────────────────────────────────────────────────────

/// Control 0.
/// - Bits 15:8: SCR (serial clock rate divider)
/// - Bit  7   : SPH (clock phase)
/// - Bit  6   : SPO (clock polarity)
/// - Bits 5:4 : FRF (0=Freescale SPI, 1=TI SSF, 2=Microwire)
/// - Bits 3:0 : DSS (data size select, value = bits - 1)
pub const SSICR0: usize = 0x000;

pub const CR0_SCR_SHIFT: u32 = 8;
pub const CR0_SCR_MASK: u32 = 0xFF << CR0_SCR_SHIFT;
pub const CR0_SPH: u32 = 1 << 7;
pub const CR0_SPO: u32 = 1 << 6;
pub const CR0_FRF_SHIFT: u32 = 4;
pub const CR0_FRF_MASK: u32 = 0x3 << CR0_FRF_SHIFT;
pub const CR0_DSS_MASK: u32 = 0xF;

// ── Control 1 ──────────────────────────────────────────────────────────────

/// Control 1.
/// - Bit 4: EOT (TXRIS on end of transmission instead of FIFO half-empty)
/// - Bit 3: SOD (slave mode output disable)
/// - Bit 2: MS  (0=master, 1=slave)
/// - Bit 1: SSE (port enable)
/// - Bit 0: LBM (loopback mode)
pub const SSICR1: usize = 0x004;

pub const CR1_EOT: u32 = 1 << 4;
pub const CR1_SOD: u32 = 1 << 3;
pub const CR1_MS: u32 = 1 << 2;
pub const CR1_SSE: u32 = 1 << 1;
pub const CR1_LBM: u32 = 1 << 0;

// ── Data and status ────────────────────────────────────────────────────────

/// Data register. Writes push the TX FIFO, reads pop the RX FIFO.
pub const SSIDR: usize = 0x008;

/// Status.
/// - Bit 4: BSY (frame being shifted or TX FIFO not empty)
/// - Bit 3: RFF (RX FIFO full)
/// - Bit 2: RNE (RX FIFO not empty)
/// - Bit 1: TNF (TX FIFO not full)
/// - Bit 0: TFE (TX FIFO empty)
pub const SSISR: usize = 0x00C;

pub const SR_BSY: u32 = 1 << 4;
pub const SR_RNE: u32 = 1 << 2;
pub const SR_TNF: u32 = 1 << 1;

// ── Clocking ───────────────────────────────────────────────────────────────

/// Clock prescale (CPSDVSR, bits 7:0, even values 2..=254).
pub const SSICPSR: usize = 0x010;

/// Clock configuration (CS, bits 3:0: 0x0=system clock, 0x5=PIOSC).
pub const SSICC: usize = 0xFC8;

// ── Interrupts ─────────────────────────────────────────────────────────────

/// Interrupt mask. On this part a cleared bit leaves the source enabled.
/// - Bit 3: TXIM
/// - Bit 2: RXIM
/// - Bit 1: RTIM
/// - Bit 0: RORIM
pub const SSIIM: usize = 0x014;

/// Masked interrupt status (same bit layout as SSIIM). The raw status
/// register at 0x018 is not used by the driver.
pub const SSIMIS: usize = 0x01C;

/// Interrupt clear (write-1-to-clear).
/// - Bit 1: RTIC
/// - Bit 0: RORIC
pub const SSIICR: usize = 0x020;

pub const INT_TX: u32 = 1 << 3;
pub const INT_RX: u32 = 1 << 2;
pub const INT_RT: u32 = 1 << 1;
pub const INT_ROR: u32 = 1 << 0;

/// All four interrupt sources.
pub const INT_ALL: u32 = INT_TX | INT_RX | INT_RT | INT_ROR;

pub const ICR_RTIC: u32 = 1 << 1;
pub const ICR_RORIC: u32 = 1 << 0;
