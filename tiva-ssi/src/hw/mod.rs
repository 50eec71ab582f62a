//! Register-level access to the SSI units.
//!
//! The driver never touches memory directly. Every register access goes
//! through [`RegisterBlock`], which the real part implements with volatile
//! loads and stores ([`Mmio`]) and the host tests implement with a recording
//! mock.

pub(crate) mod registers;
mod mmio;

pub use mmio::Mmio;

use crate::constants::NUM_UNITS;

/// One physical SSI unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Ssi0 = 0,
    Ssi1 = 1,
    Ssi2 = 2,
    Ssi3 = 3,
}

impl Unit {
    /// Every unit, in index order.
    #[cfg(test)]
    pub const ALL: [Unit; NUM_UNITS] = [Unit::Ssi0, Unit::Ssi1, Unit::Ssi2, Unit::Ssi3];

    /// Zero-based index of this unit.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Base address of this unit's register block.
    pub const fn base_address(self) -> usize {
        match self {
            Unit::Ssi0 => registers::SSI0_BASE,
            Unit::Ssi1 => registers::SSI1_BASE,
            Unit::Ssi2 => registers::SSI2_BASE,
            Unit::Ssi3 => registers::SSI3_BASE,
        }
    }
}

/// The SSI registers the driver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Cr0,
    Cr1,
    Dr,
    Sr,
    Cpsr,
    Im,
    Mis,
    Icr,
    Cc,
}

impl Register {
    /// Byte offset from the unit's base address.
    pub const fn offset(self) -> usize {
        match self {
            Register::Cr0 => registers::SSICR0,
            Register::Cr1 => registers::SSICR1,
            Register::Dr => registers::SSIDR,
            Register::Sr => registers::SSISR,
            Register::Cpsr => registers::SSICPSR,
            Register::Im => registers::SSIIM,
            Register::Mis => registers::SSIMIS,
            Register::Icr => registers::SSIICR,
            Register::Cc => registers::SSICC,
        }
    }
}

/// Read/write access to the registers of every SSI unit.
///
/// Methods take `&self` so that one instance can be shared between thread
/// mode and interrupt handlers; implementations must tolerate that.
pub trait RegisterBlock {
    /// Read a 32-bit register.
    fn read(&self, unit: Unit, register: Register) -> u32;

    /// Write a 32-bit register.
    fn write(&self, unit: Unit, register: Register, value: u32);

    /// Read-modify-write: `new = (current & !mask) | (value & mask)`.
    fn modify(&self, unit: Unit, register: Register, value: u32, mask: u32) -> u32 {
        let new_val = (self.read(unit, register) & !mask) | (value & mask);
        self.write(unit, register, new_val);
        new_val
    }

    /// Set every bit of `bits`, leaving the others untouched.
    fn set_bits(&self, unit: Unit, register: Register, bits: u32) {
        self.modify(unit, register, bits, bits);
    }

    /// Clear every bit of `bits`, leaving the others untouched.
    fn clear_bits(&self, unit: Unit, register: Register, bits: u32) {
        self.modify(unit, register, 0, bits);
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &T {
    #[inline]
    fn read(&self, unit: Unit, register: Register) -> u32 {
        (**self).read(unit, register)
    }

    #[inline]
    fn write(&self, unit: Unit, register: Register, value: u32) {
        (**self).write(unit, register, value)
    }
}
