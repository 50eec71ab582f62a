use core::ptr;

use super::{Register, RegisterBlock, Unit};

/// Volatile memory-mapped access to the on-chip SSI register blocks.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create the MMIO accessor.
    ///
    /// # Safety
    ///
    /// The caller must own SSI0..SSI3 exclusively (no other driver or PAC
    /// handle writes them) and must have enabled the run-mode clock of every
    /// unit that is configured, otherwise accesses fault.
    pub const unsafe fn new() -> Self {
        Mmio { _private: () }
    }

    #[inline(always)]
    fn address(unit: Unit, register: Register) -> *mut u32 {
        (unit.base_address() + register.offset()) as *mut u32
    }
}

impl RegisterBlock for Mmio {
    #[inline]
    fn read(&self, unit: Unit, register: Register) -> u32 {
        // SAFETY: the address is an aligned SSI register (fixed datasheet ABI)
        // and `Mmio::new` guarantees the block is clocked and ours.
        unsafe { ptr::read_volatile(Self::address(unit, register)) }
    }

    #[inline]
    fn write(&self, unit: Unit, register: Register, value: u32) {
        // SAFETY: see `read`.
        unsafe { ptr::write_volatile(Self::address(unit, register), value) }
    }
}
