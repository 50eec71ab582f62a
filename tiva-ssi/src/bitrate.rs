//! Serial clock divider calculation.
//!
//! The SSI clock is `SysClk / (CPSDVSR * (1 + SCR))`, where the prescaler
//! CPSDVSR must be even (2..=254) and SCR is 0..=255. The calculator prefers
//! putting the whole division into the prescaler; when the ratio is odd or
//! too large for it, it falls back to the smallest prescaler and carries the
//! ratio in SCR.

use core::fmt;

/// Largest prescaler value (CPSDVSR) the hardware accepts.
pub const MAX_PRESCALER: u32 = 254;

/// Largest serial clock rate divider (SCR).
pub const MAX_DIVIDER: u32 = 255;

/// Prescaler used on the fallback path.
pub const FALLBACK_PRESCALER: u8 = 2;

/// Prescaler / divider pair programmed into SSICPSR and SSICR0.SCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDivisors {
    pub prescaler: u8,
    pub divider: u8,
}

/// Target bit rate the hardware cannot produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitRateError {
    /// Bit rate of 0 Hz.
    Zero,
    /// Bit rate above half the system clock.
    TooFast,
    /// Ratio needs a divider above 255.
    TooSlow,
}

impl fmt::Display for BitRateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BitRateError::Zero => "bit rate is zero",
            BitRateError::TooFast => "bit rate above half the system clock",
            BitRateError::TooSlow => "bit rate below the slowest divisor",
        };
        f.write_str(s)
    }
}

/// Compute the divisors for `bit_rate` from `system_clock_hz`.
///
/// `ratio = system_clock_hz / bit_rate` (integer floor). An even ratio up to
/// 254 becomes the prescaler with divider 0; any other ratio yields
/// prescaler 2 and divider `ratio - 1`.
pub const fn clock_divisors(system_clock_hz: u32, bit_rate: u32) -> Result<ClockDivisors, BitRateError> {
    if bit_rate == 0 {
        return Err(BitRateError::Zero);
    }
    let ratio = system_clock_hz / bit_rate;
    if ratio < 2 {
        return Err(BitRateError::TooFast);
    }
    if ratio <= MAX_PRESCALER && ratio % 2 == 0 {
        return Ok(ClockDivisors {
            prescaler: ratio as u8,
            divider: 0,
        });
    }
    if ratio - 1 > MAX_DIVIDER {
        return Err(BitRateError::TooSlow);
    }
    Ok(ClockDivisors {
        prescaler: FALLBACK_PRESCALER,
        divider: (ratio - 1) as u8,
    })
}

/// Serial clock actually produced by `divisors`.
pub const fn achieved_bit_rate(system_clock_hz: u32, divisors: ClockDivisors) -> u32 {
    system_clock_hz / (divisors.prescaler as u32 * (1 + divisors.divider as u32))
}
