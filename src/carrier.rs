//! Carrier burst generation.
//!
//! Bit-banged square wave on a single output pin. Every half-cycle is a
//! blocking busy-wait, so the caller is occupied for exactly
//! `pulses * carrier_period` and must not be preempted meanwhile.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::profile::ProtocolProfile;

/// Precomputed carrier half-cycle timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarrierGenerator {
    high_ns: u32,
    low_ns: u32,
}

impl CarrierGenerator {
    pub const fn new(profile: &ProtocolProfile) -> Self {
        Self {
            high_ns: profile.mark_high_ns(),
            low_ns: profile.mark_low_ns(),
        }
    }

    #[inline]
    pub const fn high_ns(&self) -> u32 {
        self.high_ns
    }

    #[inline]
    pub const fn low_ns(&self) -> u32 {
        self.low_ns
    }

    /// Emit `pulses` carrier cycles: high for `high_ns`, then low for `low_ns`.
    ///
    /// The pin is left low afterwards. `pulses == 0` touches nothing.
    #[inline]
    pub fn emit_burst<P, D>(&self, pin: &mut P, delay: &mut D, pulses: u16) -> Result<(), P::Error>
    where
        P: OutputPin,
        D: DelayNs,
    {
        for _ in 0..pulses {
            pin.set_high()?;
            delay.delay_ns(self.high_ns);
            pin.set_low()?;
            delay.delay_ns(self.low_ns);
        }
        Ok(())
    }
}
