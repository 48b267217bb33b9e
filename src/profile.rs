//! Module: profile
//!
//! Purpose: Protocol constants for pulse-width encoded IR remotes.
//!
//! Architecture:
//! - One immutable `ProtocolProfile` per protocol variant
//! - Timing derived from carrier frequency and duty cycle at compile time
//! - Supporting another pulse-width protocol means supplying another profile
//!
//! Safety: Safe. Const data only.

use crate::error::ProfileError;

/// Widest field a profile may declare. Device and command values are `u8`.
pub const MAX_FIELD_BITS: u8 = 8;

/// Immutable constant set describing one pulse-width IR protocol.
///
/// A "pulse" is one full carrier cycle: output high for
/// [`mark_high_ns`](Self::mark_high_ns), then low for
/// [`mark_low_ns`](Self::mark_low_ns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolProfile {
    /// Carrier frequency in Hz.
    pub carrier_hz: u32,
    /// Share of each carrier cycle spent high, in percent.
    pub duty_percent: u8,
    /// Pulses in the start (sync) burst.
    pub start_pulses: u16,
    /// Pulses encoding a one bit.
    pub one_pulses: u16,
    /// Pulses encoding a zero bit.
    pub zero_pulses: u16,
    /// Idle interval after every burst, in microseconds.
    pub space_us: u32,
    /// Command field width in bits.
    pub command_bits: u8,
    /// Device field width in bits.
    pub device_bits: u8,
}

/// Sony SIRC, 12-bit variant: 7-bit command, 5-bit device.
///
/// 40 kHz carrier split 12 µs high / 13 µs low, 600 µs spaces.
pub const SIRC_12: ProtocolProfile = ProtocolProfile {
    carrier_hz: 40_000,
    duty_percent: 48,
    start_pulses: 96,
    one_pulses: 48,
    zero_pulses: 24,
    space_us: 600,
    command_bits: 7,
    device_bits: 5,
};

/// Sony SIRC, 15-bit variant: 7-bit command, 8-bit device.
pub const SIRC_15: ProtocolProfile = ProtocolProfile {
    device_bits: 8,
    ..SIRC_12
};

const _: () = assert!(SIRC_12.validate().is_ok());
const _: () = assert!(SIRC_15.validate().is_ok());

impl ProtocolProfile {
    /// Same protocol with a different carrier duty cycle.
    ///
    /// Lower duty reduces average LED current; the demodulator only
    /// cares about the carrier frequency.
    pub const fn with_duty(self, duty_percent: u8) -> Self {
        Self {
            duty_percent,
            ..self
        }
    }

    /// Check the profile invariants.
    pub const fn validate(&self) -> Result<(), ProfileError> {
        if self.carrier_hz == 0 || self.carrier_hz > 1_000_000 {
            return Err(ProfileError::Carrier);
        }
        if self.duty_percent == 0 || self.duty_percent >= 100 {
            return Err(ProfileError::DutyCycle);
        }
        if self.zero_pulses == 0 || self.one_pulses <= self.zero_pulses || self.start_pulses == 0 {
            return Err(ProfileError::BurstLengths);
        }
        if self.command_bits == 0
            || self.command_bits > MAX_FIELD_BITS
            || self.device_bits == 0
            || self.device_bits > MAX_FIELD_BITS
        {
            return Err(ProfileError::FieldWidth);
        }
        Ok(())
    }

    /// Full carrier period in nanoseconds.
    #[inline]
    pub const fn carrier_period_ns(&self) -> u32 {
        1_000_000_000 / self.carrier_hz
    }

    /// High half of one carrier cycle in nanoseconds.
    #[inline]
    pub const fn mark_high_ns(&self) -> u32 {
        self.carrier_period_ns() * self.duty_percent as u32 / 100
    }

    /// Low half of one carrier cycle in nanoseconds.
    #[inline]
    pub const fn mark_low_ns(&self) -> u32 {
        self.carrier_period_ns() - self.mark_high_ns()
    }

    /// Burst length for a data bit.
    #[inline]
    pub const fn bit_pulses(&self, bit: bool) -> u16 {
        if bit {
            self.one_pulses
        } else {
            self.zero_pulses
        }
    }

    /// Duration of a burst of `pulses` carrier cycles, in nanoseconds.
    #[inline]
    pub const fn burst_ns(&self, pulses: u16) -> u64 {
        pulses as u64 * self.carrier_period_ns() as u64
    }

    /// Largest command value the command field can carry.
    #[inline]
    pub const fn max_command(&self) -> u8 {
        field_max(self.command_bits)
    }

    /// Largest device value the device field can carry.
    #[inline]
    pub const fn max_device(&self) -> u8 {
        field_max(self.device_bits)
    }

    /// Symbols in one frame: start + command bits + device bits.
    #[inline]
    pub const fn symbol_count(&self) -> usize {
        1 + self.command_bits as usize + self.device_bits as usize
    }
}

const fn field_max(bits: u8) -> u8 {
    if bits >= MAX_FIELD_BITS {
        u8::MAX
    } else {
        (1u8 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sirc_carrier_split() {
        assert_eq!(SIRC_12.carrier_period_ns(), 25_000);
        assert_eq!(SIRC_12.mark_high_ns(), 12_000);
        assert_eq!(SIRC_12.mark_low_ns(), 13_000);
    }

    #[test]
    fn test_sirc_field_limits() {
        assert_eq!(SIRC_12.max_command(), 127);
        assert_eq!(SIRC_12.max_device(), 31);
        assert_eq!(SIRC_12.symbol_count(), 13);

        assert_eq!(SIRC_15.max_device(), 255);
        assert_eq!(SIRC_15.symbol_count(), 16);
    }

    #[test]
    fn test_burst_durations() {
        assert_eq!(SIRC_12.burst_ns(SIRC_12.start_pulses), 2_400_000);
        assert_eq!(SIRC_12.burst_ns(SIRC_12.bit_pulses(true)), 1_200_000);
        assert_eq!(SIRC_12.burst_ns(SIRC_12.bit_pulses(false)), 600_000);
        assert_eq!(SIRC_12.burst_ns(0), 0);
    }

    #[test]
    fn test_reduced_duty() {
        let eco = SIRC_12.with_duty(25);
        assert!(eco.validate().is_ok());
        assert_eq!(eco.mark_high_ns(), 6_250);
        assert_eq!(eco.mark_low_ns(), 18_750);
        assert_eq!(eco.carrier_period_ns(), SIRC_12.carrier_period_ns());
    }

    #[test]
    fn test_validate_rejects_bad_profiles() {
        let swapped = ProtocolProfile {
            one_pulses: 24,
            zero_pulses: 48,
            ..SIRC_12
        };
        assert_eq!(swapped.validate(), Err(ProfileError::BurstLengths));

        let wide = ProtocolProfile {
            command_bits: 9,
            ..SIRC_12
        };
        assert_eq!(wide.validate(), Err(ProfileError::FieldWidth));

        assert_eq!(SIRC_12.with_duty(0).validate(), Err(ProfileError::DutyCycle));
        assert_eq!(SIRC_12.with_duty(100).validate(), Err(ProfileError::DutyCycle));

        let dead = ProtocolProfile {
            carrier_hz: 0,
            ..SIRC_12
        };
        assert_eq!(dead.validate(), Err(ProfileError::Carrier));
    }
}
