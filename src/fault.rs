//! Fault state management for SircRemote.
//!
//! A truncated or wrong frame can make the TV do something the user did not
//! ask for. Sending nothing is safe. On a pin fault the emitter is forced
//! idle and the fault stays latched: the next poll sends nothing and clears
//! it once the emitter idles cleanly. Rejected requests are latched as a
//! record only.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Fault codes indicating why a transmission was not sent (or not finished).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// Device or command wider than its field. Rejected before transmitting.
    OutOfRange = 1,

    /// Protocol profile violates its invariants.
    InvalidProfile = 2,

    /// Output pin error. The frame on air is truncated.
    PinFault = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::OutOfRange,
            2 => FaultCode::InvalidProfile,
            3 => FaultCode::PinFault,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::OutOfRange => "out of range",
            FaultCode::InvalidProfile => "invalid profile",
            FaultCode::PinFault => "pin fault",
        }
    }
}

/// Latched fault record.
///
/// Atomics so a `static` instance can be read from the firmware loop
/// without `unsafe`.
pub struct FaultState {
    active: AtomicBool,
    code: AtomicU8,
    /// Extra data, e.g. `(device << 8) | command` for `OutOfRange`.
    data: AtomicU32,
    /// Total fault count since boot (never cleared).
    count: AtomicU32,
}

impl FaultState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Latch a fault and bump the counter.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Only meaningful while `is_active()`.
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear the active flag. The counter is kept.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    #[inline]
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            data: self.data(),
            count: self.count(),
        }
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of fault state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_state_basic() {
        let fault = FaultState::new();

        assert!(!fault.is_active());
        assert_eq!(fault.code(), FaultCode::None);
        assert_eq!(fault.count(), 0);

        fault.set(FaultCode::OutOfRange, 0x2080);

        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::OutOfRange);
        assert_eq!(fault.data(), 0x2080);
        assert_eq!(fault.count(), 1);

        fault.clear();

        assert!(!fault.is_active());
        assert_eq!(fault.count(), 1);
    }

    #[test]
    fn test_unknown_code_maps_to_none() {
        assert_eq!(FaultCode::from_u8(200), FaultCode::None);
        assert_eq!(FaultCode::from_u8(3), FaultCode::PinFault);
    }
}
