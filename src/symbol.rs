//! Module: symbol
//!
//! Purpose: Symbol and Frame types. A frame is the complete, ordered list of
//! (burst, space) pairs for one button press.
//!
//! Architecture:
//! - Fixed-capacity storage, no allocation (frames are built on the stack)
//! - Built fresh per transmission, discarded after being sent
//!
//! Safety: Safe. Copy types only.

use crate::profile::{ProtocolProfile, MAX_FIELD_BITS};

/// Upper bound on symbols in any frame: start + two 8-bit fields.
pub const MAX_FRAME_SYMBOLS: usize = 1 + 2 * MAX_FIELD_BITS as usize;

/// What a symbol carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// Start burst, no information.
    Start,
    /// One data bit.
    Bit(bool),
}

/// One carrier burst followed by one idle interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Burst length in carrier cycles.
    pub pulses: u16,
    /// Idle interval after the burst, in microseconds.
    pub space_us: u32,
}

impl Symbol {
    pub const EMPTY: Self = Self {
        kind: SymbolKind::Start,
        pulses: 0,
        space_us: 0,
    };

    /// Data bit carried by this symbol, `None` for the start symbol.
    #[inline]
    pub const fn bit(&self) -> Option<bool> {
        match self.kind {
            SymbolKind::Start => None,
            SymbolKind::Bit(bit) => Some(bit),
        }
    }

    /// Nominal duration (burst + space) in nanoseconds.
    #[inline]
    pub const fn duration_ns(&self, profile: &ProtocolProfile) -> u64 {
        profile.burst_ns(self.pulses) + self.space_us as u64 * 1_000
    }
}

/// Ordered symbol sequence for one transmission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    symbols: [Symbol; MAX_FRAME_SYMBOLS],
    len: u8,
}

impl Frame {
    pub(crate) const fn new() -> Self {
        Self {
            symbols: [Symbol::EMPTY; MAX_FRAME_SYMBOLS],
            len: 0,
        }
    }

    /// Append a symbol. Frames never exceed `MAX_FRAME_SYMBOLS` because
    /// profiles cap both fields at 8 bits.
    pub(crate) fn push(&mut self, symbol: Symbol) {
        let idx = self.len as usize;
        debug_assert!(idx < MAX_FRAME_SYMBOLS, "frame capacity exceeded");
        if idx < MAX_FRAME_SYMBOLS {
            self.symbols[idx] = symbol;
            self.len += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols[..self.len as usize]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Symbol> {
        self.symbols().iter()
    }

    /// Data bits in transmission order (start symbol skipped).
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.iter().filter_map(Symbol::bit)
    }

    /// Nominal airtime in microseconds, trailing space included.
    pub fn nominal_duration_us(&self, profile: &ProtocolProfile) -> u64 {
        self.iter().map(|s| s.duration_ns(profile)).sum::<u64>() / 1_000
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Symbol;
    type IntoIter = core::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
