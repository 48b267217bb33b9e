//! Frame encoder finite state machine.
//!
//! Pure logic, no hardware dependencies. Consumes a (device, command) pair,
//! produces the ordered symbol sequence. Fully testable on host.
//!
//! # Frame layout
//!
//! ```text
//! START │ C0 C1 .. C(cw-1) │ D0 D1 .. D(dw-1)
//! ```
//!
//! Both fields are sent LSB first. Every symbol is a burst followed by the
//! same fixed space; only the burst length depends on the bit value.

use crate::error::{EncodeError, Field};
use crate::profile::ProtocolProfile;
use crate::symbol::{Frame, Symbol, SymbolKind};

/// Maps one data bit to its symbol (pulse-width encoding).
#[derive(Clone, Copy, Debug)]
pub struct BitEncoder<'a> {
    profile: &'a ProtocolProfile,
}

impl<'a> BitEncoder<'a> {
    pub fn new(profile: &'a ProtocolProfile) -> Self {
        Self { profile }
    }

    /// Symbol for a data bit. Space is the same for both values.
    #[inline]
    pub fn encode(&self, bit: bool) -> Symbol {
        Symbol {
            kind: SymbolKind::Bit(bit),
            pulses: self.profile.bit_pulses(bit),
            space_us: self.profile.space_us,
        }
    }

    /// Sync symbol opening every frame.
    #[inline]
    pub fn start(&self) -> Symbol {
        Symbol {
            kind: SymbolKind::Start,
            pulses: self.profile.start_pulses,
            space_us: self.profile.space_us,
        }
    }
}

/// FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    Start,
    CommandBits(u8),
    DeviceBits(u8),
    Done,
}

/// Symbol-by-symbol frame encoder.
///
/// Strictly sequential: `Start → CommandBits(0..cw) → DeviceBits(0..dw) → Done`.
/// Never branches on data; the bit value only selects the burst length.
///
/// # Example
///
/// ```
/// use sirc_remote::encoder::FrameEncoder;
/// use sirc_remote::profile::SIRC_12;
///
/// let encoder = FrameEncoder::new(&SIRC_12, 0x01, 0x15).unwrap();
/// assert_eq!(encoder.count(), 13);
/// ```
#[derive(Clone, Debug)]
pub struct FrameEncoder<'a> {
    bits: BitEncoder<'a>,
    profile: &'a ProtocolProfile,
    device: u8,
    command: u8,
    state: FrameState,
}

impl<'a> FrameEncoder<'a> {
    /// Create an encoder for one frame.
    ///
    /// The profile is validated first. Values wider than their field are
    /// rejected with `OutOfRange` instead of being truncated to their low bits.
    pub fn new(profile: &'a ProtocolProfile, device: u8, command: u8) -> Result<Self, EncodeError> {
        profile.validate().map_err(EncodeError::Profile)?;
        check_field(Field::Command, command, profile.max_command())?;
        check_field(Field::Device, device, profile.max_device())?;

        Ok(Self {
            bits: BitEncoder::new(profile),
            profile,
            device,
            command,
            state: FrameState::Start,
        })
    }

    /// Current FSM state.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Advance the FSM and return the next symbol, `None` once `Done`.
    pub fn next_symbol(&mut self) -> Option<Symbol> {
        match self.state {
            FrameState::Start => {
                self.state = FrameState::CommandBits(0);
                Some(self.bits.start())
            }
            FrameState::CommandBits(i) => {
                self.state = if i + 1 < self.profile.command_bits {
                    FrameState::CommandBits(i + 1)
                } else {
                    FrameState::DeviceBits(0)
                };
                Some(self.bits.encode(bit_at(self.command, i)))
            }
            FrameState::DeviceBits(i) => {
                self.state = if i + 1 < self.profile.device_bits {
                    FrameState::DeviceBits(i + 1)
                } else {
                    FrameState::Done
                };
                Some(self.bits.encode(bit_at(self.device, i)))
            }
            FrameState::Done => None,
        }
    }

    fn remaining(&self) -> usize {
        let cw = self.profile.command_bits as usize;
        let dw = self.profile.device_bits as usize;
        match self.state {
            FrameState::Start => 1 + cw + dw,
            FrameState::CommandBits(i) => cw - i as usize + dw,
            FrameState::DeviceBits(i) => dw - i as usize,
            FrameState::Done => 0,
        }
    }
}

impl Iterator for FrameEncoder<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        self.next_symbol()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for FrameEncoder<'_> {}

/// Build the complete frame for a (device, command) pair.
pub fn encode_frame(profile: &ProtocolProfile, device: u8, command: u8) -> Result<Frame, EncodeError> {
    let mut frame = Frame::new();
    for symbol in FrameEncoder::new(profile, device, command)? {
        frame.push(symbol);
    }
    Ok(frame)
}

/// Bit `i` of `value`, counted from the LSB.
#[inline]
pub const fn bit_at(value: u8, i: u8) -> bool {
    (value >> i) & 1 == 1
}

fn check_field(field: Field, value: u8, max: u8) -> Result<(), EncodeError> {
    if value > max {
        return Err(EncodeError::OutOfRange { field, value, max });
    }
    Ok(())
}
