//! Module: buttons
//!
//! Purpose: Snapshot of the remote's push buttons at one poll.
//!
//! Architecture:
//! - One byte, one bit per button (SW1..SW5)
//! - Produced by `hal::gpio::ButtonPins`, consumed by `RemoteController`
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Physical push button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    Sw1 = 0,
    Sw2 = 1,
    Sw3 = 2,
    Sw4 = 3,
    Sw5 = 4,
}

impl Button {
    /// All buttons in pin order.
    pub const ALL: [Button; 5] = [Button::Sw1, Button::Sw2, Button::Sw3, Button::Sw4, Button::Sw5];

    /// Bit mask of this button in a [`ButtonState`].
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Button::Sw1 => "SW1",
            Button::Sw2 => "SW2",
            Button::Sw3 => "SW3",
            Button::Sw4 => "SW4",
            Button::Sw5 => "SW5",
        }
    }
}

/// Pressed buttons
///
/// Bit layout:
/// - Bit 0: SW1
/// - Bit 1: SW2
/// - Bit 2: SW3
/// - Bit 3: SW4
/// - Bit 4: SW5
/// - Bits 5-7: Reserved
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState(u8);

impl ButtonState {
    /// Nothing pressed
    pub const IDLE: Self = Self(0);

    const VALID: u8 = 0x1F;

    /// Create from raw bits value (reserved bits dropped)
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::VALID)
    }

    /// State with exactly `button` pressed.
    pub const fn only(button: Button) -> Self {
        Self(button.mask())
    }

    /// Get raw bits value
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if `button` is pressed
    pub const fn pressed(&self, button: Button) -> bool {
        (self.0 & button.mask()) != 0
    }

    /// Mark `button` pressed or released
    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.0 |= button.mask();
        } else {
            self.0 &= !button.mask();
        }
    }

    /// Same state with `button` also pressed
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    /// Check if nothing is pressed
    pub const fn is_idle(&self) -> bool {
        self.0 == 0
    }
}
