//! Sony TV remote codes.
//!
//! Command values fit the 7-bit SIRC command field, device values the 5-bit
//! device field.

// Device (address) codes
pub const DEVICE_TV: u8 = 0x01;

// Channel number buttons
pub const CH1: u8 = 0x00;
pub const CH2: u8 = 0x01;
pub const CH3: u8 = 0x02;
pub const CH4: u8 = 0x03;
pub const CH5: u8 = 0x04;
pub const CH6: u8 = 0x05;
pub const CH7: u8 = 0x06;
pub const CH8: u8 = 0x07;
pub const CH9: u8 = 0x08;
pub const CH0: u8 = 0x09;

pub const CH_UP: u8 = 0x10;
pub const CH_DOWN: u8 = 0x11;
pub const VOL_UP: u8 = 0x12;
pub const VOL_DOWN: u8 = 0x13;
pub const MUTE: u8 = 0x14;
pub const POWER: u8 = 0x15;
pub const INPUT: u8 = 0x25;

/// Number-pad code for a digit, `None` above 9.
pub const fn channel_digit(digit: u8) -> Option<u8> {
    match digit {
        0 => Some(CH0),
        1..=9 => Some(digit - 1),
        _ => None,
    }
}
