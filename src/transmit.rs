//! Transmit driver: realizes frames on the IR output pin in real time.
//!
//! # Rules
//!
//! - Symbols are emitted strictly in frame order, one at a time
//! - No logging, allocation or yielding between the first burst and the last space
//! - The pin is owned by the driver; nothing else may toggle it mid-frame

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::carrier::CarrierGenerator;
use crate::encoder::{encode_frame, BitEncoder};
use crate::error::TransmitError;
use crate::profile::ProtocolProfile;
use crate::symbol::{Frame, Symbol};

/// Owns the emitter pin and the busy-wait delay.
///
/// # Example
///
/// ```ignore
/// let mut tx = TransmitDriver::new(ir_led, Ets, SIRC_12)?;
/// tx.send(codes::DEVICE_TV, codes::POWER)?;
/// tx.quiet(25)?;
/// ```
pub struct TransmitDriver<P, D> {
    pin: P,
    delay: D,
    profile: ProtocolProfile,
    carrier: CarrierGenerator,
}

impl<P, D> TransmitDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver. The pin is driven low (idle) immediately.
    pub fn new(mut pin: P, delay: D, profile: ProtocolProfile) -> Result<Self, TransmitError<P::Error>> {
        profile.validate()?;
        pin.set_low().map_err(TransmitError::Pin)?;

        Ok(Self {
            pin,
            delay,
            carrier: CarrierGenerator::new(&profile),
            profile,
        })
    }

    /// Active protocol profile.
    pub fn profile(&self) -> &ProtocolProfile {
        &self.profile
    }

    /// Encode and send one frame.
    ///
    /// Out-of-range values are rejected before the pin is touched.
    /// Returns the frame that was sent.
    pub fn send(&mut self, device: u8, command: u8) -> Result<Frame, TransmitError<P::Error>> {
        let frame = encode_frame(&self.profile, device, command)?;
        self.transmit(&frame)?;
        Ok(frame)
    }

    /// Emit every symbol of `frame`, trailing space included.
    pub fn transmit(&mut self, frame: &Frame) -> Result<(), TransmitError<P::Error>> {
        for symbol in frame {
            self.emit_symbol(symbol)?;
        }
        Ok(())
    }

    /// Emit one data bit: burst of the bit's length, then the fixed space.
    pub fn emit_bit(&mut self, bit: bool) -> Result<(), TransmitError<P::Error>> {
        let symbol = BitEncoder::new(&self.profile).encode(bit);
        self.emit_symbol(&symbol)
    }

    /// Emit one burst followed by its space with the pin held low.
    #[inline]
    pub fn emit_symbol(&mut self, symbol: &Symbol) -> Result<(), TransmitError<P::Error>> {
        self.carrier
            .emit_burst(&mut self.pin, &mut self.delay, symbol.pulses)
            .map_err(TransmitError::Pin)?;
        self.pin.set_low().map_err(TransmitError::Pin)?;
        self.delay.delay_us(symbol.space_us);
        Ok(())
    }

    /// Hold the emitter idle for the inter-frame quiet period.
    pub fn quiet(&mut self, gap_ms: u32) -> Result<(), TransmitError<P::Error>> {
        self.pin.set_low().map_err(TransmitError::Pin)?;
        self.delay.delay_ms(gap_ms);
        Ok(())
    }

    /// Drive the emitter idle, e.g. after a pin fault.
    pub fn force_idle(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
