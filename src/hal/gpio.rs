//! GPIO HAL for button input and IR emitter output.

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::buttons::{Button, ButtonState};
use crate::config::ActiveLevel;

/// IR emitter output.
///
/// The only handle to the emitter pin. `set_high` means "carrier on"
/// regardless of the driver stage's polarity.
pub struct IrLed<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: OutputPin> IrLed<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ErrorType for IrLed<P> {
    type Error = P::Error;
}

impl<P: OutputPin> OutputPin for IrLed<P> {
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        match self.active {
            ActiveLevel::High => self.pin.set_high(),
            ActiveLevel::Low => self.pin.set_low(),
        }
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        match self.active {
            ActiveLevel::High => self.pin.set_low(),
            ActiveLevel::Low => self.pin.set_high(),
        }
    }
}

/// Five push-button inputs, in [`Button::ALL`] order.
pub struct ButtonPins<I> {
    pins: [I; 5],
    active_low: bool,
}

impl<I: InputPin> ButtonPins<I> {
    pub fn new(pins: [I; 5], active_low: bool) -> Self {
        Self { pins, active_low }
    }

    /// Read every button once. No debouncing.
    pub fn poll(&mut self) -> Result<ButtonState, I::Error> {
        let mut state = ButtonState::IDLE;
        for (button, pin) in Button::ALL.iter().zip(self.pins.iter_mut()) {
            let pressed = if self.active_low {
                pin.is_low()?
            } else {
                pin.is_high()?
            };
            state.set(*button, pressed);
        }
        Ok(state)
    }
}
