//! Hardware Abstraction Layer for SircRemote.
//!
//! Thin wrappers over `embedded-hal` pins.
//! Business logic stays in core modules, HAL is just I/O.

pub mod gpio;

pub use gpio::{ButtonPins, IrLed};
