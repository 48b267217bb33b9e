//! # SircRemote
//!
//! Sony SIRC infrared remote control transmitter.
//!
//! ## Architecture
//!
//! Data flows one way, one symbol at a time:
//! - [`encoder::FrameEncoder`] turns (device, command) into [`symbol::Symbol`]s
//! - [`transmit::TransmitDriver`] realizes each symbol on the IR pin via
//!   [`carrier::CarrierGenerator`] and a busy-wait delay
//! - [`remote::RemoteController`] maps buttons to frames and paces the loop
//!   through a [`remote::FrameScheduler`]
//!
//! Hardware is injected through `embedded-hal` traits, so everything above
//! the firmware entry point runs on the host.

#![cfg_attr(not(test), no_std)]

pub mod buttons;
pub mod carrier;
pub mod codes;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fault;
pub mod hal;
pub mod logging;
pub mod profile;
pub mod remote;
pub mod symbol;
pub mod transmit;

#[cfg(target_os = "espidf")]
pub mod uart_logger;

pub use buttons::{Button, ButtonState};
pub use config::{RemoteConfig, CONFIG};
pub use encoder::{encode_frame, FrameEncoder};
pub use error::{EncodeError, TransmitError};
pub use fault::{FaultCode, FaultState};
pub use profile::{ProtocolProfile, SIRC_12, SIRC_15};
pub use remote::{FrameScheduler, PollOutcome, RemoteController};
pub use symbol::{Frame, Symbol};
pub use transmit::TransmitDriver;

use logging::LogStream;

/// Log ring for the control loop.
///
/// Single producer (control loop), single consumer (UART drain).
pub static LOG_STREAM: LogStream = LogStream::new();

/// Latched fault record for the control loop.
pub static FAULT_STATE: FaultState = FaultState::new();

/// Firmware version string, e.g. `SircRemote v0.1.0-gabc1234`.
pub const VERSION: &str = env!("VERSION_STRING");
