//! Module: config
//!
//! Purpose: Configuration for the SIRC remote.
//!
//! Architecture:
//! - `RemoteConfig`: single const-constructible struct, no runtime parsing
//! - `CONFIG`: the reference Sony TV remote
//! - Pin polarity lives here; GPIO numbers are fixed where the firmware
//!   takes its peripherals
//!
//! Safety: Safe. Const data only.

use crate::buttons::Button;
use crate::codes;
use crate::error::{EncodeError, ProfileError};
use crate::encoder::FrameEncoder;
use crate::profile::{ProtocolProfile, SIRC_12};

/// Maximum number of button bindings.
pub const MAX_BINDINGS: usize = 4;

/// Logic level that lights the IR emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// IR emitter driver stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IrOutputConfig {
    pub active: ActiveLevel,
}

/// Push-button wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonPinsConfig {
    /// Buttons short to ground and read low while pressed.
    pub active_low: bool,
}

/// Button → frame mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub button: Button,
    pub device: u8,
    pub command: u8,
}

impl Binding {
    pub const fn new(button: Button, device: u8, command: u8) -> Self {
        Self {
            button,
            device,
            command,
        }
    }
}

/// Complete remote configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Protocol used for every binding.
    pub profile: ProtocolProfile,
    /// Bindings in priority order. The first pressed one is sent.
    pub bindings: [Option<Binding>; MAX_BINDINGS],
    /// Button that requests a full restart.
    pub reset_button: Option<Button>,
    /// Quiet period after every poll, in milliseconds.
    pub frame_gap_ms: u32,
    pub ir_output: IrOutputConfig,
    pub buttons: ButtonPinsConfig,
}

impl RemoteConfig {
    /// Sony TV remote: SW1 reset, SW2 VOL+, SW3 POWER, SW4 VOL-, SW5 MUTE.
    pub const fn sony_tv() -> Self {
        Self {
            profile: SIRC_12,
            bindings: [
                Some(Binding::new(Button::Sw3, codes::DEVICE_TV, codes::POWER)),
                Some(Binding::new(Button::Sw2, codes::DEVICE_TV, codes::VOL_UP)),
                Some(Binding::new(Button::Sw4, codes::DEVICE_TV, codes::VOL_DOWN)),
                Some(Binding::new(Button::Sw5, codes::DEVICE_TV, codes::MUTE)),
            ],
            reset_button: Some(Button::Sw1),
            frame_gap_ms: 25,
            ir_output: IrOutputConfig {
                active: ActiveLevel::High,
            },
            buttons: ButtonPinsConfig { active_low: true },
        }
    }

    /// Bindings that are set, in priority order.
    pub fn active_bindings(&self) -> impl Iterator<Item = &Binding> + '_ {
        self.bindings.iter().flatten()
    }

    /// Check the profile and every binding against it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate().map_err(ConfigError::Profile)?;
        for binding in self.active_bindings() {
            FrameEncoder::new(&self.profile, binding.device, binding.command)
                .map_err(|e| ConfigError::Binding(binding.button, e))?;
        }
        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::sony_tv()
    }
}

/// Reference configuration.
pub const CONFIG: RemoteConfig = RemoteConfig::sony_tv();

/// Invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Profile(ProfileError),
    Binding(Button, EncodeError),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Profile(e) => write!(f, "profile {}", e),
            Self::Binding(button, e) => write!(f, "{} binding {}", button.as_str(), e),
        }
    }
}
