//! Remote controller: one polling cycle of the button loop.
//!
//! Pure logic over injected pins. Maps pressed buttons to frames,
//! enforces the inter-frame quiet period, and reports reset requests.
//!
//! # Cycle
//!
//! ```text
//! poll(buttons)
//!   ├─ pin fault latched? ───── send nothing this cycle
//!   ├─ bound button pressed? ── send frame uninterrupted (first binding wins)
//!   ├─ emitter idle, sleep frame_gap_ms
//!   ├─ pin fault latched? ───── emitter idled cleanly, clear it
//!   └─ reset button pressed? ── PollOutcome::Reset
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::buttons::{Button, ButtonState};
use crate::config::{Binding, ConfigError, RemoteConfig};
use crate::error::TransmitError;
use crate::fault::{FaultCode, FaultState};
use crate::logging::LogStream;
use crate::transmit::TransmitDriver;
use crate::{rt_error, rt_info, rt_warn};

/// How the surrounding system runs around a frame.
///
/// A frame is one busy-wait on the transmit delay and must not be
/// preempted. The quiet period between frames should give the CPU away.
pub trait FrameScheduler {
    /// Run `f` (one whole frame) without preemption.
    fn uninterrupted<R>(&mut self, f: impl FnOnce() -> R) -> R;

    /// Sleep through the inter-frame quiet period.
    fn sleep_ms(&mut self, ms: u32);
}

/// Result of one polling cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing bound was pressed.
    Idle,
    /// A frame was sent.
    Sent { button: Button, device: u8, command: u8 },
    /// Reset button held: the caller must restart the whole process.
    Reset,
}

/// Failure building a controller.
#[derive(Debug)]
pub enum SetupError<E> {
    Config(ConfigError),
    Transmit(TransmitError<E>),
}

impl<E: core::fmt::Debug> core::fmt::Display for SetupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {}", e),
            Self::Transmit(e) => write!(f, "transmit: {}", e),
        }
    }
}

/// Button loop state.
///
/// Keeps a nominal uptime: the sum of every frame and quiet period it ran.
/// With no other work on the CPU this tracks wall time closely and is used
/// as the log timestamp.
pub struct RemoteController<'a, P, D, S, const N: usize> {
    driver: TransmitDriver<P, D>,
    scheduler: S,
    config: RemoteConfig,
    log: &'a LogStream<N>,
    fault: &'a FaultState,
    uptime_us: i64,
    frames_sent: u32,
}

impl<'a, P, D, S, const N: usize> RemoteController<'a, P, D, S, N>
where
    P: OutputPin,
    D: DelayNs,
    S: FrameScheduler,
{
    /// Validate `config` and take ownership of the emitter.
    ///
    /// Every binding is checked against the profile here, so a bad keymap
    /// fails at startup instead of on the first press.
    pub fn new(
        pin: P,
        delay: D,
        scheduler: S,
        config: RemoteConfig,
        log: &'a LogStream<N>,
        fault: &'a FaultState,
    ) -> Result<Self, SetupError<P::Error>> {
        if let Err(e) = config.validate() {
            let code = match e {
                ConfigError::Profile(_) => FaultCode::InvalidProfile,
                ConfigError::Binding(..) => FaultCode::OutOfRange,
            };
            fault.set(code, 0);
            rt_error!(log, 0, "config rejected: {}", e);
            return Err(SetupError::Config(e));
        }

        let driver = TransmitDriver::new(pin, delay, config.profile).map_err(SetupError::Transmit)?;

        rt_info!(
            log,
            0,
            "remote ready: {} Hz carrier, {} bindings, gap {} ms",
            config.profile.carrier_hz,
            config.active_bindings().count(),
            config.frame_gap_ms
        );

        Ok(Self {
            driver,
            scheduler,
            config,
            log,
            fault,
            uptime_us: 0,
            frames_sent: 0,
        })
    }

    /// Run one polling cycle.
    pub fn poll(&mut self, buttons: ButtonState) -> Result<PollOutcome, TransmitError<P::Error>> {
        let mut outcome = PollOutcome::Idle;
        let recovering = self.fault.is_active() && self.fault.code() == FaultCode::PinFault;

        if !recovering {
            if let Some(binding) = self.binding_for(buttons) {
                self.send(binding.device, binding.command)?;
                outcome = PollOutcome::Sent {
                    button: binding.button,
                    device: binding.device,
                    command: binding.command,
                };
            }
        }

        self.quiet()?;

        if recovering {
            let snapshot = self.fault.snapshot();
            self.fault.clear();
            rt_info!(
                self.log,
                self.uptime_us,
                "emitter idle again ({} faults since boot)",
                snapshot.count
            );
        }

        if let Some(reset) = self.config.reset_button {
            if buttons.pressed(reset) {
                rt_warn!(self.log, self.uptime_us, "reset requested ({})", reset.as_str());
                return Ok(PollOutcome::Reset);
            }
        }

        Ok(outcome)
    }

    /// Send one frame outside the button mapping.
    pub fn send(&mut self, device: u8, command: u8) -> Result<(), TransmitError<P::Error>> {
        let driver = &mut self.driver;
        let result = self.scheduler.uninterrupted(|| driver.send(device, command));
        let data = ((device as u32) << 8) | command as u32;

        match result {
            Ok(frame) => {
                let profile = self.driver.profile();
                self.uptime_us += frame.nominal_duration_us(profile) as i64;
                self.frames_sent = self.frames_sent.wrapping_add(1);
                rt_info!(
                    self.log,
                    self.uptime_us,
                    "TX dev=0x{:02X} cmd=0x{:02X} ({} symbols)",
                    device,
                    command,
                    frame.len()
                );
                Ok(())
            }
            Err(TransmitError::Pin(e)) => {
                self.fault.set(FaultCode::PinFault, data);
                // Best effort; the pin just failed once already
                let _ = self.driver.force_idle();
                rt_error!(self.log, self.uptime_us, "TX aborted: {}", FaultCode::PinFault.as_str());
                Err(TransmitError::Pin(e))
            }
            Err(e) => {
                // The driver's profile was validated at construction, so this
                // is a field that does not fit
                self.fault.set(FaultCode::OutOfRange, data);
                rt_warn!(self.log, self.uptime_us, "TX rejected: {}", e);
                Err(e)
            }
        }
    }

    fn quiet(&mut self) -> Result<(), TransmitError<P::Error>> {
        if let Err(e) = self.driver.force_idle() {
            self.fault.set(FaultCode::PinFault, 0);
            rt_error!(self.log, self.uptime_us, "quiet period: {}", FaultCode::PinFault.as_str());
            return Err(TransmitError::Pin(e));
        }
        let gap_ms = self.config.frame_gap_ms;
        self.scheduler.sleep_ms(gap_ms);
        self.uptime_us += gap_ms as i64 * 1_000;
        Ok(())
    }

    fn binding_for(&self, buttons: ButtonState) -> Option<Binding> {
        self.config
            .active_bindings()
            .find(|b| buttons.pressed(b.button))
            .copied()
    }

    /// Nominal time spent in frames and quiet periods since construction.
    pub fn uptime_us(&self) -> i64 {
        self.uptime_us
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Tear down, returning the pin, delay and scheduler.
    pub fn release(self) -> (P, D, S) {
        let (pin, delay) = self.driver.release();
        (pin, delay, self.scheduler)
    }
}
