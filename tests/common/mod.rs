//! Shared test harness: a recording IR pin and a virtual-time delay on one
//! timeline, plus a reference SIRC decoder over the recorded waveform.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use sirc_remote::profile::ProtocolProfile;
use sirc_remote::remote::FrameScheduler;

/// Pin level changes against virtual time.
#[derive(Default)]
pub struct Timeline {
    pub now_ns: u64,
    pub level: bool,
    /// (time_ns, new_level) for every level change
    pub edges: Vec<(u64, bool)>,
    /// Number of OutputPin calls, including ones that did not change the level
    pub writes: usize,
    /// Frames run through `FrameScheduler::uninterrupted`
    pub uninterrupted: usize,
    /// Set while an uninterrupted section runs
    pub in_section: bool,
    /// Time spent in `FrameScheduler::sleep_ms`
    pub slept_ns: u64,
}

impl Timeline {
    /// Waveform as (level, duration_ns) runs, from t=0 to now.
    pub fn runs(&self) -> Vec<(bool, u64)> {
        let mut runs = Vec::new();
        let mut level = false;
        let mut since = 0u64;
        for &(t, new_level) in &self.edges {
            if t > since {
                runs.push((level, t - since));
            }
            level = new_level;
            since = t;
        }
        if self.now_ns > since {
            runs.push((level, self.now_ns - since));
        }
        runs
    }
}

pub type SharedTimeline = Rc<RefCell<Timeline>>;

pub struct RecordingPin(pub SharedTimeline);

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.write(true);
        Ok(())
    }
}

impl RecordingPin {
    fn write(&mut self, level: bool) {
        let mut tl = self.0.borrow_mut();
        tl.writes += 1;
        if tl.level != level {
            let now = tl.now_ns;
            tl.edges.push((now, level));
            tl.level = level;
        }
    }
}

pub struct VirtualDelay(pub SharedTimeline);

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().now_ns += ns as u64;
    }
}

/// Pin that fails after `ok_writes` successful writes.
pub struct FlakyPin {
    pub ok_writes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBroken;

impl embedded_hal::digital::Error for PinBroken {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for FlakyPin {
    type Error = PinBroken;
}

impl OutputPin for FlakyPin {
    fn set_low(&mut self) -> Result<(), PinBroken> {
        self.tick()
    }

    fn set_high(&mut self) -> Result<(), PinBroken> {
        self.tick()
    }
}

impl FlakyPin {
    fn tick(&mut self) -> Result<(), PinBroken> {
        if self.ok_writes == 0 {
            return Err(PinBroken);
        }
        self.ok_writes -= 1;
        Ok(())
    }
}

/// Pin that fails `bad_writes` times after `ok_writes` good ones, then
/// works again.
pub struct GlitchPin {
    pub ok_writes: usize,
    pub bad_writes: usize,
}

impl ErrorType for GlitchPin {
    type Error = PinBroken;
}

impl OutputPin for GlitchPin {
    fn set_low(&mut self) -> Result<(), PinBroken> {
        self.tick()
    }

    fn set_high(&mut self) -> Result<(), PinBroken> {
        self.tick()
    }
}

impl GlitchPin {
    fn tick(&mut self) -> Result<(), PinBroken> {
        if self.ok_writes > 0 {
            self.ok_writes -= 1;
            return Ok(());
        }
        if self.bad_writes > 0 {
            self.bad_writes -= 1;
            return Err(PinBroken);
        }
        Ok(())
    }
}

/// Scheduler on the shared timeline. Sleeping inside a frame is a bug.
pub struct VirtualScheduler(pub SharedTimeline);

impl FrameScheduler for VirtualScheduler {
    fn uninterrupted<R>(&mut self, f: impl FnOnce() -> R) -> R {
        {
            let mut tl = self.0.borrow_mut();
            tl.uninterrupted += 1;
            tl.in_section = true;
        }
        let result = f();
        self.0.borrow_mut().in_section = false;
        result
    }

    fn sleep_ms(&mut self, ms: u32) {
        let mut tl = self.0.borrow_mut();
        assert!(!tl.in_section, "slept inside a frame");
        tl.now_ns += ms as u64 * 1_000_000;
        tl.slept_ns += ms as u64 * 1_000_000;
    }
}

/// Fresh pin + delay sharing one timeline.
pub fn harness() -> (RecordingPin, VirtualDelay, SharedTimeline) {
    let tl: SharedTimeline = Rc::new(RefCell::new(Timeline::default()));
    (RecordingPin(tl.clone()), VirtualDelay(tl.clone()), tl)
}

/// Pin, delay and scheduler sharing one timeline.
pub fn remote_harness() -> (RecordingPin, VirtualDelay, VirtualScheduler, SharedTimeline) {
    let (pin, delay, tl) = harness();
    (pin, delay, VirtualScheduler(tl.clone()), tl)
}

/// A carrier-modulated mark as a demodulator would see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub start_ns: u64,
    pub duration_ns: u64,
    /// Idle time after the mark (to the next mark or end of recording)
    pub space_ns: u64,
}

/// Merge carrier cycles into marks. Low runs shorter than two carrier
/// periods are treated as part of the carrier.
pub fn demodulate(profile: &ProtocolProfile, runs: &[(bool, u64)]) -> Vec<Mark> {
    let gap_threshold = 2 * profile.carrier_period_ns() as u64;
    let mut marks: Vec<Mark> = Vec::new();
    let mut t = 0u64;
    let mut current: Option<Mark> = None;

    for &(level, duration) in runs {
        if level {
            match current.as_mut() {
                Some(mark) => mark.duration_ns = t + duration - mark.start_ns,
                None => {
                    current = Some(Mark {
                        start_ns: t,
                        duration_ns: duration,
                        space_ns: 0,
                    })
                }
            }
        } else if duration >= gap_threshold {
            if let Some(mut mark) = current.take() {
                mark.space_ns = duration;
                marks.push(mark);
            }
        }
        t += duration;
    }
    if let Some(mark) = current {
        marks.push(mark);
    }
    marks
}

/// Reference SIRC receiver: recovers (device, command) from the waveform.
///
/// Marks are classified by nearest nominal length; the final low half-cycle
/// of each burst is folded back in before comparing.
pub fn decode_sirc(profile: &ProtocolProfile, runs: &[(bool, u64)]) -> Option<(u8, u8)> {
    let marks = demodulate(profile, runs);
    if marks.len() != profile.symbol_count() {
        return None;
    }

    let period = profile.carrier_period_ns() as u64;
    let pulses = |m: &Mark| ((m.duration_ns + profile.mark_low_ns() as u64 + period / 2) / period) as i64;
    let nearest = |n: i64| {
        let candidates = [
            (profile.start_pulses as i64, None),
            (profile.one_pulses as i64, Some(true)),
            (profile.zero_pulses as i64, Some(false)),
        ];
        candidates
            .iter()
            .min_by_key(|(p, _)| (p - n).abs())
            .map(|(_, bit)| *bit)
    };

    if nearest(pulses(&marks[0]))?.is_some() {
        return None;
    }

    let mut bits = Vec::new();
    for mark in &marks[1..] {
        bits.push(nearest(pulses(mark))??);
    }

    let cw = profile.command_bits as usize;
    let mut command = 0u8;
    for (i, bit) in bits[..cw].iter().enumerate() {
        command |= (*bit as u8) << i;
    }
    let mut device = 0u8;
    for (i, bit) in bits[cw..].iter().enumerate() {
        device |= (*bit as u8) << i;
    }
    Some((device, command))
}
