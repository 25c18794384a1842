//! Alarm domain: the latched alarm state, detector flags, the secret code,
//! and the two decision makers that drive them.
//!
//! ```text
//!   sensors ──▶ trigger::evaluate ──▶ AlarmState::On  (latch)
//!   keypad / serial code ──▶ guard::CodeGuard ──▶ AlarmState::Off
//! ```
//!
//! Nothing but a correct code ever turns the alarm off.

pub mod code;
pub mod guard;
pub mod trigger;

/// Whether the alarm is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    #[default]
    Off,
    On,
}

impl AlarmState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Conditions seen during the current alarm episode.
///
/// Latched: once set they stay set until the siren driver returns to
/// idle, which only happens after the alarm has been turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorFlags {
    pub gas_detected: bool,
    pub over_temp_detected: bool,
}

impl DetectorFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.gas_detected || self.over_temp_detected
    }
}
