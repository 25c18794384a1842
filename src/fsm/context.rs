//! Shared mutable context threaded through every component each tick.
//!
//! `FsmContext` is the single struct that the trigger evaluator, the
//! siren/LED state handlers, the code guard and the console read from and
//! write to. It replaces the process-wide globals of a bare-metal loop:
//! the latest sensor snapshot, the alarm latch, the detector flags, the
//! blink timer and the actuator commands all live here, owned by one
//! [`AlarmController`](crate::app::service::AlarmController).

use crate::alarm::code::CODE_LENGTH;
use crate::alarm::{AlarmState, DetectorFlags};
use crate::config::AlarmConfig;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to handlers; written once per tick)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every input polled each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// Raw level of the gas detector output. Active-low: `false` = gas.
    pub gas_sensor_level: bool,
    /// Alarm test button held.
    pub test_button: bool,
    /// Confirm ("enter") key held.
    pub confirm_key: bool,
    /// Code keys A, B, C, D held.
    pub code_keys: [bool; CODE_LENGTH],
    /// Normalised temperature sensor reading, `[0, 1]`.
    pub temperature_raw: f32,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            gas_sensor_level: true, // idle line, no gas
            test_button: false,
            confirm_key: false,
            code_keys: [false; CODE_LENGTH],
            temperature_raw: 0.0,
        }
    }
}

impl SensorSnapshot {
    /// Gas detector is asserting (its output is pulled low).
    pub fn gas_present(&self) -> bool {
        !self.gas_sensor_level
    }
}

// ---------------------------------------------------------------------------
// Actuator commands (written by handlers; applied at the end of the tick)
// ---------------------------------------------------------------------------

/// Siren output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SirenDrive {
    /// Pin released (high impedance): silent.
    #[default]
    Released,
    /// Pin driven to its active LOW level: sounding.
    Sounding,
}

/// Requested state of every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorCommands {
    pub siren: SirenDrive,
    pub alarm_led: bool,
    pub incorrect_code_led: bool,
    pub system_blocked_led: bool,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The controller context passed to every per-tick component.
pub struct FsmContext {
    // -- Inputs --
    /// Latest sensor readings. Updated before any component runs.
    pub sensors: SensorSnapshot,
    /// Averaged temperature in Celsius.
    pub temperature_c: f32,
    /// Averaged temperature is above the limit on this tick (not latched).
    pub over_temp: bool,

    // -- Alarm --
    pub alarm: AlarmState,
    pub detectors: DetectorFlags,
    /// Milliseconds since the alarm LED last toggled while alarming.
    pub accumulated_alarm_ms: u32,

    // -- Outputs --
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: AlarmConfig,
}

impl FsmContext {
    pub fn new(config: AlarmConfig) -> Self {
        Self {
            sensors: SensorSnapshot::default(),
            temperature_c: 0.0,
            over_temp: false,
            alarm: AlarmState::Off,
            detectors: DetectorFlags::default(),
            accumulated_alarm_ms: 0,
            commands: ActuatorCommands::default(),
            config,
        }
    }
}
