//! System configuration parameters
//!
//! Timing, thresholds, blink rates, the failure limit and the power-up
//! code are compile-time constants. The only value read at start-up
//! through a [`ConfigPort`](crate::app::ports::ConfigPort) is the serial
//! code entry timeout; it never changes while the tick loop is running.

use serde::{Deserialize, Serialize};

use crate::alarm::code::Code;
use crate::app::ports::ConfigError;

// --- Timing ---
/// Main loop period (milliseconds). 100 Hz.
pub const TICK_PERIOD_MS: u32 = 10;

// --- Over-temperature detection (LM35: 10 mV/°C on a 3.3 V ADC) ---
/// Averaged temperature (Celsius) above which the alarm is raised
pub const OVER_TEMP_LEVEL_C: f32 = 50.0;
/// ADC full-scale voltage used to scale the normalised temperature reading
pub const ADC_FULL_SCALE_VOLTS: f32 = 3.3;
/// Temperature sensor slope (volts per degree Celsius)
pub const SENSOR_VOLTS_PER_DEGREE: f32 = 0.01;

// --- Alarm LED blink periods (milliseconds) ---
pub const BLINK_GAS_MS: u32 = 1000;
pub const BLINK_OVER_TEMP_MS: u32 = 500;
pub const BLINK_GAS_AND_OVER_TEMP_MS: u32 = 100;

// --- Deactivation ---
/// Consecutive failed code attempts before the system blocks
pub const MAX_FAILED_ATTEMPTS: u8 = 5;
/// Secret code in force at power-up (keys A, B, C, D)
pub const DEFAULT_CODE: Code = Code::new([true, true, false, false]);

const _: () = assert!(TICK_PERIOD_MS > 0);
const _: () = assert!(BLINK_GAS_AND_OVER_TEMP_MS >= TICK_PERIOD_MS);
const _: () = assert!(BLINK_GAS_AND_OVER_TEMP_MS < BLINK_OVER_TEMP_MS);
const _: () = assert!(BLINK_OVER_TEMP_MS < BLINK_GAS_MS);
const _: () = assert!(MAX_FAILED_ATTEMPTS > 0);

/// Start-up configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlarmConfig {
    /// Abandon a serial code entry after this long without completing it.
    /// `None` waits forever.
    pub code_entry_timeout_ms: Option<u32>,
}

impl AlarmConfig {
    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_entry_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "code_entry_timeout_ms must be > 0 when set",
            ));
        }
        Ok(())
    }
}
