//! GPIO / peripheral pin assignments for the alarm controller board.
//!
//! Single source of truth: every hardware adapter references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Code pad (pull-down, active HIGH)
// ---------------------------------------------------------------------------

/// Confirm ("enter") key.
pub const CONFIRM_KEY_GPIO: i32 = 0;
/// Code key A.
pub const KEY_A_GPIO: i32 = 15;
/// Code key B.
pub const KEY_B_GPIO: i32 = 16;
/// Code key C.
pub const KEY_C_GPIO: i32 = 17;
/// Code key D.
pub const KEY_D_GPIO: i32 = 18;

/// Alarm test button (pull-down, active HIGH).
pub const TEST_BUTTON_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// MQ-2 gas detector digital output. LOW = gas present.
pub const GAS_SENSOR_GPIO: i32 = 12;

/// Potentiometer wiper, ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const POT_ADC_CHANNEL: u32 = 4;
/// LM35 temperature sensor, ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_CHANNEL: u32 = 8;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Alarm LED (blinks while alarming).
pub const ALARM_LED_GPIO: i32 = 11;
/// "Incorrect code" LED.
pub const INCORRECT_CODE_LED_GPIO: i32 = 13;
/// "System blocked" LED.
pub const SYSTEM_BLOCKED_LED_GPIO: i32 = 14;

/// Siren. Open-drain: LOW sounds the siren, released (HIGH-Z) is silent.
pub const SIREN_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// ADC configuration
// ---------------------------------------------------------------------------

/// Maximum raw value of the 12-bit ADC, used to normalise readings to [0, 1].
pub const ADC_MAX_RAW: f32 = 4095.0;
