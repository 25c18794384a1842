//! Port traits: the hexagonal boundary between the alarm logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmController (domain)
//! ```
//!
//! Driven adapters (GPIO board, simulator, event sinks, config sources)
//! implement these traits. The [`AlarmController`](super::service::AlarmController)
//! consumes them via generics, so the domain core never touches hardware
//! directly. The serial line has its own port,
//! [`LineTransport`](crate::transport::LineTransport).

use crate::config::AlarmConfig;
use crate::fsm::context::{SensorSnapshot, SirenDrive};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain input levels.
///
/// Reads are infallible from the domain's point of view. An adapter that
/// fails to read a pin reports the last good value and logs the failure.
pub trait SensorPort {
    /// Read every input polled each tick.
    fn read_all(&mut self) -> SensorSnapshot;

    /// Potentiometer position, normalised to `[0, 1]`. Only read on demand
    /// by the serial console.
    fn read_potentiometer(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    /// Drive the siren (open-drain: low = sounding, released = silent).
    fn set_siren(&mut self, drive: SirenDrive);

    fn set_alarm_led(&mut self, on: bool);

    fn set_incorrect_code_led(&mut self, on: bool);

    fn set_system_blocked_led(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads configuration once at start-up.
///
/// Implementations MUST run [`AlarmConfig::validate`] before handing a
/// config back. Invalid values are rejected with
/// [`ConfigError::ValidationFailed`], never silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<AlarmConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found at the configured location.
    NotFound,
    /// Stored config could not be deserialized.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
