//! Sensor signal processing.
//!
//! Raw inputs arrive through [`SensorPort`](crate::app::ports::SensorPort)
//! as a [`SensorSnapshot`](crate::fsm::context::SensorSnapshot); the only
//! input that needs conditioning before the alarm logic sees it is the
//! temperature sensor, which is averaged over a sliding window.

pub mod temperature;
