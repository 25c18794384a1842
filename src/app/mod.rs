//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the alarm rules together: the per-tick orchestration
//! lives in [`service`], and all interaction with hardware, the serial line
//! and logging happens through the **port traits** in [`ports`] (plus
//! [`LineTransport`](crate::transport::LineTransport)), keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
