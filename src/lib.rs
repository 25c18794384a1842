//! Gas / over-temperature alarm controller library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulator. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
pub mod transport;
