//! alarmctl: Main Entry Point
//!
//! Hexagonal architecture with a fixed-period tick loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioBoard / SimHardware   StdioTransport   LogEventSink       │
//! │  (Sensor+Actuator)         (LineTransport)  (EventSink)        │
//! │  DefaultConfig / JsonFileConfig (ConfigPort)                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            AlarmController (pure logic)                │    │
//! │  │  Averager · Triggers · Siren FSM · CodeGuard · Console │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use alarmctl::adapters::log_sink::LogEventSink;
use alarmctl::adapters::stdio::StdioTransport;
use alarmctl::app::ports::ConfigPort;
use alarmctl::app::service::AlarmController;
use alarmctl::config::{AlarmConfig, MAX_FAILED_ATTEMPTS, OVER_TEMP_LEVEL_C, TICK_PERIOD_MS};

/// LM35 reading for roughly 23 °C, fed to the simulator's temperature input.
#[cfg(not(target_os = "espidf"))]
const SIM_ROOM_TEMPERATURE_RAW: f32 = 0.07;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap + logging ───────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    {
        let log_level = std::env::var("ALARMCTL_LOG").unwrap_or_else(|_| "info".into());
        // Logs go to stderr so stdout carries only console responses.
        tracing_subscriber::fmt()
            .with_target(false)
            .with_level(true)
            .with_env_filter(&log_level)
            .with_writer(std::io::stderr)
            .init();
    }

    info!("alarmctl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    info!(
        "config: tick={}ms over_temp={:.1}C max_attempts={} entry_timeout={:?}",
        TICK_PERIOD_MS, OVER_TEMP_LEVEL_C, MAX_FAILED_ATTEMPTS, config.code_entry_timeout_ms
    );

    // ── 3. Hardware ───────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    let mut hw = alarmctl::adapters::esp::take_board().context("board init failed")?;
    #[cfg(not(target_os = "espidf"))]
    let mut hw = {
        let mut sim = alarmctl::adapters::sim::SimHardware::new();
        sim.set_temperature_raw(SIM_ROOM_TEMPERATURE_RAW);
        sim.set_potentiometer(0.5);
        sim
    };

    let mut serial = StdioTransport::new().context("serial console init failed")?;
    let mut sink = LogEventSink::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut controller = AlarmController::new(config);
    controller.start(&mut sink);
    let period = controller.tick_period();

    info!("System ready. Entering tick loop.");

    // ── 5. Tick loop (runs until power-off) ───────────────────
    loop {
        controller.tick(&mut hw, &mut serial, &mut sink);

        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(period.as_millis() as u32);
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(period);
    }
}

#[cfg(not(target_os = "espidf"))]
fn load_config() -> Result<AlarmConfig> {
    use alarmctl::adapters::config_store::{CONFIG_PATH_ENV, DefaultConfig, JsonFileConfig};

    match JsonFileConfig::from_env() {
        Some(source) => source
            .load()
            .with_context(|| format!("loading config from ${}", CONFIG_PATH_ENV)),
        None => DefaultConfig.load().context("default config invalid"),
    }
}

#[cfg(target_os = "espidf")]
fn load_config() -> Result<AlarmConfig> {
    use alarmctl::adapters::config_store::DefaultConfig;

    DefaultConfig.load().context("default config invalid")
}
