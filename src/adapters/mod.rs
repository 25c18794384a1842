//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements              | Connects to                 |
//! |----------------|-------------------------|-----------------------------|
//! | `gpio`         | SensorPort, ActuatorPort| `embedded-hal` pins + ADC   |
//! | `esp`          | (builds a `GpioBoard`)  | ESP-IDF GPIO / ADC1 oneshot |
//! | `sim`          | SensorPort, ActuatorPort| Host simulation             |
//! | `stdio`        | LineTransport           | stdin / stdout (UART)       |
//! | `log_sink`     | EventSink               | `log` facade                |
//! | `config_store` | ConfigPort              | Defaults / JSON file        |

pub mod config_store;
#[cfg(target_os = "espidf")]
pub mod esp;
pub mod gpio;
pub mod log_sink;
pub mod sim;
pub mod stdio;
