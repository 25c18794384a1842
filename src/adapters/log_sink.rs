//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger on target, `tracing-subscriber` on the
//! host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | siren={:?}", state);
            }
            AppEvent::AlarmRaised(t) => {
                warn!(
                    "ALARM | raised | gas={} over_temp={} test={}",
                    t.gas, t.over_temp, t.test
                );
            }
            AppEvent::AlarmCleared(source) => {
                info!("ALARM | cleared via {:?}", source);
            }
            AppEvent::CodeRejected { source, failures } => {
                warn!("CODE  | rejected via {:?} | failures={}", source, failures);
            }
            AppEvent::SystemBlocked { failures } => {
                warn!("CODE  | system blocked after {} failures", failures);
            }
            AppEvent::CodeReplaced(code) => {
                info!("CODE  | replaced ({} digits)", code.digits().len());
            }
            AppEvent::CodeEntryTimedOut => {
                info!("CODE  | serial entry timed out");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
        }
    }
}
