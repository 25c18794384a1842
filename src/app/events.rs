//! Outbound application events.
//!
//! The [`AlarmController`](super::service::AlarmController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them.

use crate::alarm::code::Code;
use crate::alarm::trigger::Triggers;
use crate::fsm::StateId;

/// Where a code attempt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource {
    Keypad,
    Serial,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the initial siren state).
    Started(StateId),

    /// The alarm went from Off to On. Carries the conditions active on
    /// the raising tick.
    AlarmRaised(Triggers),

    /// A correct code turned the alarm off.
    AlarmCleared(CodeSource),

    /// A code attempt did not match.
    CodeRejected { source: CodeSource, failures: u8 },

    /// The failure threshold was reached. Emitted once.
    SystemBlocked { failures: u8 },

    /// The secret code was replaced from the serial console.
    CodeReplaced(Code),

    /// A serial code capture was abandoned after the configured timeout.
    CodeEntryTimedOut,

    /// The siren driver changed state.
    StateChanged { from: StateId, to: StateId },
}
