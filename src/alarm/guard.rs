//! Code entry and deactivation state machine.
//!
//! Owns the secret code and the consecutive-failure counter. Both the
//! physical keypad (polled every tick by [`CodeGuard::update_keypad`])
//! and the serial console (through [`CodeGuard::verify`]) funnel into the
//! same accept / reject path, so the counter and the incorrect-code LED
//! behave identically for either source.
//!
//! ```text
//!            match                      mismatch (failures < max)
//!   ┌──────────────────┐        ┌─────────────────────────────┐
//!   ▼                  │        │                             ▼
//! Ready ──[confirm]──▶ compare ─┘            failures == max ──▶ Blocked
//! ```
//!
//! Blocked is terminal for the run: no software path leaves it.

use log::{info, warn};

use super::AlarmState;
use super::code::{CODE_LENGTH, Code};
use crate::fsm::context::FsmContext;

/// Outcome of one code attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Code matched: alarm off, counter reset.
    Accepted,
    /// Code did not match. Carries the updated failure count.
    Rejected { failures: u8 },
    /// The system is blocked; the attempt was not evaluated.
    Blocked,
}

pub struct CodeGuard {
    secret: Code,
    failures: u8,
    max_failures: u8,
}

impl CodeGuard {
    pub fn new(secret: Code, max_failures: u8) -> Self {
        Self {
            secret,
            failures: 0,
            max_failures,
        }
    }

    /// Poll the physical keypad. Returns a verdict on ticks where an
    /// attempt was evaluated.
    pub fn update_keypad(&mut self, ctx: &mut FsmContext) -> Option<Verdict> {
        if self.is_blocked() {
            ctx.commands.system_blocked_led = true;
            return None;
        }

        let keys = ctx.sensors.code_keys;
        let confirm = ctx.sensors.confirm_key;

        // Clear gesture: every code key held with confirm released.
        if keys.iter().all(|&k| k) && !confirm {
            ctx.commands.incorrect_code_led = false;
        }

        if confirm && !ctx.commands.incorrect_code_led && ctx.alarm.is_on() {
            let entered = Code::new(keys);
            return Some(self.verify(Some(entered), ctx));
        }

        None
    }

    /// Compare an entered code against the secret. `None` stands for
    /// malformed input and always counts as a mismatch.
    pub fn verify(&mut self, entered: Option<Code>, ctx: &mut FsmContext) -> Verdict {
        if self.is_blocked() {
            ctx.commands.system_blocked_led = true;
            return Verdict::Blocked;
        }

        match entered {
            Some(code) if self.secret.matches(&code) => {
                info!("code accepted, alarm off");
                ctx.alarm = AlarmState::Off;
                ctx.commands.incorrect_code_led = false;
                self.failures = 0;
                Verdict::Accepted
            }
            _ => {
                self.failures = self.failures.saturating_add(1);
                ctx.commands.incorrect_code_led = true;
                warn!(
                    "code rejected ({}/{} consecutive failures)",
                    self.failures, self.max_failures
                );
                if self.is_blocked() {
                    warn!("failure limit reached, system blocked until reset");
                    ctx.commands.system_blocked_led = true;
                }
                Verdict::Rejected {
                    failures: self.failures,
                }
            }
        }
    }

    /// Overwrite secret digits. `None` entries leave that digit unchanged.
    pub fn replace_digits(&mut self, digits: [Option<bool>; CODE_LENGTH]) -> Code {
        for (i, d) in digits.iter().enumerate() {
            if let Some(value) = *d {
                self.secret.set_digit(i, value);
            }
        }
        info!("secret code replaced");
        self.secret
    }

    pub fn is_blocked(&self) -> bool {
        self.failures >= self.max_failures
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    pub fn secret(&self) -> Code {
        self.secret
    }
}
