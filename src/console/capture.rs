//! Serial code capture sub-state machine.
//!
//! Commands `'4'` and `'5'` each need four more bytes from the serial
//! peer. Instead of blocking the tick loop until they arrive, the console
//! parks a [`CodeCapture`] and feeds it whatever bytes are waiting on each
//! tick. Sensors, the siren and the keypad keep running meanwhile.
//!
//! ```text
//!  Collecting ──[4th byte]──▶ Complete
//!      │
//!      └──[timeout elapsed]──▶ TimedOut
//! ```

use heapless::Vec;

use crate::alarm::code::{CODE_LENGTH, Code, digit_from_byte};

/// What the captured digits are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Compare against the secret (`'4'`).
    Verify,
    /// Overwrite the secret (`'5'`).
    Replace,
    /// `'4'` arrived while the system is blocked: the digits are consumed
    /// without echo and never compared.
    Refused,
}

#[derive(Debug)]
pub struct CodeCapture {
    purpose: Purpose,
    bytes: Vec<u8, CODE_LENGTH>,
    elapsed_ms: u32,
    timeout_ms: Option<u32>,
}

impl CodeCapture {
    pub fn new(purpose: Purpose, timeout_ms: Option<u32>) -> Self {
        Self {
            purpose,
            bytes: Vec::new(),
            elapsed_ms: 0,
            timeout_ms,
        }
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Each captured byte is acknowledged with a `'*'`.
    pub fn echoes(&self) -> bool {
        self.purpose != Purpose::Refused
    }

    /// Append one raw byte. Returns `false` once the capture is full.
    pub fn push(&mut self, byte: u8) -> bool {
        self.bytes.push(byte).is_ok()
    }

    pub fn is_complete(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Account for time spent waiting on the peer.
    pub fn elapse(&mut self, ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }

    pub fn is_timed_out(&self) -> bool {
        match self.timeout_ms {
            Some(limit) => !self.is_complete() && self.elapsed_ms >= limit,
            None => false,
        }
    }

    /// Per-position digits. Positions not yet captured, or holding a byte
    /// other than `'0'`/`'1'`, are `None`.
    pub fn digits(&self) -> [Option<bool>; CODE_LENGTH] {
        let mut out = [None; CODE_LENGTH];
        for (slot, &b) in out.iter_mut().zip(self.bytes.iter()) {
            *slot = digit_from_byte(b);
        }
        out
    }

    /// The captured code, or `None` if it is incomplete or malformed.
    pub fn code(&self) -> Option<Code> {
        if !self.is_complete() {
            return None;
        }
        let mut digits = [false; CODE_LENGTH];
        for (slot, d) in digits.iter_mut().zip(self.digits()) {
            *slot = d?;
        }
        Some(Code::new(digits))
    }
}
