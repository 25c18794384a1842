//! Serial console over the process's stdin/stdout.
//!
//! On ESP-IDF stdin/stdout are bound to the UART / USB-CDC console, so the
//! same adapter serves the target and the host simulator. Stdin is read by
//! a dedicated thread that forwards raw bytes over a channel; the tick
//! loop only ever polls that channel, so it never blocks on input.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{info, warn};

use crate::error::{CommsError, Error, Result};
use crate::transport::LineTransport;

pub struct StdioTransport {
    rx: Receiver<u8>,
    /// Byte pulled off the channel by `available()` but not yet read.
    pending: Option<u8>,
    disconnected: bool,
    out: io::Stdout,
}

impl StdioTransport {
    /// Spawn the stdin reader thread.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    match byte {
                        Ok(b) => {
                            if tx.send(b).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("stdin read failed: {}", e);
                            break;
                        }
                    }
                }
            })
            .map_err(|_| Error::Init("stdin reader thread"))?;

        Ok(Self {
            rx,
            pending: None,
            disconnected: false,
            out: io::stdout(),
        })
    }

    fn next_byte(&mut self) -> Option<u8> {
        if let Some(b) = self.pending.take() {
            return Some(b);
        }
        match self.rx.try_recv() {
            Ok(b) => Some(b),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    self.disconnected = true;
                    info!("console: {}", CommsError::Disconnected);
                }
                None
            }
        }
    }
}

impl LineTransport for StdioTransport {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut n = 0;
        while n < buf.len() {
            match self.next_byte() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.out
            .write(data)
            .map_err(|_| CommsError::WriteFailed.into())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|_| CommsError::WriteFailed.into())
    }

    fn available(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.next_byte();
        }
        self.pending.is_some()
    }
}
