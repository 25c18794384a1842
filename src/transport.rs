//! Line transport abstraction: the serial console's byte channel.
//!
//! The concrete implementation is stdin/stdout
//! ([`StdioTransport`](crate::adapters::stdio::StdioTransport)), which is
//! also the UART console under ESP-IDF.
//!
//! The console is generic over `LineTransport`, so adding a new channel
//! requires zero changes to the command logic.

/// Byte-oriented serial channel.
pub trait LineTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is available for reading. May pull pending input
    /// into an internal buffer, hence `&mut self`.
    fn available(&mut self) -> bool;

    /// Read a single byte if one is waiting.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut b = [0u8; 1];
        match self.read(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }
}
