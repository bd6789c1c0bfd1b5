//! Sequential reader for typed binary values.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Upper bound accepted for a string length prefix (16 MiB).
pub const MAX_STRING_LEN: u64 = 16 * 1024 * 1024;

/// Reads typed values from a byte stream in the order they were written.
///
/// Every read returns a `Result`; a failed read additionally latches the
/// error flag returned by [`has_error`](Self::has_error).
pub struct Scanner<R> {
    inner: R,
    position: u64,
    error: bool,
}

impl Scanner<BufReader<File>> {
    /// Opens `path` for buffered sequential reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> Scanner<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            error: false,
        }
    }

    /// Returns true if any read so far has failed.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Releases the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.error = true;
        }
        result
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let result = self.inner.read_exact(buf).map_err(Error::from);
        if result.is_ok() {
            self.position += buf.len() as u64;
        }
        self.track(result)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a boolean byte; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_varint(&mut self, bits: u32) -> Result<u64> {
        let mut result = 0u64;
        let mut shift = 0u32;

        loop {
            let byte = self.read_u8()?;
            let group = u64::from(byte & 0x7F);

            if shift >= bits || (bits - shift < 7 && group >> (bits - shift) != 0) {
                return self.track(Err(Error::VarintOverflow { bits }));
            }

            result |= group << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }

            shift += 7;
        }
    }

    /// Reads a varint that must fit into a `u32`.
    pub fn read_number_u32(&mut self) -> Result<u32> {
        // read_varint(32) guarantees the value fits
        self.read_varint(32).map(|value| value as u32)
    }

    /// Reads a varint `u64`.
    pub fn read_number_u64(&mut self) -> Result<u64> {
        self.read_varint(64)
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_number_u64()?;

        if length > MAX_STRING_LEN {
            return self.track(Err(Error::StringTooLong { length }));
        }

        let mut bytes = vec![0u8; length as usize];
        self.fill(&mut bytes)?;

        let result = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8);
        self.track(result)
    }
}
