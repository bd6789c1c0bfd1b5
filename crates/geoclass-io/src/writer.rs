//! Sequential writer for typed binary values.

use crate::error::{Error, Result};
use crate::varint;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes typed values to a byte stream.
///
/// The output mirrors what [`Scanner`](crate::Scanner) expects, so values
/// must be read back in the same order.
pub struct Writer<W: Write> {
    inner: W,
    error: bool,
}

impl Writer<BufWriter<File>> {
    /// Creates (or truncates) `path` for buffered writing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Writer<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            error: false,
        }
    }

    /// Returns true if any write so far has failed.
    pub fn has_error(&self) -> bool {
        self.error
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let result = self.inner.write_all(bytes).map_err(Error::from);
        if result.is_err() {
            self.error = true;
        }
        result
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes `1` for `true` and `0` for `false`.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.put(&[u8::from(value)])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes `value` as a varint.
    pub fn write_number_u32(&mut self, value: u32) -> Result<()> {
        self.write_number_u64(u64::from(value))
    }

    /// Writes `value` as a varint.
    pub fn write_number_u64(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; varint::MAX_LEN];
        let len = varint::encode(value, &mut buf);
        self.put(&buf[..len])
    }

    /// Writes a varint byte length followed by the UTF-8 bytes of `value`.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_number_u64(value.len() as u64)?;
        self.put(value.as_bytes())
    }

    /// Flushes buffered output and returns the wrapped writer.
    pub fn close(mut self) -> Result<W> {
        if let Err(err) = self.inner.flush() {
            self.error = true;
            return Err(Error::from(err));
        }
        Ok(self.inner)
    }
}
