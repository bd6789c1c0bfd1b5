//! Unsigned LEB128 encoding.
//!
//! Each byte carries seven value bits, least significant group first; the
//! high bit marks that another byte follows.

/// Maximum encoded length of a `u64`.
pub const MAX_LEN: usize = 10;

/// Encodes `value` into `buf`, returning the number of bytes used.
///
/// # Examples
///
/// ```
/// use geoclass_io::varint;
///
/// let mut buf = [0u8; varint::MAX_LEN];
/// let len = varint::encode(300, &mut buf);
/// assert_eq!(&buf[..len], &[0xAC, 0x02]);
/// ```
pub fn encode(mut value: u64, buf: &mut [u8; MAX_LEN]) -> usize {
    let mut len = 0;

    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;

        if value == 0 {
            buf[len] = byte;
            return len + 1;
        }

        buf[len] = byte | 0x80;
        len += 1;
    }
}

/// Returns the encoded length of `value` without encoding it.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}
