//! The UTF-8 style variable-length integer scheme used for frame and
//! sample numbers.
//!
//! The leading byte's run of high one-bits tells how many continuation
//! bytes follow, each continuation byte must match `10xxxxxx` and carries
//! six bits. The 32-bit form stops at five continuation bytes; the 64-bit
//! form extends past plain UTF-8 to six, which covers the 36 bits a
//! sample number may need.

use utility::{extend_sign, ErrorKind};

/// Largest number of bytes one encoded value can occupy.
pub const MAX_ENCODED_SIZE: usize = 7;

// Meaningful bits carried by an encoding with `n` continuation bytes.
const BIT_WIDTHS: [usize; 7] = [7, 11, 16, 21, 26, 31, 36];

const MARKERS: [u8; 7] = [
  0b00000000, 0b11000000, 0b11100000, 0b11110000,
  0b11111000, 0b11111100, 0b11111110,
];

// Splits the leading byte into its continuation count and payload bits.
// The `0b11111110` prefix is only meaningful in the 64-bit form.
fn leading(byte: u8, is_extended: bool) -> Result<(usize, u64), ErrorKind> {
  match byte {
    0b00000000...0b01111111 => Ok((0, byte as u64)),
    0b11000000...0b11011111 => Ok((1, (byte & 0b00011111) as u64)),
    0b11100000...0b11101111 => Ok((2, (byte & 0b00001111) as u64)),
    0b11110000...0b11110111 => Ok((3, (byte & 0b00000111) as u64)),
    0b11111000...0b11111011 => Ok((4, (byte & 0b00000011) as u64)),
    0b11111100...0b11111101 => Ok((5, (byte & 0b00000001) as u64)),
    0b11111110              => if is_extended {
      Ok((6, 0))
    } else {
      Err(ErrorKind::MalformedVarint)
    },
    _                       => Err(ErrorKind::MalformedVarint),
  }
}

fn continuation(bytes: &[u8], count: usize, value: u64)
                -> Result<u64, ErrorKind> {
  if bytes.len() < count {
    return Err(ErrorKind::MalformedVarint);
  }

  let mut result = value;

  for i in 0..count {
    let byte = bytes[i];

    if byte & 0b11000000 != 0b10000000 {
      return Err(ErrorKind::MalformedVarint);
    }

    result = (result << 6) + ((byte & 0b00111111) as u64);
  }

  Ok(result)
}

/// Decodes the 64-bit form, up to 36 meaningful bits.
///
/// Returns the value and the number of bytes consumed, which is always
/// one plus the continuation count.
pub fn decode_u64(bytes: &[u8]) -> Result<(u64, usize), ErrorKind> {
  if bytes.is_empty() {
    return Err(ErrorKind::TruncatedStream);
  }

  let (count, head) = leading(bytes[0], true)?;
  let value         = continuation(&bytes[1..], count, head)?;

  Ok((value, count + 1))
}

/// Decodes the 32-bit form, at most five continuation bytes.
pub fn decode_u32(bytes: &[u8]) -> Result<(u32, usize), ErrorKind> {
  if bytes.is_empty() {
    return Err(ErrorKind::TruncatedStream);
  }

  let (count, head) = leading(bytes[0], false)?;
  let value         = continuation(&bytes[1..], count, head)?;

  Ok((value as u32, count + 1))
}

/// Decodes the 64-bit form and reinterprets the result as two's
/// complement of the encoding's own bit width.
pub fn decode_i64(bytes: &[u8]) -> Result<(i64, usize), ErrorKind> {
  decode_u64(bytes).map(|(value, size)| {
    (extend_sign(value, BIT_WIDTHS[size - 1]), size)
  })
}

/// Encodes `value` into `buffer`, returning the number of bytes written.
///
/// Values past 36 bits have no encoding and yield `None`.
pub fn encode(value: u64, buffer: &mut [u8; MAX_ENCODED_SIZE])
              -> Option<usize> {
  let count = match BIT_WIDTHS.iter()
                              .position(|width| value < (1 << width)) {
    Some(count) => count,
    None        => return None,
  };

  buffer[0] = MARKERS[count] | ((value >> (6 * count)) as u8);

  for i in 0..count {
    let shift = 6 * (count - 1 - i);

    buffer[i + 1] = 0b10000000 | (((value >> shift) & 0b00111111) as u8);
  }

  Some(count + 1)
}
