mod types;

pub mod utf8;

pub use self::types::{ErrorKind, StreamSource, ByteStream, FileSource};

use nom::IResult;

// Convert one to four byte slices into an unsigned 32-bit number.
//
// NOTE: This assumes big-endian since most numbers in the FLAC binary are
// that endianness.
#[inline]
pub fn to_u32(bytes: &[u8]) -> u32 {
  let length = bytes.len();

  debug_assert!(length <= 4);

  (0..length).fold(0, |result, i|
    result + ((bytes[i] as u32) << ((length - 1 - i) * 8))
  )
}

// Reinterpret the low `bit_count` bits of `value` as a two's complement
// signed number.
pub fn extend_sign(value: u64, bit_count: usize) -> i64 {
  if bit_count >= 64 || value < (1 << (bit_count - 1)) {
    value as i64
  } else {
    (value as i64).wrapping_sub(1 << bit_count)
  }
}

// Adapter for parsers run over an in-memory slice that is already known
// to hold the whole field: anything short of a full parse means the
// stream didn't contain the bytes the field required.
pub fn complete<'a, T>(result: IResult<&'a [u8], T>)
                       -> Result<T, ErrorKind> {
  match result {
    IResult::Done(_, value) => Ok(value),
    _                       => Err(ErrorKind::TruncatedStream),
  }
}
