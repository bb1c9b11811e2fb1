use frame::types::{
  BlockingStrategy, ChannelAssignment, NumberType,
  FrameHeader,
  SAMPLE_RATES, BITS_PER_SAMPLE,
};

use utility::{utf8, to_u32, ErrorKind};

/// Tests the first fourteen bits against the frame sync pattern
/// `11111111111110`. A mismatch means the bytes head a metadata block
/// instead.
pub fn is_frame_sync(bytes: &[u8]) -> bool {
  bytes.len() >= 2 && bytes[0] == 0b11111111 &&
  (bytes[1] >> 2) == 0b111110
}

/// Blocking strategy from the second header byte's low bit.
pub fn blocking_strategy(byte: u8) -> BlockingStrategy {
  if (byte & 0b01) == 1 {
    BlockingStrategy::Variable
  } else {
    BlockingStrategy::Fixed
  }
}

/// Block-size class from the high nibble of the third header byte.
///
/// Class zero is reserved and always a decode error; classes 6 and 7
/// mean the size follows as one or two trailing bytes, which this
/// primitive only reports, it doesn't read them.
pub fn block_size_class(byte: u8) -> Result<u8, ErrorKind> {
  let class = byte >> 4;

  if class == 0b0000 {
    Err(ErrorKind::InvalidBlockSizeClass)
  } else {
    Ok(class)
  }
}

/// Sample-rate class from the low nibble of the third header byte.
///
/// Class zero defers to STREAMINFO and classes 12 through 14 escape to
/// trailing bytes, neither of which is an error here. `0b1111` is
/// forbidden to prevent sync code fooling.
pub fn sample_rate_class(byte: u8) -> Result<u8, ErrorKind> {
  let class = byte & 0b1111;

  if class == 0b1111 {
    Err(ErrorKind::InvalidSampleRateClass)
  } else {
    Ok(class)
  }
}

/// Channel count and assignment from the high nibble of the fourth
/// header byte. Nibbles 8 through 10 are the stereo assignments; above
/// that is reserved.
pub fn channel_layout(byte: u8)
                      -> Result<(u8, ChannelAssignment), ErrorKind> {
  let nibble = byte >> 4;

  match nibble {
    0b0000...0b0111 => Ok((nibble + 1, ChannelAssignment::Independent)),
    0b1000          => Ok((2, ChannelAssignment::LeftSide)),
    0b1001          => Ok((2, ChannelAssignment::RightSide)),
    0b1010          => Ok((2, ChannelAssignment::MidpointSide)),
    _               => Err(ErrorKind::InvalidChannelAssignment),
  }
}

/// Bits-per-sample class from bits one through three of the fourth
/// header byte. Classes 3 and 7 are reserved; class zero defers to
/// STREAMINFO.
pub fn bits_per_sample_class(byte: u8) -> Result<u8, ErrorKind> {
  let class = (byte >> 1) & 0b0111;

  if class == 0b011 || class == 0b111 {
    Err(ErrorKind::InvalidBitsPerSampleClass)
  } else {
    Ok(class)
  }
}

/// Number of trailing block-size bytes a class escapes to.
pub fn block_size_escape_len(class: u8) -> usize {
  match class {
    0b0110 => 1,
    0b0111 => 2,
    _      => 0,
  }
}

/// Number of trailing sample-rate bytes a class escapes to.
pub fn sample_rate_escape_len(class: u8) -> usize {
  match class {
    0b1100          => 1,
    0b1101 | 0b1110 => 2,
    _               => 0,
  }
}

/// Actual block size for a class, escape bytes already read into
/// `escape` when the class needs them.
pub fn block_size_from_class(class: u8, escape: Option<u32>)
                             -> Result<u32, ErrorKind> {
  match class {
    0b0001          => Ok(192),
    0b0010...0b0101 => Ok(576 * 2_u32.pow(class as u32 - 2)),
    0b0110 | 0b0111 => escape.map(|value| value + 1)
                             .ok_or(ErrorKind::TruncatedStream),
    0b1000...0b1111 => Ok(256 * 2_u32.pow(class as u32 - 8)),
    _               => Err(ErrorKind::InvalidBlockSizeClass),
  }
}

/// Actual sample rate for a class, or `None` for class zero, which
/// defers to STREAMINFO. Escaped classes carry the rate in kilohertz
/// (12), hertz (13) or tenths of hertz (14).
pub fn sample_rate_from_class(class: u8, escape: Option<u32>)
                              -> Result<Option<u32>, ErrorKind> {
  match class {
    0b0000          => Ok(None),
    0b0001...0b1011 => Ok(Some(SAMPLE_RATES[class as usize])),
    0b1100          => escape.map(|value| Some(value * 1000))
                             .ok_or(ErrorKind::TruncatedStream),
    0b1101          => escape.map(Some)
                             .ok_or(ErrorKind::TruncatedStream),
    0b1110          => escape.map(|value| Some(value * 10))
                             .ok_or(ErrorKind::TruncatedStream),
    _               => Err(ErrorKind::InvalidSampleRateClass),
  }
}

/// Actual bits per sample for a class, or `None` for class zero.
pub fn bits_per_sample_from_class(class: u8)
                                  -> Result<Option<u8>, ErrorKind> {
  match class {
    0b000                         => Ok(None),
    0b001 | 0b010 | 0b100 | 0b101 |
    0b110                         => {
      Ok(Some(BITS_PER_SAMPLE[class as usize]))
    }
    _                             => {
      Err(ErrorKind::InvalidBitsPerSampleClass)
    }
  }
}

fn read_escape(bytes: &[u8], index: &mut usize, length: usize)
               -> Result<Option<u32>, ErrorKind> {
  if length == 0 {
    return Ok(None);
  }

  if bytes.len() < *index + length {
    return Err(ErrorKind::TruncatedStream);
  }

  let value = to_u32(&bytes[*index..(*index + length)]);

  *index += length;

  Ok(Some(value))
}

/// Decodes a complete frame header from the start of `bytes`, returning
/// the header and the number of bytes consumed.
///
/// Unlike the boundary scanner, this reads every field: the four byte
/// prefix, the frame or sample number, any escape bytes and the CRC-8
/// byte. The caller is expected to have matched the sync pattern
/// already; bytes without it fail with `ErrorKind::WrongBlockType`.
pub fn header(bytes: &[u8]) -> Result<(FrameHeader, usize), ErrorKind> {
  if bytes.len() < 4 {
    return Err(ErrorKind::TruncatedStream);
  }

  if !is_frame_sync(bytes) {
    return Err(ErrorKind::WrongBlockType);
  }

  let strategy               = blocking_strategy(bytes[1]);
  let bs_class               = block_size_class(bytes[2])?;
  let sr_class               = sample_rate_class(bytes[2])?;
  let (channels, assignment) = channel_layout(bytes[3])?;
  let bps_class              = bits_per_sample_class(bytes[3])?;

  let mut index = 4;

  let number = match strategy {
    BlockingStrategy::Variable => {
      let (value, size) = utf8::decode_u64(&bytes[index..])?;

      index += size;

      NumberType::Sample(value)
    }
    BlockingStrategy::Fixed    => {
      let (value, size) = utf8::decode_u32(&bytes[index..])?;

      index += size;

      NumberType::Frame(value)
    }
  };

  let bs_escape = read_escape(bytes, &mut index,
                              block_size_escape_len(bs_class))?;
  let sr_escape = read_escape(bytes, &mut index,
                              sample_rate_escape_len(sr_class))?;

  if index >= bytes.len() {
    return Err(ErrorKind::TruncatedStream);
  }

  let crc = bytes[index];

  index += 1;

  let frame_header = FrameHeader {
    blocking_strategy: strategy,
    block_size: block_size_from_class(bs_class, bs_escape)?,
    sample_rate: sample_rate_from_class(sr_class, sr_escape)?,
    channels: channels,
    channel_assignment: assignment,
    bits_per_sample: bits_per_sample_from_class(bps_class)?,
    number: number,
    crc: crc,
  };

  Ok((frame_header, index))
}
