use nom::{be_u8, be_u16};

use metadata::{BlockType, StreamInfo, Unit, UnitKind};
use utility::{self, to_u32, ErrorKind};

/// Byte length of a STREAMINFO payload.
pub const STREAM_INFO_SIZE: usize = 34;

named!(pub block_header <&[u8], (u8, bool, u32)>,
  chain!(
    block_byte: be_u8 ~
    length: map!(take!(3), to_u32),
    || {
      let is_last    = (block_byte >> 7) == 1;
      let block_type = block_byte & 0b01111111;

      (block_type, is_last, length)
    }
  )
);

named!(pub stream_info <&[u8], StreamInfo>,
  chain!(
    min_block_size: be_u16 ~
    max_block_size: be_u16 ~
    packed: bits!(chain!(
      min_frame_size: take_bits!(u32, 24) ~
      max_frame_size: take_bits!(u32, 24) ~
      sample_rate: take_bits!(u32, 20) ~
      channels: take_bits!(u8, 3) ~
      bits_per_sample: take_bits!(u8, 5) ~
      total_samples: take_bits!(u64, 36),
      || {
        (min_frame_size, max_frame_size, sample_rate,
         channels + 1, bits_per_sample + 1, total_samples)
      }
    )) ~
    md5: take!(16),
    || {
      let mut md5_sum = [0; 16];

      md5_sum.copy_from_slice(md5);

      StreamInfo {
        min_block_size: min_block_size,
        max_block_size: max_block_size,
        min_frame_size: packed.0,
        max_frame_size: packed.1,
        sample_rate: packed.2,
        channels: packed.3,
        bits_per_sample: packed.4,
        total_samples: packed.5,
        md5_sum: md5_sum,
      }
    }
  )
);

/// Decodes the payload of a unit already identified as STREAMINFO.
///
/// # Failures
///
/// * `ErrorKind::WrongBlockType` when `unit` is any other kind of unit.
/// * `ErrorKind::TruncatedStream` when `payload` holds fewer than the 34
///   bytes the fixed layout requires.
pub fn read_stream_info(unit: &Unit, payload: &[u8])
                        -> Result<StreamInfo, ErrorKind> {
  if unit.kind != UnitKind::MetadataBlock(BlockType::StreamInfo) {
    return Err(ErrorKind::WrongBlockType);
  }

  utility::complete(stream_info(payload))
}

#[cfg(test)]
mod tests {
  use super::*;
  use metadata::{BlockType, Unit, UnitKind};
  use nom::IResult;
  use utility::ErrorKind;

  #[test]
  fn test_block_header() {
    let inputs  = [ &b"\x00\x00\x00\x22"[..], &b"\x04\x00\x10\x00"[..]
                  , &b"\x81\x00\x00\x04"[..]
                  ];
    let slice   = &[][..];
    let results = [ IResult::Done(slice, (0, false, 34))
                  , IResult::Done(slice, (4, false, 4096))
                  , IResult::Done(slice, (1, true, 4))
                  ];

    assert_eq!(block_header(inputs[0]), results[0]);
    assert_eq!(block_header(inputs[1]), results[1]);
    assert_eq!(block_header(inputs[2]), results[2]);
  }

  #[test]
  fn test_stream_info() {
    let input = b"\x10\x00\x10\x00\x00\x00\x0e\x00\x00\x10\
                  \x0a\xc4\x42\xf0\x00\x00\x00\x00\
                  \x00\x01\x02\x03\x04\x05\x06\x07\
                  \x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

    let result = stream_info(&input[..]);

    if let IResult::Done(i, info) = result {
      assert!(i.is_empty());
      assert_eq!(info.min_block_size, 4096);
      assert_eq!(info.max_block_size, 4096);
      assert_eq!(info.min_frame_size, 14);
      assert_eq!(info.max_frame_size, 16);
      assert_eq!(info.sample_rate, 44100);
      assert_eq!(info.channels, 2);
      assert_eq!(info.bits_per_sample, 16);
      assert_eq!(info.total_samples, 0);
      assert_eq!(info.md5_sum, [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
                                0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
                                0x0e, 0x0f]);
    } else {
      panic!("stream_info didn't parse: {:?}", result);
    }
  }

  #[test]
  fn test_read_stream_info_wrong_type() {
    let header = [0x81, 0x00, 0x00, 0x04];
    let unit   = Unit::new(UnitKind::MetadataBlock(BlockType::Padding),
                           true, &header, 4, 4);

    assert_eq!(read_stream_info(&unit, &[0; 34]),
               Err(ErrorKind::WrongBlockType));
  }

  #[test]
  fn test_read_stream_info_truncated() {
    let header = [0x00, 0x00, 0x00, 0x22];
    let unit   = Unit::new(UnitKind::MetadataBlock(BlockType::StreamInfo),
                           false, &header, 4, 34);

    assert_eq!(read_stream_info(&unit, &[0; 20]),
               Err(ErrorKind::TruncatedStream));
  }
}
