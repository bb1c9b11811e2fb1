extern crate flac_scan;

use flac_scan::{BlockType, ErrorKind, Stream, UnitKind};

// 34-byte STREAMINFO payload: block size 4096, frame size 14-16 bytes,
// 44100 Hz, 2 channels, 16 bits per sample, unknown total samples.
const STREAM_INFO_PAYLOAD: [u8; 34] = [
  0x10, 0x00, 0x10, 0x00, 0x00, 0x00, 0x0e, 0x00, 0x00, 0x10,
  0x0a, 0xc4, 0x42, 0xf0, 0x00, 0x00, 0x00, 0x00,
  0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
  0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

// Marker, STREAMINFO, then a four byte Padding block flagged last.
fn two_block_stream(trailing: &[u8]) -> Vec<u8> {
  let mut bytes = Vec::new();

  bytes.extend_from_slice(b"fLaC");
  bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
  bytes.extend_from_slice(&STREAM_INFO_PAYLOAD);
  bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x04]);
  bytes.extend_from_slice(&[0; 4]);
  bytes.extend_from_slice(trailing);

  bytes
}

#[test]
fn test_enumerate_two_blocks() {
  // Garbage past the last block must not produce trailing units.
  let bytes      = two_block_stream(b"garbage bytes!");
  let mut stream = Stream::from_buffer(&bytes);

  let units: Vec<_> = stream.units().unwrap().collect();

  assert_eq!(units.len(), 2);

  let first  = units[0].as_ref().unwrap();
  let second = units[1].as_ref().unwrap();

  assert_eq!(first.kind, UnitKind::MetadataBlock(BlockType::StreamInfo));
  assert!(!first.is_last);
  assert_eq!(first.payload_length, 34);
  assert_eq!(first.total_size(), 38);

  assert_eq!(second.kind, UnitKind::MetadataBlock(BlockType::Padding));
  assert!(second.is_last);
  assert_eq!(second.payload_length, 4);
}

#[test]
fn test_enumeration_is_restartable() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  let first_pass: Vec<_>  = stream.units().unwrap().collect();
  let second_pass: Vec<_> = stream.units().unwrap().collect();

  assert_eq!(first_pass, second_pass);
}

#[test]
fn test_stream_info() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  let info = stream.info().unwrap();

  assert_eq!(info.min_block_size, 4096);
  assert_eq!(info.max_block_size, 4096);
  assert!(info.is_fixed_block_size());
  assert_eq!(info.min_frame_size, 14);
  assert_eq!(info.max_frame_size, 16);
  assert_eq!(info.sample_rate, 44100);
  assert_eq!(info.channels, 2);
  assert_eq!(info.bits_per_sample, 16);
  assert_eq!(info.total_samples, 0);
  assert_eq!(info.md5_sum, &STREAM_INFO_PAYLOAD[18..34]);

  // Memoized: a second access sees the same record.
  assert_eq!(stream.info().unwrap(), info);
}

#[test]
fn test_marker_after_false_start() {
  // A `fL` false start before the real marker must not fool the scan.
  let mut bytes = b"fLxx".to_vec();

  bytes.extend_from_slice(&two_block_stream(&[]));

  let mut stream = Stream::from_buffer(&bytes);

  assert_eq!(stream.marker_offset(), Ok(4));
  assert_eq!(stream.info().unwrap().sample_rate, 44100);
}

#[test]
fn test_marker_not_found() {
  let mut stream = Stream::from_buffer(b"not a flac stream");

  assert_eq!(stream.marker_offset(), Err(ErrorKind::MarkerNotFound));
}

#[test]
fn test_info_on_truncated_stream() {
  let mut stream = Stream::from_buffer(b"fLaC\x00\x00");

  assert_eq!(stream.info(), Err(ErrorKind::TruncatedStream));
}

#[test]
fn test_info_requires_leading_stream_info() {
  let mut bytes = b"fLaC".to_vec();

  bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x04]);
  bytes.extend_from_slice(&[0; 4]);

  let mut stream = Stream::from_buffer(&bytes);

  assert_eq!(stream.info(), Err(ErrorKind::WrongBlockType));
}

#[test]
fn test_blocks_of_type() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  let padding = stream.blocks_of_type(&[BlockType::Padding]).unwrap();

  assert_eq!(padding.len(), 1);
  assert_eq!(padding[0].kind,
             UnitKind::MetadataBlock(BlockType::Padding));

  let everything = stream.blocks_of_type(&[]).unwrap();

  assert_eq!(everything.len(), 2);
}

#[test]
fn test_budgeted_scan() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  // 38 bytes covers exactly the STREAMINFO block and nothing after it.
  let units: Vec<_> = stream.units_within(4, 38, &[]).collect();

  assert_eq!(units.len(), 1);
  assert_eq!(units[0].as_ref().unwrap().kind,
             UnitKind::MetadataBlock(BlockType::StreamInfo));
}

#[test]
fn test_enumeration_stops_at_audio_frame() {
  // STREAMINFO without the last flag, followed directly by a frame
  // header: the frame is yielded, then enumeration ends -- the frame's
  // extent isn't decodable.
  let mut bytes = b"fLaC".to_vec();

  bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
  bytes.extend_from_slice(&STREAM_INFO_PAYLOAD);
  bytes.extend_from_slice(&[0xff, 0xf8, 0xc8, 0x72, 0x40, 0x19]);

  let mut stream = Stream::from_buffer(&bytes);

  let units: Vec<_> = stream.units().unwrap().collect();

  assert_eq!(units.len(), 2);

  let frame = units[1].as_ref().unwrap();

  assert_eq!(frame.kind, UnitKind::AudioFrame);
  assert_eq!(frame.header_len(), 5);
  assert_eq!(frame.payload_length, 0);
}

#[test]
fn test_enumeration_surfaces_failure_once() {
  // STREAMINFO, then a frame header with the reserved block-size class:
  // the first unit stays valid, the failure is yielded at the second.
  let mut bytes = b"fLaC".to_vec();

  bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
  bytes.extend_from_slice(&STREAM_INFO_PAYLOAD);
  bytes.extend_from_slice(&[0xff, 0xf8, 0x09, 0x18, 0x00, 0x00]);

  let mut stream = Stream::from_buffer(&bytes);

  let units: Vec<_> = stream.units().unwrap().collect();

  assert_eq!(units.len(), 2);
  assert!(units[0].is_ok());
  assert_eq!(units[1], Err(ErrorKind::InvalidBlockSizeClass));
}

#[test]
fn test_tracks() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  let tracks = stream.tracks().unwrap();

  assert_eq!(tracks.len(), 1);
  assert_eq!(tracks[0].info.sample_rate, 44100);
  assert_eq!(tracks[0].info_offset, 4);
  assert!(tracks[0].comment.is_none());
}

#[test]
fn test_tracks_with_comment() {
  // STREAMINFO, VorbisComment, then a Padding block flagged last.
  let mut bytes = b"fLaC".to_vec();

  bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x22]);
  bytes.extend_from_slice(&STREAM_INFO_PAYLOAD);
  bytes.extend_from_slice(&[0x04, 0x00, 0x00, 0x08]);
  bytes.extend_from_slice(&[0; 8]);
  bytes.extend_from_slice(&[0x81, 0x00, 0x00, 0x04]);
  bytes.extend_from_slice(&[0; 4]);

  let mut stream = Stream::from_buffer(&bytes);

  let tracks = stream.tracks().unwrap();

  assert_eq!(tracks.len(), 1);

  let comment = tracks[0].comment.as_ref().unwrap();

  assert_eq!(comment.kind,
             UnitKind::MetadataBlock(BlockType::VorbisComment));
  assert_eq!(comment.payload_length, 8);
}

#[test]
fn test_payload_read_on_demand() {
  let bytes      = two_block_stream(&[]);
  let mut stream = Stream::from_buffer(&bytes);

  let units: Vec<_> = stream.units().unwrap().collect();
  let info_unit     = units[0].as_ref().unwrap();
  let payload       = stream.read_payload(info_unit).unwrap();

  assert_eq!(&payload[..], &STREAM_INFO_PAYLOAD[..]);
}
