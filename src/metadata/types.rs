/// Smallest number of bytes any unit header can occupy. Enumeration ends
/// cleanly once fewer bytes than this remain.
pub const MIN_HEADER_SIZE: u64 = 4;

/// Largest number of bytes a unit header can occupy: a four byte frame
/// prefix, up to two block-size escape bytes, up to two sample-rate
/// escape bytes and the CRC-8 byte.
pub const MAX_HEADER_SIZE: usize = 9;

/// Type code carried in the low seven bits of a metadata block's first
/// header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
  StreamInfo,
  Padding,
  Application,
  SeekTable,
  VorbisComment,
  CueSheet,
  Picture,
  /// Codes 7 through 126, reserved by the format.
  Reserved(u8),
  /// Code 127, forbidden to avoid confusion with the frame sync code.
  Invalid,
}

impl BlockType {
  pub fn from_code(code: u8) -> BlockType {
    match code & 0b01111111 {
      0    => BlockType::StreamInfo,
      1    => BlockType::Padding,
      2    => BlockType::Application,
      3    => BlockType::SeekTable,
      4    => BlockType::VorbisComment,
      5    => BlockType::CueSheet,
      6    => BlockType::Picture,
      127  => BlockType::Invalid,
      code => BlockType::Reserved(code),
    }
  }
}

/// What a scanned unit turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
  MetadataBlock(BlockType),
  AudioFrame,
}

/// One parsed unit: a metadata block or an audio frame.
///
/// Payload bytes are never materialized here; the descriptor names the
/// byte range they occupy so a caller can read them on demand. For audio
/// frames `payload_length` is zero, since a frame's extent isn't encoded
/// in its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
  /// Metadata block of some type, or an audio frame.
  pub kind: UnitKind,
  /// For metadata blocks, whether this is the final block before audio.
  pub is_last: bool,
  /// Byte offset of the unit's body within the stream.
  pub payload_offset: u64,
  /// Body length in bytes; the 24-bit length field for metadata blocks,
  /// zero for audio frames.
  pub payload_length: u32,
  header: [u8; MAX_HEADER_SIZE],
  header_len: usize,
}

impl Unit {
  pub fn new(kind: UnitKind, is_last: bool, header: &[u8],
             payload_offset: u64, payload_length: u32) -> Unit {
    debug_assert!(header.len() <= MAX_HEADER_SIZE);

    let mut bytes = [0; MAX_HEADER_SIZE];

    bytes[0..header.len()].copy_from_slice(header);

    Unit {
      kind: kind,
      is_last: is_last,
      payload_offset: payload_offset,
      payload_length: payload_length,
      header: bytes,
      header_len: header.len(),
    }
  }

  /// The raw bytes consumed to determine the unit's framing.
  pub fn header_bytes(&self) -> &[u8] {
    &self.header[0..self.header_len]
  }

  pub fn header_len(&self) -> usize {
    self.header_len
  }

  /// Header and payload length combined.
  pub fn total_size(&self) -> u64 {
    self.header_len as u64 + self.payload_length as u64
  }

  /// The unit's block type, when it is a metadata block.
  pub fn block_type(&self) -> Option<BlockType> {
    match self.kind {
      UnitKind::MetadataBlock(block_type) => Some(block_type),
      UnitKind::AudioFrame                => None,
    }
  }
}

/// Global stream parameters from the mandatory first metadata block.
///
/// Values are taken as authoritative; nothing here is checked for
/// plausibility beyond the `+ 1` field arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
  /// Minimum block size, in samples, used in the stream.
  pub min_block_size: u16,
  /// Maximum block size, in samples, used in the stream.
  pub max_block_size: u16,
  /// Minimum frame size, in bytes, used in the stream.
  pub min_frame_size: u32,
  /// Maximum frame size, in bytes, used in the stream.
  pub max_frame_size: u32,
  /// Sample rate in hertz (Hz).
  pub sample_rate: u32,
  /// Number of channels.
  pub channels: u8,
  /// Size, in bits, per sample.
  pub bits_per_sample: u8,
  /// Total number of inter-channel samples, zero when unknown.
  pub total_samples: u64,
  /// 128-bit fingerprint of the unencoded audio data.
  pub md5_sum: [u8; 16],
}

impl StreamInfo {
  pub fn new() -> StreamInfo {
    StreamInfo {
      min_block_size: 0,
      max_block_size: 0,
      min_frame_size: 0,
      max_frame_size: 0,
      sample_rate: 0,
      channels: 0,
      bits_per_sample: 0,
      total_samples: 0,
      md5_sum: [0; 16],
    }
  }

  /// Whether every frame in the stream shares one block size.
  pub fn is_fixed_block_size(&self) -> bool {
    self.min_block_size == self.max_block_size && self.min_block_size > 0
  }
}
