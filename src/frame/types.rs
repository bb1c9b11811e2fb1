/// Whether every frame in a stream shares one block size or each frame
/// carries its own.
///
/// The strategy decides how the frame header's number field is read: a
/// frame number for fixed blocking, a sample number for variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingStrategy {
  Fixed,
  Variable,
}

/// Channel assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAssignment {
  /// Independent channels, from one up to eight.
  Independent,
  /// Left and side stereo.
  LeftSide,
  /// Right and side stereo.
  RightSide,
  /// Midpoint and side stereo.
  MidpointSide,
}

/// Numbering scheme used from the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
  /// Frame number of first sample in frame.
  Frame(u32),
  /// Sample number of first sample in frame.
  Sample(u64),
}

/// Decoded fields of one audio frame header.
///
/// `sample_rate` and `bits_per_sample` are `None` when the header used
/// class zero, which defers the value to STREAMINFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
  /// Fixed or variable blocking.
  pub blocking_strategy: BlockingStrategy,
  /// Number of samples per subframe, escape codes already applied.
  pub block_size: u32,
  /// Sample rate in hertz (Hz), when the header carries one.
  pub sample_rate: Option<u32>,
  /// Number of channels.
  pub channels: u8,
  /// Channel assignment order.
  pub channel_assignment: ChannelAssignment,
  /// Size, in bits, per sample, when the header carries one.
  pub bits_per_sample: Option<u8>,
  /// Numbering scheme used from the frame.
  pub number: NumberType,
  /// CRC-8 of all header bytes before this crc. Carried, not verified.
  pub crc: u8,
}

/// Sample rates for classes 1 through 11, in hertz. Class 0 defers to
/// STREAMINFO and classes 12 through 14 escape to trailing bytes, so
/// their slots stay zero.
pub const SAMPLE_RATES: [u32; 12] = [
  0, 88200, 176400, 192000, 8000, 16000,
  22050, 24000, 32000, 44100, 48000, 96000,
];

/// Bits per sample for classes 1, 2, 4, 5 and 6. Class 0 defers to
/// STREAMINFO; the 3 and 7 slots are reserved and stay zero.
pub const BITS_PER_SAMPLE: [u8; 8] = [0, 8, 12, 0, 16, 20, 24, 0];
