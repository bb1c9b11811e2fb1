mod types;
mod parser;

pub use self::types::{
  BlockingStrategy, ChannelAssignment, NumberType,
  FrameHeader,
  SAMPLE_RATES, BITS_PER_SAMPLE,
};

pub use self::parser::{
  header,
  is_frame_sync, blocking_strategy,
  block_size_class, sample_rate_class,
  channel_layout, bits_per_sample_class,
  block_size_escape_len, sample_rate_escape_len,
  block_size_from_class, sample_rate_from_class,
  bits_per_sample_from_class,
};
