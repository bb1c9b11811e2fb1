mod types;
mod parser;
mod metadata;

pub use self::types::{
  BlockType, StreamInfo, Unit, UnitKind,
  MAX_HEADER_SIZE, MIN_HEADER_SIZE,
};

pub use self::parser::{
  block_header, stream_info, read_stream_info,
  STREAM_INFO_SIZE,
};

pub use self::metadata::{
  get_stream_info, get_blocks, get_blocks_of_type, get_tracks,
};
