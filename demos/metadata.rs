extern crate docopt;
extern crate flac_scan;
extern crate rustc_serialize;

use docopt::Docopt;
use flac_scan::{BlockType, Stream, StreamSource, Unit, UnitKind};

use std::env;

const USAGE: &'static str = "
Usage: metadata streaminfo <input>
       metadata blocks <input>
       metadata tracks <input>
       metadata --help

Options:
  -h, --help   Show this message.
";

#[derive(Debug)]
struct Arguments {
  arg_input: String,
  cmd_streaminfo: bool,
  cmd_blocks: bool,
  cmd_tracks: bool,
}

// Equivalent to the removed built-in `#[derive(RustcDecodable)]` expansion.
impl rustc_serialize::Decodable for Arguments {
  fn decode<D: rustc_serialize::Decoder>(d: &mut D)
      -> Result<Arguments, D::Error> {
    d.read_struct("Arguments", 4, |d| {
      Ok(Arguments {
        arg_input: d.read_struct_field("arg_input", 0,
                     rustc_serialize::Decodable::decode)?,
        cmd_streaminfo: d.read_struct_field("cmd_streaminfo", 1,
                          rustc_serialize::Decodable::decode)?,
        cmd_blocks: d.read_struct_field("cmd_blocks", 2,
                      rustc_serialize::Decodable::decode)?,
        cmd_tracks: d.read_struct_field("cmd_tracks", 3,
                      rustc_serialize::Decodable::decode)?,
      })
    })
  }
}

fn block_type_str(unit: &Unit) -> String {
  match unit.kind {
    UnitKind::AudioFrame                => "AudioFrame".to_owned(),
    UnitKind::MetadataBlock(block_type) => match block_type {
      BlockType::StreamInfo     => "StreamInfo".to_owned(),
      BlockType::Padding        => "Padding".to_owned(),
      BlockType::Application    => "Application".to_owned(),
      BlockType::SeekTable      => "SeekTable".to_owned(),
      BlockType::VorbisComment  => "VorbisComment".to_owned(),
      BlockType::CueSheet       => "CueSheet".to_owned(),
      BlockType::Picture        => "Picture".to_owned(),
      BlockType::Reserved(code) => format!("Reserved({})", code),
      BlockType::Invalid        => "Invalid".to_owned(),
    },
  }
}

fn print_stream_info<S: StreamSource>(stream: &mut Stream<S>) {
  let info    = stream.info().expect("Couldn't parse StreamInfo");
  let mut md5 = String::with_capacity(32);

  for byte in &info.md5_sum {
    let hex = format!("{:02x}", byte);

    md5.push_str(&hex);
  }

  println!("StreamInfo
  Minimum block size: {} samples
  Maximum block size: {} samples
  Minimum frame size: {} bytes
  Maximum frame size: {} bytes
  Sample rate: {} Hz
  Number of channels: {}
  Bits per sample: {}
  Total samples: {}
  MD5 sum: {}",
  info.min_block_size, info.max_block_size,
  info.min_frame_size, info.max_frame_size,
  info.sample_rate, info.channels, info.bits_per_sample,
  info.total_samples, md5);
}

fn print_blocks<S: StreamSource>(stream: &mut Stream<S>) {
  let blocks = stream.blocks_of_type(&[])
                     .expect("Couldn't enumerate metadata blocks");

  for unit in &blocks {
    println!("{} (offset: {}, length: {}, last: {})",
             block_type_str(unit),
             unit.payload_offset - unit.header_len() as u64,
             unit.payload_length, unit.is_last);
  }
}

fn print_tracks<S: StreamSource>(stream: &mut Stream<S>) {
  let tracks = stream.tracks().expect("Couldn't fold tracks");

  for (index, track) in tracks.iter().enumerate() {
    let has_comment = if track.comment.is_some() { "yes" } else { "no" };

    println!("Track {}
  StreamInfo offset: {}
  Sample rate: {} Hz
  Number of channels: {}
  Bits per sample: {}
  Total samples: {}
  Tagged: {}",
    index, track.info_offset,
    track.info.sample_rate, track.info.channels,
    track.info.bits_per_sample, track.info.total_samples, has_comment);
  }
}

fn main() {
  let args: Arguments = Docopt::new(USAGE)
    .and_then(|d| d.argv(env::args()).decode())
    .unwrap_or_else(|e| e.exit());

  let mut stream = Stream::from_file(&args.arg_input)
                     .expect("Couldn't open file");

  if args.cmd_streaminfo {
    print_stream_info(&mut stream);
  } else if args.cmd_blocks {
    print_blocks(&mut stream);
  } else if args.cmd_tracks {
    print_tracks(&mut stream);
  }
}
