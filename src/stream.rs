use std::cmp;
use std::fs::File;
use std::io;

use frame;
use metadata::{
  self,
  BlockType, StreamInfo, Unit, UnitKind,
  MAX_HEADER_SIZE, MIN_HEADER_SIZE, STREAM_INFO_SIZE,
};
use utility::{complete, ByteStream, ErrorKind, FileSource, StreamSource};

/// The four byte marker that opens every FLAC stream.
pub const MARKER: &'static [u8; 4] = b"fLaC";

/// Scans forward from `start` for the stream marker, returning the
/// offset of its first byte.
///
/// A partial match restarts the comparison window one byte past where it
/// began, so a false start like `fL` followed by garbage never hides a
/// later real marker. Fails with `ErrorKind::MarkerNotFound` when the
/// stream runs out first.
pub fn find_marker<S>(source: &mut S, start: u64) -> Result<u64, ErrorKind>
 where S: StreamSource {
  let mut byte    = [0; 1];
  let mut offset  = start;
  let mut matched = 0;

  while source.remaining_from(offset) > 0 {
    source.read_at(offset, &mut byte)?;

    if byte[0] == MARKER[matched] {
      matched += 1;
      offset  += 1;

      if matched == MARKER.len() {
        return Ok(offset - MARKER.len() as u64);
      }
    } else {
      offset  = offset - matched as u64 + 1;
      matched = 0;
    }
  }

  Err(ErrorKind::MarkerNotFound)
}

/// Reads the unit that starts at `offset`.
///
/// The first fourteen bits decide the path: on a sync match the header
/// grows with the escape bytes the block-size and sample-rate classes
/// call for, plus the CRC-8 byte; otherwise the four prefix bytes are a
/// metadata block header whose last three bytes are the payload length.
///
/// For audio frames the payload length is reported as zero: a frame's
/// extent is implicit in its encoded samples, which this scanner never
/// decodes, so only the end of the header is established.
pub fn scan_unit<S>(source: &mut S, offset: u64) -> Result<Unit, ErrorKind>
 where S: StreamSource {
  let mut header = [0; MAX_HEADER_SIZE];

  source.read_at(offset, &mut header[0..4])?;

  if frame::is_frame_sync(&header[0..4]) {
    let block_size_class  = frame::block_size_class(header[2])?;
    let sample_rate_class = frame::sample_rate_class(header[2])?;
    let escape_len        = frame::block_size_escape_len(block_size_class) +
                            frame::sample_rate_escape_len(sample_rate_class);
    let header_len        = 4 + escape_len + 1;

    source.read_at(offset + 4, &mut header[4..header_len])?;

    Ok(Unit::new(UnitKind::AudioFrame, false, &header[0..header_len],
                 offset + header_len as u64, 0))
  } else {
    let prefix                  = &header[0..4];
    let (code, is_last, length) = complete(metadata::block_header(prefix))?;
    let block_type              = BlockType::from_code(code);

    Ok(Unit::new(UnitKind::MetadataBlock(block_type), is_last, prefix,
                 offset + 4, length))
  }
}

/// Lazy sequence of units, produced by repeatedly invoking the boundary
/// scanner and advancing the source position past each unit.
///
/// The iterator's only state is the source's current position, so a
/// caller may snapshot and restore that position to re-scan a range.
/// Iteration ends cleanly once fewer bytes than the minimum header size
/// remain, the byte budget runs out, the last-metadata flag was seen, or
/// an audio frame was produced -- frame payloads have no decodable
/// length, so scanning can't continue past one. A decode failure is
/// yielded once, at the offending unit, and ends the sequence; units
/// yielded before it stay valid.
pub struct UnitIter<'a, S: StreamSource + 'a> {
  source: &'a mut S,
  budget: u64,
  wanted: Vec<BlockType>,
  done: bool,
}

impl<'a, S> UnitIter<'a, S> where S: StreamSource + 'a {
  /// Unfiltered walk from `start` to the end of the stream.
  pub fn new(source: &'a mut S, start: u64) -> UnitIter<'a, S> {
    let budget = source.remaining_from(start);

    UnitIter::filtered(source, start, budget, &[])
  }

  /// Walk from `start` spending at most `budget` bytes, yielding only
  /// metadata blocks whose type is in `wanted`. An empty `wanted` slice
  /// yields every unit; non-matching units are stepped over without
  /// their payload being materialized.
  pub fn filtered(source: &'a mut S, start: u64, budget: u64,
                  wanted: &[BlockType]) -> UnitIter<'a, S> {
    source.set_position(start);

    UnitIter {
      source: source,
      budget: budget,
      wanted: wanted.to_vec(),
      done: false,
    }
  }

  fn wants(&self, unit: &Unit) -> bool {
    if self.wanted.is_empty() {
      return true;
    }

    match unit.kind {
      UnitKind::MetadataBlock(block_type) => self.wanted
                                                 .contains(&block_type),
      UnitKind::AudioFrame                => false,
    }
  }
}

impl<'a, S> Iterator for UnitIter<'a, S> where S: StreamSource + 'a {
  type Item = Result<Unit, ErrorKind>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if self.done {
        return None;
      }

      let offset    = self.source.position();
      let remaining = cmp::min(self.budget,
                               self.source.remaining_from(offset));

      if remaining < MIN_HEADER_SIZE {
        self.done = true;

        return None;
      }

      let unit = match scan_unit(self.source, offset) {
        Ok(unit)  => unit,
        Err(kind) => {
          self.done = true;

          return Some(Err(kind));
        }
      };

      if unit.is_last || unit.kind == UnitKind::AudioFrame {
        self.done = true;
      }

      let size = unit.total_size();

      self.source.set_position(offset + size);
      self.budget = self.budget.saturating_sub(size);

      if self.wants(&unit) {
        return Some(Ok(unit));
      }
    }
  }
}

/// One logical audio stream, folded out of the metadata sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
  /// Global parameters from the track's STREAMINFO block.
  pub info: StreamInfo,
  /// Offset of the STREAMINFO block's header within the stream.
  pub info_offset: u64,
  /// The track's comment block, unparsed, when one was seen.
  pub comment: Option<Unit>,
}

/// Handle over one FLAC byte stream.
///
/// Holds the source together with the two memoized facts about it: where
/// the marker sits and what STREAMINFO says. Both are computed on first
/// access and immutable afterwards.
pub struct Stream<S: StreamSource> {
  source: S,
  marker_offset: Option<u64>,
  info: Option<StreamInfo>,
}

impl<'a> Stream<ByteStream<'a>> {
  /// Constructor for a stream over a buffer holding an entire FLAC
  /// file.
  pub fn from_buffer(buffer: &'a [u8]) -> Stream<ByteStream<'a>> {
    Stream::new(ByteStream::new(buffer))
  }
}

impl Stream<FileSource> {
  /// Constructor for a stream over the given file.
  ///
  /// # Failures
  ///
  /// * `ErrorKind::NotFound` is returned when the given filename isn't
  ///   found.
  pub fn from_file(filename: &str) -> io::Result<Stream<FileSource>> {
    File::open(filename).and_then(FileSource::new).map(Stream::new)
  }
}

impl<S> Stream<S> where S: StreamSource {
  pub fn new(source: S) -> Stream<S> {
    Stream {
      source: source,
      marker_offset: None,
      info: None,
    }
  }

  /// Locates the `fLaC` marker, scanning only on the first call.
  pub fn marker_offset(&mut self) -> Result<u64, ErrorKind> {
    if let Some(offset) = self.marker_offset {
      return Ok(offset);
    }

    let offset = find_marker(&mut self.source, 0)?;

    self.marker_offset = Some(offset);

    Ok(offset)
  }

  /// Returns the stream's STREAMINFO, parsed on first access and cached
  /// for the stream's lifetime.
  ///
  /// The block is required to be the first unit after the marker;
  /// anything else there fails with `ErrorKind::WrongBlockType`.
  pub fn info(&mut self) -> Result<StreamInfo, ErrorKind> {
    if let Some(info) = self.info {
      return Ok(info);
    }

    let marker = self.marker_offset()?;
    let unit   = scan_unit(&mut self.source, marker + MARKER.len() as u64)?;
    let info   = read_info_payload(&mut self.source, &unit)?;

    self.info = Some(info);

    Ok(info)
  }

  /// Iterator over every unit, starting at the first metadata block.
  pub fn units(&mut self) -> Result<UnitIter<S>, ErrorKind> {
    let start = self.marker_offset()? + MARKER.len() as u64;

    Ok(UnitIter::new(&mut self.source, start))
  }

  /// Iterator over the metadata blocks in `wanted` found within
  /// `budget` bytes of `start`. Useful for bounding a scan to a
  /// sub-range, like seek-table discovery between the end of STREAMINFO
  /// and the end of the file.
  pub fn units_within(&mut self, start: u64, budget: u64,
                      wanted: &[BlockType]) -> UnitIter<S> {
    UnitIter::filtered(&mut self.source, start, budget, wanted)
  }

  /// Collects the metadata blocks whose type is in `wanted`; an empty
  /// slice collects them all.
  pub fn blocks_of_type(&mut self, wanted: &[BlockType])
                        -> Result<Vec<Unit>, ErrorKind> {
    let start  = self.marker_offset()? + MARKER.len() as u64;
    let budget = self.source.remaining_from(start);

    let mut units = Vec::new();

    for result in UnitIter::filtered(&mut self.source, start, budget,
                                     wanted) {
      units.push(result?);
    }

    Ok(units)
  }

  /// Reads a unit's payload bytes on demand.
  pub fn read_payload(&mut self, unit: &Unit)
                      -> Result<Vec<u8>, ErrorKind> {
    let mut payload = vec![0; unit.payload_length as usize];

    self.source.read_at(unit.payload_offset, &mut payload)?;

    Ok(payload)
  }

  /// Folds the metadata sequence into one `Track` record per logical
  /// stream.
  ///
  /// Walks STREAMINFO and comment blocks in file order: each new
  /// STREAMINFO finalizes the pending track before starting the next,
  /// and the final pending track is flushed at the end of metadata.
  /// Comment blocks are recognized by type only and attached unparsed;
  /// when more than one shows up for a track, the extras are skipped.
  pub fn tracks(&mut self) -> Result<Vec<Track>, ErrorKind> {
    let mut tracks  = Vec::new();
    let mut pending = None;
    let mut offset  = self.marker_offset()? + MARKER.len() as u64;

    while self.source.remaining_from(offset) >= MIN_HEADER_SIZE {
      let unit = scan_unit(&mut self.source, offset)?;

      match unit.kind {
        UnitKind::MetadataBlock(BlockType::StreamInfo)    => {
          let info = read_info_payload(&mut self.source, &unit)?;

          if let Some(track) = pending.take() {
            tracks.push(track);
          }

          pending = Some(Track {
            info: info,
            info_offset: offset,
            comment: None,
          });
        }
        UnitKind::MetadataBlock(BlockType::VorbisComment) => {
          if let Some(ref mut track) = pending {
            if track.comment.is_none() {
              track.comment = Some(unit.clone());
            }
          }
        }
        _                                                 => (),
      }

      let ended = unit.is_last || unit.kind == UnitKind::AudioFrame;

      offset += unit.total_size();

      if ended {
        break;
      }
    }

    if let Some(track) = pending.take() {
      tracks.push(track);
    }

    Ok(tracks)
  }
}

// Reads and decodes the 34-byte STREAMINFO payload a unit points at.
fn read_info_payload<S>(source: &mut S, unit: &Unit)
                        -> Result<StreamInfo, ErrorKind>
 where S: StreamSource {
  if unit.kind != UnitKind::MetadataBlock(BlockType::StreamInfo) {
    return Err(ErrorKind::WrongBlockType);
  }

  if (unit.payload_length as usize) < STREAM_INFO_SIZE {
    return Err(ErrorKind::TruncatedStream);
  }

  let mut payload = [0; STREAM_INFO_SIZE];

  source.read_at(unit.payload_offset, &mut payload)?;

  metadata::read_stream_info(unit, &payload)
}
