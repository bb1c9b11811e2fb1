use std::fs::File;
use std::io;
use std::io::{Read, Seek, SeekFrom};

/// Decode failure surfaced by the scanner and the field decoders.
///
/// A clean end of stream is never an error; enumeration simply stops when
/// fewer bytes remain than the smallest possible unit header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// No `fLaC` marker was found before the stream ran out.
  MarkerNotFound,
  /// A type-specific decoder was invoked on a unit of another type.
  WrongBlockType,
  /// A frame header carried the reserved block-size class zero.
  InvalidBlockSizeClass,
  /// A frame header carried the forbidden sample-rate class `0b1111`.
  InvalidSampleRateClass,
  /// A frame header carried a channel nibble above `0b1010`.
  InvalidChannelAssignment,
  /// A frame header carried a reserved bits-per-sample class.
  InvalidBitsPerSampleClass,
  /// A frame or sample number wasn't a valid variable-length integer.
  MalformedVarint,
  /// A header or field needed more bytes than the stream holds.
  TruncatedStream,
}

/// A seekable source of bytes that units are scanned out of.
///
/// Every read names its absolute offset, so callers are free to snapshot
/// the position, re-scan a range and restore it afterwards. Nothing here
/// is buffered or cached; one instance must not be shared between
/// concurrent readers.
pub trait StreamSource {
  /// Current read position, in bytes from the start of the stream.
  fn position(&self) -> u64;

  /// Moves the read position.
  fn set_position(&mut self, position: u64);

  /// Total number of bytes in the stream.
  fn len(&self) -> u64;

  /// Fills `buffer` with the bytes starting at `offset`.
  ///
  /// Fails with `ErrorKind::TruncatedStream` when fewer bytes than
  /// `buffer.len()` are available at `offset`.
  fn read_at(&mut self, offset: u64, buffer: &mut [u8])
             -> Result<(), ErrorKind>;

  /// Bytes left between the current position and the end of the stream.
  fn remaining(&self) -> u64 {
    let position = self.position();

    self.remaining_from(position)
  }

  /// Bytes left between `offset` and the end of the stream.
  fn remaining_from(&self, offset: u64) -> u64 {
    self.len().saturating_sub(offset)
  }
}

/// In-memory source over a borrowed byte slice.
pub struct ByteStream<'a> {
  offset: u64,
  bytes: &'a [u8],
}

impl<'a> ByteStream<'a> {
  pub fn new(bytes: &'a [u8]) -> ByteStream<'a> {
    ByteStream {
      offset: 0,
      bytes: bytes,
    }
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

impl<'a> StreamSource for ByteStream<'a> {
  fn position(&self) -> u64 {
    self.offset
  }

  fn set_position(&mut self, position: u64) {
    self.offset = position;
  }

  fn len(&self) -> u64 {
    self.bytes.len() as u64
  }

  fn read_at(&mut self, offset: u64, buffer: &mut [u8])
             -> Result<(), ErrorKind> {
    let start = offset as usize;
    let end   = start + buffer.len();

    if end > self.bytes.len() {
      return Err(ErrorKind::TruncatedStream);
    }

    buffer.copy_from_slice(&self.bytes[start..end]);

    Ok(())
  }
}

/// File-backed source that seeks for every read.
///
/// Operating system failures during a read show up as `TruncatedStream`;
/// anything that prevents opening the file in the first place is reported
/// by `Stream::from_file` as an `io::Error` before scanning starts.
pub struct FileSource {
  file: File,
  length: u64,
  position: u64,
}

impl FileSource {
  pub fn new(file: File) -> io::Result<FileSource> {
    let length = file.metadata()?.len();

    Ok(FileSource {
      file: file,
      length: length,
      position: 0,
    })
  }
}

impl StreamSource for FileSource {
  fn position(&self) -> u64 {
    self.position
  }

  fn set_position(&mut self, position: u64) {
    self.position = position;
  }

  fn len(&self) -> u64 {
    self.length
  }

  fn read_at(&mut self, offset: u64, buffer: &mut [u8])
             -> Result<(), ErrorKind> {
    self.file.seek(SeekFrom::Start(offset))
        .and_then(|_| self.file.read_exact(buffer))
        .map_err(|_| ErrorKind::TruncatedStream)
  }
}
