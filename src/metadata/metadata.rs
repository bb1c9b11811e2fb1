use std::io::{Error, ErrorKind, Result};

use metadata::{BlockType, StreamInfo, Unit};
use stream::{Stream, Track};
use utility;

fn invalid_data(kind: utility::ErrorKind) -> Error {
  let error_str = format!("parser: {:?}", kind);

  Error::new(ErrorKind::InvalidData, error_str)
}

/// Reads and returns the `StreamInfo` of the given FLAC file.
///
/// # Failures
///
/// * `ErrorKind::NotFound` is returned when the given filename isn't
///   found.
/// * `ErrorKind::InvalidData` is returned when the data within the file
///   isn't valid FLAC data.
///
/// # Examples
///
/// ```no_run
/// use flac_scan::metadata;
///
/// match metadata::get_stream_info("path/to/file.flac") {
///   Ok(stream_info) => {
///     // Use the stream_info variable...
///   }
///   Err(error)      => println!("{}", error),
/// }
/// ```
pub fn get_stream_info(filename: &str) -> Result<StreamInfo> {
  let mut stream = Stream::from_file(filename)?;

  stream.info().map_err(invalid_data)
}

/// Reads and returns all metadata block descriptors of the given FLAC
/// file, in stream order.
///
/// # Failures
///
/// * `ErrorKind::NotFound` is returned when the given filename isn't
///   found.
/// * `ErrorKind::InvalidData` is returned when the data within the file
///   isn't valid FLAC data.
pub fn get_blocks(filename: &str) -> Result<Vec<Unit>> {
  get_blocks_of_type(filename, &[])
}

/// Like `get_blocks`, but keeps only blocks whose type is in `wanted`.
/// An empty `wanted` slice keeps everything.
pub fn get_blocks_of_type(filename: &str, wanted: &[BlockType])
                          -> Result<Vec<Unit>> {
  let mut stream = Stream::from_file(filename)?;

  stream.blocks_of_type(wanted).map_err(invalid_data)
}

/// Reads the given FLAC file and folds its metadata into one `Track`
/// record per logical stream.
///
/// # Failures
///
/// * `ErrorKind::NotFound` is returned when the given filename isn't
///   found.
/// * `ErrorKind::InvalidData` is returned when the data within the file
///   isn't valid FLAC data.
pub fn get_tracks(filename: &str) -> Result<Vec<Track>> {
  let mut stream = Stream::from_file(filename)?;

  stream.tracks().map_err(invalid_data)
}
