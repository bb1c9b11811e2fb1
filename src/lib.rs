//! A boundary scanner for the [FLAC](https://xiph.org/flac) container
//! format, written in Rust.
//!
//! This crate walks the sequence of metadata blocks and audio frames in
//! a FLAC byte stream and decodes their headers into structured records:
//! it locates the `fLaC` marker, tells metadata blocks apart from frames
//! by the fourteen bit sync pattern, computes each unit's exact header
//! length and extracts the semantic fields with strict validation of
//! reserved encodings.
//!
//! Audio itself is out of scope: sample and residual decoding is not
//! implemented, so an audio frame's payload length is never computed --
//! the scanner only establishes where the header ends.

#[macro_use]
extern crate nom;

mod utility;
pub mod metadata;
pub mod frame;
pub mod stream;

pub use metadata::{BlockType, StreamInfo, Unit, UnitKind};
pub use frame::{FrameHeader, ChannelAssignment, BlockingStrategy,
                NumberType};
pub use stream::{find_marker, scan_unit, Stream, Track, UnitIter, MARKER};
pub use utility::{utf8, ByteStream, ErrorKind, FileSource, StreamSource};
