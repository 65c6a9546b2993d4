use std::io;

use thiserror::Error;

/// Errors produced by the codec pipeline.
///
/// Precondition violations (e.g. a bitfield width greater than 64, or
/// `lsb + width` overflowing the word) are programmer errors and are not
/// represented here — those paths `assert!`/`panic!` instead, matching the
/// policy in spec.md §7.
#[derive(Error, Debug)]
pub enum CodecError {
  #[error("bitpack overflow: value does not fit in {width}-bit field")]
  BitpackOverflow { width: u32 },

  #[error("malformed PPM header: {0}")]
  MalformedPpm(String),

  #[error("malformed compressed-stream header: {0}")]
  MalformedHeader(String),

  #[error("unexpected end of stream while reading {0}")]
  UnexpectedEof(&'static str),

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
