//! This module contains the error type shared by every stage of a conversion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can stop a `.vdscript` to `.cpf` conversion.
///
/// None of these are recovered from internally: a conversion either produces
/// one complete project file or nothing at all.
#[derive(Error, Debug)]
pub enum Error {
  /// A subset directive was recognized but its arguments could not be used.
  #[error("line {line}: {reason}")]
  Parse { line: usize, reason: String },
  /// A required path for the project file was empty.
  #[error("{0} path must not be empty")]
  MissingPath(&'static str),
  /// The output file is already there and overwriting was not requested.
  #[error("output file {0:?} already exists")]
  OutputExists(PathBuf),
  /// The output would replace the script being read.
  #[error("output file {0:?} is the input script")]
  OutputIsInput(PathBuf),
  /// Reading the script or writing the project failed.
  #[error("{path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl Error {
  pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
    Self::Parse {
      line,
      reason: reason.into(),
    }
  }

  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
