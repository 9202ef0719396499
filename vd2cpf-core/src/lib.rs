#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
extern crate log;

use std::fmt::{self, Display, Formatter};

pub mod cpf;
pub mod error;
pub mod segment;
pub mod settings;
pub mod util;
pub mod vdscript;

pub use cpf::{serialize, Project};
pub use error::{Error, Result};
pub use segment::{convert, Segment};
pub use settings::{convert_str, ConversionSummary, ConvertArgs};
pub use vdscript::{parse, CutRange, RangeKind};

/// How much progress output goes to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
  Verbose,
  Normal,
  Quiet,
}

impl Display for Verbosity {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Verbose => "verbose",
      Self::Normal => "normal",
      Self::Quiet => "quiet",
    })
  }
}
