use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::cpf::Project;
use crate::error::{Error, Result};
use crate::segment::convert;
use crate::vdscript::{self, CutRange};
use crate::Verbosity;

/// Everything needed for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertArgs {
  pub input:  PathBuf,
  pub output: PathBuf,

  // written into the project as-is, never opened
  pub video:       String,
  pub audio:       String,
  pub audio_delay: i64,

  pub overwrite: bool,

  pub verbosity: Verbosity,
  pub log_file:  Option<PathBuf>,
  pub log_level: LevelFilter,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
  pub output:   PathBuf,
  pub segments: usize,
  pub masked:   usize,
}

impl ConvertArgs {
  /// Checks that can be made before touching any file.
  pub fn validate(&self) -> Result<()> {
    if self.video.is_empty() {
      return Err(Error::MissingPath("video"));
    }
    if self.audio.is_empty() {
      return Err(Error::MissingPath("audio"));
    }
    if !self.input.is_file() {
      let kind = if self.input.exists() {
        io::ErrorKind::InvalidInput
      } else {
        io::ErrorKind::NotFound
      };
      return Err(Error::io(
        &self.input,
        io::Error::new(kind, "input script is not a file"),
      ));
    }
    if self.output.exists() {
      if same_file(&self.input, &self.output) {
        return Err(Error::OutputIsInput(self.output.clone()));
      }
      if !self.overwrite {
        return Err(Error::OutputExists(self.output.clone()));
      }
    }

    let parent = match self.output.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    if !parent.is_dir() {
      return Err(Error::io(
        parent,
        io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
      ));
    }

    Ok(())
  }

  /// Reads the script, converts it and writes the project file.
  ///
  /// Nothing is written unless every step before the write succeeded.
  pub fn convert_file(&self) -> Result<ConversionSummary> {
    self.validate()?;

    let bytes = fs::read(&self.input).map_err(|e| Error::io(&self.input, e))?;
    // paths inside VirtualDub.Open() may be in the ANSI codepage, the
    // subset directives are always ASCII
    let text = String::from_utf8_lossy(&bytes);

    let ranges = vdscript::parse(&text)?;
    let masked = ranges.iter().filter(|range| !range.is_kept()).count();
    let cpf = self.render(&ranges)?;
    let segments = ranges.len() - masked;

    if segments == 0 {
      warn!(
        "{:?} does not keep any frames, the project will have no segments",
        self.input
      );
    }

    write_output(&self.output, &cpf, self.overwrite)?;
    info!(
      "wrote {} segment(s) to {:?} ({} masked range(s) skipped)",
      segments, self.output, masked
    );

    Ok(ConversionSummary {
      output: self.output.clone(),
      segments,
      masked,
    })
  }

  fn render(&self, ranges: &[CutRange]) -> Result<String> {
    Project::new(&self.video, &self.audio, convert(ranges))
      .with_audio_delay(self.audio_delay)
      .serialize()
  }
}

/// Runs the whole pipeline on in-memory script text.
pub fn convert_str(text: &str, video: &str, audio: &str, audio_delay: i64) -> Result<String> {
  let ranges = vdscript::parse(text)?;
  Project::new(video, audio, convert(&ranges))
    .with_audio_delay(audio_delay)
    .serialize()
}

fn same_file(a: &Path, b: &Path) -> bool {
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}

fn write_output(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
  let mut file = if overwrite {
    OpenOptions::new()
      .write(true)
      .create(true)
      .truncate(true)
      .open(path)
  } else {
    OpenOptions::new().write(true).create_new(true).open(path)
  }
  .map_err(|e| match e.kind() {
    io::ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
    _ => Error::io(path, e),
  })?;

  if let Err(e) = file.write_all(contents.as_bytes()).and_then(|_| file.flush()) {
    drop(file);
    if let Err(remove) = fs::remove_file(path) {
      error!("Failed to remove incomplete file {:?}: {}", path, remove);
    }
    return Err(Error::io(path, e));
  }

  Ok(())
}
