//! Cuttermaran project (`.cpf`) output.
//!
//! Cuttermaran 1.70 stores its state as a small XML document. The layout
//! written here mirrors what Cuttermaran saves itself so that the result
//! loads without complaint: one video file with id 0, one audio file with
//! id 1, then one `CutElements` per kept segment.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};
use crate::segment::Segment;

pub const STATE_DATA_NAMESPACE: &str = "http://cuttermaran.kickme.to/StateData.xsd";

const VIDEO_FILE_ID: u32 = 0;
const AUDIO_FILE_ID: u32 = 1;

/// A complete Cuttermaran project, borrowing its file references from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project<'a> {
  pub video_path: &'a str,
  pub audio_path: &'a str,
  /// Audio start delay in milliseconds.
  pub audio_delay: i64,
  pub segments: Vec<Segment>,
}

impl<'a> Project<'a> {
  pub fn new(video_path: &'a str, audio_path: &'a str, segments: Vec<Segment>) -> Self {
    Self {
      video_path,
      audio_path,
      audio_delay: 0,
      segments,
    }
  }

  #[must_use]
  pub fn with_audio_delay(mut self, audio_delay: i64) -> Self {
    self.audio_delay = audio_delay;
    self
  }

  /// Renders the project, refusing to reference an empty video or audio path.
  pub fn serialize(&self) -> Result<String> {
    if self.video_path.is_empty() {
      return Err(Error::MissingPath("video"));
    }
    if self.audio_path.is_empty() {
      return Err(Error::MissingPath("audio"));
    }

    Ok(self.to_string())
  }
}

impl Display for Project<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, r#"<?xml version="1.0" standalone="yes"?>"#)?;
    writeln!(f, r#"<StateData xmlns="{}">"#, STATE_DATA_NAMESPACE)?;
    writeln!(
      f,
      r#"  <usedVideoFiles FileID="{}" FileName="{}" />"#,
      VIDEO_FILE_ID,
      escape_attr(self.video_path)
    )?;
    writeln!(
      f,
      r#"  <usedAudioFiles FileID="{}" FileName="{}" StartDelay="{}" />"#,
      AUDIO_FILE_ID,
      escape_attr(self.audio_path),
      self.audio_delay
    )?;

    for segment in &self.segments {
      writeln!(f, "  <!-- {} -->", segment.label)?;
      writeln!(
        f,
        r#"  <CutElements refVideoFile="{}" StartPosition="{}" EndPosition="{}">"#,
        VIDEO_FILE_ID, segment.start_frame, segment.end_frame
      )?;
      writeln!(f, r#"    <cutAudioFiles refAudioFile="{}" />"#, AUDIO_FILE_ID)?;
      writeln!(f, "  </CutElements>")?;
    }

    writeln!(f, r#"  <CurrentFiles refVideoFiles="{}">"#, VIDEO_FILE_ID)?;
    writeln!(f, r#"    <currentAudioFiles refAudioFiles="{}" />"#, AUDIO_FILE_ID)?;
    writeln!(f, "  </CurrentFiles>")?;
    writeln!(f, "</StateData>")
  }
}

/// Renders `segments` as a project referencing `video_path` and `audio_path`
/// with no audio delay.
pub fn serialize(segments: &[Segment], video_path: &str, audio_path: &str) -> Result<String> {
  Project::new(video_path, audio_path, segments.to_vec()).serialize()
}

fn escape_attr(value: &str) -> Cow<'_, str> {
  if !value.contains(['&', '<', '>', '"']) {
    return Cow::Borrowed(value);
  }

  let mut escaped = String::with_capacity(value.len() + 8);
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      c => escaped.push(c),
    }
  }
  Cow::Owned(escaped)
}
