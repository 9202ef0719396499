//! Parsing of the subset directives in VirtualDub / VirtualDub2 job scripts.
//!
//! A saved `.vdscript` is a list of JScript-like statements. Only the frame
//! subset matters here:
//!
//! ```text
//! VirtualDub.subset.Clear();
//! VirtualDub.subset.AddRange(0,100);
//! VirtualDub.subset.AddMaskedRange(100,50);
//! VirtualDub.subset.AddRange(150,50);
//! ```
//!
//! The second argument is a frame *count*, not an end frame.

use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, space0};
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::IResult;

use crate::error::{Error, Result};

const KEEP_DIRECTIVE: &str = "VirtualDub.subset.AddRange";
const MASK_DIRECTIVE: &str = "VirtualDub.subset.AddMaskedRange";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
  /// Frames that end up in the output.
  Keep,
  /// Frames VirtualDub marks as excluded.
  Masked,
}

/// One subset directive, with both frame positions inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CutRange {
  pub start_frame: u64,
  pub end_frame: u64,
  pub kind: RangeKind,
}

impl CutRange {
  pub fn is_kept(&self) -> bool {
    self.kind == RangeKind::Keep
  }
}

/// Extracts every subset range from the text of a `.vdscript`, in file order.
///
/// Lines that are not subset directives are skipped. A directive whose
/// arguments are not two non-negative integers, or whose count is zero,
/// fails the whole parse.
pub fn parse(text: &str) -> Result<Vec<CutRange>> {
  let text = text.strip_prefix('\u{feff}').unwrap_or(text);
  let mut ranges = Vec::new();

  for (idx, line) in script_lines(text).enumerate() {
    let Some((kind, args)) = directive(line.trim_start()) else {
      continue;
    };

    let range = parse_range(args, kind).map_err(|reason| Error::parse(idx + 1, reason))?;
    debug!(
      "line {}: {:?} frames {}-{}",
      idx + 1,
      range.kind,
      range.start_frame,
      range.end_frame
    );
    ranges.push(range);
  }

  Ok(ranges)
}

// `\n`, `\r\n` and a lone `\r` all end a line
fn script_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
  text
    .split('\n')
    .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Splits a line into its directive kind and everything after the opening parenthesis.
fn directive(line: &str) -> Option<(RangeKind, &str)> {
  [
    (KEEP_DIRECTIVE, RangeKind::Keep),
    (MASK_DIRECTIVE, RangeKind::Masked),
  ]
  .into_iter()
  .find_map(|(name, kind)| {
    preceded(
      tag::<_, _, nom::error::Error<&str>>(name),
      preceded(space0, char('(')),
    )(line)
    .ok()
    .map(|(args, _)| (kind, args))
  })
}

// `<start>,<count>);`, anything after the semicolon is ignored
fn range_arguments(input: &str) -> IResult<&str, (&str, &str)> {
  terminated(
    separated_pair(
      delimited(space0, digit1, space0),
      char(','),
      delimited(space0, digit1, space0),
    ),
    pair(char(')'), preceded(space0, char(';'))),
  )(input)
}

fn parse_range(args: &str, kind: RangeKind) -> Result<CutRange, String> {
  let (_, (start, count)) = range_arguments(args).map_err(|_| {
    format!(
      "expected `<start>,<count>);` but found {:?}",
      args.trim_end()
    )
  })?;

  let start_frame: u64 = start
    .parse()
    .map_err(|e| format!("invalid start frame {:?}: {}", start, e))?;
  let count: u64 = count
    .parse()
    .map_err(|e| format!("invalid frame count {:?}: {}", count, e))?;

  if count == 0 {
    return Err(format!(
      "empty range at frame {}, start would exceed end",
      start_frame
    ));
  }

  let end_frame = start_frame
    .checked_add(count - 1)
    .ok_or_else(|| format!("range {}+{} overflows the frame counter", start_frame, count))?;

  Ok(CutRange {
    start_frame,
    end_frame,
    kind,
  })
}

#[cfg(test)]
mod tests;
