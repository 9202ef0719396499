use crate::vdscript::CutRange;

/// A kept frame range as Cuttermaran sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
  /// 1-based position among the kept ranges.
  pub index: usize,
  pub start_frame: u64,
  pub end_frame: u64,
  pub label: String,
}

impl Segment {
  pub fn new(index: usize, range: &CutRange) -> Self {
    Self {
      index,
      start_frame: range.start_frame,
      end_frame: range.end_frame,
      label: format!("Segment {}", index),
    }
  }
}

/// Numbers the kept ranges in source order. Masked ranges are dropped and do
/// not consume an index.
pub fn convert(ranges: &[CutRange]) -> Vec<Segment> {
  ranges
    .iter()
    .filter(|range| range.is_kept())
    .enumerate()
    .map(|(i, range)| Segment::new(i + 1, range))
    .collect()
}
