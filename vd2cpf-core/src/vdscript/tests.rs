use super::*;

const SAVED_JOB: &str = r#"VirtualDub.Open(U"C:\\New folder\\test.m2v");
VirtualDub.audio.SetSource(1);
VirtualDub.video.SetMode(0);
VirtualDub.subset.Clear();
VirtualDub.subset.AddRange(0,100);
VirtualDub.subset.AddRange(150,50);
VirtualDub.video.SetRange();
VirtualDub.Close();
"#;

fn keep(start_frame: u64, end_frame: u64) -> CutRange {
  CutRange {
    start_frame,
    end_frame,
    kind: RangeKind::Keep,
  }
}

#[test]
fn parses_ranges_from_saved_job() {
  assert_eq!(parse(SAVED_JOB).unwrap(), vec![keep(0, 99), keep(150, 199)]);
}

#[test]
fn count_of_one_is_a_single_frame() {
  let ranges = parse("VirtualDub.subset.AddRange(412,1);").unwrap();

  assert_eq!(ranges, vec![keep(412, 412)]);
}

#[test]
fn masked_ranges_keep_their_kind() {
  let ranges = parse(
    "VirtualDub.subset.AddRange(0,10);\nVirtualDub.subset.AddMaskedRange(10,5);\nVirtualDub.subset.AddRange(15,5);\n",
  )
  .unwrap();

  assert_eq!(
    ranges.iter().map(|r| r.kind).collect::<Vec<_>>(),
    [RangeKind::Keep, RangeKind::Masked, RangeKind::Keep]
  );
  assert_eq!((ranges[1].start_frame, ranges[1].end_frame), (10, 14));
  assert!(!ranges[1].is_kept());
}

#[test]
fn tolerates_whitespace_crlf_and_bom() {
  let text = "\u{feff}VirtualDub.Open(\"a.avi\");\r\n  VirtualDub.subset.AddRange( 5 , 20 ) ;\r\n\tVirtualDub.subset.AddRange(30,1); // trailing\r\n";

  assert_eq!(parse(text).unwrap(), vec![keep(5, 24), keep(30, 30)]);
}

#[test]
fn script_without_subset_yields_nothing() {
  assert!(parse("VirtualDub.Open(\"a.avi\");\nVirtualDub.subset.Clear();\n")
    .unwrap()
    .is_empty());
  assert!(parse("").unwrap().is_empty());
}

#[test]
fn non_numeric_frame_is_a_parse_error() {
  let err = parse("VirtualDub.subset.AddRange(0,10);\nVirtualDub.subset.AddRange(abc,10);\n")
    .unwrap_err();

  match err {
    Error::Parse { line, .. } => assert_eq!(line, 2),
    other => panic!("unexpected error: {:?}", other),
  }
}

#[test]
fn negative_frame_is_a_parse_error() {
  assert!(matches!(
    parse("VirtualDub.subset.AddRange(-1,10);"),
    Err(Error::Parse { line: 1, .. })
  ));
}

#[test]
fn zero_count_is_a_parse_error() {
  let err = parse("VirtualDub.subset.AddRange(50,0);").unwrap_err();

  assert!(err.to_string().contains("start would exceed end"), "{}", err);
}

#[test]
fn overflowing_numbers_are_parse_errors() {
  assert!(matches!(
    parse("VirtualDub.subset.AddRange(99999999999999999999999,1);"),
    Err(Error::Parse { .. })
  ));
  assert!(matches!(
    parse("VirtualDub.subset.AddRange(18446744073709551615,2);"),
    Err(Error::Parse { .. })
  ));
}

#[test]
fn missing_terminator_is_a_parse_error() {
  assert!(matches!(
    parse("VirtualDub.subset.AddRange(0,10)"),
    Err(Error::Parse { .. })
  ));
  assert!(matches!(
    parse("VirtualDub.subset.AddRange(0);"),
    Err(Error::Parse { .. })
  ));
}

#[test]
fn similar_names_are_not_directives() {
  assert!(parse("VirtualDub.subset.AddRanges(0,10);\nVirtualDub.video.SetRange(0,10);\n")
    .unwrap()
    .is_empty());
}

#[test]
fn lone_carriage_returns_end_lines() {
  let text = "VirtualDub.subset.AddRange(1,2);\rVirtualDub.subset.AddRange(5,2);\rVirtualDub.subset.AddRange(x,2);";

  match parse(text) {
    Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
    other => panic!("unexpected result: {:?}", other),
  }
  assert_eq!(
    parse("VirtualDub.subset.AddRange(1,2);\rVirtualDub.subset.AddRange(5,2);").unwrap(),
    vec![keep(1, 2), keep(5, 6)]
  );
}

#[test]
fn crlf_line_numbers_match_the_file() {
  let err = parse("VirtualDub.subset.Clear();\r\n\r\nVirtualDub.subset.AddRange(0,0);\r\n").unwrap_err();

  assert!(matches!(err, Error::Parse { line: 3, .. }), "{:?}", err);
}
