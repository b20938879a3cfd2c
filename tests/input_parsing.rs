use std::io::Write;
use wcchart::input::{self, InputError};
use wcchart::{ChartData, ChartKind};

const BAR_CSV: &str = "lib,encode,decode\nutf8,1.5,2.0\nutf16,2.1,2.4\nutf32,4.0,3.5\n";

const SCATTER_CSV: &str = "\
english
utf8,1.0,12.5
utf16,2.0,10.1
japanese
utf8,2.9,20.3
utf16,2.0,11.7
";

#[test]
fn bar_table_header_and_rows() {
    let t = input::parse_bar_table(BAR_CSV).unwrap();
    assert_eq!(t.corner, "lib");
    assert_eq!(t.categories, vec!["utf8", "utf16", "utf32"]);
    assert_eq!(t.sets.len(), 2);
    assert_eq!(t.sets[0].name, "encode");
    assert_eq!(t.sets[0].values, vec![1.5, 2.1, 4.0]);
    assert_eq!(t.sets[1].values, vec![2.0, 2.4, 3.5]);
}

#[test]
fn bar_fields_are_trimmed() {
    let t = input::parse_bar_table("k , a , b\n x , 1 , 2 \n").unwrap();
    assert_eq!(t.corner, "k");
    assert_eq!(t.sets[1].name, "b");
    assert_eq!(t.categories, vec!["x"]);
    assert_eq!(t.sets[1].values, vec![2.0]);
}

#[test]
fn unparsable_bar_cells_become_zero() {
    let t = input::parse_bar_table("k,a,b\nx,oops,2\ny,nan,\n").unwrap();
    assert_eq!(t.sets[0].values, vec![0.0, 0.0]);
    assert_eq!(t.sets[1].values, vec![2.0, 0.0]);
}

#[test]
fn short_bar_rows_are_padded() {
    let t = input::parse_bar_table("k,a,b,c\nx,1\n").unwrap();
    assert_eq!(t.sets[0].values, vec![1.0]);
    assert_eq!(t.sets[1].values, vec![0.0]);
    assert_eq!(t.sets[2].values, vec![0.0]);
}

#[test]
fn long_bar_rows_are_rejected() {
    let err = input::parse_bar_table("k,a\nx,1\ny,1,2\n").unwrap_err();
    match err {
        InputError::TooManyValues {
            line,
            expected,
            found,
        } => {
            assert_eq!((line, expected, found), (3, 1, 2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bar_header_without_series_or_rows() {
    assert!(matches!(
        input::parse_bar_table("just-a-label\nx\n"),
        Err(InputError::NoSeries)
    ));
    assert!(matches!(
        input::parse_bar_table("k,a,b\n"),
        Err(InputError::NoRows)
    ));
}

#[test]
fn scatter_blocks_map_lines_to_series() {
    let d = input::parse_scatter(SCATTER_CSV).unwrap();
    assert_eq!(d.series.len(), 2);
    assert_eq!(d.series[0].name, "utf8");
    assert_eq!(d.series[1].name, "utf16");
    assert_eq!(d.series[0].points.len(), 2);
    let p = &d.series[0].points[1];
    assert_eq!((p.x, p.y), (2.9, 20.3));
    assert_eq!(p.label, "japanese");
}

#[test]
fn single_scatter_block_is_valid() {
    let d = input::parse_scatter("only\na,1,2\nb,3,4\n").unwrap();
    assert_eq!(d.series.len(), 2);
    assert_eq!(d.series[1].points[0].x, 3.0);
}

#[test]
fn untitled_leading_block() {
    let d = input::parse_scatter("a,1,2\nb,3,4\nnext\na,5,6\nb,7,8\n").unwrap();
    assert_eq!(d.series[0].points[0].label, "");
    assert_eq!(d.series[0].points[1].label, "next");
}

#[test]
fn scatter_extra_fields_are_ignored() {
    let d = input::parse_scatter("t\na,1,2,comment\n").unwrap();
    assert_eq!(d.series[0].points[0].y, 2.0);
}

#[test]
fn scatter_errors_are_specific() {
    assert!(matches!(
        input::parse_scatter("t\na,1\n"),
        Err(InputError::ShortPoint { line: 2 })
    ));
    assert!(matches!(
        input::parse_scatter("t\na,1,x\n"),
        Err(InputError::BadNumber { line: 2, column: 3, .. })
    ));
    assert!(matches!(
        input::parse_scatter("t1\na,1,2\nb,1,2\nt2\na,1,2\n"),
        Err(InputError::BlockSize {
            expected: 2,
            found: 1,
            ..
        })
    ));
    assert!(matches!(
        input::parse_scatter("t1\nt2\n"),
        Err(InputError::NoRows)
    ));
    match input::parse_scatter("t1\nt2\na,1,2\nb,3,4\n") {
        Err(InputError::BlockSize {
            title,
            line,
            expected,
            found,
        }) => {
            assert_eq!(title, "t1");
            assert_eq!((line, expected, found), (1, 2, 0));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn parse_dispatches_on_kind() {
    assert!(matches!(
        input::parse(BAR_CSV, ChartKind::HorizontalBar).unwrap(),
        ChartData::Bar(_)
    ));
    assert!(matches!(
        input::parse(SCATTER_CSV, ChartKind::Scatter).unwrap(),
        ChartData::Scatter(_)
    ));
}

#[test]
fn read_input_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(BAR_CSV.as_bytes()).unwrap();
    let text = input::read_input(Some(f.path())).unwrap();
    assert_eq!(text, BAR_CSV);
}

#[test]
fn read_input_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let err = input::read_input(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}
