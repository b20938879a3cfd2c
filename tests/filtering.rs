use wcchart::filter::{self, FilterError};
use wcchart::{ChartData, ChartKind, input};

fn bar() -> ChartData {
    input::parse(
        "lib,encode,decode,validate\nutf8,1,2,3\nutf16,4,5,6\nutf32,7,8,9\n",
        ChartKind::Bar,
    )
    .unwrap()
}

#[test]
fn series_filter_keeps_input_order() {
    let mut d = bar();
    filter::retain_series(&mut d, &["validate".to_string(), "encode".to_string()]).unwrap();
    assert_eq!(d.series_names(), vec!["encode", "validate"]);
}

#[test]
fn empty_filter_is_a_no_op() {
    let mut d = bar();
    filter::apply(&mut d, &[], &[]).unwrap();
    assert_eq!(d, bar());
}

#[test]
fn category_filter_drops_matching_values() {
    let mut d = bar();
    filter::apply(&mut d, &[], &filter::parse_list("utf32;utf8")).unwrap();
    let ChartData::Bar(t) = d else {
        panic!("expected bar data")
    };
    assert_eq!(t.categories, vec!["utf8", "utf32"]);
    assert_eq!(t.sets[1].values, vec![2.0, 8.0]);
}

#[test]
fn filtering_everything_is_an_error() {
    let mut d = bar();
    let err = filter::retain_series(&mut d, &["missing".to_string()]).unwrap_err();
    assert!(matches!(err, FilterError::NothingLeft { what: "series", .. }));

    let mut d = bar();
    let err = filter::apply(&mut d, &[], &["missing".to_string()]).unwrap_err();
    assert!(matches!(err, FilterError::NothingLeft { what: "categories", .. }));
}

#[test]
fn scatter_series_filter_and_category_rejection() {
    let mut d = input::parse("t\na,1,2\nb,3,4\n", ChartKind::Scatter).unwrap();
    filter::retain_series(&mut d, &["b".to_string()]).unwrap();
    assert_eq!(d.series_names(), vec!["b"]);

    let err = filter::apply(&mut d, &[], &["t".to_string()]).unwrap_err();
    assert_eq!(err, FilterError::NotBarData);
}
