use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use faf_ingest::{DistanceTable, FlowSource};
use faf_model::{FlowError, RegionSelector};
use faf_reshape::{
    ReshapeOptions, filter_regions, join_distances, pivot_years, recode_and_rescale, reshape,
};

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn endpoints_frame(pairs: &[(i64, i64)]) -> DataFrame {
    let orig: Vec<i64> = pairs.iter().map(|(orig, _)| *orig).collect();
    let dest: Vec<i64> = pairs.iter().map(|(_, dest)| *dest).collect();
    DataFrame::new(vec![
        Series::new("dms_orig".into(), orig).into(),
        Series::new("dms_dest".into(), dest).into(),
    ])
    .expect("endpoints frame")
}

/// A minimal long-form frame as it looks after the pivot and join.
fn long_frame(trade_codes: Vec<Option<i64>>, mode_codes: Vec<Option<i64>>) -> DataFrame {
    let height = trade_codes.len();
    let ids: Vec<i64> = (0..height as i64).collect();
    let columns: Vec<Column> = vec![
        Series::new("dms_orig".into(), ids.clone()).into(),
        Series::new("dms_dest".into(), ids).into(),
        Series::new("trade_type".into(), trade_codes).into(),
        Series::new("dms_mode".into(), mode_codes.clone()).into(),
        Series::new("fr_inmode".into(), vec![None::<i64>; height]).into(),
        Series::new("fr_outmode".into(), mode_codes).into(),
        Series::new("year".into(), vec![2017i32; height]).into(),
        Series::new("value".into(), vec![1.5f64; height]).into(),
        Series::new("tons".into(), vec![2.25f64; height]).into(),
    ];
    DataFrame::new(columns).expect("long frame")
}

#[test]
fn filter_keeps_internal_union_halo() {
    let selector = RegionSelector::new().with_internal([1]).with_halo([2, 3]);
    let df = endpoints_frame(&[(2, 3), (2, 2), (4, 5), (1, 9), (9, 1), (2, 9)]);

    let filtered = filter_regions(&df, &selector).expect("filter");

    let kept: Vec<(Option<i64>, Option<i64>)> = {
        let orig = filtered.column("dms_orig").expect("orig").i64().expect("i64");
        let dest = filtered.column("dms_dest").expect("dest").i64().expect("i64");
        orig.into_iter().zip(dest.into_iter()).collect()
    };
    assert_eq!(
        kept,
        vec![
            (Some(2), Some(3)),
            (Some(1), Some(9)),
            (Some(9), Some(1)),
        ]
    );
}

#[test]
fn filter_without_internal_passes_everything() {
    let df = endpoints_frame(&[(2, 2), (4, 5)]);
    let filtered = filter_regions(&df, &RegionSelector::new().with_halo([2]))
        .expect("filter");
    assert_eq!(filtered.height(), 2);
}

#[test]
fn pivot_emits_one_row_per_record_per_year() {
    let df = DataFrame::new(vec![
        Series::new("dms_orig".into(), vec![411i64, 419]).into(),
        Series::new("dms_dest".into(), vec![532i64, 531]).into(),
        Series::new("value2017".into(), vec![10.0f64, 1.0]).into(),
        Series::new("tons2017".into(), vec![3.0f64, 1.0]).into(),
        Series::new("value2022".into(), vec![12.0f64, 2.0]).into(),
        Series::new("tons2022".into(), vec![3.5f64, 2.0]).into(),
    ])
    .expect("wide frame");

    let long = pivot_years(&df).expect("pivot");

    assert_eq!(long.height(), 4);
    assert_eq!(
        long.get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        vec!["dms_orig", "dms_dest", "year", "value", "tons"]
    );
    let years = long.column("year").expect("year").i32().expect("i32");
    assert_eq!(years.get(0), Some(2017));
    assert_eq!(years.get(2), Some(2022));
    let value = long.column("value").expect("value").f64().expect("f64");
    assert_eq!(value.get(0), Some(10.0));
    assert_eq!(value.get(2), Some(12.0));
}

#[test]
fn join_aborts_on_missing_pairs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let distances = write_fixture(dir.path(), "distances.csv", "dms_orig,dms_dest,distance\n1,1,5.0\n");
    let distances = DistanceTable::from_path(&distances).expect("distances");

    let df = long_frame(vec![Some(1), Some(1)], vec![Some(1), Some(1)]);
    let err = join_distances(&df, &distances).unwrap_err();

    let FlowError::MissingDistances { pairs } = err else {
        panic!("expected missing distances, got {err}");
    };
    assert_eq!(pairs.get(&(0, 0)), Some(&1));
    assert!(!pairs.contains_key(&(1, 1)));
}

#[test]
fn recode_rescale_matches_fixed_points() {
    let df = long_frame(vec![Some(1)], vec![Some(1)]);
    let out = recode_and_rescale(&df).expect("recode");

    let trade = out.column("trade_type").expect("trade").str().expect("str");
    assert_eq!(trade.get(0), Some("Domestic"));
    let mode = out.column("dms_mode").expect("mode").str().expect("str");
    assert_eq!(mode.get(0), Some("Truck"));
    // Foreign legs of a domestic flow stay null.
    let inmode = out.column("fr_inmode").expect("inmode").str().expect("str");
    assert_eq!(inmode.get(0), None);

    // 1.5 million dollars, 2.25 thousand tons.
    let value = out.column("value").expect("value").f64().expect("f64");
    assert_eq!(value.get(0), Some(1_500_000.00));
    let tons = out.column("tons").expect("tons").f64().expect("f64");
    assert_eq!(tons.get(0), Some(2_250.0));
}

#[test]
fn recode_fails_closed_on_out_of_range_codes() {
    let df = long_frame(vec![Some(4)], vec![Some(1)]);
    let err = recode_and_rescale(&df).unwrap_err();
    let FlowError::CodeOutOfRange { column, code, limit } = err else {
        panic!("expected code range error, got {err}");
    };
    assert_eq!(column, "trade_type");
    assert_eq!(code, 4);
    assert_eq!(limit, 3);

    let df = long_frame(vec![Some(1)], vec![Some(9)]);
    assert!(matches!(
        recode_and_rescale(&df).unwrap_err(),
        FlowError::CodeOutOfRange { limit: 8, .. }
    ));

    let df = long_frame(vec![Some(0)], vec![Some(1)]);
    assert!(matches!(
        recode_and_rescale(&df).unwrap_err(),
        FlowError::CodeOutOfRange { .. }
    ));
}

#[test]
fn recode_never_remaps_labeled_data() {
    let df = long_frame(vec![Some(1)], vec![Some(2)]);
    let once = recode_and_rescale(&df).expect("first recode");
    let err = recode_and_rescale(&once).unwrap_err();
    assert!(matches!(err, FlowError::Schema(_)));
    assert!(err.to_string().contains("re-map"));
}

const SCENARIO_CSV: &str = "\
dms_orig,dms_dest,fr_orig,fr_dest,dms_mode,fr_inmode,fr_outmode,trade_type,sctg2,value2017,tons2017,value2022,tons2022
411,532,,,1,,,1,5,10.0,3.0,12.0,3.5
419,531,,,1,,,1,5,1.0,1.0,1.0,1.0
";

#[test]
fn reshape_end_to_end_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let flows = write_fixture(dir.path(), "flows.csv", SCENARIO_CSV);
    let distances = write_fixture(dir.path(), "distances.csv", "dms_orig,dms_dest,distance\n411,532,25.0\n");
    let output = dir.path().join("reshaped.csv");

    let options = ReshapeOptions::new()
        .with_distances(DistanceTable::from_path(&distances).expect("distances"))
        .with_regions(RegionSelector::new().with_internal([411, 532]))
        .with_output_path(&output);
    let table = reshape(&FlowSource::from(flows.as_path()), &options).expect("reshape");

    // One retained record, two years.
    assert_eq!(table.height(), 2);
    let years = table.column("year").expect("year").i32().expect("i32");
    assert_eq!(years.get(0), Some(2017));
    assert_eq!(years.get(1), Some(2022));
    let value = table.column("value").expect("value").f64().expect("f64");
    assert_eq!(value.get(0), Some(10_000_000.00));
    assert_eq!(value.get(1), Some(12_000_000.00));
    let tons = table.column("tons").expect("tons").f64().expect("f64");
    assert_eq!(tons.get(0), Some(3_000.0));
    assert_eq!(tons.get(1), Some(3_500.0));
    let trade = table.column("trade_type").expect("trade").str().expect("str");
    assert_eq!(trade.get(0), Some("Domestic"));
    let mode = table.column("dms_mode").expect("mode").str().expect("str");
    assert_eq!(mode.get(0), Some("Truck"));
    let distance = table.column("distance").expect("distance").f64().expect("f64");
    assert_eq!(distance.get(0), Some(25.0));
    assert_eq!(distance.get(1), Some(25.0));

    let written = std::fs::read_to_string(&output).expect("output file");
    assert!(written.lines().next().expect("header").contains("distance"));
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn reshape_missing_distance_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let flows = write_fixture(dir.path(), "flows.csv", SCENARIO_CSV);
    // No entry for the retained 411->532 pair.
    let distances = write_fixture(dir.path(), "distances.csv", "dms_orig,dms_dest,distance\n411,539,180.5\n");
    let output = dir.path().join("reshaped.csv");

    let options = ReshapeOptions::new()
        .with_distances(DistanceTable::from_path(&distances).expect("distances"))
        .with_regions(RegionSelector::new().with_internal([411, 532]))
        .with_output_path(&output);
    let err = reshape(&FlowSource::from(flows.as_path()), &options).unwrap_err();

    let FlowError::MissingDistances { pairs } = err else {
        panic!("expected missing distances, got {err}");
    };
    // Both pivoted years of the retained record miss the same pair.
    assert_eq!(pairs.get(&(411, 532)), Some(&2));
    assert!(!output.exists());
}
