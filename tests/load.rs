use forecast::{load_dataset, ConvertError, LoadError, ParseRowError};

#[test]
fn loads_a_well_formed_file() {
    let dataset = load_dataset("tests/data/example_one.csv").unwrap();

    assert_eq!(dataset.records.len(), 5);
    assert_eq!(dataset.records[0].date, "2021-07-02T07:00:00+08:00");
    assert_eq!(dataset.records[0].low, 49.0);
    assert_eq!(dataset.records[0].high, 67.0);
    assert_eq!(dataset.records[4].date, "2021-07-06T07:00:00+08:00");
}

#[test]
fn loaded_dataset_feeds_the_reports() {
    let dataset = load_dataset("tests/data/example_one.csv").unwrap();

    assert!(dataset
        .overview()
        .unwrap()
        .starts_with("5 Day Overview\n  The lowest temperature will be 9.4°C"));
    assert_eq!(dataset.daily_summary().unwrap().matches("----\n").count(), 5);
}

#[test]
fn missing_file() {
    let err = load_dataset("tests/data/no_such_file.csv").unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound(_)));
}

#[test]
fn blank_lines_are_skipped() {
    let dataset = load_dataset("tests/data/blank_lines.csv").unwrap();
    assert_eq!(dataset.records.len(), 3);
    // An inverted low/high pair still loads as-is
    assert_eq!(dataset.records[0].low, 47.0);
    assert_eq!(dataset.records[0].high, 46.0);
}

#[test]
fn short_row_aborts_the_load() {
    let err = load_dataset("tests/data/short_row.csv").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Row(ParseRowError::MalformedRow(_))
    ));
}

#[test]
fn non_numeric_temperature_aborts_the_load() {
    let err = load_dataset("tests/data/bad_number.csv").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Row(ParseRowError::Convert(ConvertError::InvalidNumber(_)))
    ));
}
