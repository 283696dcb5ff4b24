use super::fetch::{split_paths, Transport};
use super::layout::{COLUMN_COUNT, LABEL_5CLASS_COLUMN};
use super::*;
use crate::error::ErrorKind;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Build one raw row with the given categorical values and label
fn row(protocol: &str, service: &str, flag: &str, label: &str, duration: u32) -> String {
    let numeric_tail = vec!["0"; 37].join(",");
    format!(
        "{},{},{},{},{},{},7",
        duration, protocol, service, flag, numeric_tail, label
    )
}

fn write_split(path: &Path, rows: &[String]) {
    fs::write(path, rows.join("\n") + "\n").unwrap();
}

fn no_download() -> LoadOptions {
    LoadOptions {
        download_if_missing: false,
        ..LoadOptions::default()
    }
}

/// Panics if the loader tries to download
struct NoNetwork;

impl Transport for NoNetwork {
    fn fetch(&self, url: &str) -> DatasetResult<Vec<u8>> {
        panic!("unexpected download of {}", url);
    }
}

/// Serves a fixed synthetic split for every URL
struct FakeMirror {
    body: String,
    calls: Cell<usize>,
}

impl Transport for FakeMirror {
    fn fetch(&self, _url: &str) -> DatasetResult<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.body.clone().into_bytes())
    }
}

fn fixture() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let (train, test) = split_paths(dir.path());
    write_split(
        &train,
        &[
            row("tcp", "http", "SF", "normal", 0),
            row("udp", "private", "SF", "neptune", 1),
            row("tcp", "ftp", "REJ", "satan", 2),
        ],
    );
    write_split(
        &test,
        &[
            row("icmp", "ecr_i", "SF", "smurf", 10),
            row("tcp", "http", "S0", "mailbomb", 11),
        ],
    );
    dir
}

#[test]
fn test_row_helper_has_full_layout() {
    assert_eq!(row("tcp", "http", "SF", "normal", 0).split(',').count(), COLUMN_COUNT);
}

#[test]
fn test_drop_difficulty_column_counts() {
    let dir = fixture();

    let dropped = load_dataset_with(Split::Train, dir.path(), &no_download(), &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(dropped.n_cols(), COLUMN_COUNT - 1);
    assert!(!dropped.has_column("difficulty"));

    let options = LoadOptions { drop_difficulty: false, ..no_download() };
    let kept = load_dataset_with(Split::Train, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(kept.n_cols(), COLUMN_COUNT);
    assert_eq!(kept.numeric("difficulty").unwrap(), &[7.0, 7.0, 7.0]);

    let options = LoadOptions { map_to_5class: true, ..no_download() };
    let mapped = load_dataset_with(Split::Train, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(mapped.n_cols(), COLUMN_COUNT);
    assert_eq!(mapped.column_names().last(), Some(&LABEL_5CLASS_COLUMN));
}

#[test]
fn test_normal_and_neptune_map_to_classes() {
    let dir = tempdir().unwrap();
    let (train, _) = split_paths(dir.path());
    write_split(
        &train,
        &[
            row("tcp", "http", "SF", "normal", 0),
            row("tcp", "private", "S0", "neptune", 0),
        ],
    );

    let options = LoadOptions { map_to_5class: true, ..no_download() };
    let table = load_dataset_with(Split::Train, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();

    assert_eq!(table.categorical(LABEL_5CLASS_COLUMN).unwrap(), &["Normal", "DoS"]);
    assert_eq!(table.categorical("label").unwrap(), &["normal", "neptune"]);
}

#[test]
fn test_unmapped_label_is_unknown() {
    let dir = fixture();
    let options = LoadOptions { map_to_5class: true, ..no_download() };
    let test = load_dataset_with(Split::Test, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(test.categorical(LABEL_5CLASS_COLUMN).unwrap(), &["DoS", "Unknown"]);
}

#[test]
fn test_one_hot_single_split_uses_observed_values_only() {
    let dir = tempdir().unwrap();
    let (_, test) = split_paths(dir.path());
    write_split(
        &test,
        &[
            row("udp", "domain_u", "SF", "normal", 0),
            row("tcp", "http", "SF", "normal", 0),
            row("tcp", "http", "SF", "normal", 0),
        ],
    );

    let options = LoadOptions { one_hot: true, ..no_download() };
    let table = load_dataset_with(Split::Test, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_single()
        .unwrap();

    let protocol_columns: Vec<_> = table
        .column_names()
        .into_iter()
        .filter(|n| n.starts_with("protocol_type_"))
        .collect();
    assert_eq!(protocol_columns, vec!["protocol_type_tcp", "protocol_type_udp"]);
    assert!(!table.has_column("protocol_type"));
    assert_eq!(table.indicator("protocol_type_udp").unwrap(), &[true, false, false]);
}

#[test]
fn test_both_one_hot_shares_columns_and_preserves_rows() {
    let dir = fixture();

    let (plain_train, plain_test) =
        load_dataset_with(Split::Both, dir.path(), &no_download(), &NoNetwork)
            .unwrap()
            .into_pair()
            .unwrap();

    let options = LoadOptions { one_hot: true, map_to_5class: true, ..no_download() };
    let (train, test) = load_dataset_with(Split::Both, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_pair()
        .unwrap();

    assert_eq!(train.column_names(), test.column_names());
    assert_eq!(train.schema_hash(), test.schema_hash());
    assert_eq!(train.n_rows(), plain_train.n_rows());
    assert_eq!(test.n_rows(), plain_test.n_rows());

    // icmp only appears in test, REJ only in train
    assert_eq!(train.indicator("protocol_type_icmp").unwrap(), &[false, false, false]);
    assert_eq!(test.indicator("flag_REJ").unwrap(), &[false, false]);

    // order within each split is file order
    assert_eq!(train.numeric("duration").unwrap(), &[0.0, 1.0, 2.0]);
    assert_eq!(test.numeric("duration").unwrap(), &[10.0, 11.0]);
    assert_eq!(test.categorical("label").unwrap(), &["smurf", "mailbomb"]);
}

#[test]
fn test_both_without_one_hot_keeps_categoricals() {
    let dir = fixture();
    let loaded = load_dataset_with(Split::Both, dir.path(), &no_download(), &NoNetwork).unwrap();
    let (train, test) = loaded.into_pair().unwrap();
    assert_eq!(train.categories("protocol_type"), Some(vec!["tcp", "udp"]));
    assert_eq!(test.categories("protocol_type"), Some(vec!["icmp", "tcp"]));
}

#[test]
fn test_missing_test_file_without_download() {
    let dir = tempdir().unwrap();
    let (train, test_path) = split_paths(dir.path());
    // Malformed train file: it must never be parsed
    fs::write(&train, "garbage\n").unwrap();

    let err = load_dataset_with(Split::Test, dir.path(), &no_download(), &NoNetwork).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    match err {
        DatasetError::NotFound(path) => assert_eq!(path.file_name(), test_path.file_name()),
        other => panic!("expected not found, got {:?}", other),
    }

    let err = load_dataset_with(Split::Both, dir.path(), &no_download(), &NoNetwork).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound(_)));
}

#[test]
fn test_download_if_missing_fetches_then_loads() {
    let dir = tempdir().unwrap();
    let mirror = FakeMirror {
        body: row("tcp", "http", "SF", "normal", 5) + "\n",
        calls: Cell::new(0),
    };

    let (train, test) = load_dataset_with(Split::Both, dir.path(), &LoadOptions::default(), &mirror)
        .unwrap()
        .into_pair()
        .unwrap();
    assert_eq!(mirror.calls.get(), 2);
    assert_eq!(train.n_rows(), 1);
    assert_eq!(test.n_rows(), 1);

    // Files now exist: no further transfers
    load_dataset_with(Split::Train, dir.path(), &LoadOptions::default(), &mirror).unwrap();
    assert_eq!(mirror.calls.get(), 2);
}

#[test]
fn test_wrong_field_count_is_parse_error() {
    let dir = fixture();
    let (train, _) = split_paths(dir.path());
    fs::write(&train, "0,tcp,http,SF,normal\n").unwrap();

    let err = load_dataset_with(Split::Train, dir.path(), &no_download(), &NoNetwork).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(matches!(err, DatasetError::Parse { line: 1, .. }));
}

#[test]
fn test_split_parsing() {
    assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
    assert_eq!("BOTH".parse::<Split>().unwrap(), Split::Both);
    assert!(matches!("all".parse::<Split>(), Err(DatasetError::UnknownSplit(_))));
}

#[test]
fn test_loaded_shape_accessors() {
    let single = Loaded::Single(Table::new());
    assert!(single.clone().into_pair().is_err());
    assert!(single.into_single().is_ok());
}

#[test]
fn test_prepare_after_joint_load_with_test_only_class() {
    let dir = fixture();
    let options = LoadOptions { one_hot: true, map_to_5class: true, ..no_download() };
    let (train, test) = load_dataset_with(Split::Both, dir.path(), &options, &NoNetwork)
        .unwrap()
        .into_pair()
        .unwrap();

    // "mailbomb" maps to Unknown and appears only in the test split
    let prepared = prepare::prepare(&train, &test).unwrap();
    assert!(prepared.encoder.classes().iter().any(|c| c == "Unknown"));
    assert_eq!(prepared.x_train.ncols(), prepared.x_test.ncols());
    assert_eq!(prepared.y_test.len(), 2);
    assert_eq!(prepared.y_train_one_hot.ncols(), prepared.encoder.classes().len());
}
