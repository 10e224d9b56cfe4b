use auction_melt::{
    collect_inputs, melt_files, AuctionMelter, MeltConfig, MeltError, Relation, TableWriter,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const WIDGET: &str = r#"{"Items":[{"ItemID":"1","Name":"Widget","Currently":"$9.99","Number_of_Bids":"0","Started":"Jan-01-14 00:00:00","Ends":"Jan-02-14 00:00:00","Seller":{"UserID":"s1","Rating":"10"}}]}"#;

const AUCTION: &str = r#"{
  "Items": [
    {
      "ItemID": "42",
      "Name": "Lot of \"vintage\" books",
      "Category": ["Books", "Toys"],
      "Currently": "$1,234.50",
      "First_Bid": "$100.00",
      "Number_of_Bids": "3",
      "Bids": [
        {"Bid": {"Bidder": {"UserID": "alice", "Location": "Boston", "Country": "USA", "Rating": "12"},
                 "Time": "Dec-01-01 10:00:00", "Amount": "$100.00"}},
        {"Bid": {"Bidder": {"UserID": "bob", "Rating": "3"},
                 "Time": "Dec-02-01 10:00:00", "Amount": "$1,000.00"}},
        {"Bid": {"Bidder": {"UserID": "alice", "Location": "Boston", "Country": "USA", "Rating": "12"},
                 "Time": "Dec-03-01 10:00:00", "Amount": "$1,234.50"}}
      ],
      "Location": "Madison, WI",
      "Country": "USA",
      "Started": "Nov-30-01 09:00:00",
      "Ends": "Dec-07-01 09:00:00",
      "Seller": {"UserID": "carol", "Rating": "250"},
      "Description": null
    }
  ]
}"#;

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let melter = AuctionMelter::new(MeltConfig::default());
    let mut parsed = Vec::new();
    let tables = melt_files(inputs, &melter, |path, _| parsed.push(path.to_path_buf())).unwrap();

    let mut writer = TableWriter::open_dir(output_dir).unwrap();
    writer.write_tables(&tables).unwrap();
    writer.flush().unwrap();
    parsed
}

fn read_table(dir: &Path, relation: Relation) -> String {
    fs::read_to_string(dir.join(relation.file_name())).unwrap()
}

#[test]
fn test_widget_document() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let input = write_input(input_dir.path(), "items-0.json", WIDGET);

    run(&[input], output_dir.path());

    assert_eq!(
        read_table(output_dir.path(), Relation::Item),
        "1|\"Widget\"|\"9.99\"|null|null|0|\"2014-01-01 00:00:00\"|\"2014-01-02 00:00:00\"|null|\"s1\"\n"
    );
    assert_eq!(read_table(output_dir.path(), Relation::Seller), "\"s1\"|null|null|10\n");
    assert_eq!(read_table(output_dir.path(), Relation::Category), "");
    assert_eq!(read_table(output_dir.path(), Relation::Bid), "");
}

#[test]
fn test_full_auction() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let input = write_input(input_dir.path(), "items-1.json", AUCTION);

    run(&[input], output_dir.path());
    let out = output_dir.path();

    assert_eq!(
        read_table(out, Relation::Item),
        "42|\"Lot of \"\"vintage\"\" books\"|\"1234.50\"|null|\"100.00\"|3|\"2001-11-30 09:00:00\"|\"2001-12-07 09:00:00\"|null|\"carol\"\n"
    );
    assert_eq!(read_table(out, Relation::Category), "42|\"Books\"\n42|\"Toys\"\n");
    assert_eq!(
        read_table(out, Relation::Seller),
        "\"carol\"|\"Madison, WI\"|\"USA\"|250\n"
    );
    assert_eq!(
        read_table(out, Relation::Bidder),
        "\"alice\"|\"Boston\"|\"USA\"|12\n\"bob\"|null|null|3\n\"alice\"|\"Boston\"|\"USA\"|12\n"
    );
    assert_eq!(
        read_table(out, Relation::Bid),
        "42|\"alice\"|\"2001-12-01 10:00:00\"|\"100.00\"\n\
         42|\"bob\"|\"2001-12-02 10:00:00\"|\"1000.00\"\n\
         42|\"alice\"|\"2001-12-03 10:00:00\"|\"1234.50\"\n"
    );
}

#[test]
fn test_repeated_runs_append() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let input = write_input(input_dir.path(), "items-0.json", WIDGET);

    run(&[input.clone()], output_dir.path());
    run(&[input], output_dir.path());

    let items = read_table(output_dir.path(), Relation::Item);
    assert_eq!(items.lines().count(), 2);
    assert_eq!(items.lines().next(), items.lines().nth(1));
}

#[test]
fn test_files_accumulate_in_order() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let first = write_input(input_dir.path(), "a.json", AUCTION);
    let second = write_input(input_dir.path(), "b.json", WIDGET);

    let parsed = run(&[first.clone(), second.clone()], output_dir.path());

    assert_eq!(parsed, vec![first, second]);
    let items = read_table(output_dir.path(), Relation::Item);
    assert!(items.starts_with("42|"));
    assert!(items.lines().nth(1).unwrap().starts_with("1|"));
}

#[test]
fn test_directory_expansion() {
    let input_dir = tempdir().unwrap();
    let b = write_input(input_dir.path(), "b.json", WIDGET);
    let a = write_input(input_dir.path(), "a.json", WIDGET);
    write_input(input_dir.path(), "readme.txt", "not json");
    write_input(input_dir.path(), "c.JSON", WIDGET);

    let inputs = collect_inputs(&[input_dir.path().to_path_buf()]).unwrap();
    assert_eq!(inputs, vec![a, b]);
}

#[test]
fn test_malformed_json_stops_run() {
    let input_dir = tempdir().unwrap();
    let good = write_input(input_dir.path(), "good.json", WIDGET);
    let bad = write_input(input_dir.path(), "bad.json", "{\"Items\": [");

    let melter = AuctionMelter::new(MeltConfig::default());
    let mut parsed = 0;
    let err = melt_files(&[good, bad.clone()], &melter, |_, _| parsed += 1).unwrap_err();

    assert_eq!(parsed, 1);
    assert!(matches!(err, MeltError::Json { ref path, .. } if *path == bad));
}

#[test]
fn test_missing_file_is_io_error() {
    let input_dir = tempdir().unwrap();
    let missing = input_dir.path().join("missing.json");

    let melter = AuctionMelter::new(MeltConfig::default());
    let err = melt_files(&[missing], &melter, |_, _| {}).unwrap_err();
    assert!(matches!(err, MeltError::Io { .. }));
}
