use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::reference::{resolve_reference, InMemoryReference};

fn reference() -> ReferenceData {
    let store = InMemoryReference::new()
        .with_species("ITS1", "Phytophthora infestans")
        .with_species("ITS1", "Phytophthora ramorum")
        .with_species("ITS1", "Phytophthora andina")
        .with_synonym("Phytophthora ramorum EU1", "Phytophthora ramorum");
    resolve_reference(&store, None).unwrap()
}

fn options(reference: &ReferenceData) -> LoadOptions<'_> {
    LoadOptions { reference, marker: None, min_abundance: 0 }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

const TALLY: &str = "#Sequencing sample\t-\t-\tS1\tS2\tS3\t-\n\
#Marker\tMD5\tabundance\tS1\tS2\tS3\tgenus-species\n\
ITS1\taaa\t120\t100\t20\t0\tPhytophthora infestans\n\
ITS1\tbbb\t15\t5\t0\t0\tPhytophthora ramorum EU1;Phytophthora\n\
ITS1\tccc\t9\t0\t9\t0\t\n";

#[test]
fn test_tally_registers_zero_count_samples() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "run.onebp.tsv", TALLY);
    let reference = reference();

    let parsed = parse_file(&path, ".onebp.tsv", options(&reference)).unwrap();
    let ParsedFile::Tally(samples) = parsed else {
        panic!("expected tally shape");
    };

    assert_eq!(samples.len(), 3);
    assert!(samples["S3"].is_empty());
    assert_eq!(
        samples["S1"].iter().collect::<Vec<_>>(),
        ["Phytophthora infestans", "Phytophthora ramorum"]
    );
    assert_eq!(samples["S2"].iter().collect::<Vec<_>>(), ["Phytophthora infestans"]);
}

#[test]
fn test_tally_min_abundance() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "run.onebp.tsv", TALLY);
    let reference = reference();
    let opts = LoadOptions { min_abundance: 10, ..options(&reference) };

    let TallyParse::Parsed(samples) = parse_tally_file(&path, opts).unwrap() else {
        panic!("expected tally");
    };
    assert_eq!(samples["S1"].iter().collect::<Vec<_>>(), ["Phytophthora infestans"]);
    assert_eq!(samples["S2"].iter().collect::<Vec<_>>(), ["Phytophthora infestans"]);
}

#[test]
fn test_tally_marker_filter() {
    let dir = TempDir::new().unwrap();
    let content = "#Marker\tMD5\tabundance\tS1\tgenus-species\n\
ITS1\taaa\t1\t1\tPhytophthora infestans\n\
COI\tbbb\t1\t1\tPhytophthora andina\n";
    let path = write(&dir, "run.m.tsv", content);
    let reference = reference();

    let opts = LoadOptions { marker: Some("COI"), ..options(&reference) };
    let TallyParse::Parsed(samples) = parse_tally_file(&path, opts).unwrap() else {
        panic!("expected tally");
    };
    assert_eq!(samples["S1"].iter().collect::<Vec<_>>(), ["Phytophthora andina"]);

    let opts = LoadOptions { marker: Some("16S"), ..options(&reference) };
    let err = parse_tally_file(&path, opts).unwrap_err();
    assert!(matches!(err, AssessError::MarkerNotFound { marker, .. } if marker == "16S"));
}

#[test]
fn test_tally_without_annotation_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "x.m.tsv", "#Marker\tMD5\tabundance\tS1\tSequence\nITS1\ta\t1\t1\tACGT\n");
    let reference = reference();
    let err = parse_tally_file(&path, options(&reference)).unwrap_err();
    assert!(matches!(err, AssessError::MissingAnnotation { .. }));
}

#[test]
fn test_tally_wrong_field_count_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "x.m.tsv", "#Marker\tMD5\tabundance\tS1\tgenus-species\nITS1\ta\t1\n");
    let reference = reference();
    let err = parse_tally_file(&path, options(&reference)).unwrap_err();
    assert!(matches!(err, AssessError::MalformedTsv { line: 2, .. }));
}

#[test]
fn test_tally_bad_count_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "x.m.tsv", "#Marker\tMD5\tabundance\tS1\tgenus-species\nITS1\ta\t1\tmany\t\n");
    let reference = reference();
    let err = parse_tally_file(&path, options(&reference)).unwrap_err();
    assert!(matches!(err, AssessError::MalformedTsv { .. }));
}

#[test]
fn test_missing_header_falls_back_to_legacy() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "Sample7.onebp.tsv",
        "#sequence-name\ttaxid\tgenus-species\tnote\n\
aaa_50\t4787\tPhytophthora infestans\t\n\
bbb_3\t0\tPhytophthora andina;Phytophthora\tambiguous\n",
    );
    let reference = reference();

    assert_eq!(parse_tally_file(&path, options(&reference)).unwrap(), TallyParse::MissingHeader);

    let parsed = parse_file(&path, ".onebp.tsv", options(&reference)).unwrap();
    let ParsedFile::Legacy(samples) = parsed else {
        panic!("expected legacy shape");
    };
    assert_eq!(
        samples["Sample7"].iter().collect::<Vec<_>>(),
        ["Phytophthora andina", "Phytophthora infestans"]
    );
}

#[test]
fn test_legacy_min_abundance_needs_underscore_names() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "S.m.tsv", "aaa_50\t1\tPhytophthora infestans\nbbb_3\t1\tPhytophthora andina\n");
    let reference = reference();

    let opts = LoadOptions { min_abundance: 10, ..options(&reference) };
    let records = read_legacy_records(&path, opts).unwrap();
    assert_eq!(records.sequences.len(), 1);
    assert_eq!(records.sample_labels().iter().collect::<Vec<_>>(), ["Phytophthora infestans"]);

    let bad = write(&dir, "T.m.tsv", "aaa\t1\tPhytophthora infestans\n");
    let err = read_legacy_records(&bad, opts).unwrap_err();
    assert!(matches!(err, AssessError::MalformedRecord { name, .. } if name == "aaa"));

    // no threshold, no abundance needed
    assert_eq!(read_legacy_records(&bad, options(&reference)).unwrap().sequences.len(), 1);
}

#[test]
fn test_legacy_wildcard_control() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Control1.known.tsv", "*\t4787\tPhytophthora infestans\n");
    let reference = reference();

    let records = read_legacy_records(&path, options(&reference)).unwrap();
    assert!(records.sequences.is_empty());
    let wildcard = records.wildcard.unwrap();
    assert_eq!(wildcard.iter().collect::<Vec<_>>(), ["Phytophthora infestans"]);
}

#[test]
fn test_legacy_wildcard_genus_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Control1.known.tsv", "*\t4783\tPhytophthora\n");
    let reference = reference();
    let err = read_legacy_records(&path, options(&reference)).unwrap_err();
    assert!(matches!(err, AssessError::MalformedLabel { label, .. } if label == "Phytophthora"));
}

#[test]
fn test_legacy_field_count() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "S.m.tsv", "aaa_1\tPhytophthora infestans\n");
    let reference = reference();
    let err = read_legacy_records(&path, options(&reference)).unwrap_err();
    assert!(matches!(err, AssessError::MalformedTsv { line: 1, .. }));
}

#[test]
fn test_empty_file_is_empty_legacy_sample() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Blank.m.tsv", "");
    let reference = reference();
    let samples = parse_file(&path, ".m.tsv", options(&reference)).unwrap().into_samples();
    assert!(samples["Blank"].is_empty());
}

#[test]
fn test_find_requested_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.onebp.tsv", "");
    write(&dir, "nested/b.onebp.tsv", "");
    write(&dir, "nested/Undetermined.onebp.tsv", "");
    write(&dir, "a.known.tsv", "");
    let explicit = write(&dir, "elsewhere/c.onebp.tsv", "");

    let inputs = vec![dir.path().join("nested"), dir.path().join("a.onebp.tsv"), explicit.clone()];
    let files = find_requested_files(&inputs, ".onebp.tsv", &["Undetermined".to_string()]).unwrap();

    let names: Vec<String> = files.iter().map(|p| sample_name(p, ".onebp.tsv")).collect();
    assert_eq!(files.len(), 3);
    assert!(names.contains(&"a".to_string()));
    assert!(names.contains(&"b".to_string()));
    assert!(names.contains(&"c".to_string()));

    let err = find_requested_files(&inputs, ".blast.tsv", &[]).unwrap_err();
    assert!(matches!(err, AssessError::NoInputFiles { .. }));

    let err = find_requested_files(&[dir.path().join("missing")], ".onebp.tsv", &[]).unwrap_err();
    assert!(matches!(err, AssessError::InputNotFound { .. }));
}

#[test]
fn test_find_requested_files_same_file_two_spellings() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.onebp.tsv", "");
    write(&dir, "nested/b.onebp.tsv", "");

    let inputs = vec![
        dir.path().to_path_buf(),
        dir.path().join("nested").join(".."),
        dir.path().join("nested").join("..").join("a.onebp.tsv"),
        a,
    ];
    let files = find_requested_files(&inputs, ".onebp.tsv", &[]).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| p.is_absolute()));
}

#[test]
fn test_merge_is_order_independent() {
    let dir = TempDir::new().unwrap();
    let first = write(
        &dir,
        "one.m.tsv",
        "#Marker\tMD5\tabundance\tS1\tS2\tgenus-species\nITS1\ta\t2\t1\t1\tPhytophthora infestans\n",
    );
    let second = write(
        &dir,
        "two.m.tsv",
        "#Marker\tMD5\tabundance\tS1\tS3\tgenus-species\nITS1\tb\t2\t1\t1\tPhytophthora andina\n",
    );
    let reference = reference();

    let forward = load_sample_labels(&[first.clone(), second.clone()], ".m.tsv", options(&reference)).unwrap();
    let backward = load_sample_labels(&[second, first], ".m.tsv", options(&reference)).unwrap();

    assert_eq!(forward, backward);
    assert_eq!(
        forward["S1"].iter().collect::<Vec<_>>(),
        ["Phytophthora andina", "Phytophthora infestans"]
    );
    assert_eq!(forward.len(), 3);
}
