//! Tests for writing a full artifact set.

use std::collections::BTreeSet;
use std::fs;

use rxlex_model::{AuditRow, BuildStats, Lexicon, LexiconBuild, RecordIndex};
use rxlex_output::{
    AUDIT_FILE, LEXICON_FILE, MANIFEST_FILE, read_manifest, sha256_hex, write_artifacts,
};

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sample_build() -> LexiconBuild {
    let lexicon: Lexicon = [
        ("imatinib".to_string(), set(&["sti571", "gleevec"])),
        ("niacin".to_string(), set(&["extended extended release", "niaspan"])),
    ]
    .into_iter()
    .collect();
    let lexicon_no_repeats: Lexicon = [
        ("imatinib".to_string(), set(&["gleevec", "sti571"])),
        ("niacin".to_string(), set(&["extended release", "niaspan"])),
    ]
    .into_iter()
    .collect();
    LexiconBuild {
        lexicon,
        lexicon_no_repeats,
        ambiguous_terms: set(&["acetaminophen"]),
        audit: vec![
            AuditRow {
                record: RecordIndex(0),
                canonical: Some("imatinib".to_string()),
                alternative: "gleevec".to_string(),
            },
            AuditRow {
                record: RecordIndex(1),
                canonical: Some("niacin".to_string()),
                alternative: "acetaminophen".to_string(),
            },
            AuditRow {
                record: RecordIndex(2),
                canonical: None,
                alternative: "acetaminophen".to_string(),
            },
        ],
        unresolved: vec![RecordIndex(2)],
        stats: BuildStats {
            relations: 3,
            unresolved: 1,
            entries: 2,
            alternatives: 4,
            distinct_terms: 5,
            ambiguous_terms: 1,
            ..BuildStats::default()
        },
    }
}

#[test]
fn test_lexicon_json_is_sorted_and_pretty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_artifacts(dir.path(), &sample_build()).expect("write artifacts");

    let json = fs::read_to_string(&paths.lexicon).expect("read lexicon");
    insta::assert_snapshot!(json, @r#"
    {
      "imatinib": [
        "gleevec",
        "sti571"
      ],
      "niacin": [
        "extended extended release",
        "niaspan"
      ]
    }
    "#);

    let terms = fs::read_to_string(&paths.ambiguous_terms).expect("read terms");
    insta::assert_snapshot!(terms, @r#"
    [
      "acetaminophen"
    ]
    "#);
}

#[test]
fn test_audit_csv_keeps_row_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_artifacts(dir.path(), &sample_build()).expect("write artifacts");

    let csv = fs::read_to_string(dir.path().join(AUDIT_FILE)).expect("read audit");
    assert_eq!(
        csv,
        "record,canonical,alternative\n\
         0,imatinib,gleevec\n\
         1,niacin,acetaminophen\n\
         2,,acetaminophen\n"
    );
}

#[test]
fn test_manifest_hashes_match_written_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = write_artifacts(dir.path(), &sample_build()).expect("write artifacts");

    let manifest = read_manifest(&paths.manifest).expect("read manifest");
    assert_eq!(manifest.artifacts.len(), 4);
    assert!(manifest.artifact(MANIFEST_FILE).is_none());
    for entry in &manifest.artifacts {
        let bytes = fs::read(dir.path().join(&entry.file)).expect("read artifact");
        assert_eq!(entry.sha256, sha256_hex(&bytes), "{}", entry.file);
        assert_eq!(entry.bytes, bytes.len());
    }
    assert_eq!(manifest.stats.entries, 2);
    assert_eq!(manifest.unresolved_records, vec![2]);
    assert!(manifest.artifact(LEXICON_FILE).is_some());
}

#[test]
fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("out").join("lexicon");
    let paths = write_artifacts(&nested, &LexiconBuild::default()).expect("write artifacts");

    for path in paths.all() {
        assert!(path.exists(), "{} missing", path.display());
    }
    assert_eq!(fs::read_to_string(&paths.lexicon).expect("read"), "{}\n");
}
