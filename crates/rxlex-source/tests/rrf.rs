//! Tests for RRF table loading.

use std::fs;
use std::path::Path;

use rxlex_model::ConceptId;
use rxlex_source::{
    ConceptResolver, HAS_TRADENAME, MRCONSO_FILE, MRREL_FILE, RrfOptions, RrfSource, SourceError,
    TerminologySource,
};

const MRREL: &str = "\
C0000001|A1|SCUI|RN|C0000002|A2|SCUI|has_tradename|R1||RXNORM|RXNORM|||N||
C0000003|A3|SCUI|RN|C0000002|A4|SCUI|has_tradename|R2||RXNORM|RXNORM|||N||
C0000009|A9|SCUI|RO|C0000002|A5|SCUI|has_ingredient|R3||RXNORM|RXNORM|||N||
C0000007|A7|SCUI|RN|C0000008|A8|SCUI|has_tradename|R4||MMSL|MMSL|||N||
";

const MRCONSO: &str = "\
C0000002|ENG|P|L1|PF|S1|Y|A2||||RXNORM|IN|1|Ibuprofen|0|N||
C0000002|ENG|S|L2|PF|S2|N|A6||||RXNORM|SY|1|Ibuprofen 200 MG Oral Tablet|0|N||
C0000002|GER|S|L3|PF|S3|N|A10||||MSH|SY|1|Ibuprofen \"DE\"|0|N||
C0000001|ENG|P|L4|PF|S4|Y|A1||||RXNORM|BN|2|Advil|0|N||
C0000003|ENG|P|L5|PF|S5|Y|A3||||RXNORM|BN|3|Motrin|0|N||
";

fn write_tables(dir: &Path) {
    fs::write(dir.join(MRREL_FILE), MRREL).expect("write MRREL");
    fs::write(dir.join(MRCONSO_FILE), MRCONSO).expect("write MRCONSO");
}

fn cui(value: &str) -> ConceptId {
    ConceptId::new(value).expect("valid cui")
}

#[test]
fn test_loads_relations_in_file_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tables(dir.path());
    let source = RrfSource::open_dir(dir.path(), &RrfOptions::default()).expect("open rrf");

    let pairs = source.relations_by_type(HAS_TRADENAME).expect("relations");
    assert_eq!(
        pairs,
        vec![
            (cui("C0000001"), cui("C0000002")),
            (cui("C0000003"), cui("C0000002")),
            (cui("C0000007"), cui("C0000008")),
        ]
    );
    assert_eq!(source.relation_count(), 4);
}

#[test]
fn test_string_forms_keep_order_and_literal_quotes() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tables(dir.path());
    let source = RrfSource::open_dir(dir.path(), &RrfOptions::default()).expect("open rrf");

    let forms = source.string_forms(&cui("C0000002")).expect("forms");
    assert_eq!(
        forms,
        vec![
            "Ibuprofen",
            "Ibuprofen 200 MG Oral Tablet",
            "Ibuprofen \"DE\"",
        ]
    );
}

#[test]
fn test_sab_and_language_filters_apply() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tables(dir.path());
    let options = RrfOptions::default()
        .with_sab("RXNORM")
        .with_language("ENG")
        .with_relation(HAS_TRADENAME);
    let source = RrfSource::open_dir(dir.path(), &options).expect("open rrf");

    let pairs = source.relations_by_type(HAS_TRADENAME).expect("relations");
    assert_eq!(pairs.len(), 2);
    assert!(source.relations_by_type("has_ingredient").expect("relations").is_empty());

    let forms = source.string_forms(&cui("C0000002")).expect("forms");
    assert_eq!(forms, vec!["Ibuprofen", "Ibuprofen 200 MG Oral Tablet"]);
}

#[test]
fn test_resolver_reads_generic_from_second_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_tables(dir.path());
    let source = RrfSource::open_dir(dir.path(), &RrfOptions::default().with_sab("RXNORM"))
        .expect("open rrf");
    let mut resolver = ConceptResolver::new(&source);
    let records = resolver.relation_records(HAS_TRADENAME).expect("records");
    let (resolved, stats) = resolver.resolve_records(&records);

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].generic.primary.as_deref(), Some("Ibuprofen"));
    assert_eq!(resolved[0].brand_forms, vec!["Advil"]);
    assert_eq!(resolved[1].brand_forms, vec!["Motrin"]);
    assert_eq!(stats.unresolved_generics, 0);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = RrfSource::open_dir(dir.path(), &RrfOptions::default()).unwrap_err();
    assert!(matches!(error, SourceError::FileNotFound { .. }));
}

#[test]
fn test_short_row_reports_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join(MRREL_FILE), "C1|A1|SCUI\n").expect("write MRREL");
    fs::write(dir.path().join(MRCONSO_FILE), MRCONSO).expect("write MRCONSO");
    let error = RrfSource::open_dir(dir.path(), &RrfOptions::default()).unwrap_err();
    match error {
        SourceError::ShortRow {
            line,
            expected,
            found,
            ..
        } => {
            assert_eq!(line, 1);
            assert_eq!(expected, 11);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}
