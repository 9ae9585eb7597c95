//! Invariants that hold for any input the pipeline accepts.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rxlex_model::{ConceptForms, RecordIndex, ResolvedRecord};
use rxlex_normalize::{
    CleanProfile, LexiconPipeline, NameCleaner, NormalizeOptions, dedupe_phrase,
    has_repeated_tokens, split_primary,
};

// A small vocabulary so that names collide, repeat and split often.
const WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "oral", "tablet", "extended", "release", "5", "mg", "in", "per",
    "day", "/",
];

fn arb_name() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|words| words.join(" "))
}

fn arb_record() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (
        prop::collection::vec(arb_name(), 0..3),
        prop::collection::vec(arb_name(), 0..3),
    )
}

fn arb_records() -> impl Strategy<Value = Vec<ResolvedRecord>> {
    prop::collection::vec(arb_record(), 0..12).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(index, (generic, brands))| ResolvedRecord {
                index: RecordIndex(index),
                generic: ConceptForms::from_forms(generic),
                brand_forms: brands,
            })
            .collect()
    })
}

fn expected_keys(records: &[ResolvedRecord], options: &NormalizeOptions) -> BTreeSet<String> {
    let cleaner = NameCleaner::new(options);
    records
        .iter()
        .filter_map(|record| record.generic.primary.as_deref())
        .map(|primary| {
            let split = split_primary(&cleaner.first_clean(primary), &options.delimiter);
            cleaner.finish(&split.primary, CleanProfile::CANONICAL)
        })
        .collect()
}

proptest! {
    #[test]
    fn test_lexicons_hold_their_invariants(records in arb_records(), foreign in any::<bool>()) {
        let options = NormalizeOptions::default().with_foreign_canonicals_dropped(foreign);
        let pipeline = LexiconPipeline::new(options).expect("pipeline");
        let build = pipeline.run(&records).expect("run");

        prop_assert!(build.lexicon.violations().is_empty());
        prop_assert!(build.lexicon_no_repeats.violations().is_empty());
        for (_, phrases) in build.lexicon_no_repeats.iter() {
            for phrase in phrases {
                prop_assert!(!has_repeated_tokens(phrase));
            }
        }
        let keys: BTreeSet<&String> = build.lexicon.keys().collect();
        if foreign {
            for (_, phrases) in build.lexicon.iter().chain(build.lexicon_no_repeats.iter()) {
                for phrase in phrases {
                    prop_assert!(!keys.contains(phrase));
                }
            }
        }
        let variant_keys: BTreeSet<&String> = build.lexicon_no_repeats.keys().collect();
        prop_assert_eq!(keys, variant_keys);
    }

    #[test]
    fn test_one_key_per_distinct_canonical_name(records in arb_records()) {
        let options = NormalizeOptions::default();
        let pipeline = LexiconPipeline::new(options.clone()).expect("pipeline");
        let build = pipeline.run(&records).expect("run");

        let keys: BTreeSet<String> = build.lexicon.keys().cloned().collect();
        prop_assert_eq!(keys, expected_keys(&records, &options));

        let unresolved = records.iter().filter(|record| record.generic.is_empty()).count();
        prop_assert_eq!(build.unresolved.len(), unresolved);
    }

    #[test]
    fn test_phrase_dedup_is_idempotent(name in arb_name()) {
        let once = dedupe_phrase(&name);
        prop_assert_eq!(dedupe_phrase(&once), once.clone());
        prop_assert!(!has_repeated_tokens(&once));
    }
}
