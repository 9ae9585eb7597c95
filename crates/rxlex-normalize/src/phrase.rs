//! Removal of repeated tokens inside a phrase.

use std::collections::{BTreeSet, HashMap, HashSet};

use rxlex_model::Lexicon;

/// Drop repeated whitespace-separated tokens, keeping the first occurrence.
///
/// `"extended extended release"` becomes `"extended release"`.
pub fn dedupe_phrase(phrase: &str) -> String {
    let mut seen = HashSet::new();
    phrase
        .split_whitespace()
        .filter(|token| seen.insert(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn has_repeated_tokens(phrase: &str) -> bool {
    let mut seen = HashSet::new();
    phrase.split_whitespace().any(|token| !seen.insert(token))
}

/// The no-repeats variant of a lexicon and what reconciling it removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseDedup {
    pub lexicon: Lexicon,
    /// Phrases that collapsed onto an alternative of another entry.
    pub collisions: BTreeSet<String>,
    /// Collapsed phrases dropped for equalling another entry's key.
    pub foreign_canonicals: usize,
}

/// Build the no-repeats variant of a lexicon.
///
/// Collapsing tokens can turn a phrase into its own key, into another key, or
/// into a phrase of another entry. Own-key matches are always dropped. Other
/// keys are dropped when `drop_foreign_canonicals` is set, the same rule the
/// ambiguity filter applies. Phrases that now appear under more than one key
/// are removed from all of them and returned as collisions.
pub fn dedupe_lexicon(lexicon: &Lexicon, drop_foreign_canonicals: bool) -> PhraseDedup {
    let keys: HashSet<&str> = lexicon.keys().map(String::as_str).collect();
    let mut foreign_canonicals = 0;
    let mut collapsed = Lexicon::new();
    for (canonical, alternatives) in lexicon.iter() {
        let mut phrases: BTreeSet<String> = alternatives
            .iter()
            .map(|alternative| dedupe_phrase(alternative.as_str()))
            .filter(|phrase| phrase != canonical)
            .collect();
        if drop_foreign_canonicals {
            let before = phrases.len();
            phrases.retain(|phrase| !keys.contains(phrase.as_str()));
            foreign_canonicals += before - phrases.len();
        }
        collapsed.insert_entry(canonical.clone(), phrases);
    }

    let mut owners: HashMap<&str, usize> = HashMap::new();
    for (_, phrases) in collapsed.iter() {
        for phrase in phrases {
            *owners.entry(phrase.as_str()).or_default() += 1;
        }
    }
    let collisions: BTreeSet<String> = owners
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(phrase, _)| phrase.to_string())
        .collect();

    if !collisions.is_empty() {
        for (_, phrases) in collapsed.iter_mut() {
            phrases.retain(|phrase| !collisions.contains(phrase));
        }
    }
    PhraseDedup {
        lexicon: collapsed,
        collisions,
        foreign_canonicals,
    }
}
