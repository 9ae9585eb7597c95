//! Splitting compound names such as `acetaminophen / codeine`.

/// A name split into its first segment and the segments after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName {
    pub primary: String,
    pub extras: Vec<String>,
}

/// Split on `delimiter`: the first segment is primary, the rest are extras.
///
/// A name without the delimiter is its own primary with no extras.
pub fn split_primary(text: &str, delimiter: &str) -> SplitName {
    let mut segments = text.split(delimiter).map(String::from);
    let primary = segments.next().unwrap_or_default();
    SplitName {
        primary,
        extras: segments.collect(),
    }
}

/// Split every form of one record and flatten, keeping order.
pub fn split_all<I, S>(forms: I, delimiter: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    forms
        .into_iter()
        .flat_map(|form| {
            form.as_ref()
                .split(delimiter)
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_primary_and_extras() {
        let split = split_primary("acetaminophen / codeine / caffeine", " / ");
        assert_eq!(split.primary, "acetaminophen");
        assert_eq!(split.extras, vec!["codeine", "caffeine"]);
    }

    #[test]
    fn test_bare_slash_is_not_a_delimiter() {
        let split = split_primary("mg/ml", " / ");
        assert_eq!(split.primary, "mg/ml");
        assert!(split.extras.is_empty());
    }

    #[test]
    fn test_empty_input_gives_empty_primary() {
        let split = split_primary("", " / ");
        assert_eq!(split.primary, "");
        assert!(split.extras.is_empty());
    }

    #[test]
    fn test_split_all_flattens_in_order() {
        let forms = ["tylenol / codeine", "tylenol-3"];
        assert_eq!(
            split_all(forms, " / "),
            vec!["tylenol", "codeine", "tylenol-3"]
        );
        assert!(split_all(Vec::<String>::new(), " / ").is_empty());
    }
}
