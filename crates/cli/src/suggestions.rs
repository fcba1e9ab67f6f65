use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use rust_verbs_core::registry::Registry;

/// Closest registered command name to `typed`, if any is close at all.
///
/// A name matches when either one is a fuzzy subsequence of the other, so
/// both `tst` and `tests` suggest `test`. Ties go to the earlier command.
#[must_use]
pub fn did_you_mean<'a>(registry: &'a Registry, typed: &str) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default();

    registry
        .names()
        .filter_map(|name| {
            let forward = matcher.fuzzy_match(name, typed);
            let backward = matcher.fuzzy_match(typed, name);
            forward.max(backward).map(|score| (score, name))
        })
        .fold(None, |best: Option<(i64, &str)>, (score, name)| match best {
            Some((best_score, _)) if best_score >= score => best,
            _ => Some((score, name)),
        })
        .map(|(_, name)| name)
}

/// The "did you mean" line for an unknown command, when there is a suggestion.
#[must_use]
pub fn suggestion_line(registry: &Registry, typed: &str) -> Option<String> {
    did_you_mean(registry, typed).map(|name| format!("Did you mean `{name}`?"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_commands::sample_sources;
    use rust_verbs_core::registry;

    fn sample_registry() -> Registry {
        registry::build(&sample_sources()).unwrap()
    }

    #[test]
    fn test_did_you_mean_subsequence() {
        let registry = sample_registry();
        assert_eq!(did_you_mean(&registry, "test_pth"), Some("test_path"));
        assert_eq!(did_you_mean(&registry, "pick"), Some("pick_colour"));
    }

    #[test]
    fn test_did_you_mean_longer_typo() {
        let registry = sample_registry();
        assert_eq!(did_you_mean(&registry, "summ"), Some("sum"));
    }

    #[test]
    fn test_no_suggestion_for_unrelated_text() {
        let registry = sample_registry();
        assert_eq!(did_you_mean(&registry, "zzzz"), None);
        assert_eq!(suggestion_line(&registry, "zzzz"), None);
    }

    #[test]
    fn test_suggestion_line() {
        let registry = sample_registry();
        assert_eq!(
            suggestion_line(&registry, "divde").as_deref(),
            Some("Did you mean `divide`?")
        );
    }
}
