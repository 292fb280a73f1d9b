/// Discourse markers typical of formal, assistant-style prose.
pub const FORMAL_MARKERS: [&str; 24] = [
    "therefore",
    "consequently",
    "furthermore",
    "moreover",
    "however",
    "additionally",
    "subsequently",
    "accordingly",
    "nevertheless",
    "comprehensive",
    "systematic",
    "specifically",
    "importantly",
    "firstly",
    "secondly",
    "thirdly",
    "finally",
    "in conclusion",
    "in summary",
    "to summarize",
    "in other words",
    "that is to say",
    "it is worth noting",
    "it should be noted",
];

pub const CONNECTORS: [&str; 10] = [
    "firstly",
    "secondly",
    "thirdly",
    "finally",
    "in summary",
    "in conclusion",
    "therefore",
    "thus",
    "hence",
    "as a result",
];

/// Number of distinct `markers` occurring anywhere in `lowered`.
///
/// Matching is by substring, so "thus" also fires inside "enthusiasm".
pub fn distinct_present(lowered: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| lowered.contains(*m)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_not_frequency() {
        let t = "however, however, however. therefore!";
        assert_eq!(distinct_present(t, &FORMAL_MARKERS), 2);
    }

    #[test]
    fn test_substring_semantics() {
        assert_eq!(distinct_present("enthusiasm", &CONNECTORS), 1);
        assert_eq!(distinct_present("plain words only", &CONNECTORS), 0);
    }
}
