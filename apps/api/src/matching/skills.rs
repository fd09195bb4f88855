use once_cell::sync::Lazy;
use regex::Regex;

/// Closed vocabulary of recognized skill tokens. Matching is
/// case-insensitive; extraction output is always lowercase. The list is
/// configuration, not logic: extend it here, never in the matcher.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "node",
    "fastapi",
    "nlp",
    "ml",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
];

static SKILL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = SKILL_VOCABULARY
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}")).expect("skill vocabulary regex")
});

/// Scans free text for known skills via case-insensitive whole-word matching.
///
/// Word boundaries are checked by inspecting the neighbouring characters
/// instead of regex `\b`, which treats `+` as a non-word character and would
/// silently drop tokens like "c++". Output is deduplicated, lowercase, and
/// sorted ascending, so the same input always yields the same list.
pub fn extract_skills(text: &str) -> Vec<String> {
    let mut skills: Vec<String> = SKILL_PATTERN
        .find_iter(text)
        .filter(|m| is_whole_word(text, m.start(), m.end()))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();
    skills.sort();
    skills.dedup();
    skills
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
