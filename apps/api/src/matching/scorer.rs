//! Similarity scoring between a resume and a job description.
//!
//! The score is a fixed linear blend of two Jaccard overlaps: one over the
//! word sets of the raw texts, one over the skill sets. A thin heuristic:
//! no stemming, no TF-IDF weighting, no cross-document ranking.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Weight of the raw-text overlap in the final blend.
pub const TEXT_WEIGHT: f64 = 0.6;
/// Weight of the skill overlap in the final blend.
pub const SKILL_WEIGHT: f64 = 0.4;

// Tokens keep `+`, `#` and `.` so "c++", "c#" and "node.js" survive intact.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z+#.]+").expect("word token regex"));

/// Computes the blended similarity score in [0.0, 1.0].
///
/// Both Jaccard components are defined as 0.0 when both input sets are empty:
/// no signal means no match, and the division by zero never happens. Empty or
/// malformed inputs degrade to lower scores, never to an error.
pub fn score_match(
    resume_text: &str,
    resume_skills: &[String],
    jd_text: &str,
    jd_skills: &[String],
) -> f64 {
    let text_similarity = jaccard(&tokenize(resume_text), &tokenize(jd_text));
    let skill_similarity = jaccard(&lowercase_set(resume_skills), &lowercase_set(jd_skills));
    TEXT_WEIGHT * text_similarity + SKILL_WEIGHT * skill_similarity
}

fn tokenize(text: &str) -> HashSet<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_ascii_lowercase()).collect()
}

/// |A ∩ B| / |A ∪ B|, with both-empty defined as 0.0.
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::skills::extract_skills;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_empty_inputs_score_exactly_zero() {
        assert_eq!(score_match("", &[], "", &[]), 0.0);
    }

    #[test]
    fn test_identical_inputs_score_one() {
        let skills = owned(&["python", "sql"]);
        let score = score_match("Python and SQL", &skills, "Python and SQL", &skills);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let python = owned(&["python"]);
        let x = owned(&["x"]);
        let cases: [(&str, &[String], &str, &[String]); 3] = [
            ("", &python, "Python everywhere", &[]),
            ("c++ c# node.js", &[], "rust go", &[]),
            ("a b c", &x, "a b c", &x),
        ];
        for (rt, rs, jt, js) in cases {
            let score = score_match(rt, rs, jt, js);
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_components_are_symmetric() {
        let a_skills = owned(&["python", "docker"]);
        let b_skills = owned(&["python", "aws"]);
        let forward = score_match("python on aws", &a_skills, "docker and python", &b_skills);
        let backward = score_match("docker and python", &b_skills, "python on aws", &a_skills);
        assert!((forward - backward).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tokenizer_keeps_symbol_tokens() {
        // "c++" and "c#" are single tokens, so they overlap as whole words
        let score = score_match("c++ c#", &[], "c++ c#", &[]);
        assert!((score - TEXT_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_skill_overlap_alone() {
        let skills = owned(&["python", "ml"]);
        let score = score_match("", &skills, "", &skills);
        assert!((score - SKILL_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_high_overlap_scenario() {
        let resume_text = "Experienced in Python, ML, NLP, SQL";
        let resume_skills = extract_skills(resume_text);
        assert_eq!(resume_skills, ["ml", "nlp", "python", "sql"]);

        let jd_text = "Python ML NLP SQL";
        let jd_skills = owned(&["python", "ml", "nlp", "sql"]);
        let score = score_match(resume_text, &resume_skills, jd_text, &jd_skills);
        // 4/6 word overlap blended with full skill overlap
        assert!(score > 0.79, "expected a high score, got {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_disjoint_inputs_score_zero() {
        let score = score_match(
            "embedded firmware in rust",
            &owned(&["react"]),
            "accounting and payroll",
            &owned(&["sql"]),
        );
        assert_eq!(score, 0.0);
    }
}
