//! Fallback answerer: ranks document sentences by keyword overlap with the question.

use std::sync::LazyLock;

use regex::Regex;

pub const NO_RELEVANT_INFO: &str =
    "I couldn't find relevant information in the document to answer your question.";

const MAX_SENTENCES: usize = 5;
const MAX_ANSWER_CHARS: usize = 800;
const ELLIPSIS: &str = "...";

static SENTENCE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// Scores every sentence by how many question tokens occur in it as substrings,
/// then joins the best five. Ties keep document order.
///
/// Substring containment means short tokens over-count: "i" matches inside "it".
pub fn rank_sentences(text: &str, question: &str) -> String {
    let question = question.to_lowercase();
    let keywords: Vec<&str> = WORD_RE.find_iter(&question).map(|m| m.as_str()).collect();

    let mut scored: Vec<(&str, usize)> = SENTENCE_BOUNDARY_RE
        .split(text)
        .filter_map(|sentence| {
            let score = keyword_score(&sentence.to_lowercase(), &keywords);
            (score > 0).then(|| (sentence.trim(), score))
        })
        .collect();

    if scored.is_empty() {
        return NO_RELEVANT_INFO.to_string();
    }

    // sort_by is stable
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let answer = scored
        .iter()
        .take(MAX_SENTENCES)
        .map(|(sentence, _)| *sentence)
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(answer, MAX_ANSWER_CHARS)
}

fn keyword_score(sentence_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|k| sentence_lower.contains(*k))
        .count()
}

fn truncate_chars(answer: String, limit: usize) -> String {
    match answer.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &answer[..cut]),
        None => answer,
    }
}
