//! Pattern-based answerers for the fixed question categories.
//!
//! Each extractor scans the whole document text and returns a sentence. A miss is
//! reported with a fixed message, never as an error.

use std::sync::LazyLock;

use regex::Regex;

pub const NAME_NOT_FOUND: &str = "I couldn't find a clear name in the document.";
pub const EMAIL_NOT_FOUND: &str = "I couldn't find an email address in the document.";
pub const PHONE_NOT_FOUND: &str = "I couldn't find a phone number in the document.";
pub const JOB_NOT_FOUND: &str =
    "I couldn't find clear information about the current job position.";
pub const EDUCATION_NOT_FOUND: &str =
    "I couldn't find clear education information in the document.";

/// Lines near the top of a resume that look like names but are section titles.
const HEADER_WORDS: &[&str] = &["resume", "cv", "curriculum", "profile", "summary"];

const JOB_SECTION_HEADERS: &[&str] = &["experience", "employment", "work history"];

const EDUCATION_SECTION_HEADERS: &[&str] = &["education", "academic", "degree"];

const NAME_SCAN_LINES: usize = 10;
const NAME_MAX_WORDS: usize = 4;
const JOB_SCAN_LINES: usize = 9;
const EDUCATION_SCAN_LINES: usize = 11;
const EDUCATION_MAX_ITEMS: usize = 6;

static NAME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)name\s*:?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").expect("valid name regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Tried in order; the first pattern with any match wins outright.
static PHONE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // 555-123-4567, 555.123.4567, 5551234567
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        // (555) 123-4567; no leading \b, which would require a word char before "("
        r"\(\d{3}\)\s?\d{3}[-.]?\d{4}\b",
        // +44 7911 123 456; no leading \b for the same reason
        r"\+\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

/// Looks for a short, capitalized line near the top of the document, then for an
/// explicit `Name:` label anywhere.
pub fn find_name(text: &str) -> String {
    if let Some(line) = text
        .split('\n')
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| looks_like_name(line))
    {
        return format!("Based on the document, the name appears to be: {line}");
    }

    NAME_LABEL_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("The name is: {}", m.as_str()))
        .unwrap_or_else(|| NAME_NOT_FOUND.to_string())
}

fn looks_like_name(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() > NAME_MAX_WORDS {
        return false;
    }
    // Only purely alphabetic words are checked; "J.", "Smith," and digits are ignored.
    let capitalized = words
        .iter()
        .filter(|w| w.chars().all(char::is_alphabetic))
        .all(|w| w.chars().next().is_some_and(char::is_uppercase));
    let lower = line.to_lowercase();
    capitalized && !contains_any(&lower, HEADER_WORDS)
}

pub fn find_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| format!("The email address is: {}", m.as_str()))
        .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string())
}

pub fn find_phone(text: &str) -> String {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| format!("The phone number is: {}", m.as_str()))
        .unwrap_or_else(|| PHONE_NOT_FOUND.to_string())
}

/// Takes the first unindented line under the first experience-style header.
pub fn find_current_job(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(header) = find_section(&lines, JOB_SECTION_HEADERS) else {
        return JOB_NOT_FOUND.to_string();
    };

    lines
        .iter()
        .skip(header + 1)
        .take(JOB_SCAN_LINES)
        .find(|line| !line.trim().is_empty() && !line.starts_with(char::is_whitespace))
        .map(|line| format!("Current position appears to be: {}", line.trim()))
        .unwrap_or_else(|| JOB_NOT_FOUND.to_string())
}

/// Collects the non-empty lines under the first education-style header.
pub fn find_education(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(header) = find_section(&lines, EDUCATION_SECTION_HEADERS) else {
        return EDUCATION_NOT_FOUND.to_string();
    };

    let items: Vec<&str> = lines
        .iter()
        .skip(header + 1)
        .take(EDUCATION_SCAN_LINES)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take(EDUCATION_MAX_ITEMS)
        .collect();

    if items.is_empty() {
        return EDUCATION_NOT_FOUND.to_string();
    }
    format!("Education: {}", items.join(" "))
}

fn find_section(lines: &[&str], headers: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| contains_any(&line.to_lowercase(), headers))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
