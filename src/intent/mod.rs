// Intent module: heuristic extraction of filter criteria from chat text.

pub mod language;

use crate::filter::matching::synonym_group;
use crate::model::{FilterCriteria, SortKey};
use crate::normalizer::normalize_text;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub use language::{classify_language, detect_language, resolve_language};

lazy_static! {
    static ref LOCATION: Regex =
        Regex::new(r"(?i)\b(?:in|at|location)\b\s*[:=]?\s*([a-z][a-z ]*)").unwrap();
    static ref COURSE: Regex =
        Regex::new(r"(?i)\b(?:course|stream|program)\b\s*[:=]?\s*([a-z][a-z &/]*)").unwrap();
    static ref BUDGET: Regex =
        Regex::new(r"(?i)\b(?:budget|under|max|fee)\b\s*[:=]?\s*(?:rs\.?|inr|₹)?\s*(\d{3,8})").unwrap();
}

/// Words that end a captured location phrase.
const LOCATION_STOPWORDS: &[&str] = &[
    "in", "at", "location", "for", "under", "with", "within", "below", "budget", "max", "fee", "fees",
    "cost", "low", "cheap", "affordable", "course", "stream", "program", "and", "near", "having",
    "offering", "that", "which",
];

/// Words that end a captured course phrase.
const COURSE_STOPWORDS: &[&str] = &[
    "in", "at", "location", "under", "within", "below", "budget", "max", "fee", "fees", "with", "near",
];

/// Lower-cased substrings that mark a message as a recommendation request.
pub const RECOMMENDATION_KEYWORDS: &[&str] = &[
    "recommend", "suggest", "college", "cse", "btech", "ai", "fee", "budget", "best", "top",
];

/// Criteria and reply language pulled out of one chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Intent {
    pub location: Option<String>,
    pub course: Option<String>,
    pub budget: Option<u64>,
    pub language: String,
}

impl Intent {
    pub fn has_criteria(&self) -> bool {
        self.location.is_some() || self.course.is_some() || self.budget.is_some()
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            location: self.location.clone(),
            course: self.course.clone(),
            budget: self.budget,
            sort: SortKey::Rank,
            query: None,
        }
    }
}

/// Pluggable extraction step in front of the filter engine.
pub trait IntentExtractor: Send + Sync {
    fn extract(&self, text: &str, explicit_language: Option<&str>) -> Intent;
}

/// Regex-driven extractor. Lossy: anything it cannot read is left empty.
pub struct RegexIntentExtractor;

impl RegexIntentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl IntentExtractor for RegexIntentExtractor {
    fn extract(&self, text: &str, explicit_language: Option<&str>) -> Intent {
        Intent {
            location: capture(&LOCATION, text).and_then(|p| cut_at_stopword(&p, LOCATION_STOPWORDS)),
            course: capture(&COURSE, text)
                .and_then(|p| cut_at_stopword(&p, COURSE_STOPWORDS))
                .or_else(|| known_course_word(text)),
            budget: capture(&BUDGET, text).and_then(|digits| digits.parse().ok()),
            language: resolve_language(text, explicit_language),
        }
    }
}

/// Whether a message should go through the filter engine rather than
/// straight to the assistant.
pub fn is_recommendation(text: &str, intent: &Intent) -> bool {
    let lower = text.to_lowercase();
    intent.has_criteria() || RECOMMENDATION_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn cut_at_stopword(phrase: &str, stopwords: &[&str]) -> Option<String> {
    let kept: Vec<&str> = phrase
        .split_whitespace()
        .take_while(|word| !stopwords.contains(&word.to_lowercase().as_str()))
        .collect();
    if kept.is_empty() { None } else { Some(kept.join(" ")) }
}

/// First word of the message that is a known course alias, e.g. "CSE" or "B.Tech".
fn known_course_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|word| synonym_group(&normalize_text(word)).is_some())
        .map(str::to_string)
}
