// filter/matching.rs

use crate::model::CollegeRecord;
use crate::normalizer::{min_resolvable_fee, normalize_text};

/// Course alias groups. Querying any alias accepts every alias of its group.
pub const COURSE_SYNONYMS: &[&[&str]] = &[
    &["cse", "computer", "cs", "computerscience", "btech", "btechcse"],
    &["ai", "artificialintelligence", "aiml", "machinelearning", "datascience"],
    &["ece", "electronics", "electronicsandcommunication", "communication"],
    &["mech", "mechanical", "mechanicalengineering"],
    &["civil", "civilengineering"],
    &["bca", "computerapplications", "bachelorofcomputerapplications"],
    &["bba", "businessadministration", "bachelorofbusinessadministration"],
];

/// The alias group containing `normalized`, if any.
pub fn synonym_group(normalized: &str) -> Option<&'static [&'static str]> {
    COURSE_SYNONYMS
        .iter()
        .copied()
        .find(|group| group.contains(&normalized))
}

/// Substring match against city, state and category.
pub fn location_matches(record: &CollegeRecord, location: Option<&str>) -> bool {
    let Some(location) = location else {
        return true;
    };
    let needle = normalize_text(location);
    if needle.is_empty() {
        return true;
    }

    [Some(record.city.as_str()), Some(record.state.as_str()), record.category.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| normalize_text(field).contains(&needle))
}

pub fn course_matches(record: &CollegeRecord, course: Option<&str>) -> bool {
    let Some(course) = course else {
        return true;
    };
    let needle = normalize_text(course);
    if needle.is_empty() {
        return true;
    }

    let blob: String = record.courses.iter().map(|c| normalize_text(c)).collect();
    match synonym_group(&needle) {
        Some(group) => group.iter().any(|alias| blob.contains(alias)),
        None => blob.contains(&needle),
    }
}

/// Records without any resolvable fee always pass the budget check.
pub fn budget_matches(record: &CollegeRecord, budget: Option<u64>) -> bool {
    match budget {
        None => true,
        Some(budget) => min_resolvable_fee(record).unwrap_or(0) <= budget,
    }
}

pub fn name_matches(record: &CollegeRecord, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        None | Some("") => true,
        Some(q) => record.name.to_lowercase().contains(&q.to_lowercase()),
    }
}
