//! End-to-end tests over the public library API using on-disk data files.

use async_trait::async_trait;
use eduguide::advisor::{Advisor, CatalogSources};
use eduguide::catalog::Catalog;
use eduguide::filter::{Filter, FilterEngine};
use eduguide::formatter::{format_list, NO_MATCH_MESSAGE};
use eduguide::intent::{IntentExtractor, RegexIntentExtractor};
use eduguide::model::SuggestError;
use eduguide::normalizer::extract_fee;
use eduguide::suggester::{DisabledSuggester, Suggester, FALLBACK_REPLY};
use eduguide::{CollegeRecord, FeeValue, FilterCriteria, ReplySource, SortKey};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const COLLEGES: &str = r#"[
  {"id": 1, "name": "College of Engineering Trivandrum", "city": "Thiruvananthapuram", "state": "Kerala",
   "rank": 4, "courses": ["B.Tech Computer Science", "B.Tech Civil"],
   "fees_structure": {"btech": {"fee_per_year_in_inr": 135000}}, "google_maps": true},
  {"id": 2, "name": "Model Engineering College", "city": "Kochi", "state": "Kerala",
   "rank": 3, "courses": ["B.Tech CSE", "B.Tech ECE"],
   "fees_structure": {"btech": "95000"}},
  "garbage entry",
  {"id": 3, "name": "Rajagiri School of Engineering", "city": "Kochi", "state": "Kerala",
   "rank": 3, "courses": ["B.Tech AI & Data Science"],
   "fees_structure": {"btech": {"total_estimated_fee_in_inr": "4,00,000 total"}}},
  {"name": "Unranked Arts College", "city": "Kochi", "state": "Kerala",
   "courses": "BA English", "fees_structure": {"ba": {"note": "contact office"}}}
]"#;

const FAQS: &str = r#"[{"q": "Is there a hostel?", "a": "Most colleges offer one."}, {"question": "Entrance?"}]"#;

struct Fixed(&'static str);

#[async_trait]
impl Suggester for Fixed {
    async fn suggest(&self, _prompt: &str) -> Result<String, SuggestError> {
        Ok(self.0.to_string())
    }
}

fn write_data(dir: &Path, colleges: &str) -> CatalogSources {
    let colleges_path = dir.join("colleges.json");
    let faq_path = dir.join("faq.json");
    fs::write(&colleges_path, colleges).unwrap();
    fs::write(&faq_path, FAQS).unwrap();
    CatalogSources { colleges_path, faq_path }
}

fn advisor_from(sources: &CatalogSources, suggester: Arc<dyn Suggester>) -> Advisor {
    Advisor::new(Catalog::load(&sources.colleges_path, &sources.faq_path), suggester)
        .with_sources(sources.clone())
}

#[test]
fn mixed_shapes_load_and_resolve() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);
    let catalog = Catalog::load(&sources.colleges_path, &sources.faq_path);

    assert_eq!(catalog.colleges().len(), 4);
    assert_eq!(catalog.faqs().len(), 2);
    assert_eq!(catalog.faqs()[1].a, "Answer not available.");
    assert_eq!(catalog.colleges()[3].courses, vec!["BA English".to_string()]);
}

#[test]
fn extract_fee_is_total() {
    let inputs = [
        json!(null),
        json!(12.75),
        json!("77000"),
        json!("lots"),
        json!({"fee": "abc", "other": "₹55,000"}),
        json!({"x": {"y": 1}}),
        json!([1, 2, 3]),
        json!(false),
        json!(-42),
    ];
    let fees: Vec<u64> = inputs.into_iter().map(|v| extract_fee(&FeeValue::from(v))).collect();
    assert_eq!(fees, vec![0, 12, 77000, 0, 55000, 0, 0, 0, 0]);
}

#[test]
fn budget_example_from_rank_sorted_pair() {
    let records: Vec<CollegeRecord> = serde_json::from_value(json!([
        {"name": "A", "rank": 5, "fees_structure": {"cat": {"fee": 50000}}},
        {"name": "B", "rank": 2, "fees_structure": {"cat": {"fee": 200000}}}
    ]))
    .unwrap();
    let criteria = FilterCriteria {
        budget: Some(100000),
        sort: SortKey::Rank,
        ..Default::default()
    };
    let result = FilterEngine::new().filter(&records, &criteria);
    let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A"]);
}

#[test]
fn equal_ranks_keep_catalog_order() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);
    let catalog = Catalog::load(&sources.colleges_path, &sources.faq_path);

    let criteria = FilterCriteria {
        location: Some("Kochi".into()),
        ..Default::default()
    };
    let result = FilterEngine::new().filter(catalog.colleges(), &criteria);
    let names: Vec<_> = result.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        ["Model Engineering College", "Rajagiri School of Engineering", "Unranked Arts College"]
    );
}

#[test]
fn empty_criteria_keeps_everything_for_each_sort() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);
    let catalog = Catalog::load(&sources.colleges_path, &sources.faq_path);
    let engine = FilterEngine::new();

    for sort in [SortKey::Rank, SortKey::Fee, SortKey::Name] {
        let criteria = FilterCriteria { sort, ..Default::default() };
        let result = engine.filter(catalog.colleges(), &criteria);
        assert_eq!(result.len(), catalog.colleges().len());
    }

    let by_fee = engine.filter(
        catalog.colleges(),
        &FilterCriteria { sort: SortKey::Fee, ..Default::default() },
    );
    let names: Vec<_> = by_fee.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Model Engineering College",
            "College of Engineering Trivandrum",
            "Rajagiri School of Engineering",
            "Unranked Arts College"
        ]
    );
}

#[test]
fn chat_example_extracts_all_three_criteria() {
    let intent = RegexIntentExtractor::new().extract("Show colleges in Kochi for CSE under 120000", None);
    assert_eq!(intent.location.as_deref(), Some("Kochi"));
    assert_eq!(intent.course.as_deref(), Some("CSE"));
    assert_eq!(intent.budget, Some(120000));
}

#[tokio::test]
async fn chat_answers_from_catalog() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);
    let advisor = advisor_from(&sources, Arc::new(DisabledSuggester));

    let reply = advisor
        .chat("Show colleges in Kochi for CSE under 120000", None)
        .await
        .unwrap();
    assert_eq!(reply.source, ReplySource::Catalog);
    assert_eq!(reply.response, "1. Model Engineering College - Kochi, Kerala | 🏆 Rank: 3 | 💰 ~₹95,000");
}

#[tokio::test]
async fn no_match_defers_to_suggestion_or_fallback() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);

    let advisor = advisor_from(&sources, Arc::new(Fixed("Consider colleges in Kochi.")));
    let reply = advisor.chat("recommend colleges in Mumbai", None).await.unwrap();
    assert_eq!(reply.source, ReplySource::Suggestion);
    assert_eq!(reply.response, "Consider colleges in Kochi.");

    let advisor = advisor_from(&sources, Arc::new(DisabledSuggester));
    let reply = advisor.chat("recommend colleges in Mumbai", None).await.unwrap();
    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.response, FALLBACK_REPLY);
    assert_ne!(reply.response, NO_MATCH_MESSAGE);
}

#[test]
fn reload_swaps_in_new_data() {
    let dir = TempDir::new().unwrap();
    let sources = write_data(dir.path(), COLLEGES);
    let advisor = advisor_from(&sources, Arc::new(DisabledSuggester));
    assert_eq!(advisor.health().colleges_loaded, 4);

    fs::write(&sources.colleges_path, r#"[{"name": "Only One"}]"#).unwrap();
    assert_eq!(advisor.reload().unwrap(), 1);
    assert_eq!(advisor.list_top(10)[0].name, "Only One");

    fs::write(&sources.colleges_path, "not json").unwrap();
    assert_eq!(advisor.reload().unwrap(), 0);
}

#[test]
fn missing_data_files_give_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let missing = PathBuf::from(dir.path()).join("absent.json");
    let catalog = Catalog::load(&missing, &missing);
    assert!(catalog.colleges().is_empty());
    assert!(catalog.faqs().is_empty());
    assert_eq!(format_list(catalog.colleges()), NO_MATCH_MESSAGE);
}
