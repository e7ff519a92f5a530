use crate::model::{non_blank, CatalogError, CollegeRecord, FaqEntry};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Immutable snapshot of everything loaded from disk.
#[derive(Debug, Clone)]
pub struct Catalog {
    colleges: Vec<CollegeRecord>,
    faqs: Vec<FaqEntry>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(colleges: Vec<CollegeRecord>, faqs: Vec<FaqEntry>) -> Self {
        Self {
            colleges,
            faqs,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Loads both data files. Missing or broken files produce empty
    /// collections, never an error.
    pub fn load(colleges_path: &Path, faq_path: &Path) -> Self {
        Self::new(load_colleges(colleges_path), load_faqs(faq_path))
    }

    pub fn colleges(&self) -> &[CollegeRecord] {
        &self.colleges
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// The current snapshot, swapped as a whole on reload.
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, catalog: Catalog) {
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(catalog);
    }
}

pub fn load_colleges(path: &Path) -> Vec<CollegeRecord> {
    match read_json_array(path).map(parse_colleges) {
        Ok(colleges) => {
            info!("Loaded {} colleges from {}", colleges.len(), path.display());
            colleges
        }
        Err(e) => {
            warn!("Could not load colleges from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

pub fn load_faqs(path: &Path) -> Vec<FaqEntry> {
    match read_json_array(path).map(parse_faqs) {
        Ok(faqs) => {
            info!("Loaded {} FAQ entries from {}", faqs.len(), path.display());
            faqs
        }
        Err(e) => {
            warn!("Could not load FAQs from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn read_json_array(path: &Path) -> Result<Vec<Value>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(CatalogError::NotAnArray),
    }
}

/// Keeps every object that parses; skips the rest with a warning.
pub fn parse_colleges(items: Vec<Value>) -> Vec<CollegeRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!("Skipping college #{}: not an object", index);
                return None;
            }
            match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping college #{}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

pub fn parse_faqs(items: Vec<Value>) -> Vec<FaqEntry> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let text = |keys: [&str; 2]| {
                keys.iter()
                    .find_map(|k| item.get(*k).and_then(faq_text))
            };
            FaqEntry {
                q: text(["q", "question"]).unwrap_or_else(|| "Question".to_string()),
                a: text(["a", "answer"]).unwrap_or_else(|| "Answer not available.".to_string()),
            }
        })
        .collect()
}

/// FAQ fields are usually strings; non-zero numbers and `true` are kept as text.
fn faq_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn bad_items_are_skipped_not_fatal() {
        let items = vec![
            json!({"name": "Good", "rank": 1}),
            json!("just a string"),
            json!(42),
            json!({"name": "Also good", "courses": 17}),
        ];
        let colleges = parse_colleges(items);
        assert_eq!(colleges.len(), 2);
        assert_eq!(colleges[1].name, "Also good");
        assert!(colleges[1].courses.is_empty());
    }

    #[test]
    fn missing_or_broken_files_degrade_to_empty() {
        assert!(load_colleges(Path::new("/no/such/colleges.json")).is_empty());

        let broken = write_temp("{ this is not json");
        assert!(load_colleges(broken.path()).is_empty());

        let object = write_temp(r#"{"name": "not a list"}"#);
        assert!(load_colleges(object.path()).is_empty());
    }

    #[test]
    fn loads_colleges_from_disk() {
        let file = write_temp(r#"[{"name": "Miranda House", "city": "Delhi", "state": "Delhi", "id": 3}]"#);
        let colleges = load_colleges(file.path());
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].id, Some(3));
    }

    #[test]
    fn faq_keys_and_defaults() {
        let faqs = parse_faqs(vec![
            json!({"q": "Is hostel available?", "a": "Yes"}),
            json!({"question": "Scholarships?", "answer": "Merit based"}),
            json!({"question": "   "}),
            json!(["not", "an", "object"]),
        ]);
        assert_eq!(faqs.len(), 3);
        assert_eq!(faqs[1], FaqEntry { q: "Scholarships?".into(), a: "Merit based".into() });
        assert_eq!(faqs[2], FaqEntry { q: "Question".into(), a: "Answer not available.".into() });
    }

    #[test]
    fn faq_scalars_become_text() {
        let faqs = parse_faqs(vec![
            json!({"q": 2024, "a": 3.5}),
            json!({"q": 0, "question": "Intake?", "a": true}),
            json!({"q": null, "a": {"nested": "x"}}),
        ]);
        assert_eq!(faqs[0], FaqEntry { q: "2024".into(), a: "3.5".into() });
        assert_eq!(faqs[1], FaqEntry { q: "Intake?".into(), a: "true".into() });
        assert_eq!(faqs[2], FaqEntry { q: "Question".into(), a: "Answer not available.".into() });
    }

    #[test]
    fn replace_swaps_whole_snapshot() {
        let shared = SharedCatalog::new(Catalog::empty());
        let before = shared.snapshot();

        let record = CollegeRecord { name: "New".into(), ..Default::default() };
        shared.replace(Catalog::new(vec![record], Vec::new()));

        assert!(before.colleges().is_empty());
        assert_eq!(shared.snapshot().colleges().len(), 1);
    }
}
