use crate::catalog::{Catalog, SharedCatalog};
use crate::filter::{Filter, FilterEngine};
use crate::formatter::format_list;
use crate::intent::{is_recommendation, IntentExtractor, RegexIntentExtractor};
use crate::model::{AdvisorError, CollegeRecord, FaqEntry, FilterCriteria};
use crate::suggester::prompt::{conversation_prompt, suggestion_prompt};
use crate::suggester::{Suggester, FALLBACK_REPLY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Where a reply's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Rendered from filtered catalog records.
    Catalog,
    /// The assistant's alternatives after an empty filter result.
    Suggestion,
    /// The assistant's answer to a general question.
    Assistant,
    /// Fixed text substituted for a failed assistant call.
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub records: Vec<CollegeRecord>,
    pub text: String,
    pub source: ReplySource,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub source: ReplySource,
    pub language: String,
    /// Criteria used when the message was routed through the filter.
    pub criteria: Option<FilterCriteria>,
    pub matches: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub assistant_configured: bool,
    pub colleges_loaded: usize,
    pub faqs_loaded: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Data files re-read by `Advisor::reload`.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub colleges_path: PathBuf,
    pub faq_path: PathBuf,
}

pub struct Advisor {
    catalog: SharedCatalog,
    filter: FilterEngine,
    extractor: Box<dyn IntentExtractor>,
    suggester: Arc<dyn Suggester>,
    sources: Option<CatalogSources>,
    top_limit: usize,
}

impl Advisor {
    pub fn new(catalog: Catalog, suggester: Arc<dyn Suggester>) -> Self {
        Self {
            catalog: SharedCatalog::new(catalog),
            filter: FilterEngine::new(),
            extractor: Box::new(RegexIntentExtractor::new()),
            suggester,
            sources: None,
            top_limit: 20,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn IntentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_sources(mut self, sources: CatalogSources) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_top_limit(mut self, top_limit: usize) -> Self {
        self.top_limit = top_limit;
        self
    }

    pub fn top_limit(&self) -> usize {
        self.top_limit
    }

    /// The first `n` colleges in load order.
    pub fn list_top(&self, n: usize) -> Vec<CollegeRecord> {
        self.catalog.snapshot().colleges().iter().take(n).cloned().collect()
    }

    /// Filters and ranks the catalog. An empty result is handed to the
    /// assistant for alternatives instead of being reported as an error.
    pub async fn search(&self, criteria: &FilterCriteria) -> SearchOutcome {
        self.search_with(criteria, "", "en").await
    }

    async fn search_with(&self, criteria: &FilterCriteria, message: &str, language: &str) -> SearchOutcome {
        let snapshot = self.catalog.snapshot();
        let records = self.filter.filter(snapshot.colleges(), criteria);
        info!("🔍 Search {:?} matched {} colleges", criteria, records.len());

        if !records.is_empty() {
            let text = format_list(&records);
            return SearchOutcome {
                records,
                text,
                source: ReplySource::Catalog,
            };
        }

        let prompt = suggestion_prompt(snapshot.colleges(), criteria, message, language);
        let (text, source) = self.ask(&prompt, ReplySource::Suggestion).await;
        SearchOutcome {
            records,
            text,
            source,
        }
    }

    /// Answers one chat message, either from the catalog or via the assistant.
    pub async fn chat(&self, message: &str, explicit_language: Option<&str>) -> Result<ChatReply, AdvisorError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AdvisorError::EmptyQuery);
        }

        let intent = self.extractor.extract(message, explicit_language);
        if is_recommendation(message, &intent) {
            let criteria = intent.criteria();
            let outcome = self.search_with(&criteria, message, &intent.language).await;
            return Ok(ChatReply {
                response: outcome.text,
                source: outcome.source,
                language: intent.language,
                criteria: Some(criteria),
                matches: outcome.records.len(),
            });
        }

        let snapshot = self.catalog.snapshot();
        let prompt = conversation_prompt(snapshot.colleges(), message, &intent.language);
        let (response, source) = self.ask(&prompt, ReplySource::Assistant).await;
        Ok(ChatReply {
            response,
            source,
            language: intent.language,
            criteria: None,
            matches: 0,
        })
    }

    /// Looks a college up by `id`, falling back to its 0-based position
    /// when no record carries that id.
    pub fn college(&self, id: i64) -> Result<CollegeRecord, AdvisorError> {
        let snapshot = self.catalog.snapshot();
        let colleges = snapshot.colleges();
        colleges
            .iter()
            .find(|c| c.id == Some(id))
            .or_else(|| usize::try_from(id).ok().and_then(|index| colleges.get(index)))
            .cloned()
            .ok_or(AdvisorError::NotFound(id))
    }

    pub fn faqs(&self) -> Vec<FaqEntry> {
        self.catalog.snapshot().faqs().to_vec()
    }

    pub fn health(&self) -> HealthStatus {
        let snapshot = self.catalog.snapshot();
        HealthStatus {
            ok: true,
            assistant_configured: self.suggester.is_configured(),
            colleges_loaded: snapshot.colleges().len(),
            faqs_loaded: snapshot.faqs().len(),
            loaded_at: snapshot.loaded_at(),
        }
    }

    /// Re-reads the data files and swaps in the new snapshot.
    pub fn reload(&self) -> Result<usize, AdvisorError> {
        let sources = self.sources.as_ref().ok_or(AdvisorError::ReloadUnavailable)?;
        let catalog = Catalog::load(&sources.colleges_path, &sources.faq_path);
        let count = catalog.colleges().len();
        self.catalog.replace(catalog);
        info!("🔄 Catalog reloaded: {} colleges", count);
        Ok(count)
    }

    async fn ask(&self, prompt: &str, on_success: ReplySource) -> (String, ReplySource) {
        match self.suggester.suggest(prompt).await {
            Ok(text) if !text.trim().is_empty() => (text, on_success),
            Ok(_) => {
                warn!("Assistant returned an empty answer, using fallback");
                (FALLBACK_REPLY.to_string(), ReplySource::Fallback)
            }
            Err(e) => {
                warn!("Assistant unavailable ({}), using fallback", e);
                (FALLBACK_REPLY.to_string(), ReplySource::Fallback)
            }
        }
    }
}
