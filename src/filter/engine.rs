use crate::filter::matching::{budget_matches, course_matches, location_matches, name_matches};
use crate::filter::ranking::sort_records;
use crate::model::{CollegeRecord, FilterCriteria};
use tracing::debug;

/// Trait defining the interface for narrowing the college catalog.
pub trait Filter {
    /// Records satisfying every predicate of `criteria`, ordered by `criteria.sort`.
    fn filter(&self, records: &[CollegeRecord], criteria: &FilterCriteria) -> Vec<CollegeRecord>;
    fn matches(&self, record: &CollegeRecord, criteria: &FilterCriteria) -> bool;
}

/// In-memory filter over a catalog snapshot.
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Filter for FilterEngine {
    fn filter(&self, records: &[CollegeRecord], criteria: &FilterCriteria) -> Vec<CollegeRecord> {
        let mut result: Vec<CollegeRecord> = records
            .iter()
            .filter(|record| self.matches(record, criteria))
            .cloned()
            .collect();
        sort_records(&mut result, criteria.sort);
        debug!("Filter kept {} of {} colleges", result.len(), records.len());
        result
    }

    fn matches(&self, record: &CollegeRecord, criteria: &FilterCriteria) -> bool {
        location_matches(record, criteria.location.as_deref())
            && course_matches(record, criteria.course.as_deref())
            && budget_matches(record, criteria.budget)
            && name_matches(record, criteria.query.as_deref())
    }
}
