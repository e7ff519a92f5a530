use crate::model::{CollegeRecord, SortKey};
use crate::normalizer::min_resolvable_fee;

/// Stable sort by the requested key. Records missing the key go last and
/// equal keys keep their input order.
pub fn sort_records(records: &mut [CollegeRecord], key: SortKey) {
    match key {
        SortKey::Rank => records.sort_by_key(|r| r.rank.unwrap_or(i64::MAX)),
        SortKey::Fee => records.sort_by_cached_key(|r| min_resolvable_fee(r).unwrap_or(u64::MAX)),
        SortKey::Name => records.sort_by_cached_key(|r| r.name.to_lowercase()),
    }
}
