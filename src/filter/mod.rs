// Filter module: predicates, ranking and the engine combining them.

pub mod engine;
pub mod matching;
pub mod ranking;

pub use engine::{Filter, FilterEngine};
pub use ranking::sort_records;
