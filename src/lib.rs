//! EduGuide
//!
//! Browse a static college catalog, filter it by location, course and
//! budget, and chat with an assistant that answers from the catalog or
//! forwards the question to a generative model.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod console;
pub mod filter;
pub mod formatter;
pub mod intent;
pub mod model;
pub mod normalizer;
pub mod suggester;

pub use advisor::{Advisor, ChatReply, ReplySource, SearchOutcome};
pub use model::{CollegeRecord, FeeValue, FilterCriteria, SortKey};
