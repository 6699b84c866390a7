mod search_engine;
mod search_error;
mod search_outcome;
mod search_task;

pub use search_engine::SearchEngine;
pub use search_error::SearchError;
pub use search_outcome::{SearchArrival, SearchOutcome};
pub use search_task::SearchTask;
