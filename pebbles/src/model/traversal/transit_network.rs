use std::sync::Arc;

use super::entry_point::EntryPoint;
use super::traversal_error::TraversalError;
use super::trip::Trip;
use crate::model::temporal::ServiceTime;

/// schedule lookup collaborator. loaded once per run and read-only
/// thereafter; implementations must be shareable across search tasks.
pub trait TransitNetwork: Send + Sync {
    /// boardable moments at `stop` with `from <= time <= to`, ascending by
    /// (time, trip, sequence). callers pass an already-oriented window.
    fn entry_points(
        &self,
        stop: &str,
        from: &ServiceTime,
        to: &ServiceTime,
    ) -> Result<Vec<EntryPoint>, TraversalError>;

    fn trip(&self, trip_id: &str) -> Option<Arc<Trip>>;
}
