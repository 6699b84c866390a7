use serde::{Deserialize, Serialize};

use crate::model::temporal::ServiceTime;

/// a boardable moment: a trip visiting a stop at a scheduled time, with the
/// visit's sequence position so a rider can take over mid-run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub stop_id: String,
    pub time: ServiceTime,
    pub trip_id: String,
    pub sequence: usize,
}
