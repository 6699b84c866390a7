use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::search::SearchOutcome;
use crate::model::temporal::ServiceTime;

/// the scored result of one search task, ready for downstream statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRow {
    pub center_id: String,
    pub start: ServiceTime,
    pub cutoff: ServiceTime,
    /// every location the winning paths reached, sectors included.
    pub reached_locations: usize,
    /// the isochrone score: distinct sectors reached within the budget.
    pub reached_sectors: usize,
    /// ids of the reached sectors, sorted.
    pub sector_ids: Vec<String>,
}

impl ScoreRow {
    pub(crate) fn from_outcome(outcome: &SearchOutcome) -> ScoreRow {
        let sector_ids: Vec<String> = outcome
            .reached_sector_ids()
            .into_iter()
            .map(str::to_string)
            .collect();
        ScoreRow {
            center_id: outcome.center_id().to_string(),
            start: outcome.start(),
            cutoff: outcome.cutoff(),
            reached_locations: outcome.len(),
            reached_sectors: sector_ids.len(),
            sector_ids,
        }
    }
}

/// everything a score run produced: the service day it describes, one row
/// per completed task, and the count of tasks that failed and were skipped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreReport {
    service_date: NaiveDate,
    rows: Vec<ScoreRow>,
    failed_tasks: usize,
}

impl ScoreReport {
    pub(crate) fn new(
        service_date: NaiveDate,
        rows: Vec<ScoreRow>,
        failed_tasks: usize,
    ) -> ScoreReport {
        ScoreReport {
            service_date,
            rows,
            failed_tasks,
        }
    }

    /// the service day of the schedule these rows were scored against.
    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    /// rows in task order, one per completed task.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn failed_tasks(&self) -> usize {
        self.failed_tasks
    }

    /// per-sector fold: how many tasks reached each sector. sectors no task
    /// reached are absent.
    pub fn sector_reach_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            for sector_id in &row.sector_ids {
                *counts.entry(sector_id.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}
