//! Mythic+ metrics from the keystone profile and season documents.

use armorywatch_client::Payload;
use armorywatch_types::MetricRecord;
use serde_json::Value;

use super::{array, int};

/// Score awarded per keystone level for a timed run.
const TIMED_RUN_FACTOR: i64 = 125;
/// Score awarded per keystone level for an untimed completion.
const UNTIMED_RUN_FACTOR: i64 = 100;

/// Mythic+ season and weekly metrics for one character.
///
/// The score is a simplified approximation of the in-game rating formula:
/// `keystone_level × (125 if timed else 100)`, summed over the season's
/// best runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MythicPlusMetrics {
    pub score: i64,
    pub best_run: i64,
    pub runs_completed: i64,
    pub runs_timed: i64,
    pub weekly_best: i64,
}

impl MythicPlusMetrics {
    /// Extract from the keystone profile (current period) and one season's
    /// document.
    ///
    /// The weekly best comes from the profile's `current_period.best_runs`
    /// and is independent of the season data.
    pub fn from_documents(profile: &Payload, season: &Payload) -> Self {
        let mut metrics = Self::default();

        let best_runs = array(season.get("best_runs"));
        for run in best_runs {
            let level = int(run.get("keystone_level"));
            let timed = run
                .get("is_completed_within_time")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            metrics.best_run = metrics.best_run.max(level);
            metrics.runs_completed += 1;
            if timed {
                metrics.runs_timed += 1;
            }
            metrics.score += level * if timed { TIMED_RUN_FACTOR } else { UNTIMED_RUN_FACTOR };
        }

        let weekly_runs = array(profile.get("current_period").and_then(|p| p.get("best_runs")));
        metrics.weekly_best = weekly_runs
            .iter()
            .map(|run| int(run.get("keystone_level")))
            .max()
            .unwrap_or(0);

        metrics
    }

    /// Write the full Mythic+ key set into a record.
    pub fn apply(&self, record: &mut MetricRecord) {
        record.set("mythicplus_score", self.score);
        record.set("mythicplus_best_run", self.best_run);
        record.set("mythicplus_runs_completed", self.runs_completed);
        record.set("mythicplus_runs_timed", self.runs_timed);
        record.set("mythicplus_weekly_best", self.weekly_best);
    }
}
