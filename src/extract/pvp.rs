//! PvP metrics: honor level and per-bracket ratings.

use armorywatch_client::{Bracket, Payload};
use armorywatch_types::MetricRecord;
use serde_json::Value;

use super::int;

/// Rated PvP metrics for one character.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PvpMetrics {
    pub honor_level: i64,
    pub rating_2v2: i64,
    pub rating_3v3: i64,
    pub rating_rbg: i64,
    pub wins_season: i64,
}

impl PvpMetrics {
    /// Extract from the PvP summary plus one document per bracket.
    ///
    /// A bracket document without a `rating` field leaves that bracket's
    /// rating at 0 and contributes nothing to the season win count - an
    /// unrated bracket has no season statistics worth counting.
    pub fn from_documents(summary: &Payload, brackets: &[(Bracket, Payload)]) -> Self {
        let mut metrics = Self {
            honor_level: int(summary.get("honor_level")),
            ..Self::default()
        };

        for (bracket, doc) in brackets {
            let Some(rating) = doc.get("rating").and_then(Value::as_i64) else {
                continue;
            };

            metrics.wins_season += int(doc.get("season_match_statistics").and_then(|s| s.get("won")));

            match bracket {
                Bracket::TwoVsTwo => metrics.rating_2v2 = rating,
                Bracket::ThreeVsThree => metrics.rating_3v3 = rating,
                Bracket::Rbg => metrics.rating_rbg = rating,
            }
        }

        metrics
    }

    /// Write the full PvP key set into a record.
    pub fn apply(&self, record: &mut MetricRecord) {
        record.set("pvp_2v2_rating", self.rating_2v2);
        record.set("pvp_3v3_rating", self.rating_3v3);
        record.set("pvp_rbg_rating", self.rating_rbg);
        record.set("pvp_honor_level", self.honor_level);
        record.set("pvp_wins_season", self.wins_season);
    }
}
