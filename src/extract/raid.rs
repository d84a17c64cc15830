//! Raid progress metrics from the encounter tree.

use armorywatch_client::Payload;
use armorywatch_types::MetricRecord;

use super::{array, int, name_of};

/// Completed-boss counts per difficulty tier, current expansion only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaidMetrics {
    pub lfr: i64,
    pub normal: i64,
    pub heroic: i64,
    pub mythic: i64,
    pub total_kills: i64,
}

impl RaidMetrics {
    /// Walk the expansion → instance → mode → progress tree, restricted to
    /// the expansion whose name matches `current_expansion`.
    ///
    /// Difficulty names are bucketed by case-insensitive substring, checked
    /// in order: "raid finder", "normal", "heroic", "mythic". Modes whose
    /// difficulty matches none of these still count toward the total.
    pub fn from_document(encounters: &Payload, current_expansion: &str) -> Self {
        let mut metrics = Self::default();

        for expansion in array(encounters.get("expansions")) {
            let name = name_of(expansion.get("expansion")).unwrap_or_default();
            if name != current_expansion {
                continue;
            }

            for instance in array(expansion.get("instances")) {
                for mode in array(instance.get("modes")) {
                    let difficulty = name_of(mode.get("difficulty")).unwrap_or_default().to_lowercase();
                    let completed = int(mode.get("progress").and_then(|p| p.get("completed_count")));

                    if difficulty.contains("raid finder") {
                        metrics.lfr += completed;
                    } else if difficulty.contains("normal") {
                        metrics.normal += completed;
                    } else if difficulty.contains("heroic") {
                        metrics.heroic += completed;
                    } else if difficulty.contains("mythic") {
                        metrics.mythic += completed;
                    }

                    metrics.total_kills += completed;
                }
            }
        }

        metrics
    }

    /// Write the full raid key set into a record.
    pub fn apply(&self, record: &mut MetricRecord) {
        record.set("raid_progress_lfr", self.lfr);
        record.set("raid_progress_normal", self.normal);
        record.set("raid_progress_heroic", self.heroic);
        record.set("raid_progress_mythic", self.mythic);
        record.set("raid_kills_total", self.total_kills);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EXPANSION: &str = "The War Within";

    fn mode(difficulty: &str, completed: i64) -> serde_json::Value {
        json!({
            "difficulty": {"name": difficulty},
            "progress": {"completed_count": completed, "total_count": 8},
        })
    }

    fn encounters(expansion: &str, modes: Vec<serde_json::Value>) -> Payload {
        Payload::Document(json!({
            "expansions": [{
                "expansion": {"name": expansion},
                "instances": [{
                    "instance": {"name": "Nerub-ar Palace"},
                    "modes": modes,
                }],
            }],
        }))
    }

    #[test]
    fn buckets_by_difficulty_and_sums_total() {
        let doc = encounters(EXPANSION, vec![mode("Heroic", 3), mode("Mythic", 1)]);
        let metrics = RaidMetrics::from_document(&doc, EXPANSION);

        assert_eq!(metrics.heroic, 3);
        assert_eq!(metrics.mythic, 1);
        assert_eq!(metrics.lfr, 0);
        assert_eq!(metrics.normal, 0);
        assert_eq!(metrics.total_kills, 4);
    }

    #[test]
    fn difficulty_match_is_case_insensitive_substring() {
        let doc = encounters(
            EXPANSION,
            vec![mode("RAID FINDER", 2), mode("normal", 5), mode("Heroic Week 1", 1)],
        );
        let metrics = RaidMetrics::from_document(&doc, EXPANSION);

        assert_eq!(metrics.lfr, 2);
        assert_eq!(metrics.normal, 5);
        assert_eq!(metrics.heroic, 1);
        assert_eq!(metrics.total_kills, 8);
    }

    #[test]
    fn other_expansions_are_excluded_entirely() {
        let doc = Payload::Document(json!({
            "expansions": [
                {
                    "expansion": {"name": "Dragonflight"},
                    "instances": [{"modes": [mode("Mythic", 9)]}],
                },
                {
                    "expansion": {"name": EXPANSION},
                    "instances": [{"modes": [mode("Normal", 4)]}],
                },
            ],
        }));
        let metrics = RaidMetrics::from_document(&doc, EXPANSION);

        assert_eq!(metrics.mythic, 0);
        assert_eq!(metrics.normal, 4);
        assert_eq!(metrics.total_kills, 4);
    }

    #[test]
    fn counts_accumulate_across_instances() {
        let doc = Payload::Document(json!({
            "expansions": [{
                "expansion": {"name": EXPANSION},
                "instances": [
                    {"modes": [mode("Heroic", 8)]},
                    {"modes": [mode("Heroic", 5)]},
                ],
            }],
        }));
        let metrics = RaidMetrics::from_document(&doc, EXPANSION);
        assert_eq!(metrics.heroic, 13);
        assert_eq!(metrics.total_kills, 13);
    }

    #[test]
    fn unknown_difficulty_counts_only_toward_total() {
        let doc = encounters(EXPANSION, vec![mode("Timewalking", 2), mode("Heroic", 1)]);
        let metrics = RaidMetrics::from_document(&doc, EXPANSION);
        assert_eq!(metrics.heroic, 1);
        assert_eq!(metrics.total_kills, 3);
    }

    #[test]
    fn empty_document_yields_zeros() {
        let metrics = RaidMetrics::from_document(&Payload::Empty, EXPANSION);
        assert_eq!(metrics, RaidMetrics::default());

        let metrics = RaidMetrics::from_document(&Payload::Document(json!({})), EXPANSION);
        assert_eq!(metrics, RaidMetrics::default());
    }

    #[test]
    fn apply_writes_every_key() {
        let mut record = MetricRecord::new();
        RaidMetrics::default().apply(&mut record);
        for key in [
            "raid_progress_lfr",
            "raid_progress_normal",
            "raid_progress_heroic",
            "raid_progress_mythic",
            "raid_kills_total",
        ] {
            assert!(record.contains(key), "missing key {key}");
        }
    }
}
