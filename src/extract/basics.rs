//! Always-on character metrics: profile, equipment, achievements.

use armorywatch_client::Payload;
use armorywatch_types::MetricRecord;
use serde_json::Value;

use super::{array, int, name_of};

/// One gold is 10,000 copper; the API reports raw copper.
const COPPER_PER_GOLD: i64 = 10_000;

/// Basic character metrics plus the descriptive attributes display
/// bindings read alongside every sensor (class, race, realm, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterMetrics {
    pub level: i64,
    pub item_level: i64,
    pub gold: i64,
    pub achievement_points: i64,
    pub guild_name: String,
    pub class_name: String,
    pub race: String,
    pub faction: String,
    pub gender: String,
    pub active_spec: String,
    pub realm_name: String,
    pub last_login_ms: i64,
}

impl CharacterMetrics {
    /// Extract from the profile, equipment, and achievements documents.
    pub fn from_documents(profile: &Payload, equipment: &Payload, achievements: &Payload) -> Self {
        Self {
            level: int(profile.get("level")),
            item_level: average_item_level(equipment),
            gold: int(profile.get("money")) / COPPER_PER_GOLD,
            achievement_points: int(achievements.get("total_points")),
            guild_name: name_of(profile.get("guild")).unwrap_or_default(),
            class_name: name_of(profile.get("character_class")).unwrap_or_default(),
            race: name_of(profile.get("race")).unwrap_or_default(),
            faction: name_of(profile.get("faction")).unwrap_or_default(),
            gender: name_of(profile.get("gender")).unwrap_or_default(),
            active_spec: name_of(profile.get("active_spec")).unwrap_or_default(),
            realm_name: name_of(profile.get("realm")).unwrap_or_default(),
            last_login_ms: int(profile.get("last_login_timestamp")),
        }
    }

    /// Write the full basic key set into a record.
    pub fn apply(&self, record: &mut MetricRecord) {
        record.set("character_level", self.level);
        record.set("character_item_level", self.item_level);
        record.set("character_money", self.gold);
        record.set("achievement_points", self.achievement_points);
        record.set("guild_name", self.guild_name.clone());
        record.set("character_class", self.class_name.clone());
        record.set("character_race", self.race.clone());
        record.set("faction", self.faction.clone());
        record.set("gender", self.gender.clone());
        record.set("spec", self.active_spec.clone());
        record.set("realm", self.realm_name.clone());
        record.set("last_login_timestamp", self.last_login_ms);
    }
}

/// Average `item_level` across equipped items that carry one.
///
/// Items without an item level (tabards, shirts) are excluded from both
/// numerator and denominator. Zero qualifying items yields 0.
fn average_item_level(equipment: &Payload) -> i64 {
    let levels: Vec<i64> = array(equipment.get("equipped_items"))
        .iter()
        .filter_map(|item| item.get("item_level").and_then(Value::as_i64))
        .collect();

    if levels.is_empty() {
        return 0;
    }
    let total: i64 = levels.iter().sum();
    (total as f64 / levels.len() as f64).round() as i64
}
