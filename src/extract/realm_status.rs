//! Realm status metrics from the realm and connected-realm documents.

use armorywatch_client::Payload;
use armorywatch_types::MetricRecord;
use serde_json::Value;

use super::{int, name_of, text};

/// Server status metrics for one realm.
///
/// Status, population, and queue live on the connected-realm document;
/// timezone and locale on the realm document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RealmMetrics {
    pub status: String,
    pub population: String,
    pub queue_time: i64,
    pub timezone: String,
    pub locale: String,
}

impl Default for RealmMetrics {
    fn default() -> Self {
        Self {
            status: "Unknown".to_string(),
            population: "Unknown".to_string(),
            queue_time: 0,
            timezone: "Unknown".to_string(),
            locale: "Unknown".to_string(),
        }
    }
}

impl RealmMetrics {
    /// Extract from the realm info and connected-realm documents.
    pub fn from_documents(realm_info: &Payload, connected_realm: &Payload) -> Self {
        let mut metrics = Self::default();

        if let Some(status) = name_of(connected_realm.get("status")) {
            metrics.status = status;
        }
        if let Some(population) = name_of(connected_realm.get("population")) {
            metrics.population = population;
        }
        // Queue information is rarely present at all
        let has_queue = connected_realm
            .get("has_queue")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if has_queue {
            metrics.queue_time = int(connected_realm.get("queue_time"));
        }

        if let Some(timezone) = text(realm_info.get("timezone")) {
            metrics.timezone = timezone;
        }
        if let Some(locale) = text(realm_info.get("locale")) {
            metrics.locale = locale;
        }

        metrics
    }

    /// Write the full server key set into a record.
    pub fn apply(&self, record: &mut MetricRecord) {
        record.set("realm_status", self.status.clone());
        record.set("realm_population", self.population.clone());
        record.set("realm_queue", self.queue_time);
        record.set("realm_timezone", self.timezone.clone());
        record.set("realm_locale", self.locale.clone());
    }
}
