//! Runtime configuration for the poller.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use armorywatch_client::Region;
use armorywatch_types::{Features, TrackedCharacter};

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_courtesy_delay_ms() -> u64 {
    100
}

fn default_season_id() -> u32 {
    12
}

fn default_expansion() -> String {
    "The War Within".to_string()
}

/// Everything the poller needs: credentials, region, the tracked character
/// list, feature flags, and timing knobs.
///
/// Loaded from a config file (TOML or YAML) merged with `ARMORYWATCH_*`
/// environment overrides.
///
/// ```toml
/// client_id = "..."
/// client_secret = "..."
/// region = "eu"
/// poll_interval_secs = 300
///
/// [[characters]]
/// realm = "Twisting Nether"
/// name = "Grommash"
///
/// [features]
/// pvp = true
/// raids = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// OAuth2 client id from the developer portal.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// API region (default: us).
    #[serde(default)]
    pub region: Region,
    /// Characters to track.
    pub characters: Vec<TrackedCharacter>,
    /// Feature category toggles (default: all enabled).
    #[serde(default)]
    pub features: Features,
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Courtesy spacing between successive entity fetch groups.
    #[serde(default = "default_courtesy_delay_ms")]
    pub courtesy_delay_ms: u64,
    /// Mythic+ season to query. Bump when a new season starts.
    #[serde(default = "default_season_id")]
    pub season_id: u32,
    /// Expansion name the raid progress walk is restricted to.
    #[serde(default = "default_expansion")]
    pub current_expansion: String,
}

impl PollerConfig {
    /// Load and validate configuration from a file, with `ARMORYWATCH_*`
    /// environment variables taking precedence.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("ARMORYWATCH"))
            .build()
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: PollerConfig = settings
            .try_deserialize()
            .context("config file has an unexpected shape")?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that deserialization cannot express.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.client_id.is_empty(), "client_id must not be empty");
        ensure!(!self.client_secret.is_empty(), "client_secret must not be empty");
        ensure!(!self.characters.is_empty(), "at least one character must be configured");
        Ok(())
    }

    /// The distinct realms referenced by tracked characters, in first-seen
    /// order. Realms have no independent lifecycle.
    pub fn realms(&self) -> Vec<String> {
        let mut realms: Vec<String> = Vec::new();
        for character in &self.characters {
            if !realms.contains(&character.realm) {
                realms.push(character.realm.clone());
            }
        }
        realms
    }

    /// Seconds between poll cycles, as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Courtesy delay between entity fetch groups, as a `Duration`.
    pub fn courtesy_delay(&self) -> Duration {
        Duration::from_millis(self.courtesy_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn minimal() -> PollerConfig {
        PollerConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            region: Region::Us,
            characters: vec![TrackedCharacter::new("durotan", "thrall")],
            features: Features::default(),
            poll_interval_secs: default_poll_interval_secs(),
            courtesy_delay_ms: default_courtesy_delay_ms(),
            season_id: default_season_id(),
            current_expansion: default_expansion(),
        }
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
client_id = "abc"
client_secret = "xyz"
region = "eu"
poll_interval_secs = 60

[[characters]]
realm = "Twisting Nether"
name = "Grommash"

[[characters]]
realm = "Twisting Nether"
name = "Durotan"

[features]
mythic_plus = false
"#
        )
        .unwrap();

        let config = PollerConfig::load(file.path()).unwrap();
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.region, Region::Eu);
        assert_eq!(config.characters.len(), 2);
        assert_eq!(config.poll_interval_secs, 60);
        assert!(!config.features.mythic_plus);
        // Unset flags keep their default
        assert!(config.features.pvp);
        // Unset knobs keep theirs
        assert_eq!(config.courtesy_delay_ms, 100);
        assert_eq!(config.current_expansion, "The War Within");
    }

    #[test]
    fn load_rejects_empty_character_list() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
client_id = "abc"
client_secret = "xyz"
characters = []
"#
        )
        .unwrap();

        let err = PollerConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("at least one character"));
    }

    #[test]
    fn validate_rejects_blank_credentials() {
        let mut config = minimal();
        config.client_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn realms_are_distinct_in_first_seen_order() {
        let mut config = minimal();
        config.characters = vec![
            TrackedCharacter::new("durotan", "thrall"),
            TrackedCharacter::new("stormrage", "malfurion"),
            TrackedCharacter::new("durotan", "jaina"),
        ];
        assert_eq!(config.realms(), vec!["durotan", "stormrage"]);
    }

    #[test]
    fn durations_convert() {
        let config = minimal();
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.courtesy_delay(), Duration::from_millis(100));
    }
}
