//! Tracked entities and feature selection.

use std::fmt;

/// A character tracked by the poller, identified by (realm, name).
///
/// Created at configuration time and immutable thereafter; the whole
/// tracked set is replaced on reconfiguration rather than edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedCharacter {
    /// Realm the character lives on, as entered in configuration.
    pub realm: String,
    /// Character name, as entered in configuration.
    pub name: String,
}

impl TrackedCharacter {
    /// Create a tracked character.
    pub fn new(realm: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            name: name.into(),
        }
    }

    /// The snapshot map key for this character: `"{realm}-{name}"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.realm, self.name)
    }
}

impl fmt::Display for TrackedCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.realm)
    }
}

/// Feature categories that can be toggled per configuration.
///
/// Character basics (profile, equipment, achievements) are always polled;
/// these flags gate the optional categories. Each enabled category
/// contributes its full metric key set to every tracked character's record,
/// zero-defaulted on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Features {
    /// Poll realm/connected-realm status for every distinct tracked realm.
    pub server_status: bool,
    /// Poll the PvP summary and the 2v2/3v3/RBG brackets.
    pub pvp: bool,
    /// Poll raid encounter progress.
    pub raids: bool,
    /// Poll the Mythic+ keystone profile and season data.
    pub mythic_plus: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            server_status: true,
            pvp: true,
            raids: true,
            mythic_plus: true,
        }
    }
}

impl Features {
    /// All categories enabled.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the always-on character basics; every optional category off.
    pub fn none() -> Self {
        Self {
            server_status: false,
            pvp: false,
            raids: false,
            mythic_plus: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_key_joins_realm_and_name() {
        let character = TrackedCharacter::new("durotan", "thrall");
        assert_eq!(character.key(), "durotan-thrall");
        assert_eq!(character.to_string(), "thrall-durotan");
    }

    #[test]
    fn features_default_all_enabled() {
        let features = Features::default();
        assert!(features.server_status);
        assert!(features.pvp);
        assert!(features.raids);
        assert!(features.mythic_plus);
        assert_eq!(features, Features::all());
    }

    #[test]
    fn features_none_disables_everything() {
        let features = Features::none();
        assert!(!features.server_status);
        assert!(!features.pvp);
        assert!(!features.raids);
        assert!(!features.mythic_plus);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn features_deserialize_with_partial_fields() {
        // Omitted flags fall back to the enabled default
        let features: Features = serde_json::from_str(r#"{"pvp": false}"#).unwrap();
        assert!(!features.pvp);
        assert!(features.server_status);
        assert!(features.raids);
        assert!(features.mythic_plus);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tracked_character_deserializes() {
        let character: TrackedCharacter =
            serde_json::from_str(r#"{"realm": "Twisting Nether", "name": "Grommash"}"#).unwrap();
        assert_eq!(character.realm, "Twisting Nether");
        assert_eq!(character.name, "Grommash");
    }
}
