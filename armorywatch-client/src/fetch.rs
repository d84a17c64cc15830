//! Resource fetchers: one narrow method per remote resource.
//!
//! Each fetcher is a pure mapping from (realm, name, parameters) to an
//! endpoint path and namespace, delegated to the gateway. No retries or
//! interpretation happen here.

use std::fmt;

use tracing::warn;

use crate::{realm_slug, ArmoryClient, ClientError, Namespace, Payload};

/// A rated PvP bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// 2v2 arena.
    TwoVsTwo,
    /// 3v3 arena.
    ThreeVsThree,
    /// Rated battlegrounds.
    Rbg,
}

impl Bracket {
    /// All rated brackets, in fetch order.
    pub const ALL: [Bracket; 3] = [Bracket::TwoVsTwo, Bracket::ThreeVsThree, Bracket::Rbg];

    /// The bracket's path segment in the API.
    pub fn api_path(&self) -> &'static str {
        match self {
            Bracket::TwoVsTwo => "2v2",
            Bracket::ThreeVsThree => "3v3",
            Bracket::Rbg => "rbg",
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

impl ArmoryClient {
    /// Fetch a character's profile document.
    pub async fn character_profile(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!("/profile/wow/character/{}/{}", realm_slug(realm), name.to_lowercase());
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's equipped items.
    pub async fn character_equipment(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/equipment",
            realm_slug(realm),
            name.to_lowercase()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's achievement summary.
    pub async fn character_achievements(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/achievements",
            realm_slug(realm),
            name.to_lowercase()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's PvP summary (honor level, overall stats).
    pub async fn pvp_summary(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/pvp-summary",
            realm_slug(realm),
            name.to_lowercase()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's rating document for one PvP bracket.
    pub async fn pvp_bracket(&self, realm: &str, name: &str, bracket: Bracket) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/pvp-bracket/{}",
            realm_slug(realm),
            name.to_lowercase(),
            bracket.api_path()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's raid encounter tree.
    pub async fn raid_encounters(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/encounters/raids",
            realm_slug(realm),
            name.to_lowercase()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's Mythic+ keystone profile (current period data).
    pub async fn mythic_keystone_profile(&self, realm: &str, name: &str) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/mythic-keystone-profile",
            realm_slug(realm),
            name.to_lowercase()
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a character's Mythic+ data for one season.
    pub async fn mythic_keystone_season(
        &self,
        realm: &str,
        name: &str,
        season_id: u32,
    ) -> Result<Payload, ClientError> {
        let endpoint = format!(
            "/profile/wow/character/{}/{}/mythic-keystone-profile/season/{}",
            realm_slug(realm),
            name.to_lowercase(),
            season_id
        );
        self.request(&endpoint, Namespace::Profile).await
    }

    /// Fetch a realm's info document (contains the connected-realm link).
    pub async fn realm_info(&self, realm: &str) -> Result<Payload, ClientError> {
        let endpoint = format!("/data/wow/realm/{}", realm_slug(realm));
        self.request(&endpoint, Namespace::Dynamic).await
    }

    /// Fetch a connected realm by id (live status, population, queue).
    pub async fn connected_realm(&self, id: u64) -> Result<Payload, ClientError> {
        let endpoint = format!("/data/wow/connected-realm/{}", id);
        self.request(&endpoint, Namespace::Dynamic).await
    }

    /// Fetch the index of all realms in the region.
    pub async fn realm_index(&self) -> Result<Payload, ClientError> {
        self.request("/data/wow/realm/index", Namespace::Dynamic).await
    }

    /// Verify that the configured credentials can reach the API.
    ///
    /// Performs the token exchange and a realm index fetch; an empty index
    /// means the credentials are unusable even though the exchange itself
    /// may have succeeded. Fatal to setup when it fails.
    pub async fn validate_connection(&self) -> Result<(), ClientError> {
        self.get_token().await?;

        let index = self.realm_index().await?;
        match index.get("realms").and_then(|realms| realms.as_array()) {
            Some(realms) if !realms.is_empty() => Ok(()),
            _ => Err(ClientError::Connection(
                "unable to fetch realm index - API credentials may be invalid".to_string(),
            )),
        }
    }

    /// Check that a character exists on a realm.
    pub async fn validate_character(&self, realm: &str, name: &str) -> Result<bool, ClientError> {
        let profile = self.character_profile(realm, name).await?;
        let exists = profile.get("name").is_some();
        if !exists {
            warn!(realm, name, "character not found during validation");
        }
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_api_paths() {
        assert_eq!(Bracket::TwoVsTwo.api_path(), "2v2");
        assert_eq!(Bracket::ThreeVsThree.api_path(), "3v3");
        assert_eq!(Bracket::Rbg.api_path(), "rbg");
    }

    #[test]
    fn bracket_all_covers_every_bracket() {
        assert_eq!(Bracket::ALL.len(), 3);
        assert_eq!(Bracket::ALL[0], Bracket::TwoVsTwo);
        assert_eq!(Bracket::ALL[2], Bracket::Rbg);
    }

    #[test]
    fn bracket_display_matches_api_path() {
        assert_eq!(Bracket::ThreeVsThree.to_string(), "3v3");
    }
}
