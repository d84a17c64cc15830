//! API regions and their endpoint/locale tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A Battle.net API region.
///
/// Each region has its own data host, token endpoint, and default locale.
/// The CN region routes through distinct gateway hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Americas.
    #[default]
    Us,
    /// Europe.
    Eu,
    /// Korea.
    Kr,
    /// Taiwan.
    Tw,
    /// China.
    Cn,
}

impl Region {
    /// Base URL of the region's data API.
    pub fn api_url(&self) -> &'static str {
        match self {
            Region::Us => "https://us.api.blizzard.com",
            Region::Eu => "https://eu.api.blizzard.com",
            Region::Kr => "https://kr.api.blizzard.com",
            Region::Tw => "https://tw.api.blizzard.com",
            Region::Cn => "https://gateway.battlenet.com.cn",
        }
    }

    /// URL of the region's OAuth2 token endpoint.
    pub fn token_url(&self) -> &'static str {
        match self {
            Region::Us => "https://us.battle.net/oauth/token",
            Region::Eu => "https://eu.battle.net/oauth/token",
            Region::Kr => "https://kr.battle.net/oauth/token",
            Region::Tw => "https://tw.battle.net/oauth/token",
            Region::Cn => "https://www.battlenet.com.cn/oauth/token",
        }
    }

    /// Default locale sent with every request.
    pub fn locale(&self) -> &'static str {
        match self {
            Region::Us => "en_US",
            Region::Eu => "en_GB",
            Region::Kr => "ko_KR",
            Region::Tw => "zh_TW",
            Region::Cn => "zh_CN",
        }
    }

    /// Region code as it appears in namespace parameters (`profile-eu`).
    pub fn code(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Kr => "kr",
            Region::Tw => "tw",
            Region::Cn => "cn",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "kr" => Ok(Region::Kr),
            "tw" => Ok(Region::Tw),
            "cn" => Ok(Region::Cn),
            other => Err(format!("unknown region '{}'", other)),
        }
    }
}

/// An API namespace partition: resource family crossed with region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Character-scoped resources (`profile-<region>`).
    Profile,
    /// Realm and live game data (`dynamic-<region>`).
    Dynamic,
    /// Static game data (`static-<region>`).
    Static,
}

impl Namespace {
    /// The namespace query parameter value for a region.
    pub fn param(&self, region: Region) -> String {
        let family = match self {
            Namespace::Profile => "profile",
            Namespace::Dynamic => "dynamic",
            Namespace::Static => "static",
        };
        format!("{}-{}", family, region.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_endpoints() {
        assert_eq!(Region::Us.api_url(), "https://us.api.blizzard.com");
        assert_eq!(Region::Eu.token_url(), "https://eu.battle.net/oauth/token");
        // CN routes through its own gateway hosts
        assert_eq!(Region::Cn.api_url(), "https://gateway.battlenet.com.cn");
        assert_eq!(Region::Cn.token_url(), "https://www.battlenet.com.cn/oauth/token");
    }

    #[test]
    fn region_locales() {
        assert_eq!(Region::Us.locale(), "en_US");
        assert_eq!(Region::Eu.locale(), "en_GB");
        assert_eq!(Region::Kr.locale(), "ko_KR");
        assert_eq!(Region::Tw.locale(), "zh_TW");
        assert_eq!(Region::Cn.locale(), "zh_CN");
    }

    #[test]
    fn region_from_str_is_case_insensitive() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert!("moon".parse::<Region>().is_err());
    }

    #[test]
    fn region_display_roundtrip() {
        for region in [Region::Us, Region::Eu, Region::Kr, Region::Tw, Region::Cn] {
            assert_eq!(region.to_string().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn namespace_params() {
        assert_eq!(Namespace::Profile.param(Region::Us), "profile-us");
        assert_eq!(Namespace::Dynamic.param(Region::Eu), "dynamic-eu");
        assert_eq!(Namespace::Static.param(Region::Kr), "static-kr");
    }

    #[test]
    fn region_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Region::Eu).unwrap(), "\"eu\"");
        let parsed: Region = serde_json::from_str("\"tw\"").unwrap();
        assert_eq!(parsed, Region::Tw);
    }
}
