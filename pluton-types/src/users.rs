use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Group a player belongs to in the server's permission list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGroup {
    #[default]
    None,
    Moderator,
    Owner,
    Banned,
}

impl UserGroup {
    /// Connection auth level granted to members of this group.
    #[must_use]
    pub const fn auth_level(&self) -> u8 {
        match self {
            Self::Owner => 2,
            Self::Moderator => 1,
            Self::None | Self::Banned => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Moderator => "moderator",
            Self::Owner => "owner",
            Self::Banned => "banned",
        }
    }
}

impl fmt::Display for UserGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "moderator" => Ok(Self::Moderator),
            "owner" => Ok(Self::Owner),
            "banned" => Ok(Self::Banned),
            other => Err(Error::UnknownUserGroup(other.to_string())),
        }
    }
}
