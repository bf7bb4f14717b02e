use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque 128-bit player identifier.
///
/// Written out in the hyphenated 8-4-4-4-12 form so save files stay readable.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PlayerId(pub u128);

impl PlayerId {
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

/// Error returned when a player id string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid player id: {0:?}")]
pub struct ParsePlayerIdError(pub String);

impl FromStr for PlayerId {
    type Err = ParsePlayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 {
            return Err(ParsePlayerIdError(s.to_string()));
        }
        u128::from_str_radix(&hex, 16)
            .map(PlayerId)
            .map_err(|_| ParsePlayerIdError(s.to_string()))
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ParsePlayerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Identity of a connected player entity.
#[derive(Clone, Debug, Component)]
pub struct PlayerIdentity {
    pub id: PlayerId,
    pub name: String,
    /// Bot or simulated players. They die like everyone else and get no
    /// tombstone.
    pub fake: bool,
}

impl PlayerIdentity {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fake: false,
        }
    }

    pub fn fake(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            fake: true,
            ..Self::new(id, name)
        }
    }
}
