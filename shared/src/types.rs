//! Common types used across the platform

use serde::{Deserialize, Deserializer, Serialize};

/// Key under which the last selected farm id is persisted
pub const SELECTED_FARM_KEY: &str = "selectedFarmId";

/// Opaque farm identifier
///
/// Record stores hand out either integer or string ids. Both are accepted on
/// input and kept in their string form, which is also what gets persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FarmId(String);

impl FarmId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FarmId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => FarmId(text),
            RawId::Number(number) => FarmId(number.to_string()),
        })
    }
}

impl std::fmt::Display for FarmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FarmId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FarmId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for FarmId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
