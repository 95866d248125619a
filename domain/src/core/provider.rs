//! Provider value object identifying an API backend

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported API providers (Value Object)
///
/// This is a domain concept naming the backends the agent engine can reach.
/// The set is closed: parsing an unknown name is a [`DomainError`], never a
/// silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    Bedrock,
    Vertex,
}

impl Provider {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Bedrock => "bedrock",
            Provider::Vertex => "vertex",
        }
    }

    /// All providers, in menu order
    pub fn all() -> [Provider; 3] {
        [Provider::Anthropic, Provider::Bedrock, Provider::Vertex]
    }

    /// Default model identifier for this provider
    pub fn default_model(&self) -> &str {
        match self {
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
            Provider::Bedrock => "anthropic.claude-3-5-sonnet-20241022-v2:0",
            Provider::Vertex => "claude-3-5-sonnet-v2@20241022",
        }
    }

    /// Check if this provider needs an API key supplied by the user
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Provider::Anthropic)
    }
}

impl Default for Provider {
    /// Returns the default provider (Anthropic)
    fn default() -> Self {
        Provider::Anthropic
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "anthropic" => Ok(Provider::Anthropic),
            "bedrock" => Ok(Provider::Bedrock),
            "vertex" => Ok(Provider::Vertex),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
