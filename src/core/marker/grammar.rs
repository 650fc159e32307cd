//! Argument schema for `+rbac:` markers.

use std::fmt;

/// Default marker prefix.
pub const DEFAULT_PREFIX: &str = "+rbac:";

/// Argument keys a marker line may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArgumentKey {
    Groups,
    Resources,
    ResourceNames,
    Verbs,
    Urls,
}

impl ArgumentKey {
    pub const ALL: [ArgumentKey; 5] = [
        ArgumentKey::Groups,
        ArgumentKey::Resources,
        ArgumentKey::ResourceNames,
        ArgumentKey::Verbs,
        ArgumentKey::Urls,
    ];

    /// Parse a key exactly as written in a marker (case-sensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "groups" => Some(Self::Groups),
            "resources" => Some(Self::Resources),
            "resourceNames" => Some(Self::ResourceNames),
            "verbs" => Some(Self::Verbs),
            "urls" => Some(Self::Urls),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Resources => "resources",
            Self::ResourceNames => "resourceNames",
            Self::Verbs => "verbs",
            Self::Urls => "urls",
        }
    }

    /// Keys that only make sense on a resource rule.
    pub fn is_resource_only(&self) -> bool {
        matches!(
            self,
            Self::Groups | Self::Resources | Self::ResourceNames
        )
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recognized marker prefix together with the argument keys it accepts.
///
/// Built once per run from [`Config`](crate::config::Config) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSchema {
    prefix: String,
    arguments: Vec<ArgumentKey>,
}

impl MarkerSchema {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            arguments: ArgumentKey::ALL.to_vec(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn arguments(&self) -> &[ArgumentKey] {
        &self.arguments
    }

    /// Resolve a key, returning `None` when it is not part of this schema.
    pub fn argument(&self, key: &str) -> Option<ArgumentKey> {
        ArgumentKey::parse(key).filter(|k| self.arguments.contains(k))
    }
}

impl Default for MarkerSchema {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
