use serde::{Deserialize, Serialize};
use std::fmt;

/// Glosses that ship with an animation clip.
pub const DEFAULT_GLOSSES: [&str; 8] = [
    "hello",
    "clap",
    "point",
    "yes",
    "no",
    "good",
    "acknowledge",
    "think",
];

/// Label of a single sign. Any string is accepted; names without a clip
/// play the procedural fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossName(String);

impl GlossName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlossName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlossName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GlossName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
