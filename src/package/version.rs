use crate::error::{Result, VckError};
use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static RELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^v?(\d+(?:\.\d+)*)(?:[._-]?(stable|rc|beta|b|alpha|a|patch|pl|p|dev)(?:[._-]?(\d+))?)?(?:\+[0-9a-z.-]+)?$",
    )
    .expect("release pattern is a valid regex")
});

/// Stand-in for a wildcard part of a branch alias such as `2.0.x-dev`.
const WILDCARD_PART: &str = "9999999";

/// Release maturity tier, ordered from least to most stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Dev,
    Alpha,
    Beta,
    #[serde(alias = "RC")]
    Rc,
    Stable,
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stability::Dev => "dev",
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::Rc => "rc",
            Stability::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Suffix attached to a numeric release. Declaration order is sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modifier {
    Dev,
    Alpha,
    Beta,
    Rc,
    Stable,
    Patch,
}

impl Modifier {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "dev" => Modifier::Dev,
            "a" | "alpha" => Modifier::Alpha,
            "b" | "beta" => Modifier::Beta,
            "rc" => Modifier::Rc,
            "p" | "pl" | "patch" => Modifier::Patch,
            _ => Modifier::Stable,
        }
    }
}

/// Version representation supporting numeric releases and dev branches
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    pub parsed: VersionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionType {
    Release {
        parts: Vec<u64>,
        modifier: Modifier,
        number: u64,
    },
    /// `dev-<name>` branch; never ordered against anything but itself.
    Branch(String),
}

impl Version {
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();

        let parsed = if let Some(branch) = trimmed.strip_prefix("dev-") {
            if branch.is_empty() {
                return Err(VckError::InvalidVersion(version.to_string()));
            }
            VersionType::Branch(branch.to_string())
        } else {
            Self::parse_release(trimmed)
                .or_else(|| {
                    Self::expand_wildcard_alias(trimmed)
                        .and_then(|expanded| Self::parse_release(&expanded))
                })
                .ok_or_else(|| VckError::InvalidVersion(version.to_string()))?
        };

        Ok(Version {
            original: trimmed.to_string(),
            parsed,
        })
    }

    fn parse_release(version: &str) -> Option<VersionType> {
        let captures = RELEASE_PATTERN.captures(version)?;

        let mut parts = Vec::new();
        for part in captures.get(1)?.as_str().split('.') {
            parts.push(part.parse::<u64>().ok()?);
        }

        let modifier = captures
            .get(2)
            .map(|m| Modifier::parse(m.as_str()))
            .unwrap_or(Modifier::Stable);

        let number = match captures.get(3) {
            Some(m) => m.as_str().parse::<u64>().ok()?,
            None => 0,
        };

        Some(VersionType::Release {
            parts,
            modifier,
            number,
        })
    }

    /// `2.0.x-dev` becomes `2.0.9999999.9999999-dev`, padded to four parts.
    fn expand_wildcard_alias(version: &str) -> Option<String> {
        let body = version.strip_suffix("-dev")?;
        let body = body.strip_prefix(['v', 'V']).unwrap_or(body);
        let parts: Vec<&str> = body.split('.').collect();

        let is_wildcard = |part: &str| matches!(part, "x" | "X" | "*");
        let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        if parts.len() > 4 || !is_number(parts[0]) || !parts.iter().any(|p| is_wildcard(*p)) {
            return None;
        }

        let mut expanded = Vec::with_capacity(4);
        for part in parts {
            if is_wildcard(part) {
                expanded.push(WILDCARD_PART);
            } else if is_number(part) {
                expanded.push(part);
            } else {
                return None;
            }
        }
        expanded.resize(4, WILDCARD_PART);

        Some(format!("{}-dev", expanded.join(".")))
    }

    /// Stability tier implied by the version string itself.
    pub fn stability(&self) -> Stability {
        match &self.parsed {
            VersionType::Branch(_) => Stability::Dev,
            VersionType::Release { modifier, .. } => match modifier {
                Modifier::Dev => Stability::Dev,
                Modifier::Alpha => Stability::Alpha,
                Modifier::Beta => Stability::Beta,
                Modifier::Rc => Stability::Rc,
                Modifier::Stable | Modifier::Patch => Stability::Stable,
            },
        }
    }

    fn compare_parts(a: &[u64], b: &[u64]) -> Ordering {
        let len = a.len().max(b.len());
        (0..len)
            .map(|i| {
                let av = a.get(i).copied().unwrap_or(0);
                let bv = b.get(i).copied().unwrap_or(0);
                av.cmp(&bv)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

// Branches compare equal only to the same branch and are unordered
// against everything else, so `>` and `<` are both false across them.
impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.parsed, &other.parsed) {
            (
                VersionType::Release {
                    parts: a_parts,
                    modifier: a_mod,
                    number: a_num,
                },
                VersionType::Release {
                    parts: b_parts,
                    modifier: b_mod,
                    number: b_num,
                },
            ) => Some(
                Self::compare_parts(a_parts, b_parts)
                    .then(a_mod.cmp(b_mod))
                    .then(a_num.cmp(b_num)),
            ),
            (VersionType::Branch(a), VersionType::Branch(b)) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}
