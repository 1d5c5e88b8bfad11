pub mod version;

pub use version::{Stability, Version};

use crate::error::Result;
use std::fmt;

/// Directed requirement edge: `source` requires `target` under `pretty_constraint`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub pretty_constraint: String,
}

impl Link {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        pretty_constraint: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into().to_lowercase(),
            target: target.into().to_lowercase(),
            pretty_constraint: pretty_constraint.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageKind {
    Concrete,
    /// Renamed pointer to another installed entry.
    Alias { alias_of: String },
    /// The project itself.
    Root,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Concrete => f.write_str("package"),
            PackageKind::Alias { alias_of } => write!(f, "alias of {}", alias_of),
            PackageKind::Root => f.write_str("root"),
        }
    }
}

/// An installed or available package release
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Lower-cased identity key
    pub name: String,
    pub pretty_name: String,
    pub version: Version,
    pub pretty_version: String,
    pub stability: Stability,
    pub kind: PackageKind,
    pub requires: Vec<Link>,
}

impl Package {
    /// Builds a concrete package whose stability is inferred from its version.
    pub fn new(name: &str, version: &str) -> Result<Self> {
        let parsed = Version::parse(version)?;
        Ok(Self {
            name: name.to_lowercase(),
            pretty_name: name.to_string(),
            stability: parsed.stability(),
            version: parsed,
            pretty_version: version.to_string(),
            kind: PackageKind::Concrete,
            requires: Vec::new(),
        })
    }

    pub fn with_pretty_version(mut self, pretty_version: impl Into<String>) -> Self {
        self.pretty_version = pretty_version.into();
        self
    }

    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = stability;
        self
    }

    pub fn with_kind(mut self, kind: PackageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a requirement on `target`, sourced from this package.
    pub fn require(mut self, target: &str, constraint: &str) -> Self {
        self.requires
            .push(Link::new(self.name.as_str(), target, constraint));
        self
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, PackageKind::Alias { .. })
    }

    pub fn is_root(&self) -> bool {
        self.kind == PackageKind::Root
    }
}
