use crate::error::{Result, VckError};
use crate::package::{Package, PackageKind, Stability};
use crate::repository::{ArrayCatalog, InstalledRepository};
use serde::Deserialize;
use serde_json::Map;
use std::fs;
use std::path::Path;

/// Reads installed-set and catalog manifests from JSON files
pub struct ManifestLoader;

impl ManifestLoader {
    /// Read and parse an installed-set manifest (`installed.json`)
    pub fn load_installed<P: AsRef<Path>>(path: P) -> Result<InstalledRepository> {
        let path = path.as_ref();
        log::debug!("Loading installed packages from {}", path.display());
        let content = Self::read(path)?;
        Self::parse_installed(&content)
    }

    /// Read and parse a catalog manifest (`catalog.json`)
    pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<ArrayCatalog> {
        let path = path.as_ref();
        log::debug!("Loading catalog from {}", path.display());
        let content = Self::read(path)?;
        Self::parse_catalog(&content)
    }

    pub fn parse_installed(content: &str) -> Result<InstalledRepository> {
        let manifest: InstalledManifest = serde_json::from_str(content)
            .map_err(|e| VckError::ManifestParsing(format!("Failed to parse installed set: {}", e)))?;

        let mut packages = Vec::with_capacity(manifest.packages.len() + 1);
        let mut prefer_stable = false;

        if let Some(root) = manifest.root {
            prefer_stable = root.prefer_stable;
            packages.push(root.package.into_package(PackageKind::Root)?);
        }

        for entry in manifest.packages {
            let kind = match entry.alias_of.clone() {
                Some(alias_of) => PackageKind::Alias {
                    alias_of: alias_of.to_lowercase(),
                },
                None => PackageKind::Concrete,
            };
            packages.push(entry.into_package(kind)?);
        }

        Ok(InstalledRepository::new(packages).with_prefer_stable(prefer_stable))
    }

    pub fn parse_catalog(content: &str) -> Result<ArrayCatalog> {
        let manifest: CatalogManifest = serde_json::from_str(content)
            .map_err(|e| VckError::ManifestParsing(format!("Failed to parse catalog: {}", e)))?;

        let packages = manifest
            .packages
            .into_iter()
            .map(|entry| entry.into_package(PackageKind::Concrete))
            .collect::<Result<Vec<_>>>()?;

        Ok(ArrayCatalog::new(packages))
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            VckError::ManifestParsing(format!("Failed to read '{}': {}", path.display(), e))
        })
    }
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    #[serde(default)]
    root: Option<RootEntry>,
    #[serde(default)]
    packages: Vec<PackageEntry>,
}

#[derive(Debug, Deserialize)]
struct RootEntry {
    #[serde(flatten)]
    package: PackageEntry,
    #[serde(default, rename = "prefer-stable")]
    prefer_stable: bool,
}

#[derive(Debug, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    packages: Vec<PackageEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    name: String,
    version: String,
    #[serde(default)]
    version_normalized: Option<String>,
    #[serde(default)]
    stability: Option<Stability>,
    /// Target name to pretty constraint, in declaration order
    #[serde(default)]
    require: Map<String, serde_json::Value>,
    #[serde(default, rename = "alias-of")]
    alias_of: Option<String>,
}

impl PackageEntry {
    fn into_package(self, kind: PackageKind) -> Result<Package> {
        let normalized = self.version_normalized.as_deref().unwrap_or(&self.version);
        let mut package = Package::new(&self.name, normalized)?
            .with_pretty_version(self.version.as_str())
            .with_kind(kind);

        if let Some(stability) = self.stability {
            package = package.with_stability(stability);
        }

        for (target, constraint) in &self.require {
            let constraint = constraint.as_str().ok_or_else(|| {
                VckError::ManifestParsing(format!(
                    "Constraint for '{}' in '{}' must be a string",
                    target, self.name
                ))
            })?;
            package = package.require(target, constraint);
        }

        Ok(package)
    }
}
