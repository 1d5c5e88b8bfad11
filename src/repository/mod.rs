use crate::error::Result;
use crate::package::{Package, Version};
use std::sync::Arc;

pub mod manifest;
pub use manifest::ManifestLoader;

/// Read-only query capability against a set of available releases.
pub trait PackageCatalog: Send + Sync {
    /// Every known release of `name` whose version is strictly greater than `than`,
    /// in catalog order.
    fn find_newer(&self, name: &str, than: &Version) -> Result<Vec<Package>>;
}

/// Catalog backed by an in-memory list of packages.
#[derive(Debug, Clone, Default)]
pub struct ArrayCatalog {
    packages: Vec<Package>,
}

impl ArrayCatalog {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageCatalog for ArrayCatalog {
    fn find_newer(&self, name: &str, than: &Version) -> Result<Vec<Package>> {
        let name = name.to_lowercase();
        Ok(self
            .packages
            .iter()
            .filter(|p| p.name == name && p.version > *than)
            .cloned()
            .collect())
    }
}

/// Queries each catalog in turn and concatenates the results.
#[derive(Default)]
pub struct CompositeCatalog {
    catalogs: Vec<Arc<dyn PackageCatalog>>,
}

impl CompositeCatalog {
    pub fn push(&mut self, catalog: Arc<dyn PackageCatalog>) {
        self.catalogs.push(catalog);
    }
}

impl PackageCatalog for CompositeCatalog {
    fn find_newer(&self, name: &str, than: &Version) -> Result<Vec<Package>> {
        let mut found = Vec::new();
        for catalog in &self.catalogs {
            found.extend(catalog.find_newer(name, than)?);
        }
        Ok(found)
    }
}

/// The resolved set of installed packages, root entry included when known.
#[derive(Debug, Clone, Default)]
pub struct InstalledRepository {
    packages: Vec<Package>,
    prefer_stable: bool,
}

impl InstalledRepository {
    pub fn new(packages: Vec<Package>) -> Self {
        Self {
            packages,
            prefer_stable: false,
        }
    }

    /// Stability policy declared by the root project.
    pub fn with_prefer_stable(mut self, prefer_stable: bool) -> Self {
        self.prefer_stable = prefer_stable;
        self
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn prefer_stable(&self) -> bool {
        self.prefer_stable
    }

    pub fn root(&self) -> Option<&Package> {
        self.packages.iter().find(|p| p.is_root())
    }
}
