use crate::error::{Result, VckError};
use crate::utils::path_validator::PathValidator;
use std::path::{Path, PathBuf};

pub const INSTALLED_MANIFEST: &str = "installed.json";
pub const CATALOG_MANIFEST: &str = "catalog.json";

/// ProjectScannerAgent locates the manifests a check needs
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the project directory and resolves manifest paths.
    ///
    /// Explicit paths are taken relative to the project directory; when none
    /// are given the conventional file names are used.
    pub fn validate(
        &self,
        installed: Option<&Path>,
        catalogs: &[PathBuf],
    ) -> Result<ProjectInfo> {
        let mut info = self.validate_installed(installed)?;

        let catalog_paths: Vec<PathBuf> = if catalogs.is_empty() {
            vec![info.project_path.join(CATALOG_MANIFEST)]
        } else {
            catalogs.iter().map(|c| info.project_path.join(c)).collect()
        };
        for catalog in &catalog_paths {
            if !catalog.is_file() {
                return Err(VckError::ProjectValidation(format!(
                    "Catalog manifest '{}' not found",
                    catalog.display()
                )));
            }
        }

        info.catalog_paths = catalog_paths;
        Ok(info)
    }

    /// Like [`validate`](Self::validate) but only the installed manifest is required.
    pub fn validate_installed(&self, installed: Option<&Path>) -> Result<ProjectInfo> {
        let project_path = PathValidator::validate_project_path(&self.project_path)?;

        let installed_path =
            project_path.join(installed.unwrap_or(Path::new(INSTALLED_MANIFEST)));
        if !installed_path.is_file() {
            return Err(VckError::ProjectValidation(format!(
                "Installed package manifest '{}' not found",
                installed_path.display()
            )));
        }

        Ok(ProjectInfo {
            project_path,
            installed_path,
            catalog_paths: Vec::new(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub installed_path: PathBuf,
    pub catalog_paths: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_default_manifests() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(INSTALLED_MANIFEST), "{}").unwrap();
        fs::write(dir.path().join(CATALOG_MANIFEST), "{}").unwrap();

        let info = ProjectScannerAgent::new(dir.path())
            .validate(None, &[])
            .unwrap();
        assert!(info.installed_path.ends_with(INSTALLED_MANIFEST));
        assert_eq!(info.catalog_paths.len(), 1);
        assert!(info.catalog_paths[0].ends_with(CATALOG_MANIFEST));
    }

    #[test]
    fn resolves_explicit_catalogs_relative_to_project() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lock.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();

        let info = ProjectScannerAgent::new(dir.path())
            .validate(
                Some(Path::new("lock.json")),
                &[PathBuf::from("a.json"), PathBuf::from("b.json")],
            )
            .unwrap();
        assert!(info.installed_path.ends_with("lock.json"));
        assert!(info.catalog_paths[1].ends_with("b.json"));
    }

    #[test]
    fn missing_installed_manifest_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CATALOG_MANIFEST), "{}").unwrap();
        let err = ProjectScannerAgent::new(dir.path())
            .validate(None, &[])
            .unwrap_err();
        assert!(matches!(err, VckError::ProjectValidation(_)));
    }

    #[test]
    fn installed_only_validation_ignores_catalogs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(INSTALLED_MANIFEST), "{}").unwrap();
        let info = ProjectScannerAgent::new(dir.path())
            .validate_installed(None)
            .unwrap();
        assert!(info.catalog_paths.is_empty());
    }

    #[test]
    fn missing_catalog_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(INSTALLED_MANIFEST), "{}").unwrap();
        let err = ProjectScannerAgent::new(dir.path())
            .validate(None, &[PathBuf::from("missing.json")])
            .unwrap_err();
        assert!(matches!(err, VckError::ProjectValidation(_)));
    }
}
