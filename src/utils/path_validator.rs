use crate::error::{Result, VckError};
use std::path::{Path, PathBuf};

const FORBIDDEN_ROOTS: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// Guards the project directory the check reads manifests from.
pub struct PathValidator;

impl PathValidator {
    /// Canonicalises `path` and rejects non-directories and system locations.
    pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            VckError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(VckError::ProjectValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        if let Some(root) = Self::forbidden_root(path, &canonical) {
            return Err(VckError::ProjectValidation(format!(
                "Access to system directory '{}' is not allowed",
                root
            )));
        }

        Ok(canonical)
    }

    fn forbidden_root(path: &Path, canonical: &Path) -> Option<&'static str> {
        FORBIDDEN_ROOTS.iter().copied().find(|root| {
            let root_path = Path::new(root);
            path.starts_with(root_path)
                || canonical.starts_with(root_path)
                || root_path
                    .canonicalize()
                    .is_ok_and(|resolved| canonical.starts_with(resolved))
        })
    }
}
