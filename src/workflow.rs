use crate::agents::{Markup, ProjectScannerAgent, ReportRenderer, VersionsCheck};
use crate::config::ConfigLoader;
use crate::error::Result;
use crate::package::{Package, PackageKind, Stability};
use crate::repository::{CompositeCatalog, ManifestLoader, PackageCatalog};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Flags for a single `check` run, as resolved from the command line
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub installed: Option<PathBuf>,
    pub catalogs: Vec<PathBuf>,
    pub show_links: bool,
    pub prefer_stable: bool,
    pub prefer_lowest: bool,
    pub markup: Markup,
}

/// Execute the check workflow and print the report to stdout
pub fn execute_check<P: AsRef<Path>>(project_path: P, request: &CheckRequest) -> Result<()> {
    if request.prefer_lowest {
        log::info!("Lowest versions preferred, skipping versions check");
        return Ok(());
    }

    let report = run_check(project_path, request)?;
    print!("{}", report);
    Ok(())
}

/// Load manifests and options, detect outdated packages and render the report
pub fn run_check<P: AsRef<Path>>(project_path: P, request: &CheckRequest) -> Result<String> {
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate(request.installed.as_deref(), &request.catalogs)?;

    let options = ConfigLoader::new(&project_info.project_path).load()?;
    let show_links = request.show_links || options.show_links;

    let installed = ManifestLoader::load_installed(&project_info.installed_path)?;

    let mut catalog = CompositeCatalog::default();
    for path in &project_info.catalog_paths {
        let loaded = ManifestLoader::load_catalog(path)?;
        if loaded.is_empty() {
            log::warn!("Catalog {} lists no releases", path.display());
        } else {
            log::debug!("{} releases in {}", loaded.len(), path.display());
        }
        catalog.push(Arc::new(loaded));
    }
    let catalog: Arc<dyn PackageCatalog> = Arc::new(catalog);

    if installed.root().is_none() {
        log::debug!("No root package declared, scanning every installed package for requirements");
    }

    let prefer_stable = request.prefer_stable || installed.prefer_stable();
    log::debug!(
        "Checking {} installed packages ({} versions)",
        installed.packages().len(),
        if prefer_stable { "stable" } else { "all" }
    );

    let records = VersionsCheck::new(catalog, prefer_stable).detect(&installed)?;
    Ok(ReportRenderer::render(&records, show_links, request.markup))
}

/// Execute the list workflow - display all installed packages
pub fn execute_list<P: AsRef<Path>>(project_path: P, installed: Option<&Path>) -> Result<()> {
    let scanner = ProjectScannerAgent::new(project_path);
    let project_info = scanner.validate_installed(installed)?;
    let installed = ManifestLoader::load_installed(&project_info.installed_path)?;

    println!("{}", "📦 Installed packages:".cyan().bold());
    if installed.packages().is_empty() {
        println!("  {}", "(none)".dimmed());
        return Ok(());
    }

    for package in installed.packages() {
        print_package(package);
    }

    Ok(())
}

fn print_package(package: &Package) {
    let stability = match package.stability {
        Stability::Stable => package.stability.to_string().green(),
        _ => package.stability.to_string().yellow(),
    };

    let kind = match &package.kind {
        PackageKind::Concrete => String::new(),
        other => format!(" [{}]", other),
    };

    println!(
        "  • {} {} ({}){}",
        package.pretty_name.white().bold(),
        package.pretty_version.bright_cyan(),
        stability,
        kind.dimmed()
    );
}
