use crate::error::Result;
use crate::package::{Link, Package, Stability};
use crate::repository::{InstalledRepository, PackageCatalog};
use std::sync::Arc;

/// An installed package paired with the best newer release found for it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutdatedPackage {
    actual: Package,
    last: Package,
    links: Vec<Link>,
}

impl OutdatedPackage {
    pub fn new(actual: Package, last: Package, links: Vec<Link>) -> Self {
        Self {
            actual,
            last,
            links,
        }
    }

    pub fn actual(&self) -> &Package {
        &self.actual
    }

    pub fn last(&self) -> &Package {
        &self.last
    }

    /// Installed packages' requirements that target the outdated package.
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

/// VersionsCheck compares installed packages against a catalog of releases
pub struct VersionsCheck {
    catalog: Arc<dyn PackageCatalog>,
    prefer_stable: bool,
}

impl VersionsCheck {
    pub fn new(catalog: Arc<dyn PackageCatalog>, prefer_stable: bool) -> Self {
        Self {
            catalog,
            prefer_stable,
        }
    }

    /// Returns one record per outdated installed package, in installed order.
    ///
    /// Aliases are skipped since the package they point to is also installed.
    /// Only errors raised by the catalog lookup are propagated.
    pub fn detect(&self, installed: &InstalledRepository) -> Result<Vec<OutdatedPackage>> {
        let mut outdated = Vec::new();

        for package in installed.packages() {
            if package.is_alias() {
                continue;
            }

            let candidates = self.catalog.find_newer(&package.name, &package.version)?;

            let Some(last) = Self::select_latest(candidates, self.prefer_stable) else {
                log::debug!(
                    "{} ({}) is up to date",
                    package.pretty_name,
                    package.pretty_version
                );
                continue;
            };

            log::debug!(
                "{} ({}) is outdated, latest is {}",
                package.pretty_name,
                package.pretty_version,
                last.pretty_version
            );

            let links = Self::reverse_dependencies(installed.packages(), package);
            outdated.push(OutdatedPackage::new(package.clone(), last, links));
        }

        Ok(outdated)
    }

    /// Picks the highest version among `candidates`.
    ///
    /// With `stable_only`, anything not exactly [`Stability::Stable`] is dropped first.
    /// When several candidates share the highest version the first one wins.
    pub fn select_latest(candidates: Vec<Package>, stable_only: bool) -> Option<Package> {
        candidates
            .into_iter()
            .filter(|candidate| !stable_only || candidate.stability == Stability::Stable)
            .reduce(|best, candidate| {
                if candidate.version > best.version {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Collects links from installed packages, root excluded, that require `target`.
    ///
    /// Duplicates are dropped keeping first-seen order. Without a root entry
    /// every package is scanned.
    pub fn reverse_dependencies(installed: &[Package], target: &Package) -> Vec<Link> {
        let mut depends: Vec<Link> = Vec::new();

        for package in installed.iter().filter(|p| !p.is_root()) {
            for link in &package.requires {
                if link.target == target.name && !depends.contains(link) {
                    depends.push(link.clone());
                }
            }
        }

        depends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageKind;
    use crate::repository::ArrayCatalog;

    fn pkg(name: &str, version: &str) -> Package {
        Package::new(name, version).unwrap()
    }

    fn check(catalog: Vec<Package>, prefer_stable: bool) -> VersionsCheck {
        VersionsCheck::new(Arc::new(ArrayCatalog::new(catalog)), prefer_stable)
    }

    #[test]
    fn up_to_date_package_produces_no_record() {
        let installed = InstalledRepository::new(vec![pkg("acme/lib", "1.1.0")]);
        let records = check(vec![pkg("acme/lib", "1.0.0"), pkg("acme/lib", "1.1.0")], false)
            .detect(&installed)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn outdated_package_with_requiring_root() {
        let installed = InstalledRepository::new(vec![
            pkg("app/root", "1.0.0")
                .with_kind(PackageKind::Root)
                .require("acme/lib", "^1.0"),
            pkg("acme/lib", "1.0.0"),
            pkg("acme/consumer", "3.0.0").require("acme/lib", "^1.0"),
        ]);

        let records = check(vec![pkg("acme/lib", "2.0.0")], false)
            .detect(&installed)
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.actual().name, "acme/lib");
        assert_eq!(record.last().pretty_version, "2.0.0");
        assert!(record.last().version > record.actual().version);
        assert_eq!(
            record.links(),
            &[Link::new("acme/consumer", "acme/lib", "^1.0")]
        );
    }

    #[test]
    fn untagged_project_package_counts_as_dependent() {
        let installed = InstalledRepository::new(vec![
            pkg("acme/lib", "1.0.0"),
            pkg("app/root", "1.0.0").require("acme/lib", "^1.0"),
        ]);

        let records = check(vec![pkg("acme/lib", "2.0.0")], false)
            .detect(&installed)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].links(),
            &[Link::new("app/root", "acme/lib", "^1.0")]
        );
    }

    #[test]
    fn picks_maximum_candidate_regardless_of_catalog_order() {
        let installed = InstalledRepository::new(vec![pkg("acme/lib", "1.0.0")]);
        let records = check(
            vec![
                pkg("acme/lib", "1.5.0"),
                pkg("acme/lib", "3.0.0"),
                pkg("acme/lib", "2.0.0"),
            ],
            false,
        )
        .detect(&installed)
        .unwrap();
        assert_eq!(records[0].last().pretty_version, "3.0.0");
    }

    #[test]
    fn prefer_stable_excludes_every_unstable_tier() {
        let installed = InstalledRepository::new(vec![pkg("acme/lib", "1.0.0")]);
        let catalog = vec![
            pkg("acme/lib", "1.1.0"),
            pkg("acme/lib", "2.0.0-RC1"),
            pkg("acme/lib", "2.0.0-beta"),
        ];

        let stable = check(catalog.clone(), true).detect(&installed).unwrap();
        assert_eq!(stable[0].last().pretty_version, "1.1.0");
        assert_eq!(stable[0].last().stability, Stability::Stable);

        let any = check(catalog, false).detect(&installed).unwrap();
        assert_eq!(any[0].last().pretty_version, "2.0.0-RC1");
    }

    #[test]
    fn prefer_stable_with_only_unstable_candidates_reports_nothing() {
        let installed = InstalledRepository::new(vec![
            pkg("app/root", "1.0.0")
                .with_kind(PackageKind::Root)
                .require("acme/lib", "^1.0"),
            pkg("acme/lib", "1.0.0"),
        ]);
        let records = check(vec![pkg("acme/lib", "2.0.0-beta")], true)
            .detect(&installed)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn aliases_never_produce_records() {
        let installed = InstalledRepository::new(vec![
            pkg("acme/lib", "1.0.0").with_kind(PackageKind::Alias {
                alias_of: "acme/lib-real".to_string(),
            }),
        ]);
        let records = check(vec![pkg("acme/lib", "2.0.0")], false)
            .detect(&installed)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn branch_installs_are_never_reported() {
        let installed = InstalledRepository::new(vec![pkg("acme/lib", "dev-master")]);
        let records = check(
            vec![pkg("acme/lib", "1.0.0"), pkg("acme/lib", "dev-next")],
            false,
        )
        .detect(&installed)
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn records_follow_installed_order() {
        let installed = InstalledRepository::new(vec![
            pkg("zeta/lib", "1.0.0"),
            pkg("alpha/lib", "1.0.0"),
        ]);
        let records = check(
            vec![pkg("alpha/lib", "1.2.0"), pkg("zeta/lib", "1.1.0")],
            false,
        )
        .detect(&installed)
        .unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.actual().name.as_str()).collect();
        assert_eq!(names, vec!["zeta/lib", "alpha/lib"]);
    }

    #[test]
    fn repeated_detection_does_not_accumulate() {
        let installed = InstalledRepository::new(vec![pkg("acme/lib", "1.0.0")]);
        let engine = check(vec![pkg("acme/lib", "2.0.0")], false);
        assert_eq!(engine.detect(&installed).unwrap().len(), 1);
        assert_eq!(engine.detect(&installed).unwrap().len(), 1);
    }

    #[test]
    fn tie_keeps_first_candidate_in_catalog_order() {
        let first = pkg("acme/lib", "2.0.0").with_pretty_version("v2.0.0");
        let second = pkg("acme/lib", "2.0.0.0").with_pretty_version("2.0.0.0");
        let latest = VersionsCheck::select_latest(vec![first, second], false).unwrap();
        assert_eq!(latest.pretty_version, "v2.0.0");
    }

    #[test]
    fn select_latest_of_nothing_is_none() {
        assert!(VersionsCheck::select_latest(Vec::new(), false).is_none());
        assert!(
            VersionsCheck::select_latest(vec![pkg("acme/lib", "2.0.0-alpha")], true).is_none()
        );
    }

    #[test]
    fn reverse_dependencies_are_deduplicated_in_first_seen_order() {
        let target = pkg("acme/lib", "1.0.0");
        let installed = vec![
            pkg("b/pkg", "1.0.0")
                .require("acme/lib", "^1.0")
                .require("acme/lib", "^1.0"),
            pkg("a/pkg", "1.0.0").require("acme/lib", ">=1.0"),
            pkg("c/pkg", "1.0.0").require("other/lib", "^1.0"),
            target.clone(),
        ];

        let links = VersionsCheck::reverse_dependencies(&installed, &target);
        assert_eq!(
            links,
            vec![
                Link::new("b/pkg", "acme/lib", "^1.0"),
                Link::new("a/pkg", "acme/lib", ">=1.0"),
            ]
        );
    }

    #[test]
    fn reverse_dependencies_scan_everything_without_root() {
        let target = pkg("acme/lib", "1.0.0");
        let installed = vec![pkg("app/root", "1.0.0").require("acme/lib", "^1.0")];
        let links = VersionsCheck::reverse_dependencies(&installed, &target);
        assert_eq!(links, vec![Link::new("app/root", "acme/lib", "^1.0")]);
    }
}
