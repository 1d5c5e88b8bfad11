pub mod project_scanner;
pub mod report;
pub mod versions_check;

pub use project_scanner::ProjectScannerAgent;
pub use report::{Markup, ReportRenderer};
pub use versions_check::{OutdatedPackage, VersionsCheck};
