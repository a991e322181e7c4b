//! Database file preflight checks.

use super::CheckResult;
use crate::utils::fs;
use std::path::Path;

/// Check that the working database can be (re)created.
pub fn check_working_database(path: &Path) -> CheckResult {
    let dir = fs::parent_dir(path);
    if fs::is_parent_writable(path) {
        CheckResult::ok("database", &format!("{} is writable", dir.display()))
    } else {
        CheckResult::fail(
            "database",
            &format!("cannot create files in {}", dir.display()),
            "Pass --database with a path in a writable directory",
        )
    }
}

/// Check that the database to inspect is present.
pub fn check_inspect_database(path: &Path) -> CheckResult {
    if fs::ensure_file(path).is_ok() {
        CheckResult::ok("inspect", &format!("found {}", path.display()))
    } else {
        CheckResult::fail(
            "inspect",
            &format!("{} not found", path.display()),
            "Place the database there or pass its path with --inspect",
        )
    }
}
