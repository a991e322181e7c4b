//! SQLite library preflight check.

use super::CheckResult;
use crate::core::database::sqlite_version;

/// Minimum supported library version.
const MIN_VERSION_NUMBER: i32 = 3_008_003;

/// Check the linked SQLite library.
pub fn check() -> CheckResult {
    if rusqlite::version_number() >= MIN_VERSION_NUMBER {
        CheckResult::ok("sqlite", &format!("library {}", sqlite_version()))
    } else {
        CheckResult::fail(
            "sqlite",
            &format!("library {} is too old", sqlite_version()),
            "Rebuild with the bundled SQLite library",
        )
    }
}
