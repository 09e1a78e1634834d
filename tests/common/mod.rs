#![allow(dead_code)]

use std::path::Path;

use server_devtools::config::TestEnvSection;

pub use server_devtools_test_utils::init_tracing;

/// Default `[test_env]` settings with the readiness wait disabled.
pub fn fast_test_env() -> TestEnvSection {
    TestEnvSection {
        readiness_wait_secs: 0,
        ..TestEnvSection::default()
    }
}

#[cfg(unix)]
pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o111 != 0
}
