//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string: `serpent 0.1.0 (2026-10-17, abc1234)`.
pub fn version_line() -> String {
    format!(
        "serpent {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
