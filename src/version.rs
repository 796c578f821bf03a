//! Build version string.

/// Marker vergen writes when git metadata could not be collected.
const IDEMPOTENT_SHA: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Version reported at startup and by `quotaday version`, e.g. `v0.1.0+1a2b3c4`.
pub fn version_string() -> String {
    format_version(env!("CARGO_PKG_VERSION"), option_env!("VERGEN_GIT_SHA"))
}

fn format_version(version: &str, sha: Option<&str>) -> String {
    match sha.map(str::trim) {
        Some(sha) if !sha.is_empty() && sha != IDEMPOTENT_SHA && sha != "unknown" => {
            let short: String = sha.chars().take(7).collect();
            format!("v{version}+{short}")
        }
        _ => format!("v{version}"),
    }
}
