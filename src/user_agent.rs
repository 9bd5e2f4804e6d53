//! Shared User-Agent string for backend HTTP traffic.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/soundgrab";

/// Default User-Agent for backend requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("soundgrab/{version} (+{PROJECT_UA_URL})")
}
