//! Admin path gating.
//!
//! The gate only checks for the presence of a valid session marker. It is a
//! cosmetic barrier in front of the admin pages, not a security boundary:
//! every admin API call checks the session again.

use std::str::FromStr;

use crate::error::CoreError;

/// Prefix shared by every admin page.
pub const ADMIN_PREFIX: &str = "/admin";

/// Always reachable, marker or not.
pub const LOGIN_PATH: &str = "/admin/login";

/// Where the session marker is checked before an admin page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    /// Checked at the edge before the page is served; missing markers redirect.
    #[default]
    Edge,
    /// The page shell is always served; the page asks the session endpoint
    /// after mount and redirects itself.
    Client,
}

impl FromStr for GateMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edge" => Ok(Self::Edge),
            "client" => Ok(Self::Client),
            other => Err(CoreError::Validation(format!(
                "Unknown gate mode '{other}'. Must be one of: edge, client"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
}

/// `/admin` itself or anything below it.
pub fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Resolve a raw request path the way the file server will: percent-decoded,
/// empty and `.` segments dropped, `..` applied.
///
/// Returns `None` when the path does not decode to UTF-8.
pub fn canonical_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

/// Decide whether a page request may proceed.
///
/// The path is canonicalized first; one that cannot be is treated as an
/// admin page.
pub fn decide(path: &str, has_marker: bool, mode: GateMode) -> GateDecision {
    let allowed = match canonical_path(path) {
        Some(path) => !is_admin_path(&path) || path == LOGIN_PATH,
        None => false,
    };
    if allowed || has_marker {
        return GateDecision::Allow;
    }
    match mode {
        GateMode::Edge => GateDecision::RedirectToLogin,
        GateMode::Client => GateDecision::Allow,
    }
}
