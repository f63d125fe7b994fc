//! Pinning of loosely specified compiler versions
//!
//! Scraped records carry versions as exact pins (`0.8.24`), caret ranges (`^0.8`), lower bounds
//! (`>=0.8.0`) or build tagged strings. Everything that is not an exact pin is mapped onto one
//! release per `0.x` line, see [`VERSION_PINS`].

use crate::error::{Result, SolcError};
use tracing::trace;

/// Caret prefix => pinned release, checked in this order.
pub const VERSION_PINS: [(&str, &str); 5] = [
    ("^0.4", "0.4.26"),
    ("^0.5", "0.5.17"),
    ("^0.6", "0.6.12"),
    ("^0.7", "0.7.6"),
    ("^0.8", "0.8.24"),
];

/// Prefix of a minimum bound requirement, `>=0.6.0`
const MIN_BOUND: &str = ">=";

/// Maps a raw version string to a pinned release.
///
/// Caret prefixes are looked up in [`VERSION_PINS`]. A `>=` bound is stripped and its first three
/// characters are looked up as a caret prefix, if that misses the stripped version is returned as
/// is. Anything else is returned unchanged, no semver validation takes place here.
///
/// ```
/// use solc_batch_solc::version::normalize;
/// assert_eq!(normalize("^0.8.0"), "0.8.24");
/// assert_eq!(normalize(">=0.6.0"), "0.6.12");
/// assert_eq!(normalize("0.5.10"), "0.5.10");
/// ```
pub fn normalize(raw: &str) -> String {
    if let Some(pinned) = pinned_for(raw) {
        trace!(raw, pinned, "pinned caret version");
        return pinned.to_string()
    }
    if let Some(bound) = raw.strip_prefix(MIN_BOUND) {
        let pinned = bound
            .get(..3)
            .and_then(|line| pinned_for(&format!("^{line}")))
            .unwrap_or(bound);
        trace!(raw, pinned, "pinned minimum bound version");
        return pinned.to_string()
    }
    raw.to_string()
}

fn pinned_for(version: &str) -> Option<&'static str> {
    VERSION_PINS.iter().find(|(prefix, _)| version.starts_with(prefix)).map(|(_, pinned)| *pinned)
}

/// Whether a compile request for the pinned `version` should go through the IR pipeline.
///
/// This is a heuristic on the character at offset 2 of the version string, which is the minor
/// digit for single digit minors (`0.8.24` -> `8`). It is `true` when that digit exceeds 7. Multi
/// digit majors or minors are not interpreted structurally.
pub fn requires_via_ir(version: &str) -> Result<bool> {
    let digit = version
        .chars()
        .nth(2)
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| SolcError::unresolved(version))?;
    Ok(digit > 7)
}
