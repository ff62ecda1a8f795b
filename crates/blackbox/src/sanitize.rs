//! Removal of ANSI color codes from log lines.
//!
//! Terminal color sequences are stripped once, at write time, so stored
//! records and later retrievals never carry raw escape bytes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches ANSI SGR color codes of the form `ESC [ <digits> m`.
static ANSI_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[\d+m").unwrap_or_else(|_| unreachable!()));

/// Strips ANSI SGR color codes from a line.
///
/// Only the single-parameter form (`\x1b[31m`, `\x1b[0m`, ...) is
/// removed. Compound sequences such as `\x1b[1;31m` do not match and
/// pass through untouched.
#[must_use]
pub fn strip_ansi_colors(line: &str) -> String {
    ANSI_COLOR_REGEX.replace_all(line, "").into_owned()
}
