//! Normalization of extracted text before it is sent to the model.

use std::sync::OnceLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, or `.,@()-`.
///
/// Word characters are letters, numbers and `_`. The `regex` crate's `\w` also
/// admits combining marks and joiners, so the class is spelled out.
fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_\s.,@()\-]").expect("valid regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Strips disallowed characters, collapses whitespace runs to one space, trims.
///
/// Filtering happens before collapsing so that removing a character between
/// two spaces cannot leave a double space behind; the result is a fixed point.
pub fn sanitize_text(text: &str) -> String {
    let filtered = disallowed_chars().replace_all(text, "");
    let collapsed = whitespace_runs().replace_all(&filtered, " ");
    collapsed.trim().to_string()
}
