//! Turning raw completion text into JSON.
//!
//! Models are told to answer with bare JSON but regularly wrap it in markdown
//! fences or add a sentence of prose. Cleaning handles the fences; decoding
//! falls back to the outermost `{...}` object when prose surrounds it.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

fn fence_markers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?\s*").expect("valid regex"))
}

/// Removes markdown code fences (```` ```json ```` or bare ```` ``` ````) and
/// surrounding whitespace.
///
/// A fence wrapping the whole response is peeled off so the inner text is
/// returned untouched; fence markers anywhere else are deleted.
pub fn clean_json_response(text: &str) -> String {
    let text = text.trim();
    if let Some(inner) = strip_wrapping_fence(text) {
        return inner.to_string();
    }
    fence_markers().replace_all(text, "").trim().to_string()
}

fn strip_wrapping_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // A second fence inside means this was not a single wrapped block.
    if rest.contains("```") {
        return None;
    }
    Some(rest.trim())
}

/// Decodes cleaned text as JSON, retrying on the outermost balanced object.
/// The error returned is the one from decoding the full text.
pub fn decode_json(cleaned: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(e) => extract_json_object(cleaned)
            .filter(|object| object.len() < cleaned.len())
            .and_then(|object| serde_json::from_str(object).ok())
            .ok_or(e),
    }
}

/// Slice from the first `{` to its matching `}`, ignoring braces inside strings.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if c == '\\' && in_string {
            escape_next = true;
            continue;
        }
        if c == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}
