// Server-side HTML for the upload page and parse results.
// Plain string building: the page is small and static apart from the record.

pub mod sections;

use crate::extraction::{ParseError, ParsedResume};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { margin-bottom: 0.25rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem 2rem; }
details { margin: 0.25rem 0 0.75rem; }
summary { cursor: pointer; font-weight: 600; }
.error { background: #fdecea; border: 1px solid #f5c2c0; padding: 0.75rem 1rem; border-radius: 4px; }
pre { background: #f6f8fa; padding: 0.75rem; overflow-x: auto; }
"#;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: title, upload form, then `body`.
pub fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Resume Parser</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Advanced Resume Parser</h1>
<p>Upload a resume PDF to extract and analyze its contents with detailed skills classification.</p>
<form method="post" action="/parse" enctype="multipart/form-data">
<input type="file" name="file" accept="application/pdf,.pdf" required>
<button type="submit">Parse</button>
</form>
{body}
</body>
</html>
"#
    )
}

pub fn upload_page() -> String {
    page("")
}

/// Result page for a successful parse: record sections and the raw JSON view.
pub fn result_page(parsed: &ParsedResume) -> String {
    let mut body = sections::resume_info(&parsed.record);
    body.push_str(&raw_json(&parsed.raw));
    page(&body)
}

/// Result page for a failed parse. Decode failures also show what the model said.
pub fn error_page(err: &ParseError) -> String {
    page(&error_block(err))
}

/// Page for a rejected upload (bad file, extraction failure).
pub fn message_page(message: &str) -> String {
    page(&format!(
        r#"<div class="error">{}</div>"#,
        escape(message)
    ))
}

fn error_block(err: &ParseError) -> String {
    let mut out = format!(r#"<div class="error">{}</div>"#, escape(&err.to_string()));
    if let Some(raw) = err.raw_response() {
        out.push_str("<p>Raw Response:</p>");
        out.push_str(&format!("<pre><code>{}</code></pre>", escape(raw)));
    }
    out
}

fn raw_json(raw: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!(
        "<details><summary>View Raw JSON</summary><pre><code>{}</code></pre></details>",
        escape(&pretty)
    )
}
