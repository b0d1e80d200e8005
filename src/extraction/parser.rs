//! Lenient parsing of extraction payloads: code fences stripped, payload
//! isolated between the first `{` and the last `}`, and unbalanced
//! braces/brackets repaired once before the parse is retried.

use super::{MinuteFormData, ParseError};

/// Full parse pipeline over raw provider output.
pub fn parse_minute_payload(raw: &str) -> Result<MinuteFormData, ParseError> {
    let without_fences = strip_code_fences(raw);
    let payload = isolate_object(&without_fences).ok_or(ParseError::NoPayload)?;

    match serde_json::from_str::<MinuteFormData>(payload) {
        Ok(data) => Ok(data),
        Err(first_err) => {
            let repaired = repair_brackets(payload);
            serde_json::from_str::<MinuteFormData>(&repaired).map_err(|retry_err| {
                tracing::debug!(
                    first = %first_err,
                    retry = %retry_err,
                    "extraction payload unparseable even after bracket repair"
                );
                ParseError::Json(retry_err.to_string())
            })
        }
    }
}

/// Drop code-fence marker lines, keeping their content.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Isolate the substring between the first `{` and the last `}`, inclusive.
pub fn isolate_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    match text.rfind('}') {
        Some(end) if end > start => Some(&text[start..=end]),
        // Truncated object with no closer after the opener: take from the
        // first `{` to the end so the bracket repair pass has something to
        // close.
        _ => Some(&text[start..]),
    }
}

/// Append the closers for unmatched `{` and `[` once, in nesting order.
/// String contents are respected so braces inside values do not miscount.
pub fn repair_brackets(payload: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in payload.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => stack.push(c),
            '}' if !in_string => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                }
            }
            ']' if !in_string => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut repaired = payload.trim_end().to_string();
    if in_string {
        repaired.push('"');
    }
    while let Some(open) = stack.pop() {
        repaired.push(if open == '{' { '}' } else { ']' });
    }
    repaired
}
