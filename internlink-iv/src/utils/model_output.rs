//! Helpers for reading completion-API output
//!
//! Models asked for "JSON only" still sometimes wrap the object in a code
//! fence or a sentence of prose. These helpers dig the object out.

use serde_json::{Map, Value};

/// Extract the first JSON object from model output
///
/// Tries, in order: the whole text, the contents of a ```json fence, and the
/// span from the first `{` to the last `}`.
pub fn extract_json_object(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();

    if let Some(obj) = parse_object(trimmed) {
        return Some(obj);
    }

    if let Some(fenced) = strip_code_fence(trimmed) {
        if let Some(obj) = parse_object(fenced) {
            return Some(obj);
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&trimmed[start..=end])
}

/// Non-empty trimmed string field
pub fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    // Skip an info string such as `json`
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let end = body.rfind("```")?;
    Some(body[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let obj = extract_json_object(r#"{"a": "b"}"#).unwrap();
        assert_eq!(string_field(&obj, "a").as_deref(), Some("b"));
    }

    #[test]
    fn test_fenced_object() {
        let raw = "```json\n{\"acknowledgment\": \"Nice.\"}\n```";
        let obj = extract_json_object(raw).unwrap();
        assert_eq!(string_field(&obj, "acknowledgment").as_deref(), Some("Nice."));
    }

    #[test]
    fn test_object_inside_prose() {
        let raw = "Here you go: {\"score\": 80} Hope that helps!";
        let obj = extract_json_object(raw).unwrap();
        assert_eq!(obj["score"], 80);
    }

    #[test]
    fn test_non_json_text() {
        assert!(extract_json_object("Great answer.\nWhat next?").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("} backwards {").is_none());
    }

    #[test]
    fn test_string_field_rejects_blank_and_non_strings() {
        let obj = extract_json_object(r#"{"a": "  ", "b": 3}"#).unwrap();
        assert!(string_field(&obj, "a").is_none());
        assert!(string_field(&obj, "b").is_none());
        assert!(string_field(&obj, "missing").is_none());
    }
}
