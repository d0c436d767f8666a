//! Recovering JSON from LLM responses.
//!
//! Providers asked for JSON often wrap it in markdown code fences or
//! surround it with explanatory prose. The extraction here tries fences
//! first, then scans for the first balanced object or array.

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Tries, in order:
/// 1. Markdown code blocks: ```` ```json ... ``` ````
/// 2. The first balanced `[ ... ]` or `{ ... }`, whichever opens earlier
///
/// Returns `None` when no JSON-looking structure is present; the caller
/// owns turning that into a malformed-response error.
///
/// # Examples
///
/// ```
/// use reelsmith_dispatch::extract_json;
///
/// let response = "Here you go:\n```json\n{\"id\": 1}\n```\n";
/// assert_eq!(extract_json(response).unwrap(), "{\"id\": 1}");
/// ```
pub fn extract_json(response: &str) -> Option<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Some(json);
    }

    // Whichever delimiter opens first wins; fall back to the other.
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    }
}

/// Extract content from a markdown code block, with or without a `json`
/// language tag. A missing closing fence is treated as a truncated
/// response and everything after the opening fence is returned.
fn extract_from_code_block(response: &str) -> Option<String> {
    if let Some(start) = response.find("```json") {
        let content_start = start + "```json".len();
        return Some(match response[content_start..].find("```") {
            Some(end) => response[content_start..content_start + end].trim().to_string(),
            None => response[content_start..].trim().to_string(),
        });
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip past any language specifier on the fence line.
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);
        return Some(match response[skip_to..].find("```") {
            Some(end) => response[skip_to..skip_to + end].trim().to_string(),
            None => response[skip_to..].trim().to_string(),
        });
    }

    None
}

/// Extract content between balanced delimiters, honoring JSON string
/// escapes so braces inside strings do not affect the depth count.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_tagged_code_block() {
        let response = "Here's the data:\n\n```json\n{\n  \"id\": 123\n}\n```\n\nDone!";
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"id\": 123"));
        assert!(json.starts_with('{'));
    }

    #[test]
    fn extracts_from_untagged_code_block() {
        let response = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_json(response).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn extracts_balanced_object_from_prose() {
        let response = r#"Sure! Here it is: {"id": 456, "nested": {"value": "test"}}"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("nested"));
    }

    #[test]
    fn prefers_array_when_it_opens_first() {
        let response = "Here are the ideas:\n[\n  {\"id\": 1},\n  {\"id\": 2}\n]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn honors_string_escapes() {
        let response = r#"{"text": "She said \"hello\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn truncated_code_block_returns_remainder() {
        let response = "```json\n{\"id\": 1}";
        assert_eq!(extract_json(response).unwrap(), "{\"id\": 1}");
    }

    #[test]
    fn plain_text_yields_none() {
        assert!(extract_json("This is just plain text with no JSON").is_none());
    }
}
