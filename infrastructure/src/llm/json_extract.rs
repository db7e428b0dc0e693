//! JSON extraction from chat-completion replies
//!
//! Models asked for JSON still wrap it in prose or markdown fences more
//! often than not. Extraction is lenient: the sanitizers downstream
//! decide what the payload means, this module only finds it.

/// Pull the first JSON object out of a model reply.
///
/// Tries three shapes, in order:
/// 1. The whole reply is valid JSON
/// 2. A ```` ```json ```` (or bare ```` ``` ````) fenced block
/// 3. The first balanced `{ ... }` span anywhere in the text
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let mut in_block = false;
    let mut current_block = String::new();
    for line in text.lines() {
        let marker = line.trim();
        if !in_block && (marker == "```json" || marker == "```") {
            in_block = true;
            current_block.clear();
        } else if in_block && marker == "```" {
            in_block = false;
            if let Ok(value) = serde_json::from_str(&current_block) {
                return Some(value);
            }
        } else if in_block {
            current_block.push_str(line);
            current_block.push('\n');
        }
    }

    first_balanced_object(text).and_then(|span| serde_json::from_str(span).ok())
}

/// Locate the first balanced top-level `{ ... }` span, honoring string
/// literals and escapes so braces inside values don't end the scan early.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
