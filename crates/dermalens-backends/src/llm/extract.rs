//! Response text normalization.
//!
//! The supported backends share no common response schema: one returns a
//! `choices` array with nested messages, another a `candidates` tree,
//! another an `output` envelope. Instead of one parser per backend,
//! [`extract_text`] performs a bounded structural search for the first
//! answer-looking string, tolerating response shapes it has never seen.
//!
//! Extraction precedence (the documented contract, in order):
//!
//! 1. A string is returned as-is; numbers and booleans are stringified.
//! 2. Arrays are searched left to right.
//! 3. Objects are probed in this order:
//!    a. direct string values under [`DIRECT_KEYS`];
//!    b. `choices[0]` — its `message` subtree, then its direct `text`;
//!    c. `content` as an array of blocks (Anthropic envelope);
//!    d. `output` as an array or object;
//!    e. a `data` wrapper;
//!    f. every remaining key, in insertion order.
//! 4. Search stops at [`MAX_DEPTH`]; misses return `None` and the calling
//!    provider raises the format error.
//!
//! A direct-key hit is returned even when empty; nested hits are accepted
//! only when non-empty.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Maximum recursion depth; deeper than any realistic backend envelope.
pub const MAX_DEPTH: usize = 6;

/// Direct string-valued keys, checked first, in priority order.
pub const DIRECT_KEYS: &[&str] = &["output_text", "text", "content", "answer", "reply", "body"];

/// Recover the first extractable answer string from a raw backend response.
///
/// Pure and re-entrant; never panics on malformed shapes. `None` means no
/// text was found within the depth bound.
pub fn extract_text(value: &Value) -> Option<String> {
    let mut visited = HashSet::new();
    find_string(value, 0, &mut visited)
}

fn nonempty(found: Option<String>) -> Option<String> {
    found.filter(|s| !s.is_empty())
}

fn find_string(value: &Value, depth: usize, visited: &mut HashSet<usize>) -> Option<String> {
    if depth > MAX_DEPTH {
        return None;
    }

    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| nonempty(find_string(item, depth + 1, visited))),
        Value::Object(map) => find_in_object(map, depth, visited),
    }
}

fn find_in_object(
    map: &Map<String, Value>,
    depth: usize,
    visited: &mut HashSet<usize>,
) -> Option<String> {
    // Identity guard: each object is entered at most once per call.
    if !visited.insert(map as *const Map<String, Value> as usize) {
        return None;
    }

    for key in DIRECT_KEYS {
        if let Some(Value::String(s)) = map.get(*key) {
            return Some(s.clone());
        }
    }

    if let Some(Value::Array(choices)) = map.get("choices")
        && let Some(first) = choices.first()
    {
        if let Some(message) = first.get("message")
            && let Some(s) = nonempty(find_string(message, depth + 1, visited))
        {
            return Some(s);
        }
        if let Some(Value::String(s)) = first.get("text") {
            return Some(s.clone());
        }
    }

    if let Some(Value::Array(blocks)) = map.get("content")
        && let Some(s) = blocks
            .iter()
            .find_map(|block| nonempty(find_string(block, depth + 1, visited)))
    {
        return Some(s);
    }

    match map.get("output") {
        Some(Value::Array(items)) => {
            if let Some(s) = items
                .iter()
                .find_map(|item| nonempty(find_string(item, depth + 1, visited)))
            {
                return Some(s);
            }
        }
        Some(output @ Value::Object(_)) => {
            if let Some(s) = nonempty(find_string(output, depth + 1, visited)) {
                return Some(s);
            }
        }
        _ => {}
    }

    if let Some(data) = map.get("data")
        && let Some(s) = nonempty(find_string(data, depth + 1, visited))
    {
        return Some(s);
    }

    map.values()
        .find_map(|value| nonempty(find_string(value, depth + 1, visited)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_returned_unchanged() {
        let value = json!("Eczema-like pattern");
        assert_eq!(extract_text(&value), Some("Eczema-like pattern".to_string()));
    }

    #[test]
    fn test_number_and_bool_stringified() {
        assert_eq!(extract_text(&json!(42)), Some("42".to_string()));
        assert_eq!(extract_text(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(extract_text(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn test_null_not_found() {
        assert_eq!(extract_text(&Value::Null), None);
    }

    #[test]
    fn test_choices_message_content() {
        let value = json!({ "choices": [{ "message": { "content": "X" } }] });
        assert_eq!(extract_text(&value), Some("X".to_string()));
    }

    #[test]
    fn test_choices_direct_text() {
        let value = json!({ "choices": [{ "text": "completion text" }] });
        assert_eq!(extract_text(&value), Some("completion text".to_string()));
    }

    #[test]
    fn test_output_object_text() {
        let value = json!({ "output": { "text": "Y" } });
        assert_eq!(extract_text(&value), Some("Y".to_string()));
    }

    #[test]
    fn test_output_nested_choices() {
        let value = json!({
            "output": { "choices": [{ "message": { "content": "Eczema-like pattern" } }] }
        });
        assert_eq!(extract_text(&value), Some("Eczema-like pattern".to_string()));
    }

    #[test]
    fn test_data_wrapper() {
        let value = json!({ "data": { "answer": "wrapped" } });
        assert_eq!(extract_text(&value), Some("wrapped".to_string()));
    }

    #[test]
    fn test_array_searched_left_to_right() {
        let value = json!([null, { "meta": {} }, { "text": "second hit" }, { "text": "third" }]);
        assert_eq!(extract_text(&value), Some("second hit".to_string()));
    }

    #[test]
    fn test_direct_keys_win_over_envelope_shapes() {
        let value = json!({
            "content": "direct content",
            "choices": [{ "message": { "content": "nested" } }]
        });
        assert_eq!(extract_text(&value), Some("direct content".to_string()));
    }

    #[test]
    fn test_direct_key_priority_order() {
        let value = json!({ "text": "from text", "answer": "from answer" });
        assert_eq!(extract_text(&value), Some("from text".to_string()));
    }

    #[test]
    fn test_anthropic_content_blocks_beat_metadata_ids() {
        // The envelope leads with id/type/role strings; the block text must
        // still win.
        let value = json!({
            "id": "msg_0123",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": "Eczema-like pattern" }],
            "stop_reason": "end_turn"
        });
        assert_eq!(extract_text(&value), Some("Eczema-like pattern".to_string()));
    }

    #[test]
    fn test_choices_envelope_beats_leading_id() {
        let value = json!({
            "id": "chatcmpl-9",
            "object": "chat.completion",
            "choices": [{ "message": { "content": "the answer" } }]
        });
        assert_eq!(extract_text(&value), Some("the answer".to_string()));
    }

    #[test]
    fn test_gemini_candidates_found_via_insertion_order_fallback() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "flash answer" }], "role": "model" },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-1.5-flash"
        });
        assert_eq!(extract_text(&value), Some("flash answer".to_string()));
    }

    #[test]
    fn test_fallback_scans_remaining_keys_in_insertion_order() {
        let value = json!({
            "alpha": { "inner": "first" },
            "beta": { "inner": "second" }
        });
        assert_eq!(extract_text(&value), Some("first".to_string()));
    }

    #[test]
    fn test_direct_empty_string_is_returned() {
        let value = json!({ "text": "" });
        assert_eq!(extract_text(&value), Some(String::new()));
    }

    #[test]
    fn test_nested_empty_string_is_skipped() {
        let value = json!([ "", "real" ]);
        assert_eq!(extract_text(&value), Some("real".to_string()));
    }

    #[test]
    fn test_depth_bound_misses_deep_values() {
        // Within the bound.
        let mut shallow = json!("deep answer");
        for _ in 0..MAX_DEPTH {
            shallow = json!({ "wrap": shallow });
        }
        assert_eq!(extract_text(&shallow), Some("deep answer".to_string()));

        // One level past the bound.
        let mut deep = json!("too deep");
        for _ in 0..(MAX_DEPTH + 1) {
            deep = json!({ "wrap": deep });
        }
        assert_eq!(extract_text(&deep), None);
    }

    #[test]
    fn test_no_extractable_text() {
        let value = json!({ "usage": { "total_tokens": 10 }, "flags": [null, null] });
        // Numbers stringify, so usage wins here; make the probe numeric-free.
        assert_eq!(extract_text(&value), Some("10".to_string()));

        let value = json!({ "empty": {}, "list": [], "nothing": null });
        assert_eq!(extract_text(&value), None);
    }

    #[test]
    fn test_wide_structure_terminates() {
        // A large fan-out with no strings must terminate and miss cleanly.
        let leaf = json!({ "a": null, "b": [], "c": {} });
        let wide = json!({
            "one": [leaf.clone(), leaf.clone(), leaf.clone()],
            "two": [leaf.clone(), leaf.clone()],
            "three": leaf
        });
        assert_eq!(extract_text(&wide), None);
    }
}
