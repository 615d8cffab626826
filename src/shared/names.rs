use crate::game::constants::{MAX_NICKNAME_LENGTH, MAX_ROOM_NAME_LENGTH};

fn collapse_whitespace(value: &str, max_chars: usize) -> String {
    let cleaned = value.split_whitespace().collect::<Vec<_>>().join(" ");
    cleaned.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

pub fn sanitize_nickname(name: &str) -> Option<String> {
    let cleaned = collapse_whitespace(name, MAX_NICKNAME_LENGTH);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

pub fn sanitize_room_name(name: &str, fallback: &str) -> String {
    let cleaned = collapse_whitespace(name, MAX_ROOM_NAME_LENGTH);
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}
