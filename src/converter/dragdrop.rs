//! Raw drag-and-drop payload parsing.
//!
//! Some drop sources hand over a single string holding every dragged path,
//! where entries containing whitespace are wrapped in braces:
//! `{C:/a b.mp4} {C:/c.wav}`. Bare entries are whitespace-delimited.

#![allow(dead_code)]

/// Split a raw drop payload into individual path strings.
pub fn parse_drop_payload(payload: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut chars = payload.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '{' {
            chars.next();
            let mut token = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                token.push(ch);
            }
            let token = token.trim();
            if !token.is_empty() {
                paths.push(token.to_string());
            }
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            paths.push(token);
        }
    }

    paths
}
