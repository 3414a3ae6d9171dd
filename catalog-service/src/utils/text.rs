/// Splits a pipe-delimited column (`"A|B"`) into trimmed, non-empty names.
pub fn split_delimited(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// `"A|B"` as shown to readers: `"A, B"`.
pub fn display_list(value: Option<&str>) -> String {
    value.map(split_delimited).unwrap_or_default().join(", ")
}

/// LIKE pattern matching titles that start with `prefix` literally.
pub fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Percent-encodes everything outside the RFC 3986 unreserved set, for
/// building links to search pages and review pages.
pub fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Book ids are unsigned integers; anything else is rejected before it
/// reaches a query.
pub fn parse_book_id(raw: &str) -> Option<u32> {
    if raw.is_empty() || raw.len() > 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
