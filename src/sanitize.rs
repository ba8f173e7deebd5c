//! Output sanitization for untrusted bookmark text.
//!
//! Applied to every bookmark on its way out of the system, never on the way in:
//! the store keeps whatever the client sent verbatim, and only responses are
//! cleaned. Non-whitelisted tags are escaped in place (`<script>` becomes
//! `&lt;script&gt;` with its inner text untouched); whitelisted tags survive but
//! lose any attribute not explicitly allowed, which strips inline event handlers.
//! The transformation is idempotent since escaped output contains no `<` and we
//! never touch a bare `&`.

use crate::models::Bookmark;

/// Tags that survive sanitization. Everything else is escaped as text.
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "em", "i", "img", "li", "ol", "p", "pre", "strong", "u",
    "ul",
];

fn allowed_attribute(tag: &str, attr: &str) -> bool {
    match tag {
        "a" => matches!(attr, "href" | "title" | "target"),
        "img" => matches!(attr, "src" | "alt" | "title" | "width" | "height"),
        _ => false,
    }
}

/// URL-bearing attributes with a script scheme are dropped entirely.
fn dangerous_value(attr: &str, value: &str) -> bool {
    (attr == "href" || attr == "src")
        && value.trim_start().to_ascii_lowercase().starts_with("javascript:")
}

/// Clean untrusted text for inclusion in a response body.
pub fn clean(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            let next = input[pos..].find('<').map(|i| pos + i).unwrap_or(bytes.len());
            out.push_str(&input[pos..next]);
            pos = next;
            continue;
        }

        match parse_tag(input, pos) {
            Some(tag) => {
                if ALLOWED_TAGS.contains(&tag.name.as_str()) {
                    out.push_str(&rebuild_tag(&tag));
                } else {
                    // Escape the angle brackets, keep the tag text readable.
                    // The body can carry its own '<', which must be escaped too
                    // or the output would not survive a second pass.
                    out.push_str("&lt;");
                    out.push_str(&input[pos + 1..tag.end - 1].replace('<', "&lt;"));
                    out.push_str("&gt;");
                }
                pos = tag.end;
            }
            None => {
                // A lone '<' that does not form a tag is escaped as text.
                out.push_str("&lt;");
                pos += 1;
            }
        }
    }

    out
}

/// Sanitize the text fields of an outbound bookmark. `id` and `rating` pass
/// through unchanged.
pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        id: bookmark.id,
        title: clean(&bookmark.title),
        url: clean(&bookmark.url),
        description: clean(&bookmark.description),
        rating: bookmark.rating,
    }
}

struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
    attributes: Vec<(String, Option<String>)>,
    /// Byte offset one past the terminating '>'.
    end: usize,
}

/// Parse a candidate tag starting at the '<' at `start`. Returns `None` when the
/// text does not form a tag (no terminating '>', or no tag name).
fn parse_tag(input: &str, start: usize) -> Option<Tag> {
    let close = input[start..].find('>').map(|i| start + i)?;
    let body = &input[start + 1..close];

    let (closing, body) = match body.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (self_closing, body) = match body.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let mut chars = body.char_indices();
    let name_end = chars
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    if name_end == 0 {
        return None;
    }
    let name = body[..name_end].to_ascii_lowercase();

    Some(Tag {
        name,
        closing,
        self_closing,
        attributes: parse_attributes(&body[name_end..]),
        end: close + 1,
    })
}

fn parse_attributes(mut rest: &str) -> Vec<(String, Option<String>)> {
    let mut attributes = Vec::new();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return attributes;
        }

        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                let (value, remainder) = take_attribute_value(after);
                rest = remainder;
                Some(value)
            }
            None => None,
        };

        if !name.is_empty() {
            attributes.push((name, value));
        }
    }
}

fn take_attribute_value(input: &str) -> (String, &str) {
    match input.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &input[1..];
            match inner.find(quote) {
                Some(end) => (inner[..end].to_string(), &inner[end + 1..]),
                None => (inner.to_string(), ""),
            }
        }
        _ => {
            let end = input.find(char::is_whitespace).unwrap_or(input.len());
            (input[..end].to_string(), &input[end..])
        }
    }
}

fn rebuild_tag(tag: &Tag) -> String {
    if tag.closing {
        return format!("</{}>", tag.name);
    }

    let mut out = String::from("<");
    out.push_str(&tag.name);
    for (name, value) in &tag.attributes {
        if !allowed_attribute(&tag.name, name) {
            continue;
        }
        match value {
            Some(value) if !dangerous_value(name, value) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
            _ => {}
        }
    }
    if tag.self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}
