//! Allow-list HTML sanitization.
//!
//! The cleaner has no failure path by contract: any input, however hostile,
//! produces *some* safe string. Tags and attributes outside the allow-lists
//! are entity-escaped or dropped, never emitted; inline `style` content is
//! filtered down to three CSS properties.

use crate::sanitize::bbcode::expand_bbcode;

/// Tags that may appear in sanitized output: a base safe set plus the
/// structural additions the magazine templates rely on.
const ALLOWED_TAGS: [&str; 21] = [
    "a",
    "abbr",
    "acronym",
    "b",
    "blockquote",
    "code",
    "em",
    "i",
    "li",
    "ol",
    "strong",
    "u",
    "ul",
    "p",
    "span",
    "div",
    "h1",
    "h2",
    "h3",
    "br",
    "hr",
];

/// Image tag, special-cased for its `src`/`alt` attributes.
const IMG_TAG: &str = "img";

/// CSS properties that survive `style` filtering.
const ALLOWED_CSS_PROPS: [&str; 3] = ["color", "font-size", "text-align"];

/// URL schemes accepted on `img src`.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Expand bracket-tag markup and sanitize the result.
///
/// This is the whole §markup pipeline for one article body: empty input
/// yields empty output, adversarial input yields escaped text.
pub fn sanitize_markup(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    clean_html(&expand_bbcode(input))
}

/// Sanitize raw HTML against the allow-lists.
///
/// Total function: unknown tags are escaped in place, comments are dropped,
/// disallowed attributes are stripped, `style` values are property-filtered.
pub fn clean_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('<') {
        escape_into(&mut out, &rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("<!--") {
            // Comments are dropped wholesale, unterminated ones eat the tail.
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        match parse_tag(rest) {
            Some(tag) => {
                emit_tag(&mut out, &tag);
                rest = &rest[tag.raw_len..];
            }
            None => {
                // Not a parseable tag: escape the '<' and move on.
                out.push_str("&lt;");
                rest = &rest[1..];
            }
        }
    }
    escape_into(&mut out, rest);
    out
}

struct ParsedTag<'a> {
    name: String,
    closing: bool,
    self_closing: bool,
    attrs: Vec<(String, String)>,
    raw: &'a str,
    raw_len: usize,
}

fn parse_tag(input: &str) -> Option<ParsedTag<'_>> {
    debug_assert!(input.starts_with('<'));
    let bytes = input.as_bytes();
    let mut i = 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric()) {
        i += 1;
    }
    if i == name_start || !bytes[name_start].is_ascii_alphabetic() {
        return None;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return None, // never terminated
            Some(b'>') => {
                i += 1;
                break;
            }
            Some(b'/') => {
                self_closing = true;
                i += 1;
            }
            Some(_) => {
                let (attr, next) = parse_attr(input, i)?;
                if let Some(attr) = attr {
                    attrs.push(attr);
                }
                i = next;
            }
        }
    }

    Some(ParsedTag {
        name,
        closing,
        self_closing,
        attrs,
        raw: &input[..i],
        raw_len: i,
    })
}

/// Parse one `name` or `name=value` attribute starting at byte `i`.
/// Returns `None` for input that cannot advance (prevents infinite loops).
fn parse_attr(input: &str, mut i: usize) -> Option<(Option<(String, String)>, usize)> {
    let bytes = input.as_bytes();
    let name_start = i;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) != Some(&b'=') {
        return Some((Some((name, String::new())), i));
    }
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    let value = match bytes.get(i) {
        Some(&q @ (b'"' | b'\'')) => {
            i += 1;
            let start = i;
            while i < bytes.len() && bytes[i] != q {
                i += 1;
            }
            let v = input[start..i].to_string();
            if i < bytes.len() {
                i += 1; // closing quote
            }
            v
        }
        _ => {
            let start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            input[start..i].to_string()
        }
    };
    Some((Some((name, value)), i))
}

fn emit_tag(out: &mut String, tag: &ParsedTag<'_>) {
    let is_img = tag.name == IMG_TAG;
    if !is_img && !ALLOWED_TAGS.contains(&tag.name.as_str()) {
        escape_into(out, tag.raw);
        return;
    }

    if tag.closing {
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&tag.name);
    for (name, value) in &tag.attrs {
        let kept = match name.as_str() {
            "class" => Some(value.clone()),
            "style" => {
                let filtered = filter_css(value);
                (!filtered.is_empty()).then_some(filtered)
            }
            "src" if is_img => safe_url(value).map(str::to_string),
            "alt" if is_img => Some(value.clone()),
            _ => None,
        };
        if let Some(v) = kept {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(out, &v);
            out.push('"');
        }
    }
    if tag.self_closing || matches!(tag.name.as_str(), "br" | "hr" | "img") {
        out.push('/');
    }
    out.push('>');
}

/// Keep only allow-listed CSS declarations with conservative value syntax.
fn filter_css(style: &str) -> String {
    let mut kept = Vec::new();
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        if !ALLOWED_CSS_PROPS.contains(&prop.as_str()) {
            continue;
        }
        // No colons, slashes, or quotes in values: rules out url(...),
        // javascript: and friends while keeping colors, sizes, keywords.
        let value_ok = !value.is_empty()
            && value.len() <= 64
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || " #%.,()-".contains(c));
        if value_ok {
            kept.push(format!("{prop}:{value}"));
        }
    }
    kept.join(";")
}

/// Accept relative URLs and a small scheme allow-list; reject everything that
/// smuggles a scheme (e.g. `javascript:`).
fn safe_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_control()) {
        return None;
    }
    match trimmed.split_once(':') {
        None => Some(trimmed),
        Some((scheme, _)) => {
            // A ':' after '/', '?' or '#' is not a scheme separator.
            if scheme.contains(['/', '?', '#']) {
                return Some(trimmed);
            }
            ALLOWED_SCHEMES
                .contains(&scheme.to_ascii_lowercase().as_str())
                .then_some(trimmed)
        }
    }
}

/// Entity-escape text, leaving already-encoded entities (`&amp;lt;` etc.)
/// untouched so upstream-escaped input is not double-escaped.
fn escape_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if entity_len(&bytes[idx..]).is_some() => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// Length of a well-formed entity starting at `&`, if any.
fn entity_len(bytes: &[u8]) -> Option<usize> {
    debug_assert_eq!(bytes.first(), Some(&b'&'));
    let body = &bytes[1..];
    let (digits, start): (fn(&u8) -> bool, usize) = match body.first()? {
        b'#' => match body.get(1)? {
            b'x' | b'X' => (|b: &u8| b.is_ascii_hexdigit(), 2),
            _ => (|b: &u8| b.is_ascii_digit(), 1),
        },
        _ => (|b: &u8| b.is_ascii_alphanumeric(), 0),
    };
    let run = body[start..].iter().take_while(|b| digits(b)).count();
    if run == 0 || run > 10 {
        return None;
    }
    (body.get(start + run) == Some(&b';')).then_some(1 + start + run + 1)
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/clean.rs"]
mod tests;
