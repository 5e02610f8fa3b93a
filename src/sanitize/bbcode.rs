//! Bracket-tag markup expansion.
//!
//! Expands the lightweight `[b]...[/b]` markup authors write into raw HTML.
//! The output is *not* safe yet: it always flows through [`crate::sanitize::clean`]
//! afterwards. Plain text is entity-escaped here, so hostile HTML typed
//! between tags never survives as markup.

/// Expand bracket-tag markup into raw HTML.
///
/// Unknown or malformed tags are kept as escaped literal text rather than
/// dropped; unclosed tags are auto-closed at end of input. Newlines become
/// `<br/>`.
pub fn expand_bbcode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut rest = input;

    while let Some(pos) = rest.find('[') {
        push_text(&mut out, &rest[..pos]);
        rest = &rest[pos..];

        let Some(end) = rest.find(']') else {
            // No closing bracket anywhere: the rest is literal text.
            push_text(&mut out, rest);
            rest = "";
            break;
        };
        let token = &rest[1..end];
        let consumed = &rest[..=end];
        rest = &rest[end + 1..];

        if let Some(name) = token.strip_prefix('/') {
            if !close_tag(&mut out, &mut stack, name) {
                push_text(&mut out, consumed);
            }
        } else if !open_tag(&mut out, &mut stack, token) {
            push_text(&mut out, consumed);
        }
    }
    push_text(&mut out, rest);

    while let Some(open) = stack.pop() {
        out.push_str(open.closer());
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OpenTag {
    Strong,
    Em,
    Underline,
    Strike,
    Blockquote,
    Code,
    CenterDiv,
    ColorSpan,
    Anchor,
    UnorderedList,
    OrderedList,
    ListItem,
}

impl OpenTag {
    fn closer(self) -> &'static str {
        match self {
            Self::Strong => "</strong>",
            Self::Em => "</em>",
            Self::Underline => "</u>",
            Self::Strike => "</strike>",
            Self::Blockquote => "</blockquote>",
            Self::Code => "</code>",
            Self::CenterDiv => "</div>",
            Self::ColorSpan => "</span>",
            Self::Anchor => "</a>",
            Self::UnorderedList => "</ul>",
            Self::OrderedList => "</ol>",
            Self::ListItem => "</li>",
        }
    }
}

fn open_tag(out: &mut String, stack: &mut Vec<OpenTag>, token: &str) -> bool {
    let (name, arg) = match token.split_once('=') {
        Some((n, a)) => (n, Some(a)),
        None => (token, None),
    };
    let name = name.trim().to_ascii_lowercase();

    let open = match (name.as_str(), arg) {
        ("b", None) => Some((OpenTag::Strong, "<strong>".to_string())),
        ("i", None) => Some((OpenTag::Em, "<em>".to_string())),
        ("u", None) => Some((OpenTag::Underline, "<u>".to_string())),
        ("s", None) => Some((OpenTag::Strike, "<strike>".to_string())),
        ("quote", _) => Some((OpenTag::Blockquote, "<blockquote>".to_string())),
        ("code", None) => Some((OpenTag::Code, "<code>".to_string())),
        ("center", None) => Some((
            OpenTag::CenterDiv,
            "<div style=\"text-align:center;\">".to_string(),
        )),
        ("color", Some(c)) if is_css_color(c) => Some((
            OpenTag::ColorSpan,
            format!("<span style=\"color:{};\">", c.trim()),
        )),
        ("url", arg) => {
            let href = arg.unwrap_or("").trim();
            Some((
                OpenTag::Anchor,
                format!("<a href=\"{}\">", escape_attr(href)),
            ))
        }
        ("list", None) => Some((OpenTag::UnorderedList, "<ul>".to_string())),
        ("list", Some(_)) => Some((OpenTag::OrderedList, "<ol>".to_string())),
        ("*", None) => {
            if stack.last() == Some(&OpenTag::ListItem) {
                stack.pop();
                out.push_str("</li>");
            }
            Some((OpenTag::ListItem, "<li>".to_string()))
        }
        ("hr", None) => {
            out.push_str("<hr/>");
            return true;
        }
        ("br", None) => {
            out.push_str("<br/>");
            return true;
        }
        _ => None,
    };

    match open {
        Some((tag, html)) => {
            out.push_str(&html);
            stack.push(tag);
            true
        }
        None => false,
    }
}

fn close_tag(out: &mut String, stack: &mut Vec<OpenTag>, name: &str) -> bool {
    let name = name.trim().to_ascii_lowercase();
    let wanted = match name.as_str() {
        "b" => OpenTag::Strong,
        "i" => OpenTag::Em,
        "u" => OpenTag::Underline,
        "s" => OpenTag::Strike,
        "quote" => OpenTag::Blockquote,
        "code" => OpenTag::Code,
        "center" => OpenTag::CenterDiv,
        "color" => OpenTag::ColorSpan,
        "url" => OpenTag::Anchor,
        "list" => {
            // Close a dangling item before the list itself.
            if stack.last() == Some(&OpenTag::ListItem) {
                stack.pop();
                out.push_str("</li>");
            }
            match stack.last() {
                Some(&t @ (OpenTag::UnorderedList | OpenTag::OrderedList)) => {
                    stack.pop();
                    out.push_str(t.closer());
                    return true;
                }
                _ => return false,
            }
        }
        _ => return false,
    };

    if stack.last() == Some(&wanted) {
        stack.pop();
        out.push_str(wanted.closer());
        true
    } else {
        false
    }
}

fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            other => out.push(other),
        }
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn is_css_color(raw: &str) -> bool {
    let c = raw.trim();
    if c.is_empty() || c.len() > 32 {
        return false;
    }
    if let Some(hex) = c.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|ch| ch.is_ascii_hexdigit());
    }
    c.chars().all(|ch| ch.is_ascii_alphabetic())
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/bbcode.rs"]
mod tests;
