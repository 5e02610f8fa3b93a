use super::*;

#[test]
fn basic_inline_tags_expand() {
    assert_eq!(expand_bbcode("[b]x[/b]"), "<strong>x</strong>");
    assert_eq!(expand_bbcode("[i]x[/i]"), "<em>x</em>");
    assert_eq!(expand_bbcode("[u]x[/u]"), "<u>x</u>");
    assert_eq!(expand_bbcode("[s]x[/s]"), "<strike>x</strike>");
}

#[test]
fn quote_accepts_an_argument() {
    assert_eq!(
        expand_bbcode("[quote=alguém]x[/quote]"),
        "<blockquote>x</blockquote>"
    );
}

#[test]
fn center_becomes_styled_div() {
    assert_eq!(
        expand_bbcode("[center]x[/center]"),
        "<div style=\"text-align:center;\">x</div>"
    );
}

#[test]
fn color_validates_its_value() {
    assert_eq!(
        expand_bbcode("[color=#ff0000]x[/color]"),
        "<span style=\"color:#ff0000;\">x</span>"
    );
    assert_eq!(
        expand_bbcode("[color=red]x[/color]"),
        "<span style=\"color:red;\">x</span>"
    );
    // Hostile value: the tag is kept as literal text instead.
    let out = expand_bbcode("[color=red;background:url(x)]x[/color]");
    assert!(!out.contains("<span"));
    assert!(out.contains("[color=red;background:url(x)]"));
}

#[test]
fn url_emits_escaped_href() {
    assert_eq!(
        expand_bbcode("[url=https://example.com/?a=1&b=2]x[/url]"),
        "<a href=\"https://example.com/?a=1&amp;b=2\">x</a>"
    );
}

#[test]
fn lists_expand_with_auto_closed_items() {
    assert_eq!(
        expand_bbcode("[list][*]a[*]b[/list]"),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        expand_bbcode("[list=1][*]a[/list]"),
        "<ol><li>a</li></ol>"
    );
}

#[test]
fn unknown_tags_survive_as_literal_text() {
    assert_eq!(expand_bbcode("[weird]x[/weird]"), "[weird]x[/weird]");
}

#[test]
fn mismatched_close_is_literal_and_open_is_auto_closed() {
    assert_eq!(expand_bbcode("[b]x[/i]"), "<strong>x[/i]</strong>");
    assert_eq!(expand_bbcode("[b]x"), "<strong>x</strong>");
}

#[test]
fn plain_html_between_tags_is_escaped() {
    assert_eq!(
        expand_bbcode("[b]<img src=x onerror=alert(1)>[/b]"),
        "<strong>&lt;img src=x onerror=alert(1)&gt;</strong>"
    );
}

#[test]
fn newlines_become_breaks() {
    assert_eq!(expand_bbcode("a\r\nb"), "a<br/>b");
}

#[test]
fn unterminated_bracket_is_literal() {
    assert_eq!(expand_bbcode("a[b"), "a[b");
}

#[test]
fn void_tags_emit_directly() {
    assert_eq!(expand_bbcode("[hr]"), "<hr/>");
    assert_eq!(expand_bbcode("[br]"), "<br/>");
}
