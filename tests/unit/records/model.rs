use super::*;
use serde_json::json;

fn row(v: serde_json::Value) -> Record {
    v.as_object().unwrap().clone()
}

#[test]
fn edition_parses_and_keeps_extras() {
    let e = Edition::from_record(&row(json!({
        "_id": "ed1",
        "number": 7,
        "title": "Especial",
        "theme": "dark",
    })))
    .unwrap();
    assert_eq!(e.id, "ed1");
    assert_eq!(e.number, 7);
    assert_eq!(e.title.as_deref(), Some("Especial"));
    assert_eq!(e.extra.get("theme"), Some(&json!("dark")));
    assert!(!e.extra.contains_key("number"));
}

#[test]
fn edition_number_coerces_from_string() {
    let e = Edition::from_record(&row(json!({"id": "e", "number": "12"}))).unwrap();
    assert_eq!(e.number, 12);
}

#[test]
fn edition_requires_id_and_number() {
    assert!(Edition::from_record(&row(json!({"number": 1}))).is_err());
    assert!(Edition::from_record(&row(json!({"id": "e"}))).is_err());
}

#[test]
fn display_title_falls_back_to_ordinal() {
    let e = Edition::from_record(&row(json!({"id": "e", "number": 3}))).unwrap();
    assert_eq!(e.display_title(), "Edição nº 3");

    let e = Edition::from_record(&row(json!({"id": "e", "number": 3, "title": "  "}))).unwrap();
    assert_eq!(e.display_title(), "Edição nº 3");
}

#[test]
fn article_normalizes_edition_ref_shapes() {
    let a = Article::from_record(&row(json!({
        "id": "a1",
        "title": "T",
        "edition_ref": ["ed1"],
    })))
    .unwrap();
    assert_eq!(a.edition_ref.as_deref(), Some("ed1"));

    let a = Article::from_record(&row(json!({
        "id": "a2",
        "title": "T",
        "edition_ref": {"unique_id": "ed2"},
    })))
    .unwrap();
    assert_eq!(a.edition_ref.as_deref(), Some("ed2"));

    let a = Article::from_record(&row(json!({"id": "a3", "title": "T", "edition_ref": ""})))
        .unwrap();
    assert_eq!(a.edition_ref, None);
}

#[test]
fn article_requires_title() {
    assert!(Article::from_record(&row(json!({"id": "a"}))).is_err());
}

#[test]
fn attach_derived_sets_body_and_slug() {
    let mut a = Article::from_record(&row(json!({
        "id": "a",
        "title": "Um Título com Acentuação!",
        "body_raw": "[b]x[/b]",
    })))
    .unwrap();
    a.attach_derived("<strong>x</strong>".to_string());
    assert_eq!(a.body_html, "<strong>x</strong>");
    assert_eq!(a.slug, "um-titulo-com-acentuacao");
}

#[test]
fn title_slug_truncates_before_slugifying() {
    let long = "palavra ".repeat(20);
    let s = title_slug(&long);
    // 60 chars of input keeps at most seven whole words plus a fragment.
    assert!(s.len() <= 60);
    assert!(s.starts_with("palavra-palavra"));
    assert!(!s.contains(' '));
}
