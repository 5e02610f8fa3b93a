use super::*;
use crate::foundation::error::FolioError;
use serde_json::json;

fn rows(v: serde_json::Value) -> Vec<Record> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect()
}

fn options() -> AssemblyOptions {
    AssemblyOptions {
        cover_background: None,
        font_path: None,
        font_search_roots: Vec::new(),
        issue_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
        seed: Some(7),
    }
}

fn fixture_editions() -> Vec<Record> {
    rows(json!([
        {"id": "ed-old", "number": 1},
        {"id": "ed-new", "number": 2, "title": "Edição Especial"},
    ]))
}

fn fixture_articles() -> Vec<Record> {
    rows(json!([
        {
            "id": "a1",
            "title": "Fatos do Mês",
            "type": "Fatos",
            "status": "Approved",
            "edition_ref": "ed-new",
            "body_raw": "[b]negrito[/b] e <script>alert(1)</script>",
        },
        {
            "id": "a2",
            "title": "Palavra do Editor",
            "type": "Editorial",
            "status": "Approved",
            "edition_ref": ["ed-new"],
            "body_raw": "texto",
        },
        {
            "id": "a3",
            "title": "Rascunho",
            "type": "Fatos",
            "status": "Draft",
            "edition_ref": "ed-new",
            "body_raw": "x",
        },
        {
            "id": "a4",
            "title": "De Outra Edição",
            "type": "Fatos",
            "status": "Approved",
            "edition_ref": "ed-old",
            "body_raw": "x",
        },
        {
            "id": "a5",
            "title": "Categoria Nova",
            "type": "Culinária",
            "status": "Approved",
            "edition_ref": {"unique_id": "ed-new"},
            "body_raw": "x",
        },
    ]))
}

#[test]
fn assemble_selects_sanitizes_and_orders() {
    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();

    assert_eq!(bundle.edition.id, "ed-new");
    let ids: Vec<&str> = bundle.articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a2", "a1", "a5"]);

    let a1 = bundle.articles.iter().find(|a| a.id == "a1").unwrap();
    assert_eq!(
        a1.body_html,
        "<strong>negrito</strong> e &lt;script&gt;alert(1)&lt;/script&gt;"
    );
    assert_eq!(a1.slug, "fatos-do-mes");
}

#[test]
fn assemble_fails_without_editions() {
    let err = assemble(&[], &fixture_articles(), &options()).unwrap_err();
    assert!(matches!(err, FolioError::Validation(_)));
}

#[test]
fn styles_cover_every_selected_category() {
    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    for article in &bundle.articles {
        assert!(bundle.styles.contains_key(&article.kind), "{}", article.kind);
    }
    // The unknown category resolves to the fallback treatment.
    assert_eq!(bundle.styles["Culinária"], StyleSpec::fallback());
}

#[test]
fn highlights_exclude_editorials() {
    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    assert!(!bundle.highlights.is_empty());
    assert!(
        bundle
            .highlights
            .iter()
            .all(|h| h.title != "Palavra do Editor")
    );
}

#[test]
fn assembly_is_deterministic_for_a_seed() {
    let a = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    let b = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    assert_eq!(a.highlights, b.highlights);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn no_background_means_no_cover_paths() {
    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    assert_eq!(bundle.cover_path, None);
    assert_eq!(bundle.back_cover_path, None);
}

#[test]
fn zero_selected_articles_is_still_a_bundle() {
    let editions = rows(json!([{"id": "ed", "number": 1}]));
    let bundle = assemble(&editions, &[], &options()).unwrap();
    assert!(bundle.articles.is_empty());
    assert!(bundle.highlights.is_empty());
}

#[test]
fn subtitle_spells_the_month_in_portuguese() {
    assert_eq!(
        issue_subtitle(9, chrono::NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()),
        "Edição nº 9 – Maio de 2026"
    );
    assert_eq!(
        issue_subtitle(12, chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        "Edição nº 12 – Dezembro de 2025"
    );
}

#[test]
fn renderer_seam_receives_the_bundle() {
    struct TitleCollector(Vec<String>);
    impl DocumentRenderer for TitleCollector {
        fn render(&mut self, bundle: &IssueBundle) -> FolioResult<()> {
            self.0
                .extend(bundle.articles.iter().map(|a| a.title.clone()));
            Ok(())
        }
    }

    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    let mut renderer = TitleCollector(Vec::new());
    renderer.render(&bundle).unwrap();
    assert_eq!(renderer.0.len(), 3);
    assert_eq!(renderer.0[0], "Palavra do Editor");
}

#[test]
fn bundle_serializes_for_templating() {
    let bundle = assemble(&fixture_editions(), &fixture_articles(), &options()).unwrap();
    let v = serde_json::to_value(&bundle).unwrap();
    assert_eq!(v["edition"]["id"], "ed-new");
    assert!(v["articles"].as_array().unwrap().len() == 3);
    assert!(v["styles"].get("Fatos").is_some());
    assert_eq!(v["subtitle"], "Edição nº 2 – Maio de 2026");
}
