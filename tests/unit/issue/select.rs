use super::*;
use serde_json::json;

fn edition(id: &str, number: i64) -> Edition {
    Edition::from_record(json!({"id": id, "number": number}).as_object().unwrap()).unwrap()
}

fn article(id: &str, kind: &str, status: &str, edition_ref: &str) -> Article {
    Article::from_record(
        json!({
            "id": id,
            "title": format!("Título {id}"),
            "type": kind,
            "status": status,
            "edition_ref": edition_ref,
        })
        .as_object()
        .unwrap(),
    )
    .unwrap()
}

#[test]
fn current_edition_is_the_maximum_ordinal() {
    let editions = vec![edition("a", 3), edition("b", 9), edition("c", 5)];
    assert_eq!(current_edition(&editions).unwrap().id, "b");
}

#[test]
fn current_edition_tie_keeps_first() {
    let editions = vec![edition("a", 9), edition("b", 9)];
    assert_eq!(current_edition(&editions).unwrap().id, "a");
}

#[test]
fn no_editions_fails_fast() {
    let err = current_edition(&[]).unwrap_err();
    assert!(matches!(err, FolioError::Validation(_)));
}

#[test]
fn selection_filters_status_and_reference() {
    let ed = edition("ed1", 1);
    let articles = vec![
        article("keep", "Fatos", "Approved", "ed1"),
        article("wrong-status", "Fatos", "Draft", "ed1"),
        article("wrong-edition", "Fatos", "Approved", "ed2"),
    ];
    let out = select_articles(articles, &ed);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "keep");
}

#[test]
fn articles_without_reference_never_match() {
    let ed = edition("ed1", 1);
    let mut a = article("a", "Fatos", "Approved", "ed1");
    a.edition_ref = None;
    assert!(select_articles(vec![a], &ed).is_empty());
}

#[test]
fn editorial_leads_and_order_is_otherwise_stable() {
    let ed = edition("ed1", 1);
    let articles = vec![
        article("f1", "Fatos", "Approved", "ed1"),
        article("p1", "Poesia", "Approved", "ed1"),
        article("e1", "Editorial", "Approved", "ed1"),
        article("f2", "Fatos", "Approved", "ed1"),
        article("e2", "Editorial", "Approved", "ed1"),
    ];
    let ids: Vec<String> = select_articles(articles, &ed)
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["e1", "e2", "f1", "p1", "f2"]);
}

#[test]
fn empty_selection_is_not_an_error() {
    let ed = edition("ed1", 1);
    assert!(select_articles(Vec::new(), &ed).is_empty());
}
