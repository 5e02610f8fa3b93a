use super::*;
use serde_json::json;

fn article(id: &str, kind: &str, title: &str) -> Article {
    Article::from_record(
        json!({"id": id, "title": title, "type": kind, "status": "Approved"})
            .as_object()
            .unwrap(),
    )
    .unwrap()
}

#[test]
fn picks_at_most_three() {
    let articles: Vec<Article> = (0..10)
        .map(|i| article(&format!("a{i}"), "Fatos", &format!("Título {i}")))
        .collect();
    let mut rng = SplitMix64::new(1);
    assert_eq!(pick_highlights(&articles, &mut rng).len(), MAX_HIGHLIGHTS);
}

#[test]
fn fewer_candidates_than_slots_returns_them_all() {
    let articles = vec![article("a", "Fatos", "Um"), article("b", "Humor", "Dois")];
    let mut rng = SplitMix64::new(1);
    let picked = pick_highlights(&articles, &mut rng);
    assert_eq!(picked.len(), 2);
    let titles: Vec<&str> = picked.iter().map(|h| h.title.as_str()).collect();
    assert!(titles.contains(&"Um"));
    assert!(titles.contains(&"Dois"));
}

#[test]
fn editorials_and_long_titles_are_excluded() {
    let long_title = "x".repeat(MAX_HIGHLIGHT_TITLE_CHARS + 1);
    let articles = vec![
        article("e", "Editorial", "Curto"),
        article("l", "Fatos", &long_title),
        article("ok", "Fatos", "Cabe"),
    ];
    let mut rng = SplitMix64::new(1);
    let picked = pick_highlights(&articles, &mut rng);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].title, "Cabe");
}

#[test]
fn boundary_title_length_is_included() {
    let exact = "x".repeat(MAX_HIGHLIGHT_TITLE_CHARS);
    let articles = vec![article("a", "Fatos", &exact)];
    let mut rng = SplitMix64::new(1);
    assert_eq!(pick_highlights(&articles, &mut rng).len(), 1);
}

#[test]
fn page_hint_is_a_placeholder() {
    let articles = vec![article("a", "Fatos", "Um")];
    let mut rng = SplitMix64::new(1);
    assert_eq!(pick_highlights(&articles, &mut rng)[0].page_hint, "?");
}

#[test]
fn sampling_is_deterministic_for_a_seed() {
    let articles: Vec<Article> = (0..20)
        .map(|i| article(&format!("a{i}"), "Fatos", &format!("Título {i}")))
        .collect();
    let a = pick_highlights(&articles, &mut SplitMix64::new(99));
    let b = pick_highlights(&articles, &mut SplitMix64::new(99));
    assert_eq!(a, b);
}

#[test]
fn samples_are_distinct() {
    let articles: Vec<Article> = (0..8)
        .map(|i| article(&format!("a{i}"), "Fatos", &format!("Título {i}")))
        .collect();
    for seed in 0..32 {
        let picked = pick_highlights(&articles, &mut SplitMix64::new(seed));
        let mut titles: Vec<&str> = picked.iter().map(|h| h.title.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), MAX_HIGHLIGHTS);
    }
}

#[test]
fn empty_input_yields_empty_output() {
    let mut rng = SplitMix64::new(1);
    assert!(pick_highlights(&[], &mut rng).is_empty());
}
