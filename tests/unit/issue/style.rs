use super::*;

#[test]
fn builtin_categories_resolve_to_their_specs() {
    let mut reg = StyleRegistry::builtin();
    let fatos = reg.resolve("Fatos").clone();
    assert_eq!(fatos.accent_color, "#d62839");
    assert_eq!(fatos.column_count, 2);
    assert_eq!(fatos.text_align, None);

    let poesia = reg.resolve("Poesia").clone();
    assert_eq!(poesia.accent_color, "#9f42e0");
    assert_eq!(poesia.column_count, 1);
    assert_eq!(poesia.text_align.as_deref(), Some("center"));
}

#[test]
fn unknown_category_gets_the_fallback() {
    let mut reg = StyleRegistry::builtin();
    assert_eq!(reg.resolve("Culinária").clone(), StyleSpec::fallback());
}

#[test]
fn fallback_resolution_is_memoized() {
    let mut reg = StyleRegistry::builtin();
    let before = reg.map().len();
    reg.resolve("Culinária");
    assert_eq!(reg.map().len(), before + 1);
    reg.resolve("Culinária");
    assert_eq!(reg.map().len(), before + 1);
    assert!(reg.map().contains_key("Culinária"));

    // A fresh registry carries no memory of the previous run.
    assert!(!StyleRegistry::builtin().map().contains_key("Culinária"));
}

#[test]
fn resolve_never_mutates_builtin_entries() {
    let mut reg = StyleRegistry::builtin();
    let first = reg.resolve("Editorial").clone();
    reg.resolve("Nova");
    assert_eq!(reg.resolve("Editorial").clone(), first);
}

#[test]
fn spec_serializes_camel_case_and_skips_empty_align() {
    let spec = StyleSpec::fallback();
    let v = serde_json::to_value(&spec).unwrap();
    assert_eq!(v["accentColor"], "#333");
    assert_eq!(v["columnCount"], 1);
    assert!(v.get("textAlign").is_none());
}
