use std::collections::BTreeMap;

/// Visual treatment for one article category.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    /// Accent color as a CSS hex string.
    pub accent_color: String,
    /// Body column count (1, 2 or 3).
    pub column_count: u8,
    /// Optional text alignment override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl StyleSpec {
    fn new(accent_color: &str, column_count: u8) -> Self {
        Self {
            accent_color: accent_color.to_string(),
            column_count,
            text_align: None,
        }
    }

    fn aligned(accent_color: &str, column_count: u8, align: &str) -> Self {
        Self {
            text_align: Some(align.to_string()),
            ..Self::new(accent_color, column_count)
        }
    }

    /// Treatment applied to categories the built-in map does not know.
    pub fn fallback() -> Self {
        Self::new("#333", 1)
    }
}

/// Per-run mapping from article category to [`StyleSpec`].
///
/// Unknown categories are assigned the fallback spec and memoized, so every
/// article sharing an unknown category renders consistently within one run.
/// The registry is a plain value created at the start of each run; nothing
/// leaks across runs.
#[derive(Clone, Debug)]
pub struct StyleRegistry {
    map: BTreeMap<String, StyleSpec>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StyleRegistry {
    /// Registry seeded with the magazine's known categories.
    pub fn builtin() -> Self {
        let mut map = BTreeMap::new();
        map.insert("Opinião".to_string(), StyleSpec::new("#d4235a", 1));
        map.insert("Fatos".to_string(), StyleSpec::new("#d62839", 2));
        map.insert("Editorial".to_string(), StyleSpec::new("#222", 1));
        map.insert(
            "Poesia".to_string(),
            StyleSpec::aligned("#9f42e0", 1, "center"),
        );
        map.insert(
            "Divulgação científica".to_string(),
            StyleSpec::new("#0077ff", 2),
        );
        map.insert("Humor".to_string(), StyleSpec::new("#00b66d", 2));
        map.insert("Eventos".to_string(), StyleSpec::new("#e68e00", 2));
        map.insert("Filosofia".to_string(), StyleSpec::new("#005f99", 2));
        map.insert(
            "Contra-apologética".to_string(),
            StyleSpec::new("#951dff", 2),
        );
        Self { map }
    }

    /// Resolve a category, registering the fallback spec on a miss.
    ///
    /// Idempotent: repeated misses for the same category return the same
    /// registered value, not a fresh one.
    pub fn resolve(&mut self, kind: &str) -> &StyleSpec {
        self.map
            .entry(kind.to_string())
            .or_insert_with(StyleSpec::fallback)
    }

    /// Read-only view of the resolved map, for the templating boundary.
    pub fn map(&self) -> &BTreeMap<String, StyleSpec> {
        &self.map
    }
}

#[cfg(test)]
#[path = "../../tests/unit/issue/style.rs"]
mod tests;
