use crate::{
    foundation::error::{FolioError, FolioResult},
    records::model::{Article, Edition},
};

/// Moderation status that publishes.
pub const STATUS_APPROVED: &str = "Approved";

/// Article category that sorts ahead of everything else.
pub const TYPE_EDITORIAL: &str = "Editorial";

/// Pick the current edition: the row with the maximum ordinal `number`.
///
/// Ties keep the first-encountered row. An empty collection is a
/// precondition violation and fails fast before any rendering happens.
pub fn current_edition(editions: &[Edition]) -> FolioResult<&Edition> {
    let mut best: Option<&Edition> = None;
    for edition in editions {
        match best {
            Some(b) if edition.number <= b.number => {}
            _ => best = Some(edition),
        }
    }
    best.ok_or_else(|| FolioError::validation("no edition found"))
}

/// Select and order the articles belonging to `edition`.
///
/// Keeps approved articles whose normalized reference equals the edition id,
/// then moves `Editorial` pieces to the front. The partition is stable: the
/// relative input order inside each group is preserved. An empty result is
/// not an error.
pub fn select_articles(articles: Vec<Article>, edition: &Edition) -> Vec<Article> {
    let mut selected: Vec<Article> = articles
        .into_iter()
        .filter(|a| a.status == STATUS_APPROVED && a.edition_ref.as_deref() == Some(&*edition.id))
        .collect();
    // Vec::sort_by_key is stable, so this is a stable partition, not a sort.
    selected.sort_by_key(|a| a.kind != TYPE_EDITORIAL);
    selected
}

#[cfg(test)]
#[path = "../../tests/unit/issue/select.rs"]
mod tests;
