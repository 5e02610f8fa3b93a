use serde_json::Value;

use crate::{
    foundation::error::{FolioError, FolioResult},
    records::reference::normalize_ref,
};

/// One source row: a key/value record already parsed from storage.
pub type Record = serde_json::Map<String, Value>;

/// Slugs are derived from at most this many characters of the title.
const SLUG_TITLE_CHARS: usize = 60;

/// One published issue of the magazine.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Edition {
    /// Opaque identifier articles point at.
    pub id: String,
    /// Ordinal number; the edition with the maximum number is "current".
    pub number: i64,
    /// Human-facing title, when the row carries one.
    pub title: Option<String>,
    /// Remaining row fields, passed through for templating.
    #[serde(flatten)]
    pub extra: Record,
}

impl Edition {
    /// Build an edition from a source row.
    ///
    /// `id` (or the export-style `_id`) and `number` are required; everything
    /// else rides along in `extra`.
    pub fn from_record(row: &Record) -> FolioResult<Self> {
        let id = coerce_str(row.get("id"))
            .or_else(|| coerce_str(row.get("_id")))
            .ok_or_else(|| FolioError::record("edition row is missing 'id'"))?;
        let number = coerce_i64(row.get("number"))
            .ok_or_else(|| FolioError::record(format!("edition '{id}' has no ordinal 'number'")))?;
        let title = coerce_str(row.get("title")).filter(|t| !t.trim().is_empty());

        let mut extra = row.clone();
        for key in ["id", "_id", "number", "title"] {
            extra.remove(key);
        }
        Ok(Self {
            id,
            number,
            title,
            extra,
        })
    }

    /// Cover headline: the edition title, or a generated fallback.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Edição nº {}", self.number))
    }
}

/// One contributed piece, tagged with a category and a moderation status.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Article {
    /// Opaque identifier.
    pub id: String,
    /// Article title (untrusted text).
    pub title: String,
    /// Untrusted markup body as authored.
    pub body_raw: String,
    /// Sanitized HTML body; only ever populated from sanitizer output.
    pub body_html: String,
    /// Category tag (styling key).
    #[serde(rename = "type")]
    pub kind: String,
    /// Moderation status; only `"Approved"` publishes.
    pub status: String,
    /// Normalized edition reference, when one resolves.
    pub edition_ref: Option<String>,
    /// URL-safe slug derived from the title.
    pub slug: String,
    /// Remaining row fields, passed through for templating.
    #[serde(flatten)]
    pub extra: Record,
}

impl Article {
    /// Build an article from a source row, normalizing its edition reference.
    pub fn from_record(row: &Record) -> FolioResult<Self> {
        let id = coerce_str(row.get("id"))
            .or_else(|| coerce_str(row.get("_id")))
            .ok_or_else(|| FolioError::record("article row is missing 'id'"))?;
        let title = coerce_str(row.get("title"))
            .ok_or_else(|| FolioError::record(format!("article '{id}' has no 'title'")))?;
        let body_raw = coerce_str(row.get("body_raw")).unwrap_or_default();
        let kind = coerce_str(row.get("type")).unwrap_or_default();
        let status = coerce_str(row.get("status")).unwrap_or_default();
        let edition_ref = row
            .get("edition_ref")
            .and_then(normalize_ref)
            .filter(|s| !s.is_empty());

        let mut extra = row.clone();
        for key in ["id", "_id", "title", "body_raw", "type", "status", "edition_ref"] {
            extra.remove(key);
        }
        Ok(Self {
            id,
            title,
            body_raw,
            body_html: String::new(),
            kind,
            status,
            edition_ref,
            slug: String::new(),
            extra,
        })
    }

    /// Attach the derived fields: sanitized body and slug.
    ///
    /// `body_html` must come from the sanitizer; this is the only place the
    /// field is written.
    pub fn attach_derived(&mut self, body_html: String) {
        self.body_html = body_html;
        self.slug = title_slug(&self.title);
    }
}

/// Promoted article teaser handed to the templating boundary.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightEntry {
    /// Article title.
    pub title: String,
    /// Placeholder page reference; real page numbers only exist after the
    /// external compile step.
    pub page_hint: String,
}

/// URL-safe slug from the first 60 characters of a title.
pub fn title_slug(title: &str) -> String {
    let head: String = title.chars().take(SLUG_TITLE_CHARS).collect();
    slug::slugify(head)
}

fn coerce_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/records/model.rs"]
mod tests;
