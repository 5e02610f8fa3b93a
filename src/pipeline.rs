//! End-to-end issue assembly: records in, renderable bundle out.

use std::{collections::BTreeMap, path::PathBuf};

use chrono::Datelike;

use crate::{
    cover::{
        compose::{blank_back_cover, compose_cover},
        layout::CoverStyle,
        text::resolve_font_bytes,
    },
    foundation::{error::FolioResult, math::SplitMix64},
    issue::{
        highlights::pick_highlights,
        select::{current_edition, select_articles},
        style::{StyleRegistry, StyleSpec},
    },
    records::model::{Article, Edition, HighlightEntry, Record},
    sanitize::clean::sanitize_markup,
};

/// Inputs that vary per run.
#[derive(Clone, Debug)]
pub struct AssemblyOptions {
    /// Cover background image; without one no cover files are produced.
    pub cover_background: Option<PathBuf>,
    /// Explicit font file for cover text.
    pub font_path: Option<PathBuf>,
    /// Directories scanned for a font when `font_path` is absent or unusable.
    pub font_search_roots: Vec<PathBuf>,
    /// Publication date stamped into the cover subtitle.
    pub issue_date: chrono::NaiveDate,
    /// Fixed seed for highlight sampling; `None` seeds from the clock.
    pub seed: Option<u64>,
}

/// Everything downstream templating and compilation needs for one issue.
#[derive(Debug, serde::Serialize)]
pub struct IssueBundle {
    /// The current edition.
    pub edition: Edition,
    /// Selected articles in final page order, bodies sanitized.
    pub articles: Vec<Article>,
    /// Promoted teasers for the cover flap.
    pub highlights: Vec<HighlightEntry>,
    /// Category style map covering every category present in `articles`.
    pub styles: BTreeMap<String, StyleSpec>,
    /// Cover subtitle line.
    pub subtitle: String,
    /// Generated front cover, when a background was supplied.
    pub cover_path: Option<PathBuf>,
    /// Generated back cover, when a background was supplied.
    pub back_cover_path: Option<PathBuf>,
}

/// Boundary for the downstream document producer (templating, PDF compile).
///
/// Assembly ends at the bundle; implementations own everything after it.
pub trait DocumentRenderer {
    /// Render one assembled issue.
    fn render(&mut self, bundle: &IssueBundle) -> FolioResult<()>;
}

/// Assemble the current issue from raw edition and article rows.
///
/// Fails fast when no edition exists; every later stage degrades instead of
/// aborting (an issue with zero articles is still a valid issue).
#[tracing::instrument(skip_all, fields(editions = edition_rows.len(), articles = article_rows.len()))]
pub fn assemble(
    edition_rows: &[Record],
    article_rows: &[Record],
    options: &AssemblyOptions,
) -> FolioResult<IssueBundle> {
    let editions = edition_rows
        .iter()
        .map(Edition::from_record)
        .collect::<FolioResult<Vec<_>>>()?;
    let edition = current_edition(&editions)?.clone();
    tracing::info!(edition = %edition.id, number = edition.number, "assembling issue");

    let parsed = article_rows
        .iter()
        .map(Article::from_record)
        .collect::<FolioResult<Vec<_>>>()?;
    let mut articles = select_articles(parsed, &edition);
    for article in &mut articles {
        let body_html = sanitize_markup(&article.body_raw);
        article.attach_derived(body_html);
    }

    let mut registry = StyleRegistry::builtin();
    for article in &articles {
        registry.resolve(&article.kind);
    }

    let mut rng = match options.seed {
        Some(seed) => SplitMix64::new(seed),
        None => SplitMix64::from_time(),
    };
    let highlights = pick_highlights(&articles, &mut rng);

    let subtitle = issue_subtitle(edition.number, options.issue_date);

    let (cover_path, back_cover_path) = match &options.cover_background {
        Some(background) => {
            let font_bytes =
                resolve_font_bytes(options.font_path.as_deref(), &options.font_search_roots);
            let cover = compose_cover(
                background,
                &edition.display_title(),
                &subtitle,
                font_bytes,
                &CoverStyle::default(),
            )?;
            let back_dir = background
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let back = blank_back_cover(&back_dir)?;
            (Some(cover), Some(back))
        }
        None => {
            tracing::warn!("no cover background supplied, skipping cover generation");
            (None, None)
        }
    };

    Ok(IssueBundle {
        edition,
        articles,
        highlights,
        styles: registry.map().clone(),
        subtitle,
        cover_path,
        back_cover_path,
    })
}

/// Cover subtitle: edition ordinal plus the issue month, written out in
/// Portuguese.
pub fn issue_subtitle(number: i64, date: chrono::NaiveDate) -> String {
    format!(
        "Edição nº {} – {} de {}",
        number,
        month_name_pt(date.month()),
        date.year()
    )
}

fn month_name_pt(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        _ => "Dezembro",
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
