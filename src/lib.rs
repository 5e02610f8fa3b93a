//! Foliopress assembles one magazine issue from raw content rows.
//!
//! The pipeline turns two collections of records (editions and articles) into
//! an [`IssueBundle`] ready for templating and print compilation:
//!
//! 1. **Parse**: rows become typed [`Edition`] and [`Article`] values, with
//!    cross-collection references normalized to plain id strings.
//! 2. **Select**: the edition with the highest ordinal is current; approved
//!    articles pointing at it are kept, editorials first, input order
//!    otherwise preserved.
//! 3. **Sanitize**: article bodies go through BBCode expansion and an HTML
//!    allowlist cleaner; nothing authored ever reaches output unfiltered.
//! 4. **Decorate**: category styles resolve through a memoizing registry and
//!    up to three teaser highlights are sampled for the cover flap.
//! 5. **Compose**: the front cover is rendered over a background image with
//!    wrapped, drop-shadowed text, plus a solid back cover.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: everything except highlight sampling is a
//!   pure function of its input, and the sampler takes an injectable seed.
//! - **Premultiplied RGBA8** through the compositing stages; straight alpha
//!   only at the PNG boundary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cover;
mod foundation;
mod issue;
mod pipeline;
mod records;
mod sanitize;

pub use cover::blur::blur_shadow_layer;
pub use cover::compose::{
    BACK_COVER_CANVAS, BACK_COVER_FILE_NAME, BACK_COVER_RGB, COVER_FILE_NAME, blank_back_cover,
    compose_cover,
};
pub use cover::composite::{over, over_in_place};
pub use cover::layout::{
    CoverLayout, CoverStyle, PlacedLine, layout_subtitle, layout_title, wrap_text,
};
pub use cover::text::{
    CoverTextEngine, LineExtent, TextBrushRgba8, measure_layout, resolve_font_bytes,
};
pub use foundation::core::{
    Canvas, Rgba8Premul, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};
pub use foundation::error::{FolioError, FolioResult};
pub use foundation::math::SplitMix64;
pub use issue::highlights::{MAX_HIGHLIGHT_TITLE_CHARS, MAX_HIGHLIGHTS, pick_highlights};
pub use issue::select::{STATUS_APPROVED, TYPE_EDITORIAL, current_edition, select_articles};
pub use issue::style::{StyleRegistry, StyleSpec};
pub use pipeline::{
    AssemblyOptions, DocumentRenderer, IssueBundle, assemble, issue_subtitle,
};
pub use records::model::{Article, Edition, HighlightEntry, Record, title_slug};
pub use records::reference::normalize_ref;
pub use sanitize::bbcode::expand_bbcode;
pub use sanitize::clean::{clean_html, sanitize_markup};
