use std::path::{Path, PathBuf};

use crate::foundation::error::{FolioError, FolioResult};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Measured pixel extent of one shaped line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineExtent {
    /// Advance width in pixels.
    pub width: f32,
    /// Line height (ascent + descent + leading) in pixels.
    pub height: f32,
}

/// Stateful helper for shaping and measuring single lines of cover text.
///
/// One engine is built per resolved font and reused for every measurement of
/// a run; shaping never touches the filesystem.
pub struct CoverTextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Vec<u8>,
}

impl CoverTextEngine {
    /// Construct an engine from raw font bytes.
    pub fn new(font_bytes: Vec<u8>) -> FolioResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| FolioError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FolioError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes,
        })
    }

    /// Primary family name resolved from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw bytes backing the font, for glyph rasterization.
    pub fn font_bytes(&self) -> &[u8] {
        &self.font_bytes
    }

    /// Shape one line of text at `size_px`. No line breaking is applied: the
    /// wrap algorithm owns breaking and feeds this one candidate at a time.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> FolioResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FolioError::render("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::default()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measure one line of text at `size_px` without keeping the layout.
    pub fn measure_line(&mut self, text: &str, size_px: f32) -> FolioResult<LineExtent> {
        let layout = self.layout_line(text, size_px)?;
        Ok(measure_layout(&layout))
    }
}

/// Pixel extent of a shaped layout, from per-line metrics.
pub fn measure_layout(layout: &parley::Layout<TextBrushRgba8>) -> LineExtent {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(m.advance);
        height += m.ascent + m.descent + m.leading;
    }
    LineExtent { width, height }
}

/// How deep [`resolve_font_bytes`] descends into a search root.
const FONT_SCAN_DEPTH: usize = 3;

/// Resolve font bytes for the cover.
///
/// Tries the explicit path first, then walks the given directories (and
/// their `fonts/` subdirectories, a few levels deep) for the first usable
/// `ttf`/`otf`/`ttc` face, in sorted path order. Returns `None` when nothing
/// usable exists; the caller degrades instead of aborting.
pub fn resolve_font_bytes(explicit: Option<&Path>, search_roots: &[PathBuf]) -> Option<Vec<u8>> {
    if let Some(path) = explicit {
        match std::fs::read(path) {
            Ok(bytes) => return Some(bytes),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "font asset missing, falling back");
            }
        }
    }

    for root in search_roots {
        for dir in [root.clone(), root.join("fonts")] {
            if let Some(bytes) = first_font_in_dir(&dir, FONT_SCAN_DEPTH) {
                return Some(bytes);
            }
        }
    }
    tracing::warn!("no usable font face found in any search root");
    None
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "ttf" || ext == "otf" || ext == "ttc"
        })
        .unwrap_or(false)
}

fn first_font_in_dir(dir: &Path, depth: usize) -> Option<Vec<u8>> {
    let rd = std::fs::read_dir(dir).ok()?;
    let mut paths: Vec<PathBuf> = rd.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in &paths {
        if path.is_file() && is_font_file(path) {
            if let Ok(bytes) = std::fs::read(path) {
                return Some(bytes);
            }
        }
    }
    if depth > 0 {
        for path in &paths {
            if path.is_dir() {
                if let Some(bytes) = first_font_in_dir(path, depth - 1) {
                    return Some(bytes);
                }
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/cover/text.rs"]
mod tests;
