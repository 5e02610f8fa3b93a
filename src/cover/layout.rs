use crate::{
    cover::text::CoverTextEngine,
    foundation::{core::Canvas, error::FolioResult},
};

/// Tunable constants for cover composition.
///
/// Sizes are fractions of the canvas width/height so one style works across
/// background resolutions.
#[derive(Clone, Copy, Debug)]
pub struct CoverStyle {
    /// Title font size as a fraction of canvas width.
    pub title_size_frac: f32,
    /// Subtitle font size as a fraction of canvas width.
    pub subtitle_size_frac: f32,
    /// Maximum line width as a fraction of canvas width.
    pub max_width_frac: f32,
    /// Vertical anchor: the title block is centered on this fraction of
    /// canvas height.
    pub center_y_frac: f32,
    /// Fixed spacing between wrapped title lines, in pixels.
    pub line_gap_px: f32,
    /// Gap between the title block and the subtitle, in pixels.
    pub subtitle_gap_px: f32,
    /// Shadow offset from the text position, in pixels.
    pub shadow_offset_px: f32,
    /// Gaussian blur radius applied to the shadow layer.
    pub shadow_blur_radius: u32,
    /// Gaussian sigma for the shadow blur.
    pub shadow_blur_sigma: f32,
    /// Foreground text color, straight RGBA.
    pub text_rgba: [u8; 4],
    /// Shadow ink color, straight RGBA (drawn solid, then blurred).
    pub shadow_rgba: [u8; 4],
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self {
            title_size_frac: 0.07,
            subtitle_size_frac: 0.04,
            max_width_frac: 0.9,
            center_y_frac: 0.65,
            line_gap_px: 10.0,
            subtitle_gap_px: 24.0,
            shadow_offset_px: 4.0,
            shadow_blur_radius: 8,
            shadow_blur_sigma: 4.0,
            text_rgba: [255, 255, 255, 255],
            shadow_rgba: [0, 0, 0, 200],
        }
    }
}

/// One wrapped line with its measured extent and final canvas position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text (words joined by single spaces).
    pub text: String,
    /// Measured advance width in pixels.
    pub width: f32,
    /// Measured line height in pixels.
    pub height: f32,
    /// Left edge on the canvas (independently centered per line).
    pub x: f32,
    /// Top edge on the canvas.
    pub y: f32,
    /// Font size the line was measured at, in pixels.
    pub size_px: f32,
}

/// Ephemeral placement of the whole title block; consumed once by the
/// compositing step.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverLayout {
    /// Placed title lines, top to bottom.
    pub lines: Vec<PlacedLine>,
    /// Total block height including inter-line gaps.
    pub block_height: f32,
    /// Top edge of the block on the canvas.
    pub top_y: f32,
}

/// Greedy word wrap against measured pixel widths.
///
/// Words accumulate into the current line until the measured candidate would
/// exceed `max_width_px`; the overflowing word starts the next line. A word
/// that alone exceeds the budget gets its own line, unsplit. No word is ever
/// dropped, and any non-empty input yields at least one line.
pub fn wrap_text(
    engine: &mut CoverTextEngine,
    text: &str,
    size_px: f32,
    max_width_px: f32,
) -> FolioResult<Vec<(String, f32, f32)>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let extent = engine.measure_line(&candidate, size_px)?;
        if extent.width > max_width_px && !current.is_empty() {
            let closed = engine.measure_line(&current, size_px)?;
            lines.push((std::mem::take(&mut current), closed.width, closed.height));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        let closed = engine.measure_line(&current, size_px)?;
        lines.push((current, closed.width, closed.height));
    }
    Ok(lines)
}

/// Wrap the title and place the resulting block on the canvas.
///
/// The block's vertical center sits at `center_y_frac` of canvas height;
/// each line centers horizontally on its own measured width.
pub fn layout_title(
    engine: &mut CoverTextEngine,
    title: &str,
    canvas: Canvas,
    style: &CoverStyle,
) -> FolioResult<CoverLayout> {
    let size_px = canvas.width as f32 * style.title_size_frac;
    let max_width_px = canvas.width as f32 * style.max_width_frac;
    let wrapped = wrap_text(engine, title, size_px, max_width_px)?;

    let heights_sum: f32 = wrapped.iter().map(|(_, _, h)| *h).sum();
    let gaps = wrapped.len().saturating_sub(1) as f32 * style.line_gap_px;
    let block_height = heights_sum + gaps;
    let top_y = (canvas.height as f32 * style.center_y_frac - block_height / 2.0).max(0.0);

    let mut lines = Vec::with_capacity(wrapped.len());
    let mut y = top_y;
    for (text, width, height) in wrapped {
        let x = ((canvas.width as f32 - width) / 2.0).max(0.0);
        lines.push(PlacedLine {
            text,
            width,
            height,
            x,
            y,
            size_px,
        });
        y += height + style.line_gap_px;
    }

    Ok(CoverLayout {
        lines,
        block_height,
        top_y,
    })
}

/// Place the subtitle as a single centered line below the title block.
pub fn layout_subtitle(
    engine: &mut CoverTextEngine,
    subtitle: &str,
    canvas: Canvas,
    title_block: &CoverLayout,
    style: &CoverStyle,
) -> FolioResult<PlacedLine> {
    let size_px = canvas.width as f32 * style.subtitle_size_frac;
    let extent = engine.measure_line(subtitle, size_px)?;
    let y = title_block.top_y + title_block.block_height + style.subtitle_gap_px;
    Ok(PlacedLine {
        text: subtitle.to_string(),
        width: extent.width,
        height: extent.height,
        x: ((canvas.width as f32 - extent.width) / 2.0).max(0.0),
        y,
        size_px,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/cover/layout.rs"]
mod tests;
