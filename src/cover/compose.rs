//! Cover compositing: background decode, shadow and foreground text passes,
//! PNG output. The source background file is never modified.

use std::path::{Path, PathBuf};

use crate::{
    cover::{
        blur::blur_shadow_layer,
        composite::over_in_place,
        layout::{CoverStyle, PlacedLine, layout_subtitle, layout_title},
        text::CoverTextEngine,
    },
    foundation::{
        core::{Canvas, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
        error::{FolioError, FolioResult},
    },
};

/// Generated front cover file, written next to the background image.
pub const COVER_FILE_NAME: &str = "cover_generated.png";

/// Back cover file name.
pub const BACK_COVER_FILE_NAME: &str = "back_cover.png";

/// A4 print canvas at 300 dpi, used for the solid back cover.
pub const BACK_COVER_CANVAS: Canvas = Canvas {
    width: 2480,
    height: 3508,
};

/// Back cover fill, straight RGB.
pub const BACK_COVER_RGB: [u8; 3] = [0xd6, 0x28, 0x39];

/// Compose the front cover over `background` and write it as
/// [`COVER_FILE_NAME`] in the background's directory.
///
/// When no font could be resolved the background is re-encoded untouched so
/// the issue still gets a cover; assembly never aborts on a missing font.
#[tracing::instrument(skip(font_bytes, style), fields(background = %background.display()))]
pub fn compose_cover(
    background: &Path,
    title: &str,
    subtitle: &str,
    font_bytes: Option<Vec<u8>>,
    style: &CoverStyle,
) -> FolioResult<PathBuf> {
    let img = image::open(background)
        .map_err(|err| FolioError::render(format!("cannot open cover background: {err}")))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let canvas = Canvas { width, height };
    let out_path = background.with_file_name(COVER_FILE_NAME);

    let Some(font_bytes) = font_bytes else {
        tracing::warn!("no font available, writing untitled cover");
        save_rgba8_png(&out_path, img.into_raw(), canvas)?;
        return Ok(out_path);
    };

    let mut engine = CoverTextEngine::new(font_bytes)?;
    let title_block = layout_title(&mut engine, title, canvas, style)?;
    let subtitle_line = layout_subtitle(&mut engine, subtitle, canvas, &title_block, style)?;

    let mut lines: Vec<PlacedLine> = title_block.lines;
    if !subtitle_line.text.is_empty() {
        lines.push(subtitle_line);
    }

    let mut pixels = img.into_raw();
    premultiply_rgba8_in_place(&mut pixels);

    let mut painter = TextPainter::new(&mut engine, canvas)?;

    // Shadow pass: all lines drawn offset in the shadow ink on a transparent
    // layer, blurred once, composited under the sharp text.
    let mut shadow = painter.paint_lines(&lines, style.shadow_offset_px, style.shadow_rgba)?;
    blur_shadow_layer(
        &mut shadow,
        canvas,
        style.shadow_blur_radius,
        style.shadow_blur_sigma,
    )?;
    over_in_place(&mut pixels, &shadow, 255)?;

    let foreground = painter.paint_lines(&lines, 0.0, style.text_rgba)?;
    over_in_place(&mut pixels, &foreground, 255)?;

    unpremultiply_rgba8_in_place(&mut pixels);
    save_rgba8_png(&out_path, pixels, canvas)?;
    Ok(out_path)
}

/// Write the solid back cover into `dir` and return its path.
pub fn blank_back_cover(dir: &Path) -> FolioResult<PathBuf> {
    let path = dir.join(BACK_COVER_FILE_NAME);
    let [r, g, b] = BACK_COVER_RGB;
    let img = image::RgbImage::from_pixel(
        BACK_COVER_CANVAS.width,
        BACK_COVER_CANVAS.height,
        image::Rgb([r, g, b]),
    );
    img.save(&path)
        .map_err(|err| FolioError::render(format!("cannot write back cover: {err}")))?;
    Ok(path)
}

/// One glyph-rendering surface reused for the shadow and foreground passes.
struct TextPainter<'a> {
    engine: &'a mut CoverTextEngine,
    font: vello_cpu::peniko::FontData,
    ctx: vello_cpu::RenderContext,
    canvas: Canvas,
}

impl<'a> TextPainter<'a> {
    fn new(engine: &'a mut CoverTextEngine, canvas: Canvas) -> FolioResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FolioError::render("cover width exceeds the raster limit"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FolioError::render("cover height exceeds the raster limit"))?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(engine.font_bytes().to_vec()),
            0,
        );
        Ok(Self {
            engine,
            font,
            ctx: vello_cpu::RenderContext::new(width, height),
            canvas,
        })
    }

    /// Draw every placed line at `(x + offset, y + offset)` in `rgba` on a
    /// transparent layer, returning premultiplied RGBA8.
    fn paint_lines(
        &mut self,
        lines: &[PlacedLine],
        offset_px: f32,
        rgba: [u8; 4],
    ) -> FolioResult<Vec<u8>> {
        self.ctx.reset();
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));

        for placed in lines {
            let layout = self.engine.layout_line(&placed.text, placed.size_px)?;
            self.ctx
                .set_transform(vello_cpu::kurbo::Affine::translate((
                    f64::from(placed.x + offset_px),
                    f64::from(placed.y + offset_px),
                )));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    self.ctx
                        .glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }

        self.ctx.flush();
        let width = self.canvas.width as u16;
        let height = self.canvas.height as u16;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

fn save_rgba8_png(path: &Path, pixels: Vec<u8>, canvas: Canvas) -> FolioResult<()> {
    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, pixels)
        .ok_or_else(|| FolioError::render("cover pixel buffer does not match its dimensions"))?;
    img.save(path)
        .map_err(|err| FolioError::render(format!("cannot write cover: {err}")))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/cover/compose.rs"]
mod tests;
