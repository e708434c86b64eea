//! In-memory drawing surface.
//!
//! `Canvas` wraps an RGBA pixel buffer of fixed dimensions and supports
//! absolute and anchored image blits plus anchored text drawing with the
//! current font and color. Text is rasterized with ab_glyph and blended
//! by coverage for smooth edges. Side effects stay in the buffer until
//! [`save`](Canvas::save).
//!
//! Anchors are fractional offsets within the blitted content: the point at
//! `(anchor_x, anchor_y)` lands at the given coordinates, so `(0.5, 0.0)`
//! centers horizontally with the top edge at `y`.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbaImage, imageops};
use std::path::Path;

use crate::error::CartellError;
use crate::fonts::{FontId, FontLibrary};
use crate::layout::TextMeasurer;

struct ActiveFont {
    font: FontArc,
    size: f32,
}

/// Fixed-size RGBA drawing surface with a current font and color.
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: RgbaImage,
    color: Rgba<u8>,
    fonts: FontLibrary,
    active: Option<ActiveFont>,
}

impl Canvas {
    /// Allocate a blank (opaque black) surface of the given dimensions.
    pub fn new(width: u32, height: u32, fonts: FontLibrary) -> Self {
        Self {
            width,
            height,
            buffer: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            color: Rgba([255, 255, 255, 255]),
            fonts,
            active: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel buffer as drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Blit `img` with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, img: &DynamicImage, x: i64, y: i64) {
        imageops::overlay(&mut self.buffer, &img.to_rgba8(), x, y);
    }

    /// Blit `img` so the point at fractional offset `(anchor_x, anchor_y)`
    /// within it lands at `(x, y)`.
    pub fn draw_image_anchored(
        &mut self,
        img: &DynamicImage,
        x: f32,
        y: f32,
        anchor_x: f32,
        anchor_y: f32,
    ) {
        let left = x - anchor_x * img.width() as f32;
        let top = y - anchor_y * img.height() as f32;
        self.draw_image(img, left.round() as i64, top.round() as i64);
    }

    /// Set the color used by subsequent text draws.
    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    /// Make `id` at `size` the active font for measuring and drawing.
    pub fn set_font(&mut self, id: FontId, size: f32) -> Result<(), CartellError> {
        let font = self.fonts.get(id)?.clone();
        self.active = Some(ActiveFont { font, size });
        Ok(())
    }

    fn active(&self) -> Result<&ActiveFont, CartellError> {
        self.active
            .as_ref()
            .ok_or_else(|| CartellError::FontLoad("no font set on canvas".to_string()))
    }

    /// Bounding box of `text` under the active font and size.
    pub fn measure_text(&self, text: &str) -> Result<(f32, f32), CartellError> {
        let active = self.active()?;
        let scaled = active.font.as_scaled(PxScale::from(active.size));

        let width: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(active.font.glyph_id(ch)))
            .sum();
        let height = scaled.ascent() - scaled.descent();

        Ok((width, height))
    }

    /// Draw `text` with the current font and color, anchored as in
    /// [`draw_image_anchored`](Canvas::draw_image_anchored).
    pub fn draw_text_anchored(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        anchor_x: f32,
        anchor_y: f32,
    ) -> Result<(), CartellError> {
        let (text_width, text_height) = self.measure_text(text)?;
        let active = self.active()?;
        let font = active.font.clone();
        let size = active.size;
        let scaled = font.as_scaled(PxScale::from(size));

        let left = x - anchor_x * text_width;
        let top = y - anchor_y * text_height;
        let baseline = top + scaled.ascent();

        let color = self.color;
        let (width, height) = (self.width as i32, self.height as i32);
        let mut caret = left;

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            let advance = scaled.h_advance(glyph_id);
            let glyph =
                glyph_id.with_scale_and_position(PxScale::from(size), point(caret, baseline));

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let buffer = &mut self.buffer;
                outlined.draw(|px, py, coverage| {
                    let bx = px as i32 + bounds.min.x as i32;
                    let by = py as i32 + bounds.min.y as i32;
                    if bx >= 0 && bx < width && by >= 0 && by < height {
                        blend(buffer.get_pixel_mut(bx as u32, by as u32), color, coverage);
                    }
                });
            }

            caret += advance;
        }

        Ok(())
    }

    /// Serialize the buffer to `path` as PNG.
    pub fn save(&self, path: &Path) -> Result<(), CartellError> {
        self.buffer
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io) => CartellError::Io(io),
                other => CartellError::Encode(format!("{}: {}", path.display(), other)),
            })
    }
}

/// Coverage-weighted blend of `color` over an existing pixel.
fn blend(pixel: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let coverage = coverage.clamp(0.0, 1.0);
    for c in 0..3 {
        let blended = color[c] as f32 * coverage + pixel[c] as f32 * (1.0 - coverage);
        pixel[c] = blended.round() as u8;
    }
    pixel[3] = pixel[3].max((coverage * 255.0).round() as u8);
}

impl TextMeasurer for Canvas {
    fn set_font(&mut self, font: FontId, size: f32) -> Result<(), CartellError> {
        Canvas::set_font(self, font, size)
    }

    fn measure(&self, text: &str) -> Result<(f32, f32), CartellError> {
        self.measure_text(text)
    }
}
