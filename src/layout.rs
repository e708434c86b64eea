//! Shrink-to-fit text layout engine.
//!
//! Given an ordered sequence of line specifications and a maximum content
//! width, computes for each line the font size to use (shrinking from the
//! line's own base size while the rendered width overflows) and the vertical
//! position (cascading from the previous line's bottom edge plus the line's
//! top margin). The engine is a single deterministic fold over the sequence;
//! it measures through the [`TextMeasurer`] trait so tests can substitute a
//! fake measurer for real fonts.

use crate::error::CartellError;
use crate::fonts::FontId;

/// Smallest font size shrink-to-fit may reach before giving up.
pub const MIN_FONT_SIZE: f32 = 1.0;

/// One template line: text plus its styling and spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub margin_top: f32,
    pub font_size: f32,
    pub font: FontId,
}

impl Line {
    pub fn new(text: impl Into<String>, margin_top: f32, font_size: f32, font: FontId) -> Self {
        Self {
            text: text.into(),
            margin_top,
            font_size,
            font,
        }
    }
}

/// A line with its final font size and vertical position resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub y: f32,
}

/// Measures text under a settable font, the only capability the layout
/// engine needs from a drawing surface.
pub trait TextMeasurer {
    fn set_font(&mut self, font: FontId, size: f32) -> Result<(), CartellError>;

    /// Bounding box `(width, height)` of `text` under the active font.
    fn measure(&self, text: &str) -> Result<(f32, f32), CartellError>;
}

/// Lay out `lines` within `max_width`, cascading from `top_margin`.
///
/// Lines are never reordered, and a shrunk line does not affect the base
/// size of the lines after it. The returned vertical positions are strictly
/// increasing for positive margins and heights. The measurer is left with
/// the last line's font active; callers re-set the font per placed line
/// before drawing.
pub fn layout(
    lines: &[Line],
    max_width: f32,
    top_margin: f32,
    measurer: &mut dyn TextMeasurer,
) -> Result<Vec<PlacedLine>, CartellError> {
    let mut position_y = top_margin;
    let mut placed = Vec::with_capacity(lines.len());

    for line in lines {
        let size = fit_font_size(line, max_width, measurer)?;
        let (_, height) = measurer.measure(&line.text)?;
        position_y += line.margin_top + height;

        placed.push(PlacedLine {
            text: line.text.clone(),
            font: line.font,
            size,
            y: position_y,
        });
    }

    Ok(placed)
}

/// Shrink from the line's own base size until the text fits.
///
/// Width is non-increasing in font size, so the loop terminates; the floor
/// turns a pathological text/width combination into a `Layout` error
/// instead of an unbounded descent.
fn fit_font_size(
    line: &Line,
    max_width: f32,
    measurer: &mut dyn TextMeasurer,
) -> Result<f32, CartellError> {
    let mut size = line.font_size;
    measurer.set_font(line.font, size)?;
    let mut width = measurer.measure(&line.text)?.0;

    while width > max_width {
        size -= 1.0;
        if size < MIN_FONT_SIZE {
            return Err(CartellError::Layout(format!(
                "\"{}\" does not fit within {} units at any usable size",
                line.text, max_width
            )));
        }

        measurer.set_font(line.font, size)?;
        width = measurer.measure(&line.text)?.0;
    }

    Ok(size)
}
