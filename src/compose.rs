//! Poster composition pipeline.
//!
//! Draws the fixed background, the logo strip, the guest photograph and the
//! eight-line text template onto a 1280x800 canvas, then saves it as PNG.
//! Steps run strictly in order and fail fast: the first error aborts the
//! pipeline and propagates unchanged, with no partial output committed.

use image::{DynamicImage, Rgba};
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::CartellError;
use crate::fetch::TempPhoto;
use crate::fonts::{FontId, FontLibrary};
use crate::layout::{self, Line};
use crate::poster::{CatalanDateFormatter, Poster, VenueMap};
use crate::thumbnail;

pub const WIDTH: u32 = 1280;
pub const HEIGHT: u32 = 800;
pub const MARGIN: f32 = 30.0;

/// Photographs are bounded by height; the text column below sets the width.
const PHOTO_MAX_HEIGHT: u32 = 250;
const PHOTO_TOP: f32 = 185.0;
/// The logo strip shrinks to 80% of its own width, height following.
const LOGO_SCALE: f32 = 0.8;

const SERIES_NAME: &str = "La nit del llop";
const CONTACT_LINE: &str = "Contactar amb ernesto@projecte-loc.org";

/// Width of the left-half content column holding photograph and text.
pub fn content_width() -> f32 {
    (WIDTH / 2) as f32 - MARGIN
}

/// Bundled asset locations plus the output path.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: PathBuf,
    pub logos: PathBuf,
    pub fonts_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            background: "assets/images/background.png".into(),
            logos: "assets/images/logos.png".into(),
            fonts_dir: "assets/fonts".into(),
            output: "cartel.png".into(),
        }
    }
}

/// Render `poster` and remove the downloaded photograph on every exit path.
///
/// After a successful render a deletion failure is surfaced as the result;
/// after a failed render the render error wins and the guard only logs the
/// deletion failure.
pub fn render_and_cleanup(
    poster: &Poster,
    photo: TempPhoto,
    assets: &Assets,
    venues: &VenueMap,
) -> Result<(), CartellError> {
    match render(poster, photo.path(), assets, venues) {
        Ok(()) => photo.cleanup(),
        Err(e) => Err(e),
    }
}

/// Render `poster` using the photograph at `photo_path`, which is left in
/// place. The output file is only written when every prior step succeeded.
pub fn render(
    poster: &Poster,
    photo_path: &Path,
    assets: &Assets,
    venues: &VenueMap,
) -> Result<(), CartellError> {
    let mut canvas = Canvas::new(WIDTH, HEIGHT, FontLibrary::new(&assets.fonts_dir));

    draw_background(&mut canvas, &assets.background)?;
    draw_logos(&mut canvas, &assets.logos)?;
    draw_photo(&mut canvas, photo_path)?;
    draw_text(&mut canvas, poster, venues)?;

    canvas.save(&assets.output)
}

fn load_image(path: &Path) -> Result<DynamicImage, CartellError> {
    image::open(path).map_err(|e| CartellError::AssetLoad(format!("{}: {}", path.display(), e)))
}

fn draw_background(canvas: &mut Canvas, path: &Path) -> Result<(), CartellError> {
    let background = load_image(path)?;
    canvas.draw_image(&background, 0, 0);
    Ok(())
}

fn draw_logos(canvas: &mut Canvas, path: &Path) -> Result<(), CartellError> {
    let logos = load_image(path)?;
    let max_width = (logos.width() as f32 * LOGO_SCALE) as u32;
    let logos = thumbnail::fit_width(&logos, max_width);

    // Bottom-right corner, inset by the side margin.
    canvas.draw_image(
        &logos,
        WIDTH as i64 - logos.width() as i64 - MARGIN as i64,
        HEIGHT as i64 - logos.height() as i64 - MARGIN as i64,
    );
    Ok(())
}

fn draw_photo(canvas: &mut Canvas, path: &Path) -> Result<(), CartellError> {
    let photo = load_image(path)?;
    let photo = thumbnail::fit_height(&photo, PHOTO_MAX_HEIGHT);
    canvas.draw_image_anchored(&photo, MARGIN + content_width() / 2.0, PHOTO_TOP, 0.5, 0.0);
    Ok(())
}

/// The fixed eight-line template, top to bottom.
pub fn template(poster: &Poster, venues: &VenueMap) -> Result<Vec<Line>, CartellError> {
    let formatter = CatalanDateFormatter;

    Ok(vec![
        Line::new(SERIES_NAME, 25.0, 90.0, FontId::Script),
        Line::new("presenta", 25.0, 25.0, FontId::Light),
        Line::new(format!("\"{}\"", poster.title), 290.0, 45.0, FontId::Bold),
        Line::new("amb", 25.0, 25.0, FontId::Light),
        Line::new(poster.guest.clone(), 20.0, 45.0, FontId::Bold),
        Line::new(poster.when(&formatter)?, 35.0, 45.0, FontId::Light),
        Line::new(poster.where_line(venues), 20.0, 45.0, FontId::Light),
        Line::new(CONTACT_LINE, 20.0, 45.0, FontId::Light),
    ])
}

fn draw_text(canvas: &mut Canvas, poster: &Poster, venues: &VenueMap) -> Result<(), CartellError> {
    canvas.set_color(Rgba([255, 255, 255, 255]));

    let lines = template(poster, venues)?;
    let placed = layout::layout(&lines, content_width(), MARGIN, canvas)?;

    let center_x = MARGIN + content_width() / 2.0;
    for line in &placed {
        canvas.set_font(line.font, line.size)?;
        canvas.draw_text_anchored(&line.text, center_x, line.y, 0.5, 0.0)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::default_venues;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_poster() -> Poster {
        Poster {
            title: "La nit del llop".to_string(),
            guest: "Jordi Puig".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            time: "20:00".to_string(),
            pic_url: String::new(),
            event_type: "Cena".to_string(),
        }
    }

    #[test]
    fn test_content_width() {
        assert_eq!(content_width(), 610.0);
    }

    #[test]
    fn test_template_has_eight_lines_in_order() {
        let lines = template(&sample_poster(), &default_venues()).unwrap();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].text, "La nit del llop");
        assert_eq!(lines[1].text, "presenta");
        assert_eq!(lines[2].text, "\"La nit del llop\"");
        assert_eq!(lines[3].text, "amb");
        assert_eq!(lines[4].text, "Jordi Puig");
        assert_eq!(lines[5].text, "Dijous 14 de març a les 20:00");
        assert_eq!(
            lines[6].text,
            "a l'Orfeó Catalònia, sopar tertúlia amb l'autor"
        );
        assert_eq!(lines[7].text, "Contactar amb ernesto@projecte-loc.org");
    }

    #[test]
    fn test_template_styling() {
        let lines = template(&sample_poster(), &default_venues()).unwrap();

        let expected: Vec<(f32, f32, FontId)> = vec![
            (25.0, 90.0, FontId::Script),
            (25.0, 25.0, FontId::Light),
            (290.0, 45.0, FontId::Bold),
            (25.0, 25.0, FontId::Light),
            (20.0, 45.0, FontId::Bold),
            (35.0, 45.0, FontId::Light),
            (20.0, 45.0, FontId::Light),
            (20.0, 45.0, FontId::Light),
        ];

        for (line, (margin, size, font)) in lines.iter().zip(expected) {
            assert_eq!(line.margin_top, margin, "margin of {:?}", line.text);
            assert_eq!(line.font_size, size, "size of {:?}", line.text);
            assert_eq!(line.font, font, "font of {:?}", line.text);
        }
    }

    /// Width is half the font size per character, height equals the size.
    struct FakeMeasurer {
        size: f32,
    }

    impl crate::layout::TextMeasurer for FakeMeasurer {
        fn set_font(&mut self, _font: FontId, size: f32) -> Result<(), CartellError> {
            self.size = size;
            Ok(())
        }

        fn measure(&self, text: &str) -> Result<(f32, f32), CartellError> {
            Ok((text.chars().count() as f32 * self.size * 0.5, self.size))
        }
    }

    #[test]
    fn test_overlong_title_shrinks_to_column() {
        let mut poster = sample_poster();
        poster.title = "Una nit molt llarga de contes i de converses infinites".to_string();

        let lines = template(&poster, &default_venues()).unwrap();
        let mut measurer = FakeMeasurer { size: 0.0 };
        let placed =
            layout::layout(&lines, content_width(), MARGIN, &mut measurer).unwrap();

        // The quoted title overflows at bold 45 and gets shrunk until it fits.
        let title = &placed[2];
        assert!(title.size < 45.0);
        let width = title.text.chars().count() as f32 * title.size * 0.5;
        assert!(width <= content_width());
    }

    #[test]
    fn test_template_unknown_category() {
        let mut poster = sample_poster();
        poster.event_type = "Concert".to_string();

        let lines = template(&poster, &default_venues()).unwrap();
        assert_eq!(lines[6].text, "a l'Orfeó Catalònia");
    }
}
