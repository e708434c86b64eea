//! # Pipeline Tests
//!
//! Exercise the composition pipeline against generated assets in a scratch
//! directory, focusing on the fail-fast contract: the first missing or
//! undecodable input aborts the render, nothing is written to the output
//! path, and the downloaded photograph is removed on every exit path.

use cartell::CartellError;
use cartell::compose::{self, Assets};
use cartell::fetch::TempPhoto;
use cartell::poster::{Poster, default_venues};
use chrono::NaiveDate;
use image::{Rgb, RgbImage};
use std::path::Path;

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

/// Assets rooted in `dir`, with a generated background and logo strip.
fn scratch_assets(dir: &Path) -> Assets {
    let background = dir.join("background.png");
    RgbImage::from_pixel(compose::WIDTH, compose::HEIGHT, Rgb([10, 10, 40]))
        .save(&background)
        .unwrap();

    let logos = dir.join("logos.png");
    RgbImage::from_pixel(400, 80, Rgb([200, 200, 200]))
        .save(&logos)
        .unwrap();

    Assets {
        background,
        logos,
        fonts_dir: dir.join("fonts"),
        output: dir.join("cartel.png"),
    }
}

#[test]
fn missing_photo_aborts_before_output_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let assets = scratch_assets(dir.path());

    let err = compose::render(
        &sample_poster(),
        &dir.path().join("no-such-photo.png"),
        &assets,
        &default_venues(),
    )
    .unwrap_err();

    assert!(matches!(err, CartellError::AssetLoad(_)));
    assert!(!assets.output.exists());
}

#[test]
fn undecodable_photo_aborts_before_output_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let assets = scratch_assets(dir.path());

    let photo = dir.path().join("photo.png");
    std::fs::write(&photo, b"definitely not a png").unwrap();

    let err =
        compose::render(&sample_poster(), &photo, &assets, &default_venues()).unwrap_err();

    assert!(matches!(err, CartellError::AssetLoad(_)));
    assert!(!assets.output.exists());
}

#[test]
fn missing_background_aborts_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut assets = scratch_assets(dir.path());
    assets.background = dir.path().join("no-background.png");

    let photo = dir.path().join("photo.png");
    RgbImage::from_pixel(300, 200, Rgb([128, 64, 64]))
        .save(&photo)
        .unwrap();

    let err =
        compose::render(&sample_poster(), &photo, &assets, &default_venues()).unwrap_err();

    assert!(matches!(err, CartellError::AssetLoad(_)));
    assert!(!assets.output.exists());
    // The photograph was never consumed; the caller's file is untouched.
    assert!(photo.exists());
}

#[test]
fn failed_render_still_removes_downloaded_photo() {
    let dir = tempfile::tempdir().unwrap();
    let assets = scratch_assets(dir.path());

    let photo_path = dir.path().join("downloaded.png");
    std::fs::write(&photo_path, b"garbage bytes").unwrap();
    let photo = TempPhoto::new(photo_path.clone());

    let err = compose::render_and_cleanup(&sample_poster(), photo, &assets, &default_venues())
        .unwrap_err();

    // The decode error propagates, and the guard removed the temp file.
    assert!(matches!(err, CartellError::AssetLoad(_)));
    assert!(!photo_path.exists());
    assert!(!assets.output.exists());
}

#[test]
fn missing_fonts_abort_after_images_but_before_save() {
    let dir = tempfile::tempdir().unwrap();
    let assets = scratch_assets(dir.path());

    let photo = dir.path().join("photo.png");
    RgbImage::from_pixel(300, 400, Rgb([90, 120, 90]))
        .save(&photo)
        .unwrap();

    // Images all decode, but the fonts directory is empty.
    let err =
        compose::render(&sample_poster(), &photo, &assets, &default_venues()).unwrap_err();

    assert!(matches!(err, CartellError::FontLoad(_)));
    assert!(!assets.output.exists());
}
