use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use super::*;
use crate::config::CoverStyle;

fn png(img: RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn square_crop_keeps_the_centre() {
    // 30x10: left third red, middle green, right third blue.
    let img = RgbImage::from_fn(30, 10, |x, _| match x {
        0..=9 => Rgb([255, 0, 0]),
        10..=19 => Rgb([0, 255, 0]),
        _ => Rgb([0, 0, 255]),
    });
    let cropped = square_crop(&DynamicImage::ImageRgb8(img)).to_rgb8();
    assert_eq!(cropped.dimensions(), (10, 10));
    assert!(cropped.pixels().all(|p| *p == Rgb([0, 255, 0])));
}

#[test]
fn blocks_are_a_square_pixel_grid() {
    let bytes = png(RgbImage::from_pixel(64, 40, Rgb([10, 20, 30])));
    match render_cover(&bytes, CoverStyle::Blocks) {
        CoverArt::Blocks(rows) => {
            assert_eq!(rows.len(), COVER_PIXELS as usize);
            assert!(rows.iter().all(|r| r.len() == COVER_PIXELS as usize));
            let (r, g, b) = rows[5][5];
            assert!(r.abs_diff(10) <= 1 && g.abs_diff(20) <= 1 && b.abs_diff(30) <= 1);
        }
        other => panic!("expected blocks, got {other:?}"),
    }
}

#[test]
fn ascii_uses_luminance_palette() {
    let white = png(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
    let black = png(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));

    let CoverArt::Ascii(lines) = render_cover(&white, CoverStyle::Ascii) else {
        panic!("expected ascii");
    };
    assert!(lines.iter().all(|l| l.chars().all(|c| c == '@')));
    assert_eq!(lines.len(), 8);

    let CoverArt::Ascii(lines) = render_cover(&black, CoverStyle::Ascii) else {
        panic!("expected ascii");
    };
    assert!(lines.iter().all(|l| l.chars().all(|c| c == ' ')));
}

#[test]
fn ascii_is_bounded() {
    let big = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 400, Rgb([128, 128, 128])));
    let lines = to_ascii(&big, 32, 20);
    assert!(lines.len() <= 20);
    assert!(lines.iter().all(|l| l.chars().count() <= 32));
}

#[test]
fn undecodable_bytes_become_error_text() {
    match render_cover(b"not an image", CoverStyle::Blocks) {
        CoverArt::Text(msg) => assert!(msg.starts_with("Cover error:")),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn luma_weights() {
    assert_eq!(luma(0, 0, 0), 0);
    assert_eq!(luma(255, 255, 255), 255);
    assert!(luma(0, 255, 0) > luma(255, 0, 0));
    assert!(luma(255, 0, 0) > luma(0, 0, 255));
}

#[test]
fn default_cover_is_placeholder_text() {
    assert_eq!(CoverArt::default(), CoverArt::Text(NO_COVER.into()));
    assert!(!CoverArt::default().is_image());
}
