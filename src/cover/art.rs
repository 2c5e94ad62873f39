use image::DynamicImage;
use image::imageops::FilterType;

use crate::config::CoverStyle;

pub const NO_COVER: &str = "No cover";
const ASCII_PALETTE: &[u8] = b" .:-=+*#%@";

/// Cover size in pixels; half-blocks pack two pixel rows per terminal row.
pub const COVER_PIXELS: u32 = 24;
const ASCII_MAX: (u32, u32) = (32, 20);

/// Rows of RGB pixels, top first.
pub type Pixels = Vec<Vec<(u8, u8, u8)>>;

#[derive(Debug, Clone, PartialEq)]
pub enum CoverArt {
    /// Status or error text shown instead of an image.
    Text(String),
    /// Pixel grid for half-block rendering.
    Blocks(Pixels),
    /// Luminance text art.
    Ascii(Vec<String>),
}

impl CoverArt {
    pub fn none() -> Self {
        Self::Text(NO_COVER.to_string())
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

impl Default for CoverArt {
    fn default() -> Self {
        Self::none()
    }
}

/// Decode, crop and render fetched image bytes.
pub fn render_cover(bytes: &[u8], style: CoverStyle) -> CoverArt {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => square_crop(&img),
        Err(e) => return CoverArt::Text(format!("Cover error: {e}")),
    };
    match style {
        CoverStyle::Blocks => CoverArt::Blocks(to_pixels(&img, COVER_PIXELS, COVER_PIXELS)),
        CoverStyle::Ascii => CoverArt::Ascii(to_ascii(&img, ASCII_MAX.0, ASCII_MAX.1)),
    }
}

/// Largest centred square.
pub fn square_crop(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w == h {
        return img.clone();
    }
    let side = w.min(h);
    img.crop_imm((w - side) / 2, (h - side) / 2, side, side)
}

pub fn to_pixels(img: &DynamicImage, width: u32, height: u32) -> Pixels {
    let rgb = img.resize_exact(width, height, FilterType::Triangle).to_rgb8();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let p = rgb.get_pixel(x, y);
                    (p[0], p[1], p[2])
                })
                .collect()
        })
        .collect()
}

/// Text art from luminance. Larger images are shrunk to fit `max_w` x
/// `max_h` keeping their aspect ratio; smaller ones are used as they are.
pub fn to_ascii(img: &DynamicImage, max_w: u32, max_h: u32) -> Vec<String> {
    let small = if img.width() <= max_w && img.height() <= max_h {
        img.to_rgb8()
    } else {
        img.thumbnail(max_w, max_h).to_rgb8()
    };
    let last = ASCII_PALETTE.len() - 1;
    let lines: Vec<String> = small
        .rows()
        .map(|row| {
            row.map(|p| {
                let level = usize::from(luma(p[0], p[1], p[2])) * last / 255;
                ASCII_PALETTE[level.min(last)] as char
            })
            .collect()
        })
        .collect();
    if lines.is_empty() {
        vec![NO_COVER.to_string()]
    } else {
        lines
    }
}

/// Perceived brightness (ITU-R 601 weights) in `0..=255`.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    (weighted / 1000) as u8
}
