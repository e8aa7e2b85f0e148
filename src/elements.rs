//! Conversion of content blocks into `genpdf` elements.
//!
//! This module holds the glue between the rendering-agnostic model types and
//! the `genpdf` primitives: image decoding with descriptive errors, scaling
//! an image to a requested display width, and laying out text that carries
//! embedded line breaks.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::{BulletPoint, Image, LinearLayout, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Mm, Scale, Size};

use crate::model::{HorizontalAlignment, ImageBlock, ImageSource};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Bullet glyph matching the list-bullet paragraph style of the guide.
const BULLET_GLYPH: &str = "\u{2022}";

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Maps a model alignment onto the `genpdf` equivalent.
pub fn alignment(value: HorizontalAlignment) -> Alignment {
    match value {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

/// Builds a `genpdf` image for the given block, scaled to its display width.
///
/// The natural size of the decoded image is estimated at 300 DPI; the scale
/// factor is the ratio between the requested width and the natural width so
/// the aspect ratio is preserved.
pub fn image_element(block: &ImageBlock) -> Result<Image, Error> {
    let decoded = match block.source() {
        ImageSource::Bytes(bytes) => decode_image_from_bytes(bytes)?,
        ImageSource::Path(path) => decode_image_from_path(path)?,
    };

    let natural = estimated_image_size(&decoded, DEFAULT_IMAGE_DPI);
    let mut image = Image::from_dynamic_image(decoded)?;
    image.set_alignment(alignment(block.alignment()));

    let natural_width = mm_to_f64(natural.width);
    if natural_width > f64::EPSILON {
        let scale = block.width_mm() / natural_width;
        image.set_scale(Scale::new(scale, scale));
    }

    Ok(image)
}

/// Lays out text as one paragraph per embedded line break.
///
/// All lines share the same style and alignment.  Text without line breaks
/// yields a single paragraph.
pub fn text_lines(text: &str, style: Style, alignment: Alignment) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for line in text.split('\n') {
        let mut paragraph = Paragraph::new(StyledString::new(line.to_owned(), style));
        paragraph.set_alignment(alignment);
        layout.push(paragraph);
    }
    layout
}

/// Builds a list-bullet paragraph for a single item.
pub fn bullet_item(text: &str) -> BulletPoint<Paragraph> {
    BulletPoint::new(Paragraph::new(text.to_owned())).with_bullet(BULLET_GLYPH)
}
