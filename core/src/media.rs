//! Download and normalize slide images: fetch, decode, force RGB, resize
//! to a uniform slide-friendly resolution, re-encode as JPEG.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use clubdeck_pptx::EmbeddedImage;
use image::imageops::FilterType;

const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 600;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn fetch_slide_image(url: &str) -> Result<EmbeddedImage> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let bytes = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("downloading {url}"))?
        .error_for_status()
        .with_context(|| format!("bad status from {url}"))?
        .bytes()
        .await?;

    let jpeg = normalize_to_jpeg(&bytes).with_context(|| format!("decoding image from {url}"))?;
    tracing::debug!(url, bytes = jpeg.data.len(), "fetched and normalized slide image");
    Ok(jpeg)
}

/// Decode arbitrary image bytes and produce an 800x600 RGB JPEG. Paletted
/// and alpha-carrying inputs are flattened to RGB first, since JPEG cannot
/// represent them.
pub fn normalize_to_jpeg(bytes: &[u8]) -> Result<EmbeddedImage> {
    let decoded = image::load_from_memory(bytes).context("unsupported or corrupt image data")?;
    let resized = decoded.resize_exact(IMAGE_WIDTH, IMAGE_HEIGHT, FilterType::Lanczos3);
    let rgb = resized.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, image::ImageFormat::Jpeg).context("encoding JPEG")?;
    Ok(EmbeddedImage { data: out.into_inner() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
        });
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img).write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn normalizes_alpha_png_to_fixed_size_jpeg() {
        let jpeg = normalize_to_jpeg(&sample_png(32, 20)).unwrap();
        let reloaded = image::load_from_memory(&jpeg.data).unwrap();
        assert_eq!(reloaded.width(), IMAGE_WIDTH);
        assert_eq!(reloaded.height(), IMAGE_HEIGHT);
        // JPEG magic
        assert_eq!(&jpeg.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_bytes_are_an_error_not_a_panic() {
        assert!(normalize_to_jpeg(b"definitely not an image").is_err());
    }
}
