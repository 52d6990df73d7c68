//! Synthetic images for unit tests.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::decode::RasterSurface;

/// Opaque RGBA gradient: red grows left to right, green top to bottom.
pub fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            128,
            255,
        ])
    })
}

pub fn gradient_surface(width: u32, height: u32) -> RasterSurface {
    RasterSurface::from_rgba_image(gradient_rgba(width, height))
}

/// Opaque pseudo-random pixels. Compresses badly, like a busy photo.
pub fn noise_surface(width: u32, height: u32, seed: u32) -> RasterSurface {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..(width as usize * height as usize) {
        for _ in 0..3 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            pixels.push((state >> 24) as u8);
        }
        pixels.push(255);
    }
    RasterSurface::new(width, height, pixels)
}

pub fn encode_png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .expect("png encode");
    buffer.into_inner()
}

pub fn encode_jpeg_bytes(img: &RgbaImage, quality: u8) -> Vec<u8> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).into_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .expect("jpeg encode");
    buffer.into_inner()
}

/// Lossless WebP, the kind a screenshot tool or another converter writes.
pub fn encode_webp_lossless_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .expect("webp encode");
    buffer.into_inner()
}

pub fn noise_jpeg_bytes(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let surface = noise_surface(width, height, 42);
    let img = surface.to_rgba_image().expect("noise buffer");
    encode_jpeg_bytes(&img, quality)
}
