use std::{
    io::Cursor,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use fast_image_resize::images::Image as FirImage;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use image::DynamicImage;
use zune_jpeg::JpegDecoder;

use crate::store::{ImageSource, RecordId};

/// Full-size textures are capped so a stray 100-megapixel file cannot
/// exhaust GPU memory; 4K is plenty for a fullscreen lightbox.
pub const MAX_FULL_WIDTH: u32 = 3840;
pub const MAX_FULL_HEIGHT: u32 = 2160;

/// Longest edge of a grid thumbnail.
pub const THUMBNAIL_EDGE: u32 = 256;

pub struct DecodeRequest {
    pub id: RecordId,
    pub source: ImageSource,
}

pub struct DecodedImage {
    pub id: RecordId,
    pub full: egui::ColorImage,
    pub thumbnail: egui::ColorImage,
    /// Dimensions of the original image, before any display capping.
    pub dimensions: (u32, u32),
}

pub enum LoadOutcome {
    Decoded(DecodedImage),
    Failed { id: RecordId, error: String },
}

/// Background decoder. A single worker thread consumes requests in order
/// and reports one outcome per item, so a file that fails to decode never
/// blocks the rest of its batch.
pub struct Loader {
    request_tx: Sender<DecodeRequest>,
    result_rx: Receiver<LoadOutcome>,
}

impl Loader {
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<DecodeRequest>();
        let (result_tx, result_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let id = request.id;
                let outcome = match decode_request(request) {
                    Ok(decoded) => LoadOutcome::Decoded(decoded),
                    Err(err) => LoadOutcome::Failed {
                        id,
                        error: format!("{err:#}"),
                    },
                };
                if result_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            result_rx,
        }
    }

    pub fn request(&self, request: DecodeRequest) {
        let _ = self.request_tx.send(request);
    }

    /// Drains all finished outcomes without blocking. Called once per frame.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.result_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_request(request: DecodeRequest) -> Result<DecodedImage> {
    let decoded = match &request.source {
        ImageSource::Path(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("unable to read {}", path.display()))?;
            let jpeg_hint = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
                .unwrap_or(false);
            decode_bytes(&bytes, jpeg_hint)?
        }
        ImageSource::Memory(bytes) => decode_bytes(bytes, looks_like_jpeg(bytes))?,
    };

    let rgba = decoded.to_rgba8();
    let dimensions = (rgba.width(), rgba.height());

    let (full_w, full_h) =
        fit_dimensions(dimensions.0, dimensions.1, MAX_FULL_WIDTH, MAX_FULL_HEIGHT);
    let full = if (full_w, full_h) == dimensions {
        rgba
    } else {
        resize_rgba(&rgba, full_w, full_h)?
    };

    let (thumb_w, thumb_h) =
        fit_dimensions(full.width(), full.height(), THUMBNAIL_EDGE, THUMBNAIL_EDGE);
    let thumbnail = if (thumb_w, thumb_h) == (full.width(), full.height()) {
        full.clone()
    } else {
        resize_rgba(&full, thumb_w, thumb_h)?
    };

    Ok(DecodedImage {
        id: request.id,
        full: to_color_image(&full),
        thumbnail: to_color_image(&thumbnail),
        dimensions,
    })
}

fn decode_bytes(bytes: &[u8], jpeg_hint: bool) -> Result<DynamicImage> {
    if jpeg_hint {
        // zune-jpeg is noticeably faster than the generic decoder; fall
        // back on any hiccup.
        if let Some(image) = decode_jpeg_fast(bytes) {
            return Ok(image);
        }
    }
    image::load_from_memory(bytes).context("unsupported or corrupt image data")
}

fn decode_jpeg_fast(bytes: &[u8]) -> Option<DynamicImage> {
    let mut decoder = JpegDecoder::new(Cursor::new(bytes));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    image::RgbImage::from_raw(info.width as u32, info.height as u32, pixels)
        .map(DynamicImage::ImageRgb8)
}

fn looks_like_jpeg(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xD8
}

/// Scales `(width, height)` down to fit within the maxima, preserving
/// aspect ratio. Returns the input unchanged when it already fits.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    (
        ((width as f64 * ratio).round() as u32).max(1),
        ((height as f64 * ratio).round() as u32).max(1),
    )
}

pub fn to_color_image(rgba: &image::RgbaImage) -> egui::ColorImage {
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

fn resize_rgba(
    rgba: &image::RgbaImage,
    dst_width: u32,
    dst_height: u32,
) -> Result<image::RgbaImage> {
    let src = FirImage::from_vec_u8(
        rgba.width(),
        rgba.height(),
        rgba.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|err| anyhow!("resize source buffer: {err}"))?;
    let mut dst = FirImage::new(dst_width, dst_height, PixelType::U8x4);
    Resizer::new()
        .resize(&src, &mut dst, &ResizeOptions::default())
        .map_err(|err| anyhow!("resize to {dst_width}x{dst_height}: {err}"))?;
    image::RgbaImage::from_raw(dst_width, dst_height, dst.into_vec())
        .ok_or_else(|| anyhow!("resized buffer has unexpected size"))
}
