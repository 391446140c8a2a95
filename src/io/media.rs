// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes picked photos into RGBA pixel buffers suitable for
//! cropping and for display in egui.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;

/// File extensions offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp", "gif"];

/// A decoded image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub image: RgbaImage,
}

/// Load an image file and convert it to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    let image = decoded.to_rgba8();
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        anyhow::bail!("Image {} has no pixels", path.display());
    }

    Ok(LoadedImage { width, height, image })
}

/// Convert an RGBA buffer into an egui image.
pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}
