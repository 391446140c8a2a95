// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Committing a screen rectangle and cutting pixels.

use crate::models::crop::CropRect;
use crate::models::geometry::{Point, Rect, Size};
use crate::util::geometry::{image_bounds_in_container, screen_to_original};
use image::{imageops, RgbaImage};

/// Convert a committed container-space rectangle into original pixels.
///
/// The rectangle is first clipped to where the image is drawn. Returns
/// `None` when the bounds are unknown or nothing of the rectangle overlaps
/// the image.
pub fn to_crop_rect_original(
    screen: Rect,
    image_width: u32,
    image_height: u32,
    container: Size,
) -> Option<CropRect> {
    let image = Size::new(image_width as f32, image_height as f32);
    let bounds = image_bounds_in_container(container, image)?;

    let clamped = screen.intersect(&bounds);
    if !(clamped.width() > 0.0 && clamped.height() > 0.0) {
        return None;
    }

    let px = screen_to_original(image_width, image_height, container, clamped)?;
    Some(CropRect::new(
        Point::new(px.x as f32, px.y as f32),
        Point::new(px.right() as f32, px.bottom() as f32),
    ))
}

/// Cut the region described by `crop` out of `image`.
///
/// Out-of-range crops are clamped and shrunk rather than rejected: the
/// origin is kept inside the image, the far edge is kept at or before the
/// image edge, and the size is at least one pixel. Only an empty source
/// yields `None`.
pub fn extract_pixels(image: &RgbaImage, crop: &CropRect) -> Option<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let (x, w) = shrink_axis(crop.top_left.x, crop.bottom_right.x, width);
    let (y, h) = shrink_axis(crop.top_left.y, crop.bottom_right.y, height);

    Some(imageops::crop_imm(image, x, y, w, h).to_image())
}

/// Clamp `[start, end)` into `[0, limit)` with at least one pixel.
fn shrink_axis(start: f32, end: f32, limit: u32) -> (u32, u32) {
    let start = (start.round().max(0.0) as u32).min(limit - 1);
    let end = (end.round().max(0.0) as u32).min(limit);
    let extent = end.saturating_sub(start).max(1);
    (start, extent)
}

/// Crop and downscale for list thumbnails. The longer side of the result is
/// at most `max_side`; smaller crops are returned at their own size.
pub fn thumbnail(image: &RgbaImage, crop: &CropRect, max_side: u32) -> Option<RgbaImage> {
    let cropped = extract_pixels(image, crop)?;
    let (w, h) = cropped.dimensions();
    let max_side = max_side.max(1);
    if w <= max_side && h <= max_side {
        return Some(cropped);
    }

    let scale = max_side as f32 / w.max(h) as f32;
    let tw = ((w as f32 * scale).round() as u32).max(1);
    let th = ((h as f32 * scale).round() as u32).max(1);
    Some(imageops::thumbnail(&cropped, tw, th))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Image whose pixel at (x, y) encodes its own coordinates.
    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    fn crop(l: f32, t: f32, r: f32, b: f32) -> CropRect {
        CropRect::new(Point::new(l, t), Point::new(r, b))
    }

    #[test]
    fn test_commit_scenario() {
        let crop = to_crop_rect_original(
            Rect::new(100.0, 300.0, 300.0, 500.0),
            2000,
            1000,
            Size::new(1000.0, 1000.0),
        )
        .unwrap();
        assert_eq!(crop.top_left, Point::new(200.0, 100.0));
        assert_eq!(crop.bottom_right, Point::new(600.0, 500.0));
    }

    #[test]
    fn test_commit_clips_to_image_bounds() {
        // Extends into the letterbox above the image
        let crop = to_crop_rect_original(
            Rect::new(0.0, 100.0, 200.0, 400.0),
            2000,
            1000,
            Size::new(1000.0, 1000.0),
        )
        .unwrap();
        assert_eq!(crop.top_left, Point::new(0.0, 0.0));
        assert_eq!(crop.bottom_right, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_commit_outside_image() {
        let outside = to_crop_rect_original(
            Rect::new(0.0, 0.0, 200.0, 200.0),
            2000,
            1000,
            Size::new(1000.0, 1000.0),
        );
        assert!(outside.is_none());

        let no_container =
            to_crop_rect_original(Rect::new(0.0, 0.0, 10.0, 10.0), 20, 20, Size::new(0.0, 0.0));
        assert!(no_container.is_none());
    }

    #[test]
    fn test_extract_exact_region() {
        let image = gradient(100, 80);
        let out = extract_pixels(&image, &crop(10.0, 20.0, 40.0, 60.0)).unwrap();
        assert_eq!(out.dimensions(), (30, 40));
        assert_eq!(out.get_pixel(0, 0), &Rgba([10, 20, 0, 255]));
        assert_eq!(out.get_pixel(29, 39), &Rgba([39, 59, 0, 255]));
    }

    #[test]
    fn test_extract_clamps_and_shrinks() {
        let image = gradient(100, 80);

        let out = extract_pixels(&image, &crop(90.0, 70.0, 150.0, 120.0)).unwrap();
        assert_eq!(out.dimensions(), (10, 10));

        let out = extract_pixels(&image, &crop(-20.0, -5.0, 10.0, 10.0)).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_extract_never_fails_on_odd_rects() {
        let image = gradient(16, 16);
        let cases = [
            crop(500.0, 500.0, 600.0, 600.0),
            crop(8.0, 8.0, 8.0, 8.0),
            crop(10.0, 10.0, 2.0, 2.0),
            crop(f32::NAN, 0.0, f32::INFINITY, 16.0),
            crop(-1e9, -1e9, 1e9, 1e9),
        ];
        for c in cases {
            let out = extract_pixels(&image, &c).unwrap();
            let (w, h) = out.dimensions();
            assert!(w >= 1 && h >= 1 && w <= 16 && h <= 16, "{:?}", c);
        }
    }

    #[test]
    fn test_extract_empty_source() {
        let image = RgbaImage::new(0, 0);
        assert!(extract_pixels(&image, &crop(0.0, 0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_thumbnail_limits_longest_side() {
        let image = gradient(200, 200);
        let thumb = thumbnail(&image, &crop(0.0, 0.0, 150.0, 200.0), 72).unwrap();
        assert_eq!(thumb.height(), 72);
        assert_eq!(thumb.width(), 54);

        let small = thumbnail(&image, &crop(0.0, 0.0, 30.0, 40.0), 72).unwrap();
        assert_eq!(small.dimensions(), (30, 40));
    }
}
