// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps between container coordinates (where the image is drawn,
//! uniformly scaled to fit and centered) and original-image pixel
//! coordinates. Every function returns `None` for degenerate container or
//! image sizes instead of dividing by zero.

use crate::models::crop::CropRect;
use crate::models::geometry::{IntRect, Point, Rect, Size};

/// The uniform "fit" scale and centering offset of an image in a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f32,
    pub offset: Point,
    pub drawn: Size,
}

impl FitTransform {
    /// Compute the fit transform, or `None` if either size is degenerate.
    pub fn new(container: Size, image: Size) -> Option<Self> {
        if container.is_degenerate() || image.is_degenerate() {
            return None;
        }

        let scale = (container.width / image.width).min(container.height / image.height);
        let drawn = Size::new(image.width * scale, image.height * scale);
        let offset = Point::new(
            (container.width - drawn.width) / 2.0,
            (container.height - drawn.height) / 2.0,
        );

        Some(Self { scale, offset, drawn })
    }

    /// Where the image is drawn inside the container.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.drawn.width, self.drawn.height)
    }

    /// Convert a container point to original-image pixels (unrounded).
    pub fn to_original(&self, p: Point) -> Point {
        Point::new((p.x - self.offset.x) / self.scale, (p.y - self.offset.y) / self.scale)
    }

    /// Convert an original-image point to container coordinates.
    pub fn to_container(&self, p: Point) -> Point {
        Point::new(self.offset.x + p.x * self.scale, self.offset.y + p.y * self.scale)
    }

    /// Project a saved crop back onto the container.
    pub fn original_to_container(&self, crop: &CropRect) -> Rect {
        let tl = self.to_container(crop.top_left);
        let br = self.to_container(crop.bottom_right);
        Rect::new(tl.x, tl.y, br.x, br.y)
    }
}

/// Rectangle in container space where the image is drawn.
pub fn image_bounds_in_container(container: Size, image: Size) -> Option<Rect> {
    FitTransform::new(container, image).map(|fit| fit.bounds())
}

/// Convert a container-space rectangle to a whole-pixel rectangle of the
/// original image.
///
/// The origin is clamped into the image, the size is clamped to what is left
/// of the image past the origin and floored at one pixel. If that floor would
/// push past the far edge the origin is pulled back, so the result is always
/// non-empty and inside the image.
pub fn screen_to_original(
    image_width: u32,
    image_height: u32,
    container: Size,
    screen: Rect,
) -> Option<IntRect> {
    let image = Size::new(image_width as f32, image_height as f32);
    let fit = FitTransform::new(container, image)?;

    let origin = fit.to_original(screen.top_left());
    let (x, width) = clamp_axis(origin.x, screen.width() / fit.scale, image_width);
    let (y, height) = clamp_axis(origin.y, screen.height() / fit.scale, image_height);

    Some(IntRect::new(x, y, width, height))
}

/// Round and clamp one axis of a rectangle into `[0, limit]`.
fn clamp_axis(start: f32, extent: f32, limit: u32) -> (u32, u32) {
    // `as` saturates for out-of-range and NaN floats.
    let start = (start.round().max(0.0) as u32).min(limit);
    let extent = (extent.round().max(0.0) as u32).max(1);

    let extent = extent.min(limit - start).max(1);
    let start = if start + extent > limit {
        limit.saturating_sub(extent)
    } else {
        start
    };

    (start, extent)
}
