// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop session controller.
//!
//! The session tracks one image being cropped. It holds:
//!
//! - the live overlay,
//! - the in-progress rectangle,
//! - the confirmed square and 3:4 crops with their previews.
//!
//! It builds the photo record once both crops are confirmed.

use super::extract::{extract_pixels, to_crop_rect_original};
use super::overlay::{CropOverlay, OverlayEvent, OverlaySettings};
use crate::models::crop::{Aspect, CropRect, DragTarget};
use crate::models::geometry::{Point, Rect, Size};
use crate::models::photo::PhotoRecord;
use crate::util::geometry::{image_bounds_in_container, FitTransform};
use image::RgbaImage;

/// A confirmed crop and its extracted preview.
#[derive(Debug, Clone)]
pub struct ConfirmedCrop {
    pub crop: CropRect,
    pub preview: Option<RgbaImage>,
}

/// State of one cropping session.
pub struct CropSession {
    image_ref: Option<String>,
    image: Option<RgbaImage>,
    container: Size,
    active_aspect: Aspect,
    overlay: CropOverlay,
    active_rect: Option<Rect>,
    square: Option<ConfirmedCrop>,
    rect: Option<ConfirmedCrop>,
}

impl CropSession {
    /// Create an empty session with no image.
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            image_ref: None,
            image: None,
            container: Size::default(),
            active_aspect: Aspect::Square,
            overlay: CropOverlay::new(settings),
            active_rect: None,
            square: None,
            rect: None,
        }
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn active_aspect(&self) -> Aspect {
        self.active_aspect
    }

    pub fn overlay(&self) -> &CropOverlay {
        &self.overlay
    }

    /// The rectangle the user is currently editing, in container space.
    pub fn active_rect(&self) -> Option<Rect> {
        self.active_rect
    }

    /// Start over with a newly loaded image. All crop state is dropped.
    pub fn set_image(&mut self, reference: String, image: RgbaImage) {
        log::info!(
            "Cropping {} ({}x{})",
            reference,
            image.width(),
            image.height()
        );
        self.image_ref = Some(reference);
        self.image = Some(image);
        self.square = None;
        self.rect = None;
        self.active_aspect = Aspect::Square;
        self.reset_overlay();
    }

    /// Forget the current image, e.g. after a failed decode.
    pub fn clear_image(&mut self) {
        self.image_ref = None;
        self.image = None;
        self.square = None;
        self.rect = None;
        self.active_aspect = Aspect::Square;
        self.reset_overlay();
    }

    /// Report the size of the area the image is drawn in.
    /// The overlay is reset only when the size actually changes.
    pub fn set_container_size(&mut self, size: Size) {
        if size != self.container {
            self.container = size;
            self.reset_overlay();
        }
    }

    fn image_size(&self) -> Option<Size> {
        self.image
            .as_ref()
            .map(|img| Size::new(img.width() as f32, img.height() as f32))
    }

    /// Where the image is drawn in the container.
    pub fn image_bounds(&self) -> Option<Rect> {
        image_bounds_in_container(self.container, self.image_size()?)
    }

    fn fit(&self) -> Option<FitTransform> {
        FitTransform::new(self.container, self.image_size()?)
    }

    /// Switch the active aspect. Only the in-progress rectangle is reset;
    /// confirmed crops are kept.
    pub fn set_active_aspect(&mut self, aspect: Aspect) {
        if aspect != self.active_aspect {
            self.active_aspect = aspect;
            self.reset_overlay();
        }
    }

    fn reset_overlay(&mut self) {
        let bounds = self.image_bounds();
        self.active_rect = self
            .overlay
            .reset(bounds, self.active_aspect)
            .map(|event| event.rect());
    }

    fn apply(&mut self, event: Option<OverlayEvent>) -> Option<OverlayEvent> {
        if let Some(event) = event {
            self.active_rect = Some(event.rect());
        }
        event
    }

    pub fn drag_start(&mut self, pos: Point) -> Option<DragTarget> {
        self.overlay.drag_start(pos)
    }

    pub fn drag_move(&mut self, delta: Point) -> Option<OverlayEvent> {
        let event = self.overlay.drag_move(delta);
        self.apply(event)
    }

    pub fn drag_end(&mut self) -> Option<OverlayEvent> {
        let event = self.overlay.drag_end();
        self.apply(event)
    }

    pub fn drag_cancel(&mut self) -> Option<OverlayEvent> {
        let event = self.overlay.drag_cancel();
        self.apply(event)
    }

    /// Confirmed crop for `aspect`, if any.
    pub fn confirmed(&self, aspect: Aspect) -> Option<&ConfirmedCrop> {
        match aspect {
            Aspect::Square => self.square.as_ref(),
            Aspect::Ratio3x4 => self.rect.as_ref(),
        }
    }

    fn slot_mut(&mut self, aspect: Aspect) -> &mut Option<ConfirmedCrop> {
        match aspect {
            Aspect::Square => &mut self.square,
            Aspect::Ratio3x4 => &mut self.rect,
        }
    }

    /// Store the active rectangle as the crop for the active aspect and cut
    /// its preview.
    pub fn confirm_active(&mut self) -> Option<CropRect> {
        let screen = self.active_rect?;
        let image = self.image.as_ref()?;
        let crop = to_crop_rect_original(screen, image.width(), image.height(), self.container)?;
        let preview = extract_pixels(image, &crop);

        log::info!("Confirmed {} crop {}", self.active_aspect.label(), crop.summary());
        *self.slot_mut(self.active_aspect) = Some(ConfirmedCrop { crop, preview });
        Some(crop)
    }

    /// Drop the confirmed crop of the active aspect.
    pub fn reset_active(&mut self) {
        if self.slot_mut(self.active_aspect).take().is_some() {
            log::info!("Cleared {} crop", self.active_aspect.label());
        }
    }

    /// True once both aspects have a confirmed crop.
    pub fn can_save(&self) -> bool {
        self.image_ref.is_some() && self.square.is_some() && self.rect.is_some()
    }

    /// Package the record to save, or `None` while a crop is missing.
    pub fn build_record(&self) -> Option<PhotoRecord> {
        if !self.can_save() {
            return None;
        }
        let uri = self.image_ref.clone()?;
        let square = self.square.as_ref()?.crop;
        let rect = self.rect.as_ref()?.crop;
        Some(PhotoRecord::new(uri, square, rect))
    }

    /// A confirmed crop projected back onto the container, for outlining.
    pub fn saved_outline(&self, aspect: Aspect) -> Option<Rect> {
        let crop = self.confirmed(aspect)?.crop;
        Some(self.fit()?.original_to_container(&crop))
    }
}
