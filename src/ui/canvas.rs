// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop canvas.
//!
//! This module draws the photo scaled to fit the available area, outlines
//! the crops already confirmed and hosts the interactive crop overlay. The
//! canvas rectangle is the overlay's container: pointer positions are
//! translated to container coordinates before they reach the session.

use crate::crop::overlay::OverlayEvent;
use crate::crop::session::CropSession;
use crate::models::crop::Aspect;
use crate::models::geometry::{Point, Rect, Size};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// A drag gesture finished with this rectangle (container space).
    Committed(Rect),
}

/// Outline colour of a confirmed crop.
pub fn outline_color(aspect: Aspect) -> egui::Color32 {
    match aspect {
        Aspect::Square => egui::Color32::from_rgba_unmultiplied(0, 255, 255, 153),
        Aspect::Ratio3x4 => egui::Color32::from_rgba_unmultiplied(255, 0, 255, 153),
    }
}

fn to_screen(r: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_max(
        origin + egui::vec2(r.left, r.top),
        origin + egui::vec2(r.right, r.bottom),
    )
}

fn to_container(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

/// Pointer movement to feed the overlay this frame.
///
/// egui only reports a drag once the pointer has moved past its drag
/// threshold. On that first frame the whole distance from the press origin
/// is used, so the grabbed handle does not lag behind the pointer.
fn gesture_delta(
    started: bool,
    press: Option<egui::Pos2>,
    pointer: Option<egui::Pos2>,
    frame_delta: egui::Vec2,
) -> egui::Vec2 {
    match (started, press, pointer) {
        (true, Some(press), Some(pointer)) => pointer - press,
        _ => frame_delta,
    }
}

/// Display the crop canvas and feed pointer gestures to the session.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut CropSession,
    image_texture: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let available = ui.available_size();
    let (canvas_rect, response) = ui.allocate_exact_size(available, egui::Sense::drag());
    let origin = canvas_rect.min;

    // Layout size feeds the overlay; it resets itself when this changes.
    session.set_container_size(Size::new(canvas_rect.width(), canvas_rect.height()));

    let painter = ui.painter_at(canvas_rect);
    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(0x72));

    let (Some(texture), Some(bounds)) = (image_texture, session.image_bounds()) else {
        return action;
    };

    painter.image(
        texture.id(),
        to_screen(bounds, origin),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    // Pointer gestures, in the order egui reports them
    let press = ui.input(|i| i.pointer.press_origin());
    let pointer = response.interact_pointer_pos();
    if response.drag_started() {
        if let Some(pos) = press.or(pointer) {
            session.drag_start(to_container(pos, origin));
        }
    }
    if response.dragged() {
        let delta = gesture_delta(response.drag_started(), press, pointer, response.drag_delta());
        if delta != egui::Vec2::ZERO {
            session.drag_move(Point::new(delta.x, delta.y));
        }
    }
    if response.drag_stopped() {
        if let Some(OverlayEvent::Committed(rect)) = session.drag_end() {
            action = CanvasAction::Committed(rect);
        }
    }

    for aspect in Aspect::ALL {
        if let Some(outline) = session.saved_outline(aspect) {
            painter.rect_stroke(
                to_screen(outline, origin),
                0.0,
                egui::Stroke::new(2.0, outline_color(aspect)),
            );
        }
    }

    if let Some(rect) = session.active_rect() {
        draw_overlay(&painter, to_screen(rect, origin), session.overlay().settings().handle_radius);
    }

    action
}

/// Draw the live crop rectangle with its four handles.
fn draw_overlay(painter: &egui::Painter, rect: egui::Rect, handle_radius: f32) {
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 128)),
    );

    for corner in [rect.left_top(), rect.right_top(), rect.left_bottom(), rect.right_bottom()] {
        painter.circle_filled(corner, handle_radius, egui::Color32::WHITE);
        painter.circle_stroke(
            corner,
            handle_radius,
            egui::Stroke::new(2.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 128)),
        );
    }
}
