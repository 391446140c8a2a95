// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved photo list.
//!
//! One row per saved photo, newest first, with a thumbnail of the square
//! crop, the creation date, both crop rectangles and a delete button.

use crate::models::photo::PhotoRecord;
use std::collections::HashMap;

/// Result of gallery interaction.
pub enum GalleryAction {
    None,
    NewCrop,
    Delete(String),
}

/// Display the gallery. New crops and deletes are disabled unless `editable`.
pub fn show(
    ui: &mut egui::Ui,
    photos: &[PhotoRecord],
    thumbnails: &HashMap<String, egui::TextureHandle>,
    thumbnail_size: f32,
    editable: bool,
) -> GalleryAction {
    let mut action = GalleryAction::None;

    ui.horizontal(|ui| {
        ui.heading("Saved photos");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(editable, egui::Button::new("➕ New crop")).clicked() {
                action = GalleryAction::NewCrop;
            }
        });
    });
    ui.separator();

    if photos.is_empty() {
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new("No photos yet. Open an image to crop it.")
                .size(16.0)
                .color(egui::Color32::from_gray(180)),
        );
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for photo in photos {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let size = egui::vec2(thumbnail_size, thumbnail_size);
                    match thumbnails.get(&photo.id) {
                        Some(texture) => {
                            ui.image((texture.id(), size));
                        }
                        None => {
                            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                            ui.painter()
                                .rect_filled(rect, 6.0, egui::Color32::from_gray(60));
                        }
                    }

                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(format!("ID: {}", photo.id)).strong());
                        ui.label(egui::RichText::new(photo.created_label()).weak());
                        ui.add_space(4.0);
                        ui.label(
                            egui::RichText::new(format!("Square: {}", photo.square_crop.summary()))
                                .small(),
                        );
                        ui.label(
                            egui::RichText::new(format!("3:4:    {}", photo.rect_crop.summary()))
                                .small(),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(editable, egui::Button::new("🗑"))
                            .on_hover_text("Delete")
                            .clicked()
                        {
                            action = GalleryAction::Delete(photo.id.clone());
                        }
                    });
                });
            });
            ui.add_space(8.0);
        }
    });

    action
}
