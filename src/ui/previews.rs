// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop preview panel.
//!
//! Shows the confirmed square and 3:4 crops side by side with the original
//! size, and the save button.

use crate::models::crop::Aspect;
use std::collections::HashMap;

const PREVIEW_WIDTH: f32 = 140.0;

/// Result of preview panel interaction.
pub enum PreviewAction {
    None,
    Save,
}

/// Display the preview panel.
pub fn show(
    ui: &mut egui::Ui,
    previews: &HashMap<Aspect, egui::TextureHandle>,
    original_size: Option<(u32, u32)>,
    can_save: bool,
    saving: bool,
) -> PreviewAction {
    let mut action = PreviewAction::None;

    ui.heading("Crops");
    ui.separator();

    if let Some((w, h)) = original_size {
        ui.label(format!("Original size = {} × {}", w, h));
        ui.add_space(8.0);
    }

    for aspect in Aspect::ALL {
        let size = egui::vec2(PREVIEW_WIDTH, PREVIEW_WIDTH / aspect.ratio());
        match previews.get(&aspect) {
            Some(texture) => {
                ui.image((texture.id(), size));
            }
            None => placeholder(ui, size, aspect.label()),
        }
        let caption = match aspect {
            Aspect::Square => "Square".to_string(),
            Aspect::Ratio3x4 => format!("Rect {}", aspect.label()),
        };
        ui.label(egui::RichText::new(caption).small());
        ui.add_space(8.0);
    }

    ui.separator();

    let label = if saving { "Saving..." } else { "Save" };
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0));
    if ui.add_enabled(can_save && !saving, button).clicked() {
        action = PreviewAction::Save;
    }
    if !can_save {
        ui.label(
            egui::RichText::new("Confirm both crops to enable saving")
                .italics()
                .weak(),
        );
    }

    action
}

fn placeholder(ui: &mut egui::Ui, size: egui::Vec2, label: &str) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 12.0, egui::Color32::from_black_alpha(20));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
}
