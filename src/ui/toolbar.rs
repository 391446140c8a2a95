// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop toolbar.
//!
//! This module provides the aspect toggle and the confirm/reset buttons for
//! the active aspect.

use crate::models::crop::Aspect;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SetAspect(Aspect),
    Confirm,
    Reset,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, active: Aspect, can_confirm: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Aspect:");

        for aspect in Aspect::ALL {
            let text = match aspect {
                Aspect::Square => "⬛ Square 1:1",
                Aspect::Ratio3x4 => "▮ Rect 3:4",
            };
            if ui.selectable_label(active == aspect, text).clicked() && active != aspect {
                action = ToolbarAction::SetAspect(aspect);
            }
        }

        ui.separator();

        if ui
            .add_enabled(can_confirm, egui::Button::new(format!("Confirm {}", active.label())))
            .clicked()
        {
            action = ToolbarAction::Confirm;
        }
        if ui.button(format!("Reset {}", active.label())).clicked() {
            action = ToolbarAction::Reset;
        }

        ui.separator();

        ui.label(
            egui::RichText::new("Drag the frame to move it, drag a corner to resize")
                .italics()
                .weak(),
        );
    });

    action
}
