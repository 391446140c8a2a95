// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It switches between the gallery and the crop
//! screen, owns the crop session and runs image decoding, thumbnail
//! generation and saving on background threads.

use crate::config::AppConfig;
use crate::crop::extract;
use crate::crop::session::CropSession;
use crate::io::media;
use crate::io::store::{FileStore, PhotoStore};
use crate::models::crop::Aspect;
use crate::models::photo::PhotoRecord;
use crate::ui::{canvas, gallery, previews, toolbar};
use image::RgbaImage;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Gallery,
    Crop,
}

/// Result of background image loading operation.
struct LoadedImageData {
    reference: String,
    image: RgbaImage,
}

/// Thumbnail produced by the background thumbnail worker.
struct ThumbnailData {
    id: String,
    image: Result<RgbaImage, String>,
}

/// Main application state.
pub struct DualCropApp {
    config: AppConfig,

    /// Photo library
    store: FileStore,

    /// Current screen
    screen: Screen,

    /// Saved photos, newest first
    photos: Vec<PhotoRecord>,

    /// Gallery thumbnails by photo id
    thumbnails: HashMap<String, egui::TextureHandle>,

    /// Photo ids already handed to the thumbnail worker
    thumbnails_requested: HashSet<String>,

    /// Receiver for background thumbnail generation
    thumbnail_loader: Option<Receiver<ThumbnailData>>,

    /// Crop state for the current image
    session: CropSession,

    /// Texture of the image being cropped
    image_texture: Option<egui::TextureHandle>,

    /// Textures of the confirmed crop previews
    preview_textures: HashMap<Aspect, egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Receiver for a background save
    save_result: Option<Receiver<Result<PhotoRecord, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last status or error message
    status: Option<String>,
}

impl DualCropApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Self {
        let store = FileStore::new(config.library_path.clone());
        let session = CropSession::new(config.overlay);

        let mut app = Self {
            config,
            store,
            screen: Screen::Gallery,
            photos: Vec::new(),
            thumbnails: HashMap::new(),
            thumbnails_requested: HashSet::new(),
            thumbnail_loader: None,
            session,
            image_texture: None,
            preview_textures: HashMap::new(),
            image_loader: None,
            save_result: None,
            loading_message: None,
            status: None,
        };
        app.refresh_photos();
        app
    }

    /// Re-read the photo list from the store.
    fn refresh_photos(&mut self) {
        match self.store.get_all() {
            Ok(photos) => {
                log::info!("Library has {} photos", photos.len());
                self.photos = photos;
            }
            Err(e) => {
                log::error!("Failed to read photo library: {:#}", e);
                self.status = Some(format!("Failed to read photo library: {}", e));
            }
        }

        let ids: HashSet<&String> = self.photos.iter().map(|p| &p.id).collect();
        self.thumbnails.retain(|id, _| ids.contains(id));
    }

    /// True while a background save owns the library file.
    fn is_saving(&self) -> bool {
        self.save_result.is_some()
    }

    /// Leave the crop screen for the gallery.
    fn open_gallery(&mut self) {
        if self.is_saving() {
            log::warn!("Save in progress, staying on the crop screen");
            return;
        }
        self.close_session();
        self.refresh_photos();
        self.screen = Screen::Gallery;
    }

    /// Delete a saved photo.
    fn delete_photo(&mut self, id: &str) {
        if self.is_saving() {
            log::warn!("Save in progress, not deleting photo {}", id);
            return;
        }
        match self.store.delete(id) {
            Ok(()) => {
                self.thumbnails_requested.remove(id);
                self.refresh_photos();
            }
            Err(e) => {
                log::error!("Failed to delete photo {}: {:#}", id, e);
                self.status = Some(format!("Failed to delete photo: {}", e));
            }
        }
    }

    /// Start generating thumbnails for photos that have none (asynchronously).
    fn request_thumbnails(&mut self) {
        if self.thumbnail_loader.is_some() {
            return;
        }

        let pending: Vec<PhotoRecord> = self
            .photos
            .iter()
            .filter(|p| !self.thumbnails_requested.contains(&p.id))
            .cloned()
            .collect();
        if pending.is_empty() {
            return;
        }

        for photo in &pending {
            self.thumbnails_requested.insert(photo.id.clone());
        }

        let (sender, receiver) = channel();
        self.thumbnail_loader = Some(receiver);
        let max_side = self.config.thumbnail_size;

        // Spawn background thread for thumbnails
        std::thread::spawn(move || {
            for photo in pending {
                let image = media::load_image(&PathBuf::from(&photo.original_uri))
                    .map_err(|e| format!("{:#}", e))
                    .and_then(|loaded| {
                        extract::thumbnail(&loaded.image, &photo.square_crop, max_side)
                            .ok_or_else(|| "Empty image".to_string())
                    });

                if sender.send(ThumbnailData { id: photo.id, image }).is_err() {
                    break;
                }
            }
        });
    }

    /// Load an image file for cropping (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());
        self.screen = Screen::Crop;

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|loaded| {
                    log::info!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
                    LoadedImageData {
                        reference: path.to_string_lossy().to_string(),
                        image: loaded.image,
                    }
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Save the current session's record (asynchronously).
    fn save_session(&mut self) {
        if self.is_saving() {
            return;
        }
        let Some(record) = self.session.build_record() else {
            return;
        };

        let (sender, receiver) = channel();
        self.save_result = Some(receiver);
        let mut store = self.store.clone();

        std::thread::spawn(move || {
            let result = store
                .save(&record)
                .map(|_| record)
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Forget the current image and its crops.
    fn close_session(&mut self) {
        self.session.clear_image();
        self.image_texture = None;
        self.preview_textures.clear();
    }

    /// Rebuild the preview texture of one aspect from the session.
    fn update_preview_texture(&mut self, ctx: &egui::Context, aspect: Aspect) {
        let preview = self
            .session
            .confirmed(aspect)
            .and_then(|c| c.preview.as_ref())
            .map(media::to_color_image);

        match preview {
            Some(color_image) => {
                let name = format!("preview_{}", aspect.label());
                let texture = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
                self.preview_textures.insert(aspect, texture);
            }
            None => {
                self.preview_textures.remove(&aspect);
            }
        }
    }

    /// Poll all background workers.
    fn poll_background(&mut self, ctx: &egui::Context) {
        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded) => {
                        let color_image = media::to_color_image(&loaded.image);
                        let texture = ctx.load_texture(
                            "loaded_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );

                        self.image_texture = Some(texture);
                        self.preview_textures.clear();
                        self.session.set_image(loaded.reference, loaded.image);
                        self.status = None;
                    }
                    Err(e) => {
                        log::error!("Failed to load image: {}", e);
                        self.close_session();
                        self.status = Some(format!("Failed to load image: {}", e));
                    }
                }
            }
        }

        // Check for a completed save
        if let Some(ref receiver) = self.save_result {
            if let Ok(result) = receiver.try_recv() {
                self.save_result = None;

                match result {
                    Ok(record) => {
                        log::info!("Photo {} saved", record.id);
                        self.close_session();
                        self.refresh_photos();
                        self.screen = Screen::Gallery;
                        self.status = Some("Photo saved".to_string());
                    }
                    Err(e) => {
                        log::error!("Failed to save photo: {}", e);
                        self.status = Some(format!("Failed to save photo: {}", e));
                    }
                }
            }
        }

        // Drain finished thumbnails
        if let Some(ref receiver) = self.thumbnail_loader {
            loop {
                match receiver.try_recv() {
                    Ok(ThumbnailData { id, image: Ok(image) }) => {
                        let texture = ctx.load_texture(
                            format!("thumb_{}", id),
                            media::to_color_image(&image),
                            egui::TextureOptions::LINEAR,
                        );
                        self.thumbnails.insert(id, texture);
                    }
                    Ok(ThumbnailData { id, image: Err(e) }) => {
                        log::warn!("No thumbnail for photo {}: {}", id, e);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.thumbnail_loader = None;
                        break;
                    }
                }
            }
        }
    }

    fn pick_image(&mut self) {
        if self.is_saving() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", media::IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    fn show_gallery(&mut self, ctx: &egui::Context) {
        self.request_thumbnails();

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                gallery::show(
                    ui,
                    &self.photos,
                    &self.thumbnails,
                    self.config.thumbnail_size as f32,
                    !self.is_saving(),
                )
            })
            .inner;

        match action {
            gallery::GalleryAction::NewCrop => self.pick_image(),
            gallery::GalleryAction::Delete(id) => self.delete_photo(&id),
            gallery::GalleryAction::None => {}
        }
    }

    fn show_crop(&mut self, ctx: &egui::Context) {
        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.session.active_aspect(),
                    self.session.active_rect().is_some(),
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SetAspect(aspect) => {
                self.session.set_active_aspect(aspect);
                log::info!("Active aspect {}", aspect.label());
            }
            toolbar::ToolbarAction::Confirm => {
                let aspect = self.session.active_aspect();
                if self.session.confirm_active().is_some() {
                    self.update_preview_texture(ctx, aspect);
                }
            }
            toolbar::ToolbarAction::Reset => {
                let aspect = self.session.active_aspect();
                self.session.reset_active();
                self.update_preview_texture(ctx, aspect);
            }
            toolbar::ToolbarAction::None => {}
        }

        // Preview panel (right side)
        let original_size = self.session.image().map(|img| img.dimensions());
        let preview_action = egui::SidePanel::right("previews")
            .default_width(180.0)
            .show(ctx, |ui| {
                previews::show(
                    ui,
                    &self.preview_textures,
                    original_size,
                    self.session.can_save(),
                    self.is_saving(),
                )
            })
            .inner;

        if let previews::PreviewAction::Save = preview_action {
            self.save_session();
        }

        // Escape cancels an active drag
        if self.session.overlay().is_dragging() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session.drag_cancel();
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else if self.session.has_image() {
                    canvas::show(ui, &mut self.session, &self.image_texture)
                } else {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("File → Open Image... to pick a photo")
                                .color(egui::Color32::from_gray(180)),
                        );
                    });
                    canvas::CanvasAction::None
                }
            })
            .inner;

        if let canvas::CanvasAction::Committed(rect) = canvas_action {
            log::debug!(
                "{} rectangle committed at ({:.1}, {:.1}) {:.1}x{:.1}",
                self.session.active_aspect().label(),
                rect.left,
                rect.top,
                rect.width(),
                rect.height()
            );
        }
    }
}

impl eframe::App for DualCropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        // Keep repainting while workers are running
        if self.loading_message.is_some()
            || self.save_result.is_some()
            || self.thumbnail_loader.is_some()
        {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let idle = !self.is_saving();
                    if ui.add_enabled(idle, egui::Button::new("Open Image...")).clicked() {
                        self.pick_image();
                        ui.close_menu();
                    }
                    if ui.add_enabled(idle, egui::Button::new("Gallery")).clicked() {
                        self.open_gallery();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.screen {
                    Screen::Gallery => ui.label(format!("{} saved photos", self.photos.len())),
                    Screen::Crop => ui.label(match self.session.image_ref() {
                        Some(reference) => reference.to_string(),
                        None => "No image selected".to_string(),
                    }),
                };
                if let Some(ref status) = self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        match self.screen {
            Screen::Gallery => self.show_gallery(ctx),
            Screen::Crop => self.show_crop(ctx),
        }
    }
}
