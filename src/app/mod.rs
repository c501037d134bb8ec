pub mod gallery;
pub mod lightbox;
pub mod loader;

use std::path::PathBuf;
use std::time::Duration;

use eframe::{
    egui::{self, Align2, Color32, FontId, Sense},
    App, Frame,
};

use crate::acquire::{accept_items, collect_paths, DroppedItem, SUPPORTED_EXTENSIONS};
use crate::store::{ImageStore, LoadPhase, RecordId};

use self::gallery::GalleryAction;
use self::lightbox::LightboxAction;
use self::loader::{DecodeRequest, LoadOutcome, Loader};

pub struct ImageVaultApp {
    pub store: ImageStore,
    loader: Loader,
    /// Record awaiting the user's yes/no in the confirmation modal. The
    /// store is only mutated when the user confirms.
    pending_delete: Option<RecordId>,
    status: String,
    recursive: bool,
}

impl ImageVaultApp {
    pub fn new(initial: Vec<PathBuf>, recursive: bool) -> Self {
        let mut app = Self {
            store: ImageStore::new(),
            loader: Loader::new(),
            pending_delete: None,
            status: String::from("Ready"),
            recursive,
        };
        if !initial.is_empty() {
            app.stage_items(initial.into_iter().map(DroppedItem::Path).collect());
        }
        app
    }

    /// Entry point for every acquisition path: dropped files, dropped
    /// directories, picked files and CLI arguments. Accepted items are
    /// appended in input order; decoding happens in the background.
    pub fn stage_items(&mut self, items: Vec<DroppedItem>) {
        let mut expanded = Vec::with_capacity(items.len());
        for item in items {
            match item {
                DroppedItem::Path(path) if path.is_dir() => {
                    match collect_paths(&[path], self.recursive) {
                        Ok(files) => expanded.extend(files.into_iter().map(DroppedItem::Path)),
                        Err(err) => self.status = format!("{err:#}"),
                    }
                }
                other => expanded.push(other),
            }
        }

        let accepted = accept_items(expanded);
        if accepted.is_empty() {
            return;
        }
        let count = accepted.len();
        for new in accepted {
            let source = new.source.clone();
            let id = self.store.add(new);
            self.loader.request(DecodeRequest { id, source });
        }
        self.status = format!(
            "Added {count} image{}",
            if count == 1 { "" } else { "s" }
        );
    }

    pub fn request_delete(&mut self, id: RecordId) {
        if self.store.get(id).is_some() {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            let name = self.store.get(id).map(|record| record.name.clone());
            if self.store.remove(id) {
                if let Some(name) = name {
                    self.status = format!("Deleted {name}");
                }
            }
        }
    }

    pub fn pending_delete(&self) -> Option<RecordId> {
        self.pending_delete
    }

    /// The native dialog is modal, so a second pick cannot be issued
    /// while this one is open. Cancellation leaves the store unchanged.
    fn pick_files(&mut self) {
        let Some(picked) = rfd::FileDialog::new()
            .add_filter("Images", SUPPORTED_EXTENSIONS)
            .set_title("Add Images")
            .pick_files()
        else {
            return;
        };
        self.stage_items(picked.into_iter().map(DroppedItem::Path).collect());
    }

    fn apply_loader_results(&mut self, ctx: &egui::Context) {
        for outcome in self.loader.poll() {
            match outcome {
                LoadOutcome::Decoded(decoded) => {
                    // Deleted while decoding: nothing to attach to.
                    let Some(record) = self.store.get_mut(decoded.id) else {
                        continue;
                    };
                    record.texture = Some(ctx.load_texture(
                        format!("imagevault-full-{}", decoded.id),
                        decoded.full,
                        egui::TextureOptions::LINEAR,
                    ));
                    record.thumbnail = Some(ctx.load_texture(
                        format!("imagevault-thumb-{}", decoded.id),
                        decoded.thumbnail,
                        egui::TextureOptions::LINEAR,
                    ));
                    record.dimensions = Some(decoded.dimensions);
                    record.phase = LoadPhase::Ready;
                }
                LoadOutcome::Failed { id, error } => {
                    if let Some(record) = self.store.get_mut(id) {
                        record.phase = LoadPhase::Failed(error.clone());
                        self.status = format!("Failed to load {}: {error}", record.name);
                    }
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<DroppedItem> = ctx
            .input(|input| input.raw.dropped_files.clone())
            .into_iter()
            .filter_map(DroppedItem::from_egui)
            .collect();
        if !dropped.is_empty() {
            self.stage_items(dropped);
        }
    }

    fn show_drop_hint(&self, ctx: &egui::Context) {
        let hovering = ctx.input(|input| !input.raw.hovered_files.is_empty());
        if !hovering {
            return;
        }
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("drop-hint"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(160));
                ui.painter().text(
                    screen.center(),
                    Align2::CENTER_CENTER,
                    "Drop to add images",
                    FontId::proportional(28.0),
                    Color32::WHITE,
                );
            });
    }

    fn show_confirm_modal(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete else {
            return;
        };
        let Some(record) = self.store.get(id) else {
            // Record vanished while the dialog was up; nothing to delete.
            self.pending_delete = None;
            return;
        };
        let name = record.name.clone();
        let screen = ctx.screen_rect();

        // Dim everything behind the dialog and swallow stray clicks.
        egui::Area::new(egui::Id::new("confirm-backdrop"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.allocate_rect(screen, Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(160));
            });

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Delete image?")
            .order(egui::Order::Foreground)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Delete \"{name}\"? This cannot be undone."));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.confirm_delete();
        } else if cancelled {
            self.cancel_delete();
        }
    }
}

impl App for ImageVaultApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.apply_loader_results(ctx);
        self.handle_dropped_files(ctx);

        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            if self.pending_delete.is_some() {
                self.cancel_delete();
            } else if self.store.selected().is_some() {
                self.store.close();
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("ImageVault");
                ui.separator();
                if ui.button("Add images…").clicked() {
                    self.pick_files();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{} image{} staged",
                        self.store.len(),
                        if self.store.len() == 1 { "" } else { "s" }
                    ));
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.store.is_empty() {
                if gallery::show_empty_state(ui) {
                    self.pick_files();
                }
            } else if let Some(action) = gallery::show(ui, &self.store) {
                match action {
                    GalleryAction::Open(id) => {
                        self.store.open(id);
                    }
                    GalleryAction::RequestDelete(id) => self.request_delete(id),
                }
            }
        });

        let lightbox_action = match self.store.selected_record() {
            Some(record) => lightbox::show(ctx, record),
            None => None,
        };
        match lightbox_action {
            Some(LightboxAction::Close) => self.store.close(),
            Some(LightboxAction::RequestDelete(id)) => self.request_delete(id),
            None => {}
        }

        self.show_drop_hint(ctx);
        self.show_confirm_modal(ctx);

        let loading = self
            .store
            .records()
            .iter()
            .any(|record| record.phase == LoadPhase::Loading);
        if loading {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
