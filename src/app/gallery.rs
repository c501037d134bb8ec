use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, StrokeKind, Vec2};

use crate::store::{ImageRecord, ImageStore, LoadPhase, RecordId};

pub const GRID_SPACING: f32 = 12.0;
pub const CAPTION_HEIGHT: f32 = 40.0;

const UV_FULL: Rect = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Open(RecordId),
    RequestDelete(RecordId),
}

/// Columns are a function of available width only: two on narrow windows,
/// up to four on wide ones.
pub fn column_count(available_width: f32) -> usize {
    if available_width < 700.0 {
        2
    } else if available_width < 1100.0 {
        3
    } else {
        4
    }
}

/// `bytes / 1024 / 1024` to two decimals. An unknown size renders a
/// literal placeholder, never "0.00 MB".
pub fn format_size(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0),
        None => "Size unknown".to_string(),
    }
}

/// Truncates on char boundaries with a trailing ellipsis.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Scales an image size to fit the available area, returning the display
/// size and the applied scale factor.
pub fn fit_within(image_size: Vec2, available: Vec2) -> (Vec2, f32) {
    let safe_size = egui::vec2(image_size.x.max(1.0), image_size.y.max(1.0));
    let scale = (available.x / safe_size.x)
        .min(available.y / safe_size.y)
        .max(0.01);
    (safe_size * scale, scale)
}

/// The responsive grid. Pure presentation: reads the store, emits at most
/// one action for the caller to apply.
pub fn show(ui: &mut egui::Ui, store: &ImageStore) -> Option<GalleryAction> {
    let mut action = None;
    let columns = column_count(ui.available_width());
    let cell_width =
        (ui.available_width() - GRID_SPACING * (columns as f32 + 1.0)) / columns as f32;

    egui::ScrollArea::vertical()
        .auto_shrink(false)
        .show(ui, |ui| {
            ui.add_space(GRID_SPACING);
            for row in store.records().chunks(columns) {
                ui.horizontal(|ui| {
                    ui.add_space(GRID_SPACING);
                    for record in row {
                        if let Some(cell_action) = show_cell(ui, record, cell_width) {
                            action = Some(cell_action);
                        }
                        ui.add_space(GRID_SPACING);
                    }
                });
                ui.add_space(GRID_SPACING);
            }
        });
    action
}

fn show_cell(ui: &mut egui::Ui, record: &ImageRecord, width: f32) -> Option<GalleryAction> {
    let mut action = None;
    let cell_size = egui::vec2(width, width + CAPTION_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(cell_size, Sense::hover());
    let thumb_rect = Rect::from_min_size(rect.min, egui::vec2(width, width));

    ui.painter().rect_filled(thumb_rect, 4.0, Color32::from_gray(24));

    match &record.phase {
        LoadPhase::Ready => {
            if let Some(thumbnail) = &record.thumbnail {
                let (display, _) = fit_within(thumbnail.size_vec2(), thumb_rect.size());
                let image_rect = Rect::from_center_size(thumb_rect.center(), display);
                ui.painter()
                    .image(thumbnail.id(), image_rect, UV_FULL, Color32::WHITE);
            }
        }
        LoadPhase::Loading => {
            ui.put(thumb_rect, egui::Spinner::new());
        }
        LoadPhase::Failed(_) => {
            ui.painter().text(
                thumb_rect.center(),
                Align2::CENTER_CENTER,
                "failed to load",
                FontId::proportional(13.0),
                Color32::LIGHT_RED,
            );
        }
    }

    let response = ui.interact(
        thumb_rect,
        ui.id().with(("gallery-cell", record.id)),
        Sense::click(),
    );
    if response.hovered() {
        ui.painter().rect_stroke(
            thumb_rect,
            4.0,
            egui::Stroke::new(2.0, Color32::from_gray(180)),
            StrokeKind::Inside,
        );
    }
    if response.clicked() && record.phase == LoadPhase::Ready {
        action = Some(GalleryAction::Open(record.id));
    }

    // Per-cell delete control, kept visible while the cell is hovered so
    // the confirmation flow is reachable without opening the lightbox.
    if response.hovered() || ui.rect_contains_pointer(thumb_rect) {
        let delete_rect = Rect::from_min_size(
            egui::pos2(thumb_rect.max.x - 30.0, thumb_rect.min.y + 6.0),
            egui::vec2(24.0, 24.0),
        );
        if ui.put(delete_rect, egui::Button::new("🗑").small()).clicked() {
            action = Some(GalleryAction::RequestDelete(record.id));
        }
    }

    let max_chars = ((width / 7.5) as usize).max(8);
    ui.painter().text(
        egui::pos2(rect.min.x + 2.0, thumb_rect.max.y + 4.0),
        Align2::LEFT_TOP,
        truncate_name(&record.name, max_chars),
        FontId::proportional(14.0),
        Color32::from_gray(230),
    );
    ui.painter().text(
        egui::pos2(rect.min.x + 2.0, thumb_rect.max.y + 22.0),
        Align2::LEFT_TOP,
        format_size(record.size),
        FontId::proportional(12.0),
        Color32::from_gray(150),
    );

    action
}

/// Distinct empty-state view shown instead of an empty grid. Returns true
/// when the user asked to pick files.
pub fn show_empty_state(ui: &mut egui::Ui) -> bool {
    let mut add_clicked = false;
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.heading("No images yet");
            ui.add_space(8.0);
            ui.label("Drop image files anywhere in this window, or pick them from disk.");
            ui.add_space(16.0);
            if ui.button("Add images…").clicked() {
                add_clicked = true;
            }
        });
    });
    add_clicked
}
