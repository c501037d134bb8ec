use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense};

use crate::store::{ImageRecord, LoadPhase, RecordId};

use super::gallery::{fit_within, format_size};

const UV_FULL: Rect = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    RequestDelete(RecordId),
}

/// Fullscreen overlay for the record the store currently has open.
/// Closed by the ✕ control, a backdrop click, or Escape (handled by the
/// app's keyboard pass). Deletion routes through the same confirmation
/// flow as the grid.
pub fn show(ctx: &egui::Context, record: &ImageRecord) -> Option<LightboxAction> {
    let mut action = None;
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("lightbox"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let backdrop = ui.allocate_rect(screen, Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(230));

            let content = screen.shrink(48.0);
            match &record.phase {
                LoadPhase::Ready => {
                    if let Some(texture) = &record.texture {
                        let (display, _) = fit_within(texture.size_vec2(), content.size());
                        let image_rect = Rect::from_center_size(content.center(), display);
                        ui.painter()
                            .image(texture.id(), image_rect, UV_FULL, Color32::WHITE);
                    }
                }
                LoadPhase::Loading => {
                    ui.painter().text(
                        content.center(),
                        Align2::CENTER_CENTER,
                        "Loading…",
                        FontId::proportional(20.0),
                        Color32::WHITE,
                    );
                }
                LoadPhase::Failed(_) => {
                    ui.painter().text(
                        content.center(),
                        Align2::CENTER_CENTER,
                        "Could not load this image",
                        FontId::proportional(20.0),
                        Color32::LIGHT_RED,
                    );
                }
            }

            let mut caption = format!("{} — {}", record.name, format_size(record.size));
            if let Some((width, height)) = record.dimensions {
                caption.push_str(&format!(" — {width}×{height}"));
            }
            draw_caption(
                ui,
                ctx,
                egui::pos2(screen.center().x, screen.max.y - 16.0),
                Align2::CENTER_BOTTOM,
                caption,
            );

            let close_rect = Rect::from_min_size(
                egui::pos2(screen.max.x - 48.0, screen.min.y + 12.0),
                egui::vec2(32.0, 32.0),
            );
            if ui.put(close_rect, egui::Button::new("✕")).clicked() {
                action = Some(LightboxAction::Close);
            }

            let delete_rect = Rect::from_min_size(
                egui::pos2(screen.max.x - 92.0, screen.min.y + 12.0),
                egui::vec2(32.0, 32.0),
            );
            if ui.put(delete_rect, egui::Button::new("🗑")).clicked() {
                action = Some(LightboxAction::RequestDelete(record.id));
            }

            if backdrop.clicked() && action.is_none() {
                action = Some(LightboxAction::Close);
            }
        });

    action
}

fn draw_caption(
    ui: &egui::Ui,
    ctx: &egui::Context,
    pos: egui::Pos2,
    align: Align2,
    text: String,
) {
    let galley = ctx.fonts_mut(|fonts| {
        fonts.layout_no_wrap(text, FontId::proportional(16.0), Color32::WHITE)
    });
    let rect = align.anchor_size(pos, galley.size());
    ui.painter()
        .rect_filled(rect.expand(6.0), 4.0, Color32::from_black_alpha(178));
    ui.painter().galley(rect.min, galley, Color32::WHITE);
}
