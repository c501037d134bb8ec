use eframe::egui::Vec2;
use imagevault::app::gallery::*;

#[test]
fn format_size_renders_two_decimal_megabytes() {
    assert_eq!(format_size(Some(2_097_152)), "2.00 MB");
    assert_eq!(format_size(Some(1_572_864)), "1.50 MB");
}

#[test]
fn unknown_size_renders_the_placeholder_not_zero() {
    let rendered = format_size(None);
    assert_eq!(rendered, "Size unknown");
    assert_ne!(rendered, "0.00 MB");
}

#[test]
fn column_count_follows_available_width() {
    assert_eq!(column_count(400.0), 2);
    assert_eq!(column_count(699.0), 2);
    assert_eq!(column_count(700.0), 3);
    assert_eq!(column_count(1099.0), 3);
    assert_eq!(column_count(1100.0), 4);
    assert_eq!(column_count(2560.0), 4);
}

#[test]
fn truncate_name_leaves_short_names_alone() {
    assert_eq!(truncate_name("cat.png", 12), "cat.png");
}

#[test]
fn truncate_name_appends_an_ellipsis() {
    let truncated = truncate_name("a-very-long-file-name.png", 10);
    assert_eq!(truncated.chars().count(), 10);
    assert!(truncated.ends_with('…'));
}

#[test]
fn truncate_name_respects_char_boundaries() {
    let truncated = truncate_name("ünïcödé-näme-that-is-long.png", 8);
    assert_eq!(truncated.chars().count(), 8);
    assert!(truncated.starts_with("ünïcödé"));
}

#[test]
fn fit_within_respects_available_bounds() {
    let (display, scale) = fit_within(Vec2::new(400.0, 100.0), Vec2::new(200.0, 200.0));
    assert_eq!(display.x, 200.0);
    assert!(display.y <= 200.0);
    assert_eq!(scale, 0.5);
}

#[test]
fn fit_within_centers_small_images_by_upscaling() {
    let (display, scale) = fit_within(Vec2::new(50.0, 50.0), Vec2::new(200.0, 100.0));
    assert_eq!(scale, 2.0);
    assert_eq!(display, Vec2::new(100.0, 100.0));
}
