#![allow(clippy::float_cmp)]

use super::*;

fn token(size: i64, url: &str) -> Token {
    Token {
        id: 1,
        x: 0.0,
        y: 0.0,
        zorder: 0,
        size,
        rotation: 0.0,
        flip_x: false,
        locked: false,
        url: url.to_owned(),
    }
}

// =============================================================
// ImageSizes
// =============================================================

#[test]
fn first_recorded_size_wins() {
    let mut sizes = ImageSizes::new();
    sizes.insert("a.png", NaturalSize::new(200.0, 100.0));
    sizes.insert("a.png", NaturalSize::new(50.0, 50.0));
    assert_eq!(sizes.get("a.png"), Some(NaturalSize::new(200.0, 100.0)));
}

#[test]
fn zero_sizes_are_not_recorded() {
    let mut sizes = ImageSizes::new();
    sizes.insert("broken.png", NaturalSize::new(0.0, 0.0));
    assert!(!sizes.contains("broken.png"));
}

// =============================================================
// Rendered sizes
// =============================================================

#[test]
fn wide_image_keeps_width() {
    let (w, h) = rendered_size(100, Some(NaturalSize::new(400.0, 200.0)));
    assert_eq!((w, h), (100.0, 50.0));
}

#[test]
fn tall_image_keeps_height() {
    let (w, h) = rendered_size(100, Some(NaturalSize::new(100.0, 400.0)));
    assert_eq!((w, h), (25.0, 100.0));
}

#[test]
fn unknown_image_is_square() {
    assert_eq!(rendered_size(80, None), (80.0, 80.0));
}

#[test]
fn background_fits_inside_scene() {
    let (w, h) = background_size(Some(NaturalSize::new(1000.0, 1000.0)));
    assert_eq!((w, h), (1080.0, 1080.0));
    let (w, h) = background_size(Some(NaturalSize::new(3840.0, 1080.0)));
    assert_eq!((w, h), (1920.0, 540.0));
}

#[test]
fn background_without_image_fills_scene() {
    assert_eq!(background_size(None), (SCENE_WIDTH, SCENE_HEIGHT));
}

#[test]
fn token_size_dispatches_on_background() {
    let mut sizes = ImageSizes::new();
    sizes.insert("bg.png", NaturalSize::new(1920.0, 1080.0));
    assert_eq!(token_size(&token(-1, "bg.png"), &sizes), (1920.0, 1080.0));
    assert_eq!(token_size(&token(60, "bg.png"), &sizes), (60.0, 33.75));
}

#[test]
fn hit_extent_is_longer_side() {
    assert_eq!(hit_extent(30.0, 70.0), 70.0);
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn full_turns_fold_to_zero() {
    assert_eq!(normalize_rotation(360.0), 0.0);
    assert_eq!(normalize_rotation(-400.0), 0.0);
    assert_eq!(normalize_rotation(f64::NAN), 0.0);
    assert_eq!(normalize_rotation(-90.0), -90.0);
}

#[test]
fn pointer_straight_up_is_zero() {
    let r = pointer_rotation(Point::new(100.0, 100.0), Point::new(100.0, 0.0));
    assert_eq!(r, Some(0.0));
}

#[test]
fn pointer_right_is_positive_quarter() {
    let r = pointer_rotation(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
    assert!((r - 90.0).abs() < 1e-9);
}

#[test]
fn pointer_left_is_negative_quarter() {
    let r = pointer_rotation(Point::new(0.0, 0.0), Point::new(-10.0, 0.0)).unwrap();
    assert!((r + 90.0).abs() < 1e-9);
}

#[test]
fn pointer_below_is_half_turn() {
    let r = pointer_rotation(Point::new(0.0, 0.0), Point::new(0.0, 10.0)).unwrap();
    assert!((r - 180.0).abs() < 1e-9);
}

#[test]
fn pointer_on_center_has_no_angle() {
    assert_eq!(pointer_rotation(Point::new(5.0, 5.0), Point::new(5.0, 5.0)), None);
}

// =============================================================
// Scaling
// =============================================================

#[test]
fn scaled_size_rounds_and_clamps() {
    assert_eq!(scaled_size(100, 1.5), 150);
    assert_eq!(scaled_size(100, 0.01), MIN_TOKEN_SIZE);
    assert_eq!(scaled_size(100, 50.0), MAX_TOKEN_SIZE);
}

#[test]
fn scaled_size_survives_non_finite_factor() {
    assert_eq!(scaled_size(100, f64::INFINITY), MAX_TOKEN_SIZE);
    assert_eq!(scaled_size(100, f64::NAN), MIN_TOKEN_SIZE);
}
