#![allow(clippy::float_cmp)]

use super::*;

fn token(id: TokenId, z: i64) -> Token {
    Token {
        id,
        x: 0.0,
        y: 0.0,
        zorder: z,
        size: 100,
        rotation: 0.0,
        flip_x: false,
        locked: false,
        url: "a.png".to_owned(),
    }
}

#[test]
fn spawn_starts_at_zero_and_ramps_up() {
    let mut fades = Fades::new();
    fades.spawn(1);
    assert_eq!(fades.spawn_level(1), Some(0.0));
    fades.tick();
    assert_eq!(fades.spawn_level(1), Some(1.0 / f64::from(FADE_FRAMES)));
}

#[test]
fn spawn_is_purged_after_fixed_frame_count() {
    let mut fades = Fades::new();
    fades.spawn(1);
    for _ in 0..FADE_FRAMES - 1 {
        fades.tick();
        assert!(fades.spawn_level(1).is_some());
    }
    fades.tick();
    assert_eq!(fades.spawn_level(1), None);
    assert!(fades.is_idle());
}

#[test]
fn despawn_starts_at_one_and_ramps_down() {
    let mut fades = Fades::new();
    fades.despawn(token(1, 0));
    assert_eq!(fades.despawning()[0].level(), 1.0);
    fades.tick();
    assert!(fades.despawning()[0].level() < 1.0);
    for _ in 0..FADE_FRAMES {
        fades.tick();
    }
    assert!(!fades.is_despawning(1));
}

#[test]
fn despawn_cancels_spawn_and_respawn_cancels_despawn() {
    let mut fades = Fades::new();
    fades.spawn(1);
    fades.despawn(token(1, 0));
    assert_eq!(fades.spawn_level(1), None);
    assert!(fades.is_despawning(1));
    fades.spawn(1);
    assert!(!fades.is_despawning(1));
}

#[test]
fn despawning_is_sorted_by_z() {
    let mut fades = Fades::new();
    fades.despawn(token(1, 5));
    fades.despawn(token(2, -2));
    fades.despawn(token(3, 1));
    let ids: Vec<TokenId> = fades.despawning().iter().map(|d| d.token.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn clear_drops_everything() {
    let mut fades = Fades::new();
    fades.spawn(1);
    fades.despawn(token(2, 0));
    fades.clear();
    assert!(fades.is_idle());
}
