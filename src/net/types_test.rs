#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn token_record_maps_every_field() {
    let t = token_from_record(TokenRecord {
        id: 4,
        posx: 1.5,
        posy: 2.5,
        zorder: -2,
        size: 120,
        rotate: 45.0,
        flipx: true,
        locked: true,
        url: "/img/orc.png".into(),
    });
    assert_eq!(t.id, 4);
    assert_eq!((t.x, t.y), (1.5, 2.5));
    assert_eq!(t.zorder, -2);
    assert_eq!(t.size, 120);
    assert_eq!(t.rotation, 45.0);
    assert!(t.flip_x && t.locked);
    assert_eq!(t.url, "/img/orc.png");
}

#[test]
fn patch_maps_only_present_fields() {
    let patch = TokenPatch { x: Some(3.0), locked: Some(false), ..TokenPatch::new(9) };
    let change = change_from_patch(&patch);
    assert_eq!(change, TokenChange { id: 9, posx: Some(3.0), locked: Some(false), ..TokenChange::default() });
}

#[test]
fn player_and_roll_colors_are_normalized() {
    let p = player_from_record(PlayerRecord {
        name: "Ada".into(),
        uuid: "u1".into(),
        color: "#ABC".into(),
        country: "nz".into(),
    });
    assert_eq!(p.color, "#aabbcc");
    let r = roll_from_record(RollRecord { color: "#FF0000".into(), sides: 6, result: 4, recent: true });
    assert_eq!(r.color, "#ff0000");
    assert!(r.recent);
}
