#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn token_json(id: i64) -> serde_json::Value {
    json!({
        "id": id, "posx": 10.5, "posy": 20.0, "zorder": 3, "size": 100,
        "rotate": 45.0, "flipx": true, "locked": false, "url": "/img/orc.png"
    })
}

#[test]
fn decode_update_reads_full_token_records() {
    let text = json!({ "OPID": "UPDATE", "tokens": [token_json(7)] }).to_string();
    let msg = decode_inbound(&text).expect("decode");
    let Inbound::Update { tokens } = msg else {
        panic!("expected UPDATE, got {msg:?}");
    };
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, 7);
    assert_eq!(tokens[0].zorder, 3);
    assert!(tokens[0].flipx);
    assert_eq!(tokens[0].url, "/img/orc.png");
}

#[test]
fn decode_token_defaults_optional_flags() {
    let text = json!({
        "OPID": "CREATE",
        "tokens": [{ "id": 1, "posx": 0, "posy": 0, "zorder": 0, "size": -1, "url": "bg.png" }]
    })
    .to_string();
    let Inbound::Create { tokens } = decode_inbound(&text).expect("decode") else {
        panic!("expected CREATE");
    };
    assert_eq!(tokens[0].size, -1);
    assert_eq!(tokens[0].rotate, 0.0);
    assert!(!tokens[0].flipx);
    assert!(!tokens[0].locked);
}

#[test]
fn decode_accept_reads_roster_rolls_and_tokens() {
    let text = json!({
        "OPID": "ACCEPT",
        "players": {
            "u1": { "name": "Ann", "uuid": "u1", "color": "#ff0000", "country": "se" }
        },
        "rolls": [{ "color": "#ff0000", "sides": 20, "result": 17 }],
        "tokens": [token_json(1), token_json(2)]
    })
    .to_string();
    let Inbound::Accept { players, rolls, tokens } = decode_inbound(&text).expect("decode") else {
        panic!("expected ACCEPT");
    };
    assert_eq!(players["u1"].name, "Ann");
    assert_eq!(rolls[0].result, 17);
    assert!(!rolls[0].recent);
    assert_eq!(tokens.len(), 2);
}

#[test]
fn decode_join_and_roll_are_flat_objects() {
    let join = json!({ "OPID": "JOIN", "name": "Bo", "uuid": "u2", "color": "#00ff00", "country": "no" });
    let msg = decode_inbound(&join.to_string()).expect("decode");
    assert_eq!(msg.opid(), "JOIN");
    assert!(matches!(msg, Inbound::Join(ref p) if p.uuid == "u2"));

    let roll = json!({ "OPID": "ROLL", "color": "#00ff00", "sides": 6, "result": 4, "recent": true });
    let msg = decode_inbound(&roll.to_string()).expect("decode");
    assert!(matches!(msg, Inbound::Roll(ref r) if r.recent && r.result == 4));
}

#[test]
fn decode_select_and_delete() {
    let sel = json!({ "OPID": "SELECT", "color": "#123456", "selected": [3, 4] });
    assert_eq!(
        decode_inbound(&sel.to_string()).expect("decode"),
        Inbound::Select { color: "#123456".to_owned(), selected: vec![3, 4] }
    );
    let del = json!({ "OPID": "DELETE", "tokens": [9] });
    assert_eq!(decode_inbound(&del.to_string()).expect("decode"), Inbound::Delete { tokens: vec![9] });
}

#[test]
fn decode_rejects_unknown_operation() {
    let err = decode_inbound(r#"{"OPID":"DANCE"}"#).expect_err("unknown op");
    assert!(matches!(err, CodecError::UnknownOp(ref op) if op == "DANCE"));
}

#[test]
fn decode_rejects_missing_operation() {
    let err = decode_inbound(r#"{"tokens":[]}"#).expect_err("missing op");
    assert!(matches!(err, CodecError::MissingOp));
}

#[test]
fn decode_rejects_malformed_text_and_fields() {
    assert!(matches!(decode_inbound("not json"), Err(CodecError::Malformed(_))));
    let bad = json!({ "OPID": "UPDATE", "tokens": [{ "id": "x" }] });
    assert!(matches!(decode_inbound(&bad.to_string()), Err(CodecError::Malformed(_))));
}

#[test]
fn encode_update_omits_absent_fields() {
    let msg = Outbound::Update {
        changes: vec![TokenChange { id: 4, posx: Some(1.0), posy: Some(2.0), ..Default::default() }],
    };
    let value: serde_json::Value = serde_json::from_str(&encode_outbound(&msg)).expect("json");
    assert_eq!(value, json!({ "OPID": "UPDATE", "changes": [{ "id": 4, "posx": 1.0, "posy": 2.0 }] }));
}

#[test]
fn encode_outbound_shapes() {
    let cases = [
        (
            Outbound::Create { posx: 1.0, posy: 2.0, size: 100, urls: vec!["a.png".to_owned()] },
            json!({ "OPID": "CREATE", "posx": 1.0, "posy": 2.0, "size": 100, "urls": ["a.png"] }),
        ),
        (Outbound::Delete { tokens: vec![1, 2] }, json!({ "OPID": "DELETE", "tokens": [1, 2] })),
        (Outbound::Select { selected: vec![5] }, json!({ "OPID": "SELECT", "selected": [5] })),
        (
            Outbound::Range { left: 1.0, top: 2.0, width: 3.0, height: 4.0 },
            json!({ "OPID": "RANGE", "left": 1.0, "top": 2.0, "width": 3.0, "height": 4.0 }),
        ),
        (
            Outbound::CloneTokens { ids: vec![8], posx: 5.0, posy: 6.0 },
            json!({ "OPID": "CLONE", "ids": [8], "posx": 5.0, "posy": 6.0 }),
        ),
        (Outbound::Roll { sides: 20 }, json!({ "OPID": "ROLL", "sides": 20 })),
    ];
    for (msg, expected) in cases {
        let value: serde_json::Value = serde_json::from_str(&encode_outbound(&msg)).expect("json");
        assert_eq!(value, expected);
    }
}

#[test]
fn inbound_kinds_match_opid_names() {
    let msg = Inbound::Quit { uuid: "u".to_owned() };
    assert!(Inbound::KINDS.contains(&msg.opid()));
    assert_eq!(Inbound::KINDS.len(), 9);
}
