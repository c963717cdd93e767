use super::*;

#[test]
fn game_id_accepts_letters_digits_dash_underscore() {
    assert_eq!(validate_game_id(" dungeon_01-b ").unwrap(), "dungeon_01-b");
}

#[test]
fn game_id_rejects_bad_characters() {
    for raw in ["a b", "../etc", "caf\u{e9}", "x?y=1"] {
        assert!(matches!(validate_game_id(raw), Err(ClientError::InvalidInput(_))), "{raw}");
    }
}

#[test]
fn game_id_rejects_empty_and_overlong() {
    assert!(validate_game_id("   ").is_err());
    assert!(validate_game_id(&"a".repeat(MAX_GAME_ID_LEN)).is_ok());
    assert!(validate_game_id(&"a".repeat(MAX_GAME_ID_LEN + 1)).is_err());
}

#[test]
fn player_name_is_trimmed_and_bounded() {
    assert_eq!(validate_player_name("  Mira ").unwrap(), "Mira");
    assert!(validate_player_name("").is_err());
    assert!(validate_player_name(&"\u{e9}".repeat(MAX_PLAYER_NAME_LEN)).is_ok());
    assert!(validate_player_name(&"x".repeat(MAX_PLAYER_NAME_LEN + 1)).is_err());
}
