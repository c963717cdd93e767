//! Conversions between wire records and client types.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use canvas::store::{Token, TokenPatch};
use protocol::{PlayerRecord, RollRecord, TokenChange, TokenRecord};

use crate::state::presence::Player;
use crate::state::rolls::Roll;
use crate::util::color::{DEFAULT_PLAYER_COLOR, normalize_hex_color};

/// Full token snapshot from the wire.
#[must_use]
pub fn token_from_record(record: TokenRecord) -> Token {
    Token {
        id: record.id,
        x: record.posx,
        y: record.posy,
        zorder: record.zorder,
        size: record.size,
        rotation: record.rotate,
        flip_x: record.flipx,
        locked: record.locked,
        url: record.url,
    }
}

#[must_use]
pub fn tokens_from_records(records: Vec<TokenRecord>) -> Vec<Token> {
    records.into_iter().map(token_from_record).collect()
}

/// Local edit as an outbound partial change.
#[must_use]
pub fn change_from_patch(patch: &TokenPatch) -> TokenChange {
    TokenChange {
        id: patch.id,
        posx: patch.x,
        posy: patch.y,
        zorder: patch.zorder,
        size: patch.size,
        rotate: patch.rotation,
        flipx: patch.flip_x,
        locked: patch.locked,
    }
}

#[must_use]
pub fn player_from_record(record: PlayerRecord) -> Player {
    Player {
        color: normalize_hex_color(&record.color, DEFAULT_PLAYER_COLOR),
        name: record.name,
        uuid: record.uuid,
        country: record.country,
    }
}

#[must_use]
pub fn roll_from_record(record: RollRecord) -> Roll {
    Roll {
        color: normalize_hex_color(&record.color, DEFAULT_PLAYER_COLOR),
        sides: record.sides,
        result: record.result,
        recent: record.recent,
    }
}
