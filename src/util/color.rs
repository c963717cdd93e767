//! Player color normalization.
//!
//! Colors arrive from the login form, the cookie store and the server in
//! whatever case the sender used. Selection glows are matched by color, so
//! every color is folded to lowercase `#rrggbb` before it is stored.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Fallback player color when nothing usable was supplied.
pub const DEFAULT_PLAYER_COLOR: &str = "#d94b4b";

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => Some((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

fn channel(hex: &str) -> Option<u8> {
    u8::from_str_radix(hex, 16).ok()
}

/// Normalize a color to canonical lowercase `#rrggbb`, or `fallback` when unparseable.
#[must_use]
pub fn normalize_hex_color(value: &str, fallback: &str) -> String {
    let fallback_rgb = parse_hex_rgb(fallback)
        .or_else(|| parse_hex_rgb(DEFAULT_PLAYER_COLOR))
        .unwrap_or((217, 75, 75));
    let (r, g, b) = parse_hex_rgb(value).unwrap_or(fallback_rgb);
    format!("#{r:02x}{g:02x}{b:02x}")
}
