//! Cookie store for the local player's display color.
//!
//! The color survives a lost connection so the login form can offer it again.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Cookie holding the last color the local player logged in with.
pub const PLAYER_COLOR_COOKIE: &str = "player_color";

/// How long the color cookie lives.
const MAX_AGE_SECS: u32 = 60 * 60 * 24 * 365;

/// Find `name` in a `document.cookie` string.
#[must_use]
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Format a `document.cookie` assignment for `name=value`.
#[must_use]
pub fn format_cookie(name: &str, value: &str) -> String {
    let value: String = value.chars().filter(|c| !matches!(c, ';' | ',' | ' ')).collect();
    format!("{name}={value}; max-age={MAX_AGE_SECS}; path=/; samesite=strict")
}

/// Read the saved player color, if any.
#[must_use]
pub fn load_player_color() -> Option<String> {
    #[cfg(feature = "browser")]
    {
        use wasm_bindgen::JsCast;

        let doc = web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let cookies = doc.cookie().ok()?;
        find_cookie(&cookies, PLAYER_COLOR_COOKIE)
    }
    #[cfg(not(feature = "browser"))]
    {
        None
    }
}

/// Persist the player color.
pub fn save_player_color(color: &str) {
    #[cfg(feature = "browser")]
    {
        use wasm_bindgen::JsCast;

        let Some(doc) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        else {
            return;
        };
        if doc.set_cookie(&format_cookie(PLAYER_COLOR_COOKIE, color)).is_err() {
            log::warn!("could not write {PLAYER_COLOR_COOKIE} cookie");
        }
    }
    #[cfg(not(feature = "browser"))]
    {
        let _ = color;
    }
}
