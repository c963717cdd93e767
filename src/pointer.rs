//! DOM pointer codes and touch tracking, mapped onto engine buttons.
//!
//! Touch drives the primary button with one finger at a time. Fingers that
//! land while another is down are ignored until the tracked one lifts.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use canvas::input::Button;

/// Engine button for a `MouseEvent.button` code.
#[must_use]
pub fn mouse_button(code: i16) -> Option<Button> {
    match code {
        0 => Some(Button::Primary),
        1 => Some(Button::Middle),
        2 => Some(Button::Secondary),
        _ => None,
    }
}

/// The touch currently standing in for the primary button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchTrack {
    active: Option<i32>,
}

impl TouchTrack {
    /// A finger with `id` landed while `touches` fingers are down in total.
    /// Returns `true` when it starts a primary-button gesture.
    pub fn start(&mut self, id: i32, touches: u32) -> bool {
        if self.active.is_some() || touches != 1 {
            return false;
        }
        self.active = Some(id);
        true
    }

    #[must_use]
    pub fn follows(&self, id: i32) -> bool {
        self.active == Some(id)
    }

    /// A finger lifted or was cancelled. Returns `true` when it ends the
    /// tracked gesture.
    pub fn end(&mut self, id: i32) -> bool {
        if !self.follows(id) {
            return false;
        }
        self.active = None;
        true
    }
}
