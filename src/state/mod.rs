//! Client-side state: the session context plus presence and roll feed.

pub mod presence;
pub mod rolls;
pub mod session;
