//! Small browser-glue helpers shared by the client shell.

pub mod color;
pub mod cookie;
pub mod storage;
pub mod validate;
