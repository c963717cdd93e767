//! Client error taxonomy.
//!
//! Nothing here is fatal: the worst outcome of any error is a return to the
//! login step with a notice.

use thiserror::Error;

use crate::net::api::ApiError;

/// Errors surfaced to the page.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The message channel failed or closed.
    #[error("connection lost: {0}")]
    Transport(String),
    /// An HTTP collaborator failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Local input was rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
