//! HTTP collaborators: login and image endpoints.
//!
//! Browser builds make real calls via `gloo-net`. Request shaping and reply
//! interpretation are plain functions so they are testable natively.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`ApiError`] for the page to show in a dismissible
//! popup. Nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ClientError;
use crate::util::color::{DEFAULT_PLAYER_COLOR, normalize_hex_color};
use crate::util::validate::{validate_game_id, validate_player_name};

/// Failures reported by HTTP collaborators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed.
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),
    /// The server refused the request with a message.
    #[error("{0}")]
    Rejected(String),
    /// The reply body was not what the endpoint promises.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Login form contents after client-side checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub game: String,
    pub name: String,
    pub color: String,
}

/// Raw `/login` reply.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginReply {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub error: String,
}

/// Identity accepted by the server, possibly sanitized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Login {
    pub name: String,
    pub color: String,
}

#[cfg(any(test, feature = "browser"))]
#[derive(Debug, Deserialize)]
struct ImageList {
    files: Vec<String>,
}

#[cfg(any(test, feature = "browser"))]
#[derive(Debug, Deserialize)]
struct UploadReply {
    urls: Vec<String>,
}

/// Validate login form input before anything is sent.
///
/// # Errors
///
/// Returns [`ClientError::InvalidInput`] for a bad game id or player name.
pub fn prepare_login(game: &str, name: &str, color: &str) -> Result<LoginRequest, ClientError> {
    let game = validate_game_id(game)?;
    let name = validate_player_name(name)?;
    Ok(LoginRequest {
        game: game.to_owned(),
        name: name.to_owned(),
        color: normalize_hex_color(color, DEFAULT_PLAYER_COLOR),
    })
}

/// Turn a `/login` reply into an accepted identity.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] when the reply carries an error message.
pub fn interpret_login(reply: LoginReply) -> Result<Login, ApiError> {
    let error = reply.error.trim();
    if !error.is_empty() {
        return Err(ApiError::Rejected(error.to_owned()));
    }
    Ok(Login { name: reply.name, color: normalize_hex_color(&reply.color, DEFAULT_PLAYER_COLOR) })
}

#[cfg(any(test, feature = "browser"))]
fn images_endpoint(game: &str) -> String {
    format!("/games/{game}/images")
}

#[cfg(any(test, feature = "browser"))]
fn upload_endpoint(game: &str) -> String {
    format!("/games/{game}/upload")
}

#[cfg(any(test, feature = "browser"))]
fn parse_image_list(raw: &str) -> Result<Vec<String>, ApiError> {
    serde_json::from_str::<ImageList>(raw)
        .map(|l| l.files)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(any(test, feature = "browser"))]
fn parse_upload_reply(raw: &str) -> Result<Vec<String>, ApiError> {
    serde_json::from_str::<UploadReply>(raw)
        .map(|r| r.urls)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "browser")]
async fn read_body(resp: gloo_net::http::Response) -> Result<String, ApiError> {
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.text().await.map_err(|e| ApiError::Request(e.to_string()))
}

/// `POST /login` with the checked form.
///
/// # Errors
///
/// Transport, status, decode and rejection failures as [`ApiError`].
#[cfg(feature = "browser")]
pub async fn login(request: &LoginRequest) -> Result<Login, ApiError> {
    let resp = gloo_net::http::Request::post("/login")
        .json(request)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let body = read_body(resp).await?;
    let reply = serde_json::from_str::<LoginReply>(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    interpret_login(reply)
}

/// List image file names available to `game`.
///
/// # Errors
///
/// Transport, status and decode failures as [`ApiError`].
#[cfg(feature = "browser")]
pub async fn list_images(game: &str) -> Result<Vec<String>, ApiError> {
    let resp = gloo_net::http::Request::get(&images_endpoint(game))
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    parse_image_list(&read_body(resp).await?)
}

/// Upload dropped image files; returns the URLs to create tokens from.
///
/// # Errors
///
/// Transport, status and decode failures as [`ApiError`].
#[cfg(feature = "browser")]
pub async fn upload_images(game: &str, files: &web_sys::FileList) -> Result<Vec<String>, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            form.append_with_blob_and_filename("files", &file, &file.name())
                .map_err(|e| ApiError::Request(format!("{e:?}")))?;
        }
    }
    let resp = gloo_net::http::Request::post(&upload_endpoint(game))
        .body(form)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    parse_upload_reply(&read_body(resp).await?)
}
