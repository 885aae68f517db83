//! HTTP client for the hosted Volhub platform.

use std::path::Path;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use volhub_core::{HubError, HubResult, User};

/// The hosted platform. Self-hosters point `api_url` in the config
/// somewhere else.
pub const DEFAULT_API_URL: &str = "https://api.volhub.app/v1";

/// Typed client for the platform API. Cheap to construct; holds a bearer
/// token when acting on behalf of a logged-in user.
pub struct HubClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    access_token: Option<String>,
}

// Payload types matching the platform API

/// What the identity endpoints return on success.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefresh {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        HubClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: None,
        }
    }

    /// Attach a bearer token for authenticated calls.
    pub fn with_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub(crate) fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// POST /auth/register, then mirror the new identity into the users
    /// collection.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> HubResult<AuthPayload> {
        debug!(email, "registering");
        let resp = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&RegisterRequest { name, email, password })
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "registration").await);
        }

        let payload: AuthPayload = resp.json().await.map_err(de)?;

        let user = User {
            uid: payload.uid.clone(),
            name: payload.name.clone(),
            email: payload.email.clone(),
        };
        self.clone_with_token(&payload.access_token).put_user(&user).await?;

        Ok(payload)
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> HubResult<AuthPayload> {
        debug!(email, "logging in");
        let resp = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "login").await);
        }

        resp.json().await.map_err(de)
    }

    /// POST /auth/refresh
    pub async fn refresh(&self, refresh_token: &str) -> HubResult<TokenRefresh> {
        debug!("refreshing access token");
        let resp = self
            .http
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "token refresh").await);
        }

        resp.json().await.map_err(de)
    }

    /// GET /users/:uid
    pub async fn get_user(&self, uid: &str) -> HubResult<User> {
        let resp = self
            .authed(self.http.get(format!("{}/users/{}", self.base_url, uid)))
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, &format!("User {uid}")).await);
        }

        resp.json().await.map_err(de)
    }

    /// PUT /users/:uid
    pub async fn put_user(&self, user: &User) -> HubResult<()> {
        let resp = self
            .authed(self.http.put(format!("{}/users/{}", self.base_url, user.uid)))
            .json(user)
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "user profile write").await);
        }

        Ok(())
    }

    /// POST /uploads. Returns the retrievable URL for the stored blob.
    pub async fn upload_image(&self, bytes: Vec<u8>, content_type: &str) -> HubResult<String> {
        debug!(content_type, size = bytes.len(), "uploading image");
        let resp = self
            .authed(self.http.post(format!("{}/uploads", self.base_url)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "image upload").await);
        }

        let upload: UploadResponse = resp.json().await.map_err(de)?;
        Ok(upload.url)
    }

    fn clone_with_token(&self, access_token: &str) -> HubClient {
        HubClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: Some(access_token.to_string()),
        }
    }
}

/// Content type for an image path, from its extension.
pub fn image_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub(crate) fn net(err: reqwest::Error) -> HubError {
    HubError::Network(err.to_string())
}

pub(crate) fn de(err: reqwest::Error) -> HubError {
    HubError::Serialization(err.to_string())
}

/// Decode the platform's error envelope and map the status onto the error
/// taxonomy. `what` names the resource or action for the message.
pub(crate) async fn error_from(resp: reqwest::Response, what: &str) -> HubError {
    let status = resp.status();
    let message = match resp.json::<ErrorResponse>().await {
        Ok(envelope) => envelope.error,
        Err(_) => format!("{what} failed with status {status}"),
    };
    map_status(status, message, what)
}

fn map_status(status: StatusCode, message: String, what: &str) -> HubError {
    match status {
        StatusCode::UNAUTHORIZED => HubError::Auth(message),
        StatusCode::FORBIDDEN => HubError::Forbidden(message),
        StatusCode::NOT_FOUND => HubError::NotFound(what.to_string()),
        StatusCode::CONFLICT => HubError::Conflict(message),
        _ => HubError::Store(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- map_status ---

    #[test]
    fn statuses_map_onto_the_error_taxonomy() {
        let err = map_status(StatusCode::UNAUTHORIZED, "bad token".into(), "login");
        assert!(matches!(err, HubError::Auth(_)));

        let err = map_status(StatusCode::FORBIDDEN, "not yours".into(), "edit");
        assert!(matches!(err, HubError::Forbidden(_)));

        let err = map_status(StatusCode::NOT_FOUND, "gone".into(), "Event ev1");
        assert_eq!(err.to_string(), "Event ev1 not found");

        let err = map_status(StatusCode::CONFLICT, "lost the race".into(), "update");
        assert!(matches!(err, HubError::Conflict(_)));

        let err = map_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into(), "query");
        assert!(matches!(err, HubError::Store(_)));
    }

    // --- image_content_type ---

    #[test]
    fn content_type_follows_the_extension() {
        assert_eq!(image_content_type(Path::new("a/cover.JPG")), "image/jpeg");
        assert_eq!(image_content_type(Path::new("cover.jpeg")), "image/jpeg");
        assert_eq!(image_content_type(Path::new("cover.png")), "image/png");
        assert_eq!(image_content_type(Path::new("cover.webp")), "image/webp");
        assert_eq!(image_content_type(Path::new("cover")), "application/octet-stream");
        assert_eq!(image_content_type(Path::new("cover.pdf")), "application/octet-stream");
    }
}
