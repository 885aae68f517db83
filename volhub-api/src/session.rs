//! Persisted login session for the Volhub platform.
//!
//! One user is logged in at a time. The session lives at
//! `~/.config/volhub/session.toml`, owner-readable only, and refreshes its
//! access token transparently when it has expired.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use volhub_core::{HubError, HubResult};

use crate::client::{AuthPayload, HubClient};

/// The logged-in user and their tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub name: String,
    pub email: String,
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

fn session_path() -> HubResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| HubError::Config("could not determine the config directory".to_string()))?;
    Ok(config_dir.join("volhub").join("session.toml"))
}

impl Session {
    pub fn from_auth(payload: AuthPayload) -> Session {
        Session {
            uid: payload.uid,
            name: payload.name,
            email: payload.email,
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at: Utc::now() + Duration::seconds(payload.expires_in),
        }
    }

    pub fn exists() -> bool {
        session_path().map(|p| p.exists()).unwrap_or(false)
    }

    fn load() -> HubResult<Session> {
        let path = session_path()?;

        if !path.exists() {
            return Err(HubError::Auth("not logged in".to_string()));
        }

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents).map_err(|e| {
            HubError::Serialization(format!("could not parse {}: {e}", path.display()))
        })
    }

    /// Load the stored session, refreshing the access token if it expired.
    pub async fn load_valid(base_url: &str) -> HubResult<Session> {
        let mut session = Self::load()?;

        if session.is_expired() {
            session.refresh(base_url).await?;
        }

        Ok(session)
    }

    pub fn save(&self) -> HubResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HubError::Serialization(format!("could not serialize session: {e}")))?;

        let path = session_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;

        // Owner-only, the file holds live tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the session file. Returns whether one existed.
    pub fn delete() -> HubResult<bool> {
        let path = session_path()?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    /// An API client authenticated as this session's user.
    pub fn client(&self, base_url: &str) -> HubClient {
        HubClient::new(base_url).with_token(&self.access_token)
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    async fn refresh(&mut self, base_url: &str) -> HubResult<()> {
        debug!(uid = %self.uid, "session expired, refreshing");
        let refreshed = HubClient::new(base_url).refresh(&self.refresh_token).await?;

        self.access_token = refreshed.access_token;
        self.expires_at = Utc::now() + Duration::seconds(refreshed.expires_in);
        self.save()
    }
}
