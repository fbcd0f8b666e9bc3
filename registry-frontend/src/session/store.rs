//! Session snapshot lifecycle.
//!
//! The snapshot lives in session storage as flattened keys under
//! [`SESSION_KEY_PREFIX`]. It is available only while every key is present
//! and `expire_at` lies in the future; expiry is a read-time check and never
//! writes.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use registry_core::api::ApiResult;

use super::clock::Clock;
use super::storage::{SessionStorage, StorageError};
use crate::models::{Session, SessionDetails};

pub const SESSION_KEY_PREFIX: &str = "_auth.session";
pub const GROUPS_DELIMITER: &str = "#";

const USER_NAME: &str = "user.name";
const USER_EMAIL: &str = "user.email";
const USER_GROUPS: &str = "user.groups";
const EXPIRE_AT: &str = "expire_at";

const SESSION_FIELDS: [&str; 4] = [USER_NAME, USER_EMAIL, USER_GROUPS, EXPIRE_AT];

/// The registry endpoints that own the authenticated session.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn get_session(&self) -> ApiResult<SessionDetails>;
    async fn clear_session(&self) -> ApiResult<bool>;
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    api: Arc<dyn SessionApi>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        api: Arc<dyn SessionApi>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            storage,
            api,
            clock,
            ttl,
        }
    }

    /// Fetch the registry session and, when it exists, persist a fresh snapshot.
    ///
    /// An error envelope leaves storage untouched.
    pub async fn refresh(&self) -> Result<(), StorageError> {
        let details = match self.api.get_session().await {
            ApiResult::Ok { data } => data,
            ApiResult::Error { message, .. } => {
                tracing::debug!(reason = %message, "No registry session to snapshot");
                return Ok(());
            }
        };

        let expire_at = self.clock.now() + self.ttl;

        self.write(USER_NAME, &details.name).await?;
        self.write(USER_EMAIL, &details.email).await?;
        self.write(USER_GROUPS, &details.groups.join(GROUPS_DELIMITER))
            .await?;
        self.write(EXPIRE_AT, &expire_at.to_rfc3339()).await?;

        tracing::debug!(user = %details.name, expire_at = %expire_at, "Session snapshot refreshed");
        Ok(())
    }

    pub async fn is_available(&self) -> Result<bool, StorageError> {
        Ok(self.load().await?.is_some())
    }

    /// The snapshot when available; never partially populated.
    pub async fn get(&self) -> Result<Option<Session>, StorageError> {
        self.load().await
    }

    /// Drop the registry session and, once it is gone, every snapshot key.
    pub async fn clear(&self) -> Result<(), StorageError> {
        match self.api.clear_session().await {
            ApiResult::Ok { .. } => {
                for field in SESSION_FIELDS {
                    self.storage.remove_item(&storage_key(field)).await?;
                }
                tracing::info!("Session cleared");
            }
            ApiResult::Error { message, errors } => {
                tracing::warn!(reason = %message, details = ?errors, "Registry refused to clear the session");
            }
        }

        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>, StorageError> {
        let name = self.read(USER_NAME).await?;
        let email = self.read(USER_EMAIL).await?;
        let groups = self.read(USER_GROUPS).await?;
        let expire_at = self.read(EXPIRE_AT).await?;

        let (Some(user_name), Some(user_email), Some(groups), Some(expire_at)) =
            (name, email, groups, expire_at)
        else {
            return Ok(None);
        };

        if user_name.is_empty() || user_email.is_empty() {
            return Ok(None);
        }

        let Ok(expire_at) = DateTime::parse_from_rfc3339(&expire_at) else {
            return Ok(None);
        };
        let expire_at = expire_at.with_timezone(&Utc);

        if expire_at <= self.clock.now() {
            return Ok(None);
        }

        Ok(Some(Session {
            user_name,
            user_email,
            user_groups: split_groups(&groups),
            expire_at,
        }))
    }

    async fn read(&self, field: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(&storage_key(field)).await
    }

    async fn write(&self, field: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(&storage_key(field), value).await
    }
}

fn storage_key(field: &str) -> String {
    format!("{}.{}", SESSION_KEY_PREFIX, field)
}

fn split_groups(groups: &str) -> Vec<String> {
    groups
        .split(GROUPS_DELIMITER)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
