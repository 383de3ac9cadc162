//! Logged-in user state, persisted under the `auth-user` key.

use crate::core::auth::{AuthError, LoginCredentials, RegisterCredentials, User};
use crate::core::storage::{AUTH_USER_KEY, KeyValueStorage};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AuthSession {
    user: Option<User>,
    storage: Arc<dyn KeyValueStorage>,
    delay: Duration,
}

impl AuthSession {
    /// `delay` stands in for the round trip to an auth backend.
    pub fn new(storage: Arc<dyn KeyValueStorage>, delay: Duration) -> Self {
        Self {
            user: None,
            storage,
            delay,
        }
    }

    /// Creates a session and restores any saved user.
    pub async fn restore(storage: Arc<dyn KeyValueStorage>, delay: Duration) -> Self {
        let mut session = Self::new(storage, delay);
        session.init().await;
        session
    }

    /// Restores the saved user. A malformed record is dropped from storage.
    pub async fn init(&mut self) {
        let Some(saved) = self.storage.get(AUTH_USER_KEY).await else {
            debug!("No saved user");
            return;
        };

        match serde_json::from_str::<User>(&saved) {
            Ok(user) => {
                debug!(user_id = user.id, "Restored user");
                self.user = Some(user);
            }
            Err(e) => {
                warn!(error = %e, "Failed to restore saved user");
                if let Err(e) = self.storage.remove(AUTH_USER_KEY).await {
                    warn!(error = %e, "Failed to remove saved user");
                }
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Fails with [`AuthError::NotAuthenticated`] when nobody is logged in.
    pub fn require_user(&self) -> Result<&User, AuthError> {
        self.user.as_ref().ok_or(AuthError::NotAuthenticated)
    }

    pub async fn login(&mut self, credentials: LoginCredentials) -> Result<User> {
        tokio::time::sleep(self.delay).await;

        let user = credentials.authenticate()?;
        self.save(user).await
    }

    pub async fn register(&mut self, credentials: RegisterCredentials) -> Result<User> {
        credentials.validate()?;
        tokio::time::sleep(self.delay).await;

        let id = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.save(credentials.into_user(id)).await
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.storage.remove(AUTH_USER_KEY).await?;
        info!("Logged out");
        Ok(())
    }

    async fn save(&mut self, user: User) -> Result<User> {
        let payload = serde_json::to_string(&user).context("Failed to serialize user")?;
        self.storage.set(AUTH_USER_KEY, payload).await?;
        info!(user_id = user.id, "Logged in as {}", user.email);
        self.user = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::store::memory::MemoryStorage;

    fn storage() -> Arc<dyn KeyValueStorage> {
        Arc::new(MemoryStorage::new())
    }

    fn demo() -> LoginCredentials {
        LoginCredentials {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let storage = storage();
        let mut session = AuthSession::new(Arc::clone(&storage), Duration::ZERO);
        assert!(!session.is_authenticated());

        let user = session.login(demo()).await.unwrap();
        assert_eq!(user.id, 1);
        assert!(session.is_authenticated());

        let restored = AuthSession::restore(storage, Duration::ZERO).await;
        assert_eq!(restored.user(), Some(&user));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let storage = storage();
        let mut session = AuthSession::new(Arc::clone(&storage), Duration::ZERO);

        let err = session
            .login(LoginCredentials {
                email: DEMO_EMAIL.to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AuthError>(),
            Some(&AuthError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
        assert!(storage.get(AUTH_USER_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_register_and_logout() {
        let storage = storage();
        let mut session = AuthSession::new(Arc::clone(&storage), Duration::ZERO);

        let user = session
            .register(RegisterCredentials {
                name: "Hanako".to_string(),
                email: "hanako@example.com".to_string(),
                password: "pw".to_string(),
                confirm_password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Hanako");
        assert!(user.id > 1);
        assert!(storage.get(AUTH_USER_KEY).await.is_some());

        session.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert!(storage.get(AUTH_USER_KEY).await.is_none());
        assert_eq!(session.require_user(), Err(AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let mut session = AuthSession::new(storage(), Duration::ZERO);
        let err = session
            .register(RegisterCredentials {
                name: "Hanako".to_string(),
                email: "hanako@example.com".to_string(),
                password: "pw".to_string(),
                confirm_password: "pw2".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[tokio::test]
    async fn test_malformed_saved_user_is_removed() {
        let storage = storage();
        storage
            .set(AUTH_USER_KEY, "not a user".to_string())
            .await
            .unwrap();

        let session = AuthSession::restore(Arc::clone(&storage), Duration::ZERO).await;
        assert!(!session.is_authenticated());
        assert!(storage.get(AUTH_USER_KEY).await.is_none());
    }
}
