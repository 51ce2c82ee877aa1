//! # Session identity
//!
//! Callers are anonymous: the only credential is an opaque token kept in the
//! cookie-backed [`tower_sessions::Session`] under [`SESSION_TOKEN_KEY`].
//!
//! - [`identify`] reads the token, failing with [`ApiError::Unauthenticated`]
//!   when the caller never obtained one.
//! - [`issue`] returns the caller's token, generating and storing a new one
//!   (which makes the session layer set the cookie) when missing.
//! - [`SessionResolver`] maps a token to its [`User`], creating the user the
//!   first time the token is seen.
//! - [`CurrentUser`] is the axum extractor that runs `identify` + `resolve`
//!   once per request and hands a typed [`User`] to the handler.
//!
//! Two requests racing on the same unseen token both try to insert a user.
//! The store rejects the second insert with [`StoreError::Conflict`] and the
//! loser re-reads the row the winner created.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use store::{NewUser, StoreError, User, UserStore};
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};
use uuid::Uuid;

use crate::error::ApiError;
use crate::settings;
use crate::state::AppState;

/// Key for storing the session token in the session.
pub const SESSION_TOKEN_KEY: &str = "session_id";

/// Opaque token identifying an anonymous caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token. Empty tokens are rejected.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }

    /// A fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile used when a user is created for a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
}

/// Read the caller's session token.
pub async fn identify(session: &Session) -> Result<SessionToken, ApiError> {
    let token: Option<String> = session.get(SESSION_TOKEN_KEY).await?;
    token
        .and_then(SessionToken::new)
        .ok_or(ApiError::Unauthenticated)
}

/// Return the caller's session token, creating one if the session has none.
pub async fn issue(session: &Session) -> Result<SessionToken, ApiError> {
    match identify(session).await {
        Ok(token) => Ok(token),
        Err(ApiError::Unauthenticated) => {
            let token = SessionToken::generate();
            session
                .insert(SESSION_TOKEN_KEY, token.as_str())
                .await?;
            tracing::debug!("Issued new session token");
            Ok(token)
        }
        Err(e) => Err(e),
    }
}

/// A resolved user, and whether this call created it.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub user: User,
    pub created: bool,
}

/// Resolves session tokens to users backed by a [`UserStore`].
#[derive(Clone, Debug)]
pub struct SessionResolver<S: UserStore> {
    store: S,
}

impl<S: UserStore> SessionResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The user owning `token`, created with a placeholder profile if unseen.
    pub async fn resolve(&self, token: &SessionToken) -> Result<User, StoreError> {
        let resolved = self
            .find_or_create(token, NewUser::anonymous(token.as_str()))
            .await?;
        Ok(resolved.user)
    }

    /// Like [`resolve`](Self::resolve), but seeds a new user with `profile`.
    /// An existing user is returned unchanged.
    pub async fn resolve_with(
        &self,
        token: &SessionToken,
        profile: Profile,
    ) -> Result<Resolved, StoreError> {
        let new_user = NewUser {
            first_name: profile.first_name,
            last_name: profile.last_name,
            session_id: token.as_str().to_string(),
        };
        self.find_or_create(token, new_user).await
    }

    async fn find_or_create(
        &self,
        token: &SessionToken,
        new_user: NewUser,
    ) -> Result<Resolved, StoreError> {
        if let Some(user) = self.store.find_user_by_session(token.as_str()).await? {
            return Ok(Resolved {
                user,
                created: false,
            });
        }

        match self.store.create_user(new_user).await {
            Ok(user) => {
                tracing::info!("Created user {} for new session", user.id);
                Ok(Resolved {
                    user,
                    created: true,
                })
            }
            Err(StoreError::Conflict(reason)) => {
                tracing::debug!("Concurrent user creation for session, re-reading");
                let user = self
                    .store
                    .find_user_by_session(token.as_str())
                    .await?
                    .ok_or(StoreError::Conflict(reason))?;
                Ok(Resolved {
                    user,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// The user behind the request's session.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl<S: store::Store> FromRequestParts<AppState<S>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::SessionLayer)?;
        let token = identify(&session).await?;
        let user = state.resolver().resolve(&token).await?;
        Ok(CurrentUser(user))
    }
}

/// Build the cookie session layer from settings.
pub fn session_layer<T: SessionStore + Clone>(
    store: T,
    settings: &settings::Session,
) -> SessionManagerLayer<T> {
    SessionManagerLayer::new(store)
        .with_name(settings.cookie_name.clone())
        .with_secure(settings.secure)
        .with_same_site(SameSite::Lax)
        .with_path("/")
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.expiry_days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use store::MemoryStore;
    use tower_sessions::MemoryStore as SessionMemoryStore;

    fn token(value: &str) -> SessionToken {
        SessionToken::new(value).unwrap()
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(SessionToken::new("").is_none());
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[tokio::test]
    async fn test_resolve_is_stable() {
        let resolver = SessionResolver::new(MemoryStore::new());

        let first = resolver.resolve(&token("t-1")).await.unwrap();
        let second = resolver.resolve(&token("t-1")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.session_id, "t-1");

        let other = resolver.resolve(&token("t-2")).await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_resolve_with_profile() {
        let store = MemoryStore::new();
        let resolver = SessionResolver::new(store.clone());
        let profile = Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let first = resolver.resolve_with(&token("t-1"), profile).await.unwrap();
        assert!(first.created);
        assert_eq!(first.user.first_name, "Ada");

        // Existing users keep their profile
        let again = resolver
            .resolve_with(&token("t-1"), Profile::default())
            .await
            .unwrap();
        assert!(!again.created);
        assert_eq!(again.user.id, first.user.id);
        assert_eq!(again.user.first_name, "Ada");
        assert_eq!(store.user_count().unwrap(), 1);
    }

    /// A store that reports the user as missing on the first lookup, as if
    /// another request inserted it in between.
    #[derive(Clone)]
    struct RacingStore {
        inner: MemoryStore,
        lookups: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl UserStore for RacingStore {
        async fn find_user_by_session(&self, session_id: &str) -> Result<Option<User>, StoreError> {
            let n = self
                .lookups
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == 0 {
                return Ok(None);
            }
            self.inner.find_user_by_session(session_id).await
        }

        async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
            self.inner.create_user(user).await
        }
    }

    #[tokio::test]
    async fn test_conflict_rereads_existing_user() {
        let inner = MemoryStore::new();
        let winner = inner.create_user(NewUser::anonymous("t-1")).await.unwrap();

        let resolver = SessionResolver::new(RacingStore {
            inner: inner.clone(),
            lookups: Arc::default(),
        });

        let user = resolver.resolve(&token("t-1")).await.unwrap();
        assert_eq!(user.id, winner.id);
        assert_eq!(inner.user_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_identify_and_issue() {
        let session = Session::new(None, Arc::new(SessionMemoryStore::default()), None);

        assert!(matches!(
            identify(&session).await,
            Err(ApiError::Unauthenticated)
        ));

        let issued = issue(&session).await.unwrap();
        assert_eq!(identify(&session).await.unwrap(), issued);

        // Issuing again keeps the existing token
        assert_eq!(issue(&session).await.unwrap(), issued);
    }
}
