//! Session lifecycle management
//!
//! States move `Anonymous -> Verifying -> Authenticated` when a stored token
//! is checked at startup, and `Anonymous -> Authenticated` directly on login
//! or signup. Logout, a failed verification or an unauthorized response
//! return the session to `Anonymous`. So does a verification that is
//! dropped before it settles, which keeps the stored token for a retry.
//!
//! Sign-in, verification, logout and clears are written to the audit log.

use crate::api::{endpoints, error_message, response, ApiRequest, Transport};
use crate::audit::AuditLog;
use crate::error::{HerculesError, HerculesResult};
use crate::session::state::{fingerprint, AuthOutcome, Credentials, Session, SessionPhase, User};
use crate::session::storage::TokenStore;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

struct Inner {
    session: Session,
    phase: SessionPhase,
    /// Bumped whenever the session is replaced or cleared; results of a
    /// verification that started under an older generation are discarded.
    generation: u64,
}

impl Inner {
    fn outcome(&self) -> AuthOutcome {
        match (self.session.token(), self.session.user()) {
            (Some(token), Some(user)) => AuthOutcome::Success {
                token: token.to_string(),
                user: user.clone(),
            },
            _ => AuthOutcome::Unauthenticated,
        }
    }
}

/// Owns the bearer token and the authenticated-user state
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    audit: Option<AuditLog>,
    inner: Mutex<Inner>,
    /// Serializes token-store writes with the generation bump that goes with them
    store_lock: tokio::sync::Mutex<()>,
}

impl SessionManager {
    /// Create an anonymous session manager
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            transport,
            store,
            audit: None,
            inner: Mutex::new(Inner {
                session: Session::empty(),
                phase: SessionPhase::Anonymous,
                generation: 0,
            }),
            store_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Record sign-in events to an audit log
    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    fn state(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Currently signed-in user, without I/O
    pub fn current_user(&self) -> Option<User> {
        self.state().session.user().cloned()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.state().phase
    }

    /// Log-safe fingerprint of the in-memory token
    pub fn token_fingerprint(&self) -> Option<String> {
        self.state().session.token().map(fingerprint)
    }

    /// Sign in with email and password
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        self.authenticate(endpoints::LOGIN, body, "auth.login", &credentials.email)
            .await
    }

    /// Create an account; `name` is required
    pub async fn signup(&self, credentials: &Credentials) -> AuthOutcome {
        let name = credentials
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let Some(name) = name else {
            self.clear_local().await;
            return AuthOutcome::InvalidCredentials {
                message: "Name is required to create an account".to_string(),
            };
        };

        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
            "name": name,
        });
        self.authenticate(endpoints::SIGNUP, body, "auth.signup", &credentials.email)
            .await
    }

    async fn authenticate(
        &self,
        endpoint: &'static str,
        body: serde_json::Value,
        event: &str,
        email: &str,
    ) -> AuthOutcome {
        let outcome = self.request_grant(endpoint, body).await;

        let grant = match outcome {
            Ok(grant) => grant,
            Err(outcome) => {
                // A failed attempt never leaves a token behind
                self.clear_local().await;
                return outcome;
            }
        };

        {
            let _guard = self.store_lock.lock().await;
            if let Err(e) = self.store.save(&grant.token).await {
                warn!("Could not persist session token: {}", e);
                if let Err(e) = self.store.clear().await {
                    warn!("Failed to clear stored token: {}", e);
                }
                self.reset(SessionPhase::Anonymous, Session::empty());
                return AuthOutcome::NetworkFailure {
                    reason: HerculesError::TokenPersist(e.to_string()).to_string(),
                };
            }
            self.reset(
                SessionPhase::Authenticated,
                Session::authenticated(grant.token.clone(), grant.user.clone()),
            );
        }

        let token_id = fingerprint(&grant.token);
        info!("Signed in as {} (token {})", grant.user.email, token_id);
        self.audit(
            event,
            json!({ "email": email, "user_id": grant.user.id, "token": token_id }),
        )
        .await;

        AuthOutcome::Success {
            token: grant.token,
            user: grant.user,
        }
    }

    async fn request_grant(
        &self,
        endpoint: &'static str,
        body: serde_json::Value,
    ) -> Result<response::AuthGrant, AuthOutcome> {
        let resp = self
            .transport
            .send(ApiRequest::post(endpoint, body))
            .await
            .map_err(|e| {
                warn!("{} failed: {}", endpoint, e);
                AuthOutcome::NetworkFailure {
                    reason: e.to_string(),
                }
            })?;

        if !resp.is_success() {
            let message = error_message(resp.status, &resp.body);
            info!("{} rejected ({}): {}", endpoint, resp.status, message);
            return Err(AuthOutcome::InvalidCredentials { message });
        }

        response::auth_grant(endpoint, &resp).map_err(|e| {
            warn!("{}", e);
            AuthOutcome::NetworkFailure {
                reason: e.to_string(),
            }
        })
    }

    /// Check the stored token with the backend.
    ///
    /// Without a stored token this returns `Unauthenticated` and makes no
    /// request. While already authenticated it returns the current session.
    pub async fn verify(&self) -> AuthOutcome {
        let generation = {
            let inner = self.state();
            if inner.phase == SessionPhase::Authenticated {
                return inner.outcome();
            }
            inner.generation
        };

        let token = match self.store.load().await {
            Ok(Some(token)) => token,
            Ok(None) => return AuthOutcome::Unauthenticated,
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                return AuthOutcome::Unauthenticated;
            }
        };

        {
            let mut inner = self.state();
            if inner.generation != generation {
                return inner.outcome();
            }
            inner.phase = SessionPhase::Verifying;
            inner.session = Session::pending(token.clone());
        }
        let _abandoned = AbandonedVerify {
            manager: self,
            generation,
        };
        debug!("Verifying stored token {}", fingerprint(&token));

        let verified = match self
            .transport
            .send(ApiRequest::get(endpoints::CHECK_AUTH).with_bearer(&token))
            .await
        {
            Ok(resp) => {
                let user = response::verified_user(&resp);
                if user.is_none() {
                    debug!("check-auth rejected token ({})", resp.status);
                }
                user
            }
            Err(e) => {
                warn!("check-auth failed: {}", e);
                None
            }
        };

        match verified {
            Some(user) => {
                {
                    let mut inner = self.state();
                    if inner.generation != generation {
                        return inner.outcome();
                    }
                    inner.phase = SessionPhase::Authenticated;
                    inner.session = Session::authenticated(token.clone(), user.clone());
                }

                let token_id = fingerprint(&token);
                info!("Session verified for {} (token {})", user.email, token_id);
                self.audit(
                    "auth.session_verified",
                    json!({ "user_id": user.id, "token": token_id }),
                )
                .await;
                AuthOutcome::Success { token, user }
            }
            None => {
                self.expire(generation).await;
                AuthOutcome::Unauthenticated
            }
        }
    }

    /// Sign out. The backend call is best-effort; local state is always cleared.
    pub async fn logout(&self) {
        let token = self.state().session.token().map(str::to_string);
        let token = match token {
            Some(token) => Some(token),
            None => self.store.load().await.ok().flatten(),
        };

        if let Some(ref token) = token {
            match self
                .transport
                .send(ApiRequest::post_empty(endpoints::LOGOUT).with_bearer(token))
                .await
            {
                Ok(resp) if resp.is_success() => debug!("Backend session closed"),
                Ok(resp) => debug!("Logout returned {}, ignoring", resp.status),
                Err(e) => debug!("Logout request failed, ignoring: {}", e),
            }
        }

        self.clear_local().await;

        let token_id = token.as_deref().map(fingerprint);
        info!("Signed out");
        self.audit("auth.logout", json!({ "token": token_id })).await;
    }

    /// Request a password reset email
    pub async fn forgot_password(&self, email: &str) -> HerculesResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(HerculesError::User(
                "Please enter your email address first".to_string(),
            ));
        }

        let resp = self
            .transport
            .send(ApiRequest::post(
                endpoints::FORGOT_PASSWORD,
                json!({ "email": email }),
            ))
            .await?;

        if !resp.is_success() {
            return Err(HerculesError::Api {
                endpoint: endpoints::FORGOT_PASSWORD.to_string(),
                status: resp.status,
                message: error_message(resp.status, &resp.body),
            });
        }

        info!("Password reset requested for {}", email);
        Ok(())
    }

    /// GET an authenticated endpoint and decode its JSON body.
    ///
    /// A 401/403 clears the session and yields `NotAuthenticated`.
    pub async fn authorized_get<T: DeserializeOwned>(&self, path: &'static str) -> HerculesResult<T> {
        let (token, generation) = {
            let inner = self.state();
            (inner.session.token().map(str::to_string), inner.generation)
        };
        let token = token.ok_or(HerculesError::NotAuthenticated)?;

        let resp = self
            .transport
            .send(ApiRequest::get(path).with_bearer(token))
            .await?;

        if resp.is_unauthorized() {
            info!("{} rejected the session ({})", path, resp.status);
            self.expire(generation).await;
            return Err(HerculesError::NotAuthenticated);
        }

        if !resp.is_success() {
            return Err(HerculesError::Api {
                endpoint: path.to_string(),
                status: resp.status,
                message: error_message(resp.status, &resp.body),
            });
        }

        response::parse_json(path, &resp)
    }

    /// Whether the backend answered at all
    pub async fn ping(&self) -> bool {
        match self.transport.send(ApiRequest::get(endpoints::ROOT)).await {
            Ok(resp) => {
                debug!("Backend answered {}", resp.status);
                true
            }
            Err(e) => {
                debug!("Backend unreachable: {}", e);
                false
            }
        }
    }

    /// Clear the session unless it was replaced since `generation`
    async fn expire(&self, generation: u64) {
        let _guard = self.store_lock.lock().await;
        let current = self.state().generation;
        if current != generation {
            return;
        }

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored token: {}", e);
        }
        self.reset(SessionPhase::Anonymous, Session::empty());

        self.audit("auth.session_cleared", json!({})).await;
    }

    async fn clear_local(&self) {
        let _guard = self.store_lock.lock().await;
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored token: {}", e);
        }
        self.reset(SessionPhase::Anonymous, Session::empty());
    }

    fn reset(&self, phase: SessionPhase, session: Session) {
        let mut inner = self.state();
        inner.phase = phase;
        inner.session = session;
        inner.generation += 1;
    }

    async fn audit(&self, event: &str, data: serde_json::Value) {
        if let Some(ref audit) = self.audit {
            audit.log(event, &data).await;
        }
    }
}

/// Returns a session left in `Verifying` to `Anonymous` when the
/// verification future is dropped before it settles. The stored token is
/// kept so the next check can retry it.
struct AbandonedVerify<'a> {
    manager: &'a SessionManager,
    generation: u64,
}

impl Drop for AbandonedVerify<'_> {
    fn drop(&mut self) {
        let mut inner = self.manager.state();
        if inner.generation == self.generation && inner.phase == SessionPhase::Verifying {
            debug!("Verification abandoned before it settled");
            inner.phase = SessionPhase::Anonymous;
            inner.session = Session::empty();
        }
    }
}

/// Await an auth call, treating expiry of `deadline` as a network failure.
///
/// The manager never imposes a timeout itself.
pub async fn within_deadline<F>(deadline: Duration, call: F) -> AuthOutcome
where
    F: Future<Output = AuthOutcome>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(outcome) => outcome,
        Err(_) => AuthOutcome::NetworkFailure {
            reason: HerculesError::Timeout(deadline).to_string(),
        },
    }
}
