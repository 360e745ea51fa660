//! Protected-view gating
//!
//! Every protected view asks the same question before rendering: is there a
//! signed-in user, or should the visitor be sent to the sign-in page?

use crate::session::manager::SessionManager;
use crate::session::state::{SessionPhase, User};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Route protected views send anonymous visitors to
pub const SIGN_IN_ROUTE: &str = "/auth";

/// Instruction to leave a protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
}

impl Redirect {
    pub fn to_sign_in() -> Self {
        Self { to: SIGN_IN_ROUTE }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect to {}", self.to)
    }
}

/// Capability consulted by every protected view
pub trait SessionGuard {
    /// The signed-in user, or where to send an anonymous visitor
    fn require_session(&self) -> Result<User, Redirect>;
}

impl SessionGuard for SessionManager {
    fn require_session(&self) -> Result<User, Redirect> {
        if self.phase() != SessionPhase::Authenticated {
            return Err(Redirect::to_sign_in());
        }
        self.current_user().ok_or_else(Redirect::to_sign_in)
    }
}

impl SessionManager {
    /// Page-load entry point for protected views.
    ///
    /// Verifies a stored token first unless the session is already
    /// authenticated, so a visitor is never redirected while a check is
    /// still pending.
    pub async fn ensure_session(&self) -> Result<User, Redirect> {
        if self.phase() != SessionPhase::Authenticated {
            self.verify().await;
        }
        let decision = self.require_session();
        if let Err(ref redirect) = decision {
            debug!("Protected view denied: {}", redirect);
        }
        decision
    }
}

/// Liveness of the view that started an async call.
///
/// Closing the scope stops waiting at once. The request itself is not
/// aborted; its result is dropped instead of reaching a view that is gone.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            active: Arc::new(watch::Sender::new(true)),
        }
    }

    /// Mark the view as gone
    pub fn close(&self) {
        self.active.send_replace(false);
    }

    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Await `call` until the scope closes; `None` if it closed first
    pub async fn run<F: Future>(&self, call: F) -> Option<F::Output> {
        let mut closed = self.active.subscribe();

        tokio::select! {
            biased;
            _ = closed.wait_for(|active| !*active) => {}
            output = call => {
                if self.is_active() {
                    return Some(output);
                }
            }
        }

        debug!("Discarding result for closed view");
        None
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
