//! Session management module

pub mod guard;
pub mod manager;
pub mod state;
pub mod storage;

pub use guard::{Redirect, SessionGuard, ViewScope};
pub use manager::{within_deadline, SessionManager};
pub use state::{fingerprint, AuthOutcome, Credentials, Session, SessionPhase, User};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
