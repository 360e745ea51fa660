//! Hercules - session client for the Hercules security scanning service
//!
//! Owns the sign-in lifecycle against the Hercules backend: login, signup,
//! token verification, logout and the guard that keeps protected views
//! behind an authenticated session.

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod ui;

pub use error::{HerculesError, HerculesResult};
