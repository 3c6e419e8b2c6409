//! Core library for the SchoolHub client.
//!
//! - `api`: the authenticated REST client and its error type
//! - `auth`: the persisted session store and keychain credentials
//! - `config`: backend endpoint resolution and saved preferences
//! - `models`: backend records and client-side form validation
//! - `navigation`: routes, the navigator hook and the role guard

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod navigation;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionSnapshot, SessionStore};
pub use config::Config;
pub use navigation::{Navigator, Route};
