//! REST API client module for the SchoolHub backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! school-management backend: authentication, user administration,
//! student/teacher records and coursework.
//!
//! The backend uses bearer token authentication. The token is read from the
//! shared `SessionStore` on every request, and any 401 response clears that
//! session and sends the application back to the login route.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// Result type for API calls
pub type Result<T> = std::result::Result<T, ApiError>;
