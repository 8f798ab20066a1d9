//! Backend API access.
//!
//! Handlers build an [`ApiRequest`] and hand it to a [`Backend`]. The
//! production backend is [`ApiClient`]; tests substitute [`MockBackend`].

pub mod client;
pub mod mock;
pub mod request;

pub use client::{error_message, ApiClient};
pub use mock::MockBackend;
pub use request::{ApiRequest, ApiResponse, Method};

use crate::error::Result;

/// Something that can answer API requests.
///
/// Implementations return `Err(FoundryError::Http { .. })` for non-2xx
/// responses, so a returned [`ApiResponse`] is always a success.
pub trait Backend {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Base URL requests go to, if this backend has one.
    fn base_url(&self) -> Option<String> {
        None
    }
}
