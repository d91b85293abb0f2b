//! REST client used by every page.
//!
//! The client is an explicit handle provided through context by the app root
//! (`use_api()`), carrying the configured base URL. Responses are decoded in
//! one place so status and error body handling are uniform.

mod client;
mod error;

pub use client::{decode_response, filtered_url, use_api, ApiClient};
pub use error::ApiError;
