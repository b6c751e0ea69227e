//! HTTP transport for the fashion recommendation service.
//!
//! [`FashionApiClient`] turns every backend capability into one typed async
//! call whose only failure type is [`fashion_core::ApiError`]. The
//! [`features`] module binds request controllers and the health monitor to it.

mod client;
pub mod features;

pub use client::{ClientBuildError, ClientConfig, DEFAULT_BASE_URL, FashionApiClient};
