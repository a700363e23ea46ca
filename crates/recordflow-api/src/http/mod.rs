//! HTTP layer: webhook intake and health endpoint.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
