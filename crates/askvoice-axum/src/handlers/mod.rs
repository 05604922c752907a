//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin: they translate HTTP into calls on the ports held by
//! [`AxumContext`](crate::bootstrap::AxumContext).

pub mod ask;
pub mod speech;
