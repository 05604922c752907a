//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] holding the answering service, the speech
/// port and the `/ask` admission controller.
pub type AppState = Arc<AxumContext>;
