// HTTP API routes
//
// This module contains all HTTP route handlers for the public API.
// Each submodule handles one endpoint group with its own state.

pub mod common;
pub mod events;
pub mod health;
pub mod index;
pub mod webhook;

// Re-export common types
pub use common::{panic_response, ApiError, StatusResponse};
