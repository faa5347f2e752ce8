//! HTTP API
//!
//! Single endpoint, `POST /api/search/auto`, wrapped in JSON envelopes.

pub mod response;
pub mod server;

pub use server::{router, run, serve, AppState};
