//! Web layer for the station finder.
//!
//! Exposes the normalized turn endpoint the voice platform adapter
//! posts to, plus a health check.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
