//! Sabor API Mock - in-memory stand-in for the remote menu API
//!
//! Serves `GET/PUT /api/menu`, `POST /api/upload` and `GET /health` from a
//! `MockState` whose failures can be injected per endpoint. Used by the
//! client and core test suites (through the in-process client) and as a
//! local development server.

pub mod api;
pub mod state;

pub use api::router;
pub use state::{MockState, RequestCounts, StoredImage};
