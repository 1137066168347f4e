//! Memory Palace Builder — HTTP API.
//!
//! Exposes the accounts and generation contexts over JSON. The binary in
//! `main.rs` wires PostgreSQL stores and the HTTP gateways into
//! [`state::AppState`]; tests wire in-memory fakes instead.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod telemetry;
