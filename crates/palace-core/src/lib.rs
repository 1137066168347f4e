//! Palace Core — shared domain types and ports.
//!
//! Every context depends on this crate for its error type, clock, records
//! and the traits that the stores and HTTP adapters implement. It contains
//! no infrastructure code.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod error;
pub mod gateway;
pub mod language;
pub mod palace;
pub mod profile;
pub mod repository;
pub mod session;
