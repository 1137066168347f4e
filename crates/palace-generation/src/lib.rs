//! Memory Palace Builder — palace generation and history context.
//!
//! Turns a topic and a location into a generated scene, translates it into
//! the session language when needed, and appends the result to the owner's
//! palace history.

pub mod application;
pub mod domain;
