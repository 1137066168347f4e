//! Application layer for the generation context.

pub mod command_handlers;
pub mod query_handlers;
