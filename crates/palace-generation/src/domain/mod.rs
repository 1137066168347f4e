//! Domain layer for the generation context.

pub mod commands;
pub mod prompt;
