//! Memory Palace Builder — authentication and profile context.
//!
//! Responsible for sign-up, sign-in and the profile read/edit cycle. All
//! provider failures are collapsed into one generic error per operation.

pub mod application;
pub mod domain;
