//! Palace Gateways — `reqwest` adapters for the external services.
//!
//! Each adapter implements one port from `palace_core::gateway` and converts
//! its own [`GatewayError`] into the port's failure shape. Nothing here
//! retries.

pub mod error;
pub mod gemini;
pub mod identity;
pub mod translate;

pub use error::GatewayError;
pub use gemini::{GeminiConfig, GeminiSceneGenerator};
pub use identity::{IdentityConfig, IdentityToolkitGateway};
pub use translate::{GoogleTranslator, TranslateConfig};
