//! Shared application state.

use std::sync::Arc;

use palace_core::catalog::Catalog;
use palace_core::clock::Clock;
use palace_core::gateway::{IdentityGateway, SceneGenerator, Translator};
use palace_core::repository::{PalaceRepository, ProfileRepository};

use crate::session::SessionRegistry;

/// The external services the handlers call out to.
#[derive(Clone)]
pub struct Gateways {
    pub identity: Arc<dyn IdentityGateway>,
    pub generator: Arc<dyn SceneGenerator>,
    pub translator: Arc<dyn Translator>,
}

/// The profile and palace stores.
#[derive(Clone)]
pub struct Stores {
    pub profiles: Arc<dyn ProfileRepository>,
    pub palaces: Arc<dyn PalaceRepository>,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for session activity and record timestamps.
    pub clock: Arc<dyn Clock>,
    pub identity: Arc<dyn IdentityGateway>,
    pub generator: Arc<dyn SceneGenerator>,
    pub translator: Arc<dyn Translator>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub palaces: Arc<dyn PalaceRepository>,
    /// Enabled languages and avatars.
    pub catalog: Arc<Catalog>,
    /// Live sessions by bearer token.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateways: Gateways,
        stores: Stores,
        catalog: Catalog,
        sessions: SessionRegistry,
    ) -> Self {
        Self {
            clock,
            identity: gateways.identity,
            generator: gateways.generator,
            translator: gateways.translator,
            profiles: stores.profiles,
            palaces: stores.palaces,
            catalog: Arc::new(catalog),
            sessions: Arc::new(sessions),
        }
    }
}
