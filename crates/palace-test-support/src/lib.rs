//! Shared test doubles and utilities for the Memory Palace Builder.

mod clock;
mod gateway;
mod repository;

pub use clock::{FixedClock, SteppingClock};
pub use gateway::{StubIdentityGateway, StubSceneGenerator, StubTranslator};
pub use repository::{
    FailingPalaceRepository, FailingProfileRepository, InMemoryPalaceRepository,
    InMemoryProfileRepository,
};
