//! Shared test mocks and utilities for the Daggerkeep campaign companion.

mod clock;
mod repository;
mod rng;
mod store;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{FailOnInsertRecordRepository, FailingRecordRepository, InMemoryRecordRepository};
pub use rng::{MockRng, SequenceRng};
pub use store::{
    DeleteFailsBlobStore, FailingKeyValueStore, InMemoryBlobStore, InMemoryKeyValueStore,
    RemoveFailsKeyValueStore,
};
