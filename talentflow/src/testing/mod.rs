//! Fixtures and test doubles shared across the crate's tests.

mod fixtures;
mod mocks;

pub use fixtures::{application_in, flat_funnel, hierarchical_stages, stage};
pub use mocks::{FailingBackend, RecordingPersistence};
