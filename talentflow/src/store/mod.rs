//! Stage persistence: the backend seam, an in-memory reference backend,
//! and the company-scoped [`StageStore`].

mod backend;
mod memory;
#[allow(clippy::module_inception)]
mod store;

pub use backend::StageBackend;
pub use memory::MemoryBackend;
pub use store::StageStore;
