//! # Talentflow
//!
//! The stage engine behind a recruitment pipeline: a company-defined,
//! optionally tree-shaped set of named stages that applications move
//! through.
//!
//! - **Stage store**: company-scoped CRUD over stage records, republishing
//!   an immutable snapshot after every mutation
//! - **Transition rules**: pure validation of which stage moves are legal,
//!   flat forward-only or hierarchical one-step-down
//! - **Reorder engine**: two-phase re-sequencing that never transiently
//!   violates the per-company order-index uniqueness constraint
//! - **Tree layout**: measure/place coordinates, connectors, and viewport
//!   fitting for the visual stage editor, with cycle-safe re-parenting
//! - **Pipeline board**: applications grouped by stage, drag-and-drop
//!   moves applied optimistically and rolled back on persistence failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use talentflow::prelude::*;
//! use std::sync::Arc;
//!
//! let store = StageStore::new(Arc::new(MemoryBackend::new()), "co-1");
//! store.create_stage(
//!     NewStage::new("co-1", "Applied")
//!         .with_stage_type(StageType::Application)
//!         .with_order_index(store.next_order_index())
//!         .as_default(),
//! ).await?;
//!
//! let mut board = PipelineBoard::new(store.stages(), applications);
//! board.begin_drag("app-1");
//! board.end_drag(Some(DropSpot::Zone("Screen".into())), &store, &persistence).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss
)]

pub mod board;
pub mod errors;
pub mod events;
pub mod layout;
pub mod model;
pub mod observability;
pub mod reorder;
pub mod store;
pub mod testing;
pub mod transition;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::board::{
        DropSpot, MoveCommand, MoveOutcome, MovePersistence, MoveStatus, PipelineBoard,
        StageGroup,
    };
    pub use crate::errors::StageError;
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink,
    };
    pub use crate::layout::{
        fit_to_viewport, layout, plan_reparent, DropTarget, LayoutConfig, ReparentPlan,
        StageTree, TreeLayout, Viewport,
    };
    pub use crate::model::{
        Application, CurrentStage, NewStage, Stage, StageColor, StageId, StagePatch,
        StageType,
    };
    pub use crate::store::{MemoryBackend, StageBackend, StageStore};
    pub use crate::transition::is_valid_transition;
    pub use crate::utils::{generate_id, iso_timestamp, Timestamp};
}
