//! # pixl-edit
//!
//! Edit pipeline for the pixl engine: an [`EditController`] that owns the
//! original and displayed images, a bounded undo/redo [`History`], and a
//! background [`Worker`] that runs [`pixl_ops`] requests off the caller's
//! thread.
//!
//! ## Architecture
//!
//! ```text
//! EditController ──WorkerMsg──> Worker thread (WorkerHandler)
//!       ^                              │  lazy Rayon pool init
//!       └────────WorkerEvent───────────┘  OperationRequest::process
//! ```
//!
//! Each request carries a [`Generation`]. Results that predate the current
//! baseline (load, rotate, resize) are always dropped; with
//! [`ResultOrdering::LatestWins`] results outranked by a newer request are
//! dropped too.
//!
//! ## Quick Start
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//! use pixl_edit::{Adjustments, EditController, EditorConfig};
//! use pixl_ops::Operation;
//!
//! let mut editor = EditController::new(EditorConfig::default())?;
//! editor.load(PixelBuffer::filled(4, 4, [200, 120, 40, 255]));
//!
//! editor.request_transform(Operation::Vintage, Adjustments::default())?;
//! editor.wait_idle()?;
//! editor.undo();
//! # Ok::<(), pixl_edit::EditError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod controller;
mod error;
mod handler;
mod history;
mod messages;
mod state;
mod worker;

pub use config::{EditorConfig, ResultOrdering};
pub use controller::{Adjustments, EditController};
pub use error::{EditError, EditResult};
pub use history::{History, MAX_HISTORY};
pub use messages::{Generation, JobError, WorkerEvent, WorkerMsg};
pub use state::EditState;
pub use worker::Worker;
