//! # Dual-Stream Synchronization Module
//!
//! The core of the crate: aligning two independently-timed clips
//! around a shared reference event and keeping them in lockstep.
//!
//! ## Core Pieces
//!
//! - **[`Timeline`]**: one stream's playable state, no sync knowledge
//! - **[`OffsetCalculator`]**: offset derivation and cross-timeline
//!   position translation
//! - **[`SyncController`]**: the state machine applying every seek,
//!   play/pause and rate change to both streams atomically
//!
//! ## Usage
//!
//! ```rust
//! use stroke_sync::sync::SyncController;
//!
//! # fn main() -> stroke_sync::Result<()> {
//! let mut controller = SyncController::new(2.33);
//! controller.load_primary("my-swing.mp4");
//! controller.on_primary_metadata(14.8)?;
//!
//! // Scrub to the ball contact in the uploaded clip and mark it
//! controller.on_primary_time_update(1.02);
//! controller.mark_contact()?;
//!
//! // Both streams now move together
//! controller.seek_to(0.5)?;
//! controller.toggle_playback()?;
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod offset;
pub mod timeline;

pub use controller::{SyncController, SyncState};
pub use offset::{OffsetCalculator, ReferenceMark, Translation};
pub use timeline::Timeline;
