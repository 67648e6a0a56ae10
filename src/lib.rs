//! # Stroke-Sync
//!
//! Align two tennis swing clips around a shared ball-contact instant
//! and play them back in lockstep.
//!
//! This library provides the dual-stream time-synchronization engine
//! behind a swing-comparison tool: a user uploads their own clip,
//! marks the instant of ball contact, and from then on a single seek
//! bar drives both their clip and a canonical reference clip with the
//! marked instants aligned.
//!
//! ## Quick Start
//!
//! ```rust
//! use stroke_sync::{Config, SyncController};
//!
//! # fn main() -> stroke_sync::Result<()> {
//! let config = Config::default();
//! let mut controller = SyncController::new(config.companion.contact_instant);
//!
//! controller.load_primary("my-swing.mp4");
//! controller.on_primary_metadata(14.8)?;
//!
//! // Scrub to the contact in the uploaded clip and mark it
//! controller.on_primary_time_update(1.02);
//! controller.mark_contact()?;
//!
//! // One seek position now drives both streams
//! controller.seek_to(0.5)?;
//! controller.toggle_playback()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`sync`] - Timelines, offset calculation and the sync controller
//! - [`adapter`] - The boundary to the host media runtime
//! - [`processing`] - Submission of finalized alignments for offline
//!   compositing
//! - [`config`] - Configuration management
//!
//! ## Driving real players
//!
//! The core never touches a media element itself. Implement
//! [`adapter::MediaPort`] for your host runtime's player and wire
//! both players up through an [`adapter::PlayerBridge`], which feeds
//! the runtime's metadata-loaded and time-update notifications into
//! the controller and mirrors its decisions back out.

pub mod adapter;
pub mod config;
pub mod error;
pub mod processing;
pub mod sync;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, SyncError},
    processing::{AlignmentJob, ProcessingClient},
    sync::{SyncController, SyncState},
};
