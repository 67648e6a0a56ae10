//! # Media Adapter Module
//!
//! The seam between the synchronization core and whatever native
//! media-playback primitive the host environment offers.
//!
//! The core never talks to a player directly: it exposes plain
//! synchronous methods, and a [`PlayerBridge`] subscribes to the host
//! runtime's events (metadata-loaded, time-update), feeds them into
//! the [`SyncController`](crate::sync::SyncController) and mirrors the
//! controller's decisions back out to two [`MediaPort`]
//! implementations.
//!
//! ## Implementing a port
//!
//! ```rust
//! use stroke_sync::adapter::MediaPort;
//!
//! struct MyPlayer {
//!     position: f64,
//!     duration: Option<f64>,
//!     playing: bool,
//!     rate: f64,
//! }
//!
//! impl MediaPort for MyPlayer {
//!     fn position(&self) -> f64 { self.position }
//!     fn set_position(&mut self, seconds: f64) { self.position = seconds; }
//!     fn duration(&self) -> Option<f64> { self.duration }
//!     fn play(&mut self) { self.playing = true; }
//!     fn pause(&mut self) { self.playing = false; }
//!     fn set_rate(&mut self, rate: f64) { self.rate = rate; }
//! }
//! ```

use tracing::debug;

use crate::{
    error::Result,
    sync::{SyncController, Timeline},
};

/// Positions closer than this are considered in sync and not pushed
/// back to the port, so the bridge never fights the player over
/// sub-tick differences.
pub const SYNC_TOLERANCE_SECS: f64 = 0.05;

/// Capability set the core requires from a host media player
///
/// Satisfied by whatever native playback primitive the host offers; a
/// port only ever controls its own stream and reports its own state.
pub trait MediaPort {
    /// Current playhead position in seconds
    fn position(&self) -> f64;

    /// Move the playhead
    fn set_position(&mut self, seconds: f64);

    /// Media duration, `None` before metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Start playback (idempotent)
    fn play(&mut self);

    /// Stop playback (idempotent)
    fn pause(&mut self);

    /// Set the playback rate
    fn set_rate(&mut self, rate: f64);
}

/// Which stream slot a notification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSlot {
    /// The user-uploaded clip being aligned
    Primary,

    /// The canonical reference clip
    Companion,
}

/// Notification from the host media runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Media metadata became available
    MetadataLoaded { duration: f64 },

    /// The playhead moved during playback
    TimeUpdate { position: f64 },
}

/// Connects a [`SyncController`] to two host media players
///
/// Every user command and every host notification funnels through the
/// bridge: the controller decides, then the bridge pushes the
/// resulting timeline state out to both ports in the same call.
pub struct PlayerBridge<P: MediaPort, C: MediaPort> {
    controller: SyncController,
    primary_port: P,
    companion_port: C,
}

impl<P: MediaPort, C: MediaPort> PlayerBridge<P, C> {
    /// Wrap a controller and the two host players
    pub fn new(controller: SyncController, primary_port: P, companion_port: C) -> Self {
        Self {
            controller,
            primary_port,
            companion_port,
        }
    }

    /// Feed a host-runtime notification into the core
    pub fn handle_event(&mut self, slot: StreamSlot, event: MediaEvent) -> Result<()> {
        debug!("Media event on {:?}: {:?}", slot, event);

        match (slot, event) {
            (StreamSlot::Primary, MediaEvent::MetadataLoaded { duration }) => {
                self.controller.on_primary_metadata(duration)?;
            }
            (StreamSlot::Companion, MediaEvent::MetadataLoaded { duration }) => {
                self.controller.on_companion_metadata(duration)?;
            }
            (StreamSlot::Primary, MediaEvent::TimeUpdate { position }) => {
                self.controller.on_primary_time_update(position);
            }
            // The core only reads primary progress; companion progress
            // is implied by the offset
            (StreamSlot::Companion, MediaEvent::TimeUpdate { .. }) => return Ok(()),
        }

        self.mirror();
        Ok(())
    }

    /// Load a new primary source
    pub fn load_primary(&mut self, source: impl Into<String>) {
        self.controller.load_primary(source);
        self.mirror();
    }

    /// Mark the shared reference event at the primary playhead
    pub fn mark_contact(&mut self) -> Result<f64> {
        let instant = self.controller.mark_contact()?;
        self.mirror();
        Ok(instant)
    }

    /// Scrub both streams to a primary-timeline position
    pub fn seek_to(&mut self, target: f64) -> Result<()> {
        self.controller.seek_to(target)?;
        self.mirror();
        Ok(())
    }

    /// Toggle between playing and paused; returns the new state
    pub fn toggle_playback(&mut self) -> Result<bool> {
        let playing = self.controller.toggle_playback()?;
        self.mirror();
        Ok(playing)
    }

    /// Set the playback rate on both streams
    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        self.controller.set_rate(rate)?;
        self.mirror();
        Ok(())
    }

    /// The wrapped controller
    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    /// Tear the bridge apart again
    pub fn into_parts(self) -> (SyncController, P, C) {
        (self.controller, self.primary_port, self.companion_port)
    }

    /// Push both timelines' state out to their ports
    fn mirror(&mut self) {
        mirror_stream(self.controller.primary(), &mut self.primary_port);
        mirror_stream(self.controller.companion(), &mut self.companion_port);
    }
}

fn mirror_stream(timeline: &Timeline, port: &mut impl MediaPort) {
    if (port.position() - timeline.position()).abs() > SYNC_TOLERANCE_SECS {
        port.set_position(timeline.position());
    }
    port.set_rate(timeline.rate());
    if timeline.is_playing() {
        port.play();
    } else {
        port.pause();
    }
}
