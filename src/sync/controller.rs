use tracing::{debug, info};

use crate::error::{ControllerError, Result, TimelineError};

use super::{OffsetCalculator, ReferenceMark, Timeline};

/// Lifecycle of the synchronization session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No primary source loaded
    Empty,

    /// Primary source present with known duration, no offset yet
    Loaded,

    /// Offset established; dual-stream operations are available
    Aligned,
}

/// Orchestrates two timelines around a shared reference event
///
/// The controller owns the primary (user-uploaded) and companion
/// (canonical reference) timelines plus the offset between them, and
/// applies every seek, play/pause and rate change to both streams in
/// one synchronous step. The host media runtime drives it through the
/// `on_*` notification methods; each call runs to completion, so no
/// notification can ever observe the primary timeline updated but the
/// companion stale.
#[derive(Debug, Clone)]
pub struct SyncController {
    state: SyncState,
    primary: Timeline,
    companion: Timeline,
    offsets: OffsetCalculator,
    /// Known position of ball contact on the companion clip
    companion_contact_instant: f64,
    /// Single logical playing flag mirrored to both timelines
    playing: bool,
    /// Companion start deferred until the primary playhead crosses the
    /// alignment point (level-triggered, fires at most once)
    companion_pending: bool,
    source: Option<String>,
}

impl SyncController {
    /// Create a controller for a companion clip whose contact instant
    /// is already known
    pub fn new(companion_contact_instant: f64) -> Self {
        Self {
            state: SyncState::Empty,
            primary: Timeline::new(),
            companion: Timeline::new(),
            offsets: OffsetCalculator::new(),
            companion_contact_instant,
            playing: false,
            companion_pending: false,
            source: None,
        }
    }

    /// Load a new primary source
    ///
    /// Valid from any state. Resets the primary timeline, drops any
    /// established offset and stops playback; the controller stays
    /// pending in [`SyncState::Empty`] until the metadata event
    /// ([`SyncController::on_primary_metadata`]) arrives.
    pub fn load_primary(&mut self, source: impl Into<String>) {
        let source = source.into();
        info!("Loading primary source: {}", source);

        self.primary.reset();
        self.companion.pause();
        self.offsets.clear();
        self.playing = false;
        self.companion_pending = false;
        self.source = Some(source);
        self.state = SyncState::Empty;
    }

    /// Primary stream metadata arrived from the host runtime
    ///
    /// Completes the pending `load_primary` transition to
    /// [`SyncState::Loaded`]. A repeat notification while aligned
    /// keeps the established offset; only a new upload discards it.
    pub fn on_primary_metadata(&mut self, duration: f64) -> Result<()> {
        if self.source.is_none() {
            return Err(ControllerError::not_ready(
                "register primary metadata",
                "no primary source loaded",
            )
            .into());
        }

        self.primary.set_duration(duration)?;
        if self.state == SyncState::Empty {
            self.state = SyncState::Loaded;
            info!("Primary stream ready: {:.2}s", duration);
        }
        Ok(())
    }

    /// Companion stream metadata arrived from the host runtime
    pub fn on_companion_metadata(&mut self, duration: f64) -> Result<()> {
        self.companion.set_duration(duration)?;
        debug!("Companion stream ready: {:.2}s", duration);
        Ok(())
    }

    /// Mark the shared reference event at the primary playhead
    ///
    /// Reads the primary timeline's current position, fixes the offset
    /// against the canonical companion contact instant and transitions
    /// to [`SyncState::Aligned`]. Returns the marked instant.
    pub fn mark_contact(&mut self) -> Result<f64> {
        if self.state == SyncState::Empty {
            return Err(
                ControllerError::not_ready("mark contact", "no primary clip loaded").into(),
            );
        }

        let instant = self.primary.position();
        self.offsets
            .mark_reference(instant, self.companion_contact_instant);
        self.companion_pending = false;
        self.state = SyncState::Aligned;

        info!(
            "Ball contact marked at {:.2}s (companion reference {:.2}s, offset {:+.2}s)",
            instant,
            self.companion_contact_instant,
            instant - self.companion_contact_instant,
        );

        // Bring the companion in line with the new offset right away
        self.apply_companion(instant);
        Ok(instant)
    }

    /// Scrub both streams to a primary-timeline position
    ///
    /// The companion lands on the translated position; when that
    /// position would fall before the companion clip's start it is
    /// parked at zero and held paused until the primary playhead
    /// crosses the alignment point. Idempotent.
    pub fn seek_to(&mut self, target: f64) -> Result<()> {
        if self.state != SyncState::Aligned {
            return Err(ControllerError::not_ready("seek", "contact not marked yet").into());
        }

        self.primary.seek(target);
        self.apply_companion(self.primary.position());
        Ok(())
    }

    /// Toggle between playing and paused
    ///
    /// On the transition to playing the primary always starts; the
    /// companion starts only if its translated position is past its
    /// own beginning, otherwise it stays paused with the pending-start
    /// watcher armed. On the transition to paused both streams stop
    /// unconditionally. Returns the new playing state.
    pub fn toggle_playback(&mut self) -> Result<bool> {
        if self.state != SyncState::Aligned {
            return Err(
                ControllerError::not_ready("toggle playback", "contact not marked yet").into(),
            );
        }

        if self.playing {
            self.playing = false;
            self.companion_pending = false;
            self.primary.pause();
            self.companion.pause();
            debug!("Playback paused at {:.2}s", self.primary.position());
        } else {
            self.playing = true;
            self.primary.play();
            self.apply_companion(self.primary.position());
            debug!("Playback started at {:.2}s", self.primary.position());
        }

        Ok(self.playing)
    }

    /// Set the playback rate on both streams
    ///
    /// Rates are always kept equal between the streams; independent
    /// rates would reintroduce drift. Fails with
    /// [`TimelineError::InvalidRate`] without touching either stream.
    pub fn set_rate(&mut self, rate: f64) -> Result<()> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(TimelineError::InvalidRate { value: rate }.into());
        }

        self.primary.set_rate(rate)?;
        self.companion.set_rate(rate)?;
        debug!("Playback rate set to {}x on both streams", rate);
        Ok(())
    }

    /// Playback-position notification from the primary stream
    ///
    /// Records the position and, while the pending-start watcher is
    /// armed, starts the companion exactly once at the first position
    /// whose translation is no longer clamped. Safe to call any number
    /// of times afterwards.
    pub fn on_primary_time_update(&mut self, seconds: f64) {
        self.primary.seek(seconds);

        if self.state != SyncState::Aligned || !self.playing || !self.companion_pending {
            return;
        }

        if let Some(translation) = self.offsets.to_secondary(self.primary.position()) {
            if !translation.clamped {
                self.companion.seek(translation.position);
                self.companion.play();
                self.companion_pending = false;
                debug!(
                    "Companion caught up: starting at {:.2}s (primary {:.2}s)",
                    translation.position,
                    self.primary.position()
                );
            }
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The primary (user-uploaded) timeline
    pub fn primary(&self) -> &Timeline {
        &self.primary
    }

    /// The companion (canonical reference) timeline
    pub fn companion(&self) -> &Timeline {
        &self.companion
    }

    /// The logical playing flag
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the companion start is deferred until the primary
    /// playhead crosses the alignment point
    pub fn is_companion_pending(&self) -> bool {
        self.companion_pending
    }

    /// The established offset in seconds, if any
    pub fn offset(&self) -> Option<f64> {
        self.offsets.offset()
    }

    /// The established reference mark, if any
    pub fn mark(&self) -> Option<ReferenceMark> {
        self.offsets.mark()
    }

    /// The marked primary instant, as handed to the processing
    /// submission
    pub fn resolved_contact(&self) -> Option<f64> {
        self.offsets.mark().map(|mark| mark.primary_instant)
    }

    /// The loaded primary source handle, if any
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Effective scrub range: the shorter of the two stream durations,
    /// once both are known
    pub fn scrub_range(&self) -> Option<f64> {
        match (self.primary.duration(), self.companion.duration()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        }
    }

    /// Re-derive the companion's position and play-state from a
    /// primary position. Only meaningful once aligned.
    fn apply_companion(&mut self, primary_position: f64) {
        let Some(translation) = self.offsets.to_secondary(primary_position) else {
            return;
        };

        self.companion.seek(translation.position);
        if translation.clamped {
            // Companion hasn't started yet: park it at its beginning
            // and let the watcher start it mid-playback
            self.companion.pause();
            self.companion_pending = self.playing;
        } else {
            self.companion_pending = false;
            if self.playing {
                self.companion.play();
            } else {
                self.companion.pause();
            }
        }
    }
}
