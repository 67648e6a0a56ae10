use crate::error::TimelineError;

/// Playable state for a single media stream
///
/// A `Timeline` knows nothing about synchronization; it is pure data
/// with guarded setters. Rendering and actual media-element control
/// belong to an adapter outside the core (see [`crate::adapter`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    duration: Option<f64>,
    position: f64,
    playing: bool,
    rate: f64,
}

impl Timeline {
    /// Create an empty timeline (no media loaded yet)
    pub fn new() -> Self {
        Self {
            duration: None,
            position: 0.0,
            playing: false,
            rate: 1.0,
        }
    }

    /// Record the stream duration once media metadata is known
    ///
    /// Clamps the current position into the new range. Fails with
    /// [`TimelineError::InvalidDuration`] if `duration` is not finite
    /// or negative.
    pub fn set_duration(&mut self, duration: f64) -> Result<(), TimelineError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(TimelineError::InvalidDuration { value: duration });
        }

        self.duration = Some(duration);
        self.position = self.position.clamp(0.0, duration);
        Ok(())
    }

    /// Duration in seconds, `None` until metadata has arrived
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Whether media metadata has loaded
    pub fn is_ready(&self) -> bool {
        self.duration.is_some()
    }

    /// Move the playhead
    ///
    /// The target is clamped into `[0, duration]`. While the duration
    /// is still unknown any non-negative target is accepted as-is and
    /// the upper clamp is deferred until [`Timeline::set_duration`].
    pub fn seek(&mut self, seconds: f64) {
        self.position = match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
    }

    /// Current playhead position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Set the playback rate
    ///
    /// Fails with [`TimelineError::InvalidRate`] for zero, negative or
    /// non-finite rates.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), TimelineError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(TimelineError::InvalidRate { value: rate });
        }

        self.rate = rate;
        Ok(())
    }

    /// Current playback rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Start playback; idempotent
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop playback; idempotent
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Whether the stream is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Return the timeline to its empty state (new source loaded into
    /// the slot)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
