/// A user-marked pair of instants identifying the same event on both
/// streams
///
/// The primary instant is the playhead position on the uploaded clip
/// when the user marks ball contact; the secondary instant is the
/// known position of the same contact on the companion clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMark {
    /// Position of the shared event on the primary timeline
    pub primary_instant: f64,

    /// Position of the shared event on the companion timeline
    pub secondary_instant: f64,
}

impl ReferenceMark {
    /// Signed offset placing the companion timeline in primary-stream
    /// coordinates
    pub fn offset(&self) -> f64 {
        self.primary_instant - self.secondary_instant
    }
}

/// Result of translating a position across timelines
///
/// `clamped` is set when the raw translated value was negative and was
/// forced to zero: the companion clip cannot play before its own
/// start, and the caller uses the flag to defer starting it. A
/// translation landing exactly on zero is not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    /// Translated position in seconds, never negative
    pub position: f64,

    /// Whether the raw value was negative and got forced to zero
    pub clamped: bool,
}

impl Translation {
    fn from_raw(raw: f64) -> Self {
        if raw < 0.0 {
            Self {
                position: 0.0,
                clamped: true,
            }
        } else {
            Self {
                position: raw,
                clamped: false,
            }
        }
    }
}

/// Computes and holds the time offset between the two streams
///
/// Translation is evaluated relative to the stored mark rather than a
/// pre-collapsed offset, so the mark point itself always translates
/// with zero error in either direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetCalculator {
    mark: Option<ReferenceMark>,
}

impl OffsetCalculator {
    /// Create a calculator with no offset established yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new reference mark; last mark wins
    pub fn mark_reference(&mut self, primary_instant: f64, secondary_instant: f64) {
        self.mark = Some(ReferenceMark {
            primary_instant,
            secondary_instant,
        });
    }

    /// Whether an offset has been established
    pub fn has_offset(&self) -> bool {
        self.mark.is_some()
    }

    /// The current mark, if any
    pub fn mark(&self) -> Option<ReferenceMark> {
        self.mark
    }

    /// The current signed offset, if any
    pub fn offset(&self) -> Option<f64> {
        self.mark.map(|mark| mark.offset())
    }

    /// Translate a primary-timeline position into companion
    /// coordinates; `None` until the first mark
    pub fn to_secondary(&self, seconds: f64) -> Option<Translation> {
        self.mark.map(|mark| {
            Translation::from_raw((seconds - mark.primary_instant) + mark.secondary_instant)
        })
    }

    /// Translate a companion-timeline position into primary
    /// coordinates; `None` until the first mark
    pub fn to_primary(&self, seconds: f64) -> Option<Translation> {
        self.mark.map(|mark| {
            Translation::from_raw((seconds - mark.secondary_instant) + mark.primary_instant)
        })
    }

    /// Drop the mark (a new source was loaded into the primary slot)
    pub fn clear(&mut self) {
        self.mark = None;
    }
}
