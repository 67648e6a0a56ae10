use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Identifier scoping one processing submission
///
/// Each submission gets its own id so the backend can key its
/// intermediate and output files on it; concurrent submissions can
/// never clobber each other's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JobId(Uuid);

impl JobId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One finalized alignment, ready for offline compositing
///
/// Carries the primary clip and the resolved contact instant; the
/// submission is fire-and-forget and its result feeds no further
/// synchronization decisions.
#[derive(Debug, Clone)]
pub struct AlignmentJob {
    /// Generated id scoping this submission
    pub id: JobId,

    /// Path to the primary clip
    pub video_path: PathBuf,

    /// Resolved ball-contact instant on the primary clip, in seconds
    pub contact_instant: f64,

    /// When the job was created
    pub submitted_at: DateTime<Utc>,
}

impl AlignmentJob {
    /// Create a job for a clip and its marked contact instant
    pub fn new<P: Into<PathBuf>>(video_path: P, contact_instant: f64) -> Self {
        Self {
            id: JobId::generate(),
            video_path: video_path.into(),
            contact_instant,
            submitted_at: Utc::now(),
        }
    }

    /// The `timestamp` form field: seconds at two-decimal precision
    pub fn timestamp_field(&self) -> String {
        format!("{:.2}", self.contact_instant)
    }

    /// File name to attach to the uploaded part
    pub fn file_name(&self) -> String {
        self.video_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("clip.mp4")
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_field_uses_two_decimals() {
        let job = AlignmentJob::new("swing.mp4", 2.3333);
        assert_eq!(job.timestamp_field(), "2.33");

        let job = AlignmentJob::new("swing.mp4", 5.0);
        assert_eq!(job.timestamp_field(), "5.00");

        let job = AlignmentJob::new("swing.mp4", 1.005);
        assert_eq!(job.timestamp_field().len(), 4);
    }

    #[test]
    fn test_job_ids_are_unique() {
        let a = AlignmentJob::new("swing.mp4", 1.0);
        let b = AlignmentJob::new("swing.mp4", 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_file_name_falls_back_for_bare_paths() {
        let job = AlignmentJob::new("clips/forehand.mp4", 1.0);
        assert_eq!(job.file_name(), "forehand.mp4");

        let job = AlignmentJob::new("..", 1.0);
        assert_eq!(job.file_name(), "clip.mp4");
    }
}
