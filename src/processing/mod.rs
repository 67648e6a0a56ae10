//! # Processing Submission Module
//!
//! The outbound boundary: once an alignment is finalized, the primary
//! clip and its resolved contact instant are handed to an offline
//! compositing backend as a multipart upload. The backend and its
//! video-filter pipeline are an opaque external collaborator; the core
//! only needs the submission to be fire-and-forget.

pub mod client;
pub mod job;

pub use client::{ProcessingClient, ProcessingReceipt};
pub use job::{AlignmentJob, JobId};
