//! Collaborator seams consumed by the editor core.
//!
//! Hosts swap these for storage-backed or network-backed implementations; the
//! in-memory and deterministic versions here keep tests and headless use simple.

pub mod backup;
pub mod plugins;
pub mod samples;

pub use backup::{BackupSnapshot, BackupStore, InMemoryBackupStore};
pub use plugins::{EditorContext, EditorEvent, EditorPlugin};
pub use samples::{DeterministicSampleGenerator, SampleGenerator};
