//! Distsweep - orphaned build-output reconciler
//!
//! Distsweep compares a TypeScript compiler's output tree against its source
//! tree, deletes generated files whose source no longer exists, and prunes
//! directories left empty. It runs either as a single pass or continuously
//! in watch mode.

pub mod config;
pub mod error;
pub mod fs;
pub mod mapper;
pub mod reconcile;
pub mod watcher;

// Re-exports for convenience
pub use config::ProjectConfig;
pub use error::{SweepError, SweepResult};
pub use fs::{file_exists, EntryKind, FileSystem, LocalFs};
pub use mapper::{source_candidates, strip_output_suffix, SOURCE_EXTENSIONS};
pub use reconcile::{reconcile, ReconcileEvent};
pub use watcher::{watch, WatchEvent, WatchOptions, DEFAULT_DEBOUNCE_MS};
