//! Output-tree reconciliation
//!
//! Walks the output tree depth-first and deletes every generated file whose
//! source file is gone, then prunes directories left empty. Emptiness is
//! reported bottom-up: each call returns whether its subtree still has
//! entries, so pruning happens in a single post-order pass.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::SweepResult;
use crate::fs::{file_exists, EntryKind, FileSystem};
use crate::mapper::source_candidates;

/// Progress notifications from a reconciliation pass.
///
/// Rendering policy (verbose/silent) belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// Scanning one output directory
    EnterDir { path: PathBuf },
    /// An output file whose source still exists
    Kept { output: PathBuf, source: PathBuf },
    /// An orphaned output file was deleted
    Removed { path: PathBuf },
    /// A directory emptied out and was pruned
    PrunedDir { path: PathBuf },
}

/// Run one full reconciliation pass.
///
/// Returns whether the output root still contains any entries.
pub fn reconcile<F: FileSystem>(
    config: &ProjectConfig,
    fs: &F,
    on_event: impl Fn(ReconcileEvent),
) -> SweepResult<bool> {
    reconcile_dir(config, fs, Path::new(""), &on_event)
}

/// Reconcile one directory, addressed by the same relative path under both
/// roots.
fn reconcile_dir<F: FileSystem>(
    config: &ProjectConfig,
    fs: &F,
    rel: &Path,
    on_event: &impl Fn(ReconcileEvent),
) -> SweepResult<bool> {
    let out_dir = config.output_root.join(rel);
    on_event(ReconcileEvent::EnterDir {
        path: out_dir.clone(),
    });

    // A missing or unreadable directory scans as empty.
    let entries = fs.list_dir(&out_dir).unwrap_or_default();
    let total = entries.len();
    let mut removed = 0usize;

    for name in entries {
        let out_path = out_dir.join(&name);

        let kind = match fs.entry_kind(&out_path) {
            Ok(kind) => kind,
            // Unreadable entries drop out of the live count; the next pass
            // re-checks them.
            Err(_) => {
                removed += 1;
                continue;
            }
        };

        if kind == EntryKind::Directory {
            let child = rel.join(&name);
            if !reconcile_dir(config, fs, &child, on_event)? {
                // An already-gone or busy directory resolves on a later pass.
                let _ = fs.remove_dir(&out_path);
                removed += 1;
                on_event(ReconcileEvent::PrunedDir { path: out_path });
            }
            continue;
        }

        let name = name.to_string_lossy();
        let candidates = source_candidates(&config.source_root, rel, &name);
        match first_existing(fs, &candidates)? {
            Some(source) => on_event(ReconcileEvent::Kept {
                output: out_path,
                source,
            }),
            None => {
                // The file counts as removed even if the delete loses a race;
                // the next pass settles it.
                let _ = fs.remove_file(&out_path);
                removed += 1;
                on_event(ReconcileEvent::Removed { path: out_path });
            }
        }
    }

    Ok(total - removed > 0)
}

fn first_existing<F: FileSystem>(fs: &F, candidates: &[PathBuf]) -> SweepResult<Option<PathBuf>> {
    for candidate in candidates {
        if file_exists(fs, candidate)? {
            return Ok(Some(candidate.clone()));
        }
    }
    Ok(None)
}
