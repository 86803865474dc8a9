//! File watcher for continuous reconciliation
//!
//! Subscribes to create/change notifications on the output tree and removal
//! notifications on the source tree, coalesces bursts through a trailing-edge
//! debounce window, and re-runs the reconciler. The loop is single-threaded,
//! so passes never overlap; events arriving mid-pass queue in the channel and
//! re-arm the window afterwards.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::ProjectConfig;
use crate::error::SweepResult;
use crate::fs::LocalFs;
use crate::reconcile::{reconcile, ReconcileEvent};

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Resolved project roots
    pub config: ProjectConfig,
    /// Quiet interval required after the last qualifying event
    pub debounce: Duration,
}

/// Watch event types for the caller's rendering
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started {
        output_root: PathBuf,
        source_root: PathBuf,
    },
    Reconcile(ReconcileEvent),
    PassComplete,
    PassFailed {
        message: String,
    },
    Shutdown,
}

/// Trailing-edge debounce: any qualifying event re-arms the timer, and the
/// pass fires once the last event is a full window old.
pub(crate) struct DebounceState {
    window: Duration,
    last_event: Option<Instant>,
}

impl DebounceState {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            last_event: None,
        }
    }

    pub(crate) fn record(&mut self) {
        self.last_event = Some(Instant::now());
    }

    pub(crate) fn ready(&self) -> bool {
        self.last_event
            .is_some_and(|last| last.elapsed() >= self.window)
    }

    pub(crate) fn clear(&mut self) {
        self.last_event = None;
    }
}

/// Start watching both trees for changes.
///
/// Runs until `running` is cleared. Reconciliation failures inside the loop
/// are reported through the callback and do not stop the watcher.
pub fn watch(
    options: &WatchOptions,
    running: Arc<AtomicBool>,
    on_event: impl Fn(WatchEvent),
) -> SweepResult<()> {
    let fs = LocalFs::new();

    on_event(WatchEvent::Started {
        output_root: options.config.output_root.clone(),
        source_root: options.config.source_root.clone(),
    });

    let (tx, rx) = channel();

    // Generated artifacts appearing or changing can mean new orphans.
    let mut output_watcher = subscribe(tx.clone(), |kind| {
        matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
    })?;
    output_watcher.watch(&options.config.output_root, RecursiveMode::Recursive)?;

    // Only removals on the source side can orphan an output.
    let mut source_watcher = subscribe(tx, |kind| matches!(kind, EventKind::Remove(_)))?;
    source_watcher.watch(&options.config.source_root, RecursiveMode::Recursive)?;

    // Cold pass on startup covers changes made while not watching.
    run_pass(options, &fs, &on_event);

    let mut state = DebounceState::new(options.debounce);
    while running.load(Ordering::SeqCst) {
        if rx.recv_timeout(Duration::from_millis(50)).is_ok() {
            state.record();
        }
        if state.ready() {
            state.clear();
            run_pass(options, &fs, &on_event);
        }
    }

    on_event(WatchEvent::Shutdown);
    Ok(())
}

fn subscribe(
    tx: Sender<()>,
    qualifies: impl Fn(&EventKind) -> bool + Send + 'static,
) -> SweepResult<RecommendedWatcher> {
    let watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if qualifies(&event.kind) {
                    let _ = tx.send(());
                }
            }
        },
        Config::default(),
    )?;
    Ok(watcher)
}

fn run_pass(options: &WatchOptions, fs: &LocalFs, on_event: &impl Fn(WatchEvent)) {
    let result = reconcile(&options.config, fs, |event| {
        on_event(WatchEvent::Reconcile(event));
    });
    match result {
        Ok(_) => on_event(WatchEvent::PassComplete),
        Err(e) => on_event(WatchEvent::PassFailed {
            message: e.to_string(),
        }),
    }
}
