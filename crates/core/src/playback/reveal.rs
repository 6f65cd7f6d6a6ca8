//! Progressive, one-character-at-a-time reveal of the active marker's text.
//!
//! A reveal is keyed by the marker id. Starting a new one always cancels the
//! previous one first, so a stale timer can never write into the display.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::content::ItemId;

/// Time between two revealed characters.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(50);

/// Reveal progress for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    key: ItemId,
    text: String,
    shown: usize,
    total: usize,
}

impl Reveal {
    pub fn new(key: ItemId, text: String) -> Self {
        let total = text.chars().count();
        Self {
            key,
            text,
            shown: 0,
            total,
        }
    }

    pub fn key(&self) -> &ItemId {
        &self.key
    }

    /// Reveal one more character. Returns `false` once nothing is left.
    pub fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.shown += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.total
    }

    /// The revealed prefix, cut on a character boundary.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// Runs reveals on behalf of the synchronizer.
pub trait RevealScheduler {
    /// Cancel any running reveal, then start revealing `text`.
    fn start(&mut self, key: ItemId, text: String);

    /// Stop the running reveal and forget it. Idempotent.
    fn cancel(&mut self);

    /// Text revealed so far; `None` when no reveal is held.
    fn visible_text(&self) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Host-driven reveal
// ---------------------------------------------------------------------------

/// Reveal advanced by explicit [`ManualReveal::tick`] calls, for hosts that
/// already run a frame loop at the reveal interval.
#[derive(Debug, Default)]
pub struct ManualReveal {
    current: Option<Reveal>,
}

impl ManualReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the held reveal by one character.
    pub fn tick(&mut self) -> bool {
        self.current.as_mut().is_some_and(Reveal::step)
    }

    pub fn current(&self) -> Option<&Reveal> {
        self.current.as_ref()
    }
}

impl RevealScheduler for ManualReveal {
    fn start(&mut self, key: ItemId, text: String) {
        self.current = Some(Reveal::new(key, text));
    }

    fn cancel(&mut self) {
        self.current = None;
    }

    fn visible_text(&self) -> Option<String> {
        self.current.as_ref().map(|r| r.visible().to_string())
    }
}

// ---------------------------------------------------------------------------
// Timer-driven reveal
// ---------------------------------------------------------------------------

/// Reveal driven by a Tokio interval task.
///
/// Each reveal runs as its own task, stopped through a [`CancellationToken`]
/// on cancel, on restart and on drop. Progress is published on a `watch`
/// channel. [`RevealScheduler::start`] must be called inside a Tokio runtime.
#[derive(Debug)]
pub struct TimedReveal {
    interval: Duration,
    task: Option<RevealTask>,
}

#[derive(Debug)]
struct RevealTask {
    key: ItemId,
    cancel: CancellationToken,
    text: watch::Receiver<String>,
    handle: JoinHandle<()>,
}

impl TimedReveal {
    pub fn new() -> Self {
        Self::with_interval(REVEAL_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    /// Receiver for re-rendering on every revealed character.
    pub fn subscribe(&self) -> Option<watch::Receiver<String>> {
        self.task.as_ref().map(|t| t.text.clone())
    }

    /// Key of the marker currently being revealed.
    pub fn key(&self) -> Option<&ItemId> {
        self.task.as_ref().map(|t| &t.key)
    }

    /// Whether the reveal task is still adding characters.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.handle.is_finished())
    }
}

impl Default for TimedReveal {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealScheduler for TimedReveal {
    fn start(&mut self, key: ItemId, text: String) {
        self.cancel();

        let cancel = CancellationToken::new();
        let (tx, rx) = watch::channel(String::new());
        let handle = tokio::spawn(run_reveal(
            Reveal::new(key.clone(), text),
            self.interval,
            tx,
            cancel.clone(),
        ));

        self.task = Some(RevealTask {
            key,
            cancel,
            text: rx,
            handle,
        });
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel.cancel();
            tracing::trace!(marker_id = %task.key, "Reveal cancelled");
        }
    }

    fn visible_text(&self) -> Option<String> {
        self.task.as_ref().map(|t| t.text.borrow().clone())
    }
}

impl Drop for TimedReveal {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_reveal(
    mut reveal: Reveal,
    interval: Duration,
    tx: watch::Sender<String>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately.
    ticker.tick().await;

    while !reveal.is_complete() {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                reveal.step();
                if tx.send(reveal.visible().to_string()).is_err() {
                    return;
                }
            }
        }
    }
}
