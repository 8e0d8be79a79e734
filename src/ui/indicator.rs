//! Spinner shown on stderr while a translation request is outstanding.
//!
//! The indicator runs as its own tokio task. Stopping is a rendezvous: the
//! caller signals the task and then awaits it, so the line has been cleared
//! before [`IndicatorHandle::stop`] returns and nothing the caller prints
//! afterwards can interleave with a spinner frame.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::output;

/// Spinner glyphs, drawn in order and repeated.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between two frames.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Carriage return followed by "erase to end of line".
pub const CLEAR_LINE: &str = "\r\x1b[K";

const MESSAGE: &str = "翻訳中...";

/// Lifecycle of the indicator task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Running,
    Stopping,
    Stopped,
}

/// Entry point for starting an indicator.
pub struct ProgressIndicator;

impl ProgressIndicator {
    /// Starts drawing frames to `writer` on a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<W>(writer: W) -> IndicatorHandle
    where
        W: Write + Send + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run(writer, stop_rx));

        IndicatorHandle {
            stop_tx: Some(stop_tx),
            task: Some(task),
            state: ProgressState::Running,
        }
    }

    /// Starts an indicator on stderr, unless quiet mode is on or stderr is
    /// not a terminal, in which case the returned handle draws nothing.
    pub fn start_on_stderr() -> IndicatorHandle {
        if output::is_quiet() || !io::stderr().is_terminal() {
            return IndicatorHandle::inactive();
        }
        Self::start(io::stderr())
    }
}

/// Handle to a running indicator.
///
/// Dropping the handle without calling [`stop`](Self::stop) closes the stop
/// channel, which the task treats as a stop signal, so the task never
/// outlives its handle by more than one iteration.
#[derive(Debug)]
pub struct IndicatorHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    state: ProgressState,
}

impl IndicatorHandle {
    /// A handle with no task behind it.
    pub const fn inactive() -> Self {
        Self {
            stop_tx: None,
            task: None,
            state: ProgressState::Stopped,
        }
    }

    pub const fn state(&self) -> ProgressState {
        self.state
    }

    /// Signals the task to stop and waits until it has cleared its line.
    ///
    /// The signal is sent at most once; later calls return immediately.
    pub async fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            self.state = ProgressState::Stopping;
            let _ = stop_tx.send(());
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }

        self.state = ProgressState::Stopped;
    }
}

async fn run<W: Write>(mut writer: W, mut stop_rx: oneshot::Receiver<()>) {
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frame = 0;

    loop {
        tokio::select! {
            biased;
            // Err means the handle was dropped; stop either way.
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {
                let _ = write!(writer, "\r{} {MESSAGE}", FRAMES[frame % FRAMES.len()]);
                let _ = writer.flush();
                frame += 1;
            }
        }
    }

    let _ = write!(writer, "{CLEAR_LINE}");
    let _ = writer.flush();
}
