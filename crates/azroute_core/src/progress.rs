use std::{
    ops::ControlFlow,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use crate::{Error, Result, constants::PROGRESS_DONE};

/// Receives progress percentages in [0, 100].
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// Discards progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Cancels this token on Ctrl-C. The handler can only be installed once per process.
    pub fn cancel_on_ctrlc(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            log::warn!("signal: interrupt received, cancelling search");
            token.cancel();
        })
        .map_err(|e| Error::other(format!("failed to install interrupt handler: {e}")))
    }
}

/// Per-run progress and cancellation seam handed to a [`crate::RouteSearch`].
///
/// Reported values never go backwards: a report at or below the last one is dropped.
pub struct SearchControl<'a> {
    sink: &'a mut dyn ProgressSink,
    cancel: &'a CancelToken,
    last: Option<u8>,
}

impl<'a> SearchControl<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink, cancel: &'a CancelToken) -> Self {
        Self {
            sink,
            cancel,
            last: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cooperative yield point: polls cancellation, reports `done / total` and yields
    /// the thread. Breaks when the run should stop.
    pub fn checkpoint(&mut self, done: u64, total: u64) -> ControlFlow<()> {
        if self.is_cancelled() {
            return ControlFlow::Break(());
        }
        let percent = if total == 0 {
            PROGRESS_DONE
        } else {
            (done.min(total) * u64::from(PROGRESS_DONE) / total) as u8
        };
        self.report(percent);
        thread::yield_now();
        ControlFlow::Continue(())
    }

    /// Reports 100 unless it was already reported.
    pub fn complete(&mut self) {
        self.report(PROGRESS_DONE);
    }

    pub fn last_reported(&self) -> Option<u8> {
        self.last
    }

    fn report(&mut self, percent: u8) {
        if self.last.is_some_and(|last| percent <= last) {
            return;
        }
        self.last = Some(percent);
        self.sink.report(percent);
    }
}
