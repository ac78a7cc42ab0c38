//! Runs the exact solver off the calling thread.
//!
//! The search owns a clone of the board, so the caller can keep playing while
//! it runs. Cancelling sets a flag the search polls at every state.
use crate::engine::Board;
use crate::solver::{solve_exact, ExactReport, SolveLimits};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

/// Handle to an exact search running on its own thread.
#[derive(Debug)]
pub struct AsyncSolve {
    cancel: Arc<AtomicBool>,
    rx: mpsc::Receiver<ExactReport>,
    join: Option<JoinHandle<()>>,
}

impl AsyncSolve {
    /// Asks the search to stop. It then reports `Aborted(Canceled)`.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Returns the report if the search has finished.
    pub fn try_recv(&self) -> Option<ExactReport> {
        self.rx.try_recv().ok()
    }

    /// Blocks until the search finishes.
    pub fn wait(mut self) -> Option<ExactReport> {
        let result = self.rx.recv().ok();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        result
    }
}

/// Starts an exact search of `board` on a new thread.
pub fn spawn_exact_solve(board: Board, limits: SolveLimits) -> AsyncSolve {
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_for_thread = Arc::clone(&cancel);
    let (tx, rx) = mpsc::channel::<ExactReport>();
    let join = std::thread::spawn(move || {
        let report = solve_exact(&board, limits, Some(cancel_for_thread.as_ref()));
        let _ = tx.send(report);
    });
    AsyncSolve {
        cancel,
        rx,
        join: Some(join),
    }
}
