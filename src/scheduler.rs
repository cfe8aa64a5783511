//! Background update scheduler.
//!
//! One dedicated thread ticks the emitter state at a fixed interval
//! derived from the target frame rate at setup time. Each tick takes the
//! shared mutex for the whole pipeline (turbulence → spawn → sweep →
//! integrate), publishes the instantiated count for lock-free diagnostics,
//! then sleeps until the next interval.
//!
//! The inter-tick sleep doubles as the shutdown wait: `stop()` sends on
//! the shutdown channel, which wakes the sleeping worker immediately
//! instead of letting it run out the interval. The worker acknowledges
//! exit by dropping its end of a rendezvous channel; `stop()` waits a
//! bounded grace period for that before joining, and surfaces a timeout
//! as an error rather than guessing the thread is gone.

use crate::emitter::EmitterState;
use crate::error::EmitterError;
use crate::particle::Particle;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long teardown waits for the update loop to observe the shutdown
/// signal and exit. Tearing shared state down under a still-running loop
/// risks a use-after-teardown, so exceeding this is surfaced as
/// [`EmitterError::ShutdownTimeout`].
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

pub(crate) struct UpdateScheduler {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<Sender<()>>,
    exit_rx: Receiver<()>,
}

impl UpdateScheduler {
    /// Spawn the update thread ticking `state` every `interval`.
    pub(crate) fn start<P: Particle>(
        state: Arc<Mutex<EmitterState<P>>>,
        live_count: Arc<AtomicUsize>,
        interval: Duration,
    ) -> Result<Self, EmitterError> {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let (exit_tx, exit_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("plume-update".into())
            .spawn(move || {
                // Dropped when the loop returns; unblocks stop()
                let _exit = exit_tx;
                run_loop(state, live_count, interval, shutdown_rx);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown_tx: Some(shutdown_tx),
            exit_rx,
        })
    }

    /// Request cooperative shutdown and wait up to [`SHUTDOWN_GRACE`] for
    /// the loop to exit. Idempotent; a second call returns `Ok` at once.
    pub(crate) fn stop(&mut self) -> Result<(), EmitterError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Full or disconnected both mean the loop already knows
            let _ = tx.try_send(());
        }

        match self.exit_rx.recv_timeout(SHUTDOWN_GRACE) {
            Err(RecvTimeoutError::Timeout) => return Err(EmitterError::ShutdownTimeout),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
        }

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        debug!("update thread stopped");
        Ok(())
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        if self.handle.is_some() && self.stop().is_err() {
            log::error!(
                "update thread did not exit within {:?} during drop; \
                 shared state may still be in use",
                SHUTDOWN_GRACE
            );
        }
    }
}

fn run_loop<P: Particle>(
    state: Arc<Mutex<EmitterState<P>>>,
    live_count: Arc<AtomicUsize>,
    interval: Duration,
    shutdown_rx: Receiver<()>,
) {
    loop {
        {
            // A poisoned mutex means a caller panicked mid-render; there
            // is nothing sane left to tick
            let Ok(mut state) = state.lock() else { break };
            state.tick();
            live_count.store(state.pool().instantiated(), Ordering::Relaxed);
        }

        match shutdown_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
