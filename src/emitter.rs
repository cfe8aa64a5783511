//! The emitter facade.
//!
//! [`Emitter`] composes the configuration, the particle pool, the
//! turbulence/repulsion fields and the background scheduler. The caller's
//! thread talks to it for setup, position moves and render passes; one
//! dedicated update thread runs the tick pipeline in the background.
//!
//! # Locking
//!
//! A single mutex guards all shared mutable state (configuration + pool +
//! noise + tick bookkeeping). The update thread holds it for one whole
//! tick; [`Emitter::set_position`] uses a non-blocking `try_lock` so a
//! caller never stalls behind a tick — a skipped write is simply
//! corrected by the caller's next attempt. [`Emitter::render`] takes the
//! lock briefly too, so a render pass always observes a fully committed
//! tick and never interleaves with one.
//!
//! # Example
//!
//! ```ignore
//! let mut emitter: Emitter<Spark> = Emitter::new();
//! emitter.setup(
//!     EmitterConfig::new()
//!         .with_emission_rate(800.0)
//!         .with_lifespan(2.0),
//! )?;
//!
//! // In the host's render loop:
//! emitter.render(&camera);
//!
//! emitter.stop()?;
//! ```

use crate::config::EmitterConfig;
use crate::error::EmitterError;
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::repulsion::RepulsionField;
use crate::scheduler::UpdateScheduler;
use crate::time::TickTimer;
use crate::turbulence::TurbulenceField;
use glam::Vec3;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the update thread and the caller share, guarded by one
/// mutex. The tick pipeline lives here so tests can drive it
/// deterministically without a thread.
pub(crate) struct EmitterState<P: Particle> {
    config: EmitterConfig,
    pool: ParticlePool<P>,
    turbulence: TurbulenceField,
    repulsion: Option<RepulsionField>,
    timer: TickTimer,
    /// Fractional spawn credit carried across ticks. Truncating
    /// `rate × elapsed` every tick would silently undershoot the
    /// configured rate; the carried fraction makes it exact long-run.
    spawn_debt: f32,
    rng: SmallRng,
}

impl<P: Particle> EmitterState<P> {
    pub(crate) fn new(config: EmitterConfig) -> Self {
        let mut rng = SmallRng::from_entropy();
        let noise_seed = rng.gen();
        Self {
            pool: ParticlePool::new(config.emission_rate, config.lifespan_secs),
            turbulence: TurbulenceField::new(config.turbulence_mode, noise_seed),
            repulsion: config.repulsion.then(RepulsionField::new),
            timer: TickTimer::new(),
            spawn_debt: 0.0,
            rng,
            config,
        }
    }

    /// One simulation tick. Ordering matters: turbulence first (it must
    /// not touch particles spawned this tick), then spawn accounting
    /// against the current configuration snapshot, then the
    /// sweep/integration pass over every instantiated particle.
    pub(crate) fn tick(&mut self) {
        let elapsed = self.timer.update();

        self.turbulence.apply(&mut self.pool, self.config.turbulence);
        if let Some(repulsion) = &self.repulsion {
            repulsion.apply(&mut self.pool);
        }

        self.spawn_debt += self.config.emission_rate * elapsed;
        let requested = self.spawn_debt as usize;
        self.spawn_debt -= requested as f32;
        self.pool
            .acquire_or_spawn(requested, &self.config, &mut self.rng);

        self.pool.sweep_dead_to_purgatory();
        let gravity = self.config.gravity;
        self.pool.for_each_live_mut(|p| p.integrate(gravity));
    }

    pub(crate) fn pool(&self) -> &ParticlePool<P> {
        &self.pool
    }

    pub(crate) fn timer(&self) -> &TickTimer {
        &self.timer
    }

    #[cfg(test)]
    fn timer_mut(&mut self) -> &mut TickTimer {
        &mut self.timer
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.config.position = position;
    }
}

/// A particle emitter with a threaded update loop.
///
/// Create with [`Emitter::new`], start with [`Emitter::setup`]. Calling
/// `setup` again fully reinitializes — the previous update thread is
/// stopped and all pool state discarded, never accumulated.
pub struct Emitter<P: Particle> {
    shared: Arc<Mutex<EmitterState<P>>>,
    scheduler: Option<UpdateScheduler>,
    live_count: Arc<AtomicUsize>,
    /// Last position committed through the tick lock; served by
    /// [`Emitter::position`] without taking the lock.
    committed_position: Vec3,
}

impl<P: Particle> Emitter<P> {
    /// Create an idle emitter with default configuration. No thread runs
    /// until [`Emitter::setup`].
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(EmitterState::new(EmitterConfig::default()))),
            scheduler: None,
            live_count: Arc::new(AtomicUsize::new(0)),
            committed_position: Vec3::ZERO,
        }
    }

    /// Install a configuration and start (or restart) the update thread.
    ///
    /// Validates first, then tears down any previous run completely:
    /// tick-reference time, spawn credit, pool contents and noise seed
    /// all start fresh. The tick interval is derived from the target
    /// frame rate here and stays fixed for this run.
    pub fn setup(&mut self, config: EmitterConfig) -> Result<(), EmitterError> {
        config.validate()?;
        self.stop()?;

        let interval = Duration::from_millis((1000.0 / config.target_frame_rate) as u64);
        self.committed_position = config.position;

        let state = EmitterState::new(config);
        debug!(
            "emitter setup: rate={}/s lifespan={}s capacity={} interval={:?}",
            state.config.emission_rate,
            state.config.lifespan_secs,
            state.pool.capacity(),
            interval
        );

        self.shared = Arc::new(Mutex::new(state));
        self.live_count.store(0, Ordering::Relaxed);
        self.scheduler = Some(UpdateScheduler::start(
            self.shared.clone(),
            self.live_count.clone(),
            interval,
        )?);
        Ok(())
    }

    /// Whether the update thread is running.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Move the emitter. Non-blocking: if the update thread is mid-tick
    /// the write is skipped and the next call wins instead. Spawns always
    /// see either the old or the new position, never a torn value.
    pub fn set_position(&mut self, position: Vec3) {
        if let Ok(mut state) = self.shared.try_lock() {
            state.set_position(position);
            self.committed_position = position;
        }
    }

    /// Last successfully committed emitter position. Lock-free.
    pub fn position(&self) -> Vec3 {
        self.committed_position
    }

    /// Instantiated particle count (live + purgatory), as published by
    /// the most recent tick. Lock-free, approximate, bounded by the
    /// pool capacity; intended for diagnostics.
    pub fn live_particle_count(&self) -> usize {
        self.live_count.load(Ordering::Relaxed)
    }

    /// Render every live particle with the configured style.
    ///
    /// Read-only over pool state. Holds the tick lock for the duration
    /// of the pass, so it always observes a fully committed tick; see
    /// the module docs for why this serializes with the update thread.
    pub fn render(&self, camera: &P::Camera) {
        if let Ok(state) = self.shared.lock() {
            let style = state.config.render_style;
            state.pool.for_each_live(|p| p.render(camera, style));
        }
    }

    /// Stop the update thread cooperatively.
    ///
    /// Waits a bounded grace period for the loop to observe the request
    /// and exit; [`EmitterError::ShutdownTimeout`] means the thread may
    /// still be touching shared state and the caller has a logic error
    /// to surface, not swallow. Idempotent.
    pub fn stop(&mut self) -> Result<(), EmitterError> {
        match self.scheduler.take() {
            Some(mut scheduler) => scheduler.stop(),
            None => Ok(()),
        }
    }
}

impl<P: Particle> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}
