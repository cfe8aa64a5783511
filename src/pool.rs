//! Fixed-capacity particle pool with purgatory recycling.
//!
//! The pool owns every particle value and partitions them into *live*
//! (simulated and rendered), *purgatory* (dead but retained for cheap
//! reuse) and implicitly *free* (capacity not yet instantiated). Capacity
//! is computed once at setup as `ceil(rate × lifespan)` plus a safety
//! margin, and the instantiated count never exceeds it: once the pool is
//! full, emission is rate-limited to purgatory turnover and excess spawn
//! requests are silently dropped.
//!
//! Purgatory holds index handles into the slot arena, never references —
//! handles stay valid no matter what the backing storage does.

use crate::config::EmitterConfig;
use crate::particle::{Particle, SpawnParams};
use rand::rngs::SmallRng;

/// Extra slots on top of `ceil(rate × lifespan)`, absorbing lifespan
/// jitter and tick-cadence wobble before spawns start getting dropped.
pub const CAPACITY_MARGIN: usize = 2000;

/// Owns the particle slots and the live/purgatory partition.
pub struct ParticlePool<P> {
    /// All instantiated particles, live and purgatory alike. Reserved at
    /// capacity up front; only ever grows by push, so indices are stable.
    slots: Vec<P>,
    /// Indices of particles parked for reuse. A subset of `slots`,
    /// never duplicated.
    purgatory: Vec<usize>,
    /// Hard bound on `slots.len()`.
    capacity: usize,
}

impl<P: Particle> ParticlePool<P> {
    /// Create a pool sized for the given emission rate and lifespan.
    pub fn new(emission_rate: f32, lifespan_secs: f32) -> Self {
        let turnover = (emission_rate * lifespan_secs).ceil() as usize;
        Self::with_capacity(turnover + CAPACITY_MARGIN)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            purgatory: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of particles this pool will ever instantiate.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instantiated particle count (live + purgatory). Never exceeds
    /// [`capacity`](Self::capacity).
    pub fn instantiated(&self) -> usize {
        self.slots.len()
    }

    /// Number of particles currently parked for reuse.
    pub fn purgatory_len(&self) -> usize {
        self.purgatory.len()
    }

    /// Number of live particles. Walks the slots; diagnostic use.
    pub fn live_len(&self) -> usize {
        self.slots
            .iter()
            .filter(|p| p.is_alive() && !p.in_purgatory())
            .count()
    }

    /// Spawn up to `n` particles from the current configuration.
    ///
    /// Each request instantiates a fresh slot while the pool is under
    /// capacity, then falls back to re-initializing a purgatory particle
    /// in place. When neither is possible the request is dropped — not
    /// an error, emission is simply throttled to capacity turnover.
    pub fn acquire_or_spawn(&mut self, n: usize, config: &EmitterConfig, rng: &mut SmallRng) {
        for _ in 0..n {
            let params = SpawnParams::from_config(config, rng);
            if self.slots.len() < self.capacity {
                let mut particle = P::default();
                particle.spawn(&params);
                particle.set_alive(true);
                particle.set_purgatory(false);
                self.slots.push(particle);
            } else if let Some(index) = self.purgatory.pop() {
                let particle = &mut self.slots[index];
                particle.spawn(&params);
                particle.set_alive(true);
                particle.set_purgatory(false);
            }
        }
    }

    /// Move every particle that cleared its own liveness flag into
    /// purgatory. Particles already in purgatory are skipped, so an index
    /// is parked at most once.
    pub fn sweep_dead_to_purgatory(&mut self) {
        for (index, particle) in self.slots.iter_mut().enumerate() {
            if !particle.is_alive() && !particle.in_purgatory() {
                particle.set_purgatory(true);
                self.purgatory.push(index);
            }
        }
    }

    /// Visit every live particle in insertion order.
    pub fn for_each_live<F: FnMut(&P)>(&self, mut f: F) {
        for particle in &self.slots {
            if particle.is_alive() && !particle.in_purgatory() {
                f(particle);
            }
        }
    }

    /// Visit every live particle mutably in insertion order.
    pub fn for_each_live_mut<F: FnMut(&mut P)>(&mut self, mut f: F) {
        for particle in &mut self.slots {
            if particle.is_alive() && !particle.in_purgatory() {
                f(particle);
            }
        }
    }

    /// Raw slot access for the repulsion pass, which needs pairwise
    /// indexing the closure-based visitors cannot express.
    pub(crate) fn slots_mut(&mut self) -> &mut [P] {
        &mut self.slots
    }
}
