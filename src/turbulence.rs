//! Turbulence application.
//!
//! Two motion styles, sharing the same integration path:
//!
//! - **Individual** — every live particle computes its own perturbation
//!   (its private random walk) via [`Particle::apply_turbulence`].
//! - **Synchronized** — one coherent-noise vector is sampled per tick and
//!   applied to every live particle, so the whole population feels the
//!   same gust. The noise coordinate advances along a monotonically
//!   incrementing tick counter.
//!
//! Keeping both behind one `apply` call means the scheduler's tick
//! pipeline does not care which style is configured.

use crate::config::TurbulenceMode;
use crate::particle::Particle;
use crate::pool::ParticlePool;
use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Per-emitter turbulence state: the configured mode, the coherent-noise
/// source (seeded once at setup) and the tick counter driving the
/// synchronized sample.
pub struct TurbulenceField {
    mode: TurbulenceMode,
    perlin: Perlin,
    counter: u64,
}

impl TurbulenceField {
    /// Create a field for the given mode, seeding the noise source.
    pub fn new(mode: TurbulenceMode, seed: u32) -> Self {
        Self {
            mode,
            perlin: Perlin::new(seed),
            counter: 0,
        }
    }

    /// Ticks the synchronized sample has advanced through.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Apply this tick's perturbation to every live particle.
    ///
    /// In synchronized mode the shared vector is computed once and the
    /// counter advances once, regardless of population size.
    pub fn apply<P: Particle>(&mut self, pool: &mut ParticlePool<P>, magnitude: f32) {
        match self.mode {
            TurbulenceMode::None => {}
            TurbulenceMode::Individual => {
                pool.for_each_live_mut(|p| p.apply_turbulence(magnitude));
            }
            TurbulenceMode::Synchronized => {
                let shared = self.sample(magnitude);
                pool.for_each_live_mut(|p| p.apply_turbulence_shared(magnitude, shared));
                self.counter += 1;
            }
        }
    }

    /// One coherent sample along the counter's time axis, scaled down so
    /// a magnitude of 1.0 stays a gentle push rather than a shove.
    fn sample(&self, magnitude: f32) -> Vec3 {
        let t = self.counter as f64 * magnitude as f64;
        Vec3::new(
            self.perlin.get([t, 0.0, 0.0]) as f32,
            self.perlin.get([0.0, t, 0.0]) as f32,
            self.perlin.get([0.0, 0.0, t]) as f32,
        ) * magnitude
            * 0.1
    }
}
