//! # plume
//!
//! Pooled CPU particle emitters with a threaded fixed-interval update
//! loop.
//!
//! An [`Emitter`] owns a fixed-capacity pool of particles and a
//! background thread that ticks the simulation at a rate derived from
//! the configured target frame rate. Dead particles are never freed;
//! they are parked in purgatory and recycled for later spawns, so after
//! warm-up a running emitter performs no allocation at all.
//!
//! The particle itself is yours: implement the [`Particle`] trait for
//! your own type and the emitter handles spawning, recycling,
//! turbulence, integration and render traversal around it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plume::{Emitter, EmitterConfig, TurbulenceMode, Vec3};
//!
//! let mut emitter: Emitter<Spark> = Emitter::new();
//! emitter.setup(
//!     EmitterConfig::new()
//!         .with_position(Vec3::new(0.0, 1.0, 0.0))
//!         .with_emission_rate(500.0)
//!         .with_lifespan(3.0)
//!         .with_turbulence(TurbulenceMode::Individual, 1.0),
//! )?;
//!
//! // The update thread is now ticking in the background. From the
//! // host's render loop:
//! emitter.render(&camera);
//!
//! emitter.stop()?;
//! ```
//!
//! ## Concepts
//!
//! | Term | Meaning |
//! |------|---------|
//! | live | particle currently simulated and rendered |
//! | purgatory | dead particle parked for recycling |
//! | instantiated | live + purgatory; never exceeds pool capacity |
//! | tick | one pass of the update pipeline on the background thread |
//!
//! ## Modules
//!
//! - [`config`] — emitter configuration and validation
//! - [`particle`] — the [`Particle`] trait and spawn parameters
//! - [`error`] — the crate error type
//! - [`time`] — tick timing, with a fixed-delta mode for tests

pub mod config;
pub mod error;
pub mod particle;
pub mod time;

mod emitter;
mod pool;
mod repulsion;
mod scheduler;
mod turbulence;

pub use config::{EmitterConfig, RenderStyle, TurbulenceMode};
pub use emitter::Emitter;
pub use error::EmitterError;
pub use particle::{Particle, SpawnParams};
pub use pool::ParticlePool;
pub use repulsion::RepulsionField;
pub use time::TickTimer;
pub use turbulence::TurbulenceField;

pub use glam::{Vec3, Vec4};
