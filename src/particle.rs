//! The particle capability contract.
//!
//! The engine never implements particle physics or rendering itself; it
//! drives any type that satisfies [`Particle`]. Concrete particles own
//! their position integration and draw submission, the engine owns the
//! lifecycle: it decides when a particle (re)spawns, when its turbulence
//! is applied, when it integrates, and when a dead particle moves to
//! purgatory for reuse.
//!
//! # Flags
//!
//! Two flags partition the pool:
//!
//! | State | `is_alive` | `in_purgatory` |
//! |-------|-----------|----------------|
//! | Live | `true` | `false` |
//! | Purgatory (dead, retained for reuse) | `false` | `true` |
//!
//! A particle signals its own death by clearing the liveness flag inside
//! [`Particle::integrate`]; the pool's sweep moves it to purgatory on the
//! next pass. The pool re-asserts both flags on every (re)spawn, so
//! implementations only ever need to *clear* liveness.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Default)]
//! struct Spark {
//!     alive: bool,
//!     purgatory: bool,
//!     position: Vec3,
//!     velocity: Vec3,
//!     acceleration: Vec3,
//!     life_secs: f32,
//!     tick_secs: f32,
//! }
//!
//! impl Particle for Spark {
//!     type Camera = MyCamera;
//!
//!     fn spawn(&mut self, params: &SpawnParams) {
//!         self.position = params.position;
//!         self.velocity = Vec3::ZERO;
//!         self.life_secs = params.lifespan_secs;
//!         self.tick_secs = params.tick_interval_secs;
//!     }
//!
//!     fn integrate(&mut self, gravity: Vec3) {
//!         self.velocity += gravity + self.acceleration;
//!         self.position += self.velocity;
//!         self.acceleration = Vec3::ZERO;
//!         self.life_secs -= self.tick_secs;
//!         if self.life_secs <= 0.0 {
//!             self.alive = false;
//!         }
//!     }
//!     // ...
//! }
//! ```

use crate::config::{EmitterConfig, RenderStyle};
use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::Rng;

/// Per-spawn configuration snapshot handed to [`Particle::spawn`].
///
/// Built from the emitter configuration at the moment of (re)spawn, so a
/// particle always inherits the emitter position and visual defaults that
/// were current on its spawn tick. The lifespan is already jittered.
#[derive(Clone, Debug)]
pub struct SpawnParams {
    /// Spawn position (the emitter position at spawn time).
    pub position: Vec3,
    /// Base speed.
    pub speed: f32,
    /// Base size.
    pub size: f32,
    /// Base RGBA color.
    pub color: Vec4,
    /// Lifespan in seconds, jittered uniformly in [0.95L, 1.05L] so a
    /// cohort spawned on the same tick does not die in lockstep.
    pub lifespan_secs: f32,
    /// Multiplicative per-tick shrink factor.
    pub decay: f32,
    /// Seconds per scheduler tick, fixed at setup. Lets a particle
    /// convert its seconds-based lifespan into per-tick aging inside
    /// [`Particle::integrate`].
    pub tick_interval_secs: f32,
    /// Randomize size at spawn.
    pub randomize_size: bool,
    /// Randomize brightness at spawn.
    pub randomize_brightness: bool,
    /// Fade opacity over life.
    pub fade_over_life: bool,
    /// Shrink size over life.
    pub shrink_over_life: bool,
    /// Rotate over life.
    pub rotate_over_life: bool,
    /// Never expire.
    pub immortal: bool,
}

impl SpawnParams {
    /// Snapshot the configuration for one spawn, jittering the lifespan.
    pub(crate) fn from_config(config: &EmitterConfig, rng: &mut SmallRng) -> Self {
        let lifespan_secs =
            rng.gen_range(config.lifespan_secs * 0.95..=config.lifespan_secs * 1.05);
        Self {
            position: config.position,
            speed: config.speed,
            size: config.size,
            color: config.color,
            lifespan_secs,
            decay: config.decay,
            tick_interval_secs: 1.0 / config.target_frame_rate,
            randomize_size: config.randomize_size,
            randomize_brightness: config.randomize_brightness,
            fade_over_life: config.fade_over_life,
            shrink_over_life: config.shrink_over_life,
            rotate_over_life: config.rotate_over_life,
            immortal: config.immortal,
        }
    }
}

/// Capability contract the engine requires of a particle type.
///
/// The pool owns every particle value exclusively; nothing outside a
/// render pass ever aliases one. `Default` provides the inert value the
/// pool constructs before the first spawn, and `Send` lets the pool move
/// to the update thread.
pub trait Particle: Default + Send + 'static {
    /// Camera/projection type handed through [`Particle::render`]. The
    /// hosting render loop owns it; the engine just forwards it.
    type Camera;

    /// (Re)initialize all mutable state from a spawn snapshot.
    ///
    /// The pool asserts the liveness flag and clears the purgatory flag
    /// immediately after calling this.
    fn spawn(&mut self, params: &SpawnParams);

    /// Advance one tick under the given gravity.
    ///
    /// Implementations clear their own liveness flag when remaining life
    /// expires (unless spawned immortal).
    fn integrate(&mut self, gravity: Vec3);

    /// Apply an independent, per-particle perturbation.
    fn apply_turbulence(&mut self, magnitude: f32);

    /// Apply the shared per-tick perturbation vector computed by
    /// synchronized turbulence.
    fn apply_turbulence_shared(&mut self, magnitude: f32, shared: Vec3);

    /// Submit this particle's draw call. Must not mutate state.
    fn render(&self, camera: &Self::Camera, style: RenderStyle);

    /// Liveness flag.
    fn is_alive(&self) -> bool;
    /// Set the liveness flag.
    fn set_alive(&mut self, alive: bool);
    /// Purgatory flag (dead, retained for reuse).
    fn in_purgatory(&self) -> bool;
    /// Set the purgatory flag.
    fn set_purgatory(&mut self, purgatory: bool);

    /// Current position; read by the repulsion pass.
    fn position(&self) -> Vec3;
    /// Accumulate acceleration; written by the repulsion pass and
    /// typically by turbulence implementations.
    fn add_acceleration(&mut self, delta: Vec3);
}
