//! Emitter configuration.
//!
//! [`EmitterConfig`] is a plain parameter bag: emission rate, particle
//! defaults, lifespan and feature toggles. It is installed wholesale by
//! [`Emitter::setup`](crate::Emitter::setup) and read once per tick by the
//! update thread. The only field mutated while the emitter runs is
//! `position` (through [`Emitter::set_position`](crate::Emitter::set_position),
//! under the tick lock).
//!
//! # Example
//!
//! ```ignore
//! let config = EmitterConfig::new()
//!     .with_position(Vec3::new(0.0, 1.0, 0.0))
//!     .with_emission_rate(500.0)
//!     .with_lifespan(2.5)
//!     .with_gravity(Vec3::new(0.0, -9.8, 0.0))
//!     .with_turbulence(TurbulenceMode::Synchronized, 0.4);
//!
//! emitter.setup(config)?;
//! ```

use crate::error::EmitterError;
use glam::{Vec3, Vec4};

/// How a particle submits its draw call.
///
/// Forwarded verbatim to [`Particle::render`](crate::Particle::render);
/// the engine itself attaches no meaning to the variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Camera-facing quad.
    #[default]
    Billboard,
    /// World-aligned quad.
    Quad,
    /// Single point.
    Point,
    /// Point sprite.
    PointSprite,
}

/// Which turbulence model the update thread applies each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TurbulenceMode {
    /// No perturbation.
    None,
    /// Every live particle computes its own independent perturbation.
    #[default]
    Individual,
    /// One shared coherent-noise vector per tick, applied to every live
    /// particle. Produces correlated, wind-like motion instead of
    /// per-particle jitter.
    Synchronized,
}

/// Emitter and particle-default configuration.
///
/// All numeric fields are expected to be finite; emission rate must be
/// non-negative and lifespan strictly positive. [`EmitterConfig::validate`]
/// enforces this at setup time.
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Emitter position; new particles spawn here.
    pub position: Vec3,
    /// Particles per second.
    pub emission_rate: f32,
    /// Gravity applied to every live particle each tick.
    pub gravity: Vec3,
    /// Base speed handed to particles at spawn.
    pub speed: f32,
    /// Base size handed to particles at spawn.
    pub size: f32,
    /// Base RGBA color handed to particles at spawn.
    pub color: Vec4,
    /// Multiplicative per-tick shrink factor, expected in (0, 1].
    pub decay: f32,
    /// Particle lifespan in seconds. Jittered ±5% per spawn so a cohort
    /// does not die in lockstep.
    pub lifespan_secs: f32,
    /// Turbulence magnitude. Zero disables perturbation regardless of mode.
    pub turbulence: f32,
    /// Draw-call style forwarded to the particle at render time.
    pub render_style: RenderStyle,
    /// Turbulence model.
    pub turbulence_mode: TurbulenceMode,
    /// Target update rate in ticks per second. The tick interval is
    /// derived from this once at setup and stays fixed for the
    /// scheduler's lifetime.
    pub target_frame_rate: f32,
    /// Randomize particle size at spawn.
    pub randomize_size: bool,
    /// Randomize particle brightness at spawn.
    pub randomize_brightness: bool,
    /// Fade opacity over the particle's life.
    pub fade_over_life: bool,
    /// Shrink size over the particle's life.
    pub shrink_over_life: bool,
    /// Rotate over the particle's life.
    pub rotate_over_life: bool,
    /// Particles never expire on their own.
    pub immortal: bool,
    /// Enable pairwise repulsion between live particles. Off by default:
    /// the pass is O(n²) in the live population and impractically slow
    /// beyond a few hundred particles.
    pub repulsion: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            emission_rate: 100.0,
            gravity: Vec3::ZERO,
            speed: 0.3,
            size: 5.0,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            decay: 0.99,
            lifespan_secs: 4.0,
            turbulence: 0.0,
            render_style: RenderStyle::Billboard,
            turbulence_mode: TurbulenceMode::Individual,
            target_frame_rate: 60.0,
            randomize_size: true,
            randomize_brightness: false,
            fade_over_life: true,
            shrink_over_life: true,
            rotate_over_life: true,
            immortal: false,
            repulsion: false,
        }
    }
}

impl EmitterConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emitter position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the emission rate in particles per second.
    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    /// Set the particle lifespan in seconds.
    pub fn with_lifespan(mut self, seconds: f32) -> Self {
        self.lifespan_secs = seconds;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the turbulence model and magnitude.
    pub fn with_turbulence(mut self, mode: TurbulenceMode, magnitude: f32) -> Self {
        self.turbulence_mode = mode;
        self.turbulence = magnitude;
        self
    }

    /// Set the render style forwarded to particles.
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    /// Set the target update rate in ticks per second.
    pub fn with_target_frame_rate(mut self, rate: f32) -> Self {
        self.target_frame_rate = rate;
        self
    }

    /// Opt in to the pairwise repulsion pass.
    ///
    /// The pass is quadratic in the live-particle count; expect it to
    /// dominate the tick beyond a few hundred live particles.
    pub fn with_repulsion(mut self) -> Self {
        self.repulsion = true;
        self
    }

    /// Check the configuration for values that would corrupt capacity or
    /// jitter math downstream.
    ///
    /// Called by [`Emitter::setup`](crate::Emitter::setup); a failed
    /// validation leaves the emitter untouched.
    pub fn validate(&self) -> Result<(), EmitterError> {
        if !self.lifespan_secs.is_finite() || self.lifespan_secs <= 0.0 {
            return Err(EmitterError::InvalidLifespan(self.lifespan_secs));
        }
        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            return Err(EmitterError::InvalidEmissionRate(self.emission_rate));
        }
        if !self.target_frame_rate.is_finite() || self.target_frame_rate <= 0.0 {
            return Err(EmitterError::InvalidFrameRate(self.target_frame_rate));
        }
        let scalars = [
            ("speed", self.speed),
            ("size", self.size),
            ("decay", self.decay),
            ("turbulence", self.turbulence),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(EmitterError::NonFiniteConfig(name));
            }
        }
        if !self.position.is_finite() {
            return Err(EmitterError::NonFiniteConfig("position"));
        }
        if !self.gravity.is_finite() {
            return Err(EmitterError::NonFiniteConfig("gravity"));
        }
        if !self.color.is_finite() {
            return Err(EmitterError::NonFiniteConfig("color"));
        }
        Ok(())
    }
}
