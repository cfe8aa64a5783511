//! Integration tests for the emitter lifecycle.
//!
//! These drive the public API only: a concrete particle type, setup with
//! a real background update thread, position moves against a running
//! emitter, render traversal and cooperative shutdown.

use plume::{
    Emitter, EmitterConfig, EmitterError, Particle, RenderStyle, SpawnParams, TurbulenceMode,
    Vec3,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// ============================================================================
// A minimal host-side particle
// ============================================================================

/// Stand-in for the host's camera; render just counts submissions.
struct CountingCamera {
    submitted: AtomicUsize,
}

#[derive(Default)]
struct Mote {
    alive: bool,
    purgatory: bool,
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    life_secs: f32,
    tick_secs: f32,
    immortal: bool,
}

impl Particle for Mote {
    type Camera = CountingCamera;

    fn spawn(&mut self, params: &SpawnParams) {
        self.position = params.position;
        self.velocity = Vec3::new(0.0, params.speed, 0.0);
        self.acceleration = Vec3::ZERO;
        self.life_secs = params.lifespan_secs;
        self.tick_secs = params.tick_interval_secs;
        self.immortal = params.immortal;
    }

    fn integrate(&mut self, gravity: Vec3) {
        self.velocity += gravity + self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
        if !self.immortal {
            self.life_secs -= self.tick_secs;
            if self.life_secs <= 0.0 {
                self.alive = false;
            }
        }
    }

    fn apply_turbulence(&mut self, magnitude: f32) {
        self.acceleration += Vec3::splat(magnitude * 0.001);
    }

    fn apply_turbulence_shared(&mut self, _magnitude: f32, shared: Vec3) {
        self.acceleration += shared;
    }

    fn render(&self, camera: &CountingCamera, _style: RenderStyle) {
        camera.submitted.fetch_add(1, Ordering::Relaxed);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    fn in_purgatory(&self) -> bool {
        self.purgatory
    }

    fn set_purgatory(&mut self, purgatory: bool) {
        self.purgatory = purgatory;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn add_acceleration(&mut self, delta: Vec3) {
        self.acceleration += delta;
    }
}

fn fast_config() -> EmitterConfig {
    // High tick rate so tests settle in tens of milliseconds
    EmitterConfig::new()
        .with_emission_rate(2000.0)
        .with_lifespan(0.5)
        .with_target_frame_rate(200.0)
        .with_turbulence(TurbulenceMode::None, 0.0)
}

// ============================================================================
// Setup / run / stop
// ============================================================================

#[test]
fn test_setup_runs_background_updates() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    assert!(!emitter.is_running());

    emitter.setup(fast_config()).unwrap();
    assert!(emitter.is_running());

    thread::sleep(Duration::from_millis(200));
    assert!(emitter.live_particle_count() > 0);

    emitter.stop().unwrap();
    assert!(!emitter.is_running());
}

#[test]
fn test_stop_halts_mutation() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    emitter
        .setup(fast_config().with_lifespan(10.0))
        .unwrap();
    thread::sleep(Duration::from_millis(100));
    emitter.stop().unwrap();

    // Lifespan far exceeds the wait, so the count only moves if a tick runs
    let frozen = emitter.live_particle_count();
    thread::sleep(Duration::from_millis(100));
    assert_eq!(emitter.live_particle_count(), frozen);
}

#[test]
fn test_stop_without_setup_is_ok() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    assert!(emitter.stop().is_ok());
    assert!(emitter.stop().is_ok());
}

#[test]
fn test_resetup_discards_previous_population() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    emitter
        .setup(fast_config().with_lifespan(10.0))
        .unwrap();
    thread::sleep(Duration::from_millis(150));
    let first_run = emitter.live_particle_count();
    assert!(first_run > 0);

    // Reinitialize with a trickle; the old population must not carry over
    emitter
        .setup(
            EmitterConfig::new()
                .with_emission_rate(10.0)
                .with_lifespan(10.0)
                .with_target_frame_rate(200.0)
                .with_turbulence(TurbulenceMode::None, 0.0),
        )
        .unwrap();
    thread::sleep(Duration::from_millis(100));
    assert!(emitter.live_particle_count() < first_run);
    emitter.stop().unwrap();
}

#[test]
fn test_population_stays_under_capacity() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    let config = fast_config()
        .with_emission_rate(5000.0)
        .with_lifespan(0.2);
    // rate × lifespan + fixed margin
    let capacity = 1000 + 2000;

    emitter.setup(config).unwrap();
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(25));
        assert!(emitter.live_particle_count() <= capacity);
    }
    emitter.stop().unwrap();
}

// ============================================================================
// Position moves
// ============================================================================

#[test]
fn test_set_position_against_running_emitter() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    emitter.setup(fast_config()).unwrap();

    // A write may be skipped while a tick holds the lock; retrying is the
    // contract, and it must land promptly
    let target = Vec3::new(5.0, 6.0, 7.0);
    let mut landed = false;
    for _ in 0..1000 {
        emitter.set_position(target);
        if emitter.position() == target {
            landed = true;
            break;
        }
        thread::yield_now();
    }
    assert!(landed);
    emitter.stop().unwrap();
}

#[test]
fn test_position_defaults_to_config_position() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    assert_eq!(emitter.position(), Vec3::ZERO);

    emitter
        .setup(fast_config().with_position(Vec3::new(1.0, 2.0, 3.0)))
        .unwrap();
    assert_eq!(emitter.position(), Vec3::new(1.0, 2.0, 3.0));
    emitter.stop().unwrap();
}

// ============================================================================
// Render traversal
// ============================================================================

#[test]
fn test_render_visits_live_particles() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    emitter
        .setup(fast_config().with_lifespan(10.0))
        .unwrap();
    thread::sleep(Duration::from_millis(150));

    let camera = CountingCamera {
        submitted: AtomicUsize::new(0),
    };
    emitter.render(&camera);

    assert!(camera.submitted.load(Ordering::Relaxed) > 0);
    emitter.stop().unwrap();
}

#[test]
fn test_render_on_idle_emitter_draws_nothing() {
    let emitter: Emitter<Mote> = Emitter::new();
    let camera = CountingCamera {
        submitted: AtomicUsize::new(0),
    };
    emitter.render(&camera);
    assert_eq!(camera.submitted.load(Ordering::Relaxed), 0);
}

#[test]
fn test_render_from_another_thread() {
    let mut emitter: Emitter<Mote> = Emitter::new();
    emitter
        .setup(fast_config().with_lifespan(10.0))
        .unwrap();
    thread::sleep(Duration::from_millis(100));

    let emitter = Arc::new(emitter);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let emitter = emitter.clone();
            thread::spawn(move || {
                let camera = CountingCamera {
                    submitted: AtomicUsize::new(0),
                };
                for _ in 0..10 {
                    emitter.render(&camera);
                }
                camera.submitted.load(Ordering::Relaxed)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() > 0);
    }

    let mut emitter = Arc::into_inner(emitter).unwrap();
    emitter.stop().unwrap();
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_setup_rejects_bad_configs() {
    let mut emitter: Emitter<Mote> = Emitter::new();

    let result = emitter.setup(EmitterConfig::new().with_lifespan(-2.0));
    assert!(matches!(result, Err(EmitterError::InvalidLifespan(_))));

    let result = emitter.setup(EmitterConfig::new().with_emission_rate(f32::NAN));
    assert!(matches!(result, Err(EmitterError::InvalidEmissionRate(_))));

    let result = emitter.setup(EmitterConfig::new().with_target_frame_rate(0.0));
    assert!(matches!(result, Err(EmitterError::InvalidFrameRate(_))));

    assert!(!emitter.is_running());
}
