//! Headless fountain demo.
//!
//! Runs an emitter for a few seconds without any window or GPU, printing
//! population counts as the pool warms up, then moves the emitter and
//! shuts down. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example fountain
//! ```

use plume::{
    Emitter, EmitterConfig, EmitterError, Particle, RenderStyle, SpawnParams, TurbulenceMode,
    Vec3,
};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct Spark {
    alive: bool,
    purgatory: bool,
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    size: f32,
    decay: f32,
    life_secs: f32,
    tick_secs: f32,
}

impl Particle for Spark {
    type Camera = ();

    fn spawn(&mut self, params: &SpawnParams) {
        self.position = params.position;
        self.velocity = Vec3::new(0.0, params.speed, 0.0);
        self.acceleration = Vec3::ZERO;
        self.size = params.size;
        self.decay = params.decay;
        self.life_secs = params.lifespan_secs;
        self.tick_secs = params.tick_interval_secs;
    }

    fn integrate(&mut self, gravity: Vec3) {
        self.velocity += gravity + self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
        self.size *= self.decay;
        self.life_secs -= self.tick_secs;
        if self.life_secs <= 0.0 {
            self.alive = false;
        }
    }

    fn apply_turbulence(&mut self, magnitude: f32) {
        let h = self.position.dot(Vec3::new(12.9898, 78.233, 37.719));
        self.acceleration += Vec3::new(h.sin(), 0.0, h.cos()) * magnitude * 0.001;
    }

    fn apply_turbulence_shared(&mut self, _magnitude: f32, shared: Vec3) {
        self.acceleration += shared;
    }

    fn render(&self, _camera: &(), _style: RenderStyle) {
        // A real host would submit a draw call here
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

fn main() -> Result<(), EmitterError> {
    env_logger::init();

    let mut emitter: Emitter<Spark> = Emitter::new();
    emitter.setup(
        EmitterConfig::new()
            .with_position(Vec3::new(0.0, 0.0, 0.0))
            .with_emission_rate(500.0)
            .with_lifespan(2.0)
            .with_gravity(Vec3::new(0.0, -0.002, 0.0))
            .with_turbulence(TurbulenceMode::Synchronized, 0.5),
    )?;

    println!("warming up (capacity fills toward rate x lifespan = 1000)...");
    for second in 1..=4 {
        thread::sleep(Duration::from_secs(1));
        println!(
            "  t={}s  instantiated={}",
            second,
            emitter.live_particle_count()
        );
        emitter.render(&());
    }

    println!("moving emitter...");
    emitter.set_position(Vec3::new(2.0, 0.0, 0.0));
    thread::sleep(Duration::from_secs(1));
    println!(
        "  moved to {:?}, instantiated={}",
        emitter.position(),
        emitter.live_particle_count()
    );

    emitter.stop()?;
    println!("stopped.");
    Ok(())
}
