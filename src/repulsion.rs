//! Optional pairwise repulsion.
//!
//! Every unordered pair of live particles pushes apart along its
//! separating direction with an inverse-square falloff. The pass is
//! O(n²) in the live population — at realistic populations (tens of
//! thousands) it dominates the tick completely, which is why it is off
//! by default and gated behind
//! [`EmitterConfig::with_repulsion`](crate::EmitterConfig::with_repulsion).
//! Enabling it logs a warning so the cost is never a surprise.

use crate::particle::Particle;
use crate::pool::ParticlePool;
use log::warn;

/// Inverse-square force scale. Matched to per-tick acceleration
/// accumulation, hence the tiny constant.
const REPULSION_STRENGTH: f32 = 0.000_001;

/// Additional damping applied to both sides of a pair.
const REPULSION_DAMPING: f32 = 10.0;

/// Pairwise inverse-square repulsion among live particles.
pub struct RepulsionField {
    strength: f32,
}

impl RepulsionField {
    /// Create the field and warn about its cost.
    pub fn new() -> Self {
        warn!(
            "pairwise repulsion enabled: O(n^2) in live particles, \
             impractical beyond a few hundred"
        );
        Self {
            strength: REPULSION_STRENGTH,
        }
    }

    /// Accumulate equal-and-opposite acceleration on every live pair.
    ///
    /// Pairs at zero separation are skipped; there is no direction to
    /// push along and the inverse-square term would divide by zero.
    pub fn apply<P: Particle>(&self, pool: &mut ParticlePool<P>) {
        let slots = pool.slots_mut();
        let live: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive() && !p.in_purgatory())
            .map(|(i, _)| i)
            .collect();

        for i in 0..live.len() {
            for j in i + 1..live.len() {
                let (a, b) = (live[i], live[j]);
                let dir = slots[a].position() - slots[b].position();
                let dist_sq = dir.length_squared();
                if dist_sq > 0.0 {
                    let force = (1.0 / dist_sq) * self.strength;
                    let push = dir.normalize() * force / REPULSION_DAMPING;
                    slots[a].add_acceleration(push);
                    slots[b].add_acceleration(-push);
                }
            }
        }
    }
}

impl Default for RepulsionField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmitterConfig;
    use crate::particle::testing::TestParticle;
    use glam::Vec3;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn two_particle_pool(a: Vec3, b: Vec3) -> ParticlePool<TestParticle> {
        let mut pool = ParticlePool::with_capacity(2);
        let mut rng = SmallRng::seed_from_u64(3);
        pool.acquire_or_spawn(2, &EmitterConfig::default(), &mut rng);
        let mut positions = [a, b].into_iter();
        pool.for_each_live_mut(|p: &mut TestParticle| p.position = positions.next().unwrap());
        pool
    }

    #[test]
    fn test_pair_pushed_apart_equal_and_opposite() {
        let mut pool = two_particle_pool(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        RepulsionField::new().apply(&mut pool);

        let mut accels = Vec::new();
        pool.for_each_live(|p| accels.push(p.acceleration));

        // First particle sits on +x, so it is pushed further toward +x
        assert!(accels[0].x > 0.0);
        assert!(accels[1].x < 0.0);
        assert_eq!(accels[0], -accels[1]);
    }

    #[test]
    fn test_zero_separation_skipped() {
        let position = Vec3::new(0.5, 0.5, 0.5);
        let mut pool = two_particle_pool(position, position);
        RepulsionField::new().apply(&mut pool);

        pool.for_each_live(|p| assert_eq!(p.acceleration, Vec3::ZERO));
    }

    #[test]
    fn test_closer_pairs_push_harder() {
        let mut near = two_particle_pool(Vec3::new(0.1, 0.0, 0.0), Vec3::new(-0.1, 0.0, 0.0));
        let mut far = two_particle_pool(Vec3::new(2.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0));
        let field = RepulsionField::new();
        field.apply(&mut near);
        field.apply(&mut far);

        let mut near_mag = 0.0;
        near.for_each_live(|p| near_mag = f32::max(near_mag, p.acceleration.length()));
        let mut far_mag = 0.0;
        far.for_each_live(|p| far_mag = f32::max(far_mag, p.acceleration.length()));

        assert!(near_mag > far_mag);
    }

    #[test]
    fn test_purgatory_particles_excluded() {
        let mut pool = two_particle_pool(Vec3::X, Vec3::NEG_X);
        let mut first = true;
        pool.for_each_live_mut(|p| {
            if first {
                p.set_alive(false);
                first = false;
            }
        });
        pool.sweep_dead_to_purgatory();

        RepulsionField::new().apply(&mut pool);
        // Only one live particle left; no pair, no force
        pool.for_each_live(|p| assert_eq!(p.acceleration, Vec3::ZERO));
    }
}
