//! Particle emitter
//!
//! Gantree: L3_Anim → ParticleEmitter
//!
//! Rate-based spawning of short-lived particles drifting away from the qubit
//! body. Emission only happens while playing. Stopping halts emission and
//! lets live particles age out; `clear` drops them at once.

use nalgebra::Vector3;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// One live particle, relative to the emitter origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Offset from the emitter
    pub offset: Vector3<f64>,

    /// Units per second
    pub velocity: Vector3<f64>,

    /// Seconds alive
    pub age: f64,

    /// Seconds until expiry
    pub lifetime: f64,
}

impl Particle {
    /// Fraction of lifetime used, in [0, 1]
    pub fn life_fraction(&self) -> f64 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Continuous particle source
/// Gantree: ParticleEmitter // 파티클 방출기
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    rate: f64,
    lifetime: f64,
    speed: f64,
    playing: bool,
    accumulator: f64,
    particles: Vec<Particle>,
    emitted: u64,
}

impl ParticleEmitter {
    /// Create a stopped emitter; `rate` is particles per second
    pub fn new(rate: f64, lifetime: f64, speed: f64) -> Self {
        Self {
            rate: rate.max(0.0),
            lifetime: lifetime.max(0.0),
            speed,
            playing: false,
            accumulator: 0.0,
            particles: Vec::new(),
            emitted: 0,
        }
    }

    /// Start emitting
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Halt emission; live particles keep aging until they expire
    pub fn stop(&mut self) {
        self.playing = false;
        self.accumulator = 0.0;
    }

    /// Halt emission and drop every live particle
    pub fn clear(&mut self) {
        self.stop();
        self.particles.clear();
    }

    /// Emission active
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Step simulation by `dt`
    /// Gantree: update(dt,rng) // 파티클 갱신
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        let dt = dt.max(0.0);

        for p in &mut self.particles {
            p.age += dt;
            p.offset += p.velocity * dt;
        }
        self.particles.retain(|p| !p.is_expired());

        if !self.playing || self.lifetime <= 0.0 {
            return;
        }

        // a particle older than its lifetime is already dead, so a long frame
        // gap never spawns more than one lifetime's worth
        let backlog = (self.rate * self.lifetime).ceil().max(1.0);
        self.accumulator = (self.accumulator + self.rate * dt).min(backlog);
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            let direction = random_direction(rng);
            self.particles.push(Particle {
                offset: Vector3::zeros(),
                velocity: direction * self.speed,
                age: 0.0,
                lifetime: self.lifetime,
            });
            self.emitted += 1;
        }
    }

    /// Live particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Particles spawned since creation
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Random unit vector from uniform spherical angles
///
/// The polar angle is drawn uniformly in [0, π], which over-samples the poles
/// compared to an area-uniform distribution.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    let theta = rng.gen_range(0.0..=PI);
    let phi = rng.gen_range(0.0..TAU);
    Vector3::new(
        theta.sin() * phi.cos(),
        theta.cos(),
        theta.sin() * phi.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stopped_emits_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut emitter = ParticleEmitter::new(20.0, 1.0, 0.5);
        emitter.update(1.0, &mut rng);
        assert_eq!(emitter.live_count(), 0);
    }

    #[test]
    fn test_rate() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut emitter = ParticleEmitter::new(20.0, 1.0, 0.5);
        emitter.play();
        for _ in 0..10 {
            emitter.update(0.05, &mut rng);
        }
        // 20/s for 0.5s, allowing one lost to float accumulation
        assert!((9..=10).contains(&emitter.emitted()));
        assert_eq!(emitter.live_count() as u64, emitter.emitted());
    }

    #[test]
    fn test_expiry() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut emitter = ParticleEmitter::new(10.0, 0.5, 1.0);
        emitter.play();
        emitter.update(0.2, &mut rng);
        assert_eq!(emitter.live_count(), 2);

        emitter.stop();
        assert!(!emitter.is_playing());
        assert_eq!(emitter.live_count(), 2);

        emitter.update(0.2, &mut rng);
        assert_eq!(emitter.live_count(), 2);
        emitter.update(0.4, &mut rng);
        assert_eq!(emitter.live_count(), 0);
    }

    #[test]
    fn test_clear_drops_live_particles() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut emitter = ParticleEmitter::new(10.0, 1.0, 1.0);
        emitter.play();
        emitter.update(0.5, &mut rng);
        assert!(emitter.live_count() > 0);

        emitter.clear();
        assert!(!emitter.is_playing());
        assert_eq!(emitter.live_count(), 0);
    }

    #[test]
    fn test_long_frame_gap_is_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut emitter = ParticleEmitter::new(20.0, 1.0, 0.5);
        emitter.play();
        emitter.update(3600.0, &mut rng);

        assert_eq!(emitter.live_count(), 20);
        assert_eq!(emitter.emitted(), 20);

        // normal frames carry on at the usual rate
        emitter.update(0.5, &mut rng);
        assert!((29..=30).contains(&emitter.live_count()));
    }

    #[test]
    fn test_direction_is_unit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            assert_relative_eq!(random_direction(&mut rng).norm(), 1.0, epsilon = 1e-12);
        }
    }
}
